// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::ranker::RuleRecord;
use std::fmt;
use std::thread;
use std::time::Duration;

/// One replayed order: a rule's antecedent presented as what was bought and
/// its consequent as the suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulatedOrder {
    pub order_id: u64,
    pub bought: String,
    pub suggested: String,
}

impl fmt::Display for SimulatedOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Order {}: bought [{}] -> suggested [{}]",
            self.order_id, self.bought, self.suggested
        )
    }
}

/// Replays already-ranked rules as a stream of incoming orders, one every
/// `interval`. Cycles through the rules in rank order; yields nothing if
/// there are no rules.
pub struct Replay<'a> {
    rules: &'a [RuleRecord],
    interval: Duration,
    next_order_id: u64,
    remaining: usize,
    position: usize,
}

impl<'a> Replay<'a> {
    pub fn new(rules: &'a [RuleRecord], orders: usize) -> Replay<'a> {
        Replay {
            rules,
            interval: Duration::from_secs(1),
            next_order_id: 1500,
            remaining: orders,
            position: 0,
        }
    }

    pub fn starting_at(mut self, order_id: u64) -> Replay<'a> {
        self.next_order_id = order_id;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Replay<'a> {
        self.interval = interval;
        self
    }
}

impl<'a> Iterator for Replay<'a> {
    type Item = SimulatedOrder;

    fn next(&mut self) -> Option<SimulatedOrder> {
        if self.remaining == 0 || self.rules.is_empty() {
            return None;
        }
        if self.position > 0 && !self.interval.is_zero() {
            thread::sleep(self.interval);
        }
        let rule = &self.rules[self.position % self.rules.len()];
        let order = SimulatedOrder {
            order_id: self.next_order_id,
            bought: rule.antecedents.clone(),
            suggested: rule.consequents.clone(),
        };
        self.position += 1;
        self.next_order_id += 1;
        self.remaining -= 1;
        Some(order)
    }
}

#[cfg(test)]
mod tests {
    use super::Replay;
    use crate::ranker::RuleRecord;
    use std::time::Duration;

    fn record(antecedents: &str, consequents: &str) -> RuleRecord {
        RuleRecord {
            antecedents: antecedents.to_owned(),
            consequents: consequents.to_owned(),
            antecedent_support: 0.5,
            consequent_support: 0.5,
            support: 0.25,
            confidence: 0.5,
            lift: 1.0,
            leverage: 0.0,
            conviction: 1.0,
        }
    }

    #[test]
    fn test_replay_cycles_in_rank_order() {
        let rules = vec![record("lime", "lemon"), record("bread", "butter,milk")];
        let orders: Vec<String> = Replay::new(&rules, 3)
            .with_interval(Duration::from_millis(0))
            .map(|order| order.to_string())
            .collect();
        assert_eq!(
            orders,
            vec![
                "Order 1500: bought [lime] -> suggested [lemon]",
                "Order 1501: bought [bread] -> suggested [butter,milk]",
                "Order 1502: bought [lime] -> suggested [lemon]",
            ]
        );
    }

    #[test]
    fn test_replay_without_rules() {
        assert_eq!(Replay::new(&[], 10).count(), 0);
        let rules = vec![record("a", "b")];
        let replay = Replay::new(&rules, 2)
            .starting_at(7)
            .with_interval(Duration::from_millis(0));
        let ids: Vec<u64> = replay.map(|order| order.order_id).collect();
        assert_eq!(ids, vec![7, 8]);
    }
}
