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

use crate::item::Item;
use crate::itemizer::Itemizer;
use crate::itemset::FrequentItemsets;
use crate::metric::Metric;
use crate::vec_sets::union;
use std::hash::{Hash, Hasher};

/// A directional rule `antecedent => consequent` with its statistics.
/// Both sides are sorted and disjoint, and their union is a frequent itemset.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    /// `f64::INFINITY` when confidence is exactly 1.
    pub conviction: f64,
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl Rule {
    // Creates the rule (antecedent, consequent) from the counts of already
    // mined itemsets. Returns None if either side is empty, the sides
    // overlap, or any of the itemsets involved isn't frequent.
    pub fn make(
        antecedent: Vec<Item>,
        consequent: Vec<Item>,
        itemsets: &FrequentItemsets,
    ) -> Option<Rule> {
        if antecedent.is_empty() || consequent.is_empty() {
            return None;
        }

        let ac_vec: Vec<Item> = union(&antecedent, &consequent);
        if ac_vec.len() != antecedent.len() + consequent.len() {
            return None;
        }
        let ac_count = itemsets.count(&ac_vec)?;
        let a_count = itemsets.count(&antecedent)?;
        let c_count = itemsets.count(&consequent)?;

        let num_orders = itemsets.num_orders() as f64;
        let support = (ac_count as f64) / num_orders;
        let a_sup = (a_count as f64) / num_orders;
        let c_sup = (c_count as f64) / num_orders;

        let confidence = (ac_count as f64) / (a_count as f64);
        let lift = support / (a_sup * c_sup);
        let leverage = support - a_sup * c_sup;
        // Every order with the antecedent also has the consequent.
        let conviction = if ac_count == a_count {
            f64::INFINITY
        } else {
            (1.0 - c_sup) / (1.0 - confidence)
        };

        Some(Rule {
            antecedent,
            consequent,
            antecedent_support: a_sup,
            consequent_support: c_sup,
            support,
            confidence,
            lift,
            leverage,
            conviction,
        })
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
            Metric::Leverage => self.leverage,
            Metric::Conviction => self.conviction,
        }
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        format!(
            "{} => {}",
            Item::item_vec_to_string(&self.antecedent, itemizer),
            Item::item_vec_to_string(&self.consequent, itemizer)
        )
    }
}
