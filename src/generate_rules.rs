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

use crate::error::MiningError;
use crate::itemset::{FrequentItemsets, ItemSet};
use crate::metric::Metric;
use crate::rule::Rule;
use crate::vec_sets::difference;
use itertools::Itertools;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Derives every rule `A => B` with `A ∪ B` a frequent itemset of two or
/// more items and `metric` at least `min_threshold`. All supports come from
/// `itemsets`; no transactions are rescanned.
///
/// Rules come out grouped by source itemset in itemset order, and within an
/// itemset by antecedent size then antecedent items.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<Rule>, MiningError> {
    metric.validate_threshold(min_threshold)?;

    let timer = Instant::now();
    let rules: Vec<Rule> = itemsets
        .as_slice()
        .par_iter()
        .filter(|itemset| itemset.len() > 1)
        .flat_map(|itemset| rules_from_itemset(itemset, itemsets, metric, min_threshold))
        .collect();

    info!(
        rules = rules.len(),
        metric = metric.name(),
        min_threshold,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "generated rules"
    );
    Ok(rules)
}

// Every non-empty proper subset of the itemset is tried as an antecedent,
// with the rest as consequent.
fn rules_from_itemset(
    itemset: &ItemSet,
    itemsets: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Vec<Rule> {
    let mut rules: Vec<Rule> = vec![];
    for size in 1..itemset.len() {
        for antecedent in itemset.items.iter().cloned().combinations(size) {
            let consequent = difference(&itemset.items, &antecedent);
            if let Some(rule) = Rule::make(antecedent, consequent, itemsets) {
                if rule.metric(metric) >= min_threshold {
                    rules.push(rule);
                }
            }
        }
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::generate_rules;
    use crate::apriori::{apriori, SupportBase};
    use crate::encoder::{TransactionEncoder, TransactionRecord};
    use crate::error::MiningError;
    use crate::incidence_matrix::IncidenceMatrix;
    use crate::itemset::FrequentItemsets;
    use crate::metric::Metric;
    use crate::rule::Rule;
    use approx::assert_relative_eq;

    fn matrix_of(transactions: &[&str]) -> IncidenceMatrix {
        let records: Vec<TransactionRecord> = transactions
            .iter()
            .enumerate()
            .flat_map(|(order, items)| {
                items.split(' ').map(move |item| TransactionRecord::new(order, item))
            })
            .collect();
        TransactionEncoder::new().encode(&records)
    }

    fn find<'a>(rules: &'a [Rule], matrix: &IncidenceMatrix, rule: &str) -> Option<&'a Rule> {
        rules.iter().find(|r| r.to_string(matrix.itemizer()) == rule)
    }

    #[test]
    fn test_milk_and_bread_confidence() {
        let matrix = matrix_of(&["milk bread", "milk bread", "milk"]);
        let itemsets = apriori(&matrix, 0.5, SupportBase::RetainedOrders).unwrap();
        let rules = generate_rules(&itemsets, Metric::Confidence, 0.5).unwrap();
        assert_eq!(rules.len(), 2);

        let bread_milk = find(&rules, &matrix, "bread => milk").unwrap();
        assert_eq!(bread_milk.confidence, 1.0);
        assert_eq!(bread_milk.conviction, f64::INFINITY);
        let milk_bread = find(&rules, &matrix, "milk => bread").unwrap();
        assert_relative_eq!(milk_bread.confidence, 2.0 / 3.0);

        let rules = generate_rules(&itemsets, Metric::Confidence, 0.7).unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_census_lift() {
        let matrix = matrix_of(&[
            "a b c", "d b c", "a b e", "f g c", "d g e", "f b c", "f b c", "a b e", "a b c",
            "a b e", "a b e",
        ]);
        let itemsets = apriori(&matrix, 0.05, SupportBase::RetainedOrders).unwrap();

        let all = generate_rules(&itemsets, Metric::Support, 0.0).unwrap();
        assert_eq!(all.len(), 64);

        let rules = generate_rules(&itemsets, Metric::Lift, 1.0).unwrap();
        assert_eq!(rules.len(), 46);

        let rule = find(&rules, &matrix, "c,g => f").unwrap();
        assert_eq!(rule.confidence, 1.0);
        assert_relative_eq!(rule.lift, 11.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(rule.support, 1.0 / 11.0);

        let rule = find(&rules, &matrix, "d => e,g").unwrap();
        assert_relative_eq!(rule.confidence, 0.5);
        assert_relative_eq!(rule.lift, 5.5, epsilon = 1e-12);

        let rule = find(&rules, &matrix, "b => c").unwrap();
        assert_relative_eq!(rule.lift, 55.0 / 54.0, epsilon = 1e-12);
        assert!(find(&rules, &matrix, "a => c").is_none());
    }

    #[test]
    fn test_lift_is_symmetric() {
        let matrix = matrix_of(&["a b c", "a b", "b c", "a c", "a", "c b"]);
        let itemsets = apriori(&matrix, 0.1, SupportBase::RetainedOrders).unwrap();
        let rules = generate_rules(&itemsets, Metric::Support, 0.0).unwrap();
        for rule in &rules {
            let reverse = rules
                .iter()
                .find(|r| r.antecedent == rule.consequent && r.consequent == rule.antecedent)
                .unwrap();
            assert_eq!(rule.lift, reverse.lift);
            assert_eq!(rule.leverage, reverse.leverage);
        }
    }

    #[test]
    fn test_empty_itemsets() {
        let rules = generate_rules(&FrequentItemsets::empty(), Metric::Lift, 1.0).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_invalid_threshold() {
        let result = generate_rules(&FrequentItemsets::empty(), Metric::Confidence, 1.2);
        assert!(matches!(result, Err(MiningError::InvalidArgument(_))));
    }
}
