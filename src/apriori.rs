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
use crate::incidence_matrix::IncidenceMatrix;
use crate::item::Item;
use crate::itemset::{FrequentItemsets, ItemSet};
use crate::vec_sets::drop_one;
use fnv::FnvHashSet;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info};

/// Which orders support is a fraction of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SupportBase {
    /// Orders with at least one item surviving the top-N filter, i.e. the
    /// rows of the incidence matrix.
    #[default]
    RetainedOrders,
    /// Every distinct order in the input, including those the top-N filter
    /// emptied.
    AllOrders,
}

impl SupportBase {
    pub fn denominator(&self, matrix: &IncidenceMatrix) -> usize {
        match *self {
            SupportBase::RetainedOrders => matrix.num_orders(),
            SupportBase::AllOrders => matrix.observed_orders(),
        }
    }
}

impl FromStr for SupportBase {
    type Err = MiningError;

    fn from_str(s: &str) -> Result<SupportBase, MiningError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retained" => Ok(SupportBase::RetainedOrders),
            "all" => Ok(SupportBase::AllOrders),
            other => Err(MiningError::invalid_argument(format!(
                "unknown support base `{}`, expected `retained` or `all`",
                other
            ))),
        }
    }
}

impl fmt::Display for SupportBase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SupportBase::RetainedOrders => write!(f, "retained"),
            SupportBase::AllOrders => write!(f, "all"),
        }
    }
}

pub fn validate_min_support(min_support: f64) -> Result<(), MiningError> {
    // Written so that NaN fails too.
    if min_support > 0.0 && min_support <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::invalid_argument(format!(
            "min_support must be in (0, 1], got {}",
            min_support
        )))
    }
}

/// Level-wise (Apriori) frequent itemset mining.
///
/// Returns every itemset whose support is at least `min_support`, each
/// tagged with its count. Size-k candidates are joined from pairs of
/// frequent (k-1)-itemsets sharing their first k-2 items, and dropped
/// unless every (k-1)-subset is frequent, before the matrix is scanned.
pub fn apriori(
    matrix: &IncidenceMatrix,
    min_support: f64,
    support_base: SupportBase,
) -> Result<FrequentItemsets, MiningError> {
    validate_min_support(min_support)?;

    let num_orders = support_base.denominator(matrix);
    if matrix.is_empty() || num_orders == 0 {
        return Ok(FrequentItemsets::empty());
    }

    let timer = Instant::now();
    let is_frequent =
        |count: usize| count > 0 && (count as f64) / (num_orders as f64) >= min_support;

    let singletons: Vec<Vec<Item>> = matrix.itemizer().items().map(|item| vec![item]).collect();
    let mut level = count_candidates(matrix, singletons, &is_frequent);
    let mut frequent: Vec<ItemSet> = vec![];
    let mut k = 1;
    while !level.is_empty() {
        level.sort();
        debug!(k, frequent = level.len(), "mined itemset level");
        let candidates = generate_candidates(&level);
        frequent.append(&mut level);
        k += 1;
        if candidates.is_empty() {
            break;
        }
        debug!(k, candidates = candidates.len(), "counting candidates");
        level = count_candidates(matrix, candidates, &is_frequent);
    }

    info!(
        itemsets = frequent.len(),
        orders = num_orders,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "apriori finished"
    );
    Ok(FrequentItemsets::new(frequent, num_orders))
}

// Counts every candidate against the matrix in parallel, keeping those that
// are frequent. Output order follows candidate order.
fn count_candidates<F>(
    matrix: &IncidenceMatrix,
    candidates: Vec<Vec<Item>>,
    is_frequent: &F,
) -> Vec<ItemSet>
where
    F: Fn(usize) -> bool + Sync,
{
    candidates
        .into_par_iter()
        .filter_map(|items| {
            let count = matrix.count(&items);
            if is_frequent(count) {
                Some(ItemSet { items, count })
            } else {
                None
            }
        })
        .collect()
}

// Joins sorted frequent k-itemsets sharing a (k-1)-prefix into (k+1)-item
// candidates, pruning any with an infrequent k-subset.
fn generate_candidates(level: &[ItemSet]) -> Vec<Vec<Item>> {
    let known: FnvHashSet<&[Item]> = level.iter().map(|itemset| itemset.items.as_slice()).collect();
    let mut candidates: Vec<Vec<Item>> = vec![];
    for (i, a) in level.iter().enumerate() {
        let prefix_len = a.len() - 1;
        for b in &level[i + 1..] {
            // Level is sorted, so itemsets sharing a prefix are adjacent.
            if a.items[..prefix_len] != b.items[..prefix_len] {
                break;
            }
            let mut candidate = a.items.clone();
            candidate.push(b.items[prefix_len]);
            if drop_one(&candidate).all(|subset| known.contains(subset.as_slice())) {
                candidates.push(candidate);
            }
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::{apriori, generate_candidates, SupportBase};
    use crate::encoder::{TransactionEncoder, TransactionRecord};
    use crate::error::MiningError;
    use crate::incidence_matrix::IncidenceMatrix;
    use crate::itemset::ItemSet;
    use crate::itemizer::Itemizer;
    use approx::assert_relative_eq;

    fn matrix_of(transactions: &[&[&str]]) -> IncidenceMatrix {
        let records: Vec<TransactionRecord> = transactions
            .iter()
            .enumerate()
            .flat_map(|(order, items)| {
                items.iter().map(move |item| TransactionRecord::new(order, *item))
            })
            .collect();
        TransactionEncoder::new().encode(&records)
    }

    #[test]
    fn test_milk_and_bread() {
        let matrix = matrix_of(&[&["milk", "bread"], &["milk", "bread"], &["milk"]]);
        let frequent = apriori(&matrix, 0.5, SupportBase::RetainedOrders).unwrap();
        let ids = |labels: &[&str]| matrix.itemizer().to_id_vec(labels).unwrap();

        assert_eq!(frequent.len(), 3);
        assert_eq!(frequent.support(&ids(&["milk"])), Some(1.0));
        assert_relative_eq!(frequent.support(&ids(&["bread"])).unwrap(), 2.0 / 3.0);
        assert_relative_eq!(frequent.support(&ids(&["bread", "milk"])).unwrap(), 2.0 / 3.0);
        assert_eq!(frequent.of_size(3).count(), 0);
    }

    #[test]
    fn test_census() {
        let transactions: Vec<&[&str]> = vec![
            &["a", "b", "c"],
            &["d", "b", "c"],
            &["a", "b", "e"],
            &["f", "g", "c"],
            &["d", "g", "e"],
            &["f", "b", "c"],
            &["f", "b", "c"],
            &["a", "b", "e"],
            &["a", "b", "c"],
            &["a", "b", "e"],
            &["a", "b", "e"],
        ];
        let matrix = matrix_of(&transactions);
        let frequent = apriori(&matrix, 0.05, SupportBase::RetainedOrders).unwrap();

        // Every itemset occurring in at least one transaction.
        let expected: Vec<Vec<&str>> = vec![
            vec!["a"],
            vec!["a", "b"],
            vec!["b"],
            vec!["c"],
            vec!["b", "c"],
            vec!["a", "c"],
            vec!["a", "b", "c"],
            vec!["d"],
            vec!["b", "d"],
            vec!["c", "d"],
            vec!["b", "c", "d"],
            vec!["d", "e"],
            vec!["e"],
            vec!["b", "e"],
            vec!["a", "e"],
            vec!["a", "b", "e"],
            vec!["f"],
            vec!["c", "f"],
            vec!["b", "f"],
            vec!["b", "c", "f"],
            vec!["g"],
            vec!["c", "g"],
            vec!["d", "g"],
            vec!["d", "e", "g"],
            vec!["e", "g"],
            vec!["f", "g"],
            vec!["c", "f", "g"],
        ];
        assert_eq!(frequent.len(), expected.len());
        for labels in &expected {
            let items = matrix.itemizer().to_id_vec(labels).unwrap();
            assert_eq!(
                frequent.count(&items),
                Some(matrix.count(&items)),
                "{:?}",
                labels
            );
        }

        // At 4/11 only {a}, {b}, {c}, {e}, {a,b}, {b,c}, {a,e}, {b,e}, {a,b,e} survive.
        let frequent = apriori(&matrix, 4.0 / 11.0, SupportBase::RetainedOrders).unwrap();
        assert_eq!(frequent.len(), 9);
        assert_eq!(frequent.of_size(3).count(), 1);
    }

    #[test]
    fn test_downward_closure() {
        let matrix = matrix_of(&[
            &["a", "b", "c", "d"],
            &["a", "b", "c"],
            &["a", "b", "d"],
            &["b", "c", "d"],
            &["a", "c"],
            &["b", "d"],
        ]);
        let frequent = apriori(&matrix, 0.3, SupportBase::RetainedOrders).unwrap();
        for itemset in frequent.iter().filter(|itemset| itemset.len() > 1) {
            for subset in crate::vec_sets::drop_one(&itemset.items) {
                let subset_count = frequent.count(&subset).expect("subset must be frequent");
                assert!(subset_count >= itemset.count);
            }
        }
    }

    #[test]
    fn test_generate_candidates_prunes() {
        let itemizer = Itemizer::with_labels(vec!["a", "b", "c", "d"]);
        let level: Vec<ItemSet> = [["a", "b"], ["a", "c"], ["b", "c"], ["b", "d"]]
            .iter()
            .map(|labels| ItemSet::new(itemizer.to_id_vec(labels).unwrap(), 1))
            .collect();
        // {b,c,d} is dropped because {c,d} is not frequent.
        assert_eq!(
            generate_candidates(&level),
            vec![itemizer.to_id_vec(&["a", "b", "c"]).unwrap()]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let matrix = matrix_of(&[&["a", "b"], &["a"], &["b"], &["c"]]);
        let frequent = apriori(&matrix, 0.25, SupportBase::RetainedOrders).unwrap();
        assert_eq!(frequent.len(), 4);
        let frequent = apriori(&matrix, 1.0, SupportBase::RetainedOrders).unwrap();
        assert!(frequent.is_empty());
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = TransactionEncoder::new().encode(&[]);
        let frequent = apriori(&matrix, 0.5, SupportBase::RetainedOrders).unwrap();
        assert!(frequent.is_empty());
    }

    #[test]
    fn test_invalid_min_support() {
        let matrix = matrix_of(&[&["a"]]);
        for &min_support in &[0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                apriori(&matrix, min_support, SupportBase::RetainedOrders),
                Err(MiningError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_support_base_all_orders() {
        let records = vec![
            TransactionRecord::new(1, "milk"),
            TransactionRecord::new(2, "milk"),
            TransactionRecord::new(3, "eggs"),
            TransactionRecord::new(4, "bread"),
        ];
        let matrix = TransactionEncoder::with_top_n_items(Some(1))
            .unwrap()
            .encode(&records);
        let milk = matrix.itemizer().to_id_vec(&["milk"]).unwrap();

        let retained = apriori(&matrix, 0.5, SupportBase::RetainedOrders).unwrap();
        assert_eq!(retained.support(&milk), Some(1.0));
        let all = apriori(&matrix, 0.5, SupportBase::AllOrders).unwrap();
        assert_eq!(all.num_orders(), 4);
        assert_eq!(all.support(&milk), Some(0.5));
    }

    #[test]
    fn test_parse_support_base() {
        assert_eq!("retained".parse::<SupportBase>(), Ok(SupportBase::RetainedOrders));
        assert_eq!("ALL".parse::<SupportBase>(), Ok(SupportBase::AllOrders));
        assert!("some".parse::<SupportBase>().is_err());
    }
}
