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
use crate::item_counter::ItemCounter;
use crate::itemizer::Itemizer;
use fnv::FnvHashMap;
use tracing::debug;

/// One observation of an item in an order. Any per-record quantity is
/// irrelevant to mining and is not carried.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionRecord {
    pub order_id: String,
    pub item: String,
}

impl TransactionRecord {
    pub fn new(order_id: impl ToString, item: impl Into<String>) -> TransactionRecord {
        TransactionRecord {
            order_id: order_id.to_string(),
            item: item.into(),
        }
    }
}

/// Turns transaction records into an `IncidenceMatrix`.
///
/// With `top_n_items` set, only the N items with the most records survive
/// (ties go to the lexicographically smaller label). Everything else is
/// invisible to mining, and orders left with no surviving item are dropped
/// from the matrix. The number of distinct orders seen before the drop is
/// kept as `IncidenceMatrix::observed_orders`.
#[derive(Clone, Debug, Default)]
pub struct TransactionEncoder {
    top_n_items: Option<usize>,
}

impl TransactionEncoder {
    pub fn new() -> TransactionEncoder {
        TransactionEncoder::default()
    }

    pub fn with_top_n_items(top_n_items: Option<usize>) -> Result<TransactionEncoder, MiningError> {
        if top_n_items == Some(0) {
            return Err(MiningError::invalid_argument(
                "top_n_items must be at least 1 when set",
            ));
        }
        Ok(TransactionEncoder { top_n_items })
    }

    pub fn top_n_items(&self) -> Option<usize> {
        self.top_n_items
    }

    pub fn encode(&self, records: &[TransactionRecord]) -> IncidenceMatrix {
        let all_items = Itemizer::with_labels(records.iter().map(|r| r.item.as_str()));
        let itemizer = match self.top_n_items {
            Some(n) if n < all_items.len() => {
                let mut popularity = ItemCounter::new();
                for record in records {
                    if let Some(item) = all_items.get(&record.item) {
                        popularity.add(&item, 1);
                    }
                }
                let kept = popularity.top_n(n);
                debug!(
                    kept = kept.len(),
                    distinct_items = all_items.len(),
                    "applied top-N item filter"
                );
                Itemizer::with_labels(kept.into_iter().map(|item| all_items.str_of(item)))
            }
            _ => all_items,
        };

        let mut order_rows: FnvHashMap<&str, usize> = FnvHashMap::default();
        let mut order_ids: Vec<String> = vec![];
        let mut rows: Vec<Vec<Item>> = vec![];
        for record in records {
            let row = *order_rows.entry(record.order_id.as_str()).or_insert_with(|| {
                order_ids.push(record.order_id.clone());
                rows.push(vec![]);
                rows.len() - 1
            });
            if let Some(item) = itemizer.get(&record.item) {
                rows[row].push(item);
            }
        }
        let observed_orders = order_ids.len();

        let (order_ids, rows): (Vec<String>, Vec<Vec<Item>>) = order_ids
            .into_iter()
            .zip(rows)
            .filter(|(_, row)| !row.is_empty())
            .map(|(order_id, mut row)| {
                // Repeated records of an item in an order are one cell.
                row.sort_unstable();
                row.dedup();
                (order_id, row)
            })
            .unzip();

        IncidenceMatrix::new(itemizer, order_ids, rows, observed_orders)
    }
}

#[cfg(test)]
mod tests {
    use super::{TransactionEncoder, TransactionRecord};
    use crate::error::MiningError;

    fn records(pairs: &[(u32, &str)]) -> Vec<TransactionRecord> {
        pairs.iter().map(|&(o, i)| TransactionRecord::new(o, i)).collect()
    }

    #[test]
    fn test_encode_marks_presence() {
        let matrix = TransactionEncoder::new().encode(&records(&[
            (1, "milk"),
            (1, "bread"),
            (1, "milk"),
            (2, "milk"),
            (3, "eggs"),
        ]));
        assert_eq!(matrix.num_orders(), 3);
        assert_eq!(matrix.observed_orders(), 3);
        assert_eq!(matrix.num_items(), 3);
        assert_eq!(matrix.order_ids(), &["1", "2", "3"]);

        let itemizer = matrix.itemizer();
        let bread = itemizer.get("bread").unwrap();
        let milk = itemizer.get("milk").unwrap();
        let eggs = itemizer.get("eggs").unwrap();
        assert_eq!(matrix.row(0), &[bread, milk]);
        assert!(matrix.contains(1, milk));
        assert!(!matrix.contains(1, bread));
        assert!(matrix.contains(2, eggs));
    }

    #[test]
    fn test_top_n_drops_orders_without_retained_items() {
        let matrix = TransactionEncoder::with_top_n_items(Some(2))
            .unwrap()
            .encode(&records(&[
                (1, "milk"),
                (1, "bread"),
                (2, "milk"),
                (2, "bread"),
                (3, "eggs"),
                (4, "butter"),
                (4, "milk"),
            ]));
        assert_eq!(matrix.num_items(), 2);
        assert!(matrix.itemizer().get("eggs").is_none());
        assert!(matrix.itemizer().get("butter").is_none());
        assert_eq!(matrix.order_ids(), &["1", "2", "4"]);
        assert_eq!(matrix.num_orders(), 3);
        assert_eq!(matrix.observed_orders(), 4);
    }

    #[test]
    fn test_top_n_ties_prefer_smaller_label() {
        let matrix = TransactionEncoder::with_top_n_items(Some(1))
            .unwrap()
            .encode(&records(&[(1, "lime"), (2, "lemon")]));
        assert!(matrix.itemizer().get("lemon").is_some());
        assert!(matrix.itemizer().get("lime").is_none());
    }

    #[test]
    fn test_zero_top_n_rejected() {
        assert!(matches!(
            TransactionEncoder::with_top_n_items(Some(0)),
            Err(MiningError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let matrix = TransactionEncoder::new().encode(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.num_orders(), 0);
        assert_eq!(matrix.num_items(), 0);
    }
}
