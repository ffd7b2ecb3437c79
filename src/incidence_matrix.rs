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

/// Boolean order × item matrix. Cell (order, item) is set iff at least one
/// record for that pair was seen. Built once by the encoder and immutable.
///
/// Stored both by row (sorted items of each order) and by column (sorted
/// row numbers containing each item), the latter for support counting.
#[derive(Clone, Debug)]
pub struct IncidenceMatrix {
    itemizer: Itemizer,
    order_ids: Vec<String>,
    rows: Vec<Vec<Item>>,
    tid_lists: Vec<Vec<usize>>,
    observed_orders: usize,
}

impl IncidenceMatrix {
    pub(crate) fn new(
        itemizer: Itemizer,
        order_ids: Vec<String>,
        rows: Vec<Vec<Item>>,
        observed_orders: usize,
    ) -> IncidenceMatrix {
        let mut tid_lists: Vec<Vec<usize>> = vec![vec![]; itemizer.len()];
        for (tid, row) in rows.iter().enumerate() {
            for item in row {
                tid_lists[item.as_index()].push(tid);
            }
        }
        IncidenceMatrix {
            itemizer,
            order_ids,
            rows,
            tid_lists,
            observed_orders,
        }
    }

    pub fn itemizer(&self) -> &Itemizer {
        &self.itemizer
    }

    /// Number of rows, i.e. orders holding at least one retained item.
    pub fn num_orders(&self) -> usize {
        self.rows.len()
    }

    /// Distinct orders seen in the input, including those dropped because
    /// none of their items were retained.
    pub fn observed_orders(&self) -> usize {
        self.observed_orders
    }

    pub fn num_items(&self) -> usize {
        self.itemizer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn order_ids(&self) -> &[String] {
        &self.order_ids
    }

    pub fn row(&self, row: usize) -> &[Item] {
        &self.rows[row]
    }

    pub fn contains(&self, row: usize, item: Item) -> bool {
        self.rows[row].binary_search(&item).is_ok()
    }

    /// Number of rows containing every item of `itemset`.
    pub fn count(&self, itemset: &[Item]) -> usize {
        if itemset.is_empty() {
            return 0;
        }

        let mut tid_lists: Vec<&Vec<usize>> = Vec::with_capacity(itemset.len());
        for item in itemset {
            match self.tid_lists.get(item.as_index()) {
                Some(tids) => tid_lists.push(tids),
                None => return 0,
            }
        }
        if tid_lists.len() == 1 {
            return tid_lists[0].len();
        }
        // Walk the shortest list, advancing a cursor into each of the others.
        tid_lists.sort_by_key(|tids| tids.len());

        let mut p: Vec<usize> = vec![0; tid_lists.len()];
        let mut count = 0;
        for &tid in tid_lists[0].iter() {
            let mut tid_in_all_lists = true;
            for i in 1..tid_lists.len() {
                while p[i] < tid_lists[i].len() && tid_lists[i][p[i]] < tid {
                    p[i] += 1;
                }
                if p[i] == tid_lists[i].len() || tid_lists[i][p[i]] != tid {
                    tid_in_all_lists = false;
                    break;
                }
            }
            if tid_in_all_lists {
                count += 1;
            }
        }
        count
    }

    /// Fraction of rows containing `itemset`; 0 for an empty matrix.
    pub fn support(&self, itemset: &[Item]) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        (self.count(itemset) as f64) / (self.rows.len() as f64)
    }
}
