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
use fnv::FnvHashMap;
use std::cmp::Ordering;

/// A sorted, duplicate-free set of items and the number of orders
/// containing all of them. Ordered by size, then by items.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct ItemSet {
    pub items: Vec<Item>,
    pub count: usize,
}

impl ItemSet {
    pub fn new(mut items: Vec<Item>, count: usize) -> ItemSet {
        items.sort_unstable();
        items.dedup();
        ItemSet { items, count }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Ord for ItemSet {
    fn cmp(&self, other: &ItemSet) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.items.cmp(&other.items))
            .then_with(|| self.count.cmp(&other.count))
    }
}

impl PartialOrd for ItemSet {
    fn partial_cmp(&self, other: &ItemSet) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The output of a mining run: every frequent itemset with its count, and
/// the number of orders supports are relative to. Lookups by itemset let
/// rule generation compute metrics without going back to the orders.
#[derive(Clone, Debug, Default)]
pub struct FrequentItemsets {
    itemsets: Vec<ItemSet>,
    counts: FnvHashMap<Vec<Item>, usize>,
    num_orders: usize,
}

impl FrequentItemsets {
    pub fn new(mut itemsets: Vec<ItemSet>, num_orders: usize) -> FrequentItemsets {
        itemsets.sort();
        let counts = itemsets
            .iter()
            .map(|itemset| (itemset.items.clone(), itemset.count))
            .collect();
        FrequentItemsets {
            itemsets,
            counts,
            num_orders,
        }
    }

    pub fn empty() -> FrequentItemsets {
        FrequentItemsets::default()
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    /// Itemsets in ascending (size, items) order.
    pub fn iter(&self) -> std::slice::Iter<'_, ItemSet> {
        self.itemsets.iter()
    }

    pub fn as_slice(&self) -> &[ItemSet] {
        &self.itemsets
    }

    pub fn of_size(&self, k: usize) -> impl Iterator<Item = &ItemSet> {
        self.itemsets.iter().filter(move |itemset| itemset.len() == k)
    }

    pub fn num_orders(&self) -> usize {
        self.num_orders
    }

    /// Count of a frequent itemset given as sorted items.
    pub fn count(&self, items: &[Item]) -> Option<usize> {
        self.counts.get(items).cloned()
    }

    /// Support of a frequent itemset given as sorted items, `None` if the
    /// itemset is not frequent.
    pub fn support(&self, items: &[Item]) -> Option<f64> {
        self.count(items).map(|count| self.support_of_count(count))
    }

    pub fn support_of(&self, itemset: &ItemSet) -> f64 {
        self.support_of_count(itemset.count)
    }

    fn support_of_count(&self, count: usize) -> f64 {
        (count as f64) / (self.num_orders as f64)
    }

    pub fn to_records(&self, itemizer: &Itemizer) -> Vec<ItemsetRecord> {
        self.itemsets
            .iter()
            .map(|itemset| ItemsetRecord {
                support: self.support_of(itemset),
                itemsets: Item::item_vec_to_string(&itemset.items, itemizer),
                length: itemset.len(),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a FrequentItemsets {
    type Item = &'a ItemSet;
    type IntoIter = std::slice::Iter<'a, ItemSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Flat export row for a frequent itemset.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemsetRecord {
    pub support: f64,
    pub itemsets: String,
    pub length: usize,
}
