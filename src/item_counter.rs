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

/// Dense per-item counter indexed by item id.
pub struct ItemCounter {
    counter: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counter: vec![] }
    }

    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counter.len() <= index {
            self.counter.resize(index + 1, 0);
        }
        self.counter[index] += count;
    }

    pub fn get(&self, item: &Item) -> u32 {
        self.counter.get(item.as_index()).cloned().unwrap_or(0)
    }

    // Most counted first; equal counts keep ascending item (label) order.
    pub fn sort_descending(&self, v: &mut [Item]) {
        v.sort_by(|a, b| self.get(b).cmp(&self.get(a)).then_with(|| a.cmp(b)));
    }

    /// The `n` most counted items that were seen at least once, in
    /// descending count order.
    pub fn top_n(&self, n: usize) -> Vec<Item> {
        let mut items: Vec<Item> = (0..self.counter.len())
            .filter(|&i| self.counter[i] > 0)
            .map(|i| Item::with_id(i as u32))
            .collect();
        self.sort_descending(&mut items);
        items.truncate(n);
        items
    }
}
