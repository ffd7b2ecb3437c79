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

use crate::itemizer::Itemizer;

/// An interned item label. Ids are handed out by an `Itemizer` in
/// lexicographic order of their labels, so ordering `Item`s orders labels.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }

    pub fn as_index(&self) -> usize {
        self.id as usize
    }

    // Canonical, order-independent form of a set of items: the labels
    // sorted and joined by commas.
    pub fn item_vec_to_string(items: &[Item], itemizer: &Itemizer) -> String {
        let mut labels: Vec<&str> = items.iter().map(|&item| itemizer.str_of(item)).collect();
        labels.sort_unstable();
        labels.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::Item;
    use crate::itemizer::Itemizer;

    #[test]
    fn test_item_vec_to_string_is_order_independent() {
        let itemizer = Itemizer::with_labels(vec!["milk", "bread", "eggs"]);
        let bread = itemizer.get("bread").unwrap();
        let eggs = itemizer.get("eggs").unwrap();
        let milk = itemizer.get("milk").unwrap();

        let forwards = Item::item_vec_to_string(&[bread, eggs, milk], &itemizer);
        let backwards = Item::item_vec_to_string(&[milk, eggs, bread], &itemizer);
        assert_eq!(forwards, "bread,eggs,milk");
        assert_eq!(forwards, backwards);
        assert_eq!(Item::item_vec_to_string(&[], &itemizer), "");
    }
}
