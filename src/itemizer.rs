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
use fnv::FnvHashMap;

/// Bidirectional mapping between item labels and `Item` ids.
#[derive(Clone, Debug, Default)]
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer::default()
    }

    /// Builds an itemizer whose ids follow the lexicographic order of the
    /// distinct labels given.
    pub fn with_labels<I, S>(labels: I) -> Itemizer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<String> = labels.into_iter().map(|s| s.as_ref().to_owned()).collect();
        sorted.sort_unstable();
        sorted.dedup();
        let mut itemizer = Itemizer::new();
        for label in &sorted {
            itemizer.id_of(label);
        }
        itemizer
    }

    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(id) = self.item_str_to_id.get(item) {
            return *id;
        }
        let id = Item::with_id(self.item_id_to_str.len() as u32);
        self.item_str_to_id.insert(String::from(item), id);
        self.item_id_to_str.push(String::from(item));
        id
    }

    pub fn get(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }

    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index()]
    }

    /// Converts labels to a sorted id vector, or `None` if any label is unknown.
    pub fn to_id_vec<S: AsRef<str>>(&self, labels: &[S]) -> Option<Vec<Item>> {
        let mut items = labels
            .iter()
            .map(|label| self.get(label.as_ref()))
            .collect::<Option<Vec<Item>>>()?;
        items.sort_unstable();
        items.dedup();
        Some(items)
    }

    pub fn items(&self) -> impl Iterator<Item = Item> {
        (0..self.item_id_to_str.len() as u32).map(Item::with_id)
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Itemizer;

    #[test]
    fn test_with_labels_orders_ids_by_label() {
        let itemizer = Itemizer::with_labels(vec!["Milk", "Bread", "Eggs", "Bread"]);
        assert_eq!(itemizer.len(), 3);
        let ids = itemizer.to_id_vec(&["Milk", "Eggs", "Bread"]).unwrap();
        let labels: Vec<&str> = ids.iter().map(|&id| itemizer.str_of(id)).collect();
        assert_eq!(labels, vec!["Bread", "Eggs", "Milk"]);
        assert!(itemizer.get("Butter").is_none());
        assert!(itemizer.to_id_vec(&["Milk", "Butter"]).is_none());
    }

    #[test]
    fn test_id_of_is_stable() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        assert_ne!(a, b);
        assert_eq!(itemizer.id_of("a"), a);
        assert_eq!(itemizer.str_of(b), "b");
    }
}
