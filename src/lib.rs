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

//! Market-basket rule mining.
//!
//! Turns `(order, item)` records into a boolean order × item incidence
//! matrix, mines frequent itemsets with Apriori, derives association rules
//! with support, confidence, lift, leverage and conviction, and ranks and
//! exports them as a flat table.

pub mod apriori;
pub mod demo;
pub mod encoder;
pub mod error;
pub mod generate_rules;
pub mod incidence_matrix;
pub mod item;
mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod metric;
pub mod pipeline;
pub mod ranker;
pub mod rule;
pub mod simulation;
pub mod transaction_reader;
mod vec_sets;

pub use apriori::{apriori, SupportBase};
pub use demo::{demo_transactions, read_or_demo};
pub use encoder::{TransactionEncoder, TransactionRecord};
pub use error::{MiningError, ReadError};
pub use generate_rules::generate_rules;
pub use incidence_matrix::IncidenceMatrix;
pub use item::Item;
pub use itemizer::Itemizer;
pub use itemset::{FrequentItemsets, ItemSet, ItemsetRecord};
pub use metric::Metric;
pub use pipeline::{mine, MiningConfig, MiningReport, Summary};
pub use ranker::{rank_rules, write_itemsets, write_rules, RuleRecord, SortOrder};
pub use rule::Rule;
pub use simulation::{Replay, SimulatedOrder};
pub use transaction_reader::{read_transactions, ReaderOptions, TransactionReader};
