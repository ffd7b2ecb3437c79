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

use crate::encoder::TransactionRecord;
use crate::error::ReadError;
use crate::transaction_reader::{read_transactions, ReaderOptions};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tracing::warn;

pub const DEMO_PRODUCTS: [&str; 7] = ["Lime", "Lemon", "Banana", "Milk", "Bread", "Eggs", "Butter"];
pub const DEMO_RECORDS: usize = 5000;
pub const DEMO_ORDERS: u32 = 1499;

/// Synthetic basket for trying the miner without data: `records` records,
/// each a random product from `DEMO_PRODUCTS` in a random order numbered
/// 1 to `orders`. The same seed always gives the same basket.
pub fn demo_transactions(records: usize, orders: u32, seed: u64) -> Vec<TransactionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..records)
        .map(|_| {
            let order_id = rng.gen_range(1..=orders.max(1));
            let product = DEMO_PRODUCTS[rng.gen_range(0..DEMO_PRODUCTS.len())];
            TransactionRecord::new(order_id, product)
        })
        .collect()
}

/// Reads the transaction table at `path`, or falls back to the demo basket
/// if the table lacks the order or item column. The flag is true when the
/// demo basket was used. Any other read failure is returned.
pub fn read_or_demo<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
    seed: u64,
) -> Result<(Vec<TransactionRecord>, bool), ReadError> {
    match read_transactions(path, options) {
        Ok(records) => Ok((records, false)),
        Err(ReadError::MissingColumn(column)) => {
            warn!(column = %column, "input lacks column, mining the demo basket instead");
            Ok((demo_transactions(DEMO_RECORDS, DEMO_ORDERS, seed), true))
        }
        Err(err) => Err(err),
    }
}
