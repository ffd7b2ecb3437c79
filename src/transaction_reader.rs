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
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

/// Names of the columns holding the order id and the item label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderOptions {
    pub order_column: String,
    pub item_column: String,
}

impl Default for ReaderOptions {
    fn default() -> ReaderOptions {
        ReaderOptions {
            order_column: String::from("order_id"),
            item_column: String::from("product_name"),
        }
    }
}

/// Streams `TransactionRecord`s out of a CSV table with a header row.
/// Columns other than the order and item columns are ignored.
pub struct TransactionReader<R> {
    reader: R,
    order_index: usize,
    item_index: usize,
    line_number: usize,
}

impl TransactionReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(
        path: P,
        options: &ReaderOptions,
    ) -> Result<TransactionReader<BufReader<File>>, ReadError> {
        let file = File::open(path)?;
        TransactionReader::new(BufReader::new(file), options)
    }
}

impl<R: BufRead> TransactionReader<R> {
    pub fn new(mut reader: R, options: &ReaderOptions) -> Result<TransactionReader<R>, ReadError> {
        let mut line = String::new();
        let mut line_number = 0;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(ReadError::MissingHeader);
            }
            line_number += 1;
            if !line.trim().is_empty() {
                break;
            }
        }

        let header = split_record(&line);
        let column = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ReadError::MissingColumn(name.to_owned()))
        };
        let order_index = column(&options.order_column)?;
        let item_index = column(&options.item_column)?;

        Ok(TransactionReader {
            reader,
            order_index,
            item_index,
            line_number,
        })
    }
}

impl<R: BufRead> Iterator for TransactionReader<R> {
    type Item = Result<TransactionRecord, ReadError>;

    fn next(&mut self) -> Option<Result<TransactionRecord, ReadError>> {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(err.into())),
            }
            self.line_number += 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields = split_record(&line);
            let needed = self.order_index.max(self.item_index) + 1;
            if fields.len() < needed {
                return Some(Err(ReadError::MalformedRecord {
                    line: self.line_number,
                    message: format!("expected at least {} fields, found {}", needed, fields.len()),
                }));
            }

            let order_id = &fields[self.order_index];
            let item = &fields[self.item_index];
            if order_id.is_empty() || item.is_empty() {
                warn!(line = self.line_number, "skipping record with empty order id or item");
                continue;
            }
            return Some(Ok(TransactionRecord::new(order_id.as_str(), item.as_str())));
        }
    }
}

/// Reads a whole transaction table into memory.
pub fn read_transactions<P: AsRef<Path>>(
    path: P,
    options: &ReaderOptions,
) -> Result<Vec<TransactionRecord>, ReadError> {
    TransactionReader::open(path, options)?.collect()
}

// Splits one CSV line into trimmed fields. A field that starts with `"` is
// quoted: it may contain commas, and `""` inside it is a literal quote. A `"`
// anywhere else is an ordinary character. Records are one line each, so a
// quoted field cannot span lines.
fn split_record(line: &str) -> Vec<String> {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let mut fields = vec![];
    let mut field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if !quoted && field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                quoted = true;
            }
            ',' if !in_quotes => {
                fields.push(field.trim().to_owned());
                field.clear();
                quoted = false;
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_owned());
    fields
}
