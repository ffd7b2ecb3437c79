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

use std::io;
use thiserror::Error;

/// Failure to run the mining pipeline. Only argument validation fails;
/// empty input and "nothing found" are ordinary empty results.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MiningError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MiningError {
    pub fn invalid_argument(message: impl Into<String>) -> MiningError {
        MiningError::InvalidArgument(message.into())
    }
}

/// Failure to load a transaction table.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("transaction table has no header row")]
    MissingHeader,
    #[error("column `{0}` not found in header")]
    MissingColumn(String),
    #[error("malformed record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },
}
