// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Input records and tokenization.

use std::collections::HashMap;

use crate::error::Error;
use crate::sketch::ClassLabel;

/// A cleaned message and its type code, as produced by the document source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    code: String,
}

impl Record {
    /// Creates a record from a message and a type code.
    pub fn new(text: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            code: code.into(),
        }
    }

    /// Parses `<text>,<type>`.
    ///
    /// The type is whatever follows the last comma, so the message itself may
    /// contain commas. A line without any comma has no type field and is
    /// rejected with [`crate::error::ErrorKind::InvalidData`].
    pub fn parse(line: &str) -> Result<Self, Error> {
        let (text, code) = line
            .rsplit_once(',')
            .ok_or_else(|| Error::malformed_record(line))?;
        Ok(Self::new(text, code.trim()))
    }

    /// Returns the message text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the raw type code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the class of this record, or `None` for unlabeled records.
    pub fn label(&self) -> Option<ClassLabel> {
        ClassLabel::from_code(&self.code)
    }
}

/// Per-document term counts in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCounts {
    terms: Vec<(String, u32)>,
    len: usize,
}

impl TermCounts {
    /// Returns the number of tokens in the document.
    pub fn doc_len(&self) -> usize {
        self.len
    }

    /// Returns the number of distinct tokens.
    pub fn num_unique(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if the document has no tokens.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the count of `token` in the document.
    pub fn get(&self, token: &str) -> u32 {
        self.terms
            .iter()
            .find(|(term, _)| term == token)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Iterates `(token, count)` in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.terms.iter().map(|(term, count)| (term.as_str(), *count))
    }
}

/// Splits `text` on whitespace, strips apostrophes and lower-cases each token.
///
/// Tokens that are empty after stripping are dropped and do not count towards
/// the document length.
pub fn tokenize(text: &str) -> TermCounts {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts = TermCounts::default();
    for raw in text.split_whitespace() {
        let token: String = raw.chars().filter(|&c| c != '\'').collect();
        if token.is_empty() {
            continue;
        }
        let token = token.to_lowercase();
        counts.len += 1;
        match positions.get(&token) {
            Some(&pos) => counts.terms[pos].1 += 1,
            None => {
                positions.insert(token.clone(), counts.terms.len());
                counts.terms.push((token, 1));
            }
        }
    }
    counts
}
