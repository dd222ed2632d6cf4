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

//! Named feature columns.

/// How [`FeatureSchema::bind`] changed the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaChange {
    /// A new column was appended.
    Appended,
    /// An existing column was renamed; `previous` is the displaced name.
    Renamed {
        /// Name the column had before.
        previous: String,
    },
    /// The column already carried this name.
    Unchanged,
}

/// Ordered feature column names, one per slot.
///
/// The schema only grows. When a slot is recycled for a new token the column is
/// renamed in place; weights a classifier learned for the displaced token stay
/// attached to the column and now apply to the new token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<String>,
}

impl FeatureSchema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns the name of column `slot`.
    pub fn name(&self, slot: u32) -> Option<&str> {
        self.columns.get(slot as usize).map(String::as_str)
    }

    /// Names column `slot` after `token`.
    ///
    /// A slot past the end appends a column; any gap before it is filled with
    /// unnamed columns. A slot inside the schema is renamed.
    pub fn bind(&mut self, slot: u32, token: &str) -> SchemaChange {
        let slot = slot as usize;
        if slot >= self.columns.len() {
            self.columns.resize(slot, String::new());
            self.columns.push(token.to_string());
            return SchemaChange::Appended;
        }
        if self.columns[slot] == token {
            return SchemaChange::Unchanged;
        }
        let previous = std::mem::replace(&mut self.columns[slot], token.to_string());
        SchemaChange::Renamed { previous }
    }

    /// Iterates column names in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(String::as_str)
    }
}
