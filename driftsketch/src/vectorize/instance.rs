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

//! Sparse labeled feature vectors.

use crate::sketch::ClassLabel;

/// A sparse vector of `(slot, weight)` pairs with an optional class label.
///
/// Indices are strictly ascending and every index is below
/// [`SparseInstance::num_features`].
#[derive(Debug, Clone, PartialEq)]
pub struct SparseInstance {
    indices: Vec<u32>,
    values: Vec<f64>,
    num_features: usize,
    label: Option<ClassLabel>,
}

impl SparseInstance {
    /// Builds an instance from unordered `(slot, weight)` pairs.
    ///
    /// Pairs are sorted by slot; a slot listed twice keeps its last weight.
    /// `num_features` is raised to cover the largest slot.
    pub fn new(
        pairs: impl IntoIterator<Item = (u32, f64)>,
        num_features: usize,
        label: Option<ClassLabel>,
    ) -> Self {
        let mut pairs: Vec<(u32, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|&(slot, _)| slot);
        let mut indices: Vec<u32> = Vec::with_capacity(pairs.len());
        let mut values: Vec<f64> = Vec::with_capacity(pairs.len());
        for (slot, value) in pairs {
            if indices.last() == Some(&slot) {
                if let Some(last) = values.last_mut() {
                    *last = value;
                }
                continue;
            }
            indices.push(slot);
            values.push(value);
        }
        let needed = indices.last().map_or(0, |&slot| slot as usize + 1);
        Self {
            indices,
            values,
            num_features: num_features.max(needed),
            label,
        }
    }

    /// Returns the slots with a stored weight.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Returns the stored weights, aligned with [`SparseInstance::indices`].
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the weight at `slot`, zero if none is stored.
    pub fn value(&self, slot: u32) -> f64 {
        self.indices
            .binary_search(&slot)
            .map(|pos| self.values[pos])
            .unwrap_or(0.0)
    }

    /// Returns the number of stored weights.
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Returns the width of the dense equivalent.
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Returns the class label, `None` if the record was unlabeled.
    pub fn label(&self) -> Option<ClassLabel> {
        self.label
    }

    /// Returns true if the instance carries a class label.
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// Iterates `(slot, weight)` in ascending slot order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Expands to a dense vector of length `num_features`.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.num_features];
        for (slot, value) in self.iter() {
            dense[slot as usize] = value;
        }
        dense
    }
}
