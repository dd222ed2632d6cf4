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

//! Exponentially decayed counter.

/// A decayed count together with the document index it was last updated at.
///
/// The counter never stores history. Old mass is forgotten geometrically: after
/// `Δ` documents without an update the count has been multiplied by `(1-λ)^Δ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayCounter {
    count: f64,
    last_doc: u64,
}

impl DecayCounter {
    /// Creates a counter holding `freq` as of document `doc`.
    pub fn new(freq: f64, doc: u64) -> Self {
        Self {
            count: freq,
            last_doc: doc,
        }
    }

    /// Decays the stored count up to `doc` and folds in `freq · λ`.
    ///
    /// A `doc` older than the last update is treated as the same document, so
    /// `last_doc` only moves forward.
    pub fn add_count(&mut self, freq: f64, lambda: f64, doc: u64) {
        self.count = self.count * decay_factor(lambda, self.elapsed(doc)) + freq * lambda;
        self.last_doc = self.last_doc.max(doc);
    }

    /// Returns the count projected to `doc` without mutating the counter.
    pub fn count_at(&self, doc: u64, lambda: f64) -> f64 {
        self.count * decay_factor(lambda, self.elapsed(doc))
    }

    /// Returns the count as of the last update.
    pub fn raw_count(&self) -> f64 {
        self.count
    }

    /// Returns the document index of the last update.
    pub fn last_doc(&self) -> u64 {
        self.last_doc
    }

    fn elapsed(&self, doc: u64) -> u64 {
        doc.saturating_sub(self.last_doc)
    }
}

/// Computes `(1-λ)^elapsed` as `exp(elapsed · ln(1-λ))`.
///
/// `ln_1p` keeps the logarithm accurate for small `λ`, and the product form
/// underflows cleanly to zero instead of looping over huge exponents.
#[inline]
pub(crate) fn decay_factor(lambda: f64, elapsed: u64) -> f64 {
    if elapsed == 0 {
        return 1.0;
    }
    (elapsed as f64 * (-lambda).ln_1p()).exp()
}
