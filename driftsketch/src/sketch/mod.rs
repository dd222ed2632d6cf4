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

//! Decayed frequent-item sketches for streaming feature selection.
//!
//! # Overview
//!
//! Every sketch in this module keeps a bounded set of tokens, each with an
//! exponentially decayed count: a token's count is multiplied by `(1-λ)` for
//! every document that passes, and each new occurrence contributes `freq · λ`.
//! Tracked tokens are given a stable integer slot which downstream code uses as
//! a column index in sparse feature vectors.
//!
//! Two variants implement the shared [`Sketch`] capability:
//!
//! * [`LruDecaySketch`] tracks the most frequent and recent tokens regardless
//!   of class.
//! * [`DiscriminativeSketch`] runs three of them (neutral, positive, negative)
//!   and keeps only tokens whose frequency differs between the two classes in
//!   the feature space.
//!
//! # Ordering
//!
//! The decay arithmetic is keyed on a per-sketch document counter, so
//! documents must be applied one at a time in a single agreed order. None of
//! the sketches synchronise internally; wrap a shared instance in a mutex and
//! keep a single writer.
//!
//! # Examples
//!
//! ```
//! # use driftsketch::sketch::ClassLabel;
//! # use driftsketch::sketch::DiscriminativeSketch;
//! # use driftsketch::sketch::Sketch;
//! let mut sketch = DiscriminativeSketch::default();
//! let slot = sketch.add_token("great", 1, Some(ClassLabel::Positive));
//! assert_eq!(slot, Some(0));
//! sketch.add_doc(1);
//!
//! // Seen equally often in both classes: moved to the neutral bucket.
//! sketch.add_token("the", 1, Some(ClassLabel::Positive));
//! sketch.add_token("the", 1, Some(ClassLabel::Negative));
//! assert_eq!(sketch.slot("the"), None);
//! ```

mod counter;
mod discriminative;
mod lru;
mod recency;
mod slots;

use std::fmt;

pub use self::counter::DecayCounter;
pub use self::discriminative::Bucket;
pub use self::discriminative::DiscriminativeSketch;
pub use self::discriminative::UNLABELED_CLASS;
pub use self::lru::LruDecaySketch;
pub use self::lru::MAX_EVICTION_SCAN;
pub use self::lru::NodeView;
pub use self::slots::SlotAllocator;

/// One of the two supervised classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    /// Record type `"H"`.
    Positive,
    /// Record type `"S"`.
    Negative,
}

impl ClassLabel {
    /// Maps a record type code to a class. Unknown codes are unlabeled.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "H" => Some(ClassLabel::Positive),
            "S" => Some(ClassLabel::Negative),
            _ => None,
        }
    }

    /// Returns the record type code of this class.
    pub fn code(self) -> &'static str {
        match self {
            ClassLabel::Positive => "H",
            ClassLabel::Negative => "S",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Capability shared by the plain and discriminative sketches.
///
/// Callers such as [`crate::vectorize::TfIdfVectorizer`] only talk to this
/// trait, so either variant can be configured.
pub trait Sketch: fmt::Debug + Send {
    /// Adds `freq` occurrences of `token` observed in a document of `class`
    /// (`None` for unlabeled documents).
    ///
    /// Returns the token's slot after the update, or `None` if the token holds
    /// no slot.
    fn add_token(&mut self, token: &str, freq: u32, class: Option<ClassLabel>) -> Option<u32>;

    /// Returns the decayed count of `token`, or zero if it is not tracked.
    fn count(&self, token: &str) -> f64;

    /// Returns the slot of `token`, or `None` if it holds none.
    fn slot(&self, token: &str) -> Option<u32>;

    /// Stops tracking `token` and releases its slot. No-op if absent.
    fn remove(&mut self, token: &str);

    /// Marks the end of a document of `doc_size` tokens.
    fn add_doc(&mut self, doc_size: usize);

    /// Renders the tracked tokens for debugging.
    fn show_nodes(&self) -> String;

    /// Returns the frequency estimate used for class comparisons.
    fn freq_word(&self, token: &str) -> f64 {
        self.count(token)
    }
}

impl<S: Sketch + ?Sized> Sketch for Box<S> {
    fn add_token(&mut self, token: &str, freq: u32, class: Option<ClassLabel>) -> Option<u32> {
        (**self).add_token(token, freq, class)
    }

    fn count(&self, token: &str) -> f64 {
        (**self).count(token)
    }

    fn slot(&self, token: &str) -> Option<u32> {
        (**self).slot(token)
    }

    fn remove(&mut self, token: &str) {
        (**self).remove(token)
    }

    fn add_doc(&mut self, doc_size: usize) {
        (**self).add_doc(doc_size)
    }

    fn show_nodes(&self) -> String {
        (**self).show_nodes()
    }

    fn freq_word(&self, token: &str) -> f64 {
        (**self).freq_word(token)
    }
}
