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

//! Discriminative token tracking over two classes.
//!
//! Three [`LruDecaySketch`] buckets run side by side:
//!
//! * the **positive** and **negative** buckets count how often a token occurs in
//!   documents of each class;
//! * the **neutral** bucket (a stop list) holds tokens whose class counts were
//!   found to be nearly equal, together with a signed polarity that accumulates
//!   `+freq` for positive and `-freq` for negative documents.
//!
//! A class-tracked token is demoted to the neutral bucket as soon as
//! `|freq_pos - freq_neg| < merge_threshold`. A neutral token is promoted back
//! to the class its polarity points at once `|polarity| > split_threshold`.
//! Only class-tracked tokens hold a slot in the shared [`SlotAllocator`]; a
//! demotion releases the slot and a promotion requests a new one.
//!
//! Unlabeled documents are bookkept under [`UNLABELED_CLASS`], so a stream
//! without labels still selects features.

use std::fmt::Write;

use crate::config::DEFAULT_MERGE_THRESHOLD;
use crate::config::DEFAULT_SPLIT_THRESHOLD;
use crate::config::SketchConfig;
use crate::sketch::ClassLabel;
use crate::sketch::Sketch;
use crate::sketch::lru::LruDecaySketch;
use crate::sketch::slots::SlotAllocator;

/// Class unlabeled occurrences are counted under.
pub const UNLABELED_CLASS: ClassLabel = ClassLabel::Positive;

/// Bucket currently owning a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// Non-discriminative (stop list).
    Neutral,
    /// Counted for a class. A token may be counted for both classes at once.
    Class(ClassLabel),
}

/// Sketch that keeps only class-discriminative tokens in the feature space.
#[derive(Debug, Clone)]
pub struct DiscriminativeSketch {
    neutral: LruDecaySketch,
    positive: LruDecaySketch,
    negative: LruDecaySketch,
    slots: SlotAllocator,
    merge_threshold: f64,
    split_threshold: f64,
}

impl Default for DiscriminativeSketch {
    fn default() -> Self {
        Self::new(LruDecaySketch::default(), SlotAllocator::default())
    }
}

impl DiscriminativeSketch {
    /// Creates a sketch whose three buckets are copies of `base` and whose
    /// slots come from `slots`, using the default thresholds.
    pub fn new(base: LruDecaySketch, slots: SlotAllocator) -> Self {
        Self::with_thresholds(
            base,
            slots,
            DEFAULT_MERGE_THRESHOLD,
            DEFAULT_SPLIT_THRESHOLD,
        )
    }

    /// Creates a sketch with explicit merge and split thresholds.
    ///
    /// # Panics
    ///
    /// Panics if either threshold is negative or not finite.
    pub fn with_thresholds(
        mut base: LruDecaySketch,
        slots: SlotAllocator,
        merge_threshold: f64,
        split_threshold: f64,
    ) -> Self {
        assert!(
            merge_threshold.is_finite() && merge_threshold >= 0.0,
            "merge_threshold must be a non-negative number, got {merge_threshold}"
        );
        assert!(
            split_threshold.is_finite() && split_threshold >= 0.0,
            "split_threshold must be a non-negative number, got {split_threshold}"
        );
        base.reset();
        Self {
            neutral: base.clone(),
            positive: base.clone(),
            negative: base,
            slots,
            merge_threshold,
            split_threshold,
        }
    }

    /// Creates a sketch from a validated configuration.
    pub fn from_config(config: &SketchConfig) -> Self {
        Self::with_thresholds(
            LruDecaySketch::new(config.capacity, config.epsilon, config.lambda),
            SlotAllocator::new(config.num_slots),
            config.merge_threshold,
            config.split_threshold,
        )
    }

    /// Returns the neutral (stop list) bucket.
    pub fn neutral(&self) -> &LruDecaySketch {
        &self.neutral
    }

    /// Returns the bucket counting positive-class occurrences.
    pub fn positive(&self) -> &LruDecaySketch {
        &self.positive
    }

    /// Returns the bucket counting negative-class occurrences.
    pub fn negative(&self) -> &LruDecaySketch {
        &self.negative
    }

    /// Returns the shared slot pool.
    pub fn slots(&self) -> &SlotAllocator {
        &self.slots
    }

    /// Returns the demotion threshold.
    pub fn merge_threshold(&self) -> f64 {
        self.merge_threshold
    }

    /// Returns the promotion threshold.
    pub fn split_threshold(&self) -> f64 {
        self.split_threshold
    }

    /// Returns where `token` is tracked.
    ///
    /// For a token counted for both classes this reports the class with the
    /// larger decayed count.
    pub fn bucket(&self, token: &str) -> Option<Bucket> {
        if self.neutral.contains(token) {
            return Some(Bucket::Neutral);
        }
        match (self.positive.contains(token), self.negative.contains(token)) {
            (false, false) => None,
            (true, false) => Some(Bucket::Class(ClassLabel::Positive)),
            (false, true) => Some(Bucket::Class(ClassLabel::Negative)),
            (true, true) => {
                if self.positive.count(token) >= self.negative.count(token) {
                    Some(Bucket::Class(ClassLabel::Positive))
                } else {
                    Some(Bucket::Class(ClassLabel::Negative))
                }
            }
        }
    }

    /// Returns the per-class frequency estimate of `token`.
    pub fn class_freq(&self, token: &str, class: ClassLabel) -> f64 {
        self.class_sketch(class).count(token)
    }

    /// Returns the signed polarity of a neutral token, or zero.
    pub fn polarity(&self, token: &str) -> f64 {
        self.neutral.count(token)
    }

    fn class_sketch(&self, class: ClassLabel) -> &LruDecaySketch {
        match class {
            ClassLabel::Positive => &self.positive,
            ClassLabel::Negative => &self.negative,
        }
    }

    fn class_sketch_mut(&mut self, class: ClassLabel) -> &mut LruDecaySketch {
        match class {
            ClassLabel::Positive => &mut self.positive,
            ClassLabel::Negative => &mut self.negative,
        }
    }

    fn is_class_tracked(&self, token: &str) -> bool {
        self.positive.contains(token) || self.negative.contains(token)
    }

    /// Counts `token` for `class` and makes sure it holds a slot.
    fn track(&mut self, token: &str, freq: f64, class: ClassLabel) {
        let admission = self.class_sketch_mut(class).admit(token, freq);
        if let Some(evicted) = admission.evicted {
            if !self.is_class_tracked(&evicted) {
                self.slots.remove(&evicted);
            }
        }
        self.slots.add(token);
    }

    fn update_class_tracked(&mut self, token: &str, freq: f64, class: ClassLabel) {
        self.track(token, freq, class);
        let gap = (self.positive.freq_word(token) - self.negative.freq_word(token)).abs();
        if gap < self.merge_threshold {
            log::debug!("demoting {token:?} to the neutral bucket (gap {gap:.6})");
            self.positive.remove(token);
            self.negative.remove(token);
            self.slots.remove(token);
            self.neutral.admit(token, 0.0);
        }
    }

    fn update_neutral(&mut self, token: &str, freq: f64, class: ClassLabel) {
        let delta = match class {
            ClassLabel::Positive => freq,
            ClassLabel::Negative => -freq,
        };
        self.neutral.admit(token, delta);
        let polarity = self.neutral.count(token);
        if polarity.abs() > self.split_threshold {
            let target = if polarity > 0.0 {
                ClassLabel::Positive
            } else {
                ClassLabel::Negative
            };
            log::debug!("promoting {token:?} to {target:?} (polarity {polarity:.6})");
            self.neutral.remove(token);
            self.track(token, freq, target);
        }
    }
}

impl Sketch for DiscriminativeSketch {
    fn add_token(&mut self, token: &str, freq: u32, class: Option<ClassLabel>) -> Option<u32> {
        let freq = freq as f64;
        let class = class.unwrap_or(UNLABELED_CLASS);
        if self.neutral.contains(token) {
            self.update_neutral(token, freq, class);
        } else {
            self.update_class_tracked(token, freq, class);
        }
        self.slots.slot(token)
    }

    /// Returns the first non-zero count among the neutral, positive and
    /// negative buckets.
    fn count(&self, token: &str) -> f64 {
        [&self.neutral, &self.positive, &self.negative]
            .into_iter()
            .map(|sketch| sketch.count(token))
            .find(|&count| count != 0.0)
            .unwrap_or(0.0)
    }

    fn slot(&self, token: &str) -> Option<u32> {
        self.slots.slot(token)
    }

    fn remove(&mut self, token: &str) {
        self.neutral.remove(token);
        self.positive.remove(token);
        self.negative.remove(token);
        self.slots.remove(token);
    }

    fn add_doc(&mut self, doc_size: usize) {
        self.neutral.add_doc(doc_size);
        self.positive.add_doc(doc_size);
        self.negative.add_doc(doc_size);
    }

    fn show_nodes(&self) -> String {
        let mut out = String::new();
        for (name, sketch) in [
            ("neutral", &self.neutral),
            ("positive", &self.positive),
            ("negative", &self.negative),
        ] {
            let _ = writeln!(out, "[{name}]");
            out.push_str(&sketch.show_nodes());
        }
        out
    }
}
