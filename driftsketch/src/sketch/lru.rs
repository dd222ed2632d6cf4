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

//! LRU-decay frequent-item sketch.

use std::collections::HashMap;
use std::fmt::Write;

use crate::config::DEFAULT_CAPACITY;
use crate::config::DEFAULT_EPSILON;
use crate::config::DEFAULT_LAMBDA;
use crate::sketch::ClassLabel;
use crate::sketch::Sketch;
use crate::sketch::counter::DecayCounter;
use crate::sketch::recency::RecencyList;

/// Maximum number of entries examined when choosing an eviction victim.
pub const MAX_EVICTION_SCAN: usize = 32;

/// A resident token and its decayed counter.
#[derive(Debug, Clone)]
struct Entry {
    token: String,
    counter: DecayCounter,
}

/// Outcome of admitting a token into an [`LruDecaySketch`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Admission {
    /// Slot held by the admitted token.
    pub slot: u32,
    /// Token displaced to make room, if the sketch was full.
    pub evicted: Option<String>,
}

/// Read-only view of one resident token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeView<'a> {
    /// The tracked token.
    pub token: &'a str,
    /// Slot index held by the token.
    pub slot: u32,
    /// Decayed count projected to the sketch's current document.
    pub count: f64,
}

/// Capacity-bounded, exponentially decayed token counter.
///
/// At most `capacity` tokens are resident at any time. Each resident token owns
/// a slot in `0..capacity` that stays fixed for as long as the token is
/// resident, and a [`DecayCounter`] that forgets old mass at rate `lambda` per
/// document.
///
/// When a new token arrives at a full sketch exactly one resident token is
/// evicted. Up to [`MAX_EVICTION_SCAN`] entries are examined from the least
/// recently used end; the first whose projected count magnitude is below the
/// bound frequency `(1+epsilon)/capacity` is the victim. Examined entries
/// above the bound are moved to the most recently used end, so they are not
/// examined again until the rest of the sketch has aged past them. If none of
/// the examined entries is below the bound, the one with the smallest
/// magnitude is evicted. The new token takes over the victim's slot.
///
/// # Examples
///
/// ```
/// # use driftsketch::sketch::LruDecaySketch;
/// let mut sketch = LruDecaySketch::new(2, 0.01, 0.5);
/// let slot = sketch.add_token("cat", 1.0);
/// sketch.add_doc(1);
/// assert_eq!(sketch.slot("cat"), Some(slot));
/// assert!((sketch.count("cat") - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct LruDecaySketch {
    capacity: usize,
    epsilon: f64,
    lambda: f64,
    bound_frequency: f64,
    num_docs: u64,
    num_terms: f64,
    index: HashMap<String, u32>,
    entries: Vec<Option<Entry>>,
    recency: RecencyList,
    released: Vec<u32>,
    next_slot: u32,
}

impl Default for LruDecaySketch {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_EPSILON, DEFAULT_LAMBDA)
    }
}

impl LruDecaySketch {
    /// Creates an empty sketch.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or exceeds `u32::MAX`, if `lambda` is not in
    /// `(0, 1)`, or if `epsilon` is negative.
    pub fn new(capacity: usize, epsilon: f64, lambda: f64) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        assert!(
            capacity < u32::MAX as usize,
            "capacity must fit in a u32 slot index, got {capacity}"
        );
        assert!(
            lambda > 0.0 && lambda < 1.0,
            "lambda must be in (0.0, 1.0), got {lambda}"
        );
        assert!(epsilon >= 0.0, "epsilon must not be negative, got {epsilon}");
        Self {
            capacity,
            epsilon,
            lambda,
            bound_frequency: (1.0 + epsilon) / capacity as f64,
            num_docs: 0,
            num_terms: 0.0,
            index: HashMap::with_capacity(capacity),
            entries: (0..capacity).map(|_| None).collect(),
            recency: RecencyList::new(capacity),
            released: Vec::new(),
            next_slot: 0,
        }
    }

    /// Returns the maximum number of resident tokens.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the decay rate.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Returns epsilon.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the admission bound `(1+epsilon)/capacity`.
    pub fn bound_frequency(&self) -> f64 {
        self.bound_frequency
    }

    /// Returns the number of documents seen.
    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }

    /// Returns the running total of document sizes passed to `add_doc`.
    pub fn num_terms(&self) -> f64 {
        self.num_terms
    }

    /// Returns the number of resident tokens.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no token is resident.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns true if `token` is resident.
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Returns the slot of `token`, or `None` if it is not resident.
    pub fn slot(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Returns the decayed count of `token` projected to the current document,
    /// or zero if it is not resident.
    pub fn count(&self, token: &str) -> f64 {
        self.entry(token)
            .map(|entry| entry.counter.count_at(self.num_docs, self.lambda))
            .unwrap_or(0.0)
    }

    /// Adds `freq` occurrences of `token` and returns its slot.
    ///
    /// `freq` may be negative; the neutral bucket of the discriminative sketch
    /// uses signed updates to accumulate class polarity.
    pub fn add_token(&mut self, token: &str, freq: f64) -> u32 {
        self.admit(token, freq).slot
    }

    pub(crate) fn admit(&mut self, token: &str, freq: f64) -> Admission {
        if let Some(&slot) = self.index.get(token) {
            self.recency.touch(slot);
            let (doc, lambda) = (self.num_docs, self.lambda);
            if let Some(entry) = self.entries[slot as usize].as_mut() {
                entry.counter.add_count(freq, lambda, doc);
            }
            return Admission {
                slot,
                evicted: None,
            };
        }

        if self.len() < self.capacity {
            let slot = self.take_free_slot();
            self.insert(slot, token, freq);
            return Admission {
                slot,
                evicted: None,
            };
        }

        let (victim, scanned) = self.select_victim();
        let evicted = self.detach(victim);
        log::debug!(
            "evicting {evicted:?} from slot {victim} for {token:?} at doc {}, {scanned} scanned",
            self.num_docs
        );
        self.insert(victim, token, freq);
        Admission {
            slot: victim,
            evicted,
        }
    }

    /// Drops `token` and releases its slot. No-op if absent.
    pub fn remove(&mut self, token: &str) {
        if let Some(slot) = self.index.get(token).copied() {
            self.detach(slot);
            self.released.push(slot);
        }
    }

    /// Advances the document counter and adds `doc_size` to the term total.
    pub fn add_doc(&mut self, doc_size: usize) {
        self.num_docs += 1;
        self.num_terms += doc_size as f64;
    }

    /// Iterates resident tokens from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
        self.recency.iter().filter_map(move |slot| {
            self.entries[slot as usize].as_ref().map(|entry| NodeView {
                token: entry.token.as_str(),
                slot,
                count: entry.counter.count_at(self.num_docs, self.lambda),
            })
        })
    }

    /// Renders every resident token, least recently used first.
    pub fn show_nodes(&self) -> String {
        let mut out = String::new();
        for slot in self.recency.iter() {
            if let Some(entry) = self.entries[slot as usize].as_ref() {
                let _ = writeln!(
                    out,
                    "Count: {:.6} <Node {}, {:.6}, {}, {}>",
                    entry.counter.count_at(self.num_docs, self.lambda),
                    slot,
                    entry.counter.raw_count(),
                    entry.counter.last_doc(),
                    entry.token
                );
            }
        }
        out
    }

    /// Resets the sketch to an empty state, keeping its parameters.
    pub fn reset(&mut self) {
        *self = Self::new(self.capacity, self.epsilon, self.lambda);
    }

    fn entry(&self, token: &str) -> Option<&Entry> {
        let slot = *self.index.get(token)?;
        self.entries[slot as usize].as_ref()
    }

    fn take_free_slot(&mut self) -> u32 {
        if let Some(slot) = self.released.pop() {
            return slot;
        }
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    fn insert(&mut self, slot: u32, token: &str, freq: f64) {
        self.entries[slot as usize] = Some(Entry {
            token: token.to_string(),
            counter: DecayCounter::new(freq, self.num_docs),
        });
        self.index.insert(token.to_string(), slot);
        self.recency.push_back(slot);
        debug_assert_eq!(self.recency.len(), self.index.len());
        debug_assert!(self.index.len() <= self.capacity);
    }

    fn detach(&mut self, slot: u32) -> Option<String> {
        self.recency.remove(slot);
        let entry = self.entries[slot as usize].take()?;
        self.index.remove(&entry.token);
        Some(entry.token)
    }

    /// Returns the victim slot and the number of entries examined.
    fn select_victim(&mut self) -> (u32, usize) {
        let limit = self.len().min(MAX_EVICTION_SCAN);
        let mut smallest: Option<(u32, f64)> = None;
        let mut scanned = 0;
        while scanned < limit {
            let Some(slot) = self.recency.front() else {
                break;
            };
            scanned += 1;
            let magnitude = self.projected(slot).abs();
            if magnitude < self.bound_frequency {
                return (slot, scanned);
            }
            if smallest.is_none_or(|(_, min)| magnitude < min) {
                smallest = Some((slot, magnitude));
            }
            self.recency.touch(slot);
        }
        let victim = smallest
            .map(|(slot, _)| slot)
            .or_else(|| self.recency.front())
            .expect("a full sketch has a least recently used entry");
        (victim, scanned)
    }

    fn projected(&self, slot: u32) -> f64 {
        self.entries[slot as usize]
            .as_ref()
            .map_or(0.0, |entry| entry.counter.count_at(self.num_docs, self.lambda))
    }
}

impl Sketch for LruDecaySketch {
    fn add_token(&mut self, token: &str, freq: u32, _class: Option<ClassLabel>) -> Option<u32> {
        Some(LruDecaySketch::add_token(self, token, freq as f64))
    }

    fn count(&self, token: &str) -> f64 {
        LruDecaySketch::count(self, token)
    }

    fn slot(&self, token: &str) -> Option<u32> {
        LruDecaySketch::slot(self, token)
    }

    fn remove(&mut self, token: &str) {
        LruDecaySketch::remove(self, token)
    }

    fn add_doc(&mut self, doc_size: usize) {
        LruDecaySketch::add_doc(self, doc_size)
    }

    fn show_nodes(&self) -> String {
        LruDecaySketch::show_nodes(self)
    }
}
