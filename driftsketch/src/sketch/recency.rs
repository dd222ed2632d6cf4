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

//! Recency ordering over slot indices.
//!
//! A doubly linked list threaded through two parallel arrays indexed by slot.
//! Slots are bounded by the sketch capacity, so the arrays are allocated once
//! and every operation is O(1).

const NIL: u32 = u32::MAX;

/// Least-recently-used ordering of the resident slots of a sketch.
#[derive(Debug, Clone)]
pub(crate) struct RecencyList {
    prev: Vec<u32>,
    next: Vec<u32>,
    linked: Vec<bool>,
    head: u32,
    tail: u32,
    len: usize,
}

impl RecencyList {
    /// Creates an empty list able to hold slots `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            prev: vec![NIL; capacity],
            next: vec![NIL; capacity],
            linked: vec![false; capacity],
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn contains(&self, slot: u32) -> bool {
        self.linked.get(slot as usize).copied().unwrap_or(false)
    }

    /// Returns the least recently used slot.
    pub fn front(&self) -> Option<u32> {
        (self.head != NIL).then_some(self.head)
    }

    /// Appends `slot` at the most recently used end.
    pub fn push_back(&mut self, slot: u32) {
        debug_assert!(!self.contains(slot), "slot {slot} already linked");
        let idx = slot as usize;
        self.prev[idx] = self.tail;
        self.next[idx] = NIL;
        if self.tail != NIL {
            self.next[self.tail as usize] = slot;
        } else {
            self.head = slot;
        }
        self.tail = slot;
        self.linked[idx] = true;
        self.len += 1;
    }

    /// Unlinks `slot`. Returns false if it was not linked.
    pub fn remove(&mut self, slot: u32) -> bool {
        if !self.contains(slot) {
            return false;
        }
        let idx = slot as usize;
        let (prev, next) = (self.prev[idx], self.next[idx]);
        if prev != NIL {
            self.next[prev as usize] = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.prev[next as usize] = prev;
        } else {
            self.tail = prev;
        }
        self.prev[idx] = NIL;
        self.next[idx] = NIL;
        self.linked[idx] = false;
        self.len -= 1;
        true
    }

    /// Moves `slot` to the most recently used end.
    pub fn touch(&mut self, slot: u32) {
        if self.tail == slot {
            return;
        }
        if self.remove(slot) {
            self.push_back(slot);
        }
    }

    /// Iterates from least to most recently used.
    pub fn iter(&self) -> RecencyIter<'_> {
        RecencyIter {
            list: self,
            cursor: self.head,
        }
    }
}

/// Iterator over linked slots, LRU first.
pub(crate) struct RecencyIter<'a> {
    list: &'a RecencyList,
    cursor: u32,
}

impl Iterator for RecencyIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let slot = self.cursor;
        self.cursor = self.list.next[slot as usize];
        Some(slot)
    }
}
