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

//! Shared pool of attribute slots.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::config::DEFAULT_NUM_SLOTS;

/// Fixed-size pool of integer slots bound to tokens.
///
/// Free slots are handed out in FIFO order, so a fresh pool assigns `0, 1, 2, …`
/// and a released slot is reused only after every slot freed before it.
/// Running out of slots is not an error: [`SlotAllocator::add`] returns `None`
/// and the token stays unbound until a slot is released.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    total: usize,
    free: VecDeque<u32>,
    assigned: HashMap<String, u32>,
    exhausted: bool,
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_NUM_SLOTS)
    }
}

impl SlotAllocator {
    /// Creates a pool of `total` slots.
    ///
    /// # Panics
    ///
    /// Panics if `total` does not fit in a `u32` slot index.
    pub fn new(total: usize) -> Self {
        assert!(
            total <= u32::MAX as usize,
            "total slots must fit in a u32, got {total}"
        );
        Self {
            total,
            free: (0..total as u32).collect(),
            assigned: HashMap::new(),
            exhausted: false,
        }
    }

    /// Binds `token` to a free slot unless it already holds one.
    ///
    /// Returns the bound slot, or `None` if the pool is exhausted.
    pub fn add(&mut self, token: &str) -> Option<u32> {
        if let Some(&slot) = self.assigned.get(token) {
            return Some(slot);
        }
        match self.free.pop_front() {
            Some(slot) => {
                self.assigned.insert(token.to_string(), slot);
                Some(slot)
            }
            None => {
                if !self.exhausted {
                    log::warn!(
                        "all {} attribute slots are in use; new tokens are tracked without a slot",
                        self.total
                    );
                    self.exhausted = true;
                }
                None
            }
        }
    }

    /// Releases the slot bound to `token`, returning it.
    pub fn remove(&mut self, token: &str) -> Option<u32> {
        let slot = self.assigned.remove(token)?;
        self.free.push_back(slot);
        self.exhausted = false;
        Some(slot)
    }

    /// Returns the slot bound to `token`.
    pub fn slot(&self, token: &str) -> Option<u32> {
        self.assigned.get(token).copied()
    }

    /// Returns the number of bound tokens.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// Returns true if no token is bound.
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }

    /// Returns the number of unbound slots.
    pub fn num_free(&self) -> usize {
        self.free.len()
    }

    /// Returns the pool size.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns true if every slot is bound.
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    /// Iterates `(token, slot)` bindings in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.assigned
            .iter()
            .map(|(token, &slot)| (token.as_str(), slot))
    }
}
