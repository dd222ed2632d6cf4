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

#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Draws `word{i}` tokens from a Zipf distribution over a fixed vocabulary.
pub struct ZipfStream {
    cumulative: Vec<f64>,
    probabilities: Vec<f64>,
    rng: StdRng,
}

impl ZipfStream {
    pub fn new(vocabulary: usize, exponent: f64, seed: u64) -> Self {
        let weights: Vec<f64> = (1..=vocabulary)
            .map(|rank| 1.0 / (rank as f64).powf(exponent))
            .collect();
        let total: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total).collect();
        let mut cumulative = Vec::with_capacity(vocabulary);
        let mut running = 0.0;
        for p in &probabilities {
            running += p;
            cumulative.push(running);
        }
        Self {
            cumulative,
            probabilities,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn word(index: usize) -> String {
        format!("word{index}")
    }

    pub fn next_index(&mut self) -> usize {
        let draw: f64 = self.rng.random();
        self.cumulative
            .partition_point(|&c| c < draw)
            .min(self.cumulative.len() - 1)
    }

    pub fn next_token(&mut self) -> String {
        Self::word(self.next_index())
    }

    /// Returns `(token, probability)` pairs in rank order.
    pub fn distribution(&self) -> Vec<(String, f64)> {
        self.probabilities
            .iter()
            .enumerate()
            .map(|(index, &p)| (Self::word(index), p))
            .collect()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
