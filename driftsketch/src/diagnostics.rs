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

//! Accuracy diagnostics for sketches.

use crate::sketch::Sketch;

/// Squared Hellinger-style distance between a reference distribution and the
/// sketch's frequency estimates.
///
/// The sketch's `freq_word` values over the reference tokens are normalised to
/// sum to one and compared against `reference` as `Σ(√p − √q)²`. Reference
/// probabilities are expected to sum to one. If the sketch knows none of the
/// tokens every `q` is taken as zero.
pub fn hellinger_distance<S: Sketch + ?Sized>(sketch: &S, reference: &[(&str, f64)]) -> f64 {
    let estimates: Vec<f64> = reference
        .iter()
        .map(|(token, _)| sketch.freq_word(token).max(0.0))
        .collect();
    let total: f64 = estimates.iter().sum();
    reference
        .iter()
        .zip(estimates)
        .map(|(&(_, p), estimate)| {
            let q = if total > 0.0 { estimate / total } else { 0.0 };
            (p.sqrt() - q.sqrt()).powi(2)
        })
        .sum()
}
