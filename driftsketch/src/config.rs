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

//! Sketch configuration.
//!
//! A [`SketchConfig`] can be assembled with [`SketchConfig::builder`], parsed
//! from an option string with [`SketchConfig::parse_options`], or deserialized
//! with serde from whatever configuration format the host application uses.
//! Missing fields fall back to the defaults below.

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::sketch::DiscriminativeSketch;
use crate::sketch::LruDecaySketch;
use crate::sketch::Sketch;

/// Default number of tokens each bucket tracks.
pub const DEFAULT_CAPACITY: usize = 1000;
/// Default epsilon of the bound frequency `(1+epsilon)/capacity`.
pub const DEFAULT_EPSILON: f64 = 0.01;
/// Default delta. Reserved; the decay does not use it.
pub const DEFAULT_DELTA: f64 = 0.01;
/// Default decay rate per document.
pub const DEFAULT_LAMBDA: f64 = 0.01;
/// Default size of the shared slot pool.
pub const DEFAULT_NUM_SLOTS: usize = 1000;
/// Default class-frequency gap below which a token is demoted to neutral.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 0.01;
/// Default polarity magnitude above which a neutral token is promoted.
pub const DEFAULT_SPLIT_THRESHOLD: f64 = 0.1;

/// Which sketch implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SketchKind {
    /// A single [`LruDecaySketch`].
    Lru,
    /// A [`DiscriminativeSketch`] over two classes.
    #[default]
    Discriminative,
}

impl FromStr for SketchKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lru" | "lrusketch" => Ok(SketchKind::Lru),
            "discriminative" | "sketchdiscriminative" => Ok(SketchKind::Discriminative),
            _ => Err(Error::invalid_argument(format!("unknown sketch kind: {s}"))),
        }
    }
}

/// Parameters of a sketch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Number of tokens each bucket tracks (`k`).
    pub capacity: usize,
    /// Epsilon of the bound frequency.
    pub epsilon: f64,
    /// Reserved.
    pub delta: f64,
    /// Decay rate per document, in `(0, 1)`.
    pub lambda: f64,
    /// Sketch implementation.
    pub sketch: SketchKind,
    /// Size of the shared slot pool of the discriminative sketch.
    pub num_slots: usize,
    /// Demotion threshold of the discriminative sketch.
    pub merge_threshold: f64,
    /// Promotion threshold of the discriminative sketch.
    pub split_threshold: f64,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            epsilon: DEFAULT_EPSILON,
            delta: DEFAULT_DELTA,
            lambda: DEFAULT_LAMBDA,
            sketch: SketchKind::default(),
            num_slots: DEFAULT_NUM_SLOTS,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
        }
    }
}

impl SketchConfig {
    /// Create a new builder for SketchConfig.
    pub fn builder() -> SketchConfigBuilder {
        SketchConfigBuilder::default()
    }

    /// Parses whitespace- or comma-separated `key=value` options on top of the
    /// defaults.
    ///
    /// Recognised keys are `capacity` (`k`), `epsilon` (`e`), `delta` (`d`),
    /// `lambda` (`l`), `sketch` (`s`), `slots`, `merge` and `split`.
    ///
    /// ```
    /// # use driftsketch::config::SketchConfig;
    /// # use driftsketch::config::SketchKind;
    /// let config = SketchConfig::parse_options("capacity=50 lambda=0.001 sketch=lru").unwrap();
    /// assert_eq!(config.capacity, 50);
    /// assert_eq!(config.sketch, SketchKind::Lru);
    /// ```
    pub fn parse_options(options: &str) -> Result<Self, Error> {
        let mut config = Self::default();
        let pairs = options
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|pair| !pair.is_empty());
        for pair in pairs {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                Error::invalid_argument("option must be of the form key=value")
                    .with_context("option", pair)
            })?;
            match key {
                "capacity" | "k" => config.capacity = parse_value(key, value)?,
                "epsilon" | "e" => config.epsilon = parse_value(key, value)?,
                "delta" | "d" => config.delta = parse_value(key, value)?,
                "lambda" | "l" => config.lambda = parse_value(key, value)?,
                "sketch" | "s" => config.sketch = value.parse()?,
                "slots" => config.num_slots = parse_value(key, value)?,
                "merge" => config.merge_threshold = parse_value(key, value)?,
                "split" => config.split_threshold = parse_value(key, value)?,
                _ => return Err(Error::unknown_option(key)),
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Checks every parameter is in range.
    pub fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 || self.capacity >= u32::MAX as usize {
            return Err(Error::invalid_argument(format!(
                "capacity must be in [1, {}), got {}",
                u32::MAX,
                self.capacity
            )));
        }
        if !(self.lambda > 0.0 && self.lambda < 1.0) {
            return Err(Error::invalid_argument(format!(
                "lambda must be in (0.0, 1.0), got {}",
                self.lambda
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::invalid_argument(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            )));
        }
        if self.num_slots > u32::MAX as usize {
            return Err(Error::invalid_argument(format!(
                "num_slots must fit in a u32, got {}",
                self.num_slots
            )));
        }
        for (name, value) in [
            ("merge_threshold", self.merge_threshold),
            ("split_threshold", self.split_threshold),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::invalid_argument(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Builds the configured sketch.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`SketchConfig::validate`].
    pub fn build_sketch(&self) -> Box<dyn Sketch> {
        match self.sketch {
            SketchKind::Lru => Box::new(LruDecaySketch::new(
                self.capacity,
                self.epsilon,
                self.lambda,
            )),
            SketchKind::Discriminative => Box::new(DiscriminativeSketch::from_config(self)),
        }
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, Error> {
    value.parse().map_err(|_| {
        Error::invalid_argument(format!("invalid value for option {key}"))
            .with_context("value", value)
    })
}

/// Builder for SketchConfig
#[derive(Debug, Default)]
pub struct SketchConfigBuilder {
    config: SketchConfig,
}

impl SketchConfigBuilder {
    /// Set the number of tokens each bucket tracks.
    ///
    /// # Panics
    ///
    /// If capacity is zero.
    pub fn capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be at least 1");
        self.config.capacity = capacity;
        self
    }

    /// Set epsilon.
    ///
    /// # Panics
    ///
    /// If epsilon is negative.
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        assert!(epsilon >= 0.0, "epsilon must not be negative, got {epsilon}");
        self.config.epsilon = epsilon;
        self
    }

    /// Set delta.
    pub fn delta(mut self, delta: f64) -> Self {
        self.config.delta = delta;
        self
    }

    /// Set the decay rate.
    ///
    /// # Panics
    ///
    /// If lambda is not in range (0.0, 1.0)
    pub fn lambda(mut self, lambda: f64) -> Self {
        assert!(
            lambda > 0.0 && lambda < 1.0,
            "lambda must be in (0.0, 1.0), got {lambda}"
        );
        self.config.lambda = lambda;
        self
    }

    /// Set the sketch implementation.
    pub fn sketch(mut self, kind: SketchKind) -> Self {
        self.config.sketch = kind;
        self
    }

    /// Set the size of the shared slot pool.
    ///
    /// # Panics
    ///
    /// If num_slots does not fit in a u32 slot index.
    pub fn num_slots(mut self, num_slots: usize) -> Self {
        assert!(
            num_slots <= u32::MAX as usize,
            "num_slots must fit in a u32, got {num_slots}"
        );
        self.config.num_slots = num_slots;
        self
    }

    /// Set the demotion threshold.
    ///
    /// # Panics
    ///
    /// If threshold is negative or not finite.
    pub fn merge_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold.is_finite() && threshold >= 0.0,
            "merge_threshold must be a non-negative number, got {threshold}"
        );
        self.config.merge_threshold = threshold;
        self
    }

    /// Set the promotion threshold.
    ///
    /// # Panics
    ///
    /// If threshold is negative or not finite.
    pub fn split_threshold(mut self, threshold: f64) -> Self {
        assert!(
            threshold.is_finite() && threshold >= 0.0,
            "split_threshold must be a non-negative number, got {threshold}"
        );
        self.config.split_threshold = threshold;
        self
    }

    /// Build the SketchConfig.
    pub fn build(self) -> SketchConfig {
        self.config
    }
}
