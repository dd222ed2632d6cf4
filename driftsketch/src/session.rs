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

//! Caller-owned streaming session.

use crate::config::SketchConfig;
use crate::error::Error;
use crate::sketch::Sketch;
use crate::vectorize::FeatureSchema;
use crate::vectorize::SparseInstance;
use crate::vectorize::TfIdfVectorizer;

/// A vectorizer together with the feature schema it maintains.
///
/// A session is the unit of state of one stream: documents must be processed
/// one at a time, in arrival order. Nothing is shared between sessions.
#[derive(Debug)]
pub struct StreamSession<S = Box<dyn Sketch>> {
    vectorizer: TfIdfVectorizer<S>,
    schema: FeatureSchema,
}

impl StreamSession {
    /// Creates a session over the sketch described by `config`.
    pub fn new(config: &SketchConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::with_sketch(config.build_sketch()))
    }
}

impl<S: Sketch> StreamSession<S> {
    /// Creates a session over an existing sketch with an empty schema.
    pub fn with_sketch(sketch: S) -> Self {
        Self {
            vectorizer: TfIdfVectorizer::new(sketch),
            schema: FeatureSchema::new(),
        }
    }

    /// Vectorizes one `<text>,<type>` line.
    pub fn process(&mut self, line: &str) -> Result<SparseInstance, Error> {
        self.vectorizer.filter(line, &mut self.schema)
    }

    /// Returns the feature schema.
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Returns the vectorizer.
    pub fn vectorizer(&self) -> &TfIdfVectorizer<S> {
        &self.vectorizer
    }

    /// Returns the number of documents processed.
    pub fn num_docs(&self) -> u64 {
        self.vectorizer.num_docs()
    }
}
