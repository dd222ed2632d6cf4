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

//! Streaming tf-idf vectorizer.

use crate::config::SketchConfig;
use crate::error::Error;
use crate::sketch::Sketch;
use crate::vectorize::instance::SparseInstance;
use crate::vectorize::record::Record;
use crate::vectorize::record::tokenize;
use crate::vectorize::schema::FeatureSchema;
use crate::vectorize::schema::SchemaChange;

/// Turns records into tf-idf weighted sparse vectors over the tokens a sketch
/// currently tracks.
///
/// For a token occurring `n` times in a document of `len` tokens the weight is
/// `(n / len) · log10(num_docs / (count + 1))`, where `count` is the sketch's
/// decayed count of the token and `num_docs` includes the current document.
/// Tokens without a slot are left out of the vector.
///
/// # Examples
///
/// ```
/// # use driftsketch::config::SketchConfig;
/// # use driftsketch::sketch::ClassLabel;
/// # use driftsketch::vectorize::FeatureSchema;
/// # use driftsketch::vectorize::TfIdfVectorizer;
/// let mut vectorizer = TfIdfVectorizer::from_config(&SketchConfig::default());
/// let mut schema = FeatureSchema::new();
/// let instance = vectorizer.filter("cat dog cat,H", &mut schema).unwrap();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(instance.nnz(), 2);
/// assert_eq!(instance.label(), Some(ClassLabel::Positive));
/// ```
#[derive(Debug)]
pub struct TfIdfVectorizer<S = Box<dyn Sketch>> {
    sketch: S,
    num_docs: u64,
}

impl TfIdfVectorizer {
    /// Creates a vectorizer over the sketch described by `config`.
    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(config.build_sketch())
    }
}

impl<S: Sketch> TfIdfVectorizer<S> {
    /// Creates a vectorizer over `sketch`.
    pub fn new(sketch: S) -> Self {
        Self {
            sketch,
            num_docs: 0,
        }
    }

    /// Returns the underlying sketch.
    pub fn sketch(&self) -> &S {
        &self.sketch
    }

    /// Returns the number of documents vectorized so far.
    pub fn num_docs(&self) -> u64 {
        self.num_docs
    }

    /// Returns the sketch's frequency estimate for `token`.
    pub fn freq_word(&self, token: &str) -> f64 {
        self.sketch.freq_word(token)
    }

    /// Returns the sketch's debugging dump.
    pub fn print_sketch(&self) -> String {
        self.sketch.show_nodes()
    }

    /// Parses a `<text>,<type>` line and vectorizes it.
    ///
    /// A malformed line is rejected before anything is updated.
    pub fn filter(
        &mut self,
        line: &str,
        schema: &mut FeatureSchema,
    ) -> Result<SparseInstance, Error> {
        let record = Record::parse(line)?;
        Ok(self.filter_record(&record, schema))
    }

    /// Vectorizes a record, updating the sketch and growing or relabeling
    /// `schema` for tokens that became tracked.
    pub fn filter_record(&mut self, record: &Record, schema: &mut FeatureSchema) -> SparseInstance {
        self.num_docs += 1;
        let label = record.label();
        let terms = tokenize(record.text());

        for (token, count) in terms.iter() {
            let before = self.sketch.slot(token);
            let after = self.sketch.add_token(token, count, label);
            if let (None, Some(slot)) = (before, after) {
                match schema.bind(slot, token) {
                    SchemaChange::Renamed { previous } => {
                        log::debug!("column {slot} renamed from {previous:?} to {token:?}");
                    }
                    SchemaChange::Appended => {
                        log::trace!("column {slot} appended for {token:?}");
                    }
                    SchemaChange::Unchanged => {}
                }
            }
        }
        self.sketch.add_doc(terms.doc_len());

        if terms.is_empty() {
            return SparseInstance::new(std::iter::empty(), schema.len(), label);
        }
        let doc_len = terms.doc_len() as f64;
        let num_docs = self.num_docs as f64;
        let weights = terms.iter().filter_map(|(token, count)| {
            let slot = self.sketch.slot(token)?;
            let tf = count as f64 / doc_len;
            let idf = (num_docs / (self.sketch.count(token) + 1.0)).log10();
            Some((slot, tf * idf))
        });
        let instance = SparseInstance::new(weights, schema.len(), label);
        log::trace!(
            "doc {}: {} tokens, {} weighted",
            self.num_docs,
            terms.doc_len(),
            instance.nnz()
        );
        instance
    }
}
