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

//! Sparse tf-idf feature vectors over sketch-tracked tokens.
//!
//! A [`TfIdfVectorizer`] consumes `<text>,<type>` records, feeds each distinct
//! token to its [`crate::sketch::Sketch`], mirrors newly tracked tokens into a
//! caller-owned [`FeatureSchema`], and emits a [`SparseInstance`] whose indices
//! are the tokens' slots.
//!
//! Slots are recycled when tokens stop being tracked. The schema follows by
//! renaming the recycled column rather than adding a new one, so its width is
//! bounded by the number of slots the sketch can hand out.

mod instance;
mod record;
mod schema;
mod tfidf;

pub use self::instance::SparseInstance;
pub use self::record::Record;
pub use self::record::TermCounts;
pub use self::record::tokenize;
pub use self::schema::FeatureSchema;
pub use self::schema::SchemaChange;
pub use self::tfidf::TfIdfVectorizer;
