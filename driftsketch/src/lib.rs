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

//! Streaming feature selection and tf-idf weighting for concept-drifting text.
//!
//! driftsketch keeps, under a fixed memory budget, a live estimate of how
//! frequent and how class-discriminative each token of a text stream is, and
//! gives every tracked token a stable slot used as a column of sparse feature
//! vectors for incremental classifiers.
//!
//! * [`sketch`] holds the decayed frequent-item sketches and the shared slot
//!   pool.
//! * [`vectorize`] turns `<text>,<type>` records into labeled tf-idf vectors.
//! * [`session`] bundles a vectorizer with its feature schema.
//! * [`config`] describes how to build a sketch.
//!
//! # Examples
//!
//! ```
//! # use driftsketch::config::SketchConfig;
//! # use driftsketch::session::StreamSession;
//! let mut session = StreamSession::new(&SketchConfig::default()).unwrap();
//! let instance = session.process("what a lovely day,H").unwrap();
//! assert_eq!(instance.nnz(), 4);
//! assert_eq!(session.schema().name(0), Some("what"));
//! assert!(session.process("missing the type field").is_err());
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod session;
pub mod sketch;
pub mod vectorize;
