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

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use driftsketch::config::SketchConfig;
use driftsketch::config::SketchKind;
use driftsketch::error::ErrorKind;
use driftsketch::session::StreamSession;
use driftsketch::sketch::ClassLabel;
use driftsketch::sketch::DiscriminativeSketch;
use driftsketch::sketch::LruDecaySketch;
use driftsketch::sketch::Sketch;
use driftsketch::sketch::SlotAllocator;
use driftsketch::vectorize::FeatureSchema;
use driftsketch::vectorize::Record;
use driftsketch::vectorize::TfIdfVectorizer;
use googletest::prelude::*;

fn lru_vectorizer(capacity: usize, lambda: f64) -> TfIdfVectorizer<LruDecaySketch> {
    TfIdfVectorizer::new(LruDecaySketch::new(capacity, 0.01, lambda))
}

#[test]
fn test_first_document_grows_schema() {
    let mut vectorizer = TfIdfVectorizer::from_config(&SketchConfig::default());
    let mut schema = FeatureSchema::new();
    let instance = vectorizer.filter("cat dog cat,H", &mut schema).unwrap();

    assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["cat", "dog"]);
    assert_eq!(instance.nnz(), 2);
    assert!(instance.values().iter().all(|&v| v != 0.0));
    assert_eq!(instance.num_features(), 2);
    assert_eq!(instance.label(), Some(ClassLabel::Positive));
    assert_eq!(vectorizer.num_docs(), 1);
}

#[test]
fn test_weights_are_tf_idf() {
    let mut vectorizer = lru_vectorizer(10, 0.01);
    let mut schema = FeatureSchema::new();
    let instance = vectorizer.filter("cat dog cat,H", &mut schema).unwrap();

    // Counts are projected one document past their insertion.
    let cat = (2.0 / 3.0) * (1.0f64 / (2.0 * 0.99 + 1.0)).log10();
    let dog = (1.0 / 3.0) * (1.0f64 / (0.99 + 1.0)).log10();
    assert_that!(instance.value(0), near(cat, 1e-12));
    assert_that!(instance.value(1), near(dog, 1e-12));

    let instance = vectorizer.filter("dog bird,S", &mut schema).unwrap();
    let dog_count = 0.99 * 0.99 + 0.01 * 0.99;
    let dog = 0.5 * (2.0f64 / (dog_count + 1.0)).log10();
    let bird = 0.5 * (2.0f64 / (0.99 + 1.0)).log10();
    assert_eq!(instance.indices(), &[1, 2]);
    assert_that!(instance.value(1), near(dog, 1e-12));
    assert_that!(instance.value(2), near(bird, 1e-12));
    assert_eq!(instance.label(), Some(ClassLabel::Negative));
}

#[test]
fn test_malformed_record_leaves_state_untouched() {
    let mut vectorizer = lru_vectorizer(10, 0.01);
    let mut schema = FeatureSchema::new();
    let err = vectorizer
        .filter("there is no type field", &mut schema)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidData);
    assert_eq!(vectorizer.num_docs(), 0);
    assert_eq!(vectorizer.sketch().num_docs(), 0);
    assert!(vectorizer.sketch().is_empty());
    assert!(schema.is_empty());

    vectorizer.filter("fine now,H", &mut schema).unwrap();
    assert_eq!(schema.len(), 2);
}

#[test]
fn test_unknown_type_is_unlabeled() {
    let mut vectorizer = lru_vectorizer(10, 0.01);
    let mut schema = FeatureSchema::new();
    let instance = vectorizer.filter("no emoticon here,N", &mut schema).unwrap();
    assert_eq!(instance.label(), None);
    assert!(!instance.is_labeled());
    assert_eq!(instance.nnz(), 3);
}

#[test]
fn test_unlabeled_stream_selects_features() {
    let mut session = StreamSession::new(&SketchConfig::default()).unwrap();
    for _ in 0..50 {
        let instance = session.process("hello world,N").unwrap();
        assert_eq!(instance.label(), None);
        assert_eq!(instance.nnz(), 2);
    }
    assert_eq!(
        session.schema().iter().collect::<Vec<_>>(),
        vec!["hello", "world"]
    );
    assert!(session.vectorizer().sketch().count("hello") > 0.0);
}

#[test]
fn test_empty_document() {
    let mut vectorizer = lru_vectorizer(10, 0.01);
    let mut schema = FeatureSchema::new();
    vectorizer.filter("hello,H", &mut schema).unwrap();
    let instance = vectorizer.filter("  ' ,S", &mut schema).unwrap();
    assert_eq!(instance.nnz(), 0);
    assert_eq!(instance.num_features(), 1);
    assert_eq!(instance.label(), Some(ClassLabel::Negative));
    assert_eq!(vectorizer.num_docs(), 2);
    assert_eq!(vectorizer.sketch().num_docs(), 2);
}

#[test]
fn test_recycled_slot_renames_column() {
    let mut vectorizer = lru_vectorizer(1, 0.5);
    let mut schema = FeatureSchema::new();
    vectorizer.filter("a,H", &mut schema).unwrap();
    assert_eq!(schema.name(0), Some("a"));

    let instance = vectorizer.filter("b,H", &mut schema).unwrap();
    assert_eq!(schema.len(), 1);
    assert_eq!(schema.name(0), Some("b"));
    assert_eq!(instance.indices(), &[0]);
    assert_eq!(vectorizer.sketch().slot("a"), None);
}

#[test]
fn test_untracked_tokens_are_dropped() {
    let sketch = DiscriminativeSketch::new(LruDecaySketch::default(), SlotAllocator::new(2));
    let mut vectorizer = TfIdfVectorizer::new(sketch);
    let mut schema = FeatureSchema::new();
    let instance = vectorizer.filter("a b c,H", &mut schema).unwrap();
    assert_eq!(instance.nnz(), 2);
    assert_eq!(schema.len(), 2);
    assert_eq!(vectorizer.sketch().slot("c"), None);
    assert!(vectorizer.sketch().positive().contains("c"));
}

#[test]
fn test_neutral_tokens_leave_the_vector() {
    let config = SketchConfig {
        merge_threshold: 0.02,
        ..SketchConfig::default()
    };
    let mut vectorizer = TfIdfVectorizer::from_config(&config);
    let mut schema = FeatureSchema::new();
    vectorizer.filter("the cat,H", &mut schema).unwrap();
    let instance = vectorizer.filter("the dog,S", &mut schema).unwrap();

    // "the" was counted once for each class and is now on the stop list.
    assert_eq!(vectorizer.sketch().slot("the"), None);
    assert_eq!(instance.nnz(), 1);
    assert_eq!(schema.len(), 3);

    // Released slots queue behind the never-used ones.
    let instance = vectorizer.filter("bird,H", &mut schema).unwrap();
    assert_eq!(schema.name(2), Some("dog"));
    assert_eq!(instance.nnz(), 1);
    assert_eq!(vectorizer.sketch().slot("bird"), Some(3));
    assert_eq!(schema.len(), 4);
}

#[test]
fn test_record_api() {
    let mut vectorizer = lru_vectorizer(10, 0.01);
    let mut schema = FeatureSchema::new();
    let record = Record::new("Its Sunny", "H");
    let instance = vectorizer.filter_record(&record, &mut schema);
    assert_eq!(schema.iter().collect::<Vec<_>>(), vec!["its", "sunny"]);
    assert_eq!(instance.nnz(), 2);
    assert_that!(vectorizer.freq_word("sunny"), near(0.99, 1e-12));
    assert!(vectorizer.print_sketch().contains("sunny"));
}

#[test]
fn test_session() {
    let config = SketchConfig::builder().sketch(SketchKind::Lru).build();
    let mut session = StreamSession::new(&config).unwrap();
    session.process("good morning,H").unwrap();
    session.process("bad morning,S").unwrap();
    assert!(session.process("oops").is_err());
    assert_eq!(session.num_docs(), 2);
    assert_eq!(
        session.schema().iter().collect::<Vec<_>>(),
        vec!["good", "morning", "bad"]
    );
    assert!(session.vectorizer().sketch().count("morning") > 0.0);
}

#[test]
fn test_session_rejects_invalid_config() {
    let config = SketchConfig {
        lambda: 1.5,
        ..SketchConfig::default()
    };
    let err = StreamSession::new(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn test_shared_session_single_writer() {
    let session = Arc::new(Mutex::new(
        StreamSession::new(&SketchConfig::default()).unwrap(),
    ));
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for i in 0..25 {
                    let line = format!("worker{worker} message{i},H");
                    session.lock().unwrap().process(&line).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(session.lock().unwrap().num_docs(), 100);
}
