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

use driftsketch::config::SketchConfig;
use driftsketch::config::SketchKind;
use driftsketch::error::ErrorKind;
use driftsketch::sketch::ClassLabel;
use driftsketch::sketch::Sketch;

#[test]
fn test_defaults() {
    let config = SketchConfig::default();
    assert_eq!(config.capacity, 1000);
    assert_eq!(config.epsilon, 0.01);
    assert_eq!(config.delta, 0.01);
    assert_eq!(config.lambda, 0.01);
    assert_eq!(config.sketch, SketchKind::Discriminative);
    assert_eq!(config.num_slots, 1000);
    assert_eq!(config.merge_threshold, 0.01);
    assert_eq!(config.split_threshold, 0.1);
    assert!(config.validate().is_ok());
    assert_eq!(SketchConfig::builder().build(), config);
}

#[test]
fn test_parse_options() {
    let config = SketchConfig::parse_options("capacity=50, lambda=0.001 sketch=LruSketch").unwrap();
    assert_eq!(config.capacity, 50);
    assert_eq!(config.lambda, 0.001);
    assert_eq!(config.sketch, SketchKind::Lru);
    assert_eq!(config.num_slots, 1000);

    let config = SketchConfig::parse_options("k=10 e=0.05 d=0.2 l=0.3 s=discriminative").unwrap();
    assert_eq!(config.capacity, 10);
    assert_eq!(config.epsilon, 0.05);
    assert_eq!(config.delta, 0.2);
    assert_eq!(config.lambda, 0.3);
    assert_eq!(config.sketch, SketchKind::Discriminative);

    let config = SketchConfig::parse_options("slots=20,merge=0.02,split=0.5").unwrap();
    assert_eq!(config.num_slots, 20);
    assert_eq!(config.merge_threshold, 0.02);
    assert_eq!(config.split_threshold, 0.5);

    assert_eq!(SketchConfig::parse_options("").unwrap(), SketchConfig::default());
}

#[test]
fn test_parse_options_errors() {
    let err = SketchConfig::parse_options("width=3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = SketchConfig::parse_options("capacity=many").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(err.context(), &[("value", "many".to_string())]);

    let err = SketchConfig::parse_options("capacity").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    let err = SketchConfig::parse_options("sketch=bloom").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    // parsed but out of range
    let err = SketchConfig::parse_options("lambda=1").unwrap_err();
    assert!(err.message().contains("lambda"));
    let err = SketchConfig::parse_options("capacity=0").unwrap_err();
    assert!(err.message().contains("capacity"));
}

#[test]
fn test_validate() {
    let bad = [
        SketchConfig {
            capacity: 0,
            ..SketchConfig::default()
        },
        SketchConfig {
            lambda: 0.0,
            ..SketchConfig::default()
        },
        SketchConfig {
            epsilon: -0.1,
            ..SketchConfig::default()
        },
        SketchConfig {
            merge_threshold: f64::NAN,
            ..SketchConfig::default()
        },
        SketchConfig {
            split_threshold: -1.0,
            ..SketchConfig::default()
        },
    ];
    for config in bad {
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "{config:?}");
    }
}

#[test]
fn test_serde() {
    let config = SketchConfig::builder()
        .capacity(64)
        .lambda(0.05)
        .sketch(SketchKind::Lru)
        .build();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""sketch":"lru""#));
    let decoded: SketchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);

    let partial: SketchConfig =
        serde_json::from_str(r#"{"capacity": 5, "sketch": "discriminative"}"#).unwrap();
    assert_eq!(partial.capacity, 5);
    assert_eq!(partial.lambda, 0.01);
    assert_eq!(partial.num_slots, 1000);
}

#[test]
fn test_build_sketch() {
    let mut lru = SketchConfig::builder()
        .capacity(1)
        .sketch(SketchKind::Lru)
        .build()
        .build_sketch();
    assert_eq!(lru.add_token("a", 1, None), Some(0));
    assert_eq!(lru.add_token("b", 1, None), Some(0));
    assert_eq!(lru.slot("a"), None);

    let mut discriminative = SketchConfig::builder().num_slots(1).build().build_sketch();
    assert_eq!(discriminative.add_token("a", 1, None), Some(0));
    assert_eq!(
        discriminative.add_token("a", 1, Some(ClassLabel::Positive)),
        Some(0)
    );
    assert_eq!(
        discriminative.add_token("b", 1, Some(ClassLabel::Negative)),
        None
    );
}

#[test]
#[should_panic(expected = "capacity must be at least 1")]
fn test_builder_rejects_zero_capacity() {
    SketchConfig::builder().capacity(0);
}

#[test]
#[should_panic(expected = "lambda must be in (0.0, 1.0)")]
fn test_builder_rejects_lambda() {
    SketchConfig::builder().lambda(1.0);
}

#[test]
#[should_panic(expected = "merge_threshold must be a non-negative number")]
fn test_builder_rejects_nan_merge_threshold() {
    SketchConfig::builder().merge_threshold(f64::NAN);
}

#[test]
#[should_panic(expected = "split_threshold must be a non-negative number")]
fn test_builder_rejects_negative_split_threshold() {
    SketchConfig::builder().split_threshold(-0.5);
}

#[test]
fn test_builder_accepts_threshold_bounds() {
    let config = SketchConfig::builder()
        .num_slots(0)
        .merge_threshold(0.0)
        .split_threshold(0.0)
        .build();
    assert!(config.validate().is_ok());
}
