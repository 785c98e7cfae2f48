//! Integration tests for [`summarize_document`].
//!
//! These tests run the full pipeline against the mock model backend, so no
//! HTTP requests are made. The echoing mock wraps each chunk in `sum(...)`,
//! which makes fragment order and chunk boundaries visible in the output.

use std::sync::Mutex;

use papergist_core::model::{MockModel, MockResponse};
use papergist_core::pipeline::PipelineError;
use papergist_core::{Config, ModelError, ProgressEvent, SummaryMode, summarize_document};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

const PAPER: &str = "A Study of Things\n\
    \n\
    Abstract\n\
    Things are interesting. They deserve study.\n\
    \n\
    1 Introduction\n\
    Things have long been studied. Prior work exists.\n\
    \n\
    4 Conclusion\n\
    Things matter a great deal.\n\
    \n\
    References\n\
    [1] Someone. A thing paper.\n";

#[tokio::test]
async fn flat_mode_summarizes_in_chunk_order() {
    let backend = MockModel::echoing();
    let config = Config {
        // Fits two ~20-char sentences per chunk, not three.
        max_chunk_size: 45,
        ..Config::default()
    };

    let text = "First sentence here. Second sentence here. Third sentence here.";
    let out = summarize_document(text, &backend, &client(), &config, |_| {})
        .await
        .unwrap();

    // Two chunks of two-and-one sentences; fragments joined in order.
    assert_eq!(backend.call_count(), 2);
    assert_eq!(
        backend.inputs(),
        vec![
            "First sentence here. Second sentence here.".to_string(),
            "Third sentence here.".to_string(),
        ]
    );
    assert_eq!(
        out,
        "sum(First sentence here. Second sentence here.) sum(Third sentence here.)"
    );
}

#[tokio::test]
async fn flat_mode_cleans_before_chunking() {
    let backend = MockModel::echoing();
    let config = Config::default();

    let text = "Contact me at a@b.com (Smith, 2020) [1,2] for details.";
    summarize_document(text, &backend, &client(), &config, |_| {})
        .await
        .unwrap();

    assert_eq!(backend.inputs(), vec!["Contact me at for details.".to_string()]);
}

#[tokio::test]
async fn sectioned_mode_labels_each_section() {
    let backend = MockModel::echoing();
    let config = Config {
        mode: SummaryMode::Sectioned,
        ..Config::default()
    };

    let out = summarize_document(PAPER, &backend, &client(), &config, |_| {})
        .await
        .unwrap();

    assert!(out.contains("Abstract: sum("), "missing abstract label: {out}");
    assert!(out.contains("Introduction: sum("));
    assert!(out.contains("Conclusion: sum("));
    // Section order is fixed: abstract before introduction before conclusion.
    let a = out.find("Abstract:").unwrap();
    let i = out.find("Introduction:").unwrap();
    let c = out.find("Conclusion:").unwrap();
    assert!(a < i && i < c, "sections out of order: {out}");
    // No methods/results headings in the fixture, so no such labels.
    assert!(!out.contains("Methods:"));
    assert!(!out.contains("Results:"));
}

#[tokio::test]
async fn sectioned_mode_falls_back_to_flat_without_headings() {
    let backend = MockModel::echoing();
    let config = Config {
        mode: SummaryMode::Sectioned,
        ..Config::default()
    };

    let text = "Just an unstructured note. Nothing resembling a heading.";
    let out = summarize_document(text, &backend, &client(), &config, |_| {})
        .await
        .unwrap();

    assert_eq!(backend.call_count(), 1);
    assert!(out.starts_with("sum("), "expected flat fallback output: {out}");
    assert!(!out.contains("Abstract:"));
}

#[tokio::test]
async fn model_failure_is_fatal_with_no_partial_result() {
    let backend = MockModel::with_sequence(vec![
        MockResponse::Summary("fine".to_string()),
        MockResponse::Error {
            status: 503,
            message: "overloaded".to_string(),
        },
    ]);
    let config = Config {
        max_chunk_size: 30,
        ..Config::default()
    };

    let text = "First sentence here. Second sentence here. Third sentence here.";
    let err = summarize_document(text, &backend, &client(), &config, |_| {})
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Model(ModelError::Api { status: 503, .. })
    ));
    // The failing second chunk stopped the run; the third was never sent.
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn empty_document_is_rejected() {
    let backend = MockModel::echoing();
    let config = Config::default();

    let err = summarize_document("  \n\n ", &backend, &client(), &config, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoText));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn cleanup_only_noise_is_rejected() {
    let backend = MockModel::echoing();
    let config = Config::default();

    // Nothing but removable noise: cleaned text is empty.
    let err = summarize_document("a@b.com [1,2]", &backend, &client(), &config, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoText));
}

#[tokio::test]
async fn invalid_config_fails_before_any_model_call() {
    let backend = MockModel::echoing();
    let config = Config {
        max_chunk_size: 0,
        ..Config::default()
    };

    let err = summarize_document("Some text.", &backend, &client(), &config, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn progress_events_cover_every_chunk() {
    let backend = MockModel::echoing();
    let config = Config {
        max_chunk_size: 45,
        ..Config::default()
    };
    let events: Mutex<Vec<ProgressEvent>> = Mutex::new(Vec::new());

    let text = "First sentence here. Second sentence here. Third sentence here.";
    summarize_document(text, &backend, &client(), &config, |e| {
        events.lock().unwrap().push(e);
    })
    .await
    .unwrap();

    let events = events.into_inner().unwrap();
    let starts = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ChunkStart { .. }))
        .count();
    let dones = events
        .iter()
        .filter(|e| matches!(e, ProgressEvent::ChunkDone { .. }))
        .count();
    assert_eq!(starts, 2);
    assert_eq!(dones, 2);
}

#[tokio::test]
async fn post_processing_applies_to_the_assembled_summary() {
    let backend = MockModel::new(MockResponse::Summary(
        "1. We present results here today.".to_string(),
    ));
    let config = Config::default();

    let out = summarize_document("A single sentence.", &backend, &client(), &config, |_| {})
        .await
        .unwrap();
    assert_eq!(out, "\u{2022} present results here today.");
}
