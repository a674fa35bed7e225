use anyhow::Result;
use serde_json::json;
use span_similarity::config::Settings;
use span_similarity::scorers::{
    build_model, ExternalScorer, ModelKind, ScorerCommand, StgnnModel,
};
use span_similarity::{InferenceEngine, SimilarityModel, SimilarityRequest, Span};
use std::io::Write;
use std::time::Duration;

const STUB: &str = env!("CARGO_BIN_EXE_stgnn-infer");

fn stub_command() -> ScorerCommand {
    ScorerCommand {
        command: STUB.to_string(),
        args: Vec::new(),
        timeout_seconds: Some(30),
    }
}

/// The binary speaks the same protocol it can delegate to.
#[tokio::test]
async fn test_external_scorer_round_trips_through_stub() -> Result<()> {
    let scorer = ExternalScorer::new(STUB, Vec::new()).with_timeout(Some(Duration::from_secs(30)));
    let request = SimilarityRequest::new(
        Span::from_json(r#"{"id": 1}"#)?,
        Span::from_json(r#"{"id": 2}"#)?,
    );

    let similarity = scorer.infer(&request).await?;
    assert!((similarity - 0.42).abs() < 1e-12);
    Ok(())
}

#[tokio::test]
async fn test_stgnn_model_prefers_inference_process() -> Result<()> {
    let identical = Span::from_value(&json!({"results": {"final_rmsd_angstrom": 0.5}}))?;

    let heuristic = StgnnModel::heuristic();
    assert!((heuristic.compute_similarity(&identical, &identical).await? - 1.0).abs() < 1e-12);

    let delegated = StgnnModel::with_inference(stub_command().into_scorer());
    assert!((delegated.compute_similarity(&identical, &identical).await? - 0.42).abs() < 1e-12);
    Ok(())
}

#[tokio::test]
async fn test_engine_with_external_model_writes_response() -> Result<()> {
    let model = build_model(ModelKind::External, Some(stub_command()))?;
    let engine = InferenceEngine::new(model);

    let mut output = Vec::new();
    let response = engine
        .run(&br#"{"span_a": {"id": 1}}"#[..], &mut output)
        .await?;

    assert_eq!(response.similarity, 0.42);
    assert_eq!(output, br#"{"similarity": 0.42}"#);
    Ok(())
}

#[tokio::test]
async fn test_composite_from_config_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(
        file,
        "[model]\nkind = \"composite\"\n\n[external]\ncommand = \"{}\"\ntimeout_seconds = 30\n",
        STUB.replace('\\', "/")
    )?;

    let config = span_similarity::TomlConfig::from_file(file.path())?;
    let settings = Settings::merge(&config, Default::default(), None);
    assert_eq!(settings.model, ModelKind::Composite);

    let model = settings.build_model()?;
    let payload = Span::from_value(&json!({
        "analysis": {
            "graphlet_histogram": [1, 1],
            "mapper": {"nodes": [3, 3]}
        }
    }))?;
    let score = model.compute_similarity(&payload, &payload).await?;

    // graphlet 1.0, mapper 1.0, stgnn delegated to the stub 0.42
    assert!((score - (2.42 / 3.0)).abs() < 1e-9);
    Ok(())
}
