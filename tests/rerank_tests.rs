mod common;

use common::harness::{TestServerConfig, spawn_test_server};
use common::http_client::{TestClient, TestClientError};
use rerank::constants::DEFAULT_INSTRUCTION;
use rerank::engine::MockGenerator;
use rerank::scoring::RelevanceScorer;

fn vacancy_request() -> serde_json::Value {
    serde_json::json!({
        "vacancy_title": "Senior Backend Engineer",
        "job_description": "5 years Python, distributed systems"
    })
}

#[tokio::test]
async fn test_rerank_end_to_end() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let response = client.rerank(&vacancy_request()).await.unwrap();

    let expected = (-0.1f64).exp() / ((-0.1f64).exp() + (-3.0f64).exp());
    assert!((response.probability - expected).abs() < 1e-6);
    assert!((response.score - expected.ln()).abs() < 1e-6);
    assert!(response.score < 0.0);
}

#[tokio::test]
async fn test_rerank_renders_default_instruction() {
    let config = TestServerConfig::default();
    let generator = config.generator.clone().unwrap();
    let server = spawn_test_server(config).await.unwrap();
    let client = TestClient::new(server.url());

    client.rerank(&vacancy_request()).await.unwrap();

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(&format!("<Instruct>: {DEFAULT_INSTRUCTION}")));
    assert!(prompts[0].contains("<Query>: Senior Backend Engineer"));
    assert!(prompts[0].contains("<Document>: 5 years Python, distributed systems"));
}

#[tokio::test]
async fn test_rerank_prefers_relevant_answer() {
    let relevant = spawn_test_server(TestServerConfig::with_generator(MockGenerator::yes_no(
        -0.05, -4.0,
    )))
    .await
    .unwrap();
    let irrelevant = spawn_test_server(TestServerConfig::with_generator(MockGenerator::yes_no(
        -4.0, -0.05,
    )))
    .await
    .unwrap();

    let high = TestClient::new(relevant.url())
        .rerank(&vacancy_request())
        .await
        .unwrap();
    let low = TestClient::new(irrelevant.url())
        .rerank(&vacancy_request())
        .await
        .unwrap();

    assert!(high.probability > 0.9);
    assert!(low.probability < 0.1);
    assert!(high.score > low.score);
}

#[tokio::test]
async fn test_rerank_before_model_loaded() {
    let server = spawn_test_server(TestServerConfig::without_model())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    match client.rerank(&vacancy_request()).await {
        Err(TestClientError::Status(500, detail)) => assert_eq!(detail, "Model not initialized"),
        other => panic!("expected 500, got {other:?}"),
    }
}

#[tokio::test]
async fn test_health_transitions_after_install() {
    let server = spawn_test_server(TestServerConfig::without_model())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.model_loaded);

    let scorer = RelevanceScorer::new(std::sync::Arc::new(MockGenerator::yes_no(-0.1, -3.0)))
        .unwrap();
    server.state.install(scorer).unwrap();

    let health = client.health().await.unwrap();
    assert!(health.model_loaded);

    let response = client.rerank(&vacancy_request()).await.unwrap();
    assert!(response.probability > 0.9);
}

#[tokio::test]
async fn test_engine_failure_surfaces_as_500() {
    let server = spawn_test_server(TestServerConfig::with_generator(MockGenerator::failing(
        "tensor shape mismatch",
    )))
    .await
    .unwrap();
    let client = TestClient::new(server.url());

    match client.rerank(&vacancy_request()).await {
        Err(TestClientError::Status(500, detail)) => {
            assert!(detail.starts_with("Error processing request: "));
            assert!(detail.contains("tensor shape mismatch"));
        }
        other => panic!("expected 500, got {other:?}"),
    }
}

#[tokio::test]
async fn test_root_metadata() {
    let server = spawn_test_server(TestServerConfig::default())
        .await
        .unwrap();
    let client = TestClient::new(server.url());

    let root = client.root().await.unwrap();
    assert_eq!(root.message, "Qwen3 Reranker API");
    assert_eq!(root.version, "1.0.0");
}

#[tokio::test]
async fn test_concurrent_requests_are_all_scored() {
    let config = TestServerConfig::default();
    let generator = config.generator.clone().unwrap();
    let server = spawn_test_server(config).await.unwrap();
    let url = server.url();

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let client = TestClient::new(url.clone());
            tokio::spawn(async move {
                let body = serde_json::json!({
                    "vacancy_title": format!("Engineer {i}"),
                    "job_description": "Rust"
                });
                client.rerank(&body).await
            })
        })
        .collect();

    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert!((0.0..=1.0).contains(&response.probability));
    }

    assert_eq!(generator.prompts().len(), 8);
}
