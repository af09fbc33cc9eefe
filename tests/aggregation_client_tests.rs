use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use tadow_assistant::services::aggregation_client::{
    AggregationClient, DealSubmission, ScoreRequest,
};

async fn spawn_backend(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn submission() -> DealSubmission {
    DealSubmission {
        title: "Sony WH-1000XM5".to_string(),
        url: "https://example.com/deal".to_string(),
        current_price: 279.0,
        original_price: Some(399.0),
        category: "Audio".to_string(),
        description: None,
    }
}

#[tokio::test]
async fn test_score_round_trip() {
    let app = Router::new().route(
        "/api/aggregation/score",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["currentPrice"], 279.0);
            assert_eq!(body["category"], "Audio");
            assert!(body.get("originalPrice").is_none());
            Json(json!({ "score": 87.5 }))
        }),
    );
    let client = AggregationClient::new(spawn_backend(app).await);

    let score = client
        .score(&ScoreRequest {
            title: "Sony WH-1000XM5".to_string(),
            current_price: 279.0,
            original_price: None,
            category: "Audio".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(score.score, 87.5);
}

#[tokio::test]
async fn test_submit_success() {
    let app = Router::new().route(
        "/api/aggregation/submit",
        post(|| async {
            Json(json!({
                "success": true,
                "submissionId": "sub-1",
                "message": "Thanks!",
                "previewScore": 72.0
            }))
        }),
    );
    let client = AggregationClient::new(format!("{}/", spawn_backend(app).await));

    let resp = client.submit(&submission()).await.unwrap();
    assert!(resp.success);
    assert_eq!(resp.submission_id.as_deref(), Some("sub-1"));
    assert_eq!(resp.issues, None);
}

#[tokio::test]
async fn test_submit_failure_is_reported_not_raised() {
    let app = Router::new().route(
        "/api/aggregation/submit",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let client = AggregationClient::new(spawn_backend(app).await);

    assert!(client.submit(&submission()).await.is_err());

    let resp = client.submit_or_report(&submission()).await;
    assert!(!resp.success);
    assert_eq!(resp.issues.map(|i| i.len()), Some(1));
}
