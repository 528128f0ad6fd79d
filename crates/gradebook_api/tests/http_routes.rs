use gradebook_api::{router, AppState};
use gradebook_core::SeedData;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::oneshot;

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn spawn(seed: SeedData) -> Self {
        let app = router(AppState::with_seed(seed));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });
        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            _shutdown: shutdown_tx,
        }
    }

    async fn seeded() -> Self {
        Self::spawn(SeedData::bootstrap()).await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("request");
        split(response).await
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(&body)
            .send()
            .await
            .expect("request");
        split(response).await
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .client
            .delete(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("request");
        split(response).await
    }
}

async fn split(response: reqwest::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = response.json::<Value>().await.expect("json body");
    (status, body)
}

#[tokio::test]
async fn health_reports_ok() {
    let server = TestServer::seeded().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn seeded_students_and_tests_are_listed_in_order() {
    let server = TestServer::seeded().await;

    let (status, body) = server.get("/students/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"id": 1, "name": "John Doe", "email": "john@example.com", "tests_taken": []},
            {"id": 2, "name": "Joe", "email": "joe@example.com", "tests_taken": []}
        ])
    );

    let (status, body) = server.get("/tests/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 2, "name": "Math Quiz", "max_score": 100}));
}

#[tokio::test]
async fn create_student_then_get_and_reject_duplicate() {
    let server = TestServer::seeded().await;
    let student = json!({"id": 3, "name": "Ada", "email": "ada@example.com"});

    let (status, body) = server.post("/students/", student.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student created successfully"}));

    let (status, body) = server.get("/students/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["tests_taken"], json!([]));

    let (status, body) = server.post("/students/", student).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Student already exists"}));
}

#[tokio::test]
async fn invalid_student_name_is_unprocessable() {
    let server = TestServer::seeded().await;
    let (status, body) = server
        .post("/students/", json!({"id": 9, "name": "A", "email": "a@example.com"}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"]
        .as_str()
        .unwrap_or("")
        .contains("student name must be between 2 and 50 characters"));

    let (status, _) = server.get("/students/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let server = TestServer::seeded().await;

    let (status, body) = server.get("/students/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Student does not exist"}));

    let (status, body) = server.get("/tests/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Test does not exist"}));
}

#[tokio::test]
async fn empty_store_listings_are_not_found() {
    let server = TestServer::spawn(SeedData::default()).await;

    let (status, _) = server.get("/students/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = server.get("/tests/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = server
        .post("/tests/", json!({"id": 1, "name": "Physics", "max_score": 20}))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = server.get("/tests/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn results_by_test_and_aggregates() {
    let server = TestServer::seeded().await;

    let (status, body) = server.get("/results/test/2/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"student_id": 1, "test_id": 2, "score": 95},
            {"student_id": 2, "test_id": 2, "score": 90}
        ])
    );

    let (status, body) = server.get("/results/test/2/average").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Average score": 92.5}));

    let (status, body) = server.get("/results/test/1/highest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Highest score": 90}));

    let (status, body) = server.get("/results/test/3/average").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Test with ID 3 not found"}));
}

#[tokio::test]
async fn create_result_rejects_duplicate_pair() {
    let server = TestServer::seeded().await;

    let (status, body) = server
        .post("/results/", json!({"student_id": 2, "test_id": 1, "score": 70}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Result created successfully"}));

    let (status, body) = server
        .post("/results/", json!({"student_id": 2, "test_id": 1, "score": 75}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "Result already exists"}));

    let (_, body) = server.get("/results/students/2/").await;
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn legacy_get_delete_cascades_results() {
    let server = TestServer::seeded().await;

    let (status, body) = server.get("/students/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Student deleted successfully"}));

    let (status, body) = server.get("/results/students/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Student with ID 1 not found"}));

    let (status, body) = server.get("/results/test/2/highest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"Highest score": 90}));

    let (status, _) = server.get("/students/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_method_removes_student() {
    let server = TestServer::seeded().await;

    let (status, _) = server.delete("/students/2").await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = server.get("/students/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn malformed_json_is_rejected_with_detail() {
    let server = TestServer::seeded().await;
    let (status, body) = server
        .post("/results/", json!({"student_id": "one", "test_id": 1, "score": 10}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn json_syntax_error_is_unprocessable() {
    let server = TestServer::seeded().await;
    let response = server
        .client
        .post(format!("{}/tests/", server.base_url))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"id\": 5, \"name\": ")
        .send()
        .await
        .expect("request");
    let (status, body) = split(response).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn missing_content_type_keeps_axum_status() {
    let server = TestServer::seeded().await;
    let response = server
        .client
        .post(format!("{}/tests/", server.base_url))
        .body(r#"{"id": 5, "name": "Chemistry", "max_score": 10}"#)
        .send()
        .await
        .expect("request");
    let (status, body) = split(response).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn non_integer_path_id_is_unprocessable() {
    let server = TestServer::seeded().await;

    for path in ["/students/abc", "/tests/1.5", "/results/test/x/average"] {
        let (status, body) = server.get(path).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "path {path}");
        assert!(body["detail"].is_string(), "path {path}");
    }
}
