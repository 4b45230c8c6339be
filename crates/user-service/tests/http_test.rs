use clap::Parser;
use reqwest::StatusCode;
use serde_json::{json, Value};
use record_framework::mock::MockRepository;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use user_service::config::ServiceConfig;
use user_service::http::UserRepo;
use user_service::lifecycle::UserService;
use user_service::model::User;

/// A real server on an ephemeral port, stopped through a oneshot instead of a signal.
struct TestServer {
    base: String,
    client: reqwest::Client,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with(user_service::users::new()).await
    }

    async fn start_with(repo: UserRepo) -> Self {
        let config = ServiceConfig::try_parse_from([
            "user-service",
            "--host",
            "127.0.0.1",
            "--port",
            "0",
            "--shutdown-timeout-secs",
            "1",
        ])
        .expect("valid test config");
        let service = UserService::bind_with(&config, repo)
            .await
            .expect("Failed to bind");
        let addr = service.local_addr().unwrap();

        let (stop, stopped) = oneshot::channel::<()>();
        let handle = tokio::spawn(service.serve_until(async move {
            let _ = stopped.await;
        }));

        Self {
            base: format!("http://{}", addr),
            client: reqwest::Client::new(),
            stop,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn create(&self, body: Value) -> reqwest::Response {
        self.client
            .post(self.url("/users"))
            .json(&body)
            .send()
            .await
            .expect("Failed to send request")
    }

    async fn shutdown(self) {
        let _ = self.stop.send(());
        self.handle
            .await
            .expect("server task panicked")
            .expect("server failed");
    }
}

fn user(name: &str) -> Value {
    json!({
        "username": name,
        "email": format!("{}@x.com", name),
        "phone": "1",
    })
}

#[tokio::test]
async fn test_create_returns_201_with_location() {
    let server = TestServer::start().await;

    let resp = server.create(user("alice")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers()["location"].to_str().unwrap().to_string();
    assert_eq!(location, "/users/1");

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "alice");

    let fetched: Value = server
        .client
        .get(server.url(&location))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, body);

    server.shutdown().await;
}

/// Create a -> 1, Create b -> 2, Delete 1, Create c -> 3.
#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let server = TestServer::start().await;

    let a: Value = server.create(user("a")).await.json().await.unwrap();
    let b: Value = server.create(user("b")).await.json().await.unwrap();
    assert_eq!((a["id"].as_u64(), b["id"].as_u64()), (Some(1), Some(2)));

    let resp = server
        .client
        .delete(server.url("/users/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.bytes().await.unwrap().is_empty());

    let c: Value = server.create(user("c")).await.json().await.unwrap();
    assert_eq!(c["id"], 3);

    let listed: Vec<Value> = server
        .client
        .get(server.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let mut ids: Vec<u64> = listed.iter().filter_map(|u| u["id"].as_u64()).collect();
    ids.sort();
    assert_eq!(ids, vec![2, 3]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_delete_then_get_and_delete_again_are_404() {
    let server = TestServer::start().await;
    server.create(user("a")).await;

    let first = server.client.delete(server.url("/users/1")).send().await.unwrap();
    assert_eq!(first.status(), StatusCode::NO_CONTENT);

    let get = server.client.get(server.url("/users/1")).send().await.unwrap();
    assert_eq!(get.status(), StatusCode::NOT_FOUND);
    let body: Value = get.json().await.unwrap();
    assert_eq!(body["message"], "user not found");

    let second = server.client.delete(server.url("/users/1")).send().await.unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test]
async fn test_put_replaces_and_forces_path_id() {
    let server = TestServer::start().await;
    server.create(user("a")).await;

    let resp = server
        .client
        .put(server.url("/users/1"))
        .json(&json!({"id": 40, "username": "z", "email": "z@x.com", "phone": "9"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"id": 1, "username": "z", "email": "z@x.com", "phone": "9"}));

    let missing = server
        .client
        .put(server.url("/users/40"))
        .json(&user("y"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test]
async fn test_patch_changes_only_allowed_fields() {
    let server = TestServer::start().await;
    server.create(user("a")).await;

    let resp = server
        .client
        .patch(server.url("/users/1"))
        .json(&json!({"email": "new@x.com", "id": 5, "phone": 12, "username": "", "admin": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"id": 1, "username": "a", "email": "new@x.com", "phone": "1"}));

    let missing = server
        .client
        .patch(server.url("/users/2"))
        .json(&json!({"email": "x@x.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    server.shutdown().await;
}

#[tokio::test]
async fn test_missing_required_field_is_400() {
    let server = TestServer::start().await;

    let resp = server
        .create(json!({"username": "a", "email": "a@x.com"}))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "username, email and phone are required");

    let resp = server.create(json!({"username": "", "email": "a@x.com", "phone": "1"})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.create(user("a")).await;
    let resp = server
        .client
        .put(server.url("/users/1"))
        .json(&json!({"username": "b"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The rejected requests left no trace.
    let listed: Vec<Value> = server
        .client
        .get(server.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, vec![json!({"id": 1, "username": "a", "email": "a@x.com", "phone": "1"})]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .post(server.url("/users"))
        .header("content-type", "application/json")
        .body("{\"username\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "invalid JSON");

    let resp = server
        .client
        .post(server.url("/users"))
        .body("username=a")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_numeric_id_is_400_on_every_route() {
    let server = TestServer::start().await;
    let url = server.url("/users/abc");

    let requests = vec![
        server.client.get(&url),
        server.client.put(&url).json(&user("a")),
        server.client.patch(&url).json(&json!({"email": "x@x.com"})),
        server.client.delete(&url),
    ];
    for request in requests {
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "invalid id");
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_healthz() {
    let server = TestServer::start().await;

    let resp = server.client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    server.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_get_distinct_ids() {
    let server = TestServer::start().await;

    let mut handles = vec![];
    for i in 0..50 {
        let client = server.client.clone();
        let url = server.url("/users");
        handles.push(tokio::spawn(async move {
            let resp = client.post(url).json(&user(&format!("u{}", i))).send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: Value = resp.json().await.unwrap();
            body["id"].as_u64().unwrap()
        }));
    }

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()), "duplicate id");
    }
    assert_eq!(ids.len(), 50);
    assert_eq!(ids.iter().max(), Some(&50));

    server.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_accepting_connections() {
    let server = TestServer::start().await;
    let url = server.url("/healthz");
    let client = server.client.clone();

    server.shutdown().await;

    assert!(client.get(url).send().await.is_err());
}

#[tokio::test]
async fn test_patch_with_array_body_is_400() {
    let server = TestServer::start().await;
    server.create(user("a")).await;

    let resp = server
        .client
        .patch(server.url("/users/1"))
        .json(&json!(["evil", "evil@x.com", "666"]))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "invalid JSON");

    let resp = server.create(json!(["0", "b", "b@x.com", "2"])).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let fetched: Value = server
        .client
        .get(server.url("/users/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, json!({"id": 1, "username": "a", "email": "a@x.com", "phone": "1"}));

    server.shutdown().await;
}

#[tokio::test]
async fn test_body_id_of_any_type_is_ignored() {
    let server = TestServer::start().await;

    let resp = server
        .create(json!({"id": null, "username": "a", "email": "a@x.com", "phone": "1"}))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = server
        .client
        .put(server.url("/users/1"))
        .json(&json!({"id": -3, "username": "b", "email": "b@x.com", "phone": "2"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["username"], "b");

    server.shutdown().await;
}

#[tokio::test]
async fn test_negative_id_is_404_on_every_route() {
    let server = TestServer::start().await;
    let url = server.url("/users/-1");

    let requests = vec![
        server.client.get(&url),
        server.client.put(&url).json(&user("a")),
        server.client.patch(&url).json(&json!({"email": "x@x.com"})),
        server.client.delete(&url),
    ];
    for request in requests {
        let resp = request.send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["message"], "user not found");
    }

    let resp = server
        .client
        .get(server.url("/users/99999999999999999999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    server.shutdown().await;
}

#[tokio::test]
async fn test_cors_headers_are_sent() {
    let server = TestServer::start().await;

    let resp = server
        .client
        .get(server.url("/users"))
        .header("origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["access-control-allow-origin"], "*");

    let preflight = server
        .client
        .request(reqwest::Method::OPTIONS, server.url("/users/1"))
        .header("origin", "http://example.com")
        .header("access-control-request-method", "DELETE")
        .send()
        .await
        .unwrap();
    assert!(preflight.status().is_success());
    assert_eq!(preflight.headers()["access-control-allow-origin"], "*");

    server.shutdown().await;
}

#[tokio::test]
async fn test_panicking_handler_is_500_and_server_survives() {
    // The mock has no expectations queued, so the first repository call panics.
    let mock = Arc::new(MockRepository::<User>::new());
    let repo: UserRepo = mock.clone();
    let server = TestServer::start_with(repo).await;

    let resp = server.client.get(server.url("/users")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "internal server error");

    let resp = server.client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Shutdown reads the store once to log its size.
    mock.expect_list().return_ok(vec![]);
    server.shutdown().await;
    mock.verify();
}
