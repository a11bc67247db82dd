use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        export::download_export,
        health::livez,
        translations::{
            assign_tags, create_translation, delete_translation, get_translation,
            list_translations, search_translations, translations_by_tag, update_translation,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    // Literal segments are matched before `{id}`.
    let api_routes = Router::new()
        .route(
            "/translations",
            get(list_translations).post(create_translation),
        )
        .route("/translations/search", get(search_translations))
        .route("/translations/export", get(download_export))
        .route("/translations/tags/{tag_name}", get(translations_by_tag))
        .route(
            "/translations/{id}",
            get(get_translation)
                .put(update_translation)
                .delete(delete_translation),
        )
        .route("/translations/{id}/assign-tags", post(assign_tags))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use super::*;
    use crate::config::Config;
    use crate::storage::SqliteStore;
    use axum::{body::Body, http::Request, response::Response};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    struct TestApp {
        app: Router,
        export_dir: PathBuf,
    }

    impl Drop for TestApp {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.export_dir);
        }
    }

    async fn test_app() -> TestApp {
        let export_dir =
            std::env::temp_dir().join(format!("glossa-app-{}", uuid::Uuid::new_v4().simple()));
        let config = Config {
            cache_ttl_seconds: 60,
            cache_max_entries: 100,
            sqlite_path: ":memory:".to_string(),
            export_dir: export_dir.clone(),
            export_queue_capacity: 1,
        };
        let store = Arc::new(SqliteStore::new_in_memory().await.unwrap());
        TestApp {
            app: create_app(AppState::with_store(store, &config)),
            export_dir,
        }
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn create(app: &Router, key: &str, tags: &[&str]) -> serde_json::Value {
        let response = send(
            app,
            with_json(
                "POST",
                "/api/translations",
                serde_json::json!({"locale": "eng", "key": key, "content": "Hi", "tags": tags}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["data"].clone()
    }

    #[tokio::test]
    async fn test_livez() {
        let t = test_app().await;
        let response = send(&t.app, get("/livez")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_and_get_translation() {
        let t = test_app().await;

        let created = create(&t.app, "greeting", &["web", "mobile"]).await;
        assert_eq!(created["key"], "greeting");
        assert_eq!(created["locale"], "eng");
        assert_eq!(created["tags"][0]["name"], "web");
        assert_eq!(created["tags"][1]["name"], "mobile");
        assert!(created.get("created_at").is_none());

        let id = created["id"].as_i64().unwrap();
        let response = send(&t.app, get(&format!("/api/translations/{id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Translation retrieved successfully");
        assert_eq!(body["data"], created);
    }

    #[tokio::test]
    async fn test_create_validation_error() {
        let t = test_app().await;

        let response = send(
            &t.app,
            with_json(
                "POST",
                "/api/translations",
                serde_json::json!({"locale": "eng", "key": "", "content": "Hi"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Key cannot be empty");
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let t = test_app().await;

        let response = send(
            &t.app,
            Request::builder()
                .method("POST")
                .uri("/api/translations")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_get_nonexistent_translation() {
        let t = test_app().await;

        let response = send(&t.app, get("/api/translations/999")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["success"], false);
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let t = test_app().await;
        let response = send(&t.app, get("/api/translations/abc")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_translations_paginated() {
        let t = test_app().await;
        for i in 0..3 {
            create(&t.app, &format!("key{i}"), &[]).await;
        }

        let response = send(&t.app, get("/api/translations?page=2&per_page=2")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"]["current_page"], 2);
        assert_eq!(body["data"]["per_page"], 2);
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["last_page"], 2);
        assert_eq!(body["data"]["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_bad_query_is_bad_request() {
        let t = test_app().await;
        let response = send(&t.app, get("/api/translations?page=first")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_translation() {
        let t = test_app().await;
        let created = create(&t.app, "greeting", &["web"]).await;
        let id = created["id"].as_i64().unwrap();

        let response = send(
            &t.app,
            with_json(
                "PUT",
                &format!("/api/translations/{id}"),
                serde_json::json!({"content": "Hello there", "tags": ["desktop"]}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["data"]["content"], "Hello there");
        assert_eq!(body["data"]["tags"][0]["name"], "desktop");
        assert_eq!(body["data"]["tags"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_translation() {
        let t = test_app().await;

        let response = send(
            &t.app,
            with_json(
                "PUT",
                "/api/translations/404",
                serde_json::json!({"content": "x"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_translation() {
        let t = test_app().await;
        let created = create(&t.app, "greeting", &[]).await;
        let id = created["id"].as_i64().unwrap();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/translations/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = send(&t.app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"success": true, "message": "Translation deleted successfully"})
        );

        let response = send(&t.app, get(&format!("/api/translations/{id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search() {
        let t = test_app().await;
        create(&t.app, "welcome_message", &[]).await;
        create(&t.app, "farewell", &[]).await;

        let response = send(&t.app, get("/api/translations/search?query=welcome")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let results = body["data"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["key"], "welcome_message");
    }

    #[tokio::test]
    async fn test_search_without_query_is_bad_request() {
        let t = test_app().await;

        for uri in ["/api/translations/search", "/api/translations/search?query=%20"] {
            let response = send(&t.app, get(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert_eq!(
                json_body(response).await["message"],
                "Query parameter is required."
            );
        }
    }

    #[tokio::test]
    async fn test_search_with_no_results_omits_data() {
        let t = test_app().await;

        let response = send(&t.app, get("/api/translations/search?query=nothing")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(json_body(response).await.get("data").is_none());
    }

    #[tokio::test]
    async fn test_translations_by_tag() {
        let t = test_app().await;
        create(&t.app, "a", &["web"]).await;
        create(&t.app, "b", &["mobile"]).await;

        let response = send(&t.app, get("/api/translations/tags/web")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let results = body["data"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["key"], "a");
    }

    #[tokio::test]
    async fn test_assign_tags_is_additive() {
        let t = test_app().await;
        let created = create(&t.app, "greeting", &["a"]).await;
        let id = created["id"].as_i64().unwrap();

        let response = send(
            &t.app,
            with_json(
                "POST",
                &format!("/api/translations/{id}/assign-tags"),
                serde_json::json!({"tags": ["b"]}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["message"], "Tags assigned successfully");
        let names: Vec<&str> = body["data"]["tags"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_assign_tags_missing_translation() {
        let t = test_app().await;

        let response = send(
            &t.app,
            with_json(
                "POST",
                "/api/translations/55/assign-tags",
                serde_json::json!({"tags": ["b"]}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_export_missing_file() {
        let t = test_app().await;

        let response = send(&t.app, get("/api/translations/export")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            serde_json::json!({"error": "Translations file not found."})
        );
    }

    #[tokio::test]
    async fn test_export_after_create() {
        let t = test_app().await;
        create(&t.app, "hello", &["greeting"]).await;

        // The export runs in the background; poll until it lands.
        let mut exported = None;
        for _ in 0..100 {
            let response = send(&t.app, get("/api/translations/export")).await;
            if response.status() == StatusCode::OK {
                exported = Some(response);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        let response = exported.expect("export file was never written");

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"translations.json\""
        );
        assert_eq!(headers[header::CACHE_CONTROL], "no-cache");

        let body = json_body(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["key"], "hello");
        assert_eq!(items[0]["tags"][0]["name"], "greeting");
    }
}
