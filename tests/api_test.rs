mod common;

use axum::http::StatusCode;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use tellah_server::domain::project::entity::project;
use tellah_server::domain::scenario::entity::scenario;
use tower::ServiceExt;

use common::*;

// ===== Health Check Tests =====

mod health {
    use super::*;

    #[tokio::test]
    async fn should_report_dependency_checks() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = parse_response_body(response.into_body()).await;
        assert!(body["checks"]["database"].is_object());
        assert_eq!(body["checks"]["openaiApi"]["status"], true);
    }

    #[tokio::test]
    async fn should_echo_incoming_request_id() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = axum::http::Request::builder()
            .uri("/health")
            .header("x-request-id", "req-42")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-request-id"], "req-42");
    }
}

// ===== Project API Tests =====

mod project_api {
    use super::*;

    #[tokio::test]
    async fn should_create_project() {
        // Arrange
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_model(1, "Billing bot")]])
            .into_connection();
        let app = router(db);
        let request = create_json_request(
            "POST",
            "/api/v1/projects",
            json!({
                "name": "Billing bot",
                "description": "Answers billing questions",
                "modelConfig": {
                    "model": "gpt-4",
                    "temperature": 0.7,
                    "systemPrompt": "You are a concise billing assistant."
                }
            }),
        );

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["isSuccess"], true);
        assert_eq!(body["code"], "COMMON201");
        assert_eq!(body["result"]["id"], 1);
        assert_eq!(
            body["result"]["modelConfig"]["systemPrompt"],
            "You are a concise billing assistant."
        );
    }

    #[tokio::test]
    async fn should_return_400_for_empty_name() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = create_json_request(
            "POST",
            "/api/v1/projects",
            json!({"name": "", "modelConfig": {"model": "gpt-4"}}),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["isSuccess"], false);
        assert_eq!(body["code"], "COMMON400");
        assert_eq!(body["message"], "name is required");
    }

    #[tokio::test]
    async fn should_return_400_for_out_of_range_temperature() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = create_json_request(
            "POST",
            "/api/v1/projects",
            json!({"name": "Bot", "modelConfig": {"model": "gpt-4", "temperature": 2.5}}),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_400_for_malformed_json() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/v1/projects")
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["code"], "COMMON400");
    }

    #[tokio::test]
    async fn should_return_404_for_missing_project() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project::Model>::new()])
            .into_connection();
        let app = router(db);

        let response = app
            .oneshot(empty_request("GET", "/api/v1/projects/99"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["code"], "PROJECT4041");
    }

    #[tokio::test]
    async fn should_return_400_for_non_numeric_id() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let response = app
            .oneshot(empty_request("GET", "/api/v1/projects/abc"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_project_with_ordered_scenarios() {
        // Arrange
        let scenarios = vec![
            scenario::Model {
                id: 3,
                project_id: 1,
                input_text: "How do I update my card?".to_string(),
                order_index: 1,
                created_at: timestamp(10),
            },
            scenario::Model {
                id: 4,
                project_id: 1,
                input_text: "Why was I charged twice?".to_string(),
                order_index: 2,
                created_at: timestamp(20),
            },
        ];
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![project_model(1, "Billing bot")]])
            .append_query_results([scenarios])
            .into_connection();
        let app = router(db);

        // Act
        let response = app
            .oneshot(empty_request("GET", "/api/v1/projects/1"))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["result"]["project"]["name"], "Billing bot");
        assert_eq!(body["result"]["scenarios"][1]["order"], 2);
    }

    #[tokio::test]
    async fn should_require_system_prompt_on_update() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = create_json_request(
            "PATCH",
            "/api/v1/projects/1",
            json!({"name": "Billing bot", "modelConfig": {"model": "gpt-4"}}),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["message"], "name and system prompt are required");
    }
}

// ===== Scenario / Rating API Tests =====

mod scenario_api {
    use super::*;

    #[tokio::test]
    async fn should_return_400_for_empty_input_text() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request =
            create_json_request("POST", "/api/v1/projects/1/scenarios", json!({"inputText": ""}));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_404_when_adding_scenario_to_missing_project() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<project::Model>::new()])
            .into_connection();
        let app = router(db);
        let request = create_json_request(
            "POST",
            "/api/v1/projects/7/scenarios",
            json!({"inputText": "Can I get a refund?"}),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

mod rating_api {
    use super::*;
    use tellah_server::domain::output::entity::output;

    #[tokio::test]
    async fn should_return_400_for_invalid_stars() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request =
            create_json_request("POST", "/api/v1/outputs/10/ratings", json!({"stars": 6}));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["message"], "Valid star rating (1-5) is required");
    }

    #[tokio::test]
    async fn should_return_400_when_stars_missing() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let request = create_json_request(
            "POST",
            "/api/v1/outputs/10/ratings",
            json!({"feedbackText": "too long"}),
        );

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_output() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<output::Model>::new()])
            .into_connection();
        let app = router(db);
        let request =
            create_json_request("POST", "/api/v1/outputs/404/ratings", json!({"stars": 4}));

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = parse_response_body(response.into_body()).await;
        assert_eq!(body["code"], "OUTPUT4041");
    }
}

// ===== API Docs =====

mod api_docs {
    use super::*;

    #[tokio::test]
    async fn should_serve_openapi_document() {
        let app = router(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let response = app
            .oneshot(empty_request("GET", "/api-docs/openapi.json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = parse_response_body(response.into_body()).await;
        assert!(body["paths"]["/api/v1/projects/{id}/extract"].is_object());
        assert!(body["paths"]["/api/v1/outputs/{outputId}/ratings"].is_object());
        let export_content =
            &body["paths"]["/api/v1/projects/{id}/export"]["get"]["responses"]["200"]["content"];
        assert!(export_content["application/json"].is_object());
        assert!(export_content["text/markdown"].is_object());
    }
}
