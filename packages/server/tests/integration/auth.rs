use serde_json::json;

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn admin_can_log_in_with_configured_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].as_str().is_some());
        assert_eq!(res.body["email"], ADMIN_EMAIL);
    }

    #[tokio::test]
    async fn email_is_matched_case_insensitively() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "  Editor@Example.com ", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": ADMIN_EMAIL, "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn unknown_email_gets_the_same_error_as_wrong_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"email": "someone@example.com", "password": ADMIN_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_fields_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": " ", "password": "x"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"email": ADMIN_EMAIL}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod session {
    use super::*;

    #[tokio::test]
    async fn me_returns_the_logged_in_admin() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["email"], ADMIN_EMAIL);
        assert!(res.body["id"].is_number());
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn forged_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn admin_endpoints_require_a_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "youtube", "url": "https://youtu.be/dQw4w9WgXcQ"}),
            )
            .await;
        assert_eq!(res.status, 401);

        let res = app
            .post_without_token(routes::CLIENTS, &json!({"name": "Studio"}))
            .await;
        assert_eq!(res.status, 401);
    }
}

#[tokio::test]
async fn openapi_document_lists_public_and_admin_paths() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::OPENAPI).await;

    assert_eq!(res.status, 200);
    let paths = res.body["paths"].as_object().expect("paths object");
    assert!(paths.contains_key("/api/v1/videos/order"));
    assert!(paths.contains_key("/api/v1/clients/{id}"));
    assert!(paths.contains_key("/api/v1/auth/login"));
}
