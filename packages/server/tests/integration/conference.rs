use serde_json::json;

use crate::common::{TestApp, routes};

mod conference_creation {
    use super::*;

    #[tokio::test]
    async fn creates_a_conference() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CONFERENCES,
                &json!({
                    "name": "  Weekly sync  ",
                    "host_user_id": 5,
                    "tenant_id": 7,
                    "start_time": "2024-01-01T09:00:00Z",
                    "end_time": "2024-01-01T10:00:00Z"
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["name"], "Weekly sync");
        assert_eq!(res.body["tenant_id"], 7);
        assert_eq!(res.body["host_user_id"], 5);
        assert!(res.body["created_at"].is_string());
        assert!(res.body["updated_at"].is_string());
    }

    #[tokio::test]
    async fn end_time_is_optional() {
        let app = TestApp::spawn().await;

        let id = app.create_conference(7, "Open ended").await;
        let res = app.get(&routes::conference(id)).await;

        assert_eq!(res.status, 200);
        assert!(res.body["end_time"].is_null());
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CONFERENCES,
                &json!({
                    "name": "   ",
                    "host_user_id": 5,
                    "tenant_id": 7,
                    "start_time": "2024-01-01T09:00:00Z"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_end_before_start() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::CONFERENCES,
                &json!({
                    "name": "Backwards",
                    "host_user_id": 5,
                    "tenant_id": 7,
                    "start_time": "2024-01-01T09:00:00Z",
                    "end_time": "2024-01-01T08:00:00Z"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_malformed_body() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::CONFERENCES, &json!({"name": "No tenant"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod conference_queries {
    use super::*;

    #[tokio::test]
    async fn lists_conferences_in_id_order() {
        let app = TestApp::spawn().await;
        let first = app.create_conference(7, "First").await;
        let second = app.create_conference(8, "Second").await;

        let res = app.get(routes::CONFERENCES).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"], first);
        assert_eq!(items[1]["id"], second);
    }

    #[tokio::test]
    async fn filters_by_tenant() {
        let app = TestApp::spawn().await;
        app.create_conference(7, "Tenant seven").await;
        app.create_conference(8, "Tenant eight").await;

        let res = app
            .get(&format!("{}?tenant_id=8", routes::CONFERENCES))
            .await;

        let items = res.body.as_array().expect("array body");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], "Tenant eight");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::conference(9999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Conference with id 9999 not found");
    }
}

mod conference_update {
    use super::*;

    #[tokio::test]
    async fn updates_only_provided_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Before").await;
        let before = app.get(&routes::conference(id)).await;

        let res = app
            .patch(&routes::conference(id), &json!({"name": "After"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["name"], "After");
        assert_eq!(res.body["tenant_id"], 7);
        assert_eq!(res.body["created_at"], before.body["created_at"]);
        assert!(res.timestamp("updated_at") > before.timestamp("updated_at"));
    }

    #[tokio::test]
    async fn null_clears_end_time() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Ending").await;
        app.patch(
            &routes::conference(id),
            &json!({"end_time": "2024-01-01T11:00:00Z"}),
        )
        .await;

        let res = app
            .patch(&routes::conference(id), &json!({"end_time": null}))
            .await;

        assert_eq!(res.status, 200);
        assert!(res.body["end_time"].is_null());
    }

    #[tokio::test]
    async fn rejects_end_before_existing_start() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Sync").await;

        let res = app
            .patch(
                &routes::conference(id),
                &json!({"end_time": "2023-12-31T00:00:00Z"}),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn empty_patch_leaves_row_untouched() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Stable").await;
        let before = app.get(&routes::conference(id)).await;

        let res = app.patch(&routes::conference(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["updated_at"], before.body["updated_at"]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::conference(9999), &json!({"name": "Ghost"}))
            .await;

        assert_eq!(res.status, 404);
    }
}

mod conference_deletion {
    use super::*;

    #[tokio::test]
    async fn deletes_a_conference() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Doomed").await;

        let res = app.delete(&routes::conference(id)).await;
        assert_eq!(res.status, 204);

        let res = app.get(&routes::conference(id)).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn refuses_while_sessions_exist() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Busy").await;
        app.create_session(id, "Keynote").await;

        let res = app.delete(&routes::conference(id)).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(app.get(&routes::conference(id)).await.status, 200);
    }

    #[tokio::test]
    async fn refuses_while_recordings_exist() {
        let app = TestApp::spawn().await;
        let id = app.create_conference(7, "Recorded").await;
        app.create_recording(id, 7, "Intro").await;

        let res = app.delete(&routes::conference(id)).await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::conference(9999)).await;

        assert_eq!(res.status, 404);
    }
}
