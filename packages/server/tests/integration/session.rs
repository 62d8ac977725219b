use serde_json::json;

use crate::common::{TestApp, routes};

mod session_creation {
    use super::*;

    #[tokio::test]
    async fn creates_a_session() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::SESSIONS,
                &json!({
                    "conference_id": conference_id,
                    "session_name": "Morning block",
                    "start_time": "2024-01-01T09:00:00Z",
                    "end_time": "2024-01-01T10:00:00Z",
                    "duration": 3600,
                    "file_size": "512.25"
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["session_name"], "Morning block");
        assert_eq!(res.body["duration"], 3600);
        assert_eq!(res.body["file_size"], "512.25");
        assert!(res.body["recording_url"].is_null());
    }

    #[tokio::test]
    async fn rounds_file_size_to_two_decimals() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::SESSIONS,
                &json!({
                    "conference_id": conference_id,
                    "session_name": "Rounded",
                    "start_time": "2024-01-01T09:00:00Z",
                    "duration": 0,
                    "file_size": "12.345"
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["file_size"], "12.35");
    }

    #[tokio::test]
    async fn rejects_negative_duration() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::SESSIONS,
                &json!({
                    "conference_id": conference_id,
                    "session_name": "Negative",
                    "start_time": "2024-01-01T09:00:00Z",
                    "duration": -1,
                    "file_size": "1.00"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn rejects_oversized_file_size() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::SESSIONS,
                &json!({
                    "conference_id": conference_id,
                    "session_name": "Huge",
                    "start_time": "2024-01-01T09:00:00Z",
                    "duration": 10,
                    "file_size": "100000000.00"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_conference_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::SESSIONS,
                &json!({
                    "conference_id": 9999,
                    "session_name": "Orphan",
                    "start_time": "2024-01-01T09:00:00Z",
                    "duration": 10,
                    "file_size": "1.00"
                }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod session_queries {
    use super::*;

    #[tokio::test]
    async fn filters_by_conference() {
        let app = TestApp::spawn().await;
        let a = app.create_conference(7, "A").await;
        let b = app.create_conference(7, "B").await;
        app.create_session(a, "A1").await;
        app.create_session(b, "B1").await;
        app.create_session(b, "B2").await;

        let res = app
            .get(&format!("{}?conference_id={b}", routes::SESSIONS))
            .await;

        let items = res.body.as_array().expect("array body");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["session_name"], "B1");
        assert_eq!(items[1]["session_name"], "B2");
    }
}

mod session_update {
    use super::*;

    #[tokio::test]
    async fn sets_and_clears_recording_url() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_session(conference_id, "Keynote").await;

        let res = app
            .patch(
                &routes::session(id),
                &json!({"recording_url": "https://store/keynote.mp4"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["recording_url"], "https://store/keynote.mp4");
        assert_eq!(res.body["session_name"], "Keynote");

        let res = app
            .patch(&routes::session(id), &json!({"recording_url": null}))
            .await;
        assert_eq!(res.status, 200);
        assert!(res.body["recording_url"].is_null());
    }

    #[tokio::test]
    async fn successive_updates_advance_updated_at() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_session(conference_id, "Keynote").await;

        let first = app
            .patch(&routes::session(id), &json!({"duration": 10}))
            .await;
        let second = app
            .patch(&routes::session(id), &json!({"duration": 20}))
            .await;

        assert!(second.timestamp("updated_at") > first.timestamp("updated_at"));
        assert_eq!(second.body["duration"], 20);
    }

    #[tokio::test]
    async fn rejects_negative_file_size() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_session(conference_id, "Keynote").await;

        let res = app
            .patch(&routes::session(id), &json!({"file_size": "-3.00"}))
            .await;

        assert_eq!(res.status, 400);
    }
}

mod session_deletion {
    use super::*;

    #[tokio::test]
    async fn deletes_a_session() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_session(conference_id, "Keynote").await;

        assert_eq!(app.delete(&routes::session(id)).await.status, 204);
        assert_eq!(app.get(&routes::session(id)).await.status, 404);
    }

    #[tokio::test]
    async fn refuses_while_participants_exist() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_session(conference_id, "Keynote").await;
        app.create_participant(id, 11).await;

        let res = app.delete(&routes::session(id)).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }
}
