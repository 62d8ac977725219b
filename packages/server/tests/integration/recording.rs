use serde_json::json;

use crate::common::{TestApp, routes};

mod recording_creation {
    use super::*;

    #[tokio::test]
    async fn creates_a_recording() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::RECORDINGS,
                &json!({
                    "title": "Standup",
                    "conference_id": conference_id,
                    "tenant_id": 7,
                    "file_path": "https://store/rec1.mp4"
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Standup");
        assert_eq!(res.body["conference_id"], conference_id);
        assert_eq!(res.body["file_path"], "https://store/rec1.mp4");
    }

    #[tokio::test]
    async fn unknown_conference_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::RECORDINGS,
                &json!({
                    "title": "Orphan",
                    "conference_id": 9999,
                    "tenant_id": 7,
                    "file_path": "https://store/orphan.mp4"
                }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn rejects_empty_file_path() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::RECORDINGS,
                &json!({
                    "title": "No media",
                    "conference_id": conference_id,
                    "tenant_id": 7,
                    "file_path": " "
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn rejects_overlong_title() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;

        let res = app
            .post(
                routes::RECORDINGS,
                &json!({
                    "title": "x".repeat(257),
                    "conference_id": conference_id,
                    "tenant_id": 7,
                    "file_path": "https://store/long.mp4"
                }),
            )
            .await;

        assert_eq!(res.status, 400);
    }
}

mod recording_queries {
    use super::*;

    #[tokio::test]
    async fn filters_by_tenant_and_conference() {
        let app = TestApp::spawn().await;
        let a = app.create_conference(7, "A").await;
        let b = app.create_conference(8, "B").await;
        app.create_recording(a, 7, "A1").await;
        app.create_recording(a, 7, "A2").await;
        app.create_recording(b, 8, "B1").await;

        let res = app.get(&format!("{}?tenant_id=7", routes::RECORDINGS)).await;
        assert_eq!(res.body.as_array().expect("array body").len(), 2);

        let res = app
            .get(&format!("{}?conference_id={b}", routes::RECORDINGS))
            .await;
        let items = res.body.as_array().expect("array body");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "B1");

        let res = app
            .get(&format!("{}?tenant_id=8&conference_id={a}", routes::RECORDINGS))
            .await;
        assert!(res.body.as_array().expect("array body").is_empty());
    }

    #[tokio::test]
    async fn get_returns_the_recording() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_recording(conference_id, 7, "Demo").await;

        let res = app.get(&routes::recording(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["id"], id);
        assert_eq!(res.body["title"], "Demo");
    }
}

mod recording_update {
    use super::*;

    #[tokio::test]
    async fn updates_title_and_advances_updated_at() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_recording(conference_id, 7, "Draft").await;
        let before = app.get(&routes::recording(id)).await;

        let res = app
            .patch(&routes::recording(id), &json!({"title": "Final"}))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Final");
        assert_eq!(res.body["file_path"], before.body["file_path"]);
        assert!(res.timestamp("updated_at") > before.timestamp("updated_at"));
    }

    #[tokio::test]
    async fn empty_patch_leaves_row_untouched() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_recording(conference_id, 7, "Stable").await;
        let before = app.get(&routes::recording(id)).await;

        let res = app.patch(&routes::recording(id), &json!({})).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["updated_at"], before.body["updated_at"]);
        assert_eq!(res.body["title"], "Stable");
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .patch(&routes::recording(9999), &json!({"title": "Ghost"}))
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Recording with id 9999 not found");
    }

    #[tokio::test]
    async fn moving_to_unknown_conference_is_not_found() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_recording(conference_id, 7, "Demo").await;

        let res = app
            .patch(&routes::recording(id), &json!({"conference_id": 9999}))
            .await;

        assert_eq!(res.status, 404);
        let after = app.get(&routes::recording(id)).await;
        assert_eq!(after.body["conference_id"], conference_id);
    }
}

mod recording_deletion {
    use super::*;

    #[tokio::test]
    async fn deletes_a_recording() {
        let app = TestApp::spawn().await;
        let conference_id = app.create_conference(7, "Sync").await;
        let id = app.create_recording(conference_id, 7, "Demo").await;

        assert_eq!(app.delete(&routes::recording(id)).await.status, 204);
        assert_eq!(app.get(&routes::recording(id)).await.status, 404);
        assert_eq!(app.delete(&routes::recording(id)).await.status, 404);
    }
}
