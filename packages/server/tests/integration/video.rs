use serde_json::json;

use crate::common::{TestApp, routes};

mod link_creation {
    use super::*;

    #[tokio::test]
    async fn youtube_link_gets_embed_and_thumbnail() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "youtube", "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["kind"], "youtube");
        assert_eq!(res.body["title"], "YouTube video");
        assert_eq!(res.body["playable"], true);
        assert_eq!(
            res.body["descriptor"]["embed_source"],
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0"
        );
        assert_eq!(
            res.body["descriptor"]["thumbnail_source"],
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
        assert_eq!(res.body["descriptor"]["platform"], "youtube");
    }

    #[tokio::test]
    async fn tiktok_link_keeps_title_and_has_no_thumbnail() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({
                    "kind": "tiktok",
                    "url": "https://www.tiktok.com/@cutsbyjo/video/7234567890123456789",
                    "title": "  Behind the edit  ",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Behind the edit");
        assert_eq!(
            res.body["descriptor"]["embed_source"],
            "https://www.tiktok.com/embed/v2/7234567890123456789"
        );
        assert!(res.body["descriptor"]["thumbnail_source"].is_null());
    }

    #[tokio::test]
    async fn blank_tiktok_title_gets_default() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "tiktok", "url": "https://vm.tiktok.com/ZMabc123/", "title": ""}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "TikTok video");
    }

    #[tokio::test]
    async fn mismatched_link_is_rejected_with_platform_message() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "youtube", "url": "https://vimeo.com/123456"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Invalid YouTube URL");

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "tiktok", "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Invalid TikTok URL");

        let list = app.get_without_token(routes::VIDEOS).await;
        assert!(list.ids().is_empty());
    }

    #[tokio::test]
    async fn empty_url_is_required() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "youtube", "url": "   "}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "URL is required");
    }

    #[tokio::test]
    async fn upload_kind_cannot_be_added_by_link() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let res = app
            .post_with_token(
                routes::VIDEO_LINKS,
                &json!({"kind": "upload", "url": "https://cdn.example.com/clip.mp4"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn new_videos_go_after_the_current_maximum() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let first = app.create_youtube_video(&token, "aaaaaaaaaa1").await;
        let second = app.create_youtube_video(&token, "aaaaaaaaaa2").await;

        let res = app.get_without_token(&routes::video(first)).await;
        assert_eq!(res.body["display_order"], 1);
        let res = app.get_without_token(&routes::video(second)).await;
        assert_eq!(res.body["display_order"], 2);

        app.force_display_order("video", first, 10).await;
        let third = app.create_youtube_video(&token, "aaaaaaaaaa3").await;
        let res = app.get_without_token(&routes::video(third)).await;
        assert_eq!(res.body["display_order"], 11);
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn public_list_is_sorted_by_display_order() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let a = app.create_youtube_video(&token, "aaaaaaaaaa1").await;
        let b = app.create_youtube_video(&token, "aaaaaaaaaa2").await;
        let c = app.create_youtube_video(&token, "aaaaaaaaaa3").await;
        app.force_display_order("video", a, 9).await;

        let res = app.get_without_token(routes::VIDEOS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![b, c, a]);
    }

    #[tokio::test]
    async fn broken_link_is_listed_as_unplayable() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_youtube_video(&token, "dQw4w9WgXcQ").await;

        use sea_orm::{ConnectionTrait, DbBackend, Statement};
        app.db
            .execute_raw(Statement::from_string(
                DbBackend::Postgres,
                format!("UPDATE video SET source_url = 'https://vimeo.com/1' WHERE id = {id}"),
            ))
            .await
            .unwrap();

        let res = app.get_without_token(routes::VIDEOS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![id]);
        assert_eq!(res.body[0]["playable"], false);
        assert!(res.body[0]["descriptor"]["embed_source"].is_null());
        assert!(res.body[0]["descriptor"]["thumbnail_source"].is_null());
    }

    #[tokio::test]
    async fn missing_video_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::video(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod editing {
    use super::*;

    #[tokio::test]
    async fn thumbnail_override_replaces_generated_thumbnail() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_youtube_video(&token, "dQw4w9WgXcQ").await;

        let res = app
            .patch_with_token(
                &routes::video(id),
                &json!({"title": "Showreel 2024", "thumbnail_url": "https://cdn.example.com/t.jpg"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Showreel 2024");
        assert_eq!(
            res.body["descriptor"]["thumbnail_source"],
            "https://cdn.example.com/t.jpg"
        );

        let res = app
            .patch_with_token(&routes::video(id), &json!({"thumbnail_url": null}), &token)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Showreel 2024");
        assert_eq!(
            res.body["descriptor"]["thumbnail_source"],
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }

    #[tokio::test]
    async fn blank_title_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_youtube_video(&token, "dQw4w9WgXcQ").await;

        let res = app
            .patch_with_token(&routes::video(id), &json!({"title": "  "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn deleted_video_is_gone() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let id = app.create_youtube_video(&token, "dQw4w9WgXcQ").await;

        let res = app.delete_with_token(&routes::video(id), &token).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(&routes::video(id)).await;
        assert_eq!(res.status, 404);

        let res = app.delete_with_token(&routes::video(id), &token).await;
        assert_eq!(res.status, 404);
    }
}

mod reordering {
    use super::*;

    async fn three_videos(app: &TestApp, token: &str) -> (i32, i32, i32) {
        (
            app.create_youtube_video(token, "aaaaaaaaaa1").await,
            app.create_youtube_video(token, "aaaaaaaaaa2").await,
            app.create_youtube_video(token, "aaaaaaaaaa3").await,
        )
    }

    #[tokio::test]
    async fn dragging_last_onto_first_shifts_the_rest_down() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;

        let res = app
            .put_with_token(
                routes::VIDEO_ORDER,
                &json!({"dragged_id": c, "target_id": a}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![c, a, b]);
        assert_eq!(res.orders(), vec![0, 1, 2]);

        let list = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(list.ids(), vec![c, a, b]);
        assert_eq!(list.orders(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn dragging_first_onto_last_shifts_the_rest_up() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;

        let res = app
            .put_with_token(
                routes::VIDEO_ORDER,
                &json!({"dragged_id": a, "target_id": c}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![b, c, a]);
    }

    #[tokio::test]
    async fn dropping_onto_itself_changes_nothing() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;

        let res = app
            .put_with_token(
                routes::VIDEO_ORDER,
                &json!({"dragged_id": b, "target_id": b}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.ids(), vec![a, b, c]);
        assert_eq!(res.orders(), vec![1, 2, 3]);

        let list = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(list.orders(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unknown_video_is_rejected_without_changes() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;

        let res = app
            .put_with_token(
                routes::VIDEO_ORDER,
                &json!({"dragged_id": a, "target_id": 9999}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");

        let list = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(list.ids(), vec![a, b, c]);
        assert_eq!(list.orders(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn renumber_repairs_gaps_and_duplicates() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;
        app.force_display_order("video", a, 5).await;
        app.force_display_order("video", b, 5).await;
        app.force_display_order("video", c, 2).await;

        let res = app
            .post_with_token(routes::VIDEO_RENUMBER, &json!({}), &token)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.ids(), vec![c, a, b]);
        assert_eq!(res.orders(), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn concurrent_moves_leave_a_contiguous_order() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;
        let (a, b, c) = three_videos(&app, &token).await;
        let d = app.create_youtube_video(&token, "aaaaaaaaaa4").await;

        let first = json!({"dragged_id": d, "target_id": a});
        let second = json!({"dragged_id": b, "target_id": c});
        let (r1, r2) = futures::join!(
            app.put_with_token(routes::VIDEO_ORDER, &first, &token),
            app.put_with_token(routes::VIDEO_ORDER, &second, &token),
        );
        assert_eq!(r1.status, 200, "{}", r1.text);
        assert_eq!(r2.status, 200, "{}", r2.text);

        let list = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(list.orders(), vec![0, 1, 2, 3]);
        let mut ids = list.ids();
        ids.sort();
        assert_eq!(ids, vec![a, b, c, d]);
    }

    #[tokio::test]
    async fn concurrent_adds_get_distinct_positions() {
        let app = TestApp::spawn().await;
        let token = app.admin_token().await;

        let youtube = json!({"kind": "youtube", "url": "https://youtu.be/aaaaaaaaaa1"});
        let tiktok = json!({
            "kind": "tiktok",
            "url": "https://www.tiktok.com/@editor/video/1234567890",
        });
        let (r1, r2) = futures::join!(
            app.post_with_token(routes::VIDEO_LINKS, &youtube, &token),
            app.post_with_token(routes::VIDEO_LINKS, &tiktok, &token),
        );
        assert_eq!(r1.status, 201, "{}", r1.text);
        assert_eq!(r2.status, 201, "{}", r2.text);

        let mut orders = vec![
            r1.body["display_order"].as_i64().unwrap(),
            r2.body["display_order"].as_i64().unwrap(),
        ];
        orders.sort();
        assert_eq!(orders, vec![1, 2]);

        let list = app.get_without_token(routes::VIDEOS).await;
        assert_eq!(list.orders(), vec![1, 2]);
    }
}
