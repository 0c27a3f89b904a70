//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, seed_video, test_pool, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh unique user and return the auth response
async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    // First registration
    server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();

    // Second registration with the same username
    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.code, "USERNAME_TAKEN");
}

#[tokio::test]
async fn test_register_rejects_bad_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest {
        username: "no spaces allowed".to_string(),
        display_name: "Bad Username".to_string(),
        password: "TestPass123".to_string(),
    };

    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Register first
    let register_req = RegisterRequest::unique();
    server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();

    // Login
    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.username, register_req.username);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let register_req = RegisterRequest::unique();
    server
        .post("/api/v1/auth/register", &register_req)
        .await
        .unwrap();

    let login_req = LoginRequest {
        username: register_req.username.clone(),
        password: "WrongPass999".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .post_auth("/api/v1/auth/logout", &auth.access_token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();

    // Logout requires a valid token
    let response = server.post("/api/v1/auth/logout", &()).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.id, auth.user.id);
    assert_eq!(user.username, auth.user.username);
}

#[tokio::test]
async fn test_get_current_user_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let update = UpdateProfileRequest {
        display_name: Some("Renamed Channel".to_string()),
        bio: Some("Uploads on Fridays".to_string()),
    };
    let response = server
        .patch_auth("/api/v1/users/@me", &auth.access_token, &update)
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(user.display_name, "Renamed Channel");
    assert_eq!(user.bio.as_deref(), Some("Uploads on Fridays"));
}

#[tokio::test]
async fn test_get_channel() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    seed_video(&pool, &owner.user.id).await.unwrap();

    // Channel page is public
    let response = server
        .get(&format!("/api/v1/users/{}", owner.user.id))
        .await
        .unwrap();
    let channel: ChannelResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(channel.id, owner.user.id);
    assert_eq!(channel.videos, 1);
    assert!(!channel.subscribed);
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_get_video() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .get(&format!("/api/v1/videos/{video_id}"))
        .await
        .unwrap();
    let video: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(video.id, video_id);
    assert_eq!(
        video.author.as_ref().map(|a| a.id.as_str()),
        Some(owner.user.id.as_str())
    );
}

#[tokio::test]
async fn test_get_video_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/videos/1").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.code, "UNKNOWN_VIDEO");
}

#[tokio::test]
async fn test_list_videos() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server.get("/api/v1/videos?sort=latest&limit=50").await.unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(videos.iter().any(|v| v.id == video_id));
}

#[tokio::test]
async fn test_list_videos_rejects_unknown_sort() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/videos?sort=oldest").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_record_views() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    // Authenticated view
    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/views"),
            &viewer.access_token,
            &(),
        )
        .await
        .unwrap();
    let count: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.views, 1);

    // Repeat views count every time
    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/views"),
            &viewer.access_token,
            &(),
        )
        .await
        .unwrap();
    let count: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.views, 2);

    // Anonymous views count too
    let response = server
        .post(&format!("/api/v1/videos/{video_id}/views"), &())
        .await
        .unwrap();
    let count: ViewCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.views, 3);

    // History only keeps one row for the repeat viewer
    let response = server
        .get_auth("/api/v1/users/@me/history", &viewer.access_token)
        .await
        .unwrap();
    let history: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.iter().filter(|v| v.id == video_id).count(), 1);
}

#[tokio::test]
async fn test_record_share() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .post(&format!("/api/v1/videos/{video_id}/shares"), &())
        .await
        .unwrap();
    let count: ShareCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.shares, 1);
}

#[tokio::test]
async fn test_watch_later_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/videos/{video_id}/watch-later"),
            &viewer.access_token,
            &(),
        )
        .await
        .unwrap();
    let state: WatchLaterResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.saved);

    let response = server
        .get_auth("/api/v1/users/@me/watch-later", &viewer.access_token)
        .await
        .unwrap();
    let saved: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(saved.iter().any(|v| v.id == video_id));

    // Second toggle removes it
    let response = server
        .put_auth(
            &format!("/api/v1/videos/{video_id}/watch-later"),
            &viewer.access_token,
            &(),
        )
        .await
        .unwrap();
    let state: WatchLaterResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.saved);
}

#[tokio::test]
async fn test_delete_video_enforces_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let stranger = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    // Stranger cannot delete
    let response = server
        .delete_auth(
            &format!("/api/v1/videos/{video_id}"),
            &stranger.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Owner can
    let response = server
        .delete_auth(&format!("/api/v1/videos/{video_id}"), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();

    let response = server
        .get(&format!("/api/v1/videos/{video_id}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_toggle_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();
    let path = format!("/api/v1/videos/{video_id}/reaction");

    // Like
    let response = server
        .put_auth(&path, &viewer.access_token, &SetReactionRequest { value: 1 })
        .await
        .unwrap();
    let state: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.value, 1);
    assert_eq!((state.likes, state.dislikes), (1, 0));

    // Switch to dislike moves one unit
    let response = server
        .put_auth(&path, &viewer.access_token, &SetReactionRequest { value: -1 })
        .await
        .unwrap();
    let state: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.value, -1);
    assert_eq!((state.likes, state.dislikes), (0, 1));

    // Resubmit toggles off
    let response = server
        .put_auth(&path, &viewer.access_token, &SetReactionRequest { value: -1 })
        .await
        .unwrap();
    let state: ReactionStateResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.value, 0);
    assert_eq!((state.likes, state.dislikes), (0, 0));

    // The detail payload mirrors the viewer's state
    let response = server
        .put_auth(&path, &viewer.access_token, &SetReactionRequest { value: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/videos/{video_id}"), &viewer.access_token)
        .await
        .unwrap();
    let video: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(video.user_liked, 1);
    assert_eq!(video.likes_count, 1);
}

#[tokio::test]
async fn test_listing_carries_viewer_reaction() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let viewer = register(&server).await;
    let liked_id = seed_video(&pool, &owner.user.id).await.unwrap();
    let other_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/videos/{liked_id}/reaction"),
            &viewer.access_token,
            &SetReactionRequest { value: 1 },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let path = format!("/api/v1/users/{}/videos", owner.user.id);
    let response = server.get_auth(&path, &viewer.access_token).await.unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();

    let liked = videos.iter().find(|v| v.id == liked_id).unwrap();
    let other = videos.iter().find(|v| v.id == other_id).unwrap();
    assert_eq!(liked.user_liked, 1);
    assert_eq!(other.user_liked, 0);

    // Anonymous listings stay neutral
    let response = server.get(&path).await.unwrap();
    let videos: Vec<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(videos.iter().all(|v| v.user_liked == 0));
}

#[tokio::test]
async fn test_reaction_rejects_bad_value() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .put_auth(
            &format!("/api/v1/videos/{video_id}/reaction"),
            &owner.access_token,
            &SetReactionRequest { value: 5 },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let commenter = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();
    let path = format!("/api/v1/videos/{video_id}/comments");

    // Top-level comment
    let response = server
        .post_auth(
            &path,
            &commenter.access_token,
            &CreateCommentRequest::simple("Great upload!"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.text, "Great upload!");
    assert!(comment.parent_id.is_none());

    // Owner replies
    let response = server
        .post_auth(
            &path,
            &owner.access_token,
            &CreateCommentRequest::reply("Thanks!", &comment.id),
        )
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(comment.id.as_str()));

    // Listing returns the thread with the reply nested
    let response = server.get(&path).await.unwrap();
    let threads: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].id, comment.id);
    assert_eq!(threads[0].replies.len(), 1);
    assert_eq!(threads[0].replies[0].id, reply.id);

    // Replies count toward the thread, not the video counter
    let response = server
        .get(&format!("/api/v1/videos/{video_id}"))
        .await
        .unwrap();
    let video: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(video.comments_count, 1);
}

#[tokio::test]
async fn test_comment_like_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let viewer = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/comments"),
            &owner.access_token,
            &CreateCommentRequest::simple("First!"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let like_path = format!("/api/v1/comments/{}/like", comment.id);

    let response = server
        .put_auth(&like_path, &viewer.access_token, &())
        .await
        .unwrap();
    let state: CommentLikeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.liked);
    assert_eq!(state.likes, 1);

    let response = server
        .put_auth(&like_path, &viewer.access_token, &())
        .await
        .unwrap();
    let state: CommentLikeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.liked);
    assert_eq!(state.likes, 0);
}

#[tokio::test]
async fn test_comment_pin_requires_video_owner() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let commenter = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/comments"),
            &commenter.access_token,
            &CreateCommentRequest::simple("Pin me"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let pin_path = format!("/api/v1/comments/{}/pin", comment.id);

    // The comment author is not the video owner
    let response = server
        .put_auth(&pin_path, &commenter.access_token, &())
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The video owner pins
    let response = server
        .put_auth(&pin_path, &owner.access_token, &())
        .await
        .unwrap();
    let state: CommentPinResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.pinned);

    // Pinned comment sorts first
    let response = server
        .get(&format!("/api/v1/videos/{video_id}/comments"))
        .await
        .unwrap();
    let threads: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(threads[0].pinned);
}

#[tokio::test]
async fn test_comment_delete_enforces_authorship() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let commenter = register(&server).await;
    let stranger = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/comments"),
            &commenter.access_token,
            &CreateCommentRequest::simple("Delete me"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/comments/{}", comment.id);

    let response = server
        .delete_auth(&path, &stranger.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Owning the video grants no delete rights either
    let response = server
        .delete_auth(&path, &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Author deletes
    let response = server
        .delete_auth(&path, &commenter.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT)
        .await
        .unwrap();
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
async fn test_subscription_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let channel = register(&server).await;
    let fan = register(&server).await;
    let path = format!("/api/v1/users/{}/subscription", channel.user.id);

    let response = server.put_auth(&path, &fan.access_token, &()).await.unwrap();
    let state: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(state.subscribed);
    assert_eq!(state.subscribers, 1);

    // Channel shows up in the fan's subscriptions
    let response = server
        .get_auth("/api/v1/users/@me/subscriptions", &fan.access_token)
        .await
        .unwrap();
    let channels: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(channels.iter().any(|c| c.id == channel.user.id));

    // Second toggle unsubscribes
    let response = server.put_auth(&path, &fan.access_token, &()).await.unwrap();
    let state: SubscriptionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!state.subscribed);
    assert_eq!(state.subscribers, 0);
}

#[tokio::test]
async fn test_self_subscription_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let channel = register(&server).await;

    let response = server
        .put_auth(
            &format!("/api/v1/users/{}/subscription", channel.user.id),
            &channel.access_token,
            &(),
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(error.error.code, "SELF_SUBSCRIPTION");
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notifications_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    let channel = register(&server).await;
    let fan = register(&server).await;

    // Fan subscribes, channel gets a notification
    server
        .put_auth(
            &format!("/api/v1/users/{}/subscription", channel.user.id),
            &fan.access_token,
            &(),
        )
        .await
        .unwrap();

    let response = server
        .get_auth(
            "/api/v1/notifications/unread-count",
            &channel.access_token,
        )
        .await
        .unwrap();
    let badge: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(badge.unread, 1);

    // The badge also rides on the profile payload
    let response = server
        .get_auth("/api/v1/users/@me", &channel.access_token)
        .await
        .unwrap();
    let profile: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.unread, 1);

    // Listing the inbox marks everything read
    let response = server
        .get_auth("/api/v1/notifications", &channel.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "subscribe");
    assert_eq!(notifications[0].origin_id, fan.user.id);

    let response = server
        .get_auth(
            "/api/v1/notifications/unread-count",
            &channel.access_token,
        )
        .await
        .unwrap();
    let badge: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(badge.unread, 0);
}

// ============================================================================
// Report Tests
// ============================================================================

#[tokio::test]
async fn test_create_report() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let pool = test_pool().await.expect("Failed to connect pool");

    let owner = register(&server).await;
    let reporter = register(&server).await;
    let video_id = seed_video(&pool, &owner.user.id).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/videos/{video_id}/reports"),
            &reporter.access_token,
            &CreateReportRequest::spam(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}
