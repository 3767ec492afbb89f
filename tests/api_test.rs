use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use vmedia::api::MediaApi;
use vmedia::conf::Config;
use vmedia::service::MediaService;
use vmedia::testutil::{MediaTree, test_config};

const TOKEN: &str = "abc123";

fn photos_tree() -> MediaTree {
    let tree = MediaTree::new();
    tree.write("photos", "a.jpg", b"AAAA");
    tree.write("photos", "b.jpg", b"BBBB");
    tree.write("photos", "c.jpg", b"CCCC");
    tree.write("clips", "intro.mp4", b"\x00\x00\x00\x18ftypmp42");
    tree.write("private", "me.png", b"PNG");
    tree
}

fn open_router(tree: &MediaTree) -> Router {
    MediaApi::new(MediaService::new(test_config(tree.root()))).router()
}

fn gated_router(tree: &MediaTree) -> Router {
    let mut config: Config = test_config(tree.root());
    config.auth.admin_token = Some(TOKEN.to_string());
    MediaApi::new(MediaService::new(config)).router()
}

async fn body_bytes(router: Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes)
}

async fn body_text(router: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::get(uri).body(Body::empty()).unwrap();
    let (status, bytes) = body_bytes(router, req).await;
    (status, String::from_utf8(bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let tree = photos_tree();
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (status, bytes) = body_bytes(gated_router(&tree), req).await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["categories_cached"], 0);
}

#[tokio::test]
async fn test_fetch_streams_file() {
    let tree = photos_tree();
    let req = Request::get("/api/media/photos/b.jpg")
        .body(Body::empty())
        .unwrap();
    let response = open_router(&tree).oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/jpeg");
    assert_eq!(response.headers().get(header::CONTENT_LENGTH).unwrap(), "4");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"BBBB");
}

#[tokio::test]
async fn test_fetch_video_content_type() {
    let tree = photos_tree();
    let req = Request::get("/api/media/clips/intro.mp4")
        .body(Body::empty())
        .unwrap();
    let response = open_router(&tree).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "video/mp4");
}

#[tokio::test]
async fn test_fetch_missing_is_404() {
    let tree = photos_tree();
    let (status, body) = body_text(open_router(&tree), "/api/media/photos/missing.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains(tree.root().to_str().unwrap()));
}

#[tokio::test]
async fn test_fetch_traversal_is_403() {
    let tree = photos_tree();
    for uri in [
        "/api/media/..%2Fetc/passwd",
        "/api/media/photos/..%2F..%2Fsecret",
        "/api/media/../photos",
        "/api/media/photos/.hidden",
    ] {
        let (status, body) = body_text(open_router(&tree), uri).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert!(body.contains("forbidden"));
    }
}

#[tokio::test]
async fn test_next_and_prev_scenario() {
    let tree = photos_tree();
    let router = open_router(&tree);

    for (uri, expected) in [
        ("/api/media/next/photos/a.jpg", "photos/b.jpg"),
        ("/api/media/next/photos/c.jpg", "photos/a.jpg"),
        ("/api/media/prev/photos/a.jpg", "photos/c.jpg"),
        ("/api/media/next/photos/missing.jpg", "photos/a.jpg"),
        ("/api/media/prev/photos/missing.jpg", "photos/c.jpg"),
    ] {
        let (status, body) = body_text(router.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, expected, "{uri}");
    }
}

#[tokio::test]
async fn test_navigate_empty_category_is_204() {
    let tree = photos_tree();
    std::fs::create_dir(tree.root().join("empty")).unwrap();
    let router = open_router(&tree);

    for uri in [
        "/api/media/next/empty/a.jpg",
        "/api/media/prev/empty/a.jpg",
        "/api/media/next/absent/a.jpg",
    ] {
        let (status, body) = body_text(router.clone(), uri).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "{uri}");
        assert!(body.is_empty());
    }
}

#[tokio::test]
async fn test_navigate_traversal_is_403() {
    let tree = photos_tree();
    let (status, _) = body_text(open_router(&tree), "/api/media/next/..%2Fetc/passwd").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_navigate_from_hidden_or_odd_name_wraps() {
    let tree = photos_tree();
    let router = open_router(&tree);

    for (uri, expected) in [
        ("/api/media/next/photos/.DS_Store", "photos/a.jpg"),
        ("/api/media/prev/photos/.DS_Store", "photos/c.jpg"),
        ("/api/media/next/photos/a%5Cb.jpg", "photos/a.jpg"),
        ("/api/media/prev/photos/..%2F..%2Fsecret", "photos/c.jpg"),
    ] {
        let (status, body) = body_text(router.clone(), uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, expected, "{uri}");
    }
}

#[tokio::test]
async fn test_fetch_from_file_category_is_404() {
    let tree = photos_tree();
    std::fs::write(tree.root().join("notes"), b"plain file").unwrap();
    let (status, body) = body_text(open_router(&tree), "/api/media/notes/a.jpg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!body.contains(tree.root().to_str().unwrap()));
}

#[tokio::test]
async fn test_index_is_stale_until_restart() {
    let tree = photos_tree();
    let router = open_router(&tree);

    let (_, body) = body_text(router.clone(), "/api/media/next/photos/c.jpg").await;
    assert_eq!(body, "photos/a.jpg");

    tree.write("photos", "d.jpg", b"DDDD");
    let (_, body) = body_text(router.clone(), "/api/media/next/photos/c.jpg").await;
    assert_eq!(body, "photos/a.jpg");

    // still fetchable directly, just not reachable by navigation
    let (status, _) = body_text(router, "/api/media/photos/d.jpg").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_sensitive_category_served() {
    let tree = photos_tree();
    let req = Request::get("/api/media/private/me.png")
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = body_bytes(open_router(&tree), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"PNG");
}

#[tokio::test]
async fn test_gate_rejects_before_handlers() {
    let tree = photos_tree();
    let router = gated_router(&tree);

    for uri in [
        "/auth",
        "/api/media/photos/a.jpg",
        "/api/media/next/photos/a.jpg",
        "/api/media/prev/photos/a.jpg",
    ] {
        let (status, _) = body_text(router.clone(), uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
    }

    // rejected navigation must not have populated the cache
    let req = Request::get("/health").body(Body::empty()).unwrap();
    let (_, bytes) = body_bytes(router, req).await;
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["categories_cached"], 0);
}

#[tokio::test]
async fn test_gate_admits_bearer_token() {
    let tree = photos_tree();
    let router = gated_router(&tree);

    let req = Request::get("/auth")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = body_bytes(router.clone(), req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Success");

    let req = Request::get("/api/media/next/photos/a.jpg")
        .header(header::AUTHORIZATION, format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap();
    let (status, bytes) = body_bytes(router, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"photos/b.jpg");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let tree = photos_tree();
    let (status, body) = body_text(open_router(&tree), "/nothing/here").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "not found");
}
