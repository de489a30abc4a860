use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::fixtures::BookFactory;
use bookshelf_server::{build_router, AppState};
use tower::ServiceExt; // for `oneshot`

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = send(app, Method::GET, uri).await;
    (status, body)
}

#[tokio::test]
async fn index_counts_primary_category_of_two_trait_book() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_primary_category()
        .with_secondary_category()
        .create(&conn)
        .unwrap();
    let app = build_router(AppState::new(conn));

    let (status, content_type, body) = send(app, Method::GET, "/primary_categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "# of primary categories: 1");
    assert!(content_type.unwrap_or_default().starts_with("text/plain"));
}

#[tokio::test]
async fn index_reports_zero_without_data() {
    let conn = open_db_in_memory().unwrap();
    let app = build_router(AppState::new(conn));

    let (status, body) = get(app, "/primary_categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "# of primary categories: 0");
}

#[tokio::test]
async fn index_counts_join_rows_not_distinct_names() {
    let conn = open_db_in_memory().unwrap();
    BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();
    BookFactory::new()
        .with_primary_category()
        .create(&conn)
        .unwrap();
    let app = build_router(AppState::new(conn));

    let (status, body) = get(app, "/primary_categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "# of primary categories: 2");
}

#[tokio::test]
async fn index_reads_current_state_on_every_request() {
    let conn = open_db_in_memory().unwrap();
    let state = AppState::new(conn);
    let app = build_router(state.clone());

    let (_, before) = get(app.clone(), "/primary_categories").await;
    assert_eq!(before, "# of primary categories: 0");

    {
        let conn = state.db.lock().unwrap();
        BookFactory::new()
            .with_primary_category()
            .create(&conn)
            .unwrap();
    }

    let (_, after) = get(app, "/primary_categories").await;
    assert_eq!(after, "# of primary categories: 1");
}

#[tokio::test]
async fn unknown_route_returns_not_found() {
    let app = build_router(AppState::new(open_db_in_memory().unwrap()));

    let (status, _) = get(app, "/primary_categories/1").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_get_method_is_not_allowed() {
    let app = build_router(AppState::new(open_db_in_memory().unwrap()));

    let (status, _, _) = send(app, Method::POST, "/primary_categories").await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn poisoned_connection_maps_to_internal_error() {
    let state = AppState::new(open_db_in_memory().unwrap());
    let db = state.db.clone();
    let _ = std::thread::spawn(move || {
        let _guard = db.lock().unwrap();
        panic!("poison the connection lock");
    })
    .join();
    let app = build_router(state);

    let (status, body) = get(app, "/primary_categories").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}
