//! HTTP-level checks that relationship synchronization is visible through the
//! API: whichever side an edit comes in on, subsequent reads of the other
//! side reflect it.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json, test_store};
use serde_json::json;

async fn create(app: axum::Router, uri: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn linking_profile_to_page_is_visible_from_the_page() {
    let app = build_test_app(test_store());
    let page = create(app.clone(), "/api/v1/pages", json!({"name": "Page A"})).await;
    let page_id = page["id"].as_str().unwrap();

    let profile = create(
        app.clone(),
        "/api/v1/profiles",
        json!({"name": "Alice", "page_ids": [page_id]}),
    )
    .await;

    let page = body_json(get(app, &format!("/api/v1/pages/{page_id}")).await).await;
    let profile_ids = page["profile_ids"].as_array().unwrap();
    assert_eq!(profile_ids.len(), 1);
    assert_eq!(profile_ids[0], profile["id"]);
}

#[tokio::test]
async fn page_side_edit_is_visible_from_the_profile() {
    let app = build_test_app(test_store());
    let profile = create(app.clone(), "/api/v1/profiles", json!({"name": "Alice"})).await;
    let profile_id = profile["id"].as_str().unwrap();

    let page = create(
        app.clone(),
        "/api/v1/pages",
        json!({"name": "Page A", "profile_ids": [profile_id]}),
    )
    .await;

    let profile = body_json(get(app, &format!("/api/v1/profiles/{profile_id}")).await).await;
    assert_eq!(profile["page_ids"].as_array().unwrap()[0], page["id"]);
}

#[tokio::test]
async fn relink_via_put_moves_the_inverse_link() {
    let app = build_test_app(test_store());
    let page_a = create(app.clone(), "/api/v1/pages", json!({"name": "Page A"})).await;
    let page_b = create(app.clone(), "/api/v1/pages", json!({"name": "Page B"})).await;
    let profile = create(
        app.clone(),
        "/api/v1/profiles",
        json!({"name": "Alice", "page_ids": [page_a["id"]]}),
    )
    .await;
    let profile_id = profile["id"].as_str().unwrap();

    put_json(
        app.clone(),
        &format!("/api/v1/profiles/{profile_id}"),
        json!({"name": "Alice", "page_ids": [page_b["id"]]}),
    )
    .await;

    let page_a = body_json(
        get(app.clone(), &format!("/api/v1/pages/{}", page_a["id"].as_str().unwrap())).await,
    )
    .await;
    let page_b = body_json(
        get(app, &format!("/api/v1/pages/{}", page_b["id"].as_str().unwrap())).await,
    )
    .await;
    assert!(page_a["profile_ids"].as_array().unwrap().is_empty());
    assert_eq!(page_b["profile_ids"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_profile_unlinks_it_from_pages() {
    let app = build_test_app(test_store());
    let page = create(app.clone(), "/api/v1/pages", json!({"name": "Page A"})).await;
    let profile = create(
        app.clone(),
        "/api/v1/profiles",
        json!({"name": "Alice", "page_ids": [page["id"]]}),
    )
    .await;

    let response = delete(
        app.clone(),
        &format!("/api/v1/profiles/{}", profile["id"].as_str().unwrap()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let page = body_json(
        get(app, &format!("/api/v1/pages/{}", page["id"].as_str().unwrap())).await,
    )
    .await;
    assert!(page["profile_ids"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn project_chatbot_claim_is_visible_in_business_manager() {
    let app = build_test_app(test_store());
    let bm = create(
        app.clone(),
        "/api/v1/business-managers",
        json!({"name": "BM", "apps": [{"id": "app-1", "name": "Bot"}]}),
    )
    .await;
    let bm_id = bm["id"].as_str().unwrap();

    let project = create(
        app.clone(),
        "/api/v1/projects",
        json!({"name": "Proj", "chatbot_id": "app-1"}),
    )
    .await;

    let bm = body_json(get(app, &format!("/api/v1/business-managers/{bm_id}")).await).await;
    let project_ids = bm["apps"][0]["project_ids"].as_array().unwrap();
    assert_eq!(project_ids[0], project["id"]);
}

#[tokio::test]
async fn business_manager_save_reasserts_app_ownership() {
    let app = build_test_app(test_store());
    let bm = create(
        app.clone(),
        "/api/v1/business-managers",
        json!({"name": "BM", "apps": [{"id": "app-1", "name": "Bot"}]}),
    )
    .await;
    let bm_id = bm["id"].as_str().unwrap();

    let p1 = create(
        app.clone(),
        "/api/v1/projects",
        json!({"name": "Proj 1", "chatbot_id": "app-1"}),
    )
    .await;
    let p2 = create(
        app.clone(),
        "/api/v1/projects",
        json!({"name": "Proj 2", "chatbot_id": "app-1"}),
    )
    .await;

    // The app-side save lists only p2; p1 loses its chatbot link.
    put_json(
        app.clone(),
        &format!("/api/v1/business-managers/{bm_id}"),
        json!({"name": "BM", "apps": [{"id": "app-1", "name": "Bot", "project_ids": [p2["id"]]}]}),
    )
    .await;

    let p1 = body_json(
        get(app.clone(), &format!("/api/v1/projects/{}", p1["id"].as_str().unwrap())).await,
    )
    .await;
    let p2 = body_json(
        get(app, &format!("/api/v1/projects/{}", p2["id"].as_str().unwrap())).await,
    )
    .await;
    assert!(p1["chatbot_id"].is_null());
    assert_eq!(p2["chatbot_id"], "app-1");
}

#[tokio::test]
async fn bulk_profile_upsert_syncs_pages() {
    let app = build_test_app(test_store());
    let page = create(app.clone(), "/api/v1/pages", json!({"name": "Page A"})).await;
    let page_id = page["id"].as_str().unwrap();

    let response = post_json(
        app.clone(),
        "/api/v1/profiles/bulk",
        json!([
            {"name": "Alice", "page_ids": [page_id]},
            {"name": "Bob", "page_ids": [page_id]}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_json(get(app, &format!("/api/v1/pages/{page_id}")).await).await;
    assert_eq!(page["profile_ids"].as_array().unwrap().len(), 2);
}
