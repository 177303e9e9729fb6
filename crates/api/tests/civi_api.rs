//! Integration tests for civi routes, voting, and response linkage.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, get, get_as, post_json, post_json_as, put_json, seed_category,
    seed_civi, seed_profile, seed_thread,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn create_civi_with_links(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "transit").await;
    let thread = seed_thread(&pool, alice, category, "Buses").await;
    let problem = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/new_civi",
        json!({
            "thread_id": thread,
            "author_id": alice,
            "c_type": "response",
            "title": "More routes",
            "body": "Add cross-town routes",
            "linked_civis": [problem],
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["type"], "response");
    assert_eq!(created["thread"].as_i64(), Some(thread));
    assert_eq!(created["linked_civis"], json!([problem]));
    assert_eq!(created["links"], json!([problem]));
    assert_eq!(created["author"]["username"], "alice");

    // The linked problem now counts one response.
    let body = body_json(get(app, &format!("/civi_data/{problem}")).await).await;
    assert_eq!(body["responses"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_civi_rejects_unknown_type(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "transit").await;
    let thread = seed_thread(&pool, alice, category, "Buses").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/new_civi",
        json!({
            "thread_id": thread,
            "author_id": alice,
            "c_type": "manifesto",
            "title": "t",
            "body": "b",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rate_civi_recomputes_tally_from_latest_votes(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let bob = seed_profile(&pool, "bob").await;
    let category = seed_category(&pool, "energy").await;
    let thread = seed_thread(&pool, alice, category, "Wind").await;
    let civi = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    let response = post_json_as(
        app.clone(),
        "/rate_civi",
        bob,
        json!({ "civi_id": civi, "activity_type": "vote_neg" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["votes"]["votes_neg"], 1);
    assert_eq!(body["score"], -1);

    // Bob changes his mind: the tally tracks only his latest vote.
    let response = post_json_as(
        app.clone(),
        "/rate_civi",
        bob,
        json!({ "civi_id": civi, "activity_type": "vote_verypos" }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["votes"]["votes_neg"], 0);
    assert_eq!(body["votes"]["votes_vtpos"], 1);
    assert_eq!(body["score"], 2);

    // A second account's vote accumulates.
    let response = post_json_as(
        app.clone(),
        "/rate_civi",
        alice,
        json!({ "civi_id": civi, "activity_type": "vote_pos" }),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["votes"]["votes_vtpos"], 1);
    assert_eq!(body["votes"]["votes_pos"], 1);
    assert_eq!(body["score"], 3);

    // Authenticated single-civi reads derive the same score.
    let body = body_json(get_as(app, &format!("/civi_data/{civi}"), bob).await).await;
    assert_eq!(body["score"], 3);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rate_civi_requires_a_known_viewer(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "energy").await;
    let thread = seed_thread(&pool, alice, category, "Wind").await;
    let civi = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    // No viewer header at all.
    let response = post_json(
        app.clone(),
        "/rate_civi",
        json!({ "civi_id": civi, "activity_type": "vote_pos" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // A viewer id that resolves to nothing is equally anonymous.
    let response = post_json_as(
        app,
        "/rate_civi",
        424242,
        json!({ "civi_id": civi, "activity_type": "vote_pos" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn response_data_lists_linked_responses_only(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "water").await;
    let thread = seed_thread(&pool, alice, category, "Rivers").await;
    let problem = seed_civi(&pool, thread, alice, "problem").await;
    let response_civi = seed_civi(&pool, thread, alice, "response").await;
    let rebuttal = seed_civi(&pool, thread, alice, "rebuttal").await;
    // A solution linked to the problem must not appear in response_data.
    let solution = seed_civi(&pool, thread, alice, "solution").await;
    for id in [response_civi, rebuttal, solution] {
        sqlx::query("INSERT INTO civi_links (civi_id, linked_civi_id) VALUES ($1, $2)")
            .bind(id)
            .bind(problem)
            .execute(&pool)
            .await
            .unwrap();
    }
    let app = build_test_app(pool);

    let response = get(app, &format!("/response_data/{thread}/{problem}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&response_civi));
    assert!(ids.contains(&rebuttal));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_civi_removes_row(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "parks").await;
    let thread = seed_thread(&pool, alice, category, "Trees").await;
    let civi = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    let response = post_json(app.clone(), "/delete_civi", json!({ "civi_id": civi })).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/civi_data/{civi}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again reports not found.
    let response = post_json(app, "/delete_civi", json!({ "civi_id": civi })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn upload_images_attaches_metadata(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "housing").await;
    let thread = seed_thread(&pool, alice, category, "Zoning").await;
    let civi = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/upload_images",
        json!({
            "civi_id": civi,
            "title": "zoning map",
            "image_url": "https://img.example/map.png",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["civi"].as_i64(), Some(civi));

    let body = body_json(get(app, &format!("/civi_data/{civi}")).await).await;
    assert_eq!(body["images"], json!(["https://img.example/map.png"]));
    assert_eq!(body["attachments"][0]["title"], "zoning map");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn edit_civi_rejects_unknown_type(pool: PgPool) {
    let alice = seed_profile(&pool, "alice").await;
    let category = seed_category(&pool, "transit").await;
    let thread = seed_thread(&pool, alice, category, "Buses").await;
    let civi = seed_civi(&pool, thread, alice, "problem").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/edit_civi",
        json!({ "civi_id": civi, "c_type": "manifesto" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(
        app.clone(),
        &format!("/v1/civis/{civi}"),
        json!({ "c_type": "manifesto" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The rejected edits wrote nothing.
    let body = body_json(get(app.clone(), &format!("/civi_data/{civi}")).await).await;
    assert_eq!(body["type"], "problem");

    // A known type still goes through.
    let response = post_json(
        app,
        "/edit_civi",
        json!({ "civi_id": civi, "c_type": "cause" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "cause");
}
