//! Integration tests for bill routes and the enrichment refresh.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use common::{
    body_json, build_test_app, build_test_app_with_source, full_bill_record, get, post_empty,
    post_json, seed_bill, MockBillSource,
};

#[sqlx::test(migrations = "../db/migrations")]
async fn register_and_fetch_bill(pool: PgPool) {
    let app = build_test_app(pool);

    // Source defaults to propublica when omitted.
    let response = post_json(app.clone(), "/v1/bills", json!({ "id": "hr1-115" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(app.clone(), "/v1/bills/hr1-115").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], "hr1-115");
    assert_eq!(body["source"], "propublica");
    // Display fields start empty until a refresh fills them.
    assert_eq!(body["title"], "");
    assert_eq!(body["number"], 0);

    // An unrecognized source tag is rejected at registration.
    let response = post_json(
        app.clone(),
        "/v1/bills",
        json!({ "id": "x1-1", "source": "openstates" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/v1/bills/nope-0").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_overwrites_display_fields_and_persists(pool: PgPool) {
    let id = seed_bill(&pool, "hr1-115", "propublica").await;
    let source = MockBillSource::returning(json!({
        "title": "Tax Cuts and Jobs Act",
        "short_title": "TCJA",
        "summary_short": "Amends the Internal Revenue Code.",
        "number": 1,
        "bill_type": "hr",
        "congress_url": "https://congress.example/hr1",
        "govtrack_url": null,
    }));
    let app = build_test_app_with_source(pool, source.clone());

    let response = post_empty(app.clone(), &format!("/v1/bills/{id}/refresh")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.fetch_count(), 1);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Tax Cuts and Jobs Act");
    assert_eq!(body["short_title"], "TCJA");
    assert_eq!(body["short_summary"], "Amends the Internal Revenue Code.");
    assert_eq!(body["number"], 1);
    assert_eq!(body["b_type"], "hr");
    assert_eq!(body["congress_url"], "https://congress.example/hr1");
    assert!(body["govtrack_url"].is_null());

    // The overwrite is persisted, not just reflected in the response.
    let body = body_json(get(app, &format!("/v1/bills/{id}")).await).await;
    assert_eq!(body["title"], "Tax Cuts and Jobs Act");
    assert_eq!(body["number"], 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_accepts_an_inline_record(pool: PgPool) {
    let id = seed_bill(&pool, "s42-116", "propublica").await;
    let source = MockBillSource::returning(full_bill_record());
    let app = build_test_app_with_source(pool, source.clone());

    let mut record = full_bill_record();
    record["title"] = json!("Inline Title");
    let response = post_json(app, &format!("/v1/bills/{id}/refresh"), record).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Inline Title");
    // The record came from the request body; nothing was fetched.
    assert_eq!(source.fetch_count(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_of_sunlight_bill_is_a_no_op(pool: PgPool) {
    let id = seed_bill(&pool, "hr9-110", "sunlight").await;
    sqlx::query("UPDATE bills SET title = 'Archived Title' WHERE id = $1")
        .bind(&id)
        .execute(&pool)
        .await
        .unwrap();
    let source = MockBillSource::returning(full_bill_record());
    let app = build_test_app_with_source(pool, source.clone());

    let response = post_empty(app.clone(), &format!("/v1/bills/{id}/refresh")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // No fetch, no write: the archived row comes back unchanged.
    assert_eq!(source.fetch_count(), 0);
    let body = body_json(response).await;
    assert_eq!(body["title"], "Archived Title");

    let body = body_json(get(app, &format!("/v1/bills/{id}")).await).await;
    assert_eq!(body["title"], "Archived Title");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_with_incomplete_record_leaves_row_untouched(pool: PgPool) {
    let id = seed_bill(&pool, "hr7-115", "propublica").await;
    let mut record = full_bill_record();
    record.as_object_mut().unwrap().remove("number");
    let app = build_test_app_with_source(pool, MockBillSource::returning(record));

    let response = post_empty(app.clone(), &format!("/v1/bills/{id}/refresh")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "MALFORMED_EXTERNAL_RECORD");

    // The failed refresh wrote nothing.
    let body = body_json(get(app, &format!("/v1/bills/{id}")).await).await;
    assert_eq!(body["title"], "");
    assert_eq!(body["number"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn refresh_surfaces_lookup_failures(pool: PgPool) {
    let id = seed_bill(&pool, "hr3-114", "propublica").await;
    let app = build_test_app_with_source(pool, MockBillSource::failing());

    let response = post_empty(app, &format!("/v1/bills/{id}/refresh")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = body_json(response).await;
    assert_eq!(body["code"], "EXTERNAL_LOOKUP_FAILED");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn meta_returns_live_record_without_persisting(pool: PgPool) {
    let id = seed_bill(&pool, "hr2-115", "propublica").await;
    let source = MockBillSource::returning(full_bill_record());
    let app = build_test_app_with_source(pool, source.clone());

    let response = get(app.clone(), &format!("/v1/bills/{id}/meta")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.fetch_count(), 1);

    let body = body_json(response).await;
    assert_eq!(body["title"], "A");

    // Meta is read-only: the stored row keeps its empty fields.
    let body = body_json(get(app, &format!("/v1/bills/{id}")).await).await;
    assert_eq!(body["title"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn meta_for_sunlight_bill_is_empty_and_fetchless(pool: PgPool) {
    let id = seed_bill(&pool, "hr9-110", "sunlight").await;
    let source = MockBillSource::returning(full_bill_record());
    let app = build_test_app_with_source(pool, source.clone());

    let response = get(app, &format!("/v1/bills/{id}/meta")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(source.fetch_count(), 0);

    let body = body_json(response).await;
    assert_eq!(body, json!({}));
}
