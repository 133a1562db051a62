//! Integration tests for the HTTP API endpoints.
//!
//! Uses axum's oneshot pattern (via tower::ServiceExt), no TCP binding needed.
//! The draw history is a small inline feed parsed through the real ingestion path.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use loto::ingest::{current_rules, parse_draws};
use loto::search::SearchConfig;
use loto::server::{create_router, ServerContext};

const FEED: &str = "\
date_de_tirage;combinaison_gagnante_en_ordre_croissant;rapport_du_rang1;rapport_du_rang2;rapport_du_rang3;rapport_du_rang4;rapport_du_rang5;rapport_du_rang6;rapport_du_rang7;rapport_du_rang8;rapport_du_rang9
04/11/2019;1-2-3-4-5+1;100;50;40;30;20;15;10;5;2,2
02/11/2019;1-2-10-11-12+3;NA;NA;NA;NA;NA;NA;NA;10;2,2
30/10/2019;20-21-22-23-24+7;2000000;100000;1000;500;50;20;10;5;2,2
04/03/2017;1-2-3-4-5+1;2000000;0;1000;500;50;20;10;5;2,2
";

fn app_with(feed: &str) -> axum::Router {
    let all_draws = parse_draws(feed, None).unwrap();
    create_router(Arc::new(ServerContext {
        draws: Arc::new(current_rules(&all_draws)),
        all_draws: Arc::new(all_draws),
        search: SearchConfig::default(),
    }))
}

fn app() -> axum::Router {
    app_with(FEED)
}

/// Parse response body as JSON.
async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(path)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

// ── GET /health ──────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_200() {
    let resp = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["status"], "OK");
}

// ── GET /draws ───────────────────────────────────────────────────────

#[tokio::test]
async fn draws_excludes_pre_2017_rules() {
    let resp = app()
        .oneshot(Request::get("/draws").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["count"], 3);
    let first = &json["draws"][0];
    assert_eq!(first["date"], "04/11/2019");
    assert_eq!(first["numbers"], serde_json::json!([1, 2, 3, 4, 5]));
    assert_eq!(first["chance"], 1);
    assert_eq!(first["mask_low"], 0x1F);
    assert_eq!(first["mask_high"], 0);
}

#[tokio::test]
async fn draws_all_includes_pre_2017_rows() {
    let resp = app()
        .oneshot(Request::get("/draws?all=true").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["count"], 4);
    assert_eq!(json["draws"][3]["date"], "04/03/2017");
}

// ── POST /evaluate ───────────────────────────────────────────────────

#[tokio::test]
async fn evaluate_jackpot_ticket() {
    let resp = app()
        .oneshot(post_json(
            "/evaluate",
            serde_json::json!({ "numbers": [1, 2, 3, 4, 5], "lucky_number": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    // Default sort: newest first.
    assert_eq!(results[0]["date"], "04/11/2019");
    assert_eq!(results[0]["match_count"], 5);
    assert_eq!(results[0]["lucky_match"], true);
    assert_eq!(results[0]["payout"], 100.0);
    assert_eq!(results[1]["match_count"], 2);
    assert_eq!(results[1]["payout"], 10.0);
    assert_eq!(results[2]["payout"], 0.0);

    let summary = &json["summary"];
    assert_eq!(summary["total_won"], 110.0);
    assert_eq!(summary["games_won"], 2);
    let spent = summary["total_spent"].as_f64().unwrap();
    assert!((spent - 3.0 * 2.2).abs() < 1e-9);
    assert_eq!(json["sort_column"], "date");
    assert_eq!(json["sort_order"], "desc");
}

#[tokio::test]
async fn evaluate_sorted_by_gain() {
    let resp = app()
        .oneshot(post_json(
            "/evaluate",
            serde_json::json!({
                "numbers": [1, 2, 3, 4, 5],
                "lucky_number": 1,
                "sort_column": "Gain",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["sort_column"], "gain");
    assert_eq!(json["sort_order"], "desc");
    let payouts: Vec<f64> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["payout"].as_f64().unwrap())
        .collect();
    assert_eq!(payouts, vec![100.0, 10.0, 0.0]);
}

#[tokio::test]
async fn evaluate_rejects_invalid_tickets() {
    for body in [
        serde_json::json!({ "numbers": [1, 2, 3, 4], "lucky_number": 1 }),
        serde_json::json!({ "numbers": [1, 2, 3, 4, 50], "lucky_number": 1 }),
        serde_json::json!({ "numbers": [1, 2, 3, 4, 4], "lucky_number": 1 }),
        serde_json::json!({ "numbers": [1, 2, 3, 4, 5], "lucky_number": 0 }),
    ] {
        let resp = app().oneshot(post_json("/evaluate", body.clone())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body {body}");
        let json = body_json(resp.into_body()).await;
        assert!(json["error"].is_string());
    }
}

// ── POST /search ─────────────────────────────────────────────────────

#[tokio::test]
async fn search_zero_attempts_not_found() {
    let resp = app()
        .oneshot(post_json("/search", serde_json::json!({ "max_attempts": 0 })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["outcome"]["status"], "not_found");
    assert_eq!(json["outcome"]["attempts"], 0);
    assert_eq!(
        json["message"],
        "No profitable ticket found after 0 attempts."
    );
    assert!(json["summary"].is_null());
}

#[tokio::test]
async fn search_empty_history_not_found() {
    let header = FEED.lines().next().unwrap();
    let resp = app_with(header)
        .oneshot(post_json(
            "/search",
            serde_json::json!({ "max_attempts": 300, "batch_size": 100, "seed": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["outcome"]["status"], "not_found");
    assert_eq!(json["outcome"]["attempts"], 300);
}

#[tokio::test]
async fn search_finds_profitable_ticket_on_generous_history() {
    // One draw paying 2,000,000 for every rank: almost any hit is profitable.
    let feed = "\
date_de_tirage;combinaison_gagnante_en_ordre_croissant;rapport_du_rang1;rapport_du_rang2;rapport_du_rang3;rapport_du_rang4;rapport_du_rang5;rapport_du_rang6;rapport_du_rang7;rapport_du_rang8;rapport_du_rang9
01/01/2020;1-2-3-4-5+1;2000000;2000000;2000000;2000000;2000000;2000000;2000000;2000000;2000000
";
    let resp = app_with(feed)
        .oneshot(post_json("/search", serde_json::json!({ "seed": 42 })))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let json = body_json(resp.into_body()).await;
    assert_eq!(json["outcome"]["status"], "found");
    let attempts = json["outcome"]["attempts"].as_u64().unwrap();
    assert!(attempts >= 1 && attempts <= 20_000);
    assert!(json["summary"]["net_result"].as_f64().unwrap() > 0.0);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains(&attempts.to_string()));
}

#[tokio::test]
async fn search_rejects_excessive_attempts() {
    let resp = app()
        .oneshot(post_json(
            "/search",
            serde_json::json!({ "max_attempts": 2_000_000 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_rejects_batches_that_never_yield() {
    let resp = app()
        .oneshot(post_json(
            "/search",
            serde_json::json!({ "max_attempts": 200_000, "batch_size": 1_000_000 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json = body_json(resp.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("batch_size"));
}

#[tokio::test]
async fn search_accepts_largest_batch() {
    let resp = app()
        .oneshot(post_json(
            "/search",
            serde_json::json!({ "max_attempts": 0, "batch_size": 10_000 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
