// HTTP surface tests

use actix_web::{http::StatusCode, test, web, App};
use kindred_match::core::Matcher;
use kindred_match::models::{BatchMatchResponse, FindMatchesResponse, PairEvaluation};
use kindred_match::routes::{configure_routes, AppState};
use serde_json::{json, Value};

const FIXTURES: &str = include_str!("fixtures_profiles.json");

fn fixtures() -> Vec<Value> {
    serde_json::from_str(FIXTURES).unwrap()
}

fn state(max_batch_size: usize) -> web::Data<AppState> {
    web::Data::new(AppState {
        matcher: Matcher::with_defaults(),
        max_batch_size,
    })
}

macro_rules! service {
    () => {
        service!(100)
    };
    ($max:expr) => {
        test::init_service(App::new().app_data(state($max)).configure(configure_routes)).await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = service!();
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[actix_web::test]
async fn test_score_pair() {
    let app = service!();
    let profiles = fixtures();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .set_json(json!({ "profileA": profiles[0], "profileB": profiles[1] }))
        .to_request();
    let evaluation: PairEvaluation = test::call_and_read_body_json(&app, req).await;

    assert_eq!(evaluation.user1_id, "U001");
    assert_eq!(evaluation.user2_id, "U002");
    assert!(evaluation.passed_hard_conditions);
    assert!(evaluation.rejections.is_empty());
    let details = evaluation.details.unwrap();
    assert!((details.score - evaluation.score).abs() < 1e-9);
}

#[actix_web::test]
async fn test_score_pair_rejected_lists_reasons() {
    let app = service!();
    let profiles = fixtures();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .set_json(json!({ "profileA": profiles[0], "profileB": profiles[2] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["passedHardConditions"], false);
    assert_eq!(body["score"], 0.0);
    assert!(body["details"].is_null());
    let checks: Vec<&str> = body["rejections"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["check"].as_str())
        .collect();
    assert!(checks.contains(&"location"));
}

#[actix_web::test]
async fn test_score_pair_malformed_birth_year() {
    let app = service!();
    let profiles = fixtures();
    let mut broken = profiles[0].clone();
    broken["出生年份"] = json!("nineteen ninety");

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .set_json(json!({ "profileA": broken, "profileB": profiles[1] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid profile");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_score_pair_out_of_range_birth_year() {
    let app = service!();
    let profiles = fixtures();
    let mut broken = profiles[0].clone();
    broken["出生年份"] = json!(i32::MIN);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches/score")
        .set_json(json!({ "profileA": broken.clone(), "profileB": broken }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid profile");
}

#[actix_web::test]
async fn test_find_matches() {
    let app = service!();
    let profiles = fixtures();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({
            "target": profiles[0],
            "candidates": profiles,
            "limit": 5
        }))
        .to_request();
    let body: FindMatchesResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.total_candidates, 3);
    assert_eq!(body.matches.len(), 1);
    assert_eq!(body.matches[0].user_id, "U002");
}

#[actix_web::test]
async fn test_find_matches_requires_candidates() {
    let app = service!();
    let profiles = fixtures();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "target": profiles[0], "candidates": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_find_matches_limit_out_of_range() {
    let app = service!();
    let profiles = fixtures();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/find")
        .set_json(json!({ "target": profiles[0], "candidates": profiles, "limit": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_batch_match() {
    let app = service!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/batch")
        .set_json(json!({ "profiles": fixtures() }))
        .to_request();
    let body: BatchMatchResponse = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.results.len(), 6);
    assert_eq!(body.summary.total_profiles, 4);
    assert_eq!(body.summary.total_pairs, 6);
    assert_eq!(body.summary.hard_filter_passed, 1);

    let top = &body.results[0];
    assert_eq!((top.user1_id.as_str(), top.user2_id.as_str()), ("U001", "U002"));
    assert!(body.results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[actix_web::test]
async fn test_batch_requires_two_profiles() {
    let app = service!();
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/batch")
        .set_json(json!({ "profiles": [fixtures()[0]] }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_batch_too_large() {
    let app = service!(3);
    let req = test::TestRequest::post()
        .uri("/api/v1/matches/batch")
        .set_json(json!({ "profiles": fixtures() }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
