use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{summarize, Matcher};
use crate::models::{
    BatchMatchRequest, BatchMatchResponse, ErrorResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse, Profile, ProfileError, ProfileRecord, ScorePairRequest,
};

/// Default cap on profiles per batch request
pub const DEFAULT_MAX_BATCH_SIZE: usize = 500;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            matcher,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/score", web::post().to(score_pair))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/batch", web::post().to(batch_match));
}

fn invalid_profile(e: ProfileError) -> HttpResponse {
    tracing::info!("Rejected malformed profile record: {}", e);
    HttpResponse::BadRequest().json(ErrorResponse::new(400, "Invalid profile", e.to_string()))
}

fn to_profiles(records: Vec<ProfileRecord>) -> Result<Vec<Profile>, ProfileError> {
    records.into_iter().map(Profile::try_from).collect()
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Evaluate one pair
///
/// POST /api/v1/matches/score
///
/// Request body:
/// ```json
/// {
///   "profileA": { "userId": "U001", "orientation": "T", ... },
///   "profileB": { "userId": "U002", "orientation": "P", ... }
/// }
/// ```
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    let ScorePairRequest {
        profile_a,
        profile_b,
    } = req.into_inner();

    let (a, b) = match (Profile::try_from(profile_a), Profile::try_from(profile_b)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(e), _) | (_, Err(e)) => return invalid_profile(e),
    };

    let evaluation = state.matcher.evaluate_pair(&a, &b);

    tracing::info!(
        "Scored pair {} / {}: passed={}, score={:.2}",
        evaluation.user1_id,
        evaluation.user2_id,
        evaluation.passed_hard_conditions,
        evaluation.score
    );

    HttpResponse::Ok().json(evaluation)
}

/// Rank candidates for a target profile
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "target": { "userId": "U001", ... },
///   "candidates": [{ "userId": "U002", ... }],
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Validation failed",
            errors.to_string(),
        ));
    }

    let FindMatchesRequest {
        target,
        candidates,
        limit,
    } = req.into_inner();

    if candidates.len() > state.max_batch_size {
        return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(
            413,
            "Too many candidates",
            format!("at most {} candidates per request", state.max_batch_size),
        ));
    }

    let target = match Profile::try_from(target) {
        Ok(profile) => profile,
        Err(e) => return invalid_profile(e),
    };
    let candidates = match to_profiles(candidates) {
        Ok(profiles) => profiles,
        Err(e) => return invalid_profile(e),
    };

    tracing::info!(
        "Finding matches for user: {}, candidates: {}, limit: {}",
        target.user_id,
        candidates.len(),
        limit
    );

    let result = state
        .matcher
        .find_best_matches(&target, &candidates, limit as usize);

    HttpResponse::Ok().json(FindMatchesResponse {
        matches: result.matches,
        total_candidates: result.total_candidates,
    })
}

/// Evaluate every pair in a collection
///
/// POST /api/v1/matches/batch
///
/// Request body:
/// ```json
/// { "profiles": [{ "userId": "U001", ... }, { "userId": "U002", ... }] }
/// ```
async fn batch_match(
    state: web::Data<AppState>,
    req: web::Json<BatchMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Validation failed",
            errors.to_string(),
        ));
    }

    let records = req.into_inner().profiles;
    if records.len() > state.max_batch_size {
        return HttpResponse::PayloadTooLarge().json(ErrorResponse::new(
            413,
            "Batch too large",
            format!("at most {} profiles per batch", state.max_batch_size),
        ));
    }

    let profiles = match to_profiles(records) {
        Ok(profiles) => profiles,
        Err(e) => return invalid_profile(e),
    };

    let matcher = state.matcher.clone();
    // Pairwise evaluation is CPU bound; keep it off the async workers
    let outcome = web::block(move || {
        let results = matcher.batch_match(&profiles);
        let summary = summarize(&profiles, &results);
        (results, summary)
    })
    .await;

    match outcome {
        Ok((results, summary)) => {
            tracing::info!(
                "Batch of {} profiles: {} pairs, {} passed hard filter",
                summary.total_profiles,
                summary.total_pairs,
                summary.hard_filter_passed
            );
            HttpResponse::Ok().json(BatchMatchResponse { results, summary })
        }
        Err(e) => {
            tracing::error!("Batch evaluation failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Batch evaluation failed",
                e.to_string(),
            ))
        }
    }
}
