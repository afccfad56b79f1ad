//! Performance metrics and cache administration handlers.

use axum::{extract::State, Json};

use crate::{
    handlers::AppError,
    models::{ClearCacheResponse, MetricsResponse},
    state::AppState,
};

/// Fetch latency statistics and cache backend stats
/// (GET /api/performance-metrics).
///
/// Both sides are best-effort: a failing backend yields empty defaults, not
/// an error response.
pub async fn performance_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let (metrics, cache_stats) = state.students.performance_metrics().await;

    Json(MetricsResponse {
        success: true,
        metrics,
        cache_stats,
    })
}

/// Manually clear every cached student listing (POST /api/cache/clear).
pub async fn clear_cache(
    State(state): State<AppState>,
) -> Result<Json<ClearCacheResponse>, AppError> {
    let deleted = state.students.clear_cache().await?;

    Ok(Json(ClearCacheResponse {
        success: true,
        message: format!("Cache cleared: {deleted} entries removed"),
        deleted,
    }))
}
