//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, EstimateResponse, MonthRangeQuery};
use crate::market::PriceSeries;
use crate::projection::{ProjectionPoint, RevenuePoint};

/// `GET /estimate` → 200 + `EstimateResponse` JSON
pub async fn get_estimate(State(state): State<Arc<AppState>>) -> Json<EstimateResponse> {
    let report = &state.report;
    Json(EstimateResponse {
        estimate: report.estimate.clone(),
        stats: report.stats.clone(),
        horizon_months: report.horizon_months(),
        total_base_revenue: report.total_base_revenue(),
    })
}

/// `GET /history` → 200 + array of `{date, price}`
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<PriceSeries> {
    Json(state.report.history.clone())
}

/// `GET /projection` → 200 + array of `ProjectionPoint`
pub async fn get_projection(State(state): State<Arc<AppState>>) -> Json<Vec<ProjectionPoint>> {
    Json(state.report.projection.clone())
}

/// Returns revenue rows, optionally filtered by month range.
///
/// `GET /revenue` → 200 + `Vec<RevenuePoint>` JSON
/// `GET /revenue?from=N&to=M` → filtered range (inclusive)
/// `GET /revenue?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_revenue(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MonthRangeQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(1);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let rows: Vec<RevenuePoint> = state
        .report
        .revenue
        .iter()
        .filter(|r| r.month >= from && r.month <= to)
        .copied()
        .collect();

    Ok(Json(rows))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::market::PricePoint;
    use crate::pipeline::{Pipeline, projection_rng};

    fn make_test_state() -> Arc<AppState> {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let history: PriceSeries = [60.0, 62.0, 64.0]
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint {
                date: date + chrono::Duration::weeks(i as i64),
                price,
            })
            .collect();
        let mut rng = projection_rng(Some(42));
        let report = Pipeline::default()
            .run("Diesel", 1000.0, history, 24, &mut rng)
            .unwrap();
        Arc::new(AppState { report })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn estimate_returns_200() {
        let (status, json) = get_json("/estimate").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["estimate"]["fuel"], "Diesel");
        assert_eq!(json["estimate"]["dge"], 1000.0);
        assert_eq!(json["horizon_months"], 24);
        assert!(json["stats"]["std_dev"].as_f64().is_some());
    }

    #[tokio::test]
    async fn history_returns_all_points() {
        let (status, json) = get_json("/history").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(3));
        assert_eq!(json[0]["date"], "2024-01-01");
    }

    #[tokio::test]
    async fn projection_returns_all_months() {
        let (status, json) = get_json("/projection").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(24));
    }

    #[tokio::test]
    async fn revenue_range_query() {
        let (status, json) = get_json("/revenue?from=5&to=10").await;
        assert_eq!(status, StatusCode::OK);
        let rows = json.as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 6); // months 5..=10
        assert_eq!(rows[0]["month"], 5);
        assert_eq!(rows[5]["month"], 10);
    }

    #[tokio::test]
    async fn revenue_invalid_range_returns_400() {
        let (status, json) = get_json("/revenue?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
