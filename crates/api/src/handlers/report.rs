//! Handler for `GET /reports/summary`.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use gestora_core::error::CoreError;
use gestora_core::report::{
    summarize, DateRange, Metric, ReportInput, ReportRequest, ReportSummary, DEFAULT_TOP_LIMIT,
    MAX_TOP_LIMIT,
};
use gestora_events::SnapshotSource;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the summary.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Comma-separated metric names. Omitted means every metric.
    pub metrics: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Ranking size, clamped to `1..=100`. Defaults to 5.
    pub limit: Option<usize>,
}

impl ReportQuery {
    /// Validate and convert into a [`ReportRequest`].
    pub fn into_request(self) -> Result<ReportRequest, CoreError> {
        let metrics = match self.metrics.as_deref() {
            Some(raw) => {
                let parsed = Metric::parse_list(raw)?;
                (!parsed.is_empty()).then_some(parsed)
            }
            None => None,
        };

        let date_range = match (self.start_date, self.end_date) {
            (None, None) => None,
            (start_date, end_date) => {
                let range = DateRange {
                    start_date,
                    end_date,
                };
                range.validate()?;
                Some(range)
            }
        };

        let top_limit = self
            .limit
            .unwrap_or(DEFAULT_TOP_LIMIT)
            .clamp(1, MAX_TOP_LIMIT);

        Ok(ReportRequest {
            metrics,
            date_range,
            top_limit,
        })
    }
}

/// GET /api/v1/reports/summary
///
/// Fetches the raw collections and aggregates them. A source failure fails
/// the request; malformed rows are skipped by the aggregation itself.
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<Json<DataResponse<ReportSummary>>> {
    let request = params.into_request()?;
    let source: &dyn SnapshotSource = state.source.as_ref();

    let (orders, order_items, products, clients, inventory) = tokio::try_join!(
        source.orders(),
        source.order_items(),
        source.products(),
        source.clients(),
        source.inventory(),
    )?;

    let input = ReportInput {
        orders: &orders,
        order_items: &order_items,
        products: &products,
        clients: &clients,
        inventory: &inventory,
    };
    let summary = summarize(&input, &request, Utc::now(), state.config.report_utc_offset);

    Ok(Json(DataResponse { data: summary }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_query_requests_everything() {
        let request = ReportQuery::default().into_request().unwrap();
        assert!(request.metrics.is_none());
        assert!(request.date_range.is_none());
        assert_eq!(request.top_limit, DEFAULT_TOP_LIMIT);
    }

    #[test]
    fn metrics_are_parsed_from_csv() {
        let query = ReportQuery {
            metrics: Some("sales, top_clients".into()),
            ..Default::default()
        };
        let request = query.into_request().unwrap();
        assert_eq!(request.metrics, Some(vec![Metric::Sales, Metric::TopClients]));
    }

    #[test]
    fn unknown_metric_is_rejected() {
        let query = ReportQuery {
            metrics: Some("sales,profit".into()),
            ..Default::default()
        };
        assert_matches!(query.into_request(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let query = ReportQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..Default::default()
        };
        assert_matches!(query.into_request(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn limit_is_clamped() {
        let query = ReportQuery {
            limit: Some(1_000),
            ..Default::default()
        };
        assert_eq!(query.into_request().unwrap().top_limit, MAX_TOP_LIMIT);

        let query = ReportQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(query.into_request().unwrap().top_limit, 1);
    }
}
