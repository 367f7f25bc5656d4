//! Prometheus export and per-request catalog metrics.
//!
//! Requests are labelled by the catalog resource they touch (`series`,
//! `season`, `episode`, `system`) and the operation performed, derived from
//! the matched route template so label cardinality stays bounded.

use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::api::AppState;

pub async fn get_metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RouteLabels {
    resource: &'static str,
    operation: &'static str,
}

const UNMATCHED: RouteLabels = RouteLabels {
    resource: "unmatched",
    operation: "none",
};

fn resource_name(segment: &str) -> Option<&'static str> {
    match segment {
        "series" => Some("series"),
        "seasons" => Some("season"),
        "episodes" => Some("episode"),
        "system" | "metrics" => Some("system"),
        _ => None,
    }
}

fn route_labels(method: &Method, route: &str) -> RouteLabels {
    let segments: Vec<&str> = route
        .trim_start_matches("/api")
        .trim_start_matches('/')
        .split('/')
        .collect();
    let last = segments.last().copied().unwrap_or_default();

    let Some(resource) = segments.iter().rev().find_map(|s| resource_name(s)) else {
        return UNMATCHED;
    };

    let operation = match (method.as_str(), last) {
        (_, "cover" | "video") => "upload",
        ("POST", _) => "create",
        ("PUT", _) => "update",
        ("DELETE", _) => "delete",
        _ if resource == "system" => "check",
        _ if last.starts_with('{') => "read",
        // `/episodes/{id}/series` resolves a single parent.
        ("GET", "series") if segments.len() > 1 => "read",
        _ => "list",
    };

    RouteLabels {
        resource,
        operation,
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let labels = route
        .as_deref()
        .map_or(UNMATCHED, |route| route_labels(&method, route));

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %req.uri().path(),
        resource = labels.resource,
        operation = labels.operation,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();

        metrics::counter!(
            "catalog_api_requests_total",
            "resource" => labels.resource,
            "operation" => labels.operation,
            "status" => status.as_u16().to_string(),
        )
        .increment(1);
        metrics::histogram!(
            "catalog_api_request_duration_seconds",
            "resource" => labels.resource,
            "operation" => labels.operation,
        )
        .record(elapsed.as_secs_f64());

        info!(
            event = "catalog_request_finished",
            duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            status_code = status.as_u16(),
            rejected = status.is_client_error(),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(method: Method, route: &str) -> (&'static str, &'static str) {
        let labels = route_labels(&method, route);
        (labels.resource, labels.operation)
    }

    #[test]
    fn test_collection_routes() {
        assert_eq!(labels(Method::GET, "/api/series"), ("series", "list"));
        assert_eq!(labels(Method::POST, "/api/series"), ("series", "create"));
        assert_eq!(
            labels(Method::GET, "/api/series/{id}/seasons"),
            ("season", "list")
        );
        assert_eq!(
            labels(Method::POST, "/api/seasons/{id}/episodes"),
            ("episode", "create")
        );
    }

    #[test]
    fn test_item_routes() {
        assert_eq!(labels(Method::GET, "/api/seasons/{id}"), ("season", "read"));
        assert_eq!(
            labels(Method::GET, "/api/series/slug/{slug}"),
            ("series", "read")
        );
        assert_eq!(
            labels(Method::GET, "/api/episodes/{id}/series"),
            ("series", "read")
        );
        assert_eq!(
            labels(Method::DELETE, "/api/episodes/{id}"),
            ("episode", "delete")
        );
    }

    #[test]
    fn test_upload_routes() {
        assert_eq!(
            labels(Method::PUT, "/api/episodes/{id}/video"),
            ("episode", "upload")
        );
        assert_eq!(
            labels(Method::PUT, "/api/series/{id}/cover"),
            ("series", "upload")
        );
    }

    #[test]
    fn test_system_and_unknown_routes() {
        assert_eq!(
            labels(Method::GET, "/api/system/health/live"),
            ("system", "check")
        );
        assert_eq!(labels(Method::GET, "/api/metrics"), ("system", "check"));
        assert_eq!(route_labels(&Method::GET, "/api/unknown"), UNMATCHED);
    }
}
