use axum::{
    extract::{MatchedPath, Request},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::{future::Future, sync::Arc, time::Instant};
use tracing::{error, info, instrument, warn, Instrument};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use super::Metrics;

/// Opens a server span per request and records HTTP metrics on completion
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();

    // Matched route when available, raw path otherwise. Never the query string.
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let user_agent = header_value(request.headers(), "user-agent").unwrap_or("unknown").to_string();
    let client_ip = client_ip(request.headers());

    let span_name = format!("{} {}", method, endpoint);
    let span = tracing::info_span!(
        target: "laserstudio_api::http",
        "{}", span_name,
        otel.name = %span_name,
        otel.kind = "server",
        http.method = %method,
        http.route = %endpoint,
        http.user_agent = %user_agent,
        client.address = %client_ip,
        http.status_code = tracing::field::Empty,
        http.response_time_ms = tracing::field::Empty,
    );

    async move {
        metrics.increment_in_flight(&method, &endpoint);

        let trace_id = tracing::Span::current()
            .context()
            .span()
            .span_context()
            .trace_id()
            .to_string();

        info!(trace_id = %trace_id, method = %method, path = %endpoint, client_ip = %client_ip, "Processing request");

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status_code = response.status().as_u16();

        let current_span = tracing::Span::current();
        current_span.record("http.status_code", status_code);
        current_span.record("http.response_time_ms", duration.as_millis() as u64);
        if status_code >= 500 {
            current_span
                .context()
                .span()
                .set_status(opentelemetry::trace::Status::error("HTTP server error"));
        }

        metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
        metrics.decrement_in_flight(&method, &endpoint);

        let duration_ms = duration.as_millis();
        if status_code >= 500 {
            error!(trace_id = %trace_id, method = %method, path = %endpoint, status_code, duration_ms, "Request failed");
        } else if status_code >= 400 {
            warn!(trace_id = %trace_id, method = %method, path = %endpoint, status_code, duration_ms, "Request rejected");
        } else {
            info!(trace_id = %trace_id, method = %method, path = %endpoint, status_code, duration_ms, "Request completed");
        }

        response
    }
    .instrument(span)
    .await
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// First address of X-Forwarded-For, then X-Real-IP
pub(crate) fn client_ip(headers: &HeaderMap) -> String {
    header_value(headers, "x-forwarded-for")
        .and_then(|value| value.split(',').next())
        .or_else(|| header_value(headers, "x-real-ip"))
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Wraps document store calls with a span and database metrics
#[derive(Clone)]
pub struct DatabaseTracingMiddleware {
    metrics: Arc<Metrics>,
}

impl DatabaseTracingMiddleware {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    #[instrument(skip_all, fields(operation = %operation, collection = %collection))]
    pub async fn trace_operation<F, T, E>(
        &self,
        operation: &str,
        collection: &str,
        future: F,
    ) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let start_time = Instant::now();
        let result = future.await;
        let elapsed = start_time.elapsed();

        self.metrics.record_database_operation(
            operation,
            collection,
            result.is_ok(),
            elapsed.as_secs_f64(),
        );

        match &result {
            Ok(_) => info!(duration_ms = elapsed.as_millis(), "Database operation completed"),
            Err(error) => error!(error = %error, duration_ms = elapsed.as_millis(), "Database operation failed"),
        }

        result
    }
}
