//! Backend call metrics.
//!
//! Every call is recorded in `db_query_duration_seconds`, labelled by
//! database, table and operation. Failures also bump `db_query_errors_total`.

use metrics::{counter, histogram};
use std::time::Instant;

use crate::error::DataError;
use crate::transport::{Operation, Request};

/// Record one backend call's duration.
pub fn record_query_duration(
    database: &'static str,
    table: &str,
    operation: Operation,
    duration_secs: f64,
) {
    histogram!(
        "db_query_duration_seconds",
        "database" => database,
        "table" => table.to_string(),
        "operation" => operation.as_str()
    )
    .record(duration_secs);
}

/// Times one backend call and records its outcome.
///
/// Usage:
/// ```ignore
/// let timer = QueryTimer::new("main", &request);
/// let result = transport.execute(request).await;
/// timer.record(&result);
/// ```
pub struct QueryTimer {
    database: &'static str,
    table: String,
    operation: Operation,
    start: Instant,
}

impl QueryTimer {
    pub fn new(database: &'static str, request: &Request) -> Self {
        Self {
            database,
            table: request.table.clone(),
            operation: request.operation,
            start: Instant::now(),
        }
    }

    pub fn record<T>(self, result: &Result<Vec<T>, DataError>) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(self.database, &self.table, self.operation, duration);

        match result {
            Ok(rows) => tracing::debug!(
                database = self.database,
                table = %self.table,
                operation = self.operation.as_str(),
                rows = rows.len(),
                duration_ms = duration * 1000.0,
                "Backend call completed"
            ),
            Err(e) => {
                counter!(
                    "db_query_errors_total",
                    "database" => self.database,
                    "table" => self.table.clone(),
                    "operation" => self.operation.as_str()
                )
                .increment(1);
                tracing::warn!(
                    database = self.database,
                    table = %self.table,
                    operation = self.operation.as_str(),
                    error = %e,
                    "Backend call failed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[test]
    fn test_query_timer_captures_request() {
        let request = Request::new("news", Operation::Update);
        let timer = QueryTimer::new("main", &request);
        assert_eq!(timer.table, "news");
        assert_eq!(timer.operation, Operation::Update);
        assert_eq!(timer.database, "main");
    }

    #[test]
    fn test_record_emits_duration_and_errors() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();

        metrics::with_local_recorder(&recorder, || {
            let request = Request::new("rules", Operation::Select);
            QueryTimer::new("main", &request).record::<()>(&Ok(Vec::new()));

            let request = Request::new("rules", Operation::Upsert);
            QueryTimer::new("main", &request)
                .record::<()>(&Err(DataError::NotConfigured));
        });

        let output = handle.render();
        assert!(output.contains("db_query_duration_seconds"));
        assert!(output.contains(r#"operation="select""#));
        assert!(output.contains("db_query_errors_total"));
        assert!(output.contains(r#"operation="upsert""#));
    }
}
