//! Query timing metrics.
//!
//! Every repository operation is wrapped in a [`QueryTimer`] so slow
//! statements show up per query name in the duration histogram.

use metrics::histogram;
use std::time::Instant;

/// Times one database operation and records it on drop-by-hand.
///
/// ```ignore
/// let timer = QueryTimer::new("load_event");
/// let rows = sqlx::query_as::<_, TicketEntity>(...).fetch_all(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    query: &'static str,
    started: Instant,
}

impl QueryTimer {
    /// Starts a timer for the named query. Names are static labels so the
    /// metric cardinality stays bounded.
    pub fn new(query: &'static str) -> Self {
        Self {
            query,
            started: Instant::now(),
        }
    }

    /// Records the elapsed time into the query-duration histogram.
    pub fn record(self) {
        histogram!("database_query_duration_seconds", "query" => self.query)
            .record(self.started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_keeps_query_name() {
        let timer = QueryTimer::new("submit_event");
        assert_eq!(timer.query, "submit_event");
    }

    #[test]
    fn test_record_consumes_timer() {
        // Recording without an installed recorder is a no-op.
        QueryTimer::new("list_events_by_producer").record();
    }
}
