//! Error-based detection: break the query with quote suffixes and look for
//! SQL error text or a telling change in response size.

use crate::core::context::ScanContext;
use crate::core::result::Vulnerability;
use crate::http::response::ResponseSnapshot;
use crate::sqli::InjectionStrategy;
use async_trait::async_trait;

/// Generic SQL error signatures, matched case-insensitively.
const ERROR_SIGNATURES: &[&str] = &[
    "you have an error in your sql syntax",
    "mysql server version for the right syntax",
    "warning: mysql",
    "unclosed quotation mark after the character string",
    "quoted string not properly terminated",
    "sql syntax error",
    "sqlstate",
    "sqlite error",
    "psqlexception",
    "syntax error at or near",
];

const SUFFIXES: &[&str] = &["'", "\"", "')", "\")", "'-- ", "\"-- ", "'))", "\"))"];

pub struct ErrorBased;

#[async_trait]
impl InjectionStrategy for ErrorBased {
    fn name(&self) -> &'static str {
        "Error-based"
    }

    async fn detect(&self, ctx: &ScanContext<'_>, param_index: usize) -> Option<Vulnerability> {
        let param = &ctx.target.parameters()[param_index];

        for suffix in SUFFIXES {
            let payload = format!("{}{}", param.value, suffix);
            let spec = ctx.target.to_injected_request(param_index, &payload);
            let resp = ctx.transport.send(&spec).await;

            if has_sql_error(ctx.baseline, &resp) {
                let evidence = format!(
                    "Error-based SQL injection detected.\n\
                     Parameter: {}\n\
                     Payload : {}\n\
                     Reason  : SQL error pattern found in response.",
                    param.name, payload
                );

                return Some(Vulnerability {
                    parameter: param.clone(),
                    parameter_index: param_index,
                    strategy: self.name().to_string(),
                    payload,
                    evidence,
                });
            }
        }

        None
    }
}

fn has_sql_error(baseline: &ResponseSnapshot, test: &ResponseSnapshot) -> bool {
    let Some(body) = test.body.as_deref() else {
        return false;
    };

    let lower = body.to_lowercase();
    if ERROR_SIGNATURES.iter().any(|sig| lower.contains(sig)) {
        return true;
    }

    // No explicit error text: fall back to response-size heuristics. A
    // shrink beyond 5% of baseline usually means content was dropped by a
    // broken query; growth only counts past 30%.
    let base_len = baseline.body_len();
    let test_len = test.body_len();
    let diff = base_len.abs_diff(test_len);

    if base_len > 0 && diff as f64 > base_len as f64 * 0.05 {
        if test_len < base_len {
            return true;
        }
        return diff as f64 > base_len as f64 * 0.30;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(len: usize) -> ResponseSnapshot {
        ResponseSnapshot::new(200, Some("x".repeat(len)), 10)
    }

    #[test]
    fn test_signature_match_flags() {
        let baseline = snap(1000);
        let test = ResponseSnapshot::new(
            200,
            Some("Warning: mysql_fetch_array() expects parameter 1".to_string()),
            10,
        );
        assert!(has_sql_error(&baseline, &test));
    }

    #[test]
    fn test_small_changes_do_not_flag() {
        let baseline = snap(1000);
        assert!(!has_sql_error(&baseline, &snap(1000)));
        assert!(!has_sql_error(&baseline, &snap(960)));
    }

    #[test]
    fn test_shrink_beyond_five_percent_flags() {
        let baseline = snap(1000);
        assert!(has_sql_error(&baseline, &snap(940)));
    }

    #[test]
    fn test_growth_needs_thirty_percent() {
        let baseline = snap(1000);
        assert!(!has_sql_error(&baseline, &snap(1200)));
        assert!(!has_sql_error(&baseline, &snap(1300)));
        assert!(has_sql_error(&baseline, &snap(1301)));
    }

    #[test]
    fn test_absent_body_never_flags() {
        let baseline = snap(1000);
        let test = ResponseSnapshot::new(-1, None, 10);
        assert!(!has_sql_error(&baseline, &test));
    }
}
