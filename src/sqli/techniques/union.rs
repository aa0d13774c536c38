//! Union-based detection: splice a marker literal into UNION SELECT
//! payloads of increasing width and watch for its reflection.

use crate::core::context::ScanContext;
use crate::core::result::Vulnerability;
use crate::sqli::InjectionStrategy;
use async_trait::async_trait;

/// Column-count brute force cap; 8 covers most real-world queries without
/// burning probes.
const MAX_COLUMNS: usize = 8;

/// Unique literal, unlikely to appear in any legitimate page.
const MARKER: &str = "LANCET_UNION_MARK_XQ9PTB";

pub struct UnionBased;

#[async_trait]
impl InjectionStrategy for UnionBased {
    fn name(&self) -> &'static str {
        "Union-based"
    }

    async fn detect(&self, ctx: &ScanContext<'_>, param_index: usize) -> Option<Vulnerability> {
        let param = &ctx.target.parameters()[param_index];

        for col_count in 1..=MAX_COLUMNS {
            let payload = build_union_payload(&param.value, col_count);
            let spec = ctx.target.to_injected_request(param_index, &payload);
            let resp = ctx.transport.send(&spec).await;

            let Some(body) = resp.body.as_deref() else {
                continue;
            };

            // Marker reflected back means the UNION landed.
            if body.contains(MARKER) {
                let evidence = format!(
                    "Union-based SQL injection detected.\n\
                     Parameter      : {}\n\
                     Payload        : {}\n\
                     Columns count  : {}\n\
                     Marker found   : {}",
                    param.name, payload, col_count, MARKER
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

/// Marker in the first column, NULL padding for the rest.
fn build_union_payload(original_value: &str, column_count: usize) -> String {
    let mut columns = format!("'{MARKER}'");
    for _ in 1..column_count {
        columns.push_str(", NULL");
    }

    let union = format!("' UNION ALL SELECT {columns} -- ");

    if original_value.is_empty() {
        union
    } else {
        format!("{original_value}{union}")
    }
}
