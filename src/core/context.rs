//! Resolved per-scan state.

use crate::core::target::Target;
use crate::http::client::Transport;
use crate::http::response::ResponseSnapshot;
use crate::sqli::dbms::DBMS;
use crate::sqli::dialect::Dialect;

/// Everything the detection strategies and the enumerator need, resolved
/// once by the orchestrator (target, baseline, fingerprinted DBMS) and then
/// read-only for the rest of the scan.
pub struct ScanContext<'a> {
    pub transport: &'a dyn Transport,
    pub target: &'a Target,
    pub baseline: &'a ResponseSnapshot,
    pub dbms: DBMS,
    pub dialect: Option<Dialect>,
}
