//! SQL injection detection and enumeration.
//!
//! Structure:
//! - dbms / dialect: backend identification and per-DBMS query generation
//! - fingerprint: three-tier DBMS detection cascade
//! - techniques: the detection strategies (error, union, boolean, time)
//! - extract: blind schema enumeration over a confirmed UNION vector

pub mod dbms;
pub mod dialect;
pub mod extract;
pub mod fingerprint;
pub mod techniques;

pub use dbms::DBMS;
pub use dialect::Dialect;
pub use techniques::strategies;

use crate::core::context::ScanContext;
use crate::core::result::Vulnerability;
use async_trait::async_trait;

/// A single detection technique. Strategies are independent and
/// order-insensitive; the orchestrator runs every strategy against every
/// parameter and collects at most one vulnerability per (strategy,
/// parameter) pair, produced by the first payload variant that triggers.
#[async_trait]
pub trait InjectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn detect(&self, ctx: &ScanContext<'_>, param_index: usize) -> Option<Vulnerability>;
}
