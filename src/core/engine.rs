//! Scan orchestrator.
//!
//! One forward pass, no retry or rollback: build target, take a baseline,
//! fingerprint the backend, run every strategy against every parameter,
//! then attempt enumeration. Probe failures arrive as degraded snapshots
//! and simply feed the heuristics downstream.

use crate::core::config::ScanConfig;
use crate::core::context::ScanContext;
use crate::core::result::ScanResult;
use crate::core::target::Target;
use crate::http::client::Transport;
use crate::sqli::dialect::Dialect;
use crate::sqli::{extract, fingerprint, strategies, InjectionStrategy};

pub struct ScanEngine {
    config: ScanConfig,
    transport: Box<dyn Transport>,
    strategies: Vec<Box<dyn InjectionStrategy>>,
}

impl ScanEngine {
    pub fn new(config: ScanConfig, transport: Box<dyn Transport>) -> Self {
        Self {
            config,
            transport,
            strategies: strategies(),
        }
    }

    pub async fn scan(&self) -> ScanResult {
        let target = Target::from_url(
            &self.config.url,
            self.config.method,
            self.config.body.as_deref(),
            &self.config.headers,
        );

        tracing::info!("Parsed URL: {}", target.base_url());
        tracing::info!("Found {} parameter(s) to test", target.parameters().len());

        if target.parameters().is_empty() {
            tracing::warn!("No parameters found in URL; nothing will be injected");
            tracing::warn!("Example: {}?id=1", target.base_url());
        } else {
            for param in target.parameters() {
                tracing::info!("    - {} = {}", param.name, param.value);
            }
        }

        tracing::info!("Sending baseline request...");
        let baseline = self.transport.send(&target.to_request_spec()).await;
        tracing::info!(
            "Baseline response: {} ({} bytes, {} ms)",
            baseline.status,
            baseline.body_len(),
            baseline.elapsed_ms
        );

        tracing::info!("Fingerprinting DBMS...");
        let dbms = fingerprint::detect_dbms(self.transport.as_ref(), &target, &baseline).await;
        let dialect = Dialect::for_dbms(dbms);
        tracing::info!("Detected DBMS: {dbms}");

        let ctx = ScanContext {
            transport: self.transport.as_ref(),
            target: &target,
            baseline: &baseline,
            dbms,
            dialect,
        };

        let mut vulnerabilities = Vec::new();

        if !target.parameters().is_empty() {
            tracing::info!("Testing parameters for SQL injection...");
        }

        for (index, param) in target.parameters().iter().enumerate() {
            tracing::info!("Testing parameter: {}", param.name);
            for strategy in &self.strategies {
                tracing::info!("    Trying {} strategy...", strategy.name());
                if let Some(vuln) = strategy.detect(&ctx, index).await {
                    tracing::info!("    VULNERABLE! Found with {}", strategy.name());
                    vulnerabilities.push(vuln);
                }
            }
        }

        let mut result = ScanResult::new(target.clone(), vulnerabilities, dbms);

        extract::run(&ctx, &mut result).await;

        result
    }
}
