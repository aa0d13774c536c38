//! Scan outcome: confirmed vulnerabilities plus whatever schema metadata the
//! enumeration stage managed to pull out.

use crate::core::target::{Parameter, Target};
use crate::sqli::dbms::DBMS;
use serde::Serialize;
use std::collections::HashMap;

/// One confirmed finding. A parameter may accumulate several of these, one
/// per strategy that fired.
#[derive(Debug, Clone, Serialize)]
pub struct Vulnerability {
    pub parameter: Parameter,
    pub parameter_index: usize,
    pub strategy: String,
    pub payload: String,
    pub evidence: String,
}

/// Grows monotonically while the scan runs; never mutated after the
/// orchestrator returns.
#[derive(Debug, Serialize)]
pub struct ScanResult {
    pub target: Target,
    pub vulnerabilities: Vec<Vulnerability>,
    pub dbms: DBMS,
    pub database_names: Vec<String>,
    pub tables_by_database: HashMap<String, Vec<String>>,
    /// Keyed by `<db>.<table>`.
    pub columns_by_table: HashMap<String, Vec<String>>,
}

impl ScanResult {
    pub fn new(target: Target, vulnerabilities: Vec<Vulnerability>, dbms: DBMS) -> Self {
        Self {
            target,
            vulnerabilities,
            dbms,
            database_names: Vec::new(),
            tables_by_database: HashMap::new(),
            columns_by_table: HashMap::new(),
        }
    }

    pub fn add_database_name(&mut self, name: &str) {
        if !self.database_names.iter().any(|n| n == name) {
            self.database_names.push(name.to_string());
        }
    }

    pub fn add_table_name(&mut self, database: &str, table: &str) {
        self.tables_by_database
            .entry(database.to_string())
            .or_default()
            .push(table.to_string());
    }

    pub fn add_column_name(&mut self, database: &str, table: &str, column: &str) {
        self.columns_by_table
            .entry(format!("{database}.{table}"))
            .or_default()
            .push(column.to_string());
    }
}
