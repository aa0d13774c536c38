use crate::core::result::ScanResult;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scan_metadata: ScanMetadata,
    summary: Summary,
    result: &'a ScanResult,
}

#[derive(Serialize)]
struct ScanMetadata {
    tool: String,
    version: String,
    scan_date: String,
}

#[derive(Serialize)]
struct Summary {
    vulnerabilities: usize,
    databases: usize,
}

pub fn render(result: &ScanResult) -> anyhow::Result<String> {
    let report = Report {
        scan_metadata: ScanMetadata {
            tool: "LANCET".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            scan_date: chrono::Utc::now().to_rfc3339(),
        },
        summary: Summary {
            vulnerabilities: result.vulnerabilities.len(),
            databases: result.database_names.len(),
        },
        result,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
