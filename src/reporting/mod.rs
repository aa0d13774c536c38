pub mod json;
pub mod text;

use crate::core::config::ScanConfig;
use crate::core::result::ScanResult;
use anyhow::Result;

pub fn write_report(config: &ScanConfig, result: &ScanResult) -> Result<()> {
    match config.format.as_str() {
        "json" => {
            let rendered = json::render(result)?;
            std::fs::write(&config.output, rendered)?;
        }
        _ => text::save(&config.output, result)?,
    }

    tracing::info!("Report written to {}", config.output);
    Ok(())
}
