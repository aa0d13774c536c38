//! Plain-text scan report, appended to the output file so repeated runs
//! accumulate a history.

use crate::core::result::ScanResult;
use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;

const LINE_SEP: &str = "------------------------------------------------------------";

pub fn save(path: &str, result: &ScanResult) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    writeln!(file, "{LINE_SEP}")?;
    writeln!(file, "LANCET SQL INJECTION SCAN REPORT")?;
    writeln!(file, "{LINE_SEP}")?;
    writeln!(file, "Date    : {timestamp}")?;
    writeln!(file, "Target  : {}", result.target.base_url())?;
    writeln!(file, "Method  : {}", result.target.method())?;
    writeln!(file, "DBMS    : {}", result.dbms)?;
    writeln!(file)?;

    writeln!(file, "[SUMMARY]")?;
    writeln!(
        file,
        "  Vulnerabilities found : {}",
        result.vulnerabilities.len()
    )?;
    writeln!(
        file,
        "  Databases discovered  : {}",
        result.database_names.len()
    )?;
    writeln!(file)?;

    writeln!(file, "[VULNERABILITIES]")?;
    if result.vulnerabilities.is_empty() {
        writeln!(file, "  (none)")?;
    } else {
        for (idx, vuln) in result.vulnerabilities.iter().enumerate() {
            writeln!(file, "  #{}", idx + 1)?;
            writeln!(file, "    Parameter : {}", vuln.parameter.name)?;
            writeln!(file, "    Strategy  : {}", vuln.strategy)?;
            writeln!(file, "    Payload   : {}", vuln.payload)?;
            writeln!(file, "    Evidence  :")?;
            for line in vuln.evidence.lines() {
                writeln!(file, "      {line}")?;
            }
            writeln!(file)?;
        }
    }
    writeln!(file)?;

    writeln!(file, "[ENUMERATION]")?;
    if result.database_names.is_empty() {
        writeln!(file, "  (enumeration not available or no databases discovered)")?;
    } else {
        for db in &result.database_names {
            writeln!(file, "  Database: {db}")?;

            let tables = result
                .tables_by_database
                .get(db)
                .map_or(&[][..], Vec::as_slice);
            if tables.is_empty() {
                writeln!(file, "    (no tables discovered)")?;
                continue;
            }

            for table in tables {
                writeln!(file, "    Table: {table}")?;
                let key = format!("{db}.{table}");
                let columns = result
                    .columns_by_table
                    .get(&key)
                    .map_or(&[][..], Vec::as_slice);
                if columns.is_empty() {
                    writeln!(file, "      (no columns discovered)")?;
                } else {
                    writeln!(file, "      Columns:")?;
                    for column in columns {
                        writeln!(file, "        - {column}")?;
                    }
                }
            }
        }
    }
    writeln!(file)?;

    Ok(())
}
