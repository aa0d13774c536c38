//! Per-DBMS SQL generation for schema enumeration.

use crate::sqli::dbms::DBMS;

/// SQL dialect for a backend that supports marker-based extraction.
/// Resolved once per scan via [`Dialect::for_dbms`]; backends without a
/// dialect simply skip enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    PostgreSql,
}

impl Dialect {
    pub fn for_dbms(dbms: DBMS) -> Option<Self> {
        match dbms {
            DBMS::MySQL => Some(Dialect::MySql),
            DBMS::PostgreSQL => Some(Dialect::PostgreSql),
            _ => None,
        }
    }

    pub fn dbms(&self) -> DBMS {
        match self {
            Dialect::MySql => DBMS::MySQL,
            Dialect::PostgreSql => DBMS::PostgreSQL,
        }
    }

    /// One row per schema, single projected column.
    pub fn list_databases_query(&self) -> String {
        match self {
            Dialect::MySql => "SELECT schema_name FROM information_schema.schemata".to_string(),
            Dialect::PostgreSql => {
                "SELECT datname FROM pg_database WHERE datistemplate = false".to_string()
            }
        }
    }

    /// One row per table, single projected column.
    pub fn list_tables_query(&self, database: &str) -> String {
        match self {
            Dialect::MySql => format!(
                "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = '{}'",
                escape(database)
            ),
            // Table listing is scoped to the public schema.
            Dialect::PostgreSql => "SELECT table_name FROM information_schema.tables \
                 WHERE table_schema = 'public'"
                .to_string(),
        }
    }

    /// One row per column, single projected column.
    pub fn list_columns_query(&self, database: &str, table: &str) -> String {
        match self {
            Dialect::MySql => format!(
                "SELECT column_name FROM information_schema.columns \
                 WHERE table_schema = '{}' AND table_name = '{}'",
                escape(database),
                escape(table)
            ),
            Dialect::PostgreSql => format!(
                "SELECT column_name FROM information_schema.columns \
                 WHERE table_name = '{}' AND table_schema = 'public'",
                escape(table)
            ),
        }
    }

    /// Wrap a projected column in a concatenation that brackets each row
    /// value with the given marker pair.
    pub fn concat_expression(&self, column: &str, start: &str, end: &str) -> String {
        match self {
            Dialect::MySql => format!("CONCAT('{start}', {column}, '{end}')"),
            Dialect::PostgreSql => format!("'{start}' || {column} || '{end}'"),
        }
    }
}

/// Single-quote doubling, enough to keep interpolated names from breaking
/// the generated fragment.
fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_resolution_is_limited_to_mysql_and_postgres() {
        assert_eq!(Dialect::for_dbms(DBMS::MySQL), Some(Dialect::MySql));
        assert_eq!(Dialect::for_dbms(DBMS::PostgreSQL), Some(Dialect::PostgreSql));
        assert_eq!(Dialect::for_dbms(DBMS::MSSQL), None);
        assert_eq!(Dialect::for_dbms(DBMS::Oracle), None);
        assert_eq!(Dialect::for_dbms(DBMS::SQLite), None);
        assert_eq!(Dialect::for_dbms(DBMS::Unknown), None);
    }

    #[test]
    fn test_mysql_table_query_quotes_and_escapes() {
        let q = Dialect::MySql.list_tables_query("sho'p");
        assert!(q.contains("table_schema = 'sho''p'"));
    }

    #[test]
    fn test_concat_expression_shapes() {
        assert_eq!(
            Dialect::MySql.concat_expression("schema_name", "S_", "_E"),
            "CONCAT('S_', schema_name, '_E')"
        );
        assert_eq!(
            Dialect::PostgreSql.concat_expression("datname", "S_", "_E"),
            "'S_' || datname || '_E'"
        );
    }
}
