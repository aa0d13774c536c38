//! Database management system types.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DBMS {
    MySQL,
    PostgreSQL,
    MSSQL,
    Oracle,
    SQLite,
    Unknown,
}

impl std::fmt::Display for DBMS {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DBMS::MySQL => write!(f, "MySQL"),
            DBMS::PostgreSQL => write!(f, "PostgreSQL"),
            DBMS::MSSQL => write!(f, "Microsoft SQL Server"),
            DBMS::Oracle => write!(f, "Oracle"),
            DBMS::SQLite => write!(f, "SQLite"),
            DBMS::Unknown => write!(f, "Unknown"),
        }
    }
}
