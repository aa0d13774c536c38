//! Scripted transport simulating a UNION-injectable MySQL-backed page.

use async_trait::async_trait;
use lancet::http::client::Transport;
use lancet::http::request::RequestSpec;
use lancet::http::response::ResponseSnapshot;
use regex::Regex;
use std::sync::{Arc, Mutex};

pub const PAGE: &str = "<html><body>Welcome to the demo shop catalog</body></html>";
const SQL_ERROR: &str =
    "<html>You have an error in your SQL syntax; check the manual near ''</html>";
const COLUMN_MISMATCH: &str =
    "<html>The used SELECT statements have a different number of columns</html>";

/// Simulates an endpoint whose `id` parameter is injectable and whose
/// backing query projects exactly three columns. Every decoded request URL
/// is appended to `log`.
pub struct VulnerableApp {
    pub log: Arc<Mutex<Vec<String>>>,
}

impl VulnerableApp {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn respond(&self, value: &str) -> String {
        if let Some(idx) = value.find("' UNION ALL SELECT ") {
            let select = &value[idx + "' UNION ALL SELECT ".len()..];
            let select = select.strip_suffix(" -- ").unwrap_or(select);

            if count_columns(select) != 3 {
                return COLUMN_MISMATCH.to_string();
            }

            let rows = simulated_rows(select);

            // Concatenation expression: emit one marked value per row.
            let concat_re =
                Regex::new(r"CONCAT\('([^']+)', (\w+), '([^']+)'\)").expect("static regex");
            if let Some(caps) = concat_re.captures(select) {
                let mut body = String::from(PAGE);
                for row in rows {
                    body.push_str(&format!("{}{}{}", &caps[1], row, &caps[3]));
                    body.push('\n');
                }
                return body;
            }

            // Bare quoted literal in the first column: reflect it.
            let literal_re = Regex::new(r"^'([^']*)'").expect("static regex");
            if let Some(caps) = literal_re.captures(select) {
                return format!("{PAGE}{}", &caps[1]);
            }

            return PAGE.to_string();
        }

        // Any unbalanced quote breaks the query.
        if value.contains('\'') || value.contains('"') {
            return SQL_ERROR.to_string();
        }

        PAGE.to_string()
    }
}

#[async_trait]
impl Transport for VulnerableApp {
    async fn send(&self, spec: &RequestSpec) -> ResponseSnapshot {
        let url = urlencoding::decode(&spec.url)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| spec.url.clone());
        self.log.lock().unwrap().push(url.clone());

        let value = url.split("id=").nth(1).unwrap_or("");
        ResponseSnapshot::new(200, Some(self.respond(value)), 5)
    }
}

fn count_columns(select: &str) -> usize {
    let mut depth = 0i32;
    let mut count = 1;
    for ch in select.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => count += 1,
            _ => {}
        }
    }
    count
}

fn simulated_rows(select: &str) -> Vec<&'static str> {
    if select.contains("information_schema.schemata") {
        vec!["shopdb", "analytics"]
    } else if select.contains("information_schema.tables") {
        if select.contains("table_schema = 'shopdb'") {
            vec!["orders", "users"]
        } else if select.contains("table_schema = 'analytics'") {
            vec!["events"]
        } else {
            vec![]
        }
    } else if select.contains("information_schema.columns") {
        if select.contains("table_name = 'orders'") {
            vec!["id", "customer", "total"]
        } else if select.contains("table_name = 'users'") {
            vec!["id", "email"]
        } else if select.contains("table_name = 'events'") {
            vec!["id", "kind"]
        } else {
            vec![]
        }
    } else {
        vec![]
    }
}
