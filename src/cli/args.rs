use clap::Parser;

/// LANCET - SQL injection probe
#[derive(Parser, Debug)]
#[command(
    name = "lancet",
    version,
    about = "Probe an HTTP endpoint for SQL injection and enumerate its schema",
    long_about = r#"
LANCET sends crafted request variants against a single HTTP endpoint and
analyzes response differences (content, errors, timing) to find SQL
injection flaws.

DETECTION:
  - Error-based (quote breaking + error signatures)
  - UNION-based (marker reflection across column counts)
  - Boolean-based blind (TRUE/FALSE response differencing)
  - Time-based blind (per-DBMS sleep payloads)

ENUMERATION:
  On a confirmed UNION injection against MySQL or PostgreSQL, databases,
  tables and columns are extracted blind via marker-wrapped subqueries.
"#,
    after_help = r#"EXAMPLES:

  lancet "http://example.com/page.php?id=1"
  lancet -X POST -d "user=admin&pass=x" "http://example.com/login.php"
  lancet -H "Cookie: session=abc" -o results.txt "http://example.com/page?id=1"
  lancet --format json -o results.json "http://example.com/page?id=1"
"#
)]
pub struct Cli {
    /// Target URL (must start with http:// or https://)
    pub url: String,

    /// HTTP method to use
    #[arg(short = 'X', long = "method", default_value = "GET")]
    pub method: String,

    /// Request body for POST requests (key=value&key=value)
    #[arg(short = 'd', long = "data")]
    pub data: Option<String>,

    /// Extra header, repeatable ("Name: Value")
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Report output file
    #[arg(short = 'o', long = "output", default_value = "lancet.txt")]
    pub output: String,

    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Suppress the banner and console summary
    #[arg(long)]
    pub quiet: bool,

    /// Suppress the banner only
    #[arg(long)]
    pub no_banner: bool,
}
