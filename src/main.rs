use clap::Parser;
use colored::Colorize;
use lancet::cli::args::Cli;
use lancet::core::config::ScanConfig;
use lancet::core::engine::ScanEngine;
use lancet::http::client::HttpTransport;
use lancet::reporting;

const BANNER: &str = r#"
 ██╗      █████╗ ███╗   ██╗ ██████╗███████╗████████╗
 ██║     ██╔══██╗████╗  ██║██╔════╝██╔════╝╚══██╔══╝
 ██║     ███████║██╔██╗ ██║██║     █████╗     ██║
 ██║     ██╔══██║██║╚██╗██║██║     ██╔══╝     ██║
 ███████╗██║  ██║██║ ╚████║╚██████╗███████╗   ██║
 ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝ ╚═════╝╚══════╝   ╚═╝

 SQL injection probe and schema enumerator
"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.no_banner && !cli.quiet {
        println!("{}", BANNER.cyan());
    }
    let quiet = cli.quiet;

    tracing_subscriber::fmt::init();

    let config = ScanConfig::from_cli(cli)?;
    let transport = HttpTransport::new(config.timeout_secs)?;
    let engine = ScanEngine::new(config.clone(), Box::new(transport));

    let result = engine.scan().await;

    if !quiet {
        println!("=== Lancet Scan Summary ===");
        println!("Target      : {}", result.target.base_url());
        println!("HTTP Method : {}", result.target.method());
        println!("DBMS        : {}", result.dbms);

        let vuln_count = result.vulnerabilities.len();
        if vuln_count > 0 {
            println!(
                "Vulnerabilities found: {}",
                vuln_count.to_string().red().bold()
            );
        } else {
            println!("Vulnerabilities found: {}", "0".green());
        }

        if !result.database_names.is_empty() {
            println!("Databases discovered : {}", result.database_names.len());
        }
    }

    reporting::write_report(&config, &result)?;

    Ok(())
}
