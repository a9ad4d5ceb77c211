//! clickstream-cli — command-line client for the clickstream lookup service
//!
//! # Subcommands
//! - `query <title> [--json]` — print the top sources and targets for a page

use clap::{Parser, Subcommand};
use clickstream_core::{ClickstreamEntry, QueryResult};

const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
const CLICKSTREAM_PATH: &str = "/api/v1/clickstream";

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "clickstream-cli",
    version,
    about = "Query page navigation statistics from a clickstream server"
)]
struct Cli {
    /// Clickstream HTTP server URL (overrides CLICKSTREAM_HTTP_URL env var)
    #[arg(long, env = "CLICKSTREAM_HTTP_URL", default_value = DEFAULT_SERVER)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the top sources and targets for a page title
    Query {
        /// Page title; spaces and underscores are equivalent
        title: String,

        /// Print the raw JSON response
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// Output
// ============================================================================

/// Render one direction as aligned `count  type  page` rows.
pub fn format_entries(heading: &str, entries: &[ClickstreamEntry]) -> String {
    let mut out = format!("{} ({}):\n", heading, entries.len());
    if entries.is_empty() {
        out.push_str("  (none)\n");
        return out;
    }

    let count_width = entries
        .iter()
        .map(|e| e.count.to_string().len())
        .max()
        .unwrap_or(1);
    let type_width = entries.iter().map(|e| e.link_type.len()).max().unwrap_or(1);

    for e in entries {
        out.push_str(&format!(
            "  {:>cw$}  {:<tw$}  {}\n",
            e.count,
            e.link_type,
            e.page,
            cw = count_width,
            tw = type_width
        ));
    }
    out
}

pub fn format_result(result: &QueryResult) -> String {
    format!(
        "{}\n\n{}\n{}",
        result.title,
        format_entries("Sources", &result.sources),
        format_entries("Targets", &result.targets)
    )
}

// ============================================================================
// HTTP Client Calls
// ============================================================================

fn do_query(server: &str, title: &str, json_output: bool) -> anyhow::Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;

    let url = format!("{}{}", server, CLICKSTREAM_PATH);
    let resp = match client.get(&url).query(&[("title", title)]).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("clickstream-cli: connection failed to {}: {}", url, e);
            std::process::exit(1);
        }
    };

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        eprintln!("clickstream-cli: server returned {}: {}", status, body);
        std::process::exit(1);
    }

    let result: QueryResult = match resp.json() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("clickstream-cli: failed to parse response: {}", e);
            std::process::exit(1);
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", format_result(&result));
    }

    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let cli = Cli::parse();
    let server = cli.server.trim_end_matches('/').to_string();

    let result = match cli.command {
        Commands::Query { title, json } => do_query(&server, &title, json),
    };

    if let Err(e) = result {
        eprintln!("clickstream-cli: {}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// Tests
// ============================================================================
