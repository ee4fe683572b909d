//! # ga4gh-errors
//!
//! Command-line companion to the GA4GH error registry.
//!
//! Usage:
//!   ga4gh-errors kinds
//!   ga4gh-errors code <NAME>
//!   ga4gh-errors resolve <CODE>
//!   ga4gh-errors decode <JSON>
//!   ga4gh-errors check
//!   ga4gh-errors fetch <URL> [--post <BODY>]
//!
//! Examples:
//!   ga4gh-errors resolve 2639844098
//!   ga4gh-errors decode '{"errorCode": 1524712338, "message": "..."}'
//!   ga4gh-errors fetch http://localhost:8000/v0.5.1/variantsets/search --post '{}'

mod client;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use client::{Outcome, ErrorFetcher};
use ga4gh_error::{
    code_of, registry_entries, resolve, self_check, ErrorKind, ErrorPayload, RegistryEntry,
};
use std::io::Read;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ga4gh-errors")]
#[command(author, version, about = "Inspect GA4GH server error codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every registered error kind
    Kinds,
    /// Compute the error code of a kind name
    Code {
        /// Kind name, e.g. BadPageSizeException
        name: String,
    },
    /// Find the kind an error code belongs to
    Resolve {
        /// Numeric error code
        code: u32,
    },
    /// Decode a wire error payload ("-" reads stdin)
    Decode {
        payload: String,
    },
    /// Run the registry self-check
    Check,
    /// Send a request to a server and decode its error response
    Fetch {
        url: String,

        /// POST this JSON body instead of issuing a GET
        #[arg(long)]
        post: Option<String>,

        /// Request timeout in seconds
        #[arg(long, env = "GA4GH_ERRORS_TIMEOUT_SECS", default_value = "30")]
        timeout_secs: u64,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_entry(entry: &RegistryEntry) {
    println!("{}", entry.name);
    println!("  code:    {}", entry.error_code);
    println!("  status:  {} ({})", entry.http_status, entry.status_class);
    println!("  parent:  {}", entry.parent.as_deref().unwrap_or("-"));
    println!("  message: {}", entry.default_message);
}

fn list_kinds(json: bool) -> anyhow::Result<()> {
    let entries = registry_entries();
    if json {
        return print_json(&entries);
    }

    println!("{:<36} {:>10}  {:>3}  PARENT", "NAME", "CODE", "HTTP");
    for entry in &entries {
        println!(
            "{:<36} {:>10}  {:>3}  {}",
            entry.name,
            entry.error_code,
            entry.http_status,
            entry.parent.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} kinds", entries.len());
    Ok(())
}

fn show_code(name: &str, json: bool) -> anyhow::Result<()> {
    let code = code_of(name);
    let registered = ErrorKind::from_name(name).is_some();

    if json {
        return print_json(&serde_json::json!({
            "name": name,
            "errorCode": code,
            "registered": registered,
        }));
    }

    println!("{}", code);
    if !registered {
        eprintln!("note: '{}' is not a registered kind", name);
    }
    Ok(())
}

fn resolve_code(code: u32, json: bool) -> anyhow::Result<()> {
    let kind = resolve(code)?;
    let entry = RegistryEntry::from(kind);

    if json {
        return print_json(&entry);
    }
    print_entry(&entry);
    Ok(())
}

fn decode_payload(payload: &str, json: bool) -> anyhow::Result<()> {
    let body = if payload == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading payload from stdin")?;
        buf
    } else {
        payload.to_string()
    };

    let (kind, payload) = ErrorPayload::decode(&body)?;

    if json {
        return print_json(&serde_json::json!({
            "kind": RegistryEntry::from(kind),
            "message": payload.message,
        }));
    }

    println!("{} ({})", kind, kind.status_class().http_status());
    println!("  {}", payload.message);
    Ok(())
}

fn run_check(json: bool) -> anyhow::Result<()> {
    let defects = self_check();

    if json {
        let defects: Vec<String> = defects.iter().map(|d| d.to_string()).collect();
        print_json(&serde_json::json!({
            "kinds": ga4gh_error::ALL_KINDS.len(),
            "defects": defects,
        }))?;
    } else {
        for defect in &defects {
            eprintln!("defect: {}", defect);
        }
    }

    if !defects.is_empty() {
        bail!("{} registry defect(s)", defects.len());
    }
    if !json {
        println!("registry OK: {} kinds", ga4gh_error::ALL_KINDS.len());
    }
    Ok(())
}

async fn fetch(
    url: &str,
    post: Option<String>,
    timeout_secs: u64,
    json: bool,
) -> anyhow::Result<()> {
    let fetcher = ErrorFetcher::new(Duration::from_secs(timeout_secs))?;
    let outcome = fetcher.fetch(url, post).await?;
    report_outcome(&outcome, json)
}

fn outcome_json(outcome: &Outcome) -> Option<serde_json::Value> {
    match outcome {
        Outcome::Success { status } => Some(serde_json::json!({
            "status": status.as_u16(),
            "error": null,
        })),
        Outcome::Error {
            status,
            kind,
            payload,
            status_agrees,
        } => Some(serde_json::json!({
            "status": status.as_u16(),
            "kind": RegistryEntry::from(*kind),
            "message": payload.message,
            "statusAgrees": status_agrees,
        })),
        Outcome::Undecodable { .. } => None,
    }
}

fn report_outcome(outcome: &Outcome, json: bool) -> anyhow::Result<()> {
    if json {
        if let Some(value) = outcome_json(outcome) {
            return print_json(&value);
        }
    }

    match outcome {
        Outcome::Success { status } => {
            println!("{}: no error", status);
        }
        Outcome::Error {
            status,
            kind,
            payload,
            status_agrees,
        } => {
            println!("{}: {} [{}]", status, kind, payload.error_code);
            println!("  {}", payload.message);
            if !status_agrees {
                println!(
                    "  warning: {} prescribes {}",
                    kind,
                    kind.status_class().http_status()
                );
            }
        }
        Outcome::Undecodable { status, reason } => {
            bail!("{}: response is not a GA4GH error payload ({})", status, reason);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Kinds => list_kinds(cli.json),
        Commands::Code { name } => show_code(&name, cli.json),
        Commands::Resolve { code } => resolve_code(code, cli.json),
        Commands::Decode { payload } => decode_payload(&payload, cli.json),
        Commands::Check => run_check(cli.json),
        Commands::Fetch {
            url,
            post,
            timeout_secs,
        } => fetch(&url, post, timeout_secs, cli.json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from(["ga4gh-errors", "resolve", "2639844098"]).unwrap();
        assert!(matches!(cli.command, Commands::Resolve { code: 2639844098 }));
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_rejects_negative_code() {
        assert!(Cli::try_parse_from(["ga4gh-errors", "resolve", "-1"]).is_err());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ga4gh-errors", "kinds", "--json", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Kinds));
        assert!(cli.json);
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_fetch() {
        let cli = Cli::try_parse_from([
            "ga4gh-errors",
            "fetch",
            "http://localhost:8000/v0.5.1/callsets/search",
            "--post",
            "{}",
            "--timeout-secs",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Fetch {
                url,
                post,
                timeout_secs,
            } => {
                assert!(url.ends_with("/callsets/search"));
                assert_eq!(post.as_deref(), Some("{}"));
                assert_eq!(timeout_secs, 5);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_code_fails() {
        let err = resolve_code(7, false).unwrap_err();
        assert!(err.to_string().contains("error code 7"));
    }

    #[test]
    fn test_decode_payload_rejects_garbage() {
        assert!(decode_payload("not json", false).is_err());
    }

    #[test]
    fn test_success_outcome_renders_as_json() {
        let outcome = client::interpret(reqwest::StatusCode::OK, "{}");
        let value = outcome_json(&outcome).unwrap();

        assert_eq!(value, serde_json::json!({ "status": 200, "error": null }));
        assert!(report_outcome(&outcome, true).is_ok());
    }

    #[test]
    fn test_error_outcome_renders_as_json() {
        let body = r#"{"errorCode": 1524712338, "message": "VariantSet 'vs1' not found"}"#;
        let outcome = client::interpret(reqwest::StatusCode::NOT_FOUND, body);
        let value = outcome_json(&outcome).unwrap();

        assert_eq!(value["status"], 404);
        assert_eq!(value["kind"]["name"], "VariantSetNotFound");
        assert_eq!(value["statusAgrees"], true);
    }

    #[test]
    fn test_undecodable_outcome_is_an_error() {
        let outcome = client::interpret(reqwest::StatusCode::BAD_GATEWAY, "<html/>");
        assert!(outcome_json(&outcome).is_none());
        assert!(report_outcome(&outcome, true).is_err());
    }

    #[test]
    fn test_check_passes() {
        assert!(run_check(false).is_ok());
    }
}
