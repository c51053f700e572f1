// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Envelope Gateway CLI
//!
//! Sends a single request through the gateway and prints the settled reply.

use std::env;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use envelope_gateway::{
    FileTokenStore, GatewayConfig, LogNotifier, MemoryRouter, MemoryTokenStore, Reply,
    RequestGateway, ResponseType, SessionExpiryMode, TokenStore,
};
use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

const ENV_TOKEN: &str = "GATEWAY_TOKEN";
const ENV_TOKEN_FILE: &str = "GATEWAY_TOKEN_FILE";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("envelope_gateway=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let response_type = if let Some(pos) = args.iter().position(|a| a == "--blob") {
        args.remove(pos);
        ResponseType::Blob
    } else {
        ResponseType::Json
    };

    let Some(command) = args.first().cloned() else {
        print_usage();
        return ExitCode::from(1);
    };

    match command.as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("envelope-gateway {}", envelope_gateway::VERSION);
            ExitCode::SUCCESS
        }
        "get" | "post" | "form" | "upload" => {
            match run(&command, &args[1..], response_type).await {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::from(1)
                }
            }
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Envelope Gateway - HTTP client for {{code, message, data}} APIs

USAGE:
    envelope-gateway <COMMAND> [--blob] [ARGS]

COMMANDS:
    get <url> [key=value...]          GET with query parameters
    post <url> <json>                 POST a JSON body
    form <url> [key=value...]         POST an url-encoded form
    upload <url> <field> <file>       POST a multipart form with one file
    help                              Show this help message
    version                           Show version information

OPTIONS:
    --blob                            Write the raw response body to stdout

ENVIRONMENT:
    GATEWAY_TOKEN                     Bearer token
    GATEWAY_TOKEN_FILE                File holding the bearer token (cleared on session expiry)
    GATEWAY_PROXY                     Proxy URL for all requests
    GATEWAY_MODE                      'production' enables the HTTPS upgrade
    GATEWAY_PAGE_URL                  Current page URL
    GATEWAY_BASE_URL                  Base URL for relative request URLs
    GATEWAY_TIMEOUT_SECS              Client timeout (default 10)
"#
    );
}

fn token_store() -> Arc<dyn TokenStore> {
    if let Ok(path) = env::var(ENV_TOKEN_FILE) {
        return Arc::new(FileTokenStore::new(path));
    }
    match env::var(ENV_TOKEN) {
        Ok(token) if !token.is_empty() => Arc::new(MemoryTokenStore::with_token(token)),
        _ => Arc::new(MemoryTokenStore::new()),
    }
}

fn key_values(args: &[String]) -> anyhow::Result<Map<String, Value>> {
    args.iter()
        .map(|arg| match arg.split_once('=') {
            Some((key, value)) => Ok((key.to_string(), Value::String(value.to_string()))),
            None => bail!("expected key=value, got '{}'", arg),
        })
        .collect()
}

/// Gateway settings for one-shot CLI requests
fn cli_config<F>(lookup: F) -> anyhow::Result<GatewayConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Nothing is left to wait for once the notice is logged, so fail instead of holding
    let config = GatewayConfig::from_lookup(lookup)
        .context("invalid gateway environment")?
        .session_expiry(SessionExpiryMode::Reject);
    Ok(config)
}

async fn run(command: &str, args: &[String], response_type: ResponseType) -> anyhow::Result<ExitCode> {
    let config = cli_config(|key| env::var(key).ok())?;
    send(config, command, args, response_type).await
}

async fn send(
    config: GatewayConfig,
    command: &str,
    args: &[String],
    response_type: ResponseType,
) -> anyhow::Result<ExitCode> {
    let Some(url) = args.first() else {
        bail!("missing <url>; see 'envelope-gateway help'");
    };
    let rest = &args[1..];

    let gateway = RequestGateway::builder()
        .config(config)
        .token_store(token_store())
        .notifier(Arc::new(LogNotifier))
        .navigator(Arc::new(MemoryRouter::new()))
        .build()?;

    let reply = match command {
        "get" => {
            let params = key_values(rest)?;
            gateway.get_as(url, &params, response_type).await?
        }
        "post" => {
            let body: Value = match rest.first() {
                Some(raw) => serde_json::from_str(raw).context("body is not valid JSON")?,
                None => Value::Object(Map::new()),
            };
            gateway.post_as(url, &body, response_type).await?
        }
        "form" => {
            let body = key_values(rest)?;
            gateway.x_form_as(url, &body, response_type).await?
        }
        "upload" => {
            let [field, file] = rest else {
                bail!("usage: envelope-gateway upload <url> <field> <file>");
            };
            let bytes = tokio::fs::read(file)
                .await
                .with_context(|| format!("failed to read {}", file))?;
            let file_name = Path::new(file)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.clone());
            let form = Form::new().part(field.clone(), Part::bytes(bytes).file_name(file_name));
            gateway.form_data_as(url, form, response_type).await?
        }
        other => bail!("unknown command '{}'", other),
    };

    match reply {
        Reply::Envelope(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            Ok(ExitCode::SUCCESS)
        }
        Reply::Blob(bytes) => {
            std::io::stdout().write_all(&bytes)?;
            Ok(ExitCode::SUCCESS)
        }
        Reply::Null => {
            println!("null");
            Ok(ExitCode::from(2))
        }
    }
}
