mod api;
mod error;
mod router;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::builder::BoolishValueParser;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use soar_core::mcp::{McpHandler, McpServer, StdioTransport};
use soar_core::{Config, Dispatcher, SoarClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    /// MCP JSON-RPC over stdin/stdout.
    Stdio,
    /// Plain JSON over HTTP (`/health`, `/tools`, `/execute`).
    Http,
}

/// Connect AI assistants to a Splunk SOAR instance.
#[derive(Debug, Parser)]
#[command(name = "soar-mcp", version, about)]
struct Args {
    /// Base URL of the SOAR instance, e.g. https://soar.example.com
    #[arg(long, env = "SPLUNK_SOAR_URL")]
    url: Option<String>,

    /// SOAR API token, sent as `ph-auth-token`.
    #[arg(long, env = "SPLUNK_SOAR_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Accept invalid TLS certificates (self-signed deployments only).
    #[arg(long, env = "SPLUNK_SOAR_INSECURE", value_parser = BoolishValueParser::new())]
    insecure: bool,

    /// Timeout for each SOAR request, in seconds.
    #[arg(long, env = "SPLUNK_SOAR_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Listen port for the HTTP transport.
    #[arg(long, env = "MCP_PORT", default_value_t = 8080)]
    port: u16,

    /// Verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first, so clap sees its values as environment
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // 1. Logging Setup (stderr: stdout belongs to the stdio protocol)
    init_logging(args.verbose);
    info!("SOAR MCP bridge initializing...");

    // 2. Configuration
    let config = Config::new(args.url, args.token)
        .with_insecure(args.insecure)
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if !config.is_configured() {
        for var in config.missing() {
            warn!("{var} environment variable not set");
        }
    }

    // 3. The Body: REST client + dispatcher, shared by whichever transport runs
    let client = SoarClient::new(config).context("invalid SOAR configuration")?;
    let dispatcher = Arc::new(Dispatcher::new(client));

    // 4. Serve
    match args.transport {
        Transport::Stdio => serve_stdio(dispatcher).await,
        Transport::Http => {
            let config = dispatcher.client().config();
            info!("Starting MCP Server on port {}", args.port);
            info!("SOAR URL: {}", config.base_url().unwrap_or("NOT SET"));
            info!(
                "SOAR Token: {}",
                if config.token().is_some() { "SET" } else { "NOT SET" }
            );
            router::serve(dispatcher, args.port)
                .await
                .context("HTTP gateway failed")
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn serve_stdio(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let transport = StdioTransport::new(tokio::io::stdin(), tokio::io::stdout());
    let mut server = McpServer::new(transport, McpHandler::new(dispatcher));

    tokio::select! {
        result = server.run() => result.context("stdio transport failed"),
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
            Ok(())
        }
    }
}
