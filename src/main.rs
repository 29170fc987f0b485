//! gemini-image-gateway server binary

use clap::Parser;
use gemini_image_gateway::utils::logging::init_tracing;
use gemini_image_gateway::{CliOverrides, Config, server};
use std::path::PathBuf;
use std::process::ExitCode;

/// HTTP gateway for Gemini image generation
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about)]
struct Args {
    /// Configuration file (defaults to config/gateway.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,
}

impl From<Args> for CliOverrides {
    fn from(args: Args) -> Self {
        CliOverrides {
            config: args.config,
            host: args.host,
            port: args.port,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let overrides = CliOverrides::from(Args::parse());

    let config = match Config::load(&overrides).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(config.logging());

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
