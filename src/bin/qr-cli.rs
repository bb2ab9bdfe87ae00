use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "qr-cli")]
#[command(about = "Command-line client for the QR code service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:1323")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the service health endpoint
    Health,
    /// Render text as a QR code and save the PNG
    Fetch {
        /// Text to encode
        text: String,

        /// Image size in pixels (128-1024)
        #[arg(short, long)]
        size: Option<u32>,

        /// Recovery level: l, m, h or x
        #[arg(short, long)]
        level: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "qr.png")]
        out: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("service returned status {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let server = cli.server.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/health", server)).send().await?;
            let body = check(res).await?.text().await?;
            print!("{}", body);
        }
        Commands::Fetch {
            text,
            size,
            level,
            out,
        } => {
            let mut query = vec![("url", text)];
            if let Some(size) = size {
                query.push(("size", size.to_string()));
            }
            if let Some(level) = level {
                query.push(("level", level));
            }

            let res = client
                .get(format!("{}/qr", server))
                .query(&query)
                .send()
                .await?;
            let png = check(res).await?.bytes().await?;
            tokio::fs::write(&out, &png).await?;
            println!("Wrote {} bytes to {}", png.len(), out.display());
        }
    }

    Ok(())
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn check(res: reqwest::Response) -> Result<reqwest::Response, CliError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = res.text().await.unwrap_or_default().trim_end().to_string();
    Err(CliError::Status { status, message })
}
