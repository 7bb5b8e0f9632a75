use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use switchyard::Request;
use switchyard_server::transport::StdioTransport;
use switchyard_server::build_dispatcher;

#[derive(Parser)]
#[command(name = "switchyard-server", version, about = "Method dispatch server")]
struct Cli {
    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve requests over stdin/stdout (default).
    Serve,
    /// Serve requests over HTTP.
    #[cfg(feature = "http")]
    ServeHttp {
        /// Listen address, e.g. 127.0.0.1:3200.
        #[arg(long)]
        addr: Option<String>,
    },
    /// Print the capability listing and exit.
    Describe,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for protocol output.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let dispatcher = build_dispatcher().context("building handler catalog")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            StdioTransport::new(dispatcher)
                .run()
                .await
                .context("stdio transport failed")?;
        }
        #[cfg(feature = "http")]
        Commands::ServeHttp { addr } => {
            let addr = switchyard_server::config::resolve_listen_addr(addr.as_deref());
            switchyard_server::transport::HttpTransport::new(dispatcher)
                .run(&addr)
                .await
                .with_context(|| format!("http transport failed on {addr}"))?;
        }
        Commands::Describe => {
            let envelope = dispatcher.dispatch(Request::new("describe")).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
