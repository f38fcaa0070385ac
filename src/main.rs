use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;
use votegate::log::TracingLog;
use votegate::{Server, api};

#[derive(Parser)]
#[command(version, about = "Listing and vote API behind bearer-token auth")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:6060")]
    addr: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let app = api::app(Arc::new(TracingLog));

    let server = match Server::bind(args.addr).await {
        Ok(server) => server,
        Err(e) => {
            error!("error starting server: {e}");
            return Err(e.into());
        }
    };

    server.serve(app).await?;
    Ok(())
}
