//! XRPL signing proxy.
//!
//! Forwards wallet-service payload requests from browser and CLI clients,
//! attaching API credentials taken from the environment and answering CORS
//! preflights itself.
//!
//! ```text
//!     Client ──► CORS / request-id / trace ──► route match ──► forward ──► wallet service
//!                                                   │              │
//!                                        config (hot reload)   X-API-Key / X-API-Secret
//!                                                                  from env
//! ```

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "xrpl-signing-proxy")]
#[command(about = "Credential-injecting proxy for the wallet signing service", long_about = None)]
struct Cli {
    /// TOML configuration file; watched for changes.
    #[arg(short, long, env = "SIGNING_PROXY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    xrpl_console::lifecycle::startup::run_proxy(cli.config).await
}
