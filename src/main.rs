use std::io;
use std::process::ExitCode;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{debug, error, info};

use common::logger;
use walutomat::{BalanceClient, ClientConfig};

mod report;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    logger::setup_logger();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Balance check failed");
            eprint!("{}", report::render_failure(&e));
            ExitCode::FAILURE
        }
    }
}

async fn start() -> anyhow::Result<()> {
    let config = ClientConfig::from_process_env().context(
        "Cannot configure the Walutomat client (set WALUTOMAT_API_KEY in the environment or in .env)",
    )?;
    debug!("Resolved {:?}", config);
    info!("Using {} environment.", config.environment_name());

    let client = BalanceClient::new(config).context("Failed to build HTTP client")?;
    report::run(&client, &mut io::stdout()).await
}
