mod cli;
mod enumerate;
mod error;
mod model;
mod modules;
mod utils;

pub use error::{Error, Result};

use cli::{Action, Config};
use colored::Colorize;
use enumerate::{enumerate, Enumeration};
use model::save_results;
use reqwest::Client;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, error, info};
use utils::log::init_tracing_subscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::command().get_matches();

    let config = match Action::from_matches(&args)? {
        Action::ListSources => {
            modules::display_all();
            return Ok(());
        }
        Action::Enumerate(config) => config,
    };

    // create filename
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let filename = format!("medsub_{}", timestamp);
    init_tracing_subscriber(config.save_logs, ".".as_ref(), &filename);

    // interruption ends the run silently
    tokio::select! {
        res = run(&config) => res,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            Ok(())
        }
    }
}

async fn run(config: &Config) -> Result<()> {
    info!("Searching subdomains of {}", config.domain);

    // create http client
    let http_client = Client::builder()
        .timeout(config.http_timeout)
        .user_agent(concat!("medsub/", env!("CARGO_PKG_VERSION")))
        .build()?;
    debug!("HTTP Client created: {:?}", http_client);

    let Enumeration {
        subdomains,
        failures,
    } = enumerate(&http_client, modules::subdomains_modules(), &config.domain).await;

    for failure in &failures {
        debug!(
            source = %failure.source,
            kind = %failure.kind,
            "Source failed: {}",
            failure.message
        );
        warning(&format!(
            "Couldn't search for subdomains on {}.",
            failure.source
        ));
    }

    for subdomain in &subdomains {
        println!("{}", subdomain);
    }

    if let Some(path) = &config.output {
        if let Err(err) = save_results(&subdomains, path) {
            error!("Saving results to {:?}: {}", path, err);
            warning("Couldn't save the results in the file.");
        }
    }

    Ok(())
}

fn warning(message: &str) {
    eprintln!("{}", message.yellow());
}
