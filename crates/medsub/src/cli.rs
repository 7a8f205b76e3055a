use crate::model::TargetDomain;
use crate::{Error, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use std::time::Duration;

// timeouts
pub const HTTP_REQUEST_TIMEOUT_MS: &str = "7500";

pub fn command() -> Command {
    Command::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about("Find subdomains of a domain using passive sources")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .action(ArgAction::Version)
                .help("Show version"),
        )
        .arg(
            Arg::new("domain")
                .short('d')
                .long("domain")
                .value_name("DOMAIN")
                .help("Target domain")
                .required_unless_present("list"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Save the results in a file"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("MS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value(HTTP_REQUEST_TIMEOUT_MS)
                .help("Timeout of each HTTP request in milliseconds"),
        )
        .arg(
            Arg::new("logs")
                .short('s')
                .long("logs")
                .action(ArgAction::SetTrue)
                .help("Save logs into a .log file"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List all sources"),
        )
}

/// What the user asked for.
#[derive(Debug)]
pub enum Action {
    ListSources,
    Enumerate(Config),
}

#[derive(Debug)]
pub struct Config {
    pub domain: TargetDomain,
    pub output: Option<PathBuf>,
    pub http_timeout: Duration,
    pub save_logs: bool,
}

impl Action {
    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        if args.get_flag("list") {
            return Ok(Action::ListSources);
        }

        let domain = args
            .get_one::<String>("domain")
            .ok_or_else(|| Error::InvalidDomain("domain is required".to_string()))?;
        let domain = TargetDomain::parse(domain)?;

        // clap fills in the default, so a value is always present
        let timeout_ms = args.get_one::<u64>("timeout").copied().unwrap_or_default();

        Ok(Action::Enumerate(Config {
            domain,
            output: args.get_one::<PathBuf>("output").cloned(),
            http_timeout: Duration::from_millis(timeout_ms),
            save_logs: args.get_flag("logs"),
        }))
    }
}
