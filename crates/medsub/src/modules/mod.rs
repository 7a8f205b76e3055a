pub mod subdomains;

#[cfg(test)]
pub(crate) mod testing;

use self::subdomains::anubis_db::AnubisDb;
use self::subdomains::certificate_details::CertificateDetails;
use self::subdomains::crtsh::CrtSh;
use self::subdomains::hacker_target::HackerTarget;
use self::subdomains::hudson_rock::HudsonRock;
use self::subdomains::rapid_dns::RapidDns;
use self::subdomains::SubdomainModule;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, instrument, trace, warn};

pub trait Module {
    fn name(&self) -> String;
    fn description(&self) -> String;
}

pub fn subdomains_modules() -> Vec<Box<dyn SubdomainModule>> {
    vec![
        Box::new(AnubisDb::new()),
        Box::new(CertificateDetails::new()),
        Box::new(CrtSh::new()),
        Box::new(HackerTarget::new()),
        Box::new(HudsonRock::new()),
        Box::new(RapidDns::new()),
    ]
}

pub fn display_all() {
    let subdomains_modules = subdomains_modules();
    println!("\nSubdomains modules");
    for module in subdomains_modules {
        println!("- {:35}{}", module.name(), module.description());
    }
}

// region:        --- HTTP requests

/// Seam between the sources and the network.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and return the body, non-2xx answers are errors.
    async fn get_text(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl HttpFetch for Client {
    async fn get_text(&self, url: &str) -> Result<String> {
        let res = http_request(self, url).await?;

        if !res.status().is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }

        let body = res.text().await?;
        trace!("Body: {:?}", body);
        Ok(body)
    }
}

#[instrument(name = "HTTP_request", level = "info", skip_all, fields(url = url))]
pub async fn http_request(http_client: &Client, url: &str) -> Result<Response> {
    info!("Sending request");
    match http_client.get(url).send().await {
        Ok(res) => {
            info!("Receive with status: {}", res.status());
            debug!("Response: {:?}", res);
            Ok(res)
        }
        Err(err) => {
            warn!("Reason: {}", err);
            Err(Error::Reqwest(err))
        }
    }
}

// endregion:     --- HTTP requests
