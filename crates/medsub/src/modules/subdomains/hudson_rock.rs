use super::{ends_with_domain, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// Hudson Rock masks part of the compromised hosts with this glyph.
const REDACTION_GLYPH: char = '•';

// region:        --- Module info

pub struct HudsonRock {}

impl HudsonRock {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for HudsonRock {
    fn name(&self) -> String {
        "subdomains/hudsonrock".to_string()
    }

    fn description(&self) -> String {
        "Use Hudson Rock infostealer intelligence to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[derive(Debug, Deserialize)]
struct HudsonRockResponse {
    data: HudsonRockData,
}

#[derive(Debug, Deserialize)]
struct HudsonRockData {
    clients_urls: Vec<CompromisedUrl>,
    employees_urls: Vec<CompromisedUrl>,
}

#[derive(Debug, Deserialize)]
struct CompromisedUrl {
    url: String,
}

#[async_trait]
impl SubdomainModule for HudsonRock {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let url = format!(
            "https://cavalier.hudsonrock.com/api/json/v2/osint-tools/urls-by-domain?domain={}",
            domain
        );
        let body = http.get_text(&url).await?;

        let subdomains = extract_subdomains(&body, domain)?;
        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// Host of every compromised URL, `scheme://host/...`.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> Result<HashSet<String>> {
    let response: HudsonRockResponse = serde_json::from_str(body)?;
    let HudsonRockData {
        clients_urls,
        employees_urls,
    } = response.data;

    let subdomains = clients_urls
        .into_iter()
        .chain(employees_urls)
        .filter_map(|record| record.url.split('/').nth(2).map(String::from))
        .filter(|host| !host.contains(REDACTION_GLYPH))
        .filter(|host| ends_with_domain(host, domain))
        .inspect(|host| trace!("Collecting: {:?}", host))
        .collect();

    Ok(subdomains)
}
