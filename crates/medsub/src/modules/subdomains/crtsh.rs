use super::{DomainPattern, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// region:        --- Module info

pub struct CrtSh {}

impl CrtSh {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for CrtSh {
    fn name(&self) -> String {
        "subdomains/crtsh".to_string()
    }

    fn description(&self) -> String {
        "Use crt.sh certificate transparency logs to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[derive(Debug, Deserialize)]
pub struct CrtShEntry {
    #[serde(default)]
    pub common_name: Option<String>,
    pub name_value: String,
}

#[async_trait]
impl SubdomainModule for CrtSh {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let url = format!(
            "https://crt.sh/?q={}&exclude=expired&output=json",
            domain
        );
        let body = http.get_text(&url).await?;

        let subdomains = extract_subdomains(&body, domain)?;
        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// `common_name` and every SAN line of `name_value` are candidates.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> Result<HashSet<String>> {
    let pattern = DomainPattern::new(domain)?;
    let crtsh_entries: Vec<CrtShEntry> = serde_json::from_str(body)?;

    let subdomains = crtsh_entries
        .into_iter()
        .flat_map(|entry| {
            let mut names: Vec<String> = entry.name_value.lines().map(String::from).collect();
            names.extend(entry.common_name);
            names
        })
        .filter(|subdomain| pattern.is_match(subdomain))
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .collect();

    Ok(subdomains)
}
