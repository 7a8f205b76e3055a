use super::{ends_with_domain, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// region:        --- Module info

pub struct AnubisDb {}

impl AnubisDb {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for AnubisDb {
    fn name(&self) -> String {
        "subdomains/anubisdb".to_string()
    }

    fn description(&self) -> String {
        "Use anubisdb.com to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[async_trait]
impl SubdomainModule for AnubisDb {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let url = format!("https://anubisdb.com/anubis/subdomains/{}", domain);
        let body = http.get_text(&url).await?;

        let subdomains = extract_subdomains(&body, domain)?;
        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// Body is a JSON array, non-string entries are ignored.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> Result<HashSet<String>> {
    let entries: Vec<Value> = match serde_json::from_str(body)? {
        Value::Array(entries) => entries,
        other => {
            return Err(Error::UnexpectedPayload(format!(
                "expected an array, got {}",
                other
            )))
        }
    };

    Ok(entries
        .iter()
        .filter_map(Value::as_str)
        .filter(|subdomain| ends_with_domain(subdomain, domain))
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .map(String::from)
        .collect())
}
