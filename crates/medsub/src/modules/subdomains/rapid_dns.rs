use super::{ends_with_domain, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use select::document::Document;
use select::predicate::Name;
use std::collections::HashSet;
use tracing::{debug, info, instrument, trace, warn};

// upper bound on the page count advertised by page 1
const MAX_PAGES: u32 = 100;

// region:        --- Module info

pub struct RapidDns {}

impl RapidDns {
    pub fn new() -> Self {
        Self {}
    }

    fn page_url(domain: &TargetDomain, page: u32) -> String {
        format!("https://rapiddns.io/s/{}?page={}", domain, page)
    }
}

impl Module for RapidDns {
    fn name(&self) -> String {
        "subdomains/rapiddns".to_string()
    }

    fn description(&self) -> String {
        "Use rapiddns.io paginated records to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[async_trait]
impl SubdomainModule for RapidDns {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let first_page = http.get_text(&Self::page_url(domain, 1)).await?;
        let max_page = page_count(&first_page, domain)?;
        info!("{} pages to visit", max_page);

        let mut subdomains = extract_subdomains(&first_page, domain);

        // page count only known after page 1, the rest follows in order
        for page in 2..=max_page {
            let body = http.get_text(&Self::page_url(domain, page)).await?;
            let new_subdomains = extract_subdomains(&body, domain);
            trace!("page {}: {} collected", page, new_subdomains.len());
            subdomains.extend(new_subdomains);
        }

        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// Highest `?page=N` linked for this domain, 1 when the page has no navigation.
pub fn page_count(body: &str, domain: &TargetDomain) -> Result<u32> {
    let page_link = Regex::new(&format!(
        r"/s/{}\?page=([0-9]+)",
        regex::escape(domain.as_str())
    ))?;

    // only digits are captured, a parse failure means the number overflowed
    let max_page = page_link
        .captures_iter(body)
        .map(|captures| captures[1].parse::<u64>().unwrap_or(u64::MAX))
        .fold(1, u64::max);

    if max_page > u64::from(MAX_PAGES) {
        warn!("{} pages advertised, capping at {}", max_page, MAX_PAGES);
        return Ok(MAX_PAGES);
    }

    Ok(max_page as u32)
}

/// Every table cell whose text ends with the domain.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> HashSet<String> {
    Document::from(body)
        .find(Name("td"))
        .map(|td| td.text())
        .filter(|subdomain| ends_with_domain(subdomain, domain))
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .collect()
}
