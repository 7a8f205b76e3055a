use super::{DomainPattern, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// region:        --- Module info

pub struct HackerTarget {}

impl HackerTarget {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for HackerTarget {
    fn name(&self) -> String {
        "subdomains/hackertarget".to_string()
    }

    fn description(&self) -> String {
        "Use hackertarget.com host search to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[async_trait]
impl SubdomainModule for HackerTarget {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let url = format!("https://api.hackertarget.com/hostsearch/?q={}", domain);
        let body = http.get_text(&url).await?;

        let subdomains = extract_subdomains(&body, domain)?;
        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// One `host,ip` record per line.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> Result<HashSet<String>> {
    let pattern = DomainPattern::new(domain)?;

    let subdomains = body
        .lines()
        .filter_map(|line| line.split(',').next())
        .filter(|subdomain| pattern.is_match(subdomain))
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .map(String::from)
        .collect();

    Ok(subdomains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::testing::CannedFetcher;

    fn domain() -> TargetDomain {
        TargetDomain::parse("example.com").unwrap()
    }

    #[test]
    fn takes_first_field_of_each_line() {
        let body = "www.example.com,93.184.216.34\r\nmail.example.com,93.184.216.35\nexample.org,1.2.3.4\n\nno-comma.example.com";

        let subdomains = extract_subdomains(body, &domain()).unwrap();
        let expected: HashSet<String> =
            ["www.example.com", "mail.example.com", "no-comma.example.com"]
                .into_iter()
                .map(String::from)
                .collect();
        assert_eq!(subdomains, expected);
    }

    #[test]
    fn api_error_text_yields_nothing() {
        let subdomains = extract_subdomains("API count exceeded - Increase Quota", &domain()).unwrap();
        assert!(subdomains.is_empty());
    }

    #[tokio::test]
    async fn enumerate_queries_the_domain_endpoint() {
        let http = CannedFetcher::new().with(
            "https://api.hackertarget.com/hostsearch/?q=example.com",
            "www.example.com,93.184.216.34",
        );

        let subdomains = HackerTarget::new().enumerate(&http, &domain()).await.unwrap();
        assert!(subdomains.contains("www.example.com"));
        assert_eq!(subdomains.len(), 1);
        assert_eq!(http.requested(), vec!["https://api.hackertarget.com/hostsearch/?q=example.com"]);
    }
}
