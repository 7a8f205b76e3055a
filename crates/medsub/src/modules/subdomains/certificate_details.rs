use super::{DomainPattern, SubdomainModule};
use crate::model::TargetDomain;
use crate::modules::{HttpFetch, Module};
use crate::Result;
use async_trait::async_trait;
use lazy_regex::regex;
use select::document::Document;
use select::predicate::{Class, Name, Predicate};
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

// region:        --- Module info

pub struct CertificateDetails {}

impl CertificateDetails {
    pub fn new() -> Self {
        Self {}
    }
}

impl Module for CertificateDetails {
    fn name(&self) -> String {
        "subdomains/certificatedetails".to_string()
    }

    fn description(&self) -> String {
        "Use certificatedetails.com to find subdomains".to_string()
    }
}

// endregion:     --- Module info

#[async_trait]
impl SubdomainModule for CertificateDetails {
    #[instrument(name = "enumerate", level = "debug", fields(module = %self.name()), skip_all)]
    async fn enumerate(
        &self,
        http: &dyn HttpFetch,
        domain: &TargetDomain,
    ) -> Result<HashSet<String>> {
        let url = format!("https://certificatedetails.com/{}", domain);
        let body = http.get_text(&url).await?;

        let subdomains = extract_subdomains(&body, domain)?;
        debug!("{} collected", subdomains.len());
        Ok(subdomains)
    }
}

/// Names are listed in `div.columns.truncate.text-center` blocks, one per `<br>`.
pub fn extract_subdomains(body: &str, domain: &TargetDomain) -> Result<HashSet<String>> {
    let pattern = DomainPattern::new(domain)?;
    let line_break = regex!(r"(?i)<br\s*/?>");
    let document = Document::from(body);

    let subdomains = document
        .find(
            Name("div")
                .and(Class("columns"))
                .and(Class("truncate"))
                .and(Class("text-center")),
        )
        .flat_map(|div| {
            line_break
                .split(&div.inner_html())
                .map(|piece| piece.trim().to_string())
                .collect::<Vec<String>>()
        })
        .filter(|subdomain| pattern.is_match(subdomain))
        .inspect(|subdomain| trace!("Collecting: {:?}", subdomain))
        .collect();

    Ok(subdomains)
}
