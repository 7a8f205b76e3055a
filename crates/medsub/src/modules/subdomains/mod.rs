pub mod anubis_db;
pub mod certificate_details;
pub mod crtsh;
pub mod hacker_target;
pub mod hudson_rock;
pub mod rapid_dns;

use super::{HttpFetch, Module};
use crate::model::TargetDomain;
use crate::Result;
use async_trait::async_trait;
use regex::Regex;
use std::collections::HashSet;

#[async_trait]
pub trait SubdomainModule: Module + Send + Sync {
    async fn enumerate(&self, http: &dyn HttpFetch, domain: &TargetDomain)
        -> Result<HashSet<String>>;
}

// region:        --- Matching rules

/// Strict rule: `^[0-9a-z.-]+.*DOMAIN$`, the domain being matched literally.
pub struct DomainPattern(Regex);

impl DomainPattern {
    pub fn new(domain: &TargetDomain) -> Result<Self> {
        let pattern = format!("^[0-9a-z.-]+.*{}$", regex::escape(domain.as_str()));
        Ok(Self(Regex::new(&pattern)?))
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.0.is_match(candidate)
    }
}

/// Loose rule: a plain suffix check, so `notexample.com` passes for `example.com`.
pub fn ends_with_domain(candidate: &str, domain: &TargetDomain) -> bool {
    candidate.ends_with(domain.as_str())
}

// endregion:     --- Matching rules
