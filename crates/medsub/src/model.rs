use crate::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// region:        --- Constants

const MAX_DOMAIN_LEN: usize = 253;

// endregion:     --- Constants

// region:        --- Models

/// Domain whose subdomains are enumerated.
///
/// Used both to build source URLs and as the suffix every candidate is
/// matched against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDomain(String);

impl TargetDomain {
    pub fn parse(raw: &str) -> Result<Self> {
        let domain = raw.trim().to_lowercase();

        if domain.is_empty() {
            return Err(Error::InvalidDomain("domain is empty".to_string()));
        }
        if domain.len() > MAX_DOMAIN_LEN {
            return Err(Error::InvalidDomain(format!(
                "domain is longer than {} characters",
                MAX_DOMAIN_LEN
            )));
        }
        if domain
            .chars()
            .any(|c| c.is_whitespace() || c == '/' || c == ':')
        {
            return Err(Error::InvalidDomain(format!("{:?} is not a domain", raw)));
        }
        if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
            return Err(Error::InvalidDomain(format!(
                "{:?} has an empty label",
                raw
            )));
        }

        Ok(Self(domain))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TargetDomain {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.write_str(&self.0)
    }
}

/// Subdomains collected during one run, deduplicated by exact string equality.
#[derive(Debug, Default)]
pub struct ResultSet {
    subdomains: HashSet<String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the subdomain was not collected yet.
    pub fn insert(&mut self, subdomain: String) -> bool {
        self.subdomains.insert(subdomain)
    }

    /// Merges a source's output, returns how many subdomains were new.
    pub fn merge(&mut self, subdomains: impl IntoIterator<Item = String>) -> usize {
        subdomains
            .into_iter()
            .map(|subdomain| self.insert(subdomain))
            .filter(|is_new| *is_new)
            .count()
    }

    pub fn len(&self) -> usize {
        self.subdomains.len()
    }

    /// Freezes the set into its final, lexicographically sorted form.
    pub fn into_sorted(self) -> Vec<String> {
        let mut subdomains: Vec<String> = self.subdomains.into_iter().collect();
        subdomains.sort();
        subdomains
    }
}

// endregion:     --- Models

// region:        --- Exporting utils

pub fn save_results(subdomains: &[String], path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(subdomains.join("\n").as_bytes())?;
    Ok(())
}

// endregion:     --- Exporting utils
