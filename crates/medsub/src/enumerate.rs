use crate::error::ErrorKind;
use crate::model::{ResultSet, TargetDomain};
use crate::modules::subdomains::SubdomainModule;
use crate::modules::HttpFetch;
use futures::{stream, StreamExt};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

// region:        --- Models

/// A source that could not be searched.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Outcome of one run: sorted subdomains plus the sources that failed.
#[derive(Debug, Default)]
pub struct Enumeration {
    pub subdomains: Vec<String>,
    pub failures: Vec<SourceFailure>,
}

// endregion:     --- Models

/// Runs every source against `domain` and merges their findings.
///
/// Sources run concurrently, one worker each. A failing source is recorded
/// in [`Enumeration::failures`] and never stops the others, so a run where
/// everything fails still ends with an empty list.
#[instrument(name = "enumerate", level = "info", skip_all, fields(domain = %domain))]
pub async fn enumerate(
    http: &dyn HttpFetch,
    sources: Vec<Box<dyn SubdomainModule>>,
    domain: &TargetDomain,
) -> Enumeration {
    let concurrency = sources.len().max(1);
    info!("{} sources to search", sources.len());

    let result_set = Arc::new(Mutex::new(ResultSet::new()));
    let failures = Arc::new(Mutex::new(Vec::new()));

    stream::iter(sources.into_iter())
        .for_each_concurrent(concurrency, |module| {
            let result_set = Arc::clone(&result_set);
            let failures = Arc::clone(&failures);
            async move {
                match module.enumerate(http, domain).await {
                    Ok(subdomains) => {
                        let found = subdomains.len();
                        let new = result_set.lock().await.merge(subdomains);
                        debug!("{}: {} found, {} new", module.name(), found, new);
                    }
                    Err(err) => {
                        warn!(source = %module.name(), kind = %err.kind(), "Reason: {}", err);
                        failures.lock().await.push(SourceFailure {
                            source: module.name(),
                            kind: err.kind(),
                            message: err.to_string(),
                        });
                    }
                }
            }
        })
        .await;

    let result_set = Arc::try_unwrap(result_set)
        .map(Mutex::into_inner)
        .unwrap_or_default();
    let failures = Arc::try_unwrap(failures)
        .map(Mutex::into_inner)
        .unwrap_or_default();

    info!(
        "{} subdomains found, {} sources failed",
        result_set.len(),
        failures.len()
    );

    Enumeration {
        subdomains: result_set.into_sorted(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::subdomains::anubis_db::AnubisDb;
    use crate::modules::subdomains::certificate_details::CertificateDetails;
    use crate::modules::testing::CannedFetcher;
    use crate::modules::{subdomains_modules, Module};
    use crate::{Error, Result};
    use async_trait::async_trait;
    use std::collections::HashSet;

    fn domain() -> TargetDomain {
        TargetDomain::parse("example.com").unwrap()
    }

    struct Fixed {
        name: &'static str,
        outcome: std::result::Result<Vec<&'static str>, ErrorKind>,
    }

    impl Module for Fixed {
        fn name(&self) -> String {
            self.name.to_string()
        }

        fn description(&self) -> String {
            String::new()
        }
    }

    #[async_trait]
    impl SubdomainModule for Fixed {
        async fn enumerate(
            &self,
            _http: &dyn HttpFetch,
            _domain: &TargetDomain,
        ) -> Result<HashSet<String>> {
            match &self.outcome {
                Ok(subdomains) => Ok(subdomains.iter().map(|s| s.to_string()).collect()),
                Err(ErrorKind::Transport) => Err(Error::HttpStatus {
                    url: format!("https://{}", self.name),
                    status: 500,
                }),
                Err(_) => Err(Error::UnexpectedPayload("garbage".to_string())),
            }
        }
    }

    fn fixed(
        name: &'static str,
        outcome: std::result::Result<Vec<&'static str>, ErrorKind>,
    ) -> Box<dyn SubdomainModule> {
        Box::new(Fixed { name, outcome })
    }

    #[tokio::test]
    async fn failing_source_does_not_block_others() {
        let sources = vec![
            fixed("a", Err(ErrorKind::Transport)),
            fixed("b", Ok(vec!["b.example.com"])),
            fixed("c", Ok(vec!["c.example.com"])),
            fixed("d", Err(ErrorKind::Parse)),
            fixed("e", Ok(vec!["e.example.com"])),
            fixed("f", Ok(vec!["f.example.com"])),
        ];

        let enumeration = enumerate(&CannedFetcher::new(), sources, &domain()).await;

        assert_eq!(
            enumeration.subdomains,
            vec!["b.example.com", "c.example.com", "e.example.com", "f.example.com"]
        );

        let mut failed: Vec<(String, ErrorKind)> = enumeration
            .failures
            .iter()
            .map(|failure| (failure.source.clone(), failure.kind))
            .collect();
        failed.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            failed,
            vec![
                ("a".to_string(), ErrorKind::Transport),
                ("d".to_string(), ErrorKind::Parse)
            ]
        );
    }

    #[tokio::test]
    async fn failure_carries_kind_and_reason() {
        let sources = vec![fixed("down", Err(ErrorKind::Transport))];

        let enumeration = enumerate(&CannedFetcher::new(), sources, &domain()).await;

        let failure = &enumeration.failures[0];
        assert_eq!(failure.source, "down");
        assert_eq!(failure.kind, ErrorKind::Transport);
        assert!(failure.message.contains("status: 500"), "{}", failure.message);
    }

    #[tokio::test]
    async fn duplicates_across_sources_appear_once_sorted() {
        let sources = vec![
            fixed("a", Ok(vec!["www.example.com", "api.example.com"])),
            fixed("b", Ok(vec!["api.example.com", "www.example.com"])),
            fixed("c", Ok(vec!["cdn.example.com", "api.example.com"])),
        ];

        let enumeration = enumerate(&CannedFetcher::new(), sources, &domain()).await;

        assert!(enumeration.failures.is_empty());
        assert_eq!(
            enumeration.subdomains,
            vec!["api.example.com", "cdn.example.com", "www.example.com"]
        );
    }

    #[tokio::test]
    async fn every_source_failing_yields_empty_list() {
        // nothing canned, every request answers 404
        let http = CannedFetcher::new();

        let enumeration = enumerate(&http, subdomains_modules(), &domain()).await;

        assert!(enumeration.subdomains.is_empty());
        assert_eq!(enumeration.failures.len(), subdomains_modules().len());
        assert!(enumeration
            .failures
            .iter()
            .all(|failure| failure.kind == ErrorKind::Transport));
    }

    #[tokio::test]
    async fn rules_apply_per_source() {
        let http = CannedFetcher::new()
            .with(
                "https://anubisdb.com/anubis/subdomains/example.com",
                r#"["a.example.com","b.example.com","evil.com"]"#,
            )
            .with(
                "https://certificatedetails.com/example.com",
                r#"<div class="columns truncate text-center">a.example.com<br/>c.example.com</div>"#,
            );
        let sources: Vec<Box<dyn SubdomainModule>> =
            vec![Box::new(AnubisDb::new()), Box::new(CertificateDetails::new())];

        let enumeration = enumerate(&http, sources, &domain()).await;

        assert!(enumeration.failures.is_empty());
        assert_eq!(
            enumeration.subdomains,
            vec!["a.example.com", "b.example.com", "c.example.com"]
        );
    }

    #[tokio::test]
    async fn no_sources_is_a_valid_run() {
        let enumeration = enumerate(&CannedFetcher::new(), Vec::new(), &domain()).await;
        assert!(enumeration.subdomains.is_empty());
        assert!(enumeration.failures.is_empty());
    }
}
