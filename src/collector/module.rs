//! Enriches a single module from every enabled source.

use std::path::PathBuf;

use super::stats::{GitStats, ModuleStats};
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::{AggregateError, Error, Result};
use crate::gitstats::{self, RepoStorage};
use crate::resolver::{UrlKind, UrlResolver};
use crate::sources::{
    scan_files, scan_readme, AwesomeListChecker, CodecovClient, GitHubClient, GoReportCardClient,
};
use crate::testrun::GoTestRunner;

/// Runs every stage for one module and keeps going past failures.
pub struct ModuleStatsCollector<'a> {
    ctx: &'a ServiceContext,
    resolver: &'a dyn UrlResolver,
    config: &'a Config,
    storage: RepoStorage,
}

impl<'a> ModuleStatsCollector<'a> {
    /// Creates a collector; clones go under `config.storage_dir`.
    pub fn new(ctx: &'a ServiceContext, resolver: &'a dyn UrlResolver, config: &'a Config) -> Self {
        Self { ctx, resolver, config, storage: RepoStorage::new(&config.storage_dir) }
    }

    /// Collects everything obtainable for `name`.
    ///
    /// The record always carries the identity. Each failing stage adds one
    /// error, tagged with the stage name, and never stops later stages.
    pub fn collect(&self, name: &str) -> (ModuleStats, AggregateError) {
        let mut stats = ModuleStats::new(name);
        let mut errors = AggregateError::new();
        let sources = self.config.sources;

        stats.git_url = stage(&mut errors, "git url", true, || {
            self.resolver.resolve(UrlKind::SourceRepo, name)
        });
        stats.github_url = stage(&mut errors, "github url", true, || {
            self.resolver.resolve(UrlKind::CanonicalHost, name)
        });

        let needs_copy = sources.git || sources.files || sources.readme || sources.tests;
        let local = stage(&mut errors, "clone", needs_copy, || {
            let url = require(stats.git_url.as_ref(), "source repository URL")?;
            self.storage.fetch(&*self.ctx.fs, &*self.ctx.git, url)
        });

        stats.git = stage(&mut errors, "git", sources.git, || self.git_stats(local.as_ref()));
        stats.codecov = stage(&mut errors, "codecov", sources.codecov, || {
            let url = require(stats.github_url.as_ref(), "GitHub URL")?;
            CodecovClient::new(&*self.ctx.http, &self.config.codecov_base_url).repo_stats(url)
        });
        stats.goreportcard = stage(&mut errors, "goreportcard", sources.goreportcard, || {
            GoReportCardClient::new(&*self.ctx.http, &self.config.goreportcard_base_url).report(name)
        });
        stats.files = stage(&mut errors, "files", sources.files, || {
            scan_files(&*self.ctx.fs, require(local.as_ref(), "local copy")?)
        });
        stats.readme = stage(&mut errors, "readme", sources.readme, || {
            scan_readme(&*self.ctx.fs, require(local.as_ref(), "local copy")?)
        });
        stats.awesomelists = stage(&mut errors, "awesomelists", sources.awesomelists, || {
            let url = require(stats.github_url.as_ref(), "GitHub URL")?;
            AwesomeListChecker::new(&*self.ctx.http, &self.config.awesome_list_url).check(url)
        });
        stats.github = stage(&mut errors, "github", sources.github, || {
            let url = require(stats.github_url.as_ref(), "GitHub URL")?;
            GitHubClient::new(&*self.ctx.http, self.config.github_token.as_deref()).repo_stats(url)
        });
        stats.gotest = stage(&mut errors, "gotest", sources.tests, || {
            let dir = require(local.as_ref(), "local copy")?;
            GoTestRunner::new(&*self.ctx.shell, self.config.test_diagnostics).run(dir)
        })
        .map(|(summary, diagnostics)| {
            errors.append_with_context("gotest", diagnostics);
            summary
        });

        (stats, errors)
    }

    fn git_stats(&self, local: Option<&PathBuf>) -> Result<GitStats> {
        let dir = require(local, "local copy")?;
        let raw = self.ctx.git.log(dir).map_err(|e| Error::Process {
            command: "git log".to_string(),
            message: e.to_string(),
        })?;
        let entries = gitstats::parse_log(&raw)?;
        let summary = gitstats::summarize(&entries, self.ctx.clock.now())?;
        Ok(GitStats::from(&summary))
    }
}

/// Runs one enabled stage, recording its failure under `source`.
fn stage<T>(
    errors: &mut AggregateError,
    source: &str,
    enabled: bool,
    run: impl FnOnce() -> Result<T>,
) -> Option<T> {
    if !enabled {
        return None;
    }
    tracing::debug!(source, "collecting");
    match run() {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err.context(source));
            None
        }
    }
}

fn require<'v, T>(value: Option<&'v T>, what: &str) -> Result<&'v T> {
    value.ok_or_else(|| Error::DataAbsent(format!("no {what}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::test_support::healthy_context;
    use crate::config::SourceSwitches;
    use url::Url;

    /// Maps every name to `https://github.com/acme/widget`, or fails.
    struct FixedResolver {
        fail: bool,
    }

    impl UrlResolver for FixedResolver {
        fn resolve(&self, kind: UrlKind, name: &str) -> Result<Url> {
            if self.fail {
                return Err(Error::Resolution {
                    kind,
                    name: name.to_string(),
                    reason: "no go-import tag".into(),
                });
            }
            Ok(Url::parse("https://github.com/acme/widget").unwrap())
        }
    }

    fn config(tests: bool) -> Config {
        Config {
            sources: SourceSwitches { goreportcard: false, tests, ..SourceSwitches::default() },
            ..Config::default()
        }
    }

    const LOG: &str = "1716940800 a@acme.dev\n1716854400 b@acme.dev\n1716768000 a@acme.dev";

    #[test]
    fn healthy_module_fills_every_enabled_group() {
        let ctx = healthy_context(Ok(LOG.to_string()));
        let resolver = FixedResolver { fail: false };
        let config = config(true);

        let (stats, errors) =
            ModuleStatsCollector::new(&ctx, &resolver, &config).collect("github.com/acme/widget");

        assert!(errors.is_empty(), "{errors}");
        let git = stats.git.as_ref().unwrap();
        assert_eq!(git.num_contributors, 2);
        assert_eq!(git.last_commit, "2024-05-29");
        assert_eq!(git.last_commit_days_since, 3);
        assert_eq!(stats.github.as_ref().unwrap().repo_stars, 42);
        assert_eq!(stats.codecov.as_ref().unwrap().coverage, 71.5);
        assert!(stats.files.as_ref().unwrap().has_tests);
        assert!(!stats.readme.as_ref().unwrap().deprecated);
        assert!(stats.awesomelists.as_ref().unwrap().is_mentioned);
        assert!(stats.gotest.as_ref().unwrap().all_tests_passed);
        assert!(stats.goreportcard.is_none());
    }

    #[test]
    fn git_failure_leaves_other_groups_intact() {
        let ctx = healthy_context(Err("fatal: not a git repository".to_string()));
        let resolver = FixedResolver { fail: false };
        let config = config(false);

        let (stats, errors) =
            ModuleStatsCollector::new(&ctx, &resolver, &config).collect("github.com/acme/widget");

        assert_eq!(errors.len(), 1);
        assert!(errors.to_string().starts_with("git: git log failed"));
        assert!(stats.git.is_none());
        assert!(stats.github.is_some());
        assert!(stats.codecov.is_some());

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["can_get_git"], false);
        assert!(json.get("git_num_contributors").is_none());
        assert_eq!(json["github_repo_stars"], 42);
    }

    #[test]
    fn unresolvable_module_still_yields_identity() {
        let ctx = healthy_context(Ok(LOG.to_string()));
        let resolver = FixedResolver { fail: true };
        let config = config(false);

        let (stats, errors) =
            ModuleStatsCollector::new(&ctx, &resolver, &config).collect("example.com/lost");

        assert_eq!(stats.id, "example.com/lost");
        assert!(stats.availability().iter().all(|(_, ok)| !ok));
        assert!(errors.iter().any(|e| matches!(
            e,
            Error::Context { context, source } if context == "git url"
                && matches!(**source, Error::Resolution { .. })
        )));
        assert!(errors.iter().any(|e| e.to_string() == "clone: no source repository URL"));
        assert!(errors.iter().any(|e| e.to_string() == "github: no GitHub URL"));
    }

    #[test]
    fn disabled_stages_are_skipped_without_error() {
        let ctx = healthy_context(Ok(LOG.to_string()));
        let resolver = FixedResolver { fail: false };
        let config = Config {
            sources: SourceSwitches {
                git: false,
                codecov: false,
                goreportcard: false,
                files: false,
                readme: false,
                awesomelists: false,
                github: false,
                tests: false,
            },
            ..Config::default()
        };

        let (stats, errors) =
            ModuleStatsCollector::new(&ctx, &resolver, &config).collect("github.com/acme/widget");
        assert!(errors.is_empty());
        assert!(stats.git_url.is_some());
        assert!(stats.availability().iter().all(|(_, ok)| !ok));
    }
}
