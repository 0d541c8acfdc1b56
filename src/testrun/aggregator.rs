//! Folds test events into per-package results and a module summary.

use std::collections::BTreeMap;

use super::{DiagnosticPolicy, ModuleTestSummary, PackageTestResult, TestAction, TestEvent};
use crate::error::{AggregateError, Error};

const NO_TESTS_MARKER: &str = "no tests to run";
const COVERAGE_PREFIX: &str = "coverage:";

/// Streaming state machine over `go test -json` events.
///
/// Packages are created on first sighting and updated in event order, last
/// write wins per field.
#[derive(Debug, Default)]
pub struct TestRunAggregator {
    policy: DiagnosticPolicy,
    packages: BTreeMap<String, PackageTestResult>,
    diagnostics: AggregateError,
}

impl TestRunAggregator {
    /// Creates an empty aggregator.
    #[must_use]
    pub fn new(policy: DiagnosticPolicy) -> Self {
        Self { policy, ..Self::default() }
    }

    /// Feeds one raw line. Blank lines are skipped; malformed lines are
    /// skipped and, under [`DiagnosticPolicy::Report`], recorded.
    pub fn push_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        match serde_json::from_str::<TestEvent>(line) {
            Ok(event) => self.apply(&event),
            Err(e) => self.diagnose(|| Error::parse("go test event", format!("{e}: {line}"))),
        }
    }

    /// Applies one event.
    pub fn apply(&mut self, event: &TestEvent) {
        let pkg = self
            .packages
            .entry(event.package.clone())
            .or_insert_with(|| PackageTestResult {
                package: event.package.clone(),
                ..PackageTestResult::default()
            });

        let mut diagnostic = None;
        match &event.action {
            TestAction::Pass => {
                pkg.passed = true;
                pkg.has_test_files = true;
                pkg.has_tests = true;
            }
            TestAction::Fail => {
                pkg.passed = false;
                pkg.has_test_files = true;
                pkg.has_tests = true;
            }
            TestAction::Output if event.output.contains(NO_TESTS_MARKER) => {
                pkg.has_test_files = true;
                pkg.has_tests = false;
            }
            TestAction::Output if event.output.starts_with(COVERAGE_PREFIX) => {
                match parse_coverage(&event.output) {
                    Some(cov) => {
                        pkg.coverage_percent = cov;
                        pkg.has_test_files = true;
                        pkg.has_tests = true;
                    }
                    None => {
                        diagnostic = Some(format!(
                            "no percentage in {:?} for {}",
                            event.output.trim_end(),
                            event.package
                        ));
                    }
                }
            }
            TestAction::Other(action) => {
                diagnostic = Some(format!("unrecognized action {action:?} for {}", event.package));
            }
            _ => {}
        }

        if let Some(message) = diagnostic {
            self.diagnose(|| Error::parse("go test event", message));
        }
    }

    fn diagnose(&mut self, err: impl FnOnce() -> Error) {
        if self.policy == DiagnosticPolicy::Report {
            self.diagnostics.push(err());
        }
    }

    /// `true` once any package's last verdict is a failure.
    #[must_use]
    pub fn any_failed(&self) -> bool {
        self.packages.values().any(|p| p.has_tests && !p.passed)
    }

    /// Per-package state, keyed by package.
    #[must_use]
    pub fn packages(&self) -> &BTreeMap<String, PackageTestResult> {
        &self.packages
    }

    /// Reduces the current state to a module summary.
    ///
    /// The minimum ignores zero coverage while the average divides the sum
    /// over all packages by the number of packages with tests.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> ModuleTestSummary {
        let mut s = ModuleTestSummary::default();
        let mut coverage_sum = 0.0;

        for pkg in self.packages.values() {
            s.num_packages += 1;
            if pkg.has_tests {
                s.num_packages_with_tests += 1;
            }
            if pkg.has_test_files {
                s.num_packages_with_test_files += 1;
            }
            if pkg.passed {
                s.num_packages_tests_passed += 1;
            }
            if pkg.coverage_percent > 0.0 {
                s.min_coverage = Some(s.min_coverage.map_or(pkg.coverage_percent, |m: f64| {
                    m.min(pkg.coverage_percent)
                }));
            }
            coverage_sum += pkg.coverage_percent;
        }

        s.has_tests = s.num_packages_with_tests > 0;
        s.has_test_files = s.num_packages_with_test_files > 0;
        s.all_tests_passed = s.has_tests && s.num_packages_tests_passed == s.num_packages_with_tests;
        if s.has_tests {
            s.avg_coverage = Some(coverage_sum / s.num_packages_with_tests as f64);
        }
        s
    }

    /// Consumes the aggregator, returning the summary and any diagnostics.
    #[must_use]
    pub fn finish(self) -> (ModuleTestSummary, AggregateError) {
        (self.summary(), self.diagnostics)
    }
}

/// First whitespace token ending in `%`, parsed as a percentage.
fn parse_coverage(text: &str) -> Option<f64> {
    let token = text.split_whitespace().find(|t| t.ends_with('%'))?;
    token.trim_end_matches('%').parse().ok()
}
