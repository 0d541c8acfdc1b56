//! Test execution and reduction of `go test -json` event streams.

pub mod aggregator;
pub mod runner;

use serde::{Deserialize, Serialize};

pub use aggregator::TestRunAggregator;
pub use runner::GoTestRunner;

/// What to do with event lines the aggregator cannot use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticPolicy {
    /// Skip silently.
    #[default]
    Ignore,
    /// Skip, and record a non-fatal parse error.
    Report,
}

/// Action field of a test event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TestAction {
    /// Test binary started.
    Start,
    /// Test started running.
    Run,
    /// Test paused.
    Pause,
    /// Test continued.
    Cont,
    /// Test or package passed.
    Pass,
    /// Benchmark printed output but did not fail.
    Bench,
    /// Test or package failed.
    Fail,
    /// Printed output.
    Output,
    /// Test or package skipped.
    Skip,
    /// Anything the tool may add later.
    Other(String),
}

impl From<String> for TestAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "start" => Self::Start,
            "run" => Self::Run,
            "pause" => Self::Pause,
            "cont" => Self::Cont,
            "pass" => Self::Pass,
            "bench" => Self::Bench,
            "fail" => Self::Fail,
            "output" => Self::Output,
            "skip" => Self::Skip,
            _ => Self::Other(s),
        }
    }
}

/// One line of `go test -json` output. Unused fields are dropped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestEvent {
    /// Event kind.
    #[serde(rename = "Action")]
    pub action: TestAction,
    /// Package the event belongs to.
    #[serde(rename = "Package", default)]
    pub package: String,
    /// Output text for `output` events.
    #[serde(rename = "Output", default)]
    pub output: String,
}

/// Accumulated state for one package.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageTestResult {
    /// Package key.
    pub package: String,
    /// Last pass/fail verdict.
    pub passed: bool,
    /// Tests ran in this package.
    pub has_tests: bool,
    /// Test files exist in this package.
    pub has_test_files: bool,
    /// Statement coverage, zero when not measured.
    pub coverage_percent: f64,
}

/// Module-level reduction over every package.
///
/// Coverage figures are `None` when they could not be computed, which is
/// distinct from a measured 0%.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModuleTestSummary {
    /// Some package ran tests.
    pub has_tests: bool,
    /// Some package has test files.
    pub has_test_files: bool,
    /// Every package with tests passed.
    pub all_tests_passed: bool,
    /// Distinct packages seen.
    pub num_packages: usize,
    /// Packages that ran tests.
    pub num_packages_with_tests: usize,
    /// Packages with test files.
    pub num_packages_with_test_files: usize,
    /// Packages whose last verdict was pass.
    pub num_packages_tests_passed: usize,
    /// Smallest non-zero package coverage.
    #[serde(rename = "package_coverage_min", skip_serializing_if = "Option::is_none")]
    pub min_coverage: Option<f64>,
    /// Coverage sum over all packages divided by packages with tests.
    #[serde(rename = "package_coverage_avg", skip_serializing_if = "Option::is_none")]
    pub avg_coverage: Option<f64>,
}
