use serde::{Deserialize, Serialize};

/// Declarative expectation attached to an exercise.
///
/// A test case with no expected output, no output pattern and no required
/// constructs passes trivially once the submission compiles and runs without
/// a compile error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    /// Opaque input text, possibly empty. Carried for catalog fidelity; the
    /// platform currently submits an empty stdin to the execution service.
    #[serde(default)]
    pub input: String,
    /// Substring expected to appear in the program's stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_output: Option<String>,
    /// Regex the trimmed stdout must match, case-insensitively. Takes
    /// precedence over `expected_output` when both are present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_pattern: Option<String>,
    /// Construct names the submitted source must contain, probed
    /// heuristically against the source text.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_constructs: Vec<String>,
}

/// Normalized outcome of one remote compile+run round trip.
///
/// Created fresh per run and discarded once the verdict is rendered; never
/// persisted anywhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Compile-stage stderr, when the compiler produced any.
    pub compile_errors: Option<String>,
    /// Compile-stage stdout, when the compiler produced any.
    pub compile_output: Option<String>,
    /// Run-stage stderr, when the program produced any.
    pub runtime_errors: Option<String>,
    /// Run-stage stdout, possibly empty.
    pub stdout: String,
}

/// Aggregated pass/fail outcome of one verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub all_passed: bool,
    /// One diagnostic per failed check, in test-case order.
    pub failure_messages: Vec<String>,
}

impl Verdict {
    /// A passing verdict with no diagnostics.
    pub fn pass() -> Self {
        Self {
            all_passed: true,
            failure_messages: Vec::new(),
        }
    }

    /// A failing verdict carrying a single diagnostic.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            all_passed: false,
            failure_messages: vec![message.into()],
        }
    }

    /// Single display line: every failure message joined by `"; "`.
    pub fn summary(&self) -> String {
        self.failure_messages.join("; ")
    }
}

/// What the UI layer renders after a run: the raw execution artifacts,
/// separate from the verdict banner.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub compile_output: Option<String>,
    pub runtime_errors: Option<String>,
    pub stdout: String,
}

impl From<&ExecutionResult> for Transcript {
    fn from(result: &ExecutionResult) -> Self {
        Self {
            compile_output: result.compile_output.clone(),
            runtime_errors: result.runtime_errors.clone(),
            stdout: result.stdout.clone(),
        }
    }
}

/// Everything one verification run produces for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub transcript: Transcript,
    pub verdict: Verdict,
}
