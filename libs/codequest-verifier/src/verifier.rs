// Verification orchestration.
//
// One run is: submit the source for a single compile+run round trip, then
// evaluate every test case against the submitted source and the captured
// stdout. The remote call is the only suspend point; evaluation is
// synchronous and in-memory.
//
// Verdict rules, in order:
// - transport failure          -> terminal, EXECUTION_FAILED_MESSAGE
// - compile stderr present     -> terminal, COMPILE_FAILED_MESSAGE, no
//                                 test-case evaluation
// - runtime stderr present     -> NOT terminal; stdout (possibly empty) is
//                                 still checked against every test case and
//                                 the error text rides along in the
//                                 transcript

use codequest_common::types::{RunOutcome, TestCase, Transcript, Verdict};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constructs;
use crate::output;
use crate::piston::ExecutionClient;

/// Verdict message for a compile-stage failure.
pub const COMPILE_FAILED_MESSAGE: &str = "Compilation failed. Please check your code for errors.";

/// Verdict message when the execution service call itself fails. Worded
/// differently from a compile failure so the two are never conflated.
pub const EXECUTION_FAILED_MESSAGE: &str = "Execution failed. Please check your code.";

/// Lifecycle of a single verification run. Used for log correlation and for
/// callers that track in-flight runs per exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPhase {
    Idle,
    Compiling,
    Running,
    Evaluated,
}

/// Drives verification runs against a fixed execution client.
#[derive(Debug, Clone)]
pub struct Verifier {
    client: ExecutionClient,
}

impl Verifier {
    pub fn new(client: ExecutionClient) -> Self {
        Self { client }
    }

    /// Drive one verification pass for one submission.
    ///
    /// Never returns an error: transport failures, compile errors and test
    /// mismatches all fold into the verdict, so the caller always has
    /// something to display. Re-running with identical source and identical
    /// remote behavior yields an identical verdict and message order.
    pub async fn run_verification(&self, source: &str, test_cases: &[TestCase]) -> RunOutcome {
        info!(
            phase = ?RunPhase::Compiling,
            test_cases = test_cases.len(),
            source_size = source.len(),
            "Compiling..."
        );

        // stdin is unused by the platform; test inputs stay in the catalog.
        let result = match self.client.execute(source, "").await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Execution service call failed");
                return RunOutcome {
                    transcript: Transcript::default(),
                    verdict: Verdict::fail(EXECUTION_FAILED_MESSAGE),
                };
            }
        };

        if result.compile_errors.is_some() {
            info!(phase = ?RunPhase::Evaluated, "Compilation rejected the submission");
            return RunOutcome {
                transcript: Transcript::from(&result),
                verdict: Verdict::fail(COMPILE_FAILED_MESSAGE),
            };
        }

        info!(phase = ?RunPhase::Running, "Running...");
        if let Some(runtime_errors) = &result.runtime_errors {
            // A runtime error does not short-circuit evaluation: whatever
            // stdout was produced is still checked below.
            warn!(
                stderr = %runtime_errors.lines().next().unwrap_or(""),
                "Submission produced runtime errors"
            );
        }

        let verdict = evaluate(source, &result.stdout, test_cases);
        info!(
            phase = ?RunPhase::Evaluated,
            all_passed = verdict.all_passed,
            failures = verdict.failure_messages.len(),
            "Evaluation complete"
        );

        RunOutcome {
            transcript: Transcript::from(&result),
            verdict,
        }
    }
}

/// The synchronous half of a run: construct checks then output matching for
/// every test case, strictly in input order.
///
/// A test case passes iff all its construct checks pass and its output
/// check passes. The verdict is the AND over all test cases, vacuously true
/// for an empty slice.
pub fn evaluate(source: &str, stdout: &str, test_cases: &[TestCase]) -> Verdict {
    let mut failure_messages = Vec::new();

    for (index, test_case) in test_cases.iter().enumerate() {
        let mut messages = constructs::missing_constructs(source, &test_case.required_constructs);
        if let Err(message) = output::check_output(stdout, test_case) {
            messages.push(message);
        }

        if messages.is_empty() {
            debug!(test = index + 1, "Test passed");
        } else {
            debug!(test = index + 1, failures = messages.len(), "Test failed");
        }
        failure_messages.extend(messages);
    }

    Verdict {
        all_passed: failure_messages.is_empty(),
        failure_messages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> TestCase {
        TestCase::default()
    }

    #[test]
    fn empty_test_cases_pass_vacuously() {
        let verdict = evaluate("int main() {}", "anything", &[]);
        assert!(verdict.all_passed);
        assert!(verdict.failure_messages.is_empty());
    }

    #[test]
    fn bare_test_case_passes_once_execution_succeeded() {
        let verdict = evaluate("int main() {}", "", &[case()]);
        assert!(verdict.all_passed);
    }

    #[test]
    fn missing_construct_fails_the_run() {
        let test_case = TestCase {
            required_constructs: vec!["cout".to_string()],
            ..case()
        };
        let verdict = evaluate(
            "#include <iostream>\nint main(){return 0;}",
            "",
            &[test_case],
        );
        assert!(!verdict.all_passed);
        assert_eq!(
            verdict.failure_messages,
            vec!["Missing required construct: cout"]
        );
    }

    #[test]
    fn passing_output_and_constructs() {
        let test_case = TestCase {
            expected_output: Some("8 is even.".to_string()),
            required_constructs: vec!["cout".to_string(), "if".to_string()],
            ..case()
        };
        let source = "#include <iostream>\nint main(){int n=8;\
                      if(n%2==0){std::cout<<n<<\" is even.\";}return 0;}";
        let verdict = evaluate(source, "8 is even.\n", &[test_case]);
        assert!(verdict.all_passed, "{:?}", verdict.failure_messages);
    }

    #[test]
    fn one_failing_case_does_not_abort_the_rest() {
        let failing = TestCase {
            expected_output: Some("nope".to_string()),
            ..case()
        };
        let also_failing = TestCase {
            required_constructs: vec!["switch".to_string()],
            ..case()
        };
        let verdict = evaluate("int main() {}", "hello", &[failing, also_failing]);
        assert!(!verdict.all_passed);
        assert_eq!(
            verdict.failure_messages,
            vec![
                "Expected output to contain: nope",
                "Missing required construct: switch",
            ]
        );
    }

    #[test]
    fn messages_keep_test_case_order() {
        let first = TestCase {
            required_constructs: vec!["for".to_string()],
            expected_output: Some("unreachable".to_string()),
            ..case()
        };
        let second = TestCase {
            required_constructs: vec!["while".to_string()],
            ..case()
        };
        let verdict = evaluate("int main() {}", "", &[first, second]);
        assert_eq!(
            verdict.failure_messages,
            vec![
                "Missing required construct: for",
                "Expected output to contain: unreachable",
                "Missing required construct: while",
            ]
        );
        assert_eq!(
            verdict.summary(),
            "Missing required construct: for; Expected output to contain: unreachable; \
             Missing required construct: while"
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let test_cases = vec![
            TestCase {
                expected_output: Some("x".to_string()),
                ..case()
            },
            TestCase {
                required_constructs: vec!["class".to_string()],
                ..case()
            },
        ];
        let first = evaluate("int main() {}", "", &test_cases);
        let second = evaluate("int main() {}", "", &test_cases);
        assert_eq!(first, second);
    }
}
