// Output expectation matching.
//
// Matching is deliberately forgiving: both sides are trimmed and the
// expected text only has to appear somewhere in stdout, so trailing
// prompts or extra newlines from the learner's program do not fail a
// test. Patterns are compiled case-insensitively.

use codequest_common::types::TestCase;
use regex::RegexBuilder;

/// Decide whether actual stdout satisfies a test case's output expectation.
///
/// Returns `Ok(())` when satisfied, or the diagnostic message to surface.
/// An `output_pattern` takes precedence over `expected_output`; a test case
/// with neither (or an empty expectation) is vacuously satisfied.
pub fn check_output(stdout: &str, test_case: &TestCase) -> Result<(), String> {
    let actual = stdout.trim();

    if let Some(pattern) = &test_case.output_pattern {
        return match RegexBuilder::new(pattern).case_insensitive(true).build() {
            Ok(regex) if regex.is_match(actual) => Ok(()),
            Ok(_) => Err(format!("Output did not match expected pattern: {pattern}")),
            // A malformed pattern in the catalog can never match; report it
            // as this test's failure rather than swallowing it.
            Err(_) => Err(format!("Invalid output pattern: {pattern}")),
        };
    }

    if let Some(expected) = &test_case.expected_output {
        let expected = expected.trim();
        if !expected.is_empty() && !actual.contains(expected) {
            return Err(format!("Expected output to contain: {expected}"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expecting(text: &str) -> TestCase {
        TestCase {
            expected_output: Some(text.to_string()),
            ..TestCase::default()
        }
    }

    fn matching(pattern: &str) -> TestCase {
        TestCase {
            output_pattern: Some(pattern.to_string()),
            ..TestCase::default()
        }
    }

    #[test]
    fn substring_match_tolerates_extra_output() {
        let test_case = expecting("Hello, World!");
        assert!(check_output("Hello, World!\nDone.\n", &test_case).is_ok());
    }

    #[test]
    fn substring_match_trims_both_sides() {
        let test_case = expecting("  8 is even.  ");
        assert!(check_output("\n8 is even.\n", &test_case).is_ok());
    }

    #[test]
    fn substring_mismatch_quotes_the_expectation() {
        let test_case = expecting("8 is even.");
        let message = check_output("8 is odd.", &test_case).unwrap_err();
        assert_eq!(message, "Expected output to contain: 8 is even.");
    }

    #[test]
    fn empty_stdout_fails_a_nonempty_expectation() {
        let test_case = expecting("anything");
        assert!(check_output("", &test_case).is_err());
    }

    #[test]
    fn empty_expectation_is_vacuous() {
        let test_case = expecting("   ");
        assert!(check_output("", &test_case).is_ok());
    }

    #[test]
    fn no_expectation_is_vacuous() {
        assert!(check_output("whatever", &TestCase::default()).is_ok());
        assert!(check_output("", &TestCase::default()).is_ok());
    }

    #[test]
    fn pattern_match_is_case_insensitive() {
        let test_case = matching(r"hello,\s*world");
        assert!(check_output("Hello, World!", &test_case).is_ok());
    }

    #[test]
    fn pattern_mismatch_quotes_the_pattern() {
        let test_case = matching(r"\d+ is even\.");
        let message = check_output("eight is even.", &test_case).unwrap_err();
        assert_eq!(
            message,
            r"Output did not match expected pattern: \d+ is even\."
        );
    }

    #[test]
    fn pattern_overrides_expected_output() {
        let test_case = TestCase {
            expected_output: Some("will not be checked".to_string()),
            output_pattern: Some(r"^\s*$".to_string()),
            ..TestCase::default()
        };
        // The pattern matches empty stdout even though the substring would
        // not, proving precedence.
        assert!(check_output("", &test_case).is_ok());
    }

    #[test]
    fn pattern_is_tested_against_empty_stdout_literally() {
        let test_case = matching("done");
        let message = check_output("", &test_case).unwrap_err();
        assert_eq!(message, "Output did not match expected pattern: done");
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let test_case = matching("(unclosed");
        let message = check_output("anything", &test_case).unwrap_err();
        assert_eq!(message, "Invalid output pattern: (unclosed");
    }
}
