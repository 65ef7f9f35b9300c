// Heuristic construct detection.
//
// These are substring and regex probes, not static analysis: "class" inside
// a comment or string literal satisfies the class probe. The probes exist to
// nudge learners toward using a construct, not to prove they used it, and
// the platform accepts the false positives that come with that.

use lazy_static::lazy_static;
use regex::Regex;

/// A single probe against source text. A construct is present if any of its
/// probes matches.
enum Probe {
    /// Case-insensitive substring check.
    Substring(&'static str),
    /// Structural regex check.
    Pattern(Regex),
}

impl Probe {
    fn matches(&self, source: &str) -> bool {
        match self {
            Probe::Substring(needle) => source.to_lowercase().contains(needle),
            Probe::Pattern(regex) => regex.is_match(source),
        }
    }
}

lazy_static! {
    /// The enumerated construct set. Names are matched case-insensitively.
    static ref PROBES: Vec<(&'static str, Vec<Probe>)> = vec![
        ("cout", vec![Probe::Substring("cout")]),
        ("cin", vec![Probe::Substring("cin")]),
        ("if", vec![probe(r"(?i)\bif\s*\(")]),
        ("for", vec![probe(r"(?i)\bfor\s*\(")]),
        ("while", vec![probe(r"(?i)\bwhile\s*\(")]),
        // "identifier identifier (" approximates a function definition.
        ("function", vec![probe(r"\b[A-Za-z_]\w*\s+[A-Za-z_]\w*\s*\(")]),
        ("array", vec![probe(r"\[\s*\d*\s*\]")]),
        ("class", vec![Probe::Substring("class")]),
        ("switch", vec![probe(r"(?i)\bswitch\s*\(")]),
    ];
}

fn probe(pattern: &str) -> Probe {
    // Patterns are compile-time literals; a bad one is a programming error.
    Probe::Pattern(Regex::new(pattern).unwrap())
}

/// Whether `source` appears to exercise the named construct.
///
/// Unknown construct names are vacuously satisfied: the probe table is the
/// authoritative list, and a catalog typo fails open rather than blocking
/// every submission against that exercise.
pub fn contains_construct(source: &str, construct: &str) -> bool {
    let name = construct.to_lowercase();
    match PROBES.iter().find(|(known, _)| *known == name) {
        Some((_, probes)) => probes.iter().any(|p| p.matches(source)),
        None => true,
    }
}

/// Probe every requested construct, returning one diagnostic per missing
/// one, in request order.
pub fn missing_constructs(source: &str, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|construct| !contains_construct(source, construct))
        .map(|construct| format!("Missing required construct: {construct}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cout_is_found_case_insensitively() {
        assert!(contains_construct("std::cout << 1;", "cout"));
        assert!(contains_construct("STD::COUT << 1;", "cout"));
        assert!(contains_construct("std::cout << 1;", "COUT"));
        assert!(!contains_construct(
            "#include <iostream>\nint main(){return 0;}",
            "cout"
        ));
    }

    #[test]
    fn loop_probes_require_a_paren() {
        assert!(contains_construct("for (int i = 0; i < 5; i++) {}", "for"));
        assert!(contains_construct("while (true) {}", "while"));
        // The word alone is not enough for the structural probes.
        assert!(!contains_construct("// no loop here, just the word for", "for"));
        assert!(!contains_construct("int whilex = 0;", "while"));
    }

    #[test]
    fn function_probe_matches_definitions() {
        assert!(contains_construct("int main() { return 0; }", "function"));
        assert!(contains_construct("double area (double r)", "function"));
        assert!(!contains_construct("x = y + z;", "function"));
    }

    #[test]
    fn array_probe_matches_brackets() {
        assert!(contains_construct("int scores[5];", "array"));
        assert!(contains_construct("int scores[ 10 ];", "array"));
        assert!(contains_construct("int scores[];", "array"));
        assert!(!contains_construct("int scores;", "array"));
    }

    #[test]
    fn class_probe_is_a_plain_substring() {
        assert!(contains_construct("class GradeBook {};", "class"));
        // Known false positive: the word inside a comment still matches.
        assert!(contains_construct("// a class is declared below", "class"));
    }

    #[test]
    fn unknown_constructs_are_vacuously_satisfied() {
        assert!(contains_construct("int main() {}", "template"));
        assert!(contains_construct("", "lambda"));
    }

    #[test]
    fn missing_constructs_message_wording() {
        let messages = missing_constructs(
            "#include <iostream>\nint main(){return 0;}",
            &["cout".to_string()],
        );
        assert_eq!(messages, vec!["Missing required construct: cout"]);
    }

    #[test]
    fn missing_constructs_preserves_request_order() {
        let messages = missing_constructs(
            "int main() { return 0; }",
            &[
                "switch".to_string(),
                "function".to_string(),
                "cout".to_string(),
            ],
        );
        assert_eq!(
            messages,
            vec![
                "Missing required construct: switch",
                "Missing required construct: cout",
            ]
        );
    }
}
