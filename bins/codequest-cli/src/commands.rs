// CLI commands for browsing the catalog and verifying solutions
use std::fs;

use anyhow::{bail, Context, Result};
use codequest_common::catalog::Catalog;
use codequest_common::config::Settings;
use codequest_common::types::TestCase;
use codequest_verifier::{ExecutionClient, Verifier};

/// Load the catalog the same way the API does: an optional JSON override,
/// falling back to the compiled-in course.
fn load_catalog(settings: &Settings) -> Result<Catalog> {
    match &settings.catalog_path {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {path}")),
        None => Ok(Catalog::builtin()),
    }
}

/// List every course with its lessons and exercises
pub fn list_courses() -> Result<()> {
    let settings = Settings::from_env();
    let catalog = load_catalog(&settings)?;

    for course in &catalog.courses {
        println!("{} — {}", course.id, course.title);
        for lesson in &course.lessons {
            println!("  {} — {}", lesson.id, lesson.title);
            for exercise in &lesson.exercises {
                println!(
                    "    {} — {} ({:?})",
                    exercise.id, exercise.title, exercise.difficulty
                );
            }
        }
        for project in &course.final_projects {
            println!(
                "  {} — {} (final project, {:?})",
                project.id, project.title, project.difficulty
            );
        }
    }

    Ok(())
}

/// Show one exercise or final project in full
pub fn show_exercise(id: &str) -> Result<()> {
    let settings = Settings::from_env();
    let catalog = load_catalog(&settings)?;

    let (title, description, difficulty, hints, test_cases) =
        if let Some(exercise) = catalog.exercise(id) {
            (
                &exercise.title,
                &exercise.description,
                exercise.difficulty,
                &exercise.hints,
                &exercise.test_cases,
            )
        } else if let Some(project) = catalog.final_project(id) {
            (
                &project.title,
                &project.description,
                project.difficulty,
                &project.hints,
                &project.test_cases,
            )
        } else {
            bail!("No exercise or final project with id '{}'", id);
        };

    println!("{title} ({difficulty:?})");
    println!();
    println!("{description}");

    if !hints.is_empty() {
        println!();
        println!("Hints:");
        for hint in hints {
            println!("  - {hint}");
        }
    }

    if !test_cases.is_empty() {
        println!();
        println!("Expectations:");
        for test_case in test_cases {
            if let Some(pattern) = &test_case.output_pattern {
                println!("  - output matches pattern: {pattern}");
            } else if let Some(expected) = &test_case.expected_output {
                println!("  - output contains: {expected}");
            }
            for construct in &test_case.required_constructs {
                println!("  - uses construct: {construct}");
            }
        }
    }

    Ok(())
}

/// Verify a local source file, either against a catalog exercise or against
/// ad-hoc expectations given on the command line
pub async fn verify(
    file: &str,
    exercise: Option<&str>,
    expect: Option<&str>,
    pattern: Option<&str>,
    require: &[String],
    json: bool,
) -> Result<()> {
    let settings = Settings::from_env();

    let source = fs::read_to_string(file)
        .with_context(|| format!("Failed to read source file {file}"))?;
    if source.trim().is_empty() {
        bail!("Source file {} is empty", file);
    }

    let test_cases: Vec<TestCase> = match exercise {
        Some(id) => {
            let catalog = load_catalog(&settings)?;
            match catalog.test_cases(id) {
                Some(test_cases) => test_cases.to_vec(),
                None => bail!("No exercise or final project with id '{}'", id),
            }
        }
        None => {
            let adhoc = TestCase {
                input: String::new(),
                expected_output: expect.map(str::to_string),
                output_pattern: pattern.map(str::to_string),
                required_constructs: require.to_vec(),
            };
            vec![adhoc]
        }
    };

    let client = ExecutionClient::new(
        settings.piston_url.clone(),
        settings.language.clone(),
        settings.language_version.clone(),
    );
    let verifier = Verifier::new(client);

    if !json {
        println!("→ Verifying {} ({} test cases)", file, test_cases.len());
    }
    let outcome = verifier.run_verification(&source, &test_cases).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        if outcome.verdict.all_passed {
            return Ok(());
        }
        std::process::exit(1);
    }

    if let Some(compile_output) = &outcome.transcript.compile_output {
        println!();
        println!("Compiler output:");
        println!("{compile_output}");
    }
    if let Some(runtime_errors) = &outcome.transcript.runtime_errors {
        println!();
        println!("Runtime errors:");
        println!("{runtime_errors}");
    }
    if !outcome.transcript.stdout.is_empty() {
        println!();
        println!("Program output:");
        println!("{}", outcome.transcript.stdout);
    }

    println!();
    if outcome.verdict.all_passed {
        println!("✓ All checks passed");
        Ok(())
    } else {
        for message in &outcome.verdict.failure_messages {
            println!("✗ {message}");
        }
        std::process::exit(1);
    }
}
