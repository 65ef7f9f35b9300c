mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "codequest-cli")]
#[command(about = "codequest CLI - Browse courses and verify exercise solutions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all courses in the catalog
    Courses,

    /// Show an exercise, its hints and its expectations
    Show {
        /// Exercise or final project id
        #[arg(short, long)]
        exercise: String,
    },

    /// Verify a source file against an exercise's test cases
    Verify {
        /// Path to the source file to submit
        #[arg(short, long)]
        file: String,

        /// Exercise or final project id whose test cases to verify against
        #[arg(short, long)]
        exercise: Option<String>,

        /// Expected stdout substring (ad-hoc, used when no exercise is given)
        #[arg(long)]
        expect: Option<String>,

        /// Regex the trimmed stdout must match (ad-hoc, overrides --expect)
        #[arg(long)]
        pattern: Option<String>,

        /// Required construct name (ad-hoc, repeatable)
        #[arg(long)]
        require: Vec<String>,

        /// Print the transcript and verdict as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Courses => {
            commands::list_courses()?;
        }
        Commands::Show { exercise } => {
            commands::show_exercise(&exercise)?;
        }
        Commands::Verify {
            file,
            exercise,
            expect,
            pattern,
            require,
            json,
        } => {
            commands::verify(
                &file,
                exercise.as_deref(),
                expect.as_deref(),
                pattern.as_deref(),
                &require,
                json,
            )
            .await?;
        }
    }

    Ok(())
}
