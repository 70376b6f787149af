use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use strive_common::Problem;
use strive_core::client::{HttpRecommendationSource, RecommendationSource};
use strive_core::config::Config;
use strive_core::store::FsFieldStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "strive")]
#[command(about = "Terminal client for the STRIVE workplace-support service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Override the service base URL (default: http://localhost:4000)
    #[arg(long)]
    pub service_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive form mode (the default)
    Interactive,
    /// One-shot recommendation without the interactive form
    Ask {
        /// Your role, e.g. "software developer"
        #[arg(short, long)]
        role: String,
        /// What you are struggling with
        #[arg(short, long)]
        problem: String,
        /// Display name used in the rendered answer
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.debug);

    let mut config = Config::from_env();
    if let Some(url) = &cli.service_url {
        config.service_url = url.clone();
    }

    match cli.command {
        Some(Commands::Ask {
            role,
            problem,
            name,
        }) => {
            ask(
                &config,
                Problem {
                    name,
                    role,
                    struggle: problem,
                },
            )
            .await
        }
        Some(Commands::Interactive) | None => {
            let source: Arc<dyn RecommendationSource> =
                Arc::new(HttpRecommendationSource::new(&config));
            let dir = config
                .state_dir
                .clone()
                .unwrap_or_else(FsFieldStore::default_dir);
            strive_tui::run_interactive(source, Box::new(FsFieldStore::new(dir))).await
        }
    }
}

/// Logs go to stderr so they cannot corrupt the alternate screen.
fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn ask(config: &Config, problem: Problem) -> Result<()> {
    let source = HttpRecommendationSource::new(config);
    match source.fetch(&problem).await? {
        Some(recommendation) => {
            if problem.name.is_empty() {
                println!("You may be struggling with:");
            } else {
                println!("So {},\nyou may be struggling with:", problem.name);
            }
            for symptom in &recommendation.identified_symptoms {
                println!("  - {symptom}");
            }
            println!();
            println!("A symptom is: {}", recommendation.symptom);
            println!("A measure to improve this is: {}", recommendation.measure);
            println!();
            println!("Follow up: {}", recommendation.follow_up);
            Ok(())
        }
        None => anyhow::bail!("the service answered, but the response could not be read"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_ask_subcommand() {
        let cli = Cli::try_parse_from([
            "strive",
            "ask",
            "--role",
            "developer",
            "--problem",
            "too many meetings",
        ])
        .expect("parse");
        match cli.command {
            Some(Commands::Ask {
                role,
                problem,
                name,
            }) => {
                assert_eq!(role, "developer");
                assert_eq!(problem, "too many meetings");
                assert_eq!(name, "");
            }
            _ => panic!("expected ask subcommand"),
        }
    }

    #[test]
    fn defaults_to_interactive_mode() {
        let cli = Cli::try_parse_from(["strive"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(!cli.debug);
        assert!(cli.service_url.is_none());
    }

    #[test]
    fn service_url_override_is_accepted() {
        let cli = Cli::try_parse_from(["strive", "--service-url", "http://example.test:9999"])
            .expect("parse");
        assert_eq!(
            cli.service_url.as_deref(),
            Some("http://example.test:9999")
        );
    }
}
