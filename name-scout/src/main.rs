//! Name Scout CLI Application
//!
//! An interactive command-line tool for finding product names. It generates
//! candidates with an AI collaborator, then checks each one against
//! trademark records, both major app stores, and domain registrations.

mod auth;
mod interactive;
mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use name_scout_lib::{ConfigManager, NameBrief, NameChecker, NameGenerator, SessionStore};
use std::process;
use tracing_subscriber::EnvFilter;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for name-scout
#[derive(Parser, Debug)]
#[command(name = "name-scout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate product name ideas and check their availability")]
#[command(
    long_about = "Generate product name ideas with AI and check each candidate against \
USPTO trademark records, the iOS App Store, Google Play, and domain registrations.\n\n\
Run without arguments for a fully interactive session, or pass a description \
to skip the briefing questions."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// One-line description of the product to name
    #[arg(short = 'd', long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Keywords to draw name ideas from (comma-separated)
    #[arg(
        short = 'k',
        long = "keywords",
        value_name = "WORD",
        value_delimiter = ',',
        action = clap::ArgAction::Append
    )]
    pub keywords: Vec<String>,

    /// Tone for the names: modern, friendly, professional, playful, luxurious, bold
    #[arg(short = 's', long = "style", value_name = "TONE", default_value = "modern")]
    pub style: String,

    /// Check these names directly, skipping generation
    #[arg(short = 'c', long = "check", value_name = "NAME", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub check: Vec<String>,

    /// Enable verbose logging to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "name_scout=debug,name_scout_lib=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Check-only mode needs no credential: the checker works unauthenticated.
    if !args.check.is_empty() {
        return run_check_only(&args.check).await;
    }

    let config = ConfigManager::new()?;
    let api_key = match config.resolve_api_key() {
        Some(key) => key,
        None => auth::run_auth_flow(&config).await?,
    };

    let generator = match config.model_override() {
        Some(model) => NameGenerator::with_model(api_key, model)?,
        None => NameGenerator::new(api_key)?,
    };
    let checker = NameChecker::new()?;
    let store = SessionStore::new()?;

    let brief = args
        .description
        .as_ref()
        .map(|description| NameBrief::from_args(description, args.keywords.clone(), &args.style));

    interactive::run_session(&generator, &checker, &store, brief).await
}

/// Check explicitly supplied names and print a ranked report.
async fn run_check_only(names: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let checker = NameChecker::new()?;

    let spinner = ui::Spinner::start(format!(
        "Checking {} name{}...",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    ));
    let results = checker.check_names(names).await;
    spinner.stop().await;

    for result in &results {
        ui::print_result(result);
    }
    ui::print_summary(&results);

    checker.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_shot_brief_args() {
        let args = Args::try_parse_from([
            "name-scout",
            "-d",
            "a habit tracker",
            "-k",
            "habit,loop",
            "-s",
            "playful",
        ])
        .unwrap();
        assert_eq!(args.description.as_deref(), Some("a habit tracker"));
        assert_eq!(args.keywords, vec!["habit", "loop"]);
        assert_eq!(args.style, "playful");
        assert!(args.check.is_empty());
    }

    #[test]
    fn parses_check_only_mode() {
        let args = Args::try_parse_from(["name-scout", "--check", "lumina,echo"]).unwrap();
        assert_eq!(args.check, vec!["lumina", "echo"]);
        assert!(args.description.is_none());
    }

    #[test]
    fn defaults_are_interactive() {
        let args = Args::try_parse_from(["name-scout"]).unwrap();
        assert!(args.description.is_none());
        assert!(args.check.is_empty());
        assert_eq!(args.style, "modern");
        assert!(!args.verbose);
    }
}
