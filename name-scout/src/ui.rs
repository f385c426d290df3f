//! Display logic for the name-scout CLI.
//!
//! This module handles all terminal output: colored per-name result panels,
//! the ranked summary table, spinner animation, and headers. Uses only the
//! `console` crate (already a dependency).

use console::{pad_str, style, Alignment, Term};
use name_scout_lib::{
    rank_results, AvailabilityStatus, NameCheckResult, RankedName, TrademarkStatus,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const SPINNER_TICK: Duration = Duration::from_millis(90);

/// Progress indicator for the slow phases (generation, batch checks).
///
/// Animates on stderr; stdout stays reserved for results.
pub struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    /// Spawn the animation task with a status message
    /// (e.g. "Checking 10 names...").
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let running = Arc::new(AtomicBool::new(true));
        let running_flag = running.clone();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let mut frames = SPINNER_FRAMES.iter().cycle();
            while running_flag.load(Ordering::Relaxed) {
                if let Some(frame) = frames.next() {
                    let _ = term.clear_line();
                    let _ = term.write_str(&format!("{} {}", style(frame).cyan(), message));
                }
                tokio::time::sleep(SPINNER_TICK).await;
            }
            let _ = term.clear_line();
        });

        Self {
            running,
            handle: Some(handle),
        }
    }

    /// Halt the animation and erase the status line.
    pub async fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

// ── Header ───────────────────────────────────────────────────────────────────

/// Print a styled header at the start of a session.
pub fn print_header() {
    println!(
        "{} {} {}",
        style("name-scout").bold(),
        style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim(),
        style("— AI naming with real availability checks").dim(),
    );
    println!();
}

// ── Per-name result panel ────────────────────────────────────────────────────

/// Print the full availability panel for one checked name.
pub fn print_result(result: &NameCheckResult) {
    println!("  {}", style(&result.name).bold().underlined());

    let trademark_label = match result.trademark.status {
        TrademarkStatus::Available => style("AVAILABLE").green().bold(),
        TrademarkStatus::Pending => style("PENDING").yellow().bold(),
        TrademarkStatus::Registered => style("REGISTERED").red().bold(),
        TrademarkStatus::Unknown => style("UNKNOWN").yellow(),
    };
    let trademark_detail = result
        .trademark
        .details
        .as_ref()
        .map(|d| {
            let linked = link(d, &name_scout_lib::trademark_search_url(&result.name));
            format!("  {}", style(linked).dim())
        })
        .unwrap_or_default();
    println!("    Trademark    {}{}", trademark_label, trademark_detail);

    print_store_line("App Store", &result.ios_app_store);
    print_store_line("Google Play", &result.google_play_store);

    let available: Vec<&str> = result
        .domains
        .iter()
        .filter(|d| d.available)
        .map(|d| d.domain.as_str())
        .collect();
    let taken = result.domains.len() - available.len();
    if available.is_empty() {
        println!(
            "    Domains      {}  {}",
            style("NONE AVAILABLE").red().bold(),
            style(format!("({} checked)", result.domains.len())).dim(),
        );
    } else {
        println!(
            "    Domains      {}  {}",
            style(available.join(", ")).green(),
            style(format!("({} taken)", taken)).dim(),
        );
    }
    println!();
}

fn print_store_line(label: &str, store: &name_scout_lib::AppStoreResult) {
    let padded = pad_str(label, 13, Alignment::Left, None);
    match store.status {
        AvailabilityStatus::Available => {
            println!("    {}{}", padded, style("AVAILABLE").green().bold());
        }
        AvailabilityStatus::Taken => {
            let detail = match (&store.existing_app, &store.store_url) {
                (Some(app), Some(url)) => format!("  {}", style(link(app, url)).dim()),
                (Some(app), None) => format!("  {}", style(app).dim()),
                _ => String::new(),
            };
            println!("    {}{}{}", padded, style("TAKEN").red().bold(), detail);
        }
        AvailabilityStatus::Unknown => {
            println!("    {}{}", padded, style("UNKNOWN").yellow());
        }
    }
}

/// OSC-8 hyperlink, degrades to plain text in terminals that ignore it.
fn link(text: &str, url: &str) -> String {
    format!("\u{1b}]8;;{}\u{1b}\\{}\u{1b}]8;;\u{1b}\\", url, text)
}

// ── Ranked summary ───────────────────────────────────────────────────────────

/// Print the ranked summary table for a batch of results.
pub fn print_summary(results: &[NameCheckResult]) {
    if results.is_empty() {
        return;
    }

    let ranked = rank_results(results);

    println!(
        "  {} {}",
        style("── Ranked Candidates ").cyan().bold(),
        style("─".repeat(34)).cyan().dim(),
    );
    for (idx, entry) in ranked.iter().enumerate() {
        print_summary_line(idx + 1, entry);
    }
    println!();

    match ranked.iter().find(|entry| entry.fully_available) {
        Some(best) => {
            println!(
                "  {} {} is available everywhere, including the .com",
                style("★").green().bold(),
                style(&best.name).green().bold(),
            );
        }
        None => {
            println!(
                "  {}",
                style("No candidate is fully available (trademark + both stores + .com)").dim(),
            );
        }
    }
    println!();
}

fn print_summary_line(rank: usize, entry: &RankedName) {
    let padded_name = pad_str(&entry.name, 24, Alignment::Left, Some(".."));
    let marker = if entry.fully_available {
        style("★").green().bold().to_string()
    } else {
        " ".to_string()
    };
    println!(
        "  {:>2}. {} {}  {}",
        rank,
        padded_name,
        marker,
        style(format!("score {}", entry.score)).dim(),
    );
}

// ── Generated candidates ─────────────────────────────────────────────────────

/// Print a freshly generated batch of name ideas with their rationale.
pub fn print_generated(names: &[name_scout_lib::GeneratedName]) {
    println!();
    for (idx, candidate) in names.iter().enumerate() {
        let reasoning = candidate
            .reasoning
            .as_ref()
            .map(|r| format!("  {}", style(r).dim()))
            .unwrap_or_default();
        println!(
            "  {:>2}. {}{}",
            idx + 1,
            style(&candidate.name).bold(),
            reasoning,
        );
    }
    println!();
}
