//! Interactive naming session loop.
//!
//! Drives the full workflow in the terminal: resume or create a session,
//! interview the user for a brief, then loop through generate / check /
//! review actions until the user exits. The session is saved after every
//! step that changes it.

use crate::ui;
use console::{style, Term};
use name_scout_lib::{
    NameBrief, NameChecker, NameGenerator, NameLength, NameStyle, ProductType, Session,
    SessionStore, ToneStyle,
};
use std::io;

type DynError = Box<dyn std::error::Error>;

/// Run a full interactive session. A pre-built brief skips the interview.
pub async fn run_session(
    generator: &NameGenerator,
    checker: &NameChecker,
    store: &SessionStore,
    initial_brief: Option<NameBrief>,
) -> Result<(), DynError> {
    let term = Term::stdout();
    ui::print_header();

    let mut session = match initial_brief {
        Some(brief) => Session::new(brief),
        None => match pick_session(&term, store)? {
            Some(session) => session,
            None => Session::new(interview_brief(&term)?),
        },
    };

    loop {
        print_menu(&session);
        let choice = prompt(&term, "Choose an action")?;

        match choice.trim() {
            "1" => {
                run_generation_round(generator, checker, store, &mut session, None).await?;
            }
            "2" => {
                let feedback = prompt(&term, "What should change about the next batch?")?;
                let feedback = feedback.trim();
                let feedback = (!feedback.is_empty()).then_some(feedback.to_string());
                run_generation_round(generator, checker, store, &mut session, feedback).await?;
            }
            "3" => {
                let input = prompt(&term, "Names to check (comma-separated)")?;
                let names: Vec<String> = input
                    .split(',')
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect();
                if names.is_empty() {
                    println!("  {}", style("Nothing to check.").dim());
                    continue;
                }
                check_and_record(checker, store, &mut session, &names).await?;
            }
            "4" => {
                ui::print_summary(&session.results);
            }
            "5" => {
                for result in &session.results {
                    ui::print_result(result);
                }
                ui::print_summary(&session.results);
            }
            "6" => {
                print_session_info(&session);
            }
            "7" | "q" | "exit" => {
                store.save(&mut session)?;
                println!(
                    "  Session {} saved ({} names, {} checked).",
                    style(&session.id).bold(),
                    session.names.len(),
                    session.results.len(),
                );
                checker.shutdown().await;
                return Ok(());
            }
            other => {
                println!("  {}", style(format!("Unrecognized choice: {}", other)).dim());
            }
        }
    }
}

fn print_menu(session: &Session) {
    println!();
    println!(
        "  {} {}",
        style("Session:").dim(),
        style(&session.brief.description).bold(),
    );
    println!("    1. Generate 10 name ideas");
    println!("    2. Generate more (with feedback)");
    println!("    3. Check specific names");
    println!("    4. Show ranked summary");
    println!("    5. Show all results");
    println!("    6. Session info");
    println!("    7. Save and exit");
}

fn print_session_info(session: &Session) {
    println!();
    println!("  {}    {}", style("Session id:").dim(), session.id);
    println!("  {}   {}", style("Described:").dim(), session.brief.description);
    println!(
        "  {}    {} generated, {} checked",
        style("Progress:").dim(),
        session.names.len(),
        session.results.len(),
    );
    println!(
        "  {}  {} / {}",
        style("Timestamps:").dim(),
        session.created_at,
        session.updated_at,
    );
}

/// One generation round: generate, show, check, rank, save.
async fn run_generation_round(
    generator: &NameGenerator,
    checker: &NameChecker,
    store: &SessionStore,
    session: &mut Session,
    feedback: Option<String>,
) -> Result<(), DynError> {
    let spinner = ui::Spinner::start("Generating name ideas...".to_string());
    let previous = session.all_names();
    let generated = if previous.is_empty() && feedback.is_none() {
        generator.generate(&session.brief).await
    } else {
        generator
            .generate_more(&session.brief, &previous, feedback.as_deref())
            .await
    };
    spinner.stop().await;

    let generated = match generated {
        Ok(names) => names,
        Err(e) => {
            println!("  {}", style(format!("Generation failed: {}", e)).red());
            return Ok(());
        }
    };

    session.add_names(&generated);
    ui::print_generated(&generated);

    let names: Vec<String> = generated.iter().map(|n| n.name.clone()).collect();
    check_and_record(checker, store, session, &names).await
}

async fn check_and_record(
    checker: &NameChecker,
    store: &SessionStore,
    session: &mut Session,
    names: &[String],
) -> Result<(), DynError> {
    let spinner = ui::Spinner::start(format!(
        "Checking {} name{} across trademark, stores, and domains...",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    ));
    let results = checker.check_names(names).await;
    spinner.stop().await;

    for result in &results {
        ui::print_result(result);
    }
    ui::print_summary(&results);

    session.add_results(&results);
    store.save(session)?;
    Ok(())
}

// ── Session picker ───────────────────────────────────────────────────────────

/// Offer recent sessions to resume. Returns None to start fresh.
fn pick_session(term: &Term, store: &SessionStore) -> Result<Option<Session>, DynError> {
    let recent = store.list()?;
    if recent.is_empty() {
        return Ok(None);
    }

    println!("  Recent sessions:");
    for (idx, summary) in recent.iter().enumerate() {
        println!(
            "    {}. {}  {}",
            idx + 1,
            style(&summary.description).bold(),
            style(format!("({} names)", summary.name_count)).dim(),
        );
    }
    println!();

    let input = prompt(term, "Resume a session by number, or press Enter for a new one")?;
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    match input.parse::<usize>() {
        Ok(n) if n >= 1 && n <= recent.len() => {
            let session = store.load(&recent[n - 1].id)?;
            println!(
                "  Resumed {} with {} names.",
                style(&session.id).bold(),
                session.names.len(),
            );
            Ok(Some(session))
        }
        _ => Ok(None),
    }
}

// ── Brief interview ──────────────────────────────────────────────────────────

/// Interview the user for a complete naming brief.
fn interview_brief(term: &Term) -> Result<NameBrief, DynError> {
    println!("  Let's build a naming brief. Press Enter to accept defaults.");
    println!();

    let description = prompt_required(term, "What are you naming? (one line)")?;
    let product_type = parse_product_type(&prompt_with_default(
        term,
        "Product type (app/saas/website/physical/service/other)",
        "other",
    )?);
    let industry = prompt_with_default(term, "Industry", "technology")?;
    let target_audience = prompt_with_default(term, "Target audience", "general consumers")?;

    let tone_style = ToneStyle::from_keyword(&prompt_with_default(
        term,
        "Tone (modern/friendly/professional/playful/luxurious/bold)",
        "modern",
    )?);
    let name_style = parse_name_style(&prompt_with_default(
        term,
        "Name style (real-words/invented/compound/abstract/any)",
        "any",
    )?);
    let name_length = parse_name_length(&prompt_with_default(
        term,
        "Name length (short/medium/long/any)",
        "any",
    )?);

    let keywords = prompt_list(term, "Keywords to draw from (comma-separated, optional)")?;
    let themes = prompt_list(term, "Themes to evoke (comma-separated, optional)")?;
    let avoid_words = prompt_list(term, "Words or sounds to avoid (optional)")?;
    let competitors = prompt_list(term, "Competitor names to differentiate from (optional)")?;

    Ok(NameBrief {
        product_type,
        description,
        industry,
        target_audience,
        tone_style,
        name_style,
        name_length,
        keywords,
        themes,
        avoid_words,
        competitors,
    })
}

fn parse_product_type(input: &str) -> ProductType {
    match input.trim().to_lowercase().as_str() {
        "app" => ProductType::App,
        "saas" => ProductType::Saas,
        "website" => ProductType::Website,
        "physical" => ProductType::Physical,
        "service" => ProductType::Service,
        _ => ProductType::Other,
    }
}

fn parse_name_style(input: &str) -> NameStyle {
    match input.trim().to_lowercase().as_str() {
        "real-words" | "real" | "words" => NameStyle::RealWords,
        "invented" => NameStyle::Invented,
        "compound" => NameStyle::Compound,
        "abstract" => NameStyle::Abstract,
        _ => NameStyle::Any,
    }
}

fn parse_name_length(input: &str) -> NameLength {
    match input.trim().to_lowercase().as_str() {
        "short" => NameLength::Short,
        "medium" => NameLength::Medium,
        "long" => NameLength::Long,
        _ => NameLength::Any,
    }
}

// ── Prompt helpers ───────────────────────────────────────────────────────────

fn prompt(term: &Term, question: &str) -> io::Result<String> {
    term.write_str(&format!("  {} ", style(format!("{}:", question)).cyan()))?;
    term.read_line()
}

fn prompt_with_default(term: &Term, question: &str, default: &str) -> io::Result<String> {
    let answer = prompt(term, &format!("{} [{}]", question, default))?;
    let answer = answer.trim();
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer.to_string()
    })
}

fn prompt_required(term: &Term, question: &str) -> io::Result<String> {
    loop {
        let answer = prompt(term, question)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
        println!("  {}", style("This one is required.").dim());
    }
}

fn prompt_list(term: &Term, question: &str) -> io::Result<Vec<String>> {
    let answer = prompt(term, question)?;
    Ok(answer
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_type_parsing_falls_back_to_other() {
        assert_eq!(parse_product_type("SaaS"), ProductType::Saas);
        assert_eq!(parse_product_type("gizmo"), ProductType::Other);
    }

    #[test]
    fn name_style_accepts_aliases() {
        assert_eq!(parse_name_style("real-words"), NameStyle::RealWords);
        assert_eq!(parse_name_style("real"), NameStyle::RealWords);
        assert_eq!(parse_name_style("whatever"), NameStyle::Any);
    }

    #[test]
    fn name_length_parsing() {
        assert_eq!(parse_name_length("SHORT"), NameLength::Short);
        assert_eq!(parse_name_length(""), NameLength::Any);
    }
}
