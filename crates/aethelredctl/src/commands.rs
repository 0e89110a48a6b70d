//! Command handlers for aethelredctl.
//!
//! Each one-shot command opens a fresh in-memory session, runs one
//! operation and renders the result. Progression notifications earned
//! by the operation are drained and shown before returning.

use std::fs;
use std::path::Path;

use aethelred_core::scenario::ScenarioKind;
use aethelred_core::workflow::WorkflowKind;
use aethelred_core::{AdvisorSession, Config, ForecastRun};
use anyhow::{Context, Result};

use crate::output::{self, Style};

fn open_session() -> (AdvisorSession, Style) {
    let config = Config::load();
    let style = Style::from_config(&config.display);
    (AdvisorSession::new(config), style)
}

/// Write a forecast run to disk, CSV by default or pretty JSON when
/// the path carries a `.json` extension.
pub(crate) fn export_run(run: &ForecastRun, path: &Path) -> Result<()> {
    let payload = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::to_string_pretty(run).context("failed serializing forecast run")?
    } else {
        output::forecast_csv(run)
    };
    fs::write(path, payload)
        .with_context(|| format!("failed writing forecast export to {}", path.display()))
}

/// Ask the advisor one question and print the briefing.
pub fn chat(message: &str) -> Result<()> {
    let (mut session, style) = open_session();
    let wrap_width = session.config().display.wrap_width;

    match session.handle_message(message) {
        Some(reply) => {
            println!();
            let opts = textwrap::Options::new(wrap_width)
                .initial_indent("  ")
                .subsequent_indent("  ");
            println!("{}", textwrap::fill(&reply, &opts));
            println!();
            output::render_notifications(style, &session.take_notifications());
        }
        None => output::print_err(style, "Nothing to ask. Give me a question."),
    }
    Ok(())
}

/// Run a forecast and render the projection table, optionally writing
/// the underlying data as CSV.
pub fn forecast(scenario: Option<&str>, horizon: Option<usize>, export: Option<&Path>) -> Result<()> {
    let (mut session, style) = open_session();
    let run = session.run_forecast(scenario, horizon);
    output::render_forecast(style, &run);

    if let Some(path) = export {
        export_run(&run, path)?;
        println!("  exported {}", path.display());
        println!();
    }

    output::render_notifications(style, &session.take_notifications());
    Ok(())
}

/// Run the full crew analysis with a thinking spinner.
pub fn analyze(scenario: Option<&str>) -> Result<()> {
    let (mut session, style) = open_session();
    let wrap_width = session.config().display.wrap_width;

    let spinner = output::thinking_spinner(style, "🧠 Running multi-agent strategic analysis...");
    let report = session.run_full_analysis(scenario);
    spinner.finish_and_clear();

    output::render_crew_report(style, &report, wrap_width);
    output::render_notifications(style, &session.take_notifications());
    Ok(())
}

/// Show the commander profile card.
pub fn profile() -> Result<()> {
    let (session, style) = open_session();
    output::render_profile(style, session.profile());
    Ok(())
}

/// Show today's mission board.
pub fn missions() -> Result<()> {
    let (session, style) = open_session();
    output::render_missions(style, &session.profile().missions);
    Ok(())
}

/// Show the achievement gallery.
pub fn achievements() -> Result<()> {
    let (session, style) = open_session();
    output::render_achievements(style, &session.profile().achievements);
    Ok(())
}

/// List the scenario catalog with tracked indicators.
pub fn scenarios() -> Result<()> {
    let config = Config::load();
    let style = Style::from_config(&config.display);

    output::print_header(style, "🌍 Conflict Scenarios");
    for kind in ScenarioKind::all() {
        let default_marker = if kind.as_str() == config.session.scenario {
            format!("  {}(default){}", style.steel(), style.reset())
        } else {
            String::new()
        };
        println!(
            "  {}{:<18}{} {}{}",
            style.bold(),
            kind.as_str(),
            style.reset(),
            kind.display_name(),
            default_marker
        );
        for spec in kind.indicators() {
            println!(
                "     {}{} (start {:.0}, drift {:+.1}/mo){}",
                style.dim(),
                spec.name.replace('_', " "),
                spec.start,
                spec.drift,
                style.reset()
            );
        }
        println!();
    }
    output::print_footer(style);
    Ok(())
}

/// List the workflow catalog with numbered steps.
pub fn workflows() -> Result<()> {
    let config = Config::load();
    let style = Style::from_config(&config.display);

    output::print_header(style, "⚙️ Problem-Solving Workflows");
    println!("  Select a structured methodology to guide your strategic analysis.");
    println!();
    for kind in WorkflowKind::all() {
        println!(
            "  {}{}{}  {}[{}]{}",
            style.bold(),
            kind.display_name(),
            style.reset(),
            style.dim(),
            kind.as_str(),
            style.reset()
        );
        println!("     {}{}{}", style.dim(), kind.description(), style.reset());
        for (i, step) in kind.steps().iter().enumerate() {
            println!("     {}. {}", i + 1, step);
        }
        println!();
    }
    output::print_footer(style);
    Ok(())
}

/// Show the resolved configuration, or write the default config file.
pub fn config(init: bool) -> Result<()> {
    let path = Config::user_config_path();

    if init {
        Config::save_default(&path)?;
        println!("wrote default config to {}", path.display());
        return Ok(());
    }

    let config = Config::load();
    let style = Style::from_config(&config.display);

    output::print_header(style, "Configuration");
    output::print_kv("config path", &path.display().to_string(), 18);
    output::print_kv("scenario", &config.session.scenario, 18);
    output::print_kv(
        "history months",
        &config.session.history_months.to_string(),
        18,
    );
    output::print_kv(
        "forecast horizon",
        &config.session.forecast_horizon.to_string(),
        18,
    );
    output::print_kv("confidence", &format!("{:.2}", config.session.confidence), 18);
    output::print_kv("forecast mode", config.session.forecast_mode.as_str(), 18);
    output::print_kv("color", if config.display.color { "on" } else { "off" }, 18);
    output::print_kv("wrap width", &config.display.wrap_width.to_string(), 18);
    output::print_footer(style);
    Ok(())
}
