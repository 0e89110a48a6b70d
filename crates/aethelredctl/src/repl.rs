//! Interactive advisory session.
//!
//! Read-eval-print loop over one in-memory session: free text goes to
//! the advisor, slash commands drive forecasts, crew analyses,
//! workflows and the progression views.

use std::io::{self, Write};

use aethelred_core::{AdvisorSession, Config, ForecastRun};
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands;
use crate::output::{self, Style};

pub fn run() -> Result<()> {
    let config = Config::load();
    let style = Style::from_config(&config.display);
    let mut session = AdvisorSession::new(config);
    let mut last_forecast: Option<ForecastRun> = None;

    print_welcome(&session);

    let stdin = io::stdin();
    loop {
        print!("{}aethelred>{} ", style.header(), style.reset());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "exit" | "quit" | "/quit" => {
                println!("Goodbye, Commander.");
                break;
            }
            "help" | "/help" => print_help(),
            _ if input.starts_with('/') => {
                if let Err(e) = handle_slash(&mut session, &mut last_forecast, style, input) {
                    output::print_err(style, &format!("{e:#}"));
                }
            }
            _ => handle_chat(&mut session, style, input),
        }
    }

    Ok(())
}

fn print_welcome(session: &AdvisorSession) {
    let profile = session.profile();
    println!();
    println!(
        "{}  {}",
        "🛡️ Aethelred Strategic Advisory".bright_yellow().bold(),
        format!("v{}", crate::VERSION).dimmed()
    );
    println!("{}", output::HR.dimmed());
    println!(
        "Level {} Commander | {} XP | 🔥 {} day streak",
        profile.level.bold(),
        profile.total_points,
        profile.current_streak
    );
    println!(
        "Ask a strategic question, or type {} for commands.",
        "/help".bright_cyan()
    );
    println!("{}", output::HR.dimmed());
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  /forecast [scenario] [months]   Run a predictive forecast");
    println!("  /analyze [scenario]             Full multi-agent strategic analysis");
    println!("  /quick <action>                 One-click prompt: forecast, risk, swot, research");
    println!("  /export [path]                  Write the last forecast as CSV");
    println!("  /workflow <key>                 Start a decision workflow");
    println!("  /next                           Advance the active workflow");
    println!("  /profile                        Commander profile");
    println!("  /missions                       Today's mission board");
    println!("  /achievements                   Achievement gallery");
    println!("  /scenarios                      List conflict scenarios");
    println!("  /workflows                      List decision workflows");
    println!("  /config                         Show configuration");
    println!("  /quit                           Leave the session");
    println!("  <anything else>                 Ask the advisor");
    println!();
}

fn print_advisor_reply(style: Style, wrap_width: usize, reply: &str) {
    println!();
    println!("{}[aethelred]{}", style.ok(), style.reset());
    let opts = textwrap::Options::new(wrap_width)
        .initial_indent("  ")
        .subsequent_indent("  ");
    println!("{}", textwrap::fill(reply, &opts));
    println!();
}

fn handle_chat(session: &mut AdvisorSession, style: Style, input: &str) {
    let wrap_width = session.config().display.wrap_width;
    if let Some(reply) = session.handle_message(input) {
        print_advisor_reply(style, wrap_width, &reply);
        output::render_notifications(style, &session.take_notifications());
    }
}

fn handle_slash(
    session: &mut AdvisorSession,
    last_forecast: &mut Option<ForecastRun>,
    style: Style,
    input: &str,
) -> Result<()> {
    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();

    match command.as_str() {
        "/forecast" => {
            let scenario = parts.next();
            let horizon = parts.next().and_then(|h| h.parse().ok());
            let run = session.run_forecast(scenario, horizon);
            output::render_forecast(style, &run);
            *last_forecast = Some(run);
            output::render_notifications(style, &session.take_notifications());
        }
        "/analyze" => {
            let wrap_width = session.config().display.wrap_width;
            let spinner =
                output::thinking_spinner(style, "🧠 Running multi-agent strategic analysis...");
            let report = session.run_full_analysis(parts.next());
            spinner.finish_and_clear();
            output::render_crew_report(style, &report, wrap_width);
            output::render_notifications(style, &session.take_notifications());
        }
        "/quick" => match parts.next() {
            Some(action) => match session.quick_action(action) {
                Some(reply) => {
                    let wrap_width = session.config().display.wrap_width;
                    print_advisor_reply(style, wrap_width, &reply);
                    output::render_notifications(style, &session.take_notifications());
                }
                None => output::print_err(
                    style,
                    "Unknown quick action. Try forecast, risk, swot or research.",
                ),
            },
            None => output::print_err(style, "Usage: /quick <forecast|risk|swot|research>"),
        },
        "/export" => match last_forecast {
            Some(run) => {
                let default_name = format!("forecast_{}.csv", run.scenario.as_str());
                let path = parts.next().unwrap_or(&default_name);
                commands::export_run(run, std::path::Path::new(path))?;
                println!("  exported {path}");
                println!();
            }
            None => output::print_err(style, "No forecast yet. Run /forecast first."),
        },
        "/workflow" => match parts.next() {
            Some(key) => match session.start_workflow(key) {
                Some(kind) => {
                    println!(
                        "  Started {}. Use /next to proceed through the {} steps.",
                        kind.display_name(),
                        kind.steps().len()
                    );
                    println!();
                    output::render_notifications(style, &session.take_notifications());
                }
                None => output::print_err(style, "Unknown workflow. See /workflows for keys."),
            },
            None => output::print_err(style, "Usage: /workflow <key> (see /workflows)"),
        },
        "/next" => match session.advance_workflow() {
            Some(step) => {
                // progress() is step/total, so this recovers the index
                // just consumed.
                let (index, total) = match session.active_workflow() {
                    Some(kind) => {
                        let total = kind.steps().len();
                        (
                            (session.workflow_progress() * total as f64).round() as usize,
                            total,
                        )
                    }
                    None => (0, 0),
                };
                println!(
                    "  Step {}/{}: {}{}{}",
                    index,
                    total,
                    style.bold(),
                    step,
                    style.reset()
                );
                println!(
                    "  {} {:.0}%",
                    output::progress_bar(session.workflow_progress(), 20),
                    session.workflow_progress() * 100.0
                );
                if index == total {
                    println!("  Workflow complete.");
                }
                println!();
            }
            None => match session.active_workflow() {
                Some(kind) => println!(
                    "  {} is already complete. Start another with /workflow.",
                    kind.display_name()
                ),
                None => output::print_err(style, "No active workflow. Start one with /workflow <key>."),
            },
        },
        "/profile" => output::render_profile(style, session.profile()),
        "/missions" => output::render_missions(style, &session.profile().missions),
        "/achievements" => output::render_achievements(style, &session.profile().achievements),
        "/scenarios" => commands::scenarios()?,
        "/workflows" => commands::workflows()?,
        "/config" => commands::config(false)?,
        _ => output::print_err(
            style,
            &format!("Unknown command: {command}. Type /help for the list."),
        ),
    }

    Ok(())
}
