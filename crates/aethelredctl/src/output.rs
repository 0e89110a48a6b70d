//! Terminal output for aethelredctl.
//!
//! All user-facing rendering goes through this module so commands and
//! the interactive session share one look: a gold header rule, aligned
//! key/value blocks and block-glyph progress bars. Styling is raw ANSI
//! behind a [`Style`] switch resolved once per invocation from config
//! plus TTY detection.

use std::io::{self, IsTerminal};
use std::time::Duration;

use aethelred_core::achievements::Achievement;
use aethelred_core::config::DisplayConfig;
use aethelred_core::crew::CrewReport;
use aethelred_core::missions::Mission;
use aethelred_core::profile::{Notification, NotificationKind, Profile};
use aethelred_core::ForecastRun;
use indicatif::{ProgressBar, ProgressStyle};

/// ANSI color codes using true color (24-bit)
pub mod colors {
    pub const HEADER: &str = "\x1b[38;2;218;186;90m";
    pub const OK: &str = "\x1b[38;2;110;230;140m";
    pub const ERR: &str = "\x1b[38;2;240;95;95m";
    pub const WARN: &str = "\x1b[38;2;235;190;100m";
    pub const DIM: &str = "\x1b[38;2;135;135;135m";
    pub const STEEL: &str = "\x1b[38;2;120;175;235m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Unicode symbols
pub mod symbols {
    pub const ERR: &str = "✗";
    pub const MISSION_DONE: &str = "✅";
    pub const MISSION_PENDING: &str = "⏳";
    pub const PROGRESS_FULL: &str = "█";
    pub const PROGRESS_EMPTY: &str = "░";
}

/// Horizontal rule
pub const HR: &str =
    "──────────────────────────────────────────────────────────────────────────";

/// Per-invocation display switches.
///
/// Color is on only when the config allows it and stdout is a TTY, so
/// piped output stays clean.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    color: bool,
}

impl Style {
    pub fn from_config(display: &DisplayConfig) -> Self {
        Self {
            color: display.color && io::stdout().is_terminal(),
        }
    }

    fn c(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }

    pub fn header(&self) -> &'static str {
        self.c(colors::HEADER)
    }

    pub fn ok(&self) -> &'static str {
        self.c(colors::OK)
    }

    pub fn err(&self) -> &'static str {
        self.c(colors::ERR)
    }

    pub fn warn(&self) -> &'static str {
        self.c(colors::WARN)
    }

    pub fn dim(&self) -> &'static str {
        self.c(colors::DIM)
    }

    pub fn steel(&self) -> &'static str {
        self.c(colors::STEEL)
    }

    pub fn bold(&self) -> &'static str {
        self.c(colors::BOLD)
    }

    pub fn reset(&self) -> &'static str {
        self.c(colors::RESET)
    }
}

/// Print a styled section header with rule
pub fn print_header(style: Style, title: &str) {
    println!();
    println!("{}{}{}", style.header(), title, style.reset());
    println!("{}{}{}", style.dim(), HR, style.reset());
}

/// Print a closing rule
pub fn print_footer(style: Style) {
    println!("{}{}{}", style.dim(), HR, style.reset());
    println!();
}

/// Print a key-value pair with alignment
pub fn print_kv(key: &str, value: &str, key_width: usize) {
    println!("  {:width$} {}", key, value, width = key_width);
}

/// Print an error line
pub fn print_err(style: Style, message: &str) {
    println!(
        "  {}{}{} {}",
        style.err(),
        symbols::ERR,
        style.reset(),
        message
    );
}

/// Format a progress bar
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = (fraction * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!(
        "[{}{}]",
        symbols::PROGRESS_FULL.repeat(filled),
        symbols::PROGRESS_EMPTY.repeat(empty)
    )
}

/// XP earned inside the current level band and the band's full width.
///
/// Level `n` starts at `100 * (n-1)^1.5` lifetime XP; the window is the
/// distance to the next boundary.
pub fn level_window(profile: &Profile) -> (u32, u32) {
    let floor = level_floor(profile.level);
    let ceil = level_floor(profile.level + 1);
    (
        profile.xp.saturating_sub(floor),
        ceil.saturating_sub(floor).max(1),
    )
}

fn level_floor(level: u32) -> u32 {
    (100.0 * f64::from(level.saturating_sub(1)).powf(1.5)).floor() as u32
}

/// Direction glyph for a projected end value against the latest
/// observation.
pub fn trend_arrow(latest: f64, projected: f64) -> &'static str {
    if projected > latest {
        "↗ Up"
    } else if projected < latest {
        "↘ Down"
    } else {
        "→ Stable"
    }
}

/// Commander profile card: level, XP window, streak and counters.
pub fn render_profile(style: Style, profile: &Profile) {
    print_header(style, "🛡️ Agent Profile");

    let (earned, span) = level_window(profile);
    let fraction = f64::from(earned) / f64::from(span);

    print_kv(
        "level",
        &format!("{}{}{}", style.bold(), profile.level, style.reset()),
        14,
    );
    print_kv("total xp", &profile.total_points.to_string(), 14);
    print_kv(
        "next level",
        &format!(
            "{} {}/{} XP to Level {}",
            progress_bar(fraction, 20),
            earned,
            span,
            profile.level + 1
        ),
        14,
    );
    print_kv(
        "streak",
        &format!("🔥 {} day streak", profile.current_streak),
        14,
    );
    print_kv(
        "problems",
        &format!("🎯 {} solved", profile.problems_solved),
        14,
    );
    print_kv("analyses", &profile.analysis_runs.to_string(), 14);
    print_kv(
        "achievements",
        &format!(
            "{}/{} unlocked",
            profile.unlocked_achievements().len(),
            profile.achievements.len()
        ),
        14,
    );
    print_kv(
        "missions",
        &format!(
            "{}/{} complete today",
            profile.completed_missions(),
            profile.missions.len()
        ),
        14,
    );
    print_footer(style);
}

/// Today's mission board with per-mission progress bars.
pub fn render_missions(style: Style, missions: &[Mission]) {
    print_header(style, "🎯 Strategic Missions & Challenges");
    for mission in missions {
        let icon = if mission.completed {
            symbols::MISSION_DONE
        } else {
            symbols::MISSION_PENDING
        };
        println!(
            "  {} {}{}{}  +{} XP",
            icon,
            style.bold(),
            mission.name,
            style.reset(),
            mission.xp_reward
        );
        println!("     {}{}{}", style.dim(), mission.description, style.reset());
        println!(
            "     {} {}/{} completed",
            progress_bar(mission.fraction(), 20),
            mission.progress,
            mission.target
        );
        println!();
    }
    print_footer(style);
}

/// Achievement gallery. Locked entries render dimmed.
pub fn render_achievements(style: Style, achievements: &[Achievement]) {
    print_header(style, "🏆 Achievement Gallery");
    for ach in achievements {
        if ach.unlocked {
            println!(
                "  {} {}{}{}  +{} XP",
                ach.icon,
                style.bold(),
                ach.name,
                style.reset(),
                ach.xp_reward
            );
            println!("     {}", ach.description);
            if let Some(at) = ach.unlocked_at {
                println!(
                    "     {}unlocked {}{}",
                    style.ok(),
                    at.format("%Y-%m-%d"),
                    style.reset()
                );
            }
        } else {
            println!(
                "  {} {}{}  +{} XP{}",
                ach.icon,
                style.dim(),
                ach.name,
                ach.xp_reward,
                style.reset()
            );
            println!("     {}{}{}", style.dim(), ach.description, style.reset());
        }
        println!();
    }
    print_footer(style);
}

/// Forecast table: latest observation, projection end point, interval
/// and trend per indicator.
pub fn render_forecast(style: Style, run: &ForecastRun) {
    print_header(
        style,
        &format!("🔮 Predictive Forecast: {}", run.scenario.display_name()),
    );
    print_kv("method", run.report.method.as_str(), 12);
    print_kv("horizon", &format!("{} months", run.report.horizon), 12);
    print_kv(
        "confidence",
        &format!("{:.0}%", run.report.confidence_level * 100.0),
        12,
    );
    print_kv("forecast id", &run.report.forecast_id, 12);
    println!();

    println!(
        "  {}{:<30} {:>8} {:>8} {:>8} {:>17}  trend{}",
        style.dim(),
        "indicator",
        "latest",
        "delta",
        "proj.",
        "interval",
        style.reset()
    );
    for col in &run.report.columns {
        let series = run.history.column(&col.name).unwrap_or(&[]);
        let latest = series.last().copied().unwrap_or(0.0);
        let prev = if series.len() >= 2 {
            series[series.len() - 2]
        } else {
            latest
        };
        let projected = col.point.last().copied().unwrap_or(latest);
        let lower = col.lower.last().copied().unwrap_or(projected);
        let upper = col.upper.last().copied().unwrap_or(projected);

        println!(
            "  {:<30} {:>8.1} {:>+8.1} {:>8.1} {:>17}  {}",
            col.name.replace('_', " "),
            latest,
            latest - prev,
            projected,
            format!("[{:.1}, {:.1}]", lower, upper),
            trend_arrow(latest, projected)
        );
    }

    if !run.report.notes.is_empty() {
        println!();
        for note in &run.report.notes {
            println!("  {}note: {}{}", style.warn(), note, style.reset());
        }
    }
    print_footer(style);
}

/// Crew report, one wrapped block per phase.
pub fn render_crew_report(style: Style, report: &CrewReport, wrap_width: usize) {
    print_header(
        style,
        &format!("🔍 Full Strategic Analysis: {}", report.scenario),
    );
    let opts = textwrap::Options::new(wrap_width)
        .initial_indent("  ")
        .subsequent_indent("  ");
    for section in &report.sections {
        println!("  {}{}{}", style.bold(), section.title, style.reset());
        println!("{}", textwrap::fill(&section.body, &opts));
        println!();
    }
    println!(
        "  {}Analysis completed by Aethelred Multi-Agent System | Confidence: High{}",
        style.dim(),
        style.reset()
    );
    print_footer(style);
}

/// Print drained progression events, color-coded by kind.
pub fn render_notifications(style: Style, notes: &[Notification]) {
    for note in notes {
        let color = match note.kind {
            NotificationKind::LevelUp => style.header(),
            NotificationKind::AchievementUnlocked => style.warn(),
            NotificationKind::MissionComplete => style.ok(),
        };
        println!("  {}{}{}", color, note.message, style.reset());
    }
    if !notes.is_empty() {
        println!();
    }
}

/// Forecast data as CSV: a `Date` column, then one `_Historical` column
/// per indicator, then one `_Forecast` column per indicator. Cells
/// outside a series' range stay empty, so historical rows pad the
/// forecast columns and vice versa.
pub fn forecast_csv(run: &ForecastRun) -> String {
    let names = run.history.column_names();
    let mut out = String::from("Date");
    for name in &names {
        out.push(',');
        out.push_str(name);
        out.push_str("_Historical");
    }
    for name in &names {
        out.push(',');
        out.push_str(name);
        out.push_str("_Forecast");
    }
    out.push('\n');

    for (row, month) in run.history.months.iter().enumerate() {
        out.push_str(&month.format("%Y-%m-%d").to_string());
        for name in &names {
            out.push(',');
            if let Some(values) = run.history.column(name) {
                if let Some(v) = values.get(row) {
                    out.push_str(&v.to_string());
                }
            }
        }
        for _ in &names {
            out.push(',');
        }
        out.push('\n');
    }

    for (row, month) in run
        .history
        .future_months(run.report.horizon)
        .iter()
        .enumerate()
    {
        out.push_str(&month.format("%Y-%m-%d").to_string());
        for _ in &names {
            out.push(',');
        }
        for name in &names {
            out.push(',');
            let column = run.report.columns.iter().find(|c| &c.name == name);
            if let Some(v) = column.and_then(|c| c.point.get(row)) {
                out.push_str(&v.to_string());
            }
        }
        out.push('\n');
    }

    out
}

/// Spinner shown while the crew deliberates.
pub fn thinking_spinner(style: Style, message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();

    if style.color {
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.yellow} {msg}")
                .unwrap(),
        );
    } else {
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["-", "\\", "|", "/"])
                .template("{spinner} {msg}")
                .unwrap(),
        );
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use aethelred_core::{AdvisorSession, Config};

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.5, 10), "[█████░░░░░]");
        assert_eq!(progress_bar(1.0, 10), "[██████████]");
        assert_eq!(progress_bar(0.0, 10), "[░░░░░░░░░░]");
    }

    #[test]
    fn test_trend_arrow() {
        assert_eq!(trend_arrow(50.0, 60.0), "↗ Up");
        assert_eq!(trend_arrow(50.0, 40.0), "↘ Down");
        assert_eq!(trend_arrow(50.0, 50.0), "→ Stable");
    }

    #[test]
    fn test_level_window_starts_at_zero() {
        let profile = Profile::new(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(level_window(&profile), (0, 100));
    }

    #[test]
    fn test_level_window_mid_band() {
        let mut profile = Profile::new(chrono::NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        profile.xp = 150;
        profile.level = 2;
        // Level 2 spans [100, 282).
        assert_eq!(level_window(&profile), (50, 182));
    }

    #[test]
    fn test_forecast_csv_layout() {
        let mut session = AdvisorSession::new(Config::default());
        let run = session.run_forecast(Some("trade_war"), Some(4));

        let csv = forecast_csv(&run);
        let lines: Vec<&str> = csv.lines().collect();

        // Header plus 12 history months plus 4 forecast months.
        assert_eq!(lines.len(), 1 + 12 + 4);

        let header = lines[0];
        assert!(header.starts_with("Date,"));
        assert_eq!(header.matches("_Historical").count(), 3);
        assert_eq!(header.matches("_Forecast").count(), 3);
        let historical_pos = header.find("_Historical").unwrap();
        let forecast_pos = header.find("_Forecast").unwrap();
        assert!(historical_pos < forecast_pos);

        // Every row has the same field count: date + 3 + 3.
        for line in &lines {
            assert_eq!(line.matches(',').count(), 6, "bad row: {line}");
        }

        // Historical rows leave the forecast cells empty.
        assert!(lines[1].ends_with(",,,"));
        // Forecast rows leave the historical cells empty.
        let first_forecast = lines[13];
        assert!(first_forecast.contains(",,,"));
        assert!(!first_forecast.ends_with(','));
    }

    #[test]
    fn test_forecast_csv_dates_continue_month_ends() {
        let mut session = AdvisorSession::new(Config::default());
        let run = session.run_forecast(Some("ukraine"), Some(2));

        let csv = forecast_csv(&run);
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].starts_with("2024-01-31"));
        assert!(lines[12].starts_with("2024-12-31"));
        assert!(lines[13].starts_with("2025-01-31"));
        assert!(lines[14].starts_with("2025-02-28"));
    }
}
