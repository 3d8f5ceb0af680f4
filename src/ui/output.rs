//! Status lines for the CLI
//!
//! Each line is built by a `*_line` function against an explicit [`Theme`]
//! and printed by a thin wrapper that honours [`is_quiet`]. Errors and
//! warnings go to stderr and are never silenced.

use crate::merger::{MergeAction, MergeOutcome};
use crate::output::is_quiet;
use crate::ui::{Icons, Role, Theme, theme};
use owo_colors::OwoColorize;
use std::path::Path;

fn status(line: String) {
    if !is_quiet() {
        println!("{}", line);
    }
}

pub fn header_line(theme: &Theme, text: &str) -> String {
    format!("{} {}", Icons::ROCKET, text.style(theme.style(Role::Header)))
}

pub fn header(text: &str) {
    status(header_line(theme(), text));
}

pub fn success(label: &str) {
    status(format!("{} {}", Icons::CHECK, label.style(theme().style(Role::Success))));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().style(Role::Error)));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().style(Role::Warn)));
}

pub fn info(label: &str, value: &str) {
    let t = theme();
    status(format!(
        "{} {}: {}",
        Icons::INFO.style(t.style(Role::Accent)),
        label.style(t.style(Role::Dim)),
        value
    ));
}

/// Blank line, then a pipeline heading
pub fn section(title: &str) {
    let t = theme();
    status(format!(
        "\n{} {}",
        Icons::GEAR.style(t.style(Role::Accent)),
        title.style(t.style(Role::Header))
    ));
}

pub fn skipped(label: &str) {
    status(format!("{} {}", Icons::SKIP, label.style(theme().style(Role::Dim))));
}

pub fn summary_row(label: &str, value: &str) {
    status(format!("  {} {}", label.style(theme().style(Role::Dim)), value));
}

fn action_icon(action: MergeAction) -> &'static str {
    match action {
        MergeAction::Created => Icons::NEW,
        MergeAction::Replaced | MergeAction::Appended => Icons::MOD,
        MergeAction::Unchanged => Icons::SAME,
    }
}

/// The line for one merged target; `Err` lines belong on stderr
pub fn merge_line(
    theme: &Theme,
    generator: &str,
    path: &Path,
    outcome: &Result<MergeOutcome, String>,
) -> Result<String, String> {
    match outcome {
        Ok(outcome) => Ok(format!(
            "  {} {}: {}",
            action_icon(outcome.action),
            generator.style(theme.style(Role::Accent)),
            outcome.message().style(theme.style(Role::for_action(outcome.action)))
        )),
        Err(message) => Err(format!(
            "  {} {}: {} ({})",
            Icons::CROSS,
            generator.style(theme.style(Role::Error)),
            message,
            path.display().style(theme.style(Role::Path))
        )),
    }
}

pub fn merge_result(generator: &str, path: &Path, outcome: &Result<MergeOutcome, String>) {
    match merge_line(theme(), generator, path, outcome) {
        Ok(line) => status(line),
        Err(line) => eprintln!("{}", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn outcome(action: MergeAction) -> Result<MergeOutcome, String> {
        Ok(MergeOutcome {
            path: PathBuf::from("docs/AGENTS.md"),
            action,
        })
    }

    #[test]
    fn test_merge_line_per_action() {
        let plain = Theme::plain();
        let path = Path::new("docs/AGENTS.md");
        assert_eq!(
            merge_line(&plain, "rules-index", path, &outcome(MergeAction::Created)),
            Ok(format!("  {} rules-index: Created AGENTS.md", Icons::NEW))
        );
        assert_eq!(
            merge_line(&plain, "rules-index", path, &outcome(MergeAction::Unchanged)),
            Ok(format!("  {} rules-index: AGENTS.md is up to date", Icons::SAME))
        );
    }

    #[test]
    fn test_failed_merge_line_names_path() {
        let line = merge_line(
            &Theme::plain(),
            "rules-index",
            Path::new("docs/AGENTS.md"),
            &Err("malformed".to_string()),
        );
        assert_eq!(
            line,
            Err(format!("  {} rules-index: malformed (docs/AGENTS.md)", Icons::CROSS))
        );
    }

    #[test]
    fn test_header_line() {
        assert_eq!(
            header_line(&Theme::plain(), "Syncing"),
            format!("{} Syncing", Icons::ROCKET)
        );
    }
}
