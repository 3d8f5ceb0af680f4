use crate::merger::MergeAction;
use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// What a piece of console text means, independent of how it is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Header,
    Success,
    Error,
    Warn,
    Accent,
    Path,
    Dim,
    Created,
    Changed,
    Unchanged,
}

impl Role {
    pub fn for_action(action: MergeAction) -> Self {
        match action {
            MergeAction::Created => Role::Created,
            MergeAction::Replaced | MergeAction::Appended => Role::Changed,
            MergeAction::Unchanged => Role::Unchanged,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    /// Colour on a terminal unless `NO_COLOR` is set; `CLICOLOR_FORCE` forces it
    pub fn detect() -> Self {
        let color = color_wanted(
            std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            std::env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0"),
            console::Term::stdout().is_term(),
        );
        Self { color }
    }

    pub const fn colored() -> Self {
        Self { color: true }
    }

    pub const fn plain() -> Self {
        Self { color: false }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    pub fn style(&self, role: Role) -> Style {
        if !self.color {
            return Style::new();
        }
        match role {
            Role::Header => Style::new().cyan().bold(),
            Role::Success | Role::Created => Style::new().green().bold(),
            Role::Error => Style::new().red().bold(),
            Role::Warn => Style::new().yellow().bold(),
            Role::Accent => Style::new().magenta(),
            Role::Path => Style::new().blue(),
            Role::Changed => Style::new().yellow(),
            Role::Dim | Role::Unchanged => Style::new().bright_black(),
        }
    }
}

fn color_wanted(no_color: bool, force: bool, is_term: bool) -> bool {
    !no_color && (force || is_term)
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
