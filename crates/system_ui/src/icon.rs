//! Centralized icon names and the glyph renderer used across the shell.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Icon identifiers available to shell chrome and app descriptors.
pub enum IconName {
    /// Countdown timer.
    Timer,
    /// Notebook with pen.
    NotebookPen,
    /// Code brackets.
    Code,
    /// Curly braces.
    Braces,
    /// Terminal prompt.
    Terminal,
    /// Brain / knowledge.
    Brain,
    /// Kanban columns.
    Kanban,
    /// App grid for the launcher toggle.
    AppGrid,
    /// Monitor, used for "pin to desktop".
    Monitor,
    /// Magnifier.
    Search,
    /// Window minimize control.
    WindowMinimize,
    /// Window maximize control.
    WindowMaximize,
    /// Window restore control.
    WindowRestore,
    /// Close / dismiss.
    Dismiss,
    /// Warning triangle.
    Warning,
}

impl IconName {
    /// Stable token written to `data-ui-icon`.
    pub fn token(self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::NotebookPen => "notebook-pen",
            Self::Code => "code",
            Self::Braces => "braces",
            Self::Terminal => "terminal",
            Self::Brain => "brain",
            Self::Kanban => "kanban",
            Self::AppGrid => "app-grid",
            Self::Monitor => "monitor",
            Self::Search => "search",
            Self::WindowMinimize => "window-minimize",
            Self::WindowMaximize => "window-maximize",
            Self::WindowRestore => "window-restore",
            Self::Dismiss => "dismiss",
            Self::Warning => "warning",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            Self::Timer => "\u{23F2}",
            Self::NotebookPen => "\u{1F4D3}",
            Self::Code => "</>",
            Self::Braces => "{}",
            Self::Terminal => ">_",
            Self::Brain => "\u{1F9E0}",
            Self::Kanban => "\u{25A5}",
            Self::AppGrid => "\u{2637}",
            Self::Monitor => "\u{1F5B5}",
            Self::Search => "\u{1F50D}",
            Self::WindowMinimize => "\u{2212}",
            Self::WindowMaximize => "\u{25A1}",
            Self::WindowRestore => "\u{2750}",
            Self::Dismiss => "\u{2715}",
            Self::Warning => "\u{26A0}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Rendered icon size.
pub enum IconSize {
    /// Titlebar controls.
    Xs,
    /// Inline text.
    Sm,
    /// Dock and list rows.
    #[default]
    Md,
    /// Desktop icons and launcher tiles.
    Lg,
}

impl IconSize {
    fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[component]
/// Renders an icon glyph with the shared `data-ui-*` contract.
pub fn Icon(icon: IconName, #[prop(optional)] size: IconSize) -> impl IntoView {
    view! {
        <span
            class="ui-icon"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="icon"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
        >
            {icon.glyph()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_tokens_are_unique() {
        let all = [
            IconName::Timer,
            IconName::NotebookPen,
            IconName::Code,
            IconName::Braces,
            IconName::Terminal,
            IconName::Brain,
            IconName::Kanban,
            IconName::AppGrid,
            IconName::Monitor,
            IconName::Search,
            IconName::WindowMinimize,
            IconName::WindowMaximize,
            IconName::WindowRestore,
            IconName::Dismiss,
            IconName::Warning,
        ];
        let mut tokens: Vec<_> = all.iter().map(|icon| icon.token()).collect();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), all.len());
    }
}
