use std::io::IsTerminal;
use std::sync::OnceLock;

use tracing::level_filters::LevelFilter;

use crate::cli::GlobalFlags;

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub progress: bool,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// Spinners go to stderr, so they only need stderr to be a terminal; the
/// report on stdout stays clean when piped.
pub fn init(flags: &GlobalFlags, log_level: LevelFilter) {
    let progress = spinner_allowed(std::io::stderr().is_terminal(), flags, log_level);
    let _ = UI_PREFS.set(UiPrefs { progress });
}

/// Log lines share stderr with the spinner, so it only runs when nothing
/// at info or below would be written.
fn spinner_allowed(stderr_is_tty: bool, flags: &GlobalFlags, log_level: LevelFilter) -> bool {
    stderr_is_tty && !flags.quiet && log_level < LevelFilter::INFO
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs { progress: false })
}
