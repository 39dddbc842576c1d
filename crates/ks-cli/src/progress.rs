use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        Self { bar: Some(bar) }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }

    /// Run `work` under a spinner, closing it according to the outcome.
    pub fn run<T, E>(message: &str, work: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let progress = Self::spinner(message);
        let result = work();
        match &result {
            Ok(_) => progress.finish_ok(&format!("{message}: done")),
            Err(_) => progress.finish_err(&format!("{message}: failed")),
        }
        result
    }
}
