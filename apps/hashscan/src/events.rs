//! Event handling and user feedback

use crate::logging::log_event_with_tracing;
use console::{Style, Term};
use hashscan_events::{AnalysisEvent, AppEvent, EventMessage, GeneralEvent};
use std::time::Duration;

/// Logs every event and surfaces the ones a user should see on stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    quiet: bool,
    term: Term,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            quiet,
            term: Term::stderr(),
        }
    }

    pub fn handle_event(&self, message: EventMessage) {
        log_event_with_tracing(&message);
        if self.quiet {
            return;
        }

        match message.event {
            AppEvent::Analysis(AnalysisEvent::LookupFailed { hash, failure }) => {
                let mut line = format!("lookup failed for {hash}: {}", failure.message);
                if let Some(hint) = failure.hint {
                    line.push_str(&format!(" ({hint})"));
                }
                self.show_warning(&line);
            }
            AppEvent::Analysis(AnalysisEvent::LanePaced { lane, wait_ms }) if self.debug_enabled => {
                self.show_status(&format!(
                    "lane {lane} waiting {:.1}s for quota",
                    Duration::from_millis(wait_ms).as_secs_f64()
                ));
            }
            AppEvent::Analysis(AnalysisEvent::BatchStarted { total, lanes, .. })
                if self.debug_enabled =>
            {
                self.show_status(&format!("checking {total} hashes on {lanes} lanes"));
            }
            AppEvent::General(GeneralEvent::Warning { message, .. }) => {
                self.show_warning(&message);
            }
            AppEvent::General(GeneralEvent::Error { message, details }) => {
                let line = match details {
                    Some(details) => format!("{message}: {details}"),
                    None => message,
                };
                self.show_error(&line);
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        let _ = self.term.write_line(&self.paint(Style::new().dim(), message));
    }

    fn show_warning(&self, message: &str) {
        let _ = self
            .term
            .write_line(&self.paint(Style::new().yellow(), &format!("warning: {message}")));
    }

    fn show_error(&self, message: &str) {
        let _ = self
            .term
            .write_line(&self.paint(Style::new().red().bold(), &format!("error: {message}")));
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors_enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
