use std::sync::Mutex;

use crate::session::SummaryDisplay;
use crate::util::output;

/// Prints each summary refresh to stderr, skipping repeats.
#[derive(Debug, Default)]
pub struct ConsoleSummary {
    last: Mutex<Option<String>>,
}

impl SummaryDisplay for ConsoleSummary {
    fn show(&self, text: &str) {
        let mut last = self
            .last
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if last.as_deref() == Some(text) {
            return;
        }
        output::summary(text);
        *last = Some(text.to_string());
    }
}
