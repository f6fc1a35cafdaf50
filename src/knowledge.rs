//! Gym knowledge and prompt assembly.
//!
//! The model is told to answer only from the knowledge text, so everything
//! the assistant can say about the gym lives here (or in the file named by
//! `[knowledge] path` in the config).

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::{FitzoneError, Result};

/// Facts about FitZone Gym: hours, prices, classes.
pub const GYM_INFO: &str = "
FITZONE GYM

Location: 123 Fitness Avenue, City Center
Phone: (555) 123-4567
Hours: Mon-Fri 5AM-11PM, Weekends 6AM-10PM
Rating: 4.7/5 stars

MEMBERSHIPS:
Basic $29/mo - Gym access, locker room, WiFi
Premium $49/mo - Basic + group classes, sauna, 2 guest passes/month
Elite $79/mo - Premium + 2 PT sessions/month, nutrition consult
Day Pass: $15

CLASSES:
Yoga: Mon/Wed/Fri 7AM, 6PM
Spin: Tue/Thu/Sat 6:30AM, 5:30PM
HIIT: Mon/Wed/Fri 6PM
Pilates: Tue/Thu 7AM, 6PM
Zumba: Wed/Sat 5PM
Boxing: Tue/Thu 7PM

PERSONAL TRAINING:
Single: $60, 5-pack: $275, 10-pack: $500, Unlimited: $400/month

SPECIAL: First month 50% off for new members!
";

/// Persona line opening every prompt.
pub const PERSONA: &str = "You are Max, an energetic fitness assistant at FitZone Gym.";

/// Immutable knowledge text the model must answer from.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    text: Cow<'static, str>,
}

impl KnowledgeBase {
    /// The built-in FitZone facts.
    pub fn fitzone() -> Self {
        Self {
            text: Cow::Borrowed(GYM_INFO),
        }
    }

    /// Use custom knowledge text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Cow::Owned(text.into()),
        }
    }

    /// Read knowledge text from a file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            FitzoneError::Configuration(format!("Failed to read knowledge file {path:?}: {e}"))
        })?;
        if text.trim().is_empty() {
            return Err(FitzoneError::Configuration(format!(
                "Knowledge file {path:?} is empty"
            )));
        }
        Ok(Self::new(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Build the full prompt for one customer question.
    ///
    /// The knowledge is inserted verbatim and the question is not escaped
    /// or trimmed.
    pub fn prompt(&self, question: &str) -> String {
        format!(
            "{PERSONA}\n\nAnswer using ONLY this information:\n{}\n\nCustomer: {question}\n\nYour response:",
            self.text
        )
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::fitzone()
    }
}
