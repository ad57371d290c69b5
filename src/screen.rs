use crate::models::CallerDetails;
use crate::resolver::{resolve, CallerStatus};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Card style on the in-app screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    /// Red card carrying a lookup failure.
    Error,
    /// Error-coloured "no details" card.
    NoDetails,
    /// Red banned-customer card.
    Banned,
    /// Neutral surface card.
    Customer,
    /// Primary-tinted rental card.
    Rental,
    /// Nothing to show.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardLine {
    pub text: String,
    pub bold: bool,
    /// Drawn on a red background.
    pub highlight: bool,
}

impl CardLine {
    fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
            highlight: false,
        }
    }

    fn regular(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            highlight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenCard {
    pub tone: CardTone,
    pub lines: Vec<CardLine>,
}

/// What the in-app screen currently holds.
///
/// A lookup error wins over any previously loaded details.
#[derive(Debug, Clone, Default)]
pub struct ScreenState {
    pub details: Option<CallerDetails>,
    pub error: Option<String>,
}

impl ScreenState {
    pub fn from_lookup<E: std::fmt::Display>(result: Result<CallerDetails, E>) -> Self {
        match result {
            Ok(details) => Self {
                details: Some(details),
                error: None,
            },
            Err(e) => Self {
                details: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn render(&self, now: NaiveDateTime) -> ScreenCard {
        if let Some(ref message) = self.error {
            return ScreenCard {
                tone: CardTone::Error,
                lines: vec![CardLine::bold(format!("Error: {}", message))],
            };
        }

        match self.details {
            Some(ref details) => render_card(&resolve(Some(details), now)),
            None => ScreenCard {
                tone: CardTone::NoDetails,
                lines: vec![CardLine::bold("No details found")],
            },
        }
    }
}

fn customer_lines(name: &Option<String>, nid: &Option<String>) -> Vec<CardLine> {
    vec![
        CardLine::bold(format!(
            "Customer: {}",
            name.as_deref().unwrap_or("Unknown")
        )),
        CardLine::regular(format!("NID: {}", nid.as_deref().unwrap_or("Unknown"))),
    ]
}

/// Map a resolved caller status onto the in-app card.
pub fn render_card(status: &CallerStatus) -> ScreenCard {
    match status {
        CallerStatus::NotFound => ScreenCard {
            tone: CardTone::NoDetails,
            lines: vec![CardLine::bold("No details found for this caller.")],
        },
        CallerStatus::Banned { name, comment } => {
            let mut lines = vec![CardLine::bold(format!(
                "Customer Banned: {}",
                name.as_deref().unwrap_or("Unknown")
            ))];
            if !comment.is_empty() {
                lines.push(CardLine::regular(format!("Reason: {}", comment)));
            }
            ScreenCard {
                tone: CardTone::Banned,
                lines,
            }
        }
        CallerStatus::CustomerOnly { name, nid } => ScreenCard {
            tone: CardTone::Customer,
            lines: customer_lines(name, nid),
        },
        CallerStatus::ActiveRental {
            name,
            nid,
            outstanding,
            days,
            expiry,
        } => {
            let mut lines = customer_lines(name, nid);
            lines.push(CardLine::bold(format!("Outstanding: ${}", outstanding)));
            lines.push(CardLine::regular(format!("Days Remaining: {}", days)));
            lines.push(CardLine {
                text: format!("Expiry: {}", expiry.describe()),
                bold: true,
                highlight: expiry.is_expired(),
            });
            ScreenCard {
                tone: CardTone::Rental,
                lines,
            }
        }
        CallerStatus::Unknown => ScreenCard {
            tone: CardTone::Empty,
            lines: Vec::new(),
        },
    }
}
