//! Caller status resolution.
//!
//! Turns a lookup result into exactly one display variant and computes the
//! rental expiry countdown shared by both presentation surfaces.

use crate::models::{CallerDetails, CustomerStatus, RentalStatus};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Format of `rental.expiry` (naive local time).
pub const EXPIRY_FORMAT: &str = "%d-%m-%Y %H:%M";

pub const MILLIS_PER_DAY: i64 = 86_400_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
pub const MILLIS_PER_MINUTE: i64 = 60_000;

/// Text shown when the expiry is missing or unparseable.
pub const UNKNOWN_EXPIRY: &str = "Unknown";

/// Whole days, hours and minutes between now and the rental expiry.
///
/// Components are always non-negative; `expired` carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub expired: bool,
}

impl TimeLeft {
    /// Decompose `diff_ms = expiry - now`.
    pub fn from_millis(diff_ms: i64) -> Self {
        let magnitude = diff_ms.saturating_abs();
        Self {
            days: magnitude / MILLIS_PER_DAY,
            hours: (magnitude % MILLIS_PER_DAY) / MILLIS_PER_HOUR,
            minutes: (magnitude % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE,
            expired: diff_ms < 0,
        }
    }

    pub fn between(expiry: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self::from_millis((expiry - now).num_milliseconds())
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expired {
            write!(f, "Expired ")?;
        }
        if self.days > 0 {
            write!(f, "{} Day(s) ", self.days)?;
        }
        write!(f, "{} Hour(s) {} Min(s)", self.hours, self.minutes)?;
        if self.expired {
            write!(f, " ago")?;
        }
        Ok(())
    }
}

/// Parsed rental expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expiry {
    /// The timestamp as sent by the API.
    pub raw: Option<String>,
    /// `None` when the timestamp is missing or does not match [`EXPIRY_FORMAT`].
    pub remaining: Option<TimeLeft>,
}

impl Expiry {
    pub fn evaluate(raw: Option<&str>, now: NaiveDateTime) -> Self {
        let remaining = raw.and_then(|s| match parse_expiry(s) {
            Some(at) => Some(TimeLeft::between(at, now)),
            None => {
                tracing::warn!("Unparseable rental expiry '{}'", s);
                None
            }
        });

        Self {
            raw: raw.map(str::to_string),
            remaining,
        }
    }

    /// Unknown expiries count as not expired.
    pub fn is_expired(&self) -> bool {
        self.remaining.map(|t| t.expired).unwrap_or(false)
    }

    pub fn describe(&self) -> String {
        match self.remaining {
            Some(time_left) => time_left.to_string(),
            None => UNKNOWN_EXPIRY.to_string(),
        }
    }
}

pub fn parse_expiry(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), EXPIRY_FORMAT).ok()
}

/// The five things a surface can show for a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum CallerStatus {
    NotFound,
    Banned {
        name: Option<String>,
        comment: String,
    },
    CustomerOnly {
        name: Option<String>,
        nid: Option<String>,
    },
    ActiveRental {
        name: Option<String>,
        nid: Option<String>,
        outstanding: i64,
        days: i64,
        expiry: Expiry,
    },
    /// No rule matched. Surfaces render nothing for it.
    Unknown,
}

impl CallerStatus {
    pub fn is_expired(&self) -> bool {
        match self {
            CallerStatus::ActiveRental { expiry, .. } => expiry.is_expired(),
            _ => false,
        }
    }
}

/// Pick the display variant for a lookup result.
///
/// `None` (no response at all) resolves like an empty response.
pub fn resolve(details: Option<&CallerDetails>, now: NaiveDateTime) -> CallerStatus {
    let Some(customer) = details.and_then(|d| d.customer.as_ref()) else {
        return CallerStatus::NotFound;
    };
    let rental = details.and_then(|d| d.rental.as_ref());

    let customer_only = || CallerStatus::CustomerOnly {
        name: customer.name.clone(),
        nid: customer.nid.clone(),
    };

    match customer.status() {
        Some(CustomerStatus::NotFound) => CallerStatus::NotFound,
        Some(CustomerStatus::Banned) => CallerStatus::Banned {
            name: customer.name.clone(),
            comment: customer.comment.clone().unwrap_or_default(),
        },
        Some(CustomerStatus::Valid) => match rental {
            None => customer_only(),
            Some(rental) => match rental.status() {
                Some(RentalStatus::NoActiveRental) => customer_only(),
                Some(RentalStatus::Active) => CallerStatus::ActiveRental {
                    name: customer.name.clone(),
                    nid: customer.nid.clone(),
                    outstanding: rental.outstanding.unwrap_or(0),
                    days: rental.days.unwrap_or(0),
                    expiry: Expiry::evaluate(rental.expiry.as_deref(), now),
                },
                None => unmatched(customer.status, rental.status),
            },
        },
        None => unmatched(customer.status, rental.and_then(|r| r.status)),
    }
}

fn unmatched(customer_code: Option<i32>, rental_code: Option<i32>) -> CallerStatus {
    tracing::warn!(
        "No display rule for customer status {:?} with rental status {:?}",
        customer_code,
        rental_code
    );
    CallerStatus::Unknown
}
