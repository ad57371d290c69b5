use crate::resolver::CallerStatus;
use serde::Serialize;

/// Overlay background drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayBackground {
    /// Layout default.
    Default,
    /// Light blue gradient.
    Valid,
    /// Red gradient.
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextColor {
    Default,
    Black,
    White,
}

/// Visual properties of the floating caller bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlayView {
    pub title: String,
    pub subtitle: String,
    pub background: OverlayBackground,
    pub text_color: TextColor,
    /// Button-like box shown only while something is owed.
    pub outstanding_badge: Option<String>,
}

impl OverlayView {
    fn plain(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            background: OverlayBackground::Default,
            text_color: TextColor::Default,
            outstanding_badge: None,
        }
    }
}

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

/// Map a resolved caller status onto the overlay.
pub fn render_overlay(status: &CallerStatus) -> OverlayView {
    match status {
        CallerStatus::NotFound => OverlayView::plain("No details found", ""),
        CallerStatus::Banned { name, comment } => {
            let subtitle = if comment.is_empty() {
                "No additional comments".to_string()
            } else {
                comment.clone()
            };
            OverlayView {
                background: OverlayBackground::Warning,
                text_color: TextColor::White,
                ..OverlayView::plain(format!("Customer Banned: {}", or_unknown(name)), subtitle)
            }
        }
        CallerStatus::CustomerOnly { name, nid } => OverlayView {
            background: OverlayBackground::Valid,
            ..OverlayView::plain(
                format!("Customer: {} (NID: {})", or_unknown(name), or_unknown(nid)),
                "No active rental",
            )
        },
        CallerStatus::ActiveRental {
            name,
            nid,
            outstanding,
            days,
            expiry,
        } => {
            let badge = (*outstanding > 0).then(|| format!("Outstanding: ${}", outstanding));

            let mut lines = Vec::new();
            if let Some(ref text) = badge {
                lines.push(text.clone());
            }
            if *days > 0 {
                lines.push(format!("Days Rented: {}", days));
            }
            lines.push(format!("Expiry: {}", expiry.describe()));

            let (background, text_color) = if expiry.is_expired() {
                (OverlayBackground::Warning, TextColor::White)
            } else {
                (OverlayBackground::Valid, TextColor::Black)
            };

            OverlayView {
                title: format!("Customer: {} (NID: {})", or_unknown(name), or_unknown(nid)),
                subtitle: lines.join("\n"),
                background,
                text_color,
                outstanding_badge: badge,
            }
        }
        CallerStatus::Unknown => OverlayView::plain("", ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{Expiry, TimeLeft};

    fn active(outstanding: i64, days: i64, expired: bool) -> CallerStatus {
        CallerStatus::ActiveRental {
            name: Some("Mariyam".into()),
            nid: Some("A998877".into()),
            outstanding,
            days,
            expiry: Expiry {
                raw: Some("01-01-2030 00:00".into()),
                remaining: Some(TimeLeft {
                    days: 0,
                    hours: 3,
                    minutes: 15,
                    expired,
                }),
            },
        }
    }

    #[test]
    fn test_not_found() {
        let view = render_overlay(&CallerStatus::NotFound);
        assert_eq!(view.title, "No details found");
        assert_eq!(view.subtitle, "");
        assert_eq!(view.background, OverlayBackground::Default);
    }

    #[test]
    fn test_banned_uses_warning_style() {
        let view = render_overlay(&CallerStatus::Banned {
            name: Some("Hassan".into()),
            comment: String::new(),
        });
        assert_eq!(view.title, "Customer Banned: Hassan");
        assert_eq!(view.subtitle, "No additional comments");
        assert_eq!(view.background, OverlayBackground::Warning);
        assert_eq!(view.text_color, TextColor::White);
    }

    #[test]
    fn test_customer_only() {
        let view = render_overlay(&CallerStatus::CustomerOnly {
            name: Some("Hassan".into()),
            nid: None,
        });
        assert_eq!(view.title, "Customer: Hassan (NID: Unknown)");
        assert_eq!(view.subtitle, "No active rental");
        assert_eq!(view.background, OverlayBackground::Valid);
    }

    #[test]
    fn test_active_rental_with_balance() {
        let view = render_overlay(&active(150, 6, false));
        assert_eq!(view.outstanding_badge.as_deref(), Some("Outstanding: $150"));
        assert_eq!(
            view.subtitle,
            "Outstanding: $150\nDays Rented: 6\nExpiry: 3 Hour(s) 15 Min(s)"
        );
        assert_eq!(view.background, OverlayBackground::Valid);
        assert_eq!(view.text_color, TextColor::Black);
    }

    #[test]
    fn test_active_rental_hides_zero_balance_and_days() {
        let view = render_overlay(&active(0, 0, true));
        assert!(view.outstanding_badge.is_none());
        assert_eq!(view.subtitle, "Expiry: Expired 3 Hour(s) 15 Min(s) ago");
        assert_eq!(view.background, OverlayBackground::Warning);
        assert_eq!(view.text_color, TextColor::White);
    }

    #[test]
    fn test_unknown_is_empty() {
        let view = render_overlay(&CallerStatus::Unknown);
        assert!(view.title.is_empty());
        assert!(view.subtitle.is_empty());
    }
}
