/// Unit tests for caller status resolution
/// Tests variant selection over status pairs and the expiry countdown
use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_dialer_info::models::{CallerDetails, Customer, Rental};
use rust_dialer_info::resolver::{
    resolve, CallerStatus, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE,
};

fn at(d: u32, m: u32, y: i32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn customer(status: i32) -> Customer {
    Customer {
        name: Some("Ibrahim Naseer".to_string()),
        nid: Some("A304512".to_string()),
        comment: Some("Repeated late returns".to_string()),
        status: Some(status),
    }
}

fn rental(status: i32, expiry: &str) -> Rental {
    Rental {
        status: Some(status),
        outstanding: Some(320),
        days: Some(12),
        expiry: Some(expiry.to_string()),
        cycle: Some("monthly".to_string()),
    }
}

fn lookup(customer_status: i32, rental: Option<Rental>) -> CallerDetails {
    CallerDetails {
        customer: Some(customer(customer_status)),
        rental,
    }
}

#[cfg(test)]
mod variant_selection_tests {
    use super::*;

    #[test]
    fn test_not_found_regardless_of_rental() {
        let now = at(1, 1, 2025, 9, 0);
        for r in [None, Some(rental(0, "01-01-2030 00:00")), Some(rental(1, "01-01-2030 00:00"))] {
            assert_eq!(resolve(Some(&lookup(-1, r)), now), CallerStatus::NotFound);
        }
    }

    #[test]
    fn test_banned_carries_comment() {
        let now = at(1, 1, 2025, 9, 0);
        let mut details = lookup(0, Some(rental(1, "01-01-2030 00:00")));
        details.customer.as_mut().unwrap().comment = Some("X".to_string());
        assert_eq!(
            resolve(Some(&details), now),
            CallerStatus::Banned {
                name: Some("Ibrahim Naseer".to_string()),
                comment: "X".to_string(),
            }
        );
    }

    #[test]
    fn test_customer_only_ignores_rental_numbers() {
        let now = at(1, 1, 2025, 9, 0);
        assert_eq!(
            resolve(Some(&lookup(1, Some(rental(0, "garbage")))), now),
            CallerStatus::CustomerOnly {
                name: Some("Ibrahim Naseer".to_string()),
                nid: Some("A304512".to_string()),
            }
        );
    }

    #[test]
    fn test_every_status_pair_has_exactly_one_variant() {
        let now = at(1, 1, 2025, 9, 0);
        let customer_codes = [None, Some(-1), Some(0), Some(1), Some(2)];
        let rental_codes = [None, Some(0), Some(1), Some(5)];

        for c in customer_codes {
            for r in rental_codes {
                let details = CallerDetails {
                    customer: Some(Customer {
                        status: c,
                        ..customer(0)
                    }),
                    rental: r.map(|code| Rental {
                        status: Some(code),
                        ..rental(0, "01-01-2030 00:00")
                    }),
                };
                let status = resolve(Some(&details), now);
                let expected = match (c, r) {
                    (Some(-1), _) => "not_found",
                    (Some(0), _) => "banned",
                    (Some(1), None) | (Some(1), Some(0)) => "customer_only",
                    (Some(1), Some(1)) => "active_rental",
                    _ => "unknown",
                };
                let json = serde_json::to_value(&status).unwrap();
                assert_eq!(
                    json["variant"], expected,
                    "customer {:?} rental {:?}",
                    c, r
                );
            }
        }
    }
}

#[cfg(test)]
mod expiry_tests {
    use super::*;

    #[test]
    fn test_future_expiry_is_not_expired_and_consistent() {
        let now = at(15, 6, 2026, 8, 17);
        let details = lookup(1, Some(rental(1, "01-01-2030 00:00")));

        let CallerStatus::ActiveRental { expiry, .. } = resolve(Some(&details), now) else {
            panic!("expected active rental");
        };
        assert!(!expiry.is_expired());

        let t = expiry.remaining.unwrap();
        assert!(t.days > 0 && (0..24).contains(&t.hours) && (0..60).contains(&t.minutes));

        let diff = (at(1, 1, 2030, 0, 0) - now).num_milliseconds();
        let composed = t.days * MILLIS_PER_DAY + t.hours * MILLIS_PER_HOUR + t.minutes * MILLIS_PER_MINUTE;
        assert!(composed <= diff && diff - composed < MILLIS_PER_MINUTE);
        assert_eq!(
            expiry.describe(),
            format!("{} Day(s) {} Hour(s) {} Min(s)", t.days, t.hours, t.minutes)
        );
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let now = at(19, 10, 2026, 10, 0);
        let details = lookup(1, Some(rental(1, "01-01-2020 00:00")));
        let status = resolve(Some(&details), now);
        assert!(status.is_expired());
        match status {
            CallerStatus::ActiveRental { expiry, .. } => {
                assert!(expiry.describe().starts_with("Expired "));
                assert!(expiry.describe().ends_with(" ago"));
            }
            other => panic!("expected active rental, got {:?}", other),
        }
    }

    #[test]
    fn test_less_than_a_day_left_omits_days() {
        let expiry_at = at(2, 1, 2027, 18, 30);
        let now = expiry_at - Duration::minutes(150);
        let details = lookup(1, Some(rental(1, "02-01-2027 18:30")));
        let CallerStatus::ActiveRental { expiry, .. } = resolve(Some(&details), now) else {
            panic!("expected active rental");
        };
        assert_eq!(expiry.describe(), "2 Hour(s) 30 Min(s)");
    }

    #[test]
    fn test_unparseable_expiry_is_unknown_and_not_expired() {
        let now = at(1, 1, 2025, 9, 0);
        let details = lookup(1, Some(rental(1, "2030-01-01T00:00:00Z")));
        let CallerStatus::ActiveRental { expiry, .. } = resolve(Some(&details), now) else {
            panic!("expected active rental");
        };
        assert_eq!(expiry.describe(), "Unknown");
        assert!(!expiry.is_expired());
    }
}
