use serde::{Deserialize, Serialize};

// ============ Lookup API Models ============

/// Customer record returned by the lookup API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Customer's full name.
    #[serde(default)]
    pub name: Option<String>,
    /// National ID number.
    #[serde(default)]
    pub nid: Option<String>,
    /// Free-text comment, only shown when the customer is banned.
    #[serde(default)]
    pub comment: Option<String>,
    /// Raw status code (-1 = not found, 0 = banned, 1 = valid).
    #[serde(default)]
    pub status: Option<i32>,
}

/// Rental record returned by the lookup API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rental {
    /// Raw status code (0 = no active rental, 1 = active rental).
    #[serde(default)]
    pub status: Option<i32>,
    /// Outstanding balance in currency units.
    #[serde(default)]
    pub outstanding: Option<i64>,
    /// Number of days rented.
    #[serde(default)]
    pub days: Option<i64>,
    /// Expiry timestamp, `dd-MM-yyyy HH:mm` in local time.
    #[serde(default)]
    pub expiry: Option<String>,
    /// Billing cycle. Not used for display.
    #[serde(default)]
    pub cycle: Option<String>,
}

/// Body of `GET get_caller`.
///
/// Both fields absent means the API has no details for the number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerDetails {
    #[serde(default)]
    pub rental: Option<Rental>,
    #[serde(default)]
    pub customer: Option<Customer>,
}

impl CallerDetails {
    pub fn is_empty(&self) -> bool {
        self.rental.is_none() && self.customer.is_none()
    }
}

// ============ Status Codes ============

/// Customer status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    NotFound,
    Banned,
    Valid,
}

impl CustomerStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(CustomerStatus::NotFound),
            0 => Some(CustomerStatus::Banned),
            1 => Some(CustomerStatus::Valid),
            _ => None,
        }
    }
}

/// Rental status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    NoActiveRental,
    Active,
}

impl RentalStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RentalStatus::NoActiveRental),
            1 => Some(RentalStatus::Active),
            _ => None,
        }
    }
}

impl Customer {
    /// Parsed status, `None` when the code is missing or unrecognised.
    pub fn status(&self) -> Option<CustomerStatus> {
        self.status.and_then(CustomerStatus::from_code)
    }
}

impl Rental {
    /// Parsed status, `None` when the code is missing or unrecognised.
    pub fn status(&self) -> Option<RentalStatus> {
        self.status.and_then(RentalStatus::from_code)
    }
}
