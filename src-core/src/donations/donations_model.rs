use chrono::NaiveDateTime;
use diesel::prelude::*;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_REFERENCE_LEN: usize = 100;
pub const MAX_EMAIL_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 30;

lazy_static! {
    // local@domain.tld shape, nothing fancier.
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// One completed contribution. `amount` is in the smallest currency unit.
#[derive(
    Queryable,
    Identifiable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::donations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: i64,
    pub reference: Option<String>,
    pub premium_word_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::donations)]
pub struct NewDonation {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub amount: i64,
    pub reference: Option<String>,
    pub premium_word_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonationTotals {
    pub total_amount: i64,
    pub donation_count: i64,
}

/// Create request as received from the caller. Amounts arrive as JSON
/// numbers and are floored to whole currency units.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub first_name: String,
    pub last_name: String,
    pub amount: f64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub premium_word_id: Option<String>,
}

/// Normalized creation input; the premium word is still a raw candidate at
/// this point and gets resolved by the service.
#[derive(Debug, Clone)]
pub struct ValidatedDonation {
    pub first_name: String,
    pub last_name: String,
    pub amount: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reference: Option<String>,
    pub premium_word_id: Option<String>,
}

/// Partial update. An absent field is untouched; an optional field
/// explicitly set to an empty string is cleared.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub amount: Option<f64>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub reference: Option<String>,
    pub premium_word_id: Option<String>,
}

/// Validated patch: the outer Option marks field presence, the inner one the
/// final stored value (None clears).
#[derive(Debug, Clone, Default)]
pub struct DonationChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub amount: Option<i64>,
    pub email: Option<Option<String>>,
    pub phone: Option<Option<String>>,
    pub reference: Option<Option<String>>,
    pub premium_word_id: Option<Option<String>>,
}

impl DonationChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.amount.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.reference.is_none()
            && self.premium_word_id.is_none()
    }

    /// Writes the present fields onto an existing row.
    pub fn apply_to(&self, row: &mut Donation) {
        if let Some(ref v) = self.first_name {
            row.first_name = v.clone();
        }
        if let Some(ref v) = self.last_name {
            row.last_name = v.clone();
        }
        if let Some(v) = self.amount {
            row.amount = v;
        }
        if let Some(ref v) = self.email {
            row.email = v.clone();
        }
        if let Some(ref v) = self.phone {
            row.phone = v.clone();
        }
        if let Some(ref v) = self.reference {
            row.reference = v.clone();
        }
        if let Some(ref v) = self.premium_word_id {
            row.premium_word_id = v.clone();
        }
    }
}

impl CreateDonationRequest {
    pub fn validated(self) -> Result<ValidatedDonation> {
        let first_name = required_name(&self.first_name, "firstName")?;
        let last_name = required_name(&self.last_name, "lastName")?;
        let amount = positive_amount(self.amount)?;

        Ok(ValidatedDonation {
            first_name,
            last_name,
            amount,
            email: optional_email(self.email)?,
            phone: normalize_optional(self.phone, MAX_PHONE_LEN),
            reference: normalize_optional(self.reference, MAX_REFERENCE_LEN),
            premium_word_id: self.premium_word_id,
        })
    }
}

impl DonationUpdate {
    pub fn validated(self) -> Result<DonationChanges> {
        let first_name = match self.first_name {
            Some(v) => Some(required_name(&v, "firstName")?),
            None => None,
        };
        let last_name = match self.last_name {
            Some(v) => Some(required_name(&v, "lastName")?),
            None => None,
        };
        let amount = match self.amount {
            Some(v) => Some(positive_amount(v)?),
            None => None,
        };
        let email = match self.email {
            Some(v) => Some(optional_email(Some(v))?),
            None => None,
        };

        Ok(DonationChanges {
            first_name,
            last_name,
            amount,
            email,
            phone: self.phone.map(|v| normalize_optional(Some(v), MAX_PHONE_LEN)),
            reference: self
                .reference
                .map(|v| normalize_optional(Some(v), MAX_REFERENCE_LEN)),
            premium_word_id: self.premium_word_id.map(Some),
        })
    }
}

fn required_name(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()).into());
    }
    Ok(trimmed.chars().take(MAX_NAME_LEN).collect())
}

fn positive_amount(value: f64) -> Result<i64> {
    if !value.is_finite() || value.floor() <= 0.0 {
        return Err(
            ValidationError::InvalidInput("amount must be a positive number".to_string()).into(),
        );
    }
    Ok(value.floor() as i64)
}

fn normalize_optional(value: Option<String>, max: usize) -> Option<String> {
    let trimmed: String = value?.trim().chars().take(max).collect();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn optional_email(value: Option<String>) -> Result<Option<String>> {
    match normalize_optional(value, MAX_EMAIL_LEN) {
        Some(email) => {
            if EMAIL.is_match(&email) {
                Ok(Some(email))
            } else {
                Err(ValidationError::InvalidInput("email format is invalid".to_string()).into())
            }
        }
        None => Ok(None),
    }
}
