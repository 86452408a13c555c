//! Cash offers: spiffs paid out for hitting a sales goal.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::CashOfferId;
use super::money::MAX_AMOUNT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashOffer {
    pub id: CashOfferId,
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCashOffer {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

fn validate_title(title: String) -> Result<String, DomainError> {
    let title = title.trim().to_string();
    if title.is_empty() {
        return Err(DomainError::EmptyName {
            entity: "cash offer",
        });
    }
    Ok(title)
}

fn validate_amount(amount: Decimal) -> Result<Decimal, DomainError> {
    if amount.is_sign_negative() {
        return Err(DomainError::NegativeAmount { amount });
    }
    if amount > MAX_AMOUNT {
        return Err(DomainError::OutOfRange {
            field: "amount",
            max: MAX_AMOUNT,
            value: amount,
        });
    }
    Ok(amount)
}

impl NewCashOffer {
    /// # Errors
    /// Returns a [`DomainError`] for a blank title or an amount that is
    /// negative or above [`MAX_AMOUNT`].
    pub fn into_cash_offer(self) -> Result<CashOffer, DomainError> {
        Ok(CashOffer {
            id: CashOfferId::generate(),
            title: validate_title(self.title)?,
            description: self.description,
            amount: validate_amount(self.amount)?,
            active: self.active,
            created_at: Utc::now(),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CashOfferUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub active: Option<bool>,
}

impl CashOffer {
    /// Applies `update`, leaving the offer untouched when any field is invalid.
    ///
    /// # Errors
    /// Same rules as [`NewCashOffer::into_cash_offer`].
    pub fn apply(&mut self, update: CashOfferUpdate) -> Result<(), DomainError> {
        let title = update.title.map(validate_title).transpose()?;
        let amount = update.amount.map(validate_amount).transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(active) = update.active {
            self.active = active;
        }
        Ok(())
    }
}
