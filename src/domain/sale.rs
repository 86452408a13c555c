//! Sale entries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::{AgentId, SaleId};
use super::money::{lenient_decimal, lenient_units, MAX_AMOUNT, MAX_UNITS};

/// A recorded sale. Immutable once created; only deletion is allowed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub agent_id: AgentId,
    pub amount: Decimal,
    pub units: i64,
    pub created_at: DateTime<Utc>,
}

/// Input for recording a sale, from the admin panel or the agent app.
#[derive(Debug, Clone, Deserialize)]
pub struct NewSale {
    pub agent_id: AgentId,
    #[serde(deserialize_with = "lenient_decimal::deserialize")]
    pub amount: Decimal,
    #[serde(default = "default_units", deserialize_with = "lenient_units::deserialize")]
    pub units: i64,
}

fn default_units() -> i64 {
    1
}

impl NewSale {
    /// Build the sale, stamping it with the current time.
    ///
    /// # Errors
    /// Returns a [`DomainError`] for a negative amount or unit count, or
    /// either one above [`MAX_AMOUNT`] / [`MAX_UNITS`].
    pub fn into_sale(self) -> Result<Sale, DomainError> {
        if self.amount < Decimal::ZERO {
            return Err(DomainError::NegativeAmount {
                amount: self.amount,
            });
        }
        if self.amount > MAX_AMOUNT {
            return Err(DomainError::OutOfRange {
                field: "amount",
                max: MAX_AMOUNT,
                value: self.amount,
            });
        }
        if self.units < 0 {
            return Err(DomainError::NegativeUnits { units: self.units });
        }
        if self.units > MAX_UNITS {
            return Err(DomainError::OutOfRange {
                field: "units",
                max: Decimal::from(MAX_UNITS),
                value: Decimal::from(self.units),
            });
        }
        Ok(Sale {
            id: SaleId::generate(),
            agent_id: self.agent_id,
            amount: self.amount,
            units: self.units,
            created_at: Utc::now(),
        })
    }
}
