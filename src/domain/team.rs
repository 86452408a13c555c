//! Sales teams and their monthly targets.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::TeamId;
use super::money::{lenient_decimal, lenient_units, MAX_AMOUNT, MAX_UNITS};

/// A sales team with monthly volume and unit targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Display color, usually a CSS hex string.
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub monthly_volume_target: Decimal,
    #[serde(default, deserialize_with = "lenient_units::deserialize")]
    pub monthly_unit_target: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// Admin input for creating a team.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, deserialize_with = "lenient_decimal::deserialize")]
    pub monthly_volume_target: Decimal,
    #[serde(default, deserialize_with = "lenient_units::deserialize")]
    pub monthly_unit_target: i64,
}

impl NewTeam {
    /// Check the input against team invariants.
    ///
    /// # Errors
    /// Returns a [`DomainError`] for an empty name, or targets that are
    /// negative or past the accepted bounds.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_fields(
            &self.name,
            self.monthly_volume_target,
            self.monthly_unit_target,
        )
    }

    /// Build the team, assigning a fresh identifier.
    ///
    /// # Errors
    /// Returns a [`DomainError`] when validation fails.
    pub fn into_team(self) -> Result<Team, DomainError> {
        self.validate()?;
        Ok(Team {
            id: TeamId::generate(),
            name: self.name.trim().to_string(),
            color: self.color,
            monthly_volume_target: self.monthly_volume_target,
            monthly_unit_target: self.monthly_unit_target,
            created_at: Utc::now(),
        })
    }
}

/// Partial update for a team. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub monthly_volume_target: Option<Decimal>,
    pub monthly_unit_target: Option<i64>,
}

impl Team {
    /// Apply a partial update, validating the result.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if the updated team would be invalid.
    pub fn apply(&mut self, update: TeamUpdate) -> Result<(), DomainError> {
        let name = update
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or_else(|| self.name.clone());
        let volume = update
            .monthly_volume_target
            .unwrap_or(self.monthly_volume_target);
        let units = update.monthly_unit_target.unwrap_or(self.monthly_unit_target);
        validate_fields(&name, volume, units)?;

        self.name = name;
        if let Some(color) = update.color {
            self.color = color;
        }
        self.monthly_volume_target = volume;
        self.monthly_unit_target = units;
        Ok(())
    }
}

fn validate_fields(name: &str, volume: Decimal, units: i64) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::EmptyName { entity: "team" });
    }
    if volume < Decimal::ZERO {
        return Err(DomainError::NegativeTarget {
            field: "monthly_volume_target",
            value: volume,
        });
    }
    if volume > MAX_AMOUNT {
        return Err(DomainError::OutOfRange {
            field: "monthly_volume_target",
            max: MAX_AMOUNT,
            value: volume,
        });
    }
    if units < 0 {
        return Err(DomainError::NegativeTarget {
            field: "monthly_unit_target",
            value: Decimal::from(units),
        });
    }
    if units > MAX_UNITS {
        return Err(DomainError::OutOfRange {
            field: "monthly_unit_target",
            max: Decimal::from(MAX_UNITS),
            value: Decimal::from(units),
        });
    }
    Ok(())
}
