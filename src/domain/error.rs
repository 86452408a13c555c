//! Domain validation errors for core domain types.
//!
//! These errors are returned when admin input violates a domain rule, for
//! example a negative sale amount or an empty team name.
//!
//! # Examples
//!
//! ```
//! use leaderboard::domain::error::DomainError;
//! use leaderboard::domain::team::NewTeam;
//! use rust_decimal_macros::dec;
//!
//! let result = NewTeam {
//!     name: "   ".into(),
//!     color: "#ff0000".into(),
//!     monthly_volume_target: dec!(1000),
//!     monthly_unit_target: 10,
//! }
//! .validate();
//!
//! assert!(matches!(result, Err(DomainError::EmptyName { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Names must contain at least one non-whitespace character.
    #[error("{entity} name cannot be empty")]
    EmptyName {
        /// Which kind of entity was being named.
        entity: &'static str,
    },

    /// Monthly targets cannot be negative.
    #[error("{field} must be 0 or greater, got {value}")]
    NegativeTarget {
        /// Name of the offending field.
        field: &'static str,
        /// The invalid value.
        value: Decimal,
    },

    /// Sale amounts cannot be negative.
    #[error("sale amount must be 0 or greater, got {amount}")]
    NegativeAmount {
        /// The invalid amount.
        amount: Decimal,
    },

    /// Unit counts cannot be negative.
    #[error("unit count must be 0 or greater, got {units}")]
    NegativeUnits {
        /// The invalid unit count.
        units: i64,
    },

    /// Amounts, unit counts and targets have an upper bound.
    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The largest accepted value.
        max: Decimal,
        /// The rejected value.
        value: Decimal,
    },

    /// Applying a sale would overflow an agent's running counters.
    #[error("counters for agent {agent_id} would overflow")]
    CounterOverflow {
        /// The agent whose counters were being adjusted.
        agent_id: String,
    },

    /// A team cannot be deleted while agents still belong to it.
    #[error("team {team_id} still has {agents} agent(s) assigned")]
    TeamInUse {
        /// The team being deleted.
        team_id: String,
        /// Number of agents still referencing it.
        agents: usize,
    },

    /// A referenced entity does not exist.
    #[error("unknown {entity}: {id}")]
    UnknownReference {
        /// Kind of the missing entity.
        entity: &'static str,
        /// The identifier that failed to resolve.
        id: String,
    },
}
