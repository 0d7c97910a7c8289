//! Exchange rates

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing an exchange rate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    /// The proposed rate was zero or negative.
    ///
    /// The backend value is otherwise trusted, but a non-positive rate would
    /// silently zero or negate every total, so such updates are refused and
    /// the previous rate stays in effect.
    #[error("exchange rate must be positive, got {0}")]
    NotPositive(Decimal),
}

/// IQD per 1 USD.
///
/// A single shared setting fetched from the backend and kept live by the
/// rate feed; totals are always computed against the value current at the
/// moment of the computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct ExchangeRate(Decimal);

impl ExchangeRate {
    /// Fallback used until the first successful fetch from the backend.
    pub const DEFAULT: ExchangeRate = ExchangeRate(Decimal::from_parts(1_500, 0, 0, false, 0));

    /// Creates a rate, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`RateError::NotPositive`] when `iqd_per_usd <= 0`.
    pub fn new(iqd_per_usd: Decimal) -> Result<Self, RateError> {
        if iqd_per_usd <= Decimal::ZERO {
            return Err(RateError::NotPositive(iqd_per_usd));
        }

        Ok(Self(iqd_per_usd))
    }

    /// The rate as a decimal multiplier.
    #[must_use]
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }

    /// Converts a USD amount into IQD at this rate.
    #[must_use]
    pub fn convert(self, usd: Decimal) -> Decimal {
        usd * self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Display for ExchangeRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "$1 = {} IQD", self.0)
    }
}

impl TryFrom<Decimal> for ExchangeRate {
    type Error = RateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExchangeRate> for Decimal {
    fn from(rate: ExchangeRate) -> Self {
        rate.as_decimal()
    }
}
