//! Currency conversion arithmetic.

use std::fmt;

use crate::error::{BotError, Result};
use crate::rates::RateSnapshot;
use crate::types::{Amount, CurrencyCode, CurrencyPair};

/// Convert `amount` between two currencies quoted against a common base.
pub fn convert(amount: f64, from_rate: f64, to_rate: f64) -> f64 {
    amount / from_rate * to_rate
}

/// A finished conversion, rendered as `100.0 USD = 90.00 EUR`.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: Amount,
    pub pair: CurrencyPair,
    pub result: f64,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} = {:.2} {}",
            self.amount, self.pair.from, self.result, self.pair.to
        )
    }
}

fn rate_for(rates: &RateSnapshot, code: &CurrencyCode) -> Result<f64> {
    let rate = rates
        .get(code)
        .ok_or_else(|| BotError::MissingRate(code.clone()))?;

    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(BotError::InvalidRate {
            code: code.clone(),
            rate,
        })
    }
}

/// Convert a pending amount using a freshly fetched snapshot.
///
/// # Errors
///
/// Returns [`BotError::MissingRate`] if either code is absent from the snapshot
/// and [`BotError::InvalidRate`] if a rate is zero, negative or not finite.
pub fn convert_pair(amount: Amount, pair: &CurrencyPair, rates: &RateSnapshot) -> Result<Conversion> {
    let from_rate = rate_for(rates, &pair.from)?;
    let to_rate = rate_for(rates, &pair.to)?;

    Ok(Conversion {
        amount,
        pair: pair.clone(),
        result: convert(amount.value(), from_rate, to_rate),
    })
}
