//! Rate table backing the pricing collaborator

use crate::core::traits::Pricing;
use crate::types::LedgerError;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

/// Named fee and interest rates, as configured under `[pricing]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PriceList {
    #[serde(default)]
    pub costs: HashMap<String, f64>,
    #[serde(default)]
    pub interests: HashMap<String, f64>,
}

impl PriceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a fee rate
    pub fn with_cost(mut self, name: &str, rate: f64) -> Self {
        self.costs.insert(name.to_string(), rate);
        self
    }

    /// Add or replace an interest rate
    pub fn with_interest(mut self, name: &str, rate: f64) -> Self {
        self.interests.insert(name.to_string(), rate);
        self
    }
}

impl Pricing for PriceList {
    fn rate(&self, name: &str) -> Result<Decimal, LedgerError> {
        lookup(&self.costs, name)
    }

    fn interest(&self, name: &str) -> Result<Decimal, LedgerError> {
        lookup(&self.interests, name)
    }
}

fn lookup(table: &HashMap<String, f64>, name: &str) -> Result<Decimal, LedgerError> {
    let rate = *table
        .get(name)
        .ok_or_else(|| LedgerError::configuration_missing(name))?;

    let invalid = || LedgerError::InvalidRate {
        name: name.to_string(),
        rate: rate.to_string(),
    };

    if !rate.is_finite() || rate < 0.0 {
        return Err(invalid());
    }

    Decimal::try_from(rate).map_err(|_| invalid())
}
