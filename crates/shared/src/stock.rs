use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{Error, Result};

/// One pantry row owned by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StockEntry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub quantity: f64,
    #[serde(default)]
    #[validate(length(max = 25))]
    pub unit: String,
}

impl StockEntry {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    pub fn is_usable(&self) -> bool {
        !self.name.trim().is_empty() && self.quantity.is_finite() && self.quantity >= 0.0
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if !self.quantity.is_finite() {
            return Err(Error::InvalidQuantity {
                name: self.name.to_owned(),
                quantity: self.quantity,
            });
        }

        Ok(())
    }
}
