use std::str::FromStr;

use strum::{AsRefStr, Display, EnumString};

/// Measurement families; conversion only ever happens inside one family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    Mass,
    Volume,
    Count,
}

/// Units the converter knows about.
///
/// Base units are grams (mass), milliliters (volume) and pieces (count).
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Unit {
    #[strum(to_string = "g", serialize = "gram", serialize = "grams", serialize = "gr")]
    Gram,
    #[strum(
        to_string = "kg",
        serialize = "kilogram",
        serialize = "kilograms",
        serialize = "kgs"
    )]
    Kilogram,
    #[strum(to_string = "oz", serialize = "ounce", serialize = "ounces")]
    Ounce,
    #[strum(
        to_string = "lb",
        serialize = "lbs",
        serialize = "pound",
        serialize = "pounds"
    )]
    Pound,
    #[strum(
        to_string = "ml",
        serialize = "milliliter",
        serialize = "milliliters",
        serialize = "millilitre",
        serialize = "millilitres"
    )]
    Milliliter,
    #[strum(
        to_string = "l",
        serialize = "liter",
        serialize = "liters",
        serialize = "litre",
        serialize = "litres"
    )]
    Liter,
    #[strum(to_string = "cup", serialize = "cups")]
    Cup,
    #[strum(
        to_string = "tbsp",
        serialize = "tablespoon",
        serialize = "tablespoons",
        serialize = "tbs"
    )]
    Tablespoon,
    #[strum(to_string = "tsp", serialize = "teaspoon", serialize = "teaspoons")]
    Teaspoon,
    #[strum(
        to_string = "piece",
        serialize = "pieces",
        serialize = "pc",
        serialize = "pcs",
        serialize = "whole",
        serialize = "item",
        serialize = "items"
    )]
    Piece,
    #[strum(to_string = "dozen", serialize = "dozens", serialize = "dz")]
    Dozen,
}

impl Unit {
    /// Parse a free-text unit. A blank unit counts as pieces.
    pub fn parse(unit: &str) -> Option<Self> {
        let trimmed = unit.trim();
        if trimmed.is_empty() {
            return Some(Unit::Piece);
        }

        Unit::from_str(trimmed).ok()
    }

    pub fn family(self) -> UnitFamily {
        match self {
            Unit::Gram | Unit::Kilogram | Unit::Ounce | Unit::Pound => UnitFamily::Mass,
            Unit::Milliliter | Unit::Liter | Unit::Cup | Unit::Tablespoon | Unit::Teaspoon => {
                UnitFamily::Volume
            }
            Unit::Piece | Unit::Dozen => UnitFamily::Count,
        }
    }

    /// How many base units one of `self` holds
    fn base_factor(self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Kilogram => 1000.0,
            Unit::Ounce => 28.3495,
            Unit::Pound => 453.592,
            Unit::Milliliter => 1.0,
            Unit::Liter => 1000.0,
            Unit::Cup => 240.0,
            Unit::Tablespoon => 15.0,
            Unit::Teaspoon => 5.0,
            Unit::Piece => 1.0,
            Unit::Dozen => 12.0,
        }
    }
}

/// Unit Converter
///
/// Stateless service converting quantities between units of the same family.
/// Unknown units and cross-family pairs (grams to cups, pieces to liters) are
/// returned unconverted rather than treated as errors.
pub struct UnitConverter;

impl UnitConverter {
    pub fn convert(quantity: f64, from_unit: &str, to_unit: &str) -> f64 {
        if Self::same_unit(from_unit, to_unit) {
            return quantity;
        }

        match (Unit::parse(from_unit), Unit::parse(to_unit)) {
            (Some(from), Some(to)) if from.family() == to.family() => {
                quantity * from.base_factor() / to.base_factor()
            }
            _ => {
                tracing::debug!(
                    from_unit,
                    to_unit,
                    quantity,
                    "no conversion path, keeping quantity unconverted"
                );
                quantity
            }
        }
    }

    /// Whether `convert` would actually change units between `from_unit` and `to_unit`
    pub fn is_convertible(from_unit: &str, to_unit: &str) -> bool {
        if Self::same_unit(from_unit, to_unit) {
            return true;
        }

        matches!(
            (Unit::parse(from_unit), Unit::parse(to_unit)),
            (Some(from), Some(to)) if from.family() == to.family()
        )
    }

    fn same_unit(a: &str, b: &str) -> bool {
        a.trim().eq_ignore_ascii_case(b.trim())
    }
}
