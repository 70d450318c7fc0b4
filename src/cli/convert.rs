use pantry_shopping::{Unit, UnitConverter};

/// One-line description of a conversion, noting when units don't convert
pub fn convert(quantity: f64, from_unit: &str, to_unit: &str) -> String {
    let converted = UnitConverter::convert(quantity, from_unit, to_unit);
    let to_label = Unit::parse(to_unit)
        .map(|u| u.to_string())
        .unwrap_or_else(|| to_unit.trim().to_string());

    if UnitConverter::is_convertible(from_unit, to_unit) {
        format!("{quantity} {from_unit} = {} {to_label}", round(converted))
    } else {
        tracing::warn!(from_unit, to_unit, "No conversion between units");
        format!("{quantity} {from_unit} has no conversion to {to_label}, keeping {quantity}")
    }
}

fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
