pub mod categorize;
pub mod convert;
pub mod generate;
