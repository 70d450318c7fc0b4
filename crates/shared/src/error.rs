#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("invalid quantity for '{name}': {quantity}")]
    InvalidQuantity { name: String, quantity: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
