/// Domain-level errors raised outside the service envelope path.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The request carries no usable session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
