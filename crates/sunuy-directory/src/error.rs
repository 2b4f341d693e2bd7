use sunuy_core::forms::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The search backend failed; the previous results are kept.
    #[error("search backend error: {0}")]
    Backend(String),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    /// Market proposals are only accepted from signed-in visitors.
    #[error("sign in to propose a market")]
    LoginRequired,

    #[error("artisan not found: {0}")]
    UnknownArtisan(String),
}
