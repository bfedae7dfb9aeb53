use thiserror::Error;

use crate::api::HintError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("range checker already committed")]
    AlreadyCommitted,

    #[error("bit width {0} larger than 32")]
    BitWidthTooLarge(usize),

    #[error("hint failed: {0}")]
    Hint(#[from] HintError),

    #[error(transparent)]
    Router(#[from] plexus_router::Error),
}
