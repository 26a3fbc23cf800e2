pub type ReelResult<T> = Result<T, ReelError>;

/// Every failure the pipeline can surface.
///
/// None of these are retried: the render loop propagates the first one and the binary turns it
/// into a non-zero exit. Encoder backpressure is not represented here, see
/// [`crate::encode::codec::Receive`] and [`crate::encode::codec::SendStatus`].
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("setup error: {0}")]
    Setup(String),

    #[error("encoder error: {0}")]
    Encoder(String),

    #[error("container error: {0}")]
    Container(String),

    #[error("state error: {0}")]
    State(String),

    #[error("script error: {0}")]
    Script(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn setup(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    pub fn encoder(msg: impl Into<String>) -> Self {
        Self::Encoder(msg.into())
    }

    pub fn container(msg: impl Into<String>) -> Self {
        Self::Container(msg.into())
    }

    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }

    /// `true` for state-machine violations (double flush, write after trailer, ...).
    pub fn is_state_violation(&self) -> bool {
        matches!(self, Self::State(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
