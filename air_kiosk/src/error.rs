use thiserror::Error;

#[derive(Debug, Error)]
pub enum KioskError {
    #[error("failed to open window: {0}")]
    Window(String),

    /// A target key that names no board action.
    #[error("unknown action `{0}`")]
    UnknownAction(String),
}
