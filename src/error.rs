use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriveError {
    /// SDL hands back plain strings for almost every failure.
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("font error: {0}")]
    Font(String),
}

impl From<String> for DriveError {
    fn from(message: String) -> Self {
        DriveError::Sdl(message)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("window dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("fps must be between 1 and 240 (got {0})")]
    FpsOutOfRange(u32),
}
