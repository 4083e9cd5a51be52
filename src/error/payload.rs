use thiserror::Error;

/// Errors raised while parsing a button component's custom ID.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PayloadError {
    /// The payload does not have the expected `{action}-{entity}-{index}` shape.
    #[error("Malformed button payload '{0}'")]
    Malformed(String),

    /// The leading action token is not one the bot ever emits.
    #[error("Unknown button action '{0}'")]
    UnknownAction(String),
}
