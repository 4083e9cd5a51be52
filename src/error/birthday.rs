use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BirthdayError {
    /// The date string is neither `YYYY-MM-DD` nor `MM-DD`, or names a day that does
    /// not exist.
    #[error("Invalid birthday '{0}', expected YYYY-MM-DD or MM-DD")]
    InvalidDate(String),
}
