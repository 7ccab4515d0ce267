use thiserror::Error;

/// Client-side validation failures. These block the action locally and never
/// result in a network call; the display strings are shown to the user
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select both start and end times")]
    MissingTimeRange,
    #[error("End time must be after start time")]
    EmptyTimeRange,
    #[error("Please enter your name")]
    MissingName,
}
