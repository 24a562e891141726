//! `Result` shortcuts for handler code.

use std::fmt::Display;

use salvo::prelude::StatusError;
use tracing::error;

pub(crate) trait ResultExt<T> {
    /// Log the error under `context` and answer 500 without exposing it.
    fn or_500(self, context: &'static str) -> Result<T, StatusError>;

    /// Answer 400 with the error's own message as the brief.
    fn or_400(self) -> Result<T, StatusError>;
}

impl<T, E: Display> ResultExt<T> for Result<T, E> {
    fn or_500(self, context: &'static str) -> Result<T, StatusError> {
        self.map_err(|error| {
            error!(context, %error, "request failed");

            StatusError::internal_server_error()
        })
    }

    fn or_400(self) -> Result<T, StatusError> {
        self.map_err(|error| StatusError::bad_request().brief(error.to_string()))
    }
}
