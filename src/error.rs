//! Defines the app level error type and its conversion to HTTP responses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::category::CategoryId;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// The specified category name already exists in the database.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The category ID used to create a transaction did not match a valid category.
    #[error("the category ID {0} does not refer to a valid category")]
    InvalidCategory(CategoryId),

    /// An empty string was used as the title of a blog post.
    #[error("Post title cannot be empty")]
    EmptyPostTitle,

    /// Tried to comment on a post that does not exist.
    #[error("Post not found")]
    PostNotFound,

    /// Tried to update a post that does not exist
    #[error("tried to update a post that is not in the database")]
    UpdateMissingPost,

    /// Tried to delete a post that does not exist
    #[error("tried to delete a post that is not in the database")]
    DeleteMissingPost,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::PostNotFound => {
                (StatusCode::NOT_FOUND, self.to_string()).into_response()
            }
            Error::UpdateMissingPost | Error::DeleteMissingPost => {
                (StatusCode::NOT_FOUND, "Post not found".to_owned()).into_response()
            }
            Error::EmptyCategoryName | Error::EmptyPostTitle | Error::InvalidCategory(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            Error::DuplicateCategoryName(_) => {
                (StatusCode::CONFLICT, self.to_string()).into_response()
            }
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sorry, something went wrong. Try again later or check the server logs.",
                )
                    .into_response()
            }
        }
    }
}
