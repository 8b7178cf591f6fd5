//! Custom error-type definitions
use thiserror::Error;
use url::ParseError;

/// primary error-type for the mutantkit library
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MutantKitError {
    /// Represents a failure to parse the given string into a [`url::Url`](https://docs.rs/url/latest/url/struct.Url.html).
    #[error("The url `{url}` is invalid and couldn't be parsed.")]
    InvalidUrl {
        /// underlying source error-type
        source: ParseError,

        /// the url that couldn't be parsed
        url: String,
    },

    /// Represents a lookup of a key that does not exist in a [`DataContainer`]
    ///
    /// [`DataContainer`]: crate::containers::DataContainer
    #[error("The key `{key}` could not be found in the DataContainer")]
    KeyNotFound {
        /// the key that couldn't be found
        key: String,
    },

    /// Represents an attempt to mutate a field that is derived, not directly
    /// settable (e.g. the URL of a filename mutant, which is computed from its
    /// modified part)
    #[error("Invalid operation on this mutant: {message}")]
    InvalidOperation {
        /// the associated message to help the user
        message: &'static str,
    },

    /// Represents an invalid parameter passed to some function or constructor
    #[error("Invalid parameter provided, {message}: {param}")]
    InvalidParameter {
        /// the failing parameter
        param: String,

        /// the associated message to help the user
        message: &'static str,
    },
}
