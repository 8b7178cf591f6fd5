//! concrete, sendable request state produced by rendering a mutant
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// the concrete request a [`Mutant`] renders to: final url, method, headers,
/// and optional form-encoded body
///
/// a `RenderedRequest` is a plain owned value with no ties to the mutant that
/// produced it; it is what gets handed to the http-sending layer and what
/// reporting code diffs against the base request.
///
/// [`Mutant`]: crate::mutants::Mutant
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderedRequest {
    url: String,
    method: String,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RenderedRequest {
    pub(crate) fn new(
        url: String,
        method: String,
        headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> Self {
        Self {
            url,
            method,
            headers,
            body,
        }
    }

    /// the fully serialized url, with the mutation applied
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// the http method
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// the ordered request headers
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// the form-encoded request body, if the request carries one
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

impl Display for RenderedRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.method, self.url)
    }
}
