//! url path-segment mutants: positional splits over the url path
use tracing::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MutantKitError;
use crate::requests::encoders::{quote_plus, DEFAULT_SAFE_CHARS};
use crate::requests::{FuzzableRequest, RenderedRequest};

/// mutant that places its payload in one `/`-separated segment of the url
/// path
///
/// the whole path is split into `start | modified_part | end` around the
/// targeted segment (`start` keeps its trailing separator, `end` its leading
/// one); rendering encodes the modified part exactly like the file-name
/// mutant does. Like that mutant, this kind never carries a body and its url
/// can only be changed through [`UrlPartsMutant::set_mod_value`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UrlPartsMutant {
    freq: FuzzableRequest,
    start: String,
    modified_part: String,
    end: String,
    original_value: String,
    safe_chars: String,
    double_encoding: bool,
}

impl UrlPartsMutant {
    pub(crate) fn new(
        freq: FuzzableRequest,
        start: String,
        end: String,
        original_value: String,
    ) -> Self {
        Self {
            freq,
            start,
            modified_part: String::new(),
            end,
            original_value,
            safe_chars: DEFAULT_SAFE_CHARS.to_string(),
            double_encoding: false,
        }
    }

    /// the path up to the targeted segment, trailing separator included
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// the path after the targeted segment, leading separator included;
    /// empty when the last segment is targeted
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// the candidate replacement for the targeted segment, pre-encoding
    #[must_use]
    pub fn mod_value(&self) -> &str {
        &self.modified_part
    }

    /// the targeted path segment's original text
    #[must_use]
    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    /// replace the candidate value carried in the modified part
    pub fn set_mod_value<V>(&mut self, value: V)
    where
        V: Into<String>,
    {
        self.modified_part = value.into();
    }

    /// set which characters are exempt from percent-encoding during
    /// rendering
    pub fn set_safe_chars<C>(&mut self, chars: C)
    where
        C: Into<String>,
    {
        self.safe_chars = chars.into();
    }

    /// enable or disable double percent-encoding of the modified part
    pub fn set_double_encoding(&mut self, enabled: bool) {
        self.double_encoding = enabled;
    }

    /// the path as it will appear in the rendered url:
    /// `start + encoded modified part + end`
    #[must_use]
    pub fn rendered_path(&self) -> String {
        let mut encoded = quote_plus(&self.modified_part, &self.safe_chars);

        if self.double_encoding {
            encoded = quote_plus(&encoded, &self.safe_chars);
        }

        format!("{}{}{}", self.start, encoded, self.end)
    }

    /// render the mutant into a concrete request; the body is always absent
    /// for this mutant kind
    #[must_use]
    pub fn render(&self) -> RenderedRequest {
        RenderedRequest::new(
            self.freq.url_with_path(&self.rendered_path()),
            self.freq.method().to_string(),
            self.freq.headers().to_vec(),
            None,
        )
    }

    /// reporting description of what was fuzzed
    #[must_use]
    pub fn found_at(&self) -> String {
        format!(
            "\"{}\", using HTTP method {}. The modified parameter was the URL path, with value: \"{}\".",
            self.render().url(),
            self.freq.method(),
            self.modified_part
        )
    }

    /// always fails: the url of a path-segment mutant is derived from its
    /// modified part
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::InvalidOperation`], unconditionally
    pub fn set_url(&mut self, url: &str) -> Result<(), MutantKitError> {
        error!(%url, "attempt to set the url of a url-parts mutant directly");

        Err(MutantKitError::InvalidOperation {
            message: "the url of a url-parts mutant is derived from its modified part; \
                      use set_mod_value instead",
        })
    }

    /// the request snapshot this mutant was derived from
    #[must_use]
    pub const fn freq(&self) -> &FuzzableRequest {
        &self.freq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_mutant(url: &str, start: &str, end: &str, segment: &str) -> UrlPartsMutant {
        let freq = FuzzableRequest::from_url(url).unwrap();

        UrlPartsMutant::new(
            freq,
            start.to_string(),
            end.to_string(),
            segment.to_string(),
        )
    }

    #[test]
    fn render_substitutes_the_targeted_segment() {
        let mut mutant = segment_mutant("http://localhost/app/users/list", "/app/", "/list", "users");

        mutant.set_mod_value("' OR 1=1");

        assert_eq!(
            mutant.render().url(),
            "http://localhost/app/%27+OR+1%3D1/list"
        );
    }

    #[test]
    fn split_reconstructs_the_original_path() {
        let mutant = segment_mutant("http://localhost/app/users/list", "/app/", "/list", "users");

        let rejoined = format!("{}{}{}", mutant.start(), mutant.original_value(), mutant.end());

        assert_eq!(rejoined, "/app/users/list");
    }

    #[test]
    fn double_encoding_applies_a_second_pass() {
        let mut mutant = segment_mutant("http://localhost/app/users", "/app/", "", "users");

        mutant.set_mod_value("a'b");
        assert_eq!(mutant.rendered_path(), "/app/a%27b");

        mutant.set_double_encoding(true);
        assert_eq!(mutant.rendered_path(), "/app/a%2527b");
    }

    #[test]
    fn setting_the_url_directly_is_rejected() {
        let mut mutant = segment_mutant("http://localhost/app/users", "/app/", "", "users");

        assert!(matches!(
            mutant.set_url("http://localhost/other"),
            Err(MutantKitError::InvalidOperation { .. })
        ));
    }
}
