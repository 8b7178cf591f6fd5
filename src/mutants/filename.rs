//! url file-name mutants: positional splits over the last path segment
use lazy_static::lazy_static;
use regex::Regex;
use tracing::error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::MutantKitError;
use crate::requests::encoders::{quote_plus, DEFAULT_SAFE_CHARS};
use crate::requests::{FuzzableRequest, RenderedRequest};

lazy_static! {
    static ref ALPHANUMERIC_RUN: Regex = Regex::new("[a-zA-Z0-9]+").unwrap();
}

/// split the given string into its alternating alphanumeric-run and
/// non-alphanumeric-run chunks, in order; the boolean marks the alphanumeric
/// chunks, which are the candidate injection points
pub(crate) fn alphanumeric_chunks(input: &str) -> Vec<(String, bool)> {
    let mut chunks = Vec::new();
    let mut cursor = 0;

    for run in ALPHANUMERIC_RUN.find_iter(input) {
        if run.start() > cursor {
            chunks.push((input[cursor..run.start()].to_string(), false));
        }

        chunks.push((run.as_str().to_string(), true));
        cursor = run.end();
    }

    if cursor < input.len() {
        chunks.push((input[cursor..].to_string(), false));
    }

    chunks
}

/// mutant that places its payload inside one alphanumeric run of the url's
/// file name
///
/// the file name is split into `start | modified_part | end` around the
/// targeted run; rendering percent-encodes the modified part against the
/// configured safe-character set (twice, when double encoding is enabled)
/// and re-joins the pieces onto the snapshot url. This mutant kind never
/// carries a body, and its url can only be changed through
/// [`FileNameMutant::set_mod_value`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FileNameMutant {
    freq: FuzzableRequest,
    start: String,
    modified_part: String,
    end: String,
    original_value: String,
    safe_chars: String,
    double_encoding: bool,
}

impl FileNameMutant {
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

    /// the file-name chunks before the targeted run, joined
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// the file-name chunks after the targeted run, joined
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// the candidate replacement for the targeted run, pre-encoding
    #[must_use]
    pub fn mod_value(&self) -> &str {
        &self.modified_part
    }

    /// the targeted alphanumeric run's original text
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
    /// rendering; `"/"` yields the slash-preserving variant for
    /// rewrite-aware targets
    pub fn set_safe_chars<C>(&mut self, chars: C)
    where
        C: Into<String>,
    {
        self.safe_chars = chars.into();
    }

    /// enable or disable double percent-encoding of the modified part,
    /// needed when a path-rewriting layer decodes once before the
    /// application sees the value
    pub fn set_double_encoding(&mut self, enabled: bool) {
        self.double_encoding = enabled;
    }

    /// the file name as it will appear in the rendered url:
    /// `start + encoded modified part + end`
    #[must_use]
    pub fn rendered_file_name(&self) -> String {
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
        let path = format!("{}{}", self.freq.directory_path(), self.rendered_file_name());

        RenderedRequest::new(
            self.freq.url_with_path(&path),
            self.freq.method().to_string(),
            self.freq.headers().to_vec(),
            None,
        )
    }

    /// reporting description of what was fuzzed
    #[must_use]
    pub fn found_at(&self) -> String {
        format!(
            "\"{}\", using HTTP method {}. The modified parameter was the URL filename, with value: \"{}\".",
            self.render().url(),
            self.freq.method(),
            self.modified_part
        )
    }

    /// always fails: the url of a file-name mutant is derived from its
    /// modified part
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::InvalidOperation`], unconditionally
    pub fn set_url(&mut self, url: &str) -> Result<(), MutantKitError> {
        error!(%url, "attempt to set the url of a filename mutant directly");

        Err(MutantKitError::InvalidOperation {
            message: "the url of a filename mutant is derived from its modified part; \
                      use set_mod_value instead",
        })
    }

    /// the request snapshot this mutant was derived from
    #[must_use]
    pub const fn freq(&self) -> &FuzzableRequest {
        &self.freq
    }
}
