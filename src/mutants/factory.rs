//! turns one base request, a payload list, and a set of eligible positions
//! into the full collection of mutants
use tracing::{error, instrument, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::filename::alphanumeric_chunks;
use super::{
    FileNameMutant, HeaderMutant, Mutant, MutantType, PostDataMutant, QueryStringMutant,
    UrlPartsMutant,
};
use crate::containers::DataContainer;
use crate::error::MutantKitError;
use crate::requests::encoders::SLASH_SAFE_CHARS;
use crate::requests::FuzzableRequest;

/// options consumed by [`create_mutants`]; validated once per factory call
///
/// # Examples
///
/// ```
/// # use mutantkit::mutants::FuzzerConfig;
/// let config = FuzzerConfig::new()
///     .fuzz_url_filenames(true)
///     .fuzzable_header("Referer")
///     .fuzzable_header("User-Agent");
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FuzzerConfig {
    fuzz_url_filenames: bool,
    fuzz_url_parts: bool,
    fuzzable_headers: Vec<String>,
    safe_chars: String,
    double_encoding: bool,
}

impl FuzzerConfig {
    /// create a new `FuzzerConfig` with every optional position kind
    /// disabled: no filename fuzzing, no path-segment fuzzing, no fuzzable
    /// headers, default safe set, single encoding
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// enable or disable fuzzing of the url's file name
    #[must_use]
    pub const fn fuzz_url_filenames(mut self, enabled: bool) -> Self {
        self.fuzz_url_filenames = enabled;
        self
    }

    /// enable or disable fuzzing of the url's path segments
    #[must_use]
    pub const fn fuzz_url_parts(mut self, enabled: bool) -> Self {
        self.fuzz_url_parts = enabled;
        self
    }

    /// add a header name to fuzz; header mutants are produced only for the
    /// names listed here. A listed header missing from the request is added
    /// to it, with an empty original value
    #[must_use]
    pub fn fuzzable_header<H>(mut self, header: H) -> Self
    where
        H: Into<String>,
    {
        self.fuzzable_headers.push(header.into());
        self
    }

    /// set the characters exempt from percent-encoding on the url-positional
    /// mutant kinds; must be ascii
    #[must_use]
    pub fn safe_chars<C>(mut self, chars: C) -> Self
    where
        C: Into<String>,
    {
        self.safe_chars = chars.into();
        self
    }

    /// force double percent-encoding on the url-positional mutant kinds
    #[must_use]
    pub const fn double_encoding(mut self, enabled: bool) -> Self {
        self.double_encoding = enabled;
        self
    }
}

/// enumerate every (eligible position x payload) combination of the given
/// request into a list of independent [`Mutant`]s
///
/// position kinds the request does not support (a body-less request asked
/// for post-data mutants, a body-carrying request asked for filename
/// mutants) contribute zero mutants; that is routine, not an error. The
/// result is deterministic: positions in caller order, then container key
/// order, then value-slot order, then payload order, then the encoding
/// sibling.
///
/// # Examples
///
/// ```
/// # use mutantkit::prelude::*;
/// # fn main() -> Result<(), MutantKitError> {
/// let freq = FuzzableRequest::from_url("http://localhost/report2.php?id=1")?;
/// let payloads = vec![String::from("' OR 1=1")];
/// let config = FuzzerConfig::new().fuzz_url_filenames(true);
///
/// let mutants = create_mutants(
///     &freq,
///     &payloads,
///     &[MutantType::QueryString, MutantType::FileName],
///     false,
///     &config,
/// )?;
///
/// // one query mutant ("id") plus two filename mutants ("report2", "php")
/// assert_eq!(mutants.len(), 3);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// returns [`MutantKitError::InvalidParameter`] when the config carries a
/// non-ascii safe-character set
#[instrument(skip_all, level = "trace")]
pub fn create_mutants(
    freq: &FuzzableRequest,
    payloads: &[String],
    eligible_positions: &[MutantType],
    append: bool,
    config: &FuzzerConfig,
) -> Result<Vec<Mutant>, MutantKitError> {
    if !config.safe_chars.is_ascii() {
        error!(safe_chars = %config.safe_chars, "safe characters must be ascii");

        return Err(MutantKitError::InvalidParameter {
            param: config.safe_chars.clone(),
            message: "the safe-character set must be ascii",
        });
    }

    let mut mutants = Vec::new();

    for position in eligible_positions {
        match position {
            MutantType::QueryString => {
                mutants.extend(query_string_mutants(freq, payloads, append));
            }
            MutantType::PostData => {
                mutants.extend(post_data_mutants(freq, payloads, append));
            }
            MutantType::Header => {
                mutants.extend(header_mutants(freq, payloads, append, config));
            }
            MutantType::FileName => {
                mutants.extend(file_name_mutants(freq, payloads, append, config));
            }
            MutantType::UrlParts => {
                mutants.extend(url_parts_mutants(freq, payloads, append, config));
            }
        }
    }

    trace!(count = mutants.len(), "mutant enumeration complete");

    Ok(mutants)
}

/// the value placed at the targeted position: the payload alone, or appended
/// to the original value
fn applied_value(original: &str, payload: &str, append: bool) -> String {
    if append {
        format!("{original}{payload}")
    } else {
        payload.to_string()
    }
}

fn query_string_mutants(
    freq: &FuzzableRequest,
    payloads: &[String],
    append: bool,
) -> Vec<Mutant> {
    let mut mutants = Vec::new();

    for (key, values) in freq.query().iter() {
        for (index, original) in values.iter().enumerate() {
            for payload in payloads {
                let mut mutant = QueryStringMutant::new(
                    freq.clone(),
                    freq.query().clone(),
                    key.to_string(),
                    index,
                    original.clone(),
                );
                mutant.set_mod_value(applied_value(original, payload, append));

                mutants.push(Mutant::QueryString(mutant));
            }
        }
    }

    mutants
}

fn post_data_mutants(freq: &FuzzableRequest, payloads: &[String], append: bool) -> Vec<Mutant> {
    let body = match freq.body() {
        Some(body) => body,
        None => {
            trace!("request has no body container, skipping post-data mutants");
            return Vec::new();
        }
    };

    let mut mutants = Vec::new();

    for (key, values) in body.iter() {
        for (index, original) in values.iter().enumerate() {
            for payload in payloads {
                let mut mutant = PostDataMutant::new(
                    freq.clone(),
                    body.clone(),
                    key.to_string(),
                    index,
                    original.clone(),
                );
                mutant.set_mod_value(applied_value(original, payload, append));

                mutants.push(Mutant::PostData(mutant));
            }
        }
    }

    mutants
}

fn header_mutants(
    freq: &FuzzableRequest,
    payloads: &[String],
    append: bool,
    config: &FuzzerConfig,
) -> Vec<Mutant> {
    if config.fuzzable_headers.is_empty() {
        trace!("no fuzzable headers configured, skipping header mutants");
        return Vec::new();
    }

    let base: DataContainer = freq
        .headers()
        .iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    let mut mutants = Vec::new();

    for name in &config.fuzzable_headers {
        let mut dc = base.clone();

        if !dc.contains_key(name) {
            // a configured header missing from the request is still fuzzed,
            // starting from an empty value
            dc.set(name.clone(), "");
        }

        let originals = dc.get(name).map(<[String]>::to_vec).unwrap_or_default();

        for (index, original) in originals.iter().enumerate() {
            for payload in payloads {
                let mut mutant = HeaderMutant::new(
                    freq.clone(),
                    dc.clone(),
                    name.clone(),
                    index,
                    original.clone(),
                );
                mutant.set_mod_value(applied_value(original, payload, append));

                mutants.push(Mutant::Header(mutant));
            }
        }
    }

    mutants
}

fn file_name_mutants(
    freq: &FuzzableRequest,
    payloads: &[String],
    append: bool,
    config: &FuzzerConfig,
) -> Vec<Mutant> {
    if !config.fuzz_url_filenames {
        trace!("url filename fuzzing is disabled, skipping filename mutants");
        return Vec::new();
    }

    if !freq.supports_url_fuzzing() {
        trace!("request shape does not support url fuzzing, skipping filename mutants");
        return Vec::new();
    }

    let chunks = alphanumeric_chunks(freq.file_name());
    let mut mutants = Vec::new();

    for (index, (chunk, is_alphanumeric)) in chunks.iter().enumerate() {
        if !*is_alphanumeric {
            continue;
        }

        let start: String = chunks[..index]
            .iter()
            .map(|(text, _)| text.as_str())
            .collect();
        let end: String = chunks[index + 1..]
            .iter()
            .map(|(text, _)| text.as_str())
            .collect();

        for payload in payloads {
            let mut mutant =
                FileNameMutant::new(freq.clone(), start.clone(), end.clone(), chunk.clone());
            mutant.set_mod_value(applied_value(chunk, payload, append));
            mutant.set_safe_chars(config.safe_chars.clone());
            mutant.set_double_encoding(config.double_encoding);

            // rewrite-aware sibling: same payload, slash-preserving safe set
            let mut sibling = mutant.clone();
            sibling.set_safe_chars(SLASH_SAFE_CHARS);

            if sibling.render().url() == mutant.render().url() {
                trace!("sibling encoding renders identically, dropping the duplicate");
                mutants.push(Mutant::FileName(mutant));
            } else {
                mutants.push(Mutant::FileName(mutant));
                mutants.push(Mutant::FileName(sibling));
            }
        }
    }

    mutants
}

fn url_parts_mutants(
    freq: &FuzzableRequest,
    payloads: &[String],
    append: bool,
    config: &FuzzerConfig,
) -> Vec<Mutant> {
    if !config.fuzz_url_parts {
        trace!("url path-segment fuzzing is disabled, skipping url-parts mutants");
        return Vec::new();
    }

    if !freq.supports_url_fuzzing() {
        trace!("request shape does not support url fuzzing, skipping url-parts mutants");
        return Vec::new();
    }

    let path = freq.url().path().to_string();
    let segments: Vec<&str> = path.split('/').collect();
    let mut mutants = Vec::new();

    for (index, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }

        let mut start = segments[..index].join("/");
        start.push('/');

        let end = if index + 1 < segments.len() {
            format!("/{}", segments[index + 1..].join("/"))
        } else {
            String::new()
        };

        for payload in payloads {
            let mut mutant = UrlPartsMutant::new(
                freq.clone(),
                start.clone(),
                end.clone(),
                (*segment).to_string(),
            );
            mutant.set_mod_value(applied_value(segment, payload, append));
            mutant.set_safe_chars(config.safe_chars.clone());
            mutant.set_double_encoding(config.double_encoding);

            // rewrite-aware sibling: same payload, double-encoded
            let mut sibling = mutant.clone();
            sibling.set_double_encoding(true);

            if sibling.render().url() == mutant.render().url() {
                trace!("sibling encoding renders identically, dropping the duplicate");
                mutants.push(Mutant::UrlParts(mutant));
            } else {
                mutants.push(Mutant::UrlParts(mutant));
                mutants.push(Mutant::UrlParts(sibling));
            }
        }
    }

    mutants
}
