//! mutant kinds and the operations shared across them; a mutant is one
//! payload placed at exactly one injectable position of a base request
//!
//! the five kinds form a closed set: query string, post data, header, url
//! filename, and url parts. Each kind owns its position-specific state and
//! rendering logic; the [`Mutant`] enum dispatches the shared contract over
//! them.
mod factory;
mod filename;
mod headers;
mod postdata;
mod query;
mod urlparts;

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use self::factory::{create_mutants, FuzzerConfig};
pub use self::filename::FileNameMutant;
pub use self::headers::HeaderMutant;
pub use self::postdata::PostDataMutant;
pub use self::query::QueryStringMutant;
pub use self::urlparts::UrlPartsMutant;

use crate::error::MutantKitError;
use crate::requests::{FuzzableRequest, RenderedRequest};

/// the position kinds a mutant can target
///
/// doubles as the eligible-position selector passed to [`create_mutants`]
/// and as the stable reporting tag attached to every produced mutant
#[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum MutantType {
    /// a parameter of the url's query string
    QueryString,

    /// a parameter of the form-encoded request body
    PostData,

    /// a request header value
    Header,

    /// an alphanumeric run inside the url's file name
    FileName,

    /// a segment of the url's path
    UrlParts,
}

impl MutantType {
    /// the stable string tag used by reporting code downstream
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::QueryString => "query string parameter",
            Self::PostData => "post data parameter",
            Self::Header => "header",
            Self::FileName => "url filename",
            Self::UrlParts => "url parts",
        }
    }
}

impl Display for MutantType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// one concrete mutant: a deep-copied request snapshot carrying a single
/// payload at a single injectable position
///
/// every variant is a fully independent value after construction; cloning a
/// mutant, or mutating one, never affects its siblings or the base request.
/// Rendering is pure and repeatable: two [`Mutant::render`] calls with no
/// intervening [`Mutant::set_mod_value`] produce identical output.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum Mutant {
    /// mutant targeting a query string parameter
    QueryString(QueryStringMutant),

    /// mutant targeting a form-encoded body parameter
    PostData(PostDataMutant),

    /// mutant targeting a request header value
    Header(HeaderMutant),

    /// mutant targeting an alphanumeric run of the url's file name
    FileName(FileNameMutant),

    /// mutant targeting a segment of the url's path
    UrlParts(UrlPartsMutant),
}

impl Mutant {
    /// which position kind this mutant targets
    #[must_use]
    pub const fn mutant_type(&self) -> MutantType {
        match self {
            Self::QueryString(_) => MutantType::QueryString,
            Self::PostData(_) => MutantType::PostData,
            Self::Header(_) => MutantType::Header,
            Self::FileName(_) => MutantType::FileName,
            Self::UrlParts(_) => MutantType::UrlParts,
        }
    }

    /// render the mutant into a concrete, sendable request
    #[must_use]
    pub fn render(&self) -> RenderedRequest {
        match self {
            Self::QueryString(mutant) => mutant.render(),
            Self::PostData(mutant) => mutant.render(),
            Self::Header(mutant) => mutant.render(),
            Self::FileName(mutant) => mutant.render(),
            Self::UrlParts(mutant) => mutant.render(),
        }
    }

    /// replace the candidate value carried at the targeted position
    pub fn set_mod_value<V>(&mut self, value: V)
    where
        V: Into<String>,
    {
        match self {
            Self::QueryString(mutant) => mutant.set_mod_value(value),
            Self::PostData(mutant) => mutant.set_mod_value(value),
            Self::Header(mutant) => mutant.set_mod_value(value),
            Self::FileName(mutant) => mutant.set_mod_value(value),
            Self::UrlParts(mutant) => mutant.set_mod_value(value),
        }
    }

    /// the candidate value currently carried at the targeted position
    #[must_use]
    pub fn mod_value(&self) -> &str {
        match self {
            Self::QueryString(mutant) => mutant.mod_value(),
            Self::PostData(mutant) => mutant.mod_value(),
            Self::Header(mutant) => mutant.mod_value(),
            Self::FileName(mutant) => mutant.mod_value(),
            Self::UrlParts(mutant) => mutant.mod_value(),
        }
    }

    /// the pre-mutation value at the targeted position
    #[must_use]
    pub fn original_value(&self) -> &str {
        match self {
            Self::QueryString(mutant) => mutant.original_value(),
            Self::PostData(mutant) => mutant.original_value(),
            Self::Header(mutant) => mutant.original_value(),
            Self::FileName(mutant) => mutant.original_value(),
            Self::UrlParts(mutant) => mutant.original_value(),
        }
    }

    /// the name of the targeted parameter, for the kinds that target a
    /// keyed container; positional kinds return `None`
    #[must_use]
    pub fn fuzzed_parameter(&self) -> Option<&str> {
        match self {
            Self::QueryString(mutant) => Some(mutant.key()),
            Self::PostData(mutant) => Some(mutant.key()),
            Self::Header(mutant) => Some(mutant.key()),
            Self::FileName(_) | Self::UrlParts(_) => None,
        }
    }

    /// human-readable description of what was fuzzed, with what value, on
    /// what request; for reporting, never fails
    #[must_use]
    pub fn found_at(&self) -> String {
        match self {
            Self::QueryString(mutant) => mutant.found_at(),
            Self::PostData(mutant) => mutant.found_at(),
            Self::Header(mutant) => mutant.found_at(),
            Self::FileName(mutant) => mutant.found_at(),
            Self::UrlParts(mutant) => mutant.found_at(),
        }
    }

    /// replace the base url of the snapshot this mutant renders from
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::InvalidOperation`] on the url-positional
    /// kinds (filename, url parts), whose url is derived from the modified
    /// part and must be changed through [`Mutant::set_mod_value`]
    pub fn set_url(&mut self, url: &str) -> Result<(), MutantKitError> {
        match self {
            Self::QueryString(mutant) => mutant.set_url(url),
            Self::PostData(mutant) => mutant.set_url(url),
            Self::Header(mutant) => mutant.set_url(url),
            Self::FileName(mutant) => mutant.set_url(url),
            Self::UrlParts(mutant) => mutant.set_url(url),
        }
    }

    /// the request snapshot this mutant was derived from
    #[must_use]
    pub const fn freq(&self) -> &FuzzableRequest {
        match self {
            Self::QueryString(mutant) => mutant.freq(),
            Self::PostData(mutant) => mutant.freq(),
            Self::Header(mutant) => mutant.freq(),
            Self::FileName(mutant) => mutant.freq(),
            Self::UrlParts(mutant) => mutant.freq(),
        }
    }
}

impl Display for Mutant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::QueryString(mutant) => write!(
                f,
                "The sent {} is: \"{}={}\".",
                self.mutant_type(),
                mutant.key(),
                mutant.mod_value()
            ),
            Self::PostData(mutant) => write!(
                f,
                "The sent {} is: \"{}={}\".",
                self.mutant_type(),
                mutant.key(),
                mutant.mod_value()
            ),
            Self::Header(mutant) => write!(
                f,
                "The sent {} is: \"{}: {}\".",
                self.mutant_type(),
                mutant.key(),
                mutant.mod_value()
            ),
            Self::FileName(mutant) => write!(
                f,
                "The sent {} is: \"{}{}{}\".",
                self.mutant_type(),
                mutant.start(),
                mutant.mod_value(),
                mutant.end()
            ),
            Self::UrlParts(mutant) => write!(
                f,
                "The sent {} is: \"{}{}{}\".",
                self.mutant_type(),
                mutant.start(),
                mutant.mod_value(),
                mutant.end()
            ),
        }
    }
}
