//! query string parameter mutants
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::containers::DataContainer;
use crate::error::MutantKitError;
use crate::requests::{FuzzableRequest, RenderedRequest};

/// mutant that places its payload in one value slot of one query string
/// parameter
///
/// the targeted container is a deep copy of the base request's query
/// container; rendering re-serializes the copy onto the snapshot url while
/// headers and body pass through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QueryStringMutant {
    freq: FuzzableRequest,
    dc: DataContainer,
    key: String,
    index: usize,
    original_value: String,
    mod_value: String,
}

impl QueryStringMutant {
    pub(crate) const fn new(
        freq: FuzzableRequest,
        dc: DataContainer,
        key: String,
        index: usize,
        original_value: String,
    ) -> Self {
        Self {
            freq,
            dc,
            key,
            index,
            original_value,
            mod_value: String::new(),
        }
    }

    /// the name of the targeted query string parameter
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// which value slot of the parameter is targeted; relevant for repeated
    /// parameters like `id=1&id=2`
    #[must_use]
    pub const fn element_index(&self) -> usize {
        self.index
    }

    /// the candidate replacement value
    #[must_use]
    pub fn mod_value(&self) -> &str {
        &self.mod_value
    }

    /// the pre-mutation value of the targeted slot
    #[must_use]
    pub fn original_value(&self) -> &str {
        &self.original_value
    }

    /// the targeted container, with the mutation applied
    #[must_use]
    pub const fn container(&self) -> &DataContainer {
        &self.dc
    }

    /// replace the candidate value; the targeted slot of the container is
    /// updated in the same step
    pub fn set_mod_value<V>(&mut self, value: V)
    where
        V: Into<String>,
    {
        self.mod_value = value.into();

        if let Some(values) = self.dc.get_mut(&self.key) {
            if let Some(slot) = values.get_mut(self.index) {
                slot.clone_from(&self.mod_value);
            }
        }
    }

    /// render the mutant into a concrete request
    #[must_use]
    pub fn render(&self) -> RenderedRequest {
        RenderedRequest::new(
            self.freq.url_with_query(&self.dc),
            self.freq.method().to_string(),
            self.freq.headers().to_vec(),
            self.freq.body().map(DataContainer::to_encoded_string),
        )
    }

    /// reporting description of what was fuzzed
    #[must_use]
    pub fn found_at(&self) -> String {
        format!(
            "\"{}\", using HTTP method {}. The modified parameter was \"{}\", with value: \"{}\".",
            self.render().url(),
            self.freq.method(),
            self.key,
            self.mod_value
        )
    }

    /// replace the base url of the snapshot
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::InvalidUrl`] when the url cannot be parsed
    pub fn set_url(&mut self, url: &str) -> Result<(), MutantKitError> {
        self.freq.set_url(url)
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

    fn mutant_for(url: &str, key: &str) -> QueryStringMutant {
        let freq = FuzzableRequest::from_url(url).unwrap();
        let dc = freq.query().clone();
        let original = dc.get(key).unwrap()[0].clone();

        QueryStringMutant::new(freq, dc, key.to_string(), 0, original)
    }

    #[test]
    fn render_carries_the_payload_in_the_query_string() {
        let mut mutant = mutant_for("http://localhost/x.php?id=1&name=a", "id");

        mutant.set_mod_value("' OR 1=1");

        assert_eq!(
            mutant.render().url(),
            "http://localhost/x.php?id=%27+OR+1%3D1&name=a"
        );
    }

    #[test]
    fn render_leaves_untargeted_parameters_alone() {
        let mut mutant = mutant_for("http://localhost/x.php?id=1&name=a", "name");

        mutant.set_mod_value("payload");

        assert_eq!(
            mutant.render().url(),
            "http://localhost/x.php?id=1&name=payload"
        );
        assert_eq!(mutant.original_value(), "a");
    }

    #[test]
    fn set_url_is_allowed_on_query_mutants() {
        let mut mutant = mutant_for("http://localhost/x.php?id=1", "id");

        mutant.set_url("http://localhost/y.php").unwrap();
        mutant.set_mod_value("2");

        assert_eq!(mutant.render().url(), "http://localhost/y.php?id=2");
    }
}
