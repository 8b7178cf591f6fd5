//! request header mutants
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::containers::DataContainer;
use crate::error::MutantKitError;
use crate::requests::{FuzzableRequest, RenderedRequest};

/// mutant that places its payload in the value of one request header
///
/// the targeted container is derived from the base request's ordered header
/// list (repeated names collapse into one multi-valued key); rendering
/// flattens the mutated container back into a header list. Header values are
/// sent as-is, no percent-encoding applies to this position kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeaderMutant {
    freq: FuzzableRequest,
    dc: DataContainer,
    key: String,
    index: usize,
    original_value: String,
    mod_value: String,
}

impl HeaderMutant {
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

    /// the name of the targeted header
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// which value slot of the header is targeted; relevant for repeated
    /// headers
    #[must_use]
    pub const fn element_index(&self) -> usize {
        self.index
    }

    /// the candidate replacement value
    #[must_use]
    pub fn mod_value(&self) -> &str {
        &self.mod_value
    }

    /// the pre-mutation header value; empty when the fuzzed header was not
    /// present on the base request
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

    /// render the mutant into a concrete request; the mutated container is
    /// flattened back into an ordered header list
    #[must_use]
    pub fn render(&self) -> RenderedRequest {
        let mut headers = Vec::new();

        for (key, values) in self.dc.iter() {
            for value in values {
                headers.push((key.to_string(), value.clone()));
            }
        }

        RenderedRequest::new(
            self.freq.url_with_query(self.freq.query()),
            self.freq.method().to_string(),
            headers,
            self.freq.body().map(DataContainer::to_encoded_string),
        )
    }

    /// reporting description of what was fuzzed
    #[must_use]
    pub fn found_at(&self) -> String {
        format!(
            "\"{}\", using HTTP method {}. The modified header was \"{}\", with value: \"{}\".",
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

    #[test]
    fn render_carries_the_payload_in_the_header() {
        let mut freq = FuzzableRequest::from_url("http://localhost/page").unwrap();
        freq.add_header("Referer", "http://localhost/");
        freq.add_header("Accept", "*/*");

        let dc: DataContainer = freq
            .headers()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut mutant = HeaderMutant::new(
            freq,
            dc,
            String::from("Referer"),
            0,
            String::from("http://localhost/"),
        );
        mutant.set_mod_value("<script>alert(1)</script>");

        let rendered = mutant.render();

        assert_eq!(
            rendered.headers()[0],
            (
                String::from("Referer"),
                String::from("<script>alert(1)</script>")
            )
        );
        // untargeted headers survive untouched
        assert_eq!(
            rendered.headers()[1],
            (String::from("Accept"), String::from("*/*"))
        );
    }

    #[test]
    fn header_values_are_not_percent_encoded() {
        let freq = FuzzableRequest::from_url("http://localhost/page").unwrap();
        let dc: DataContainer = [("User-Agent", "agent")].into_iter().collect();

        let mut mutant = HeaderMutant::new(
            freq,
            dc,
            String::from("User-Agent"),
            0,
            String::from("agent"),
        );
        mutant.set_mod_value("a b&c");

        assert_eq!(
            mutant.render().headers()[0].1,
            "a b&c" // raw, unlike query/body positions
        );
    }
}
