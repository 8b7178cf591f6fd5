//! form-encoded body parameter mutants
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::containers::DataContainer;
use crate::error::MutantKitError;
use crate::requests::{FuzzableRequest, RenderedRequest};

/// mutant that places its payload in one value slot of one form-encoded body
/// parameter
///
/// the targeted container is a deep copy of the base request's body
/// container; rendering serializes the copy as the request body while the
/// url and headers pass through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PostDataMutant {
    freq: FuzzableRequest,
    dc: DataContainer,
    key: String,
    index: usize,
    original_value: String,
    mod_value: String,
}

impl PostDataMutant {
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

    /// the name of the targeted body parameter
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// which value slot of the parameter is targeted
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

    /// render the mutant into a concrete request; the mutated container
    /// becomes the form-encoded body
    #[must_use]
    pub fn render(&self) -> RenderedRequest {
        RenderedRequest::new(
            self.freq.url_with_query(self.freq.query()),
            self.freq.method().to_string(),
            self.freq.headers().to_vec(),
            Some(self.dc.to_encoded_string()),
        )
    }

    /// reporting description of what was fuzzed
    #[must_use]
    pub fn found_at(&self) -> String {
        format!(
            "\"{}\", using HTTP method {}. The sent post-data was: \"{}\". The modified parameter was \"{}\".",
            self.render().url(),
            self.freq.method(),
            self.dc.to_encoded_string(),
            self.key
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

    fn form_request() -> FuzzableRequest {
        let mut freq = FuzzableRequest::from_url("http://localhost/login").unwrap();
        freq.set_method("POST");
        freq.set_body(DataContainer::from_query_string("user=admin&password=secret"));
        freq
    }

    #[test]
    fn render_carries_the_payload_in_the_body() {
        let freq = form_request();
        let dc = freq.body().unwrap().clone();

        let mut mutant = PostDataMutant::new(
            freq,
            dc,
            String::from("password"),
            0,
            String::from("secret"),
        );
        mutant.set_mod_value("' OR 1=1");

        let rendered = mutant.render();

        assert_eq!(rendered.url(), "http://localhost/login");
        assert_eq!(rendered.method(), "POST");
        assert_eq!(rendered.body(), Some("user=admin&password=%27+OR+1%3D1"));
    }

    #[test]
    fn render_does_not_touch_the_base_request_body() {
        let freq = form_request();
        let dc = freq.body().unwrap().clone();

        let mut mutant =
            PostDataMutant::new(freq, dc, String::from("user"), 0, String::from("admin"));
        mutant.set_mod_value("payload");

        let _rendered = mutant.render();

        assert_eq!(
            mutant.freq().body().unwrap().get("user").unwrap()[0],
            "admin"
        );
    }
}
