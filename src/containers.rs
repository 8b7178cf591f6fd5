//! ordered key to value-list containers; one [`DataContainer`] backs each
//! injectable data source (query string, post data, headers, synthetic splits)
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use crate::error::MutantKitError;
use crate::requests::encoders::quote_plus;

/// insertion-ordered mapping from parameter name to its list of values
///
/// keys are unique; a repeated parameter (`id=1&id=2`) is stored as one key
/// with two values, in the order they were seen. `Clone` produces a deep,
/// independent copy and equality is structural.
///
/// # Examples
///
/// ```
/// # use mutantkit::containers::DataContainer;
/// # use mutantkit::error::MutantKitError;
/// # fn main() -> Result<(), MutantKitError> {
/// let mut container = DataContainer::new();
///
/// container.set("id", "1");
/// container.append_value("id", "2");
///
/// assert_eq!(container.get("id")?.len(), 2);
/// assert_eq!(container.get("id")?[1], "2");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DataContainer {
    entries: Vec<(String, Vec<String>)>,
}

/// non-consuming iterator over a `DataContainer`'s entries, in insertion order
impl<'i> IntoIterator for &'i DataContainer {
    /// the type of the elements being iterated over
    type Item = <&'i [(String, Vec<String>)] as IntoIterator>::Item;

    /// the kind of iterator we're turning `DataContainer` into
    type IntoIter = <&'i [(String, Vec<String>)] as IntoIterator>::IntoIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// a `DataContainer` may be collected from key/value pairs; repeated keys
/// accumulate values under the first occurrence of the key
///
/// # Examples
///
/// ```
/// # use mutantkit::containers::DataContainer;
/// let container: DataContainer = [("a", "1"), ("b", "2"), ("a", "3")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(container.len(), 2);
/// assert_eq!(container.get("a").unwrap().len(), 2);
/// ```
impl<K, V> FromIterator<(K, V)> for DataContainer
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut container = Self::new();

        for (key, value) in iter {
            container.append_value(key, value);
        }

        container
    }
}

impl DataContainer {
    /// create a new, empty `DataContainer`
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// parse an `application/x-www-form-urlencoded` string (`a=1&b=2&a=3`)
    /// into a `DataContainer`, percent-decoding keys and values
    ///
    /// # Examples
    ///
    /// ```
    /// # use mutantkit::containers::DataContainer;
    /// let container = DataContainer::from_query_string("name=fake+user&id=1");
    ///
    /// assert_eq!(container.get("name").unwrap()[0], "fake user");
    /// assert_eq!(container.get("id").unwrap()[0], "1");
    /// ```
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// whether or not the given key exists in the container
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(entry_key, _)| entry_key == key)
    }

    /// get the values stored under `key`
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::KeyNotFound`] when the key does not exist
    #[instrument(skip(self), level = "trace")]
    pub fn get(&self, key: &str) -> Result<&[String], MutantKitError> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| {
                error!(%key, "key not found in DataContainer");

                MutantKitError::KeyNotFound {
                    key: key.to_string(),
                }
            })
    }

    /// get a mutable reference to the values stored under `key`, if any
    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Vec<String>> {
        self.entries
            .iter_mut()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, values)| values)
    }

    /// set `key` to the single given value, replacing any values already
    /// stored under it; unknown keys are appended to the container
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();

        match self.get_mut(&key) {
            Some(values) => {
                values.clear();
                values.push(value);
            }
            None => self.entries.push((key, vec![value])),
        }
    }

    /// add a value under `key`, keeping any values already stored under it
    pub fn append_value<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let key = key.into();
        let value = value.into();

        match self.get_mut(&key) {
            Some(values) => values.push(value),
            None => self.entries.push((key, vec![value])),
        }
    }

    /// replace the `index`-th value stored under `key`
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::KeyNotFound`] when the key does not exist and
    /// [`MutantKitError::InvalidParameter`] when the index is out of bounds
    #[instrument(skip(self, value), level = "trace")]
    pub fn set_element<V>(
        &mut self,
        key: &str,
        index: usize,
        value: V,
    ) -> Result<(), MutantKitError>
    where
        V: Into<String>,
    {
        let values = self.get_mut(key).ok_or_else(|| {
            error!(%key, "key not found in DataContainer");

            MutantKitError::KeyNotFound {
                key: key.to_string(),
            }
        })?;

        match values.get_mut(index) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => {
                error!(%key, index, "value index out of bounds");

                Err(MutantKitError::InvalidParameter {
                    param: index.to_string(),
                    message: "value index is out of bounds for the given key",
                })
            }
        }
    }

    /// remove `key` from the container, returning the values stored under it
    ///
    /// # Errors
    ///
    /// returns [`MutantKitError::KeyNotFound`] when the key does not exist
    #[instrument(skip(self), level = "trace")]
    pub fn delete(&mut self, key: &str) -> Result<Vec<String>, MutantKitError> {
        let position = self
            .entries
            .iter()
            .position(|(entry_key, _)| entry_key == key)
            .ok_or_else(|| {
                error!(%key, "key not found in DataContainer");

                MutantKitError::KeyNotFound {
                    key: key.to_string(),
                }
            })?;

        Ok(self.entries.remove(position).1)
    }

    /// iterator over `(key, values)` entries, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// iterator over the container's keys, in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// number of keys in the container
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// returns `true` if the container holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// serialize the container as an `application/x-www-form-urlencoded`
    /// string; repeated values render as repeated `key=value` pairs
    ///
    /// # Examples
    ///
    /// ```
    /// # use mutantkit::containers::DataContainer;
    /// let container: DataContainer = [("q", "a b"), ("q", "c"), ("id", "1'")]
    ///     .into_iter()
    ///     .collect();
    ///
    /// assert_eq!(container.to_encoded_string(), "q=a+b&q=c&id=1%27");
    /// ```
    #[must_use]
    pub fn to_encoded_string(&self) -> String {
        let mut serialized = String::new();

        for (key, values) in &self.entries {
            for value in values {
                if !serialized.is_empty() {
                    serialized.push('&');
                }

                serialized.push_str(&quote_plus(key, ""));
                serialized.push('=');
                serialized.push_str(&quote_plus(value, ""));
            }
        }

        serialized
    }
}

impl Display for DataContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_encoded_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_preserves_insertion_order() {
        let container: DataContainer = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();

        let keys: Vec<&str> = container.keys().collect();

        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn container_get_missing_key_is_an_error() {
        let container = DataContainer::new();

        assert!(matches!(
            container.get("nope"),
            Err(MutantKitError::KeyNotFound { .. })
        ));
    }

    #[test]
    fn container_set_replaces_all_values() {
        let mut container: DataContainer = [("id", "1"), ("id", "2")].into_iter().collect();

        container.set("id", "3");

        assert_eq!(container.get("id").unwrap().len(), 1);
        assert_eq!(container.get("id").unwrap()[0], "3");
    }

    #[test]
    fn container_set_element_targets_one_slot() {
        let mut container: DataContainer = [("id", "1"), ("id", "2")].into_iter().collect();

        container.set_element("id", 1, "payload").unwrap();

        assert_eq!(container.get("id").unwrap()[0], "1");
        assert_eq!(container.get("id").unwrap()[1], "payload");
    }

    #[test]
    fn container_set_element_bad_index_is_an_error() {
        let mut container: DataContainer = [("id", "1")].into_iter().collect();

        assert!(matches!(
            container.set_element("id", 4, "payload"),
            Err(MutantKitError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn container_delete_returns_removed_values() {
        let mut container: DataContainer = [("a", "1"), ("b", "2")].into_iter().collect();

        let removed = container.delete("a").unwrap();

        assert_eq!(removed, vec!["1".to_string()]);
        assert!(!container.contains_key("a"));
        assert!(container.contains_key("b"));
    }

    #[test]
    fn container_copy_is_independent_of_the_original() {
        let original: DataContainer = [("id", "1")].into_iter().collect();

        let mut copied = original.clone();
        copied.set("id", "2");

        assert_eq!(original.get("id").unwrap()[0], "1");
        assert_eq!(copied.get("id").unwrap()[0], "2");
    }

    #[test]
    fn container_equality_is_structural() {
        let left: DataContainer = [("a", "1"), ("b", "2")].into_iter().collect();
        let right: DataContainer = [("a", "1"), ("b", "2")].into_iter().collect();
        let reordered: DataContainer = [("b", "2"), ("a", "1")].into_iter().collect();

        assert_eq!(left, right);
        assert_ne!(left, reordered);
    }

    #[test]
    fn query_string_round_trips_through_parse_and_serialize() {
        let container = DataContainer::from_query_string("a=b+c&id=%27&a=2");

        assert_eq!(container.to_encoded_string(), "a=b+c&a=2&id=%27");
    }
}
