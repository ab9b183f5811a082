//! Presentation attribute bags.

use indexmap::IndexMap;

/// Ordered map of element attributes.
///
/// An empty value denotes a boolean attribute such as `controls`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attrs: IndexMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attrs: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attrs: IndexMap::with_capacity(capacity),
        }
    }

    /// Set an attribute value. An existing attribute keeps its position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style boolean attribute.
    pub fn with_flag(self, name: impl Into<String>) -> Self {
        self.with(name, "")
    }

    /// Get an attribute value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(|s| s.as_str())
    }

    /// Remove an attribute.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.attrs.shift_remove(name)
    }

    /// Check if attribute exists.
    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Get number of attributes.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate over attributes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Get attribute names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(|k| k.as_str())
    }

    /// Copy every attribute of `other` onto `self`; `other` wins on conflict.
    pub fn merge(&mut self, other: &AttributeMap) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// `self` overlaid with `other`.
    pub fn merged(&self, other: &AttributeMap) -> AttributeMap {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Parse a `name=value` pair; a bare `name` is a boolean attribute.
    pub fn parse_pair(pair: &str) -> Option<(String, String)> {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim().trim_matches('"')),
            None => (pair.trim(), ""),
        };
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), value.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut attrs = AttributeMap::new();
        attrs.set("alt", "Placeholder image");
        attrs.set("class", "demo-image");

        assert_eq!(attrs.get("alt"), Some("Placeholder image"));
        assert!(attrs.contains("class"));
        assert_eq!(attrs.len(), 2);

        attrs.remove("alt");
        assert!(!attrs.contains("alt"));
    }

    #[test]
    fn test_merge_later_wins() {
        let generic = AttributeMap::new().with("class", "media").with("title", "clip");
        let specific = AttributeMap::new().with("class", "demo-video").with_flag("controls");

        let merged = generic.merged(&specific);

        assert_eq!(merged.get("class"), Some("demo-video"));
        assert_eq!(merged.get("title"), Some("clip"));
        assert_eq!(merged.get("controls"), Some(""));
        let names: Vec<_> = merged.names().collect();
        assert_eq!(names, vec!["class", "title", "controls"]);
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            AttributeMap::parse_pair("alt=\"A cat\""),
            Some(("alt".to_string(), "A cat".to_string()))
        );
        assert_eq!(
            AttributeMap::parse_pair("muted"),
            Some(("muted".to_string(), String::new()))
        );
        assert_eq!(AttributeMap::parse_pair("=value"), None);
    }
}
