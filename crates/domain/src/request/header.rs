//! HTTP Header types

use serde::{Deserialize, Serialize};

/// Name of the bearer authorization header.
pub const AUTHORIZATION: &str = "Authorization";

/// Name of the correlation id header attached to every outgoing request.
pub const REQUEST_ID: &str = "X-Request-ID";

/// A single HTTP header with name and value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The header name (e.g., "Content-Type")
    pub name: String,
    /// The header value (e.g., "application/json")
    pub value: String,
}

impl Header {
    /// Creates a new header.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns true if this header has the given name (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// An ordered collection of HTTP headers with case-insensitive lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers {
    items: Vec<Header>,
}

impl Headers {
    /// Creates an empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets a header, replacing any existing header with the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let header = Header::new(name, value);
        if let Some(existing) = self.items.iter_mut().find(|h| h.is_named(&header.name)) {
            *existing = header;
        } else {
            self.items.push(header);
        }
    }

    /// Returns the value of the named header, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|h| h.is_named(name))
            .map(|h| h.value.as_str())
    }

    /// Removes the named header, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.items.iter().position(|h| h.is_named(name))?;
        Some(self.items.remove(index).value)
    }

    /// Returns an iterator over all headers.
    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.items.iter()
    }

    /// Returns the number of headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::len is not const in stable
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no headers.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Vec::is_empty is not const in stable
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Header> for Headers {
    fn from_iter<T: IntoIterator<Item = Header>>(iter: T) -> Self {
        let mut headers = Self::new();
        for header in iter {
            headers.set(header.name, header.value);
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_replaces_case_insensitively() {
        let mut headers = Headers::new();
        headers.set("authorization", "Bearer A1");
        headers.set(AUTHORIZATION, "Bearer A2");

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("AUTHORIZATION"), Some("Bearer A2"));
    }

    #[test]
    fn test_remove() {
        let mut headers = Headers::new();
        headers.set(REQUEST_ID, "abc");
        headers.set("Accept", "application/json");

        assert_eq!(headers.remove("x-request-id"), Some("abc".to_string()));
        assert_eq!(headers.get(REQUEST_ID), None);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_from_iter_deduplicates() {
        let headers: Headers = vec![
            Header::new("Accept", "text/plain"),
            Header::new("accept", "application/json"),
        ]
        .into_iter()
        .collect();

        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("Accept"), Some("application/json"));
    }
}
