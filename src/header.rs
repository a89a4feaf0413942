//! Column names and the name-to-index lookup shared by all records of a
//! reader.

use dashmap::DashMap;
use std::slice;

/// The ordered column names of a CSV input.
///
/// Lookups by name scan the names once and remember the position, so
/// repeated lookups of the same column across rows are constant time.
#[derive(Debug, Default)]
pub struct Headers {
    names: Vec<String>,
    index: DashMap<String, usize>,
}

impl Headers {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            index: DashMap::new(),
        }
    }

    /// Returns the position of the first column named `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        if let Some(i) = self.index.get(name) {
            return Some(*i);
        }
        let i = self.names.iter().position(|n| n == name)?;
        // Concurrent lookups of the same name compute the same position.
        self.index.entry(name.to_string()).or_insert(i);
        Some(i)
    }

    #[must_use]
    pub fn get(&self, i: usize) -> Option<&str> {
        self.names.get(i).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<String> {
        self.names.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        self.names.as_slice()
    }

    /// Returns the number of names resolved so far.
    #[cfg(test)]
    fn cached(&self) -> usize {
        self.index.len()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a String;
    type IntoIter = slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn headers(names: &[&str]) -> Headers {
        Headers::new(names.iter().map(|n| (*n).to_string()).collect())
    }

    #[test]
    fn lazy_lookup() {
        let h = headers(&["name", "age", "active"]);
        assert_eq!(h.cached(), 0);
        assert_eq!(h.index_of("age"), Some(1));
        assert_eq!(h.cached(), 1);
        assert_eq!(h.index_of("age"), Some(1));
        assert_eq!(h.cached(), 1);
        assert_eq!(h.index_of("name"), Some(0));
        assert_eq!(h.cached(), 2);
    }

    #[test]
    fn missing_names_are_not_cached() {
        let h = headers(&["name"]);
        assert_eq!(h.index_of("missing"), None);
        assert_eq!(h.index_of("Name"), None);
        assert_eq!(h.cached(), 0);
    }

    #[test]
    fn first_duplicate_wins() {
        let h = headers(&["id", "value", "value"]);
        assert_eq!(h.index_of("value"), Some(1));
        assert_eq!(h.index_of("value"), Some(1));
    }

    #[test]
    fn concurrent_lookups() {
        let names: Vec<String> = (0..64).map(|i| format!("c{}", i)).collect();
        let h = Arc::new(Headers::new(names));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let h = Arc::clone(&h);
                thread::spawn(move || {
                    (0..64)
                        .rev()
                        .map(|i| h.index_of(&format!("c{}", i)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let found = handle.join().unwrap();
            let expected: Vec<_> = (0..64).rev().map(Some).collect();
            assert_eq!(found, expected);
        }
        assert_eq!(h.cached(), 64);
    }

    #[test]
    fn accessors() {
        let h = headers(&["name", "age"]);
        assert_eq!(h.len(), 2);
        assert!(!h.is_empty());
        assert_eq!(h.get(1), Some("age"));
        assert_eq!(h.get(2), None);
        assert_eq!(
            (&h).into_iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["name", "age"]
        );
        assert!(Headers::default().is_empty());
    }
}
