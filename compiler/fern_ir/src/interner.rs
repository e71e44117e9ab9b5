//! String interner for identifier and literal text.
//!
//! Provides O(1) interning and lookup with thread-safe interior mutability,
//! so one interner can be shared by every stage of a unit's pipeline run and
//! by concurrent runs over independent units.

use crate::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

struct Inner {
    /// Map from string content to index.
    map: FxHashMap<String, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<String>,
}

/// Thread-safe string interner.
///
/// The empty string is pre-interned at index 0 so `Name::EMPTY` always
/// resolves.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(String::new(), 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![String::new()],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Interning the same text twice returns the same `Name`.
    pub fn intern(&self, text: &str) -> Name {
        {
            let inner = self.inner.read();
            if let Some(&idx) = inner.map.get(text) {
                return Name::from_raw(idx);
            }
        }
        let mut inner = self.inner.write();
        // Racing writers may have inserted between the read and write lock.
        if let Some(&idx) = inner.map.get(text) {
            return Name::from_raw(idx);
        }
        let idx = u32::try_from(inner.strings.len()).unwrap_or(u32::MAX);
        inner.strings.push(text.to_owned());
        inner.map.insert(text.to_owned(), idx);
        Name::from_raw(idx)
    }

    /// Look up the text of an interned name.
    ///
    /// Returns an owned copy; the interner's storage is behind a lock.
    pub fn lookup(&self, name: Name) -> String {
        let inner = self.inner.read();
        inner
            .strings
            .get(name.raw() as usize)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check whether only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn intern_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("foo");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "foo");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        let a = interner.intern("foo");
        let b = interner.intern("bar");
        assert_ne!(a, b);
        assert_eq!(interner.lookup(b), "bar");
    }

    #[test]
    fn empty_string_is_preinterned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }
}
