//! String interning.
//!
//! Identifiers and string literal values are interned once per [`Ast`]
//! so that name comparison during scope analysis is an integer compare.
//! Analysis is single-threaded, so no sharding or locking is needed.
//!
//! [`Ast`]: crate::Ast

use rustc_hash::FxHashMap;

use crate::Name;

/// Interns strings and hands out stable [`Name`] handles.
#[derive(Debug, Default, Clone)]
pub struct StringInterner {
    map: FxHashMap<Box<str>, Name>,
    strings: Vec<Box<str>>,
}

impl StringInterner {
    /// Create an empty interner.
    pub fn new() -> Self {
        StringInterner::default()
    }

    /// Intern a string, returning its handle.
    ///
    /// Interning the same string twice returns the same handle.
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.map.get(s) {
            return name;
        }
        let name = Name::from_raw(u32::try_from(self.strings.len()).unwrap_or(u32::MAX));
        self.strings.push(Box::from(s));
        self.map.insert(Box::from(s), name);
        name
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.map.get(s).copied()
    }

    /// Resolve a handle back to its string.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.index()]
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the interner is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
