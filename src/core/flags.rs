//! Ordered, duplicate-free compile flag sets.

use serde::{Deserialize, Deserializer, Serialize};

/// An ordered set of compiler flags.
///
/// Insertion order is preserved and a flag that is already present is never
/// appended twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompileFlags(Vec<String>);

impl CompileFlags {
    pub fn new() -> Self {
        CompileFlags(Vec::new())
    }

    /// Append a flag unless it is already present. Returns true if added.
    pub fn push(&mut self, flag: impl Into<String>) -> bool {
        let flag = flag.into();
        if self.contains(&flag) {
            return false;
        }
        self.0.push(flag);
        true
    }

    /// Append every flag of `other` that is missing from `self`.
    pub fn merge(&mut self, other: &CompileFlags) {
        for flag in &other.0 {
            self.push(flag.as_str());
        }
    }

    pub fn contains(&self, flag: &str) -> bool {
        self.0.iter().any(|f| f == flag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for CompileFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut flags = CompileFlags::new();
        for flag in iter {
            flags.push(flag);
        }
        flags
    }
}

impl<'de> Deserialize<'de> for CompileFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Vec::<String>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}
