//! Registry of the free functions page scripts may call and import.
//!
//! The names are read from a declarations stub rather than hard-coded, so
//! adding a function to `stubs/functions.php` is enough to have its imports
//! pruned.

use fusion_parser::{Node, parse_source};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use tracing::{debug, warn};

const BUNDLED_STUB: &str = include_str!("../stubs/functions.php");

static BUNDLED: Lazy<FunctionRegistry> = Lazy::new(|| {
    FunctionRegistry::from_source(BUNDLED_STUB).unwrap_or_else(|err| {
        warn!(error = %err, "failed to load bundled function stub");
        FunctionRegistry::default()
    })
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionRegistry {
    names: IndexSet<String>,
}

impl FunctionRegistry {
    /// The registry built from the bundled stub, loaded once per process.
    pub fn bundled() -> &'static FunctionRegistry {
        &BUNDLED
    }

    /// Collect every function declared in `source`, at top level or inside
    /// a namespace.
    pub fn from_source(source: &str) -> Result<Self, fusion_parser::ParseError> {
        let tree = parse_source(source)?;
        let mut names = IndexSet::new();
        for index in tree.arena.descendants(tree.root) {
            if let Some(Node::Function(function)) = tree.get(index) {
                names.insert(function.name.clone());
            }
        }
        debug!(count = names.len(), "loaded function registry");
        Ok(FunctionRegistry { names })
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FunctionRegistry {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_stub_lists_magic_functions() {
        let names: Vec<&str> = FunctionRegistry::bundled().names().collect();
        assert_eq!(names, vec!["prop", "expose", "mount"]);
    }

    #[test]
    fn unparsable_source_is_an_error() {
        assert!(FunctionRegistry::from_source("<?php function (").is_err());
    }

    #[test]
    fn from_names_keeps_order() {
        let registry = FunctionRegistry::from_names(["b", "a"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
