//! The conform entry point: parse, run the pipeline, print.

use crate::config::ConformOptions;
use crate::error::{ConformResult, SyntaxError};
use crate::identity::DestinationIdentity;
use crate::passes::{PassContext, PassKind, default_pipeline, traverse};
use crate::registry::FunctionRegistry;
use fusion_emitter::print_file;
use fusion_parser::{Node, SyntaxTree, parse_source};
use std::path::{Path, PathBuf};
use tracing::debug;

const PHP_MARKER: &str = "<?php";

/// Conforms one page fragment.
///
/// ```ignore
/// let mut conformer = Conformer::new("$x = prop('hey');")
///     .with_destination("storage/PHP/Pages/Show.php");
/// let source = conformer.conform()?;
/// assert_eq!(
///     conformer.qualified_name(),
///     Some("\\Fusion\\Generated\\storage\\PHP\\Pages\\Show")
/// );
/// ```
pub struct Conformer {
    fragment: String,
    destination: Option<PathBuf>,
    options: ConformOptions,
    pipeline: Vec<PassKind>,
    registry: Option<FunctionRegistry>,
    qualified_name: Option<String>,
}

impl Conformer {
    pub fn new(fragment: impl Into<String>) -> Self {
        Conformer {
            fragment: fragment.into(),
            destination: None,
            options: ConformOptions::default(),
            pipeline: default_pipeline(),
            registry: None,
            qualified_name: None,
        }
    }

    /// Path the conformed class will be written to. Without one the
    /// anonymous class is left unnamed.
    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    pub fn with_options(mut self, options: ConformOptions) -> Self {
        self.options = options;
        self
    }

    /// Run only `pipeline`, in the given order.
    pub fn with_pipeline(mut self, pipeline: Vec<PassKind>) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Use `registry` instead of the bundled function stub.
    pub fn with_registry(mut self, registry: FunctionRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Fully qualified name of the class produced by the last successful
    /// `conform`, if the output declares one.
    pub fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_deref()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(destination = ?self.destination))]
    pub fn conform(&mut self) -> ConformResult<String> {
        self.qualified_name = None;
        let tree = self.conform_tree()?;
        self.qualified_name = extract_qualified_name(&tree);
        debug!(qualified_name = ?self.qualified_name, "conformed");
        Ok(print_file(&tree, &self.options.print))
    }

    /// Parse the fragment and run the pipeline without printing.
    pub fn conform_tree(&self) -> ConformResult<SyntaxTree> {
        let (source, prepended_lines) = if self.fragment.starts_with(PHP_MARKER) {
            (self.fragment.clone(), 0)
        } else {
            (format!("{PHP_MARKER}\n{}", self.fragment), 1)
        };
        let mut tree = parse_with_repair(&source, prepended_lines)?;

        let registry = self
            .registry
            .as_ref()
            .unwrap_or_else(|| FunctionRegistry::bundled());
        let identity = self
            .destination
            .as_deref()
            .and_then(|path| DestinationIdentity::from_path(path, &self.options));
        let context = PassContext {
            options: &self.options,
            registry,
            identity: identity.as_ref(),
        };

        for kind in &self.pipeline {
            tree.connect_parents();
            let mut pass = kind.instantiate(&context);
            if !pass.should_handle(&tree) {
                debug!(pass = kind.name(), "skipped");
                continue;
            }
            debug!(pass = kind.name(), "applying");
            traverse(&mut tree, pass.as_mut())?;
        }
        Ok(tree)
    }
}

/// Conform `fragment` with default options.
pub fn conform(fragment: &str, destination: Option<&Path>) -> ConformResult<String> {
    let mut conformer = Conformer::new(fragment);
    if let Some(destination) = destination {
        conformer = conformer.with_destination(destination);
    }
    conformer.conform()
}

/// Parse `source`. When input ends early, insert `;` after the last `}`
/// and try exactly once more.
fn parse_with_repair(source: &str, prepended_lines: u32) -> Result<SyntaxTree, SyntaxError> {
    let err = match parse_source(source) {
        Ok(tree) => return Ok(tree),
        Err(err) => err,
    };
    if !err.is_unexpected_eof() {
        return Err(SyntaxError::from_parse(&err, prepended_lines));
    }
    let Some(brace) = source.rfind('}') else {
        return Err(SyntaxError::from_parse(&err, prepended_lines));
    };

    debug!(offset = brace, "retrying parse with a semicolon after the last brace");
    let mut repaired = String::with_capacity(source.len() + 1);
    repaired.push_str(&source[..=brace]);
    repaired.push(';');
    repaired.push_str(&source[brace + 1..]);
    parse_source(&repaired).map_err(|err| SyntaxError::from_parse(&err, prepended_lines))
}

/// `\Namespace\Class` for a class inside a top-level namespace, the bare
/// class name for a top-level class.
fn extract_qualified_name(tree: &SyntaxTree) -> Option<String> {
    let mut namespace = None;
    let mut class = None;
    for &stmt in tree.root_statements() {
        match tree.get(stmt) {
            Some(Node::Namespace(data)) => {
                namespace = tree.arena.get_name(data.name).map(|name| name.text.clone());
                if let Some(name) = data
                    .stmts
                    .iter()
                    .find_map(|stmt| tree.arena.get_class(*stmt)?.name.clone())
                {
                    class = Some(name);
                }
            }
            Some(Node::Class(data)) if data.name.is_some() => class = data.name.clone(),
            _ => {}
        }
    }
    let class = class?;
    Some(match namespace {
        Some(namespace) if !namespace.is_empty() => format!("\\{namespace}\\{class}"),
        _ => class,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_prepended() {
        let tree = Conformer::new("$a = 1;")
            .with_pipeline(Vec::new())
            .conform_tree()
            .expect("conform");
        assert_eq!(tree.root_statements().len(), 1);
    }

    #[test]
    fn qualified_name_of_plain_class() {
        let tree = parse_source("<?php class Page {}").expect("source should parse");
        assert_eq!(extract_qualified_name(&tree).as_deref(), Some("Page"));
    }

    #[test]
    fn qualified_name_inside_namespace() {
        let tree = parse_source("<?php namespace App\\Pages; use Foo; class Page {}")
            .expect("source should parse");
        assert_eq!(
            extract_qualified_name(&tree).as_deref(),
            Some("\\App\\Pages\\Page")
        );
    }

    #[test]
    fn no_class_means_no_name() {
        let tree = parse_source("<?php $a = new class {};").expect("source should parse");
        assert_eq!(extract_qualified_name(&tree), None);
    }

    #[test]
    fn repair_only_retries_once() {
        let err = parse_with_repair("<?php\nif ($a) {", 1).expect_err("still broken");
        assert_eq!(err.prepended_lines, 1);
        assert!(err.message.contains("unexpected"));
    }

    #[test]
    fn repair_inserts_semicolon_after_last_brace() {
        let tree = parse_with_repair("<?php\nreturn new class {\n}", 1).expect("repaired");
        assert_eq!(tree.root_statements().len(), 1);
    }
}
