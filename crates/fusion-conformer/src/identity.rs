//! Namespace and class name derived from a page's destination path.

use crate::config::ConformOptions;
use std::path::{Component, Path};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DestinationIdentity {
    /// Namespace without a leading `\`.
    pub namespace: String,
    pub class_name: String,
}

impl DestinationIdentity {
    /// Directory components become namespace segments below
    /// `options.generated_namespace`; the file name up to its first `.`
    /// becomes the class name.
    ///
    /// When `options.destination_root` is set and contains `path`, only the
    /// components below the root are used.
    pub fn from_path(path: &Path, options: &ConformOptions) -> Option<Self> {
        let relative = options
            .destination_root
            .as_deref()
            .and_then(|root| path.strip_prefix(root).ok())
            .unwrap_or(path);

        let file_name = relative.file_name()?.to_str()?;
        let stem = file_name.split('.').next().unwrap_or(file_name);
        if stem.is_empty() {
            return None;
        }

        let mut namespace = options
            .generated_namespace
            .trim_matches('\\')
            .to_string();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                let Component::Normal(segment) = component else {
                    continue;
                };
                let segment = sanitize_identifier(&segment.to_string_lossy());
                if !namespace.is_empty() {
                    namespace.push('\\');
                }
                namespace.push_str(&segment);
            }
        }

        Some(DestinationIdentity {
            namespace,
            class_name: sanitize_identifier(stem),
        })
    }

    /// `\Namespace\Class`, or just `Class` outside any namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.class_name.clone()
        } else {
            format!("\\{}\\{}", self.namespace, self.class_name)
        }
    }
}

/// Replace characters outside `[A-Za-z0-9_]` with `_` and prefix a leading
/// digit with `_`.
pub fn sanitize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('_');
    }
    out.extend(raw.chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' {
            c
        } else {
            '_'
        }
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn options_with_root(root: &str) -> ConformOptions {
        ConformOptions {
            destination_root: Some(PathBuf::from(root)),
            ..ConformOptions::default()
        }
    }

    #[test]
    fn segments_below_root_become_namespace() {
        let identity = DestinationIdentity::from_path(
            Path::new("/storage/fusion/PHP/Bar/TestGenerated.php"),
            &options_with_root("/storage/fusion/PHP"),
        )
        .expect("identity");
        assert_eq!(identity.namespace, "Fusion\\Generated\\Bar");
        assert_eq!(identity.class_name, "TestGenerated");
        assert_eq!(
            identity.qualified_name(),
            "\\Fusion\\Generated\\Bar\\TestGenerated"
        );
    }

    #[test]
    fn relative_paths_use_every_directory() {
        let identity = DestinationIdentity::from_path(
            Path::new("Pages/Podcasts/Show.vue.php"),
            &ConformOptions::default(),
        )
        .expect("identity");
        assert_eq!(identity.namespace, "Fusion\\Generated\\Pages\\Podcasts");
        assert_eq!(identity.class_name, "Show");
    }

    #[test]
    fn segments_are_sanitized() {
        let identity = DestinationIdentity::from_path(
            Path::new("my-pages/2024/[id].php"),
            &ConformOptions::default(),
        )
        .expect("identity");
        assert_eq!(identity.namespace, "Fusion\\Generated\\my_pages\\_2024");
        assert_eq!(identity.class_name, "_id_");
    }

    #[test]
    fn sanitize_identifier_examples() {
        assert_eq!(sanitize_identifier("Show"), "Show");
        assert_eq!(sanitize_identifier("9lives"), "_9lives");
        assert_eq!(sanitize_identifier("a b.c"), "a_b_c");
    }

    #[test]
    fn empty_file_name_has_no_identity() {
        assert!(
            DestinationIdentity::from_path(Path::new("/"), &ConformOptions::default()).is_none()
        );
    }
}
