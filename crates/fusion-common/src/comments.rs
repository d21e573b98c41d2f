//! Comment Preservation
//!
//! Comments are not part of the syntax tree. The scanner collects them as
//! trivia, the parser attaches them to the statement or class member that
//! follows, and the printer re-emits them above that node.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
    /// `// ...` or `# ...`
    Line,
    /// `/* ... */`
    Block,
    /// `/** ... */`
    Doc,
}

/// A comment captured from source text, or synthesized by a rewrite.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Full comment text including delimiters.
    pub text: String,
    pub kind: CommentKind,
    /// Byte offset of the comment start, `u32::MAX` when synthesized.
    pub pos: u32,
}

impl Comment {
    pub fn new(text: impl Into<String>, kind: CommentKind, pos: u32) -> Self {
        Comment {
            text: text.into(),
            kind,
            pos,
        }
    }

    /// Classify raw comment text by its opening delimiter.
    pub fn from_source(text: &str, pos: u32) -> Self {
        let kind = if text.starts_with("/**") && text.len() > 4 {
            CommentKind::Doc
        } else if text.starts_with("/*") {
            CommentKind::Block
        } else {
            CommentKind::Line
        };
        Comment::new(text.trim_end(), kind, pos)
    }

    /// Build a `/** ... */` block from plain lines of text.
    pub fn doc(lines: &[&str]) -> Self {
        let mut text = String::from("/**\n");
        for line in lines {
            if line.is_empty() {
                text.push_str(" *\n");
            } else {
                text.push_str(" * ");
                text.push_str(line);
                text.push('\n');
            }
        }
        text.push_str(" */");
        Comment::new(text, CommentKind::Doc, u32::MAX)
    }

    pub fn is_multi_line(&self) -> bool {
        matches!(self.kind, CommentKind::Block | CommentKind::Doc)
    }

    /// Comment text with its indentation normalized so it can be re-indented
    /// at the printer's current level.
    ///
    /// Star-prefixed blocks have every continuation line realigned to ` *`.
    /// Blocks whose closing `*/` sits on its own line have that line's
    /// indentation removed from every line.
    pub fn reformatted_text(&self) -> String {
        let text = self.text.replace("\r\n", "\n");
        if !text.contains('\n') {
            return text;
        }

        let mut lines = text.split('\n');
        let first = lines.next().unwrap_or_default();
        let rest: Vec<&str> = lines.collect();

        let star_aligned = rest.iter().all(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with('*') && trimmed.len() < line.len()
        });
        if star_aligned {
            let mut out = String::from(first);
            for line in rest {
                out.push_str("\n ");
                out.push_str(line.trim_start());
            }
            return out;
        }

        if let Some(last) = rest.last() {
            let trimmed = last.trim_start();
            if trimmed == "*/" {
                let indent = &last[..last.len() - trimmed.len()];
                let mut out = String::from(first);
                for line in &rest {
                    out.push('\n');
                    out.push_str(line.strip_prefix(indent).unwrap_or(line));
                }
                return out;
            }
        }

        text
    }
}
