use super::Printer;
use fusion_common::Comment;

impl<'a> Printer<'a> {
    /// Comments one per line at the current indentation. The caller has
    /// already positioned the writer at the start of the first line.
    pub(crate) fn emit_comments(&mut self, comments: &[Comment]) {
        for (i, comment) in comments.iter().enumerate() {
            if i > 0 {
                self.write_line();
            }
            self.writer.write_multiline(&comment.reformatted_text());
        }
    }
}
