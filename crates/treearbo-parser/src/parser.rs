//! Line-oriented parser for the tree notation.
//!
//! Every line is `TAB* (label (' ' label)*)? ' '? ('\' data)? LF`. Labels on
//! one line form a chain, each nested in the previous one, and the leading
//! tabs choose the ancestor the chain hangs from.

use std::sync::Arc;

use smol_str::SmolStr;
use treearbo_tree::{Span, Tree};

use crate::error::StringToTreeError;

const ROOT: usize = 0;

#[derive(Debug)]
enum DraftKind {
    List,
    Struct(SmolStr),
    Data(SmolStr),
}

/// A node under construction; children are indices into the draft list.
#[derive(Debug)]
struct Draft {
    kind: DraftKind,
    span: Span,
    kids: Vec<usize>,
}

/// Parser for tree notation.
pub struct Parser<'source> {
    source: &'source str,
    pos: usize,
    row: usize,
    whole: Span,
    drafts: Vec<Draft>,
    /// Deepest node of each nesting level seen so far
    stack: Vec<usize>,
}

impl<'source> Parser<'source> {
    /// Create a new parser; `uri` names the source in spans and errors.
    pub fn new(source: &'source str, uri: &str) -> Self {
        let whole = Span::entire(uri, Arc::<str>::from(source));
        let root = Draft {
            kind: DraftKind::List,
            span: whole.clone(),
            kids: Vec::new(),
        };

        Self {
            source,
            pos: 0,
            row: 0,
            whole,
            drafts: vec![root],
            stack: vec![ROOT],
        }
    }

    /// Parse the whole source into a list node holding the top-level nodes.
    pub fn parse(mut self) -> Result<Tree, StringToTreeError> {
        let mut min_indent: usize = 0;

        while !self.at_end() {
            let line_start = self.pos;
            self.row += 1;

            let mut indent: usize = 0;
            while self.peek() == Some(b'\t') {
                indent += 1;
                self.pos += 1;
            }

            // The base indent follows the lines until the first node lands.
            if self.drafts[ROOT].kids.is_empty() {
                min_indent = indent;
            }

            let depth = match indent.checked_sub(min_indent) {
                Some(depth) if depth < self.stack.len() => depth,
                depth => return Err(self.indent_error(line_start, depth.is_some())),
            };

            self.stack.truncate(depth + 1);
            let mut parent = self.stack[depth];

            while !matches!(self.peek(), None | Some(b'\\' | b'\n')) {
                let gap_start = self.pos;
                while matches!(self.peek(), Some(b' ' | b'\t')) {
                    self.pos += 1;
                }
                if self.pos > gap_start {
                    return Err(StringToTreeError::WrongSeparator {
                        line: self.line_text(line_start),
                        span: self.span_between(line_start, gap_start, self.pos),
                    });
                }

                let type_start = self.pos;
                while !matches!(self.peek(), None | Some(b'\\' | b' ' | b'\t' | b'\n')) {
                    self.pos += 1;
                }
                if self.pos > type_start {
                    let ty = SmolStr::from(&self.source[type_start..self.pos]);
                    let span = self.span_between(line_start, type_start, self.pos);
                    parent = self.attach(parent, DraftKind::Struct(ty), span);
                }

                if self.peek() == Some(b' ') {
                    self.pos += 1;
                }
            }

            if self.peek() == Some(b'\\') {
                let data_start = self.pos + 1;
                self.skip_line();

                let value = SmolStr::from(&self.source[data_start..self.pos]);
                let span = self.span_between(line_start, data_start, self.pos);
                parent = self.attach(parent, DraftKind::Data(value), span);
            }

            if self.at_end() {
                return Err(StringToTreeError::UnexpectedEof {
                    line: self.source[line_start..].to_string(),
                    span: self.eof_span(line_start),
                });
            }

            self.stack.push(parent);
            self.pos += 1;
        }

        self.build()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn skip_line(&mut self) {
        while !matches!(self.peek(), None | Some(b'\n')) {
            self.pos += 1;
        }
    }

    /// Text of the line starting at `line_start`, without its LF.
    fn line_text(&self, line_start: usize) -> String {
        let line_end = self.source[line_start..]
            .find('\n')
            .map_or(self.source.len(), |at| line_start + at);
        self.source[line_start..line_end].to_string()
    }

    /// Span of the bytes `start..end` on the current row.
    fn span_between(&self, line_start: usize, start: usize, end: usize) -> Span {
        let col = self.source[line_start..start].chars().count() + 1;
        let length = self.source[start..end].chars().count();
        self.whole.span(self.row, col, length)
    }

    fn eof_span(&self, line_start: usize) -> Span {
        let col = self.source[line_start..self.pos].chars().count() + 1;
        self.whole.span(self.row, col, 1)
    }

    /// Report a line indented outside `[base, stack depth)`.
    fn indent_error(&mut self, line_start: usize, too_many: bool) -> StringToTreeError {
        let span = self.span_between(line_start, line_start, self.pos);
        self.skip_line();
        let line = self.source[line_start..self.pos].to_string();

        if too_many {
            StringToTreeError::TooManyTabs { line, span }
        } else if self.at_end() {
            StringToTreeError::UnexpectedEof {
                line,
                span: self.eof_span(line_start),
            }
        } else {
            StringToTreeError::TooFewTabs { line, span }
        }
    }

    fn attach(&mut self, parent: usize, kind: DraftKind, span: Span) -> usize {
        let index = self.drafts.len();
        self.drafts.push(Draft {
            kind,
            span,
            kids: Vec::new(),
        });
        self.drafts[parent].kids.push(index);
        index
    }

    /// Turn the drafts into trees without recursing per nesting level.
    fn build(self) -> Result<Tree, StringToTreeError> {
        let mut built: Vec<Option<Tree>> = Vec::with_capacity(self.drafts.len());
        built.resize_with(self.drafts.len(), || None);

        // A kid is always attached after its parent, so walking the drafts
        // backwards finishes every kid before the parent that takes it.
        for (index, draft) in self.drafts.iter().enumerate().rev() {
            let kids = draft
                .kids
                .iter()
                .filter_map(|&kid| built[kid].take())
                .collect();
            built[index] = Some(draft.finish(kids)?);
        }

        Ok(built
            .swap_remove(ROOT)
            .unwrap_or_else(|| Tree::wrap(Vec::new(), self.whole)))
    }
}

impl Draft {
    fn finish(&self, kids: Vec<Tree>) -> Result<Tree, StringToTreeError> {
        let span = self.span.clone();

        Ok(match &self.kind {
            DraftKind::List => Tree::wrap(kids, span),
            DraftKind::Struct(ty) => Tree::structure(ty.clone(), kids, span)?,
            DraftKind::Data(value) => Tree::data(value.clone(), kids, span),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    fn parse(source: &str) -> Tree {
        Parser::new(source, "test.tree").parse().unwrap()
    }

    fn parse_err(source: &str) -> StringToTreeError {
        Parser::new(source, "test.tree").parse().unwrap_err()
    }

    #[test]
    fn test_empty_source() {
        let tree = parse("");

        assert!(tree.is_list());
        assert!(tree.kids().is_empty());
    }

    #[test]
    fn test_chain() {
        let tree = parse("a b c\n");

        assert_eq!(tree.kids().len(), 1);
        let a = &tree.kids()[0];
        let b = &a.kids()[0];
        let c = &b.kids()[0];
        assert_eq!((a.ty(), b.ty(), c.ty()), ("a", "b", "c"));
        assert!(c.kids().is_empty());

        assert_eq!(a.span().to_string(), "test.tree#1:1/1");
        assert_eq!(b.span().to_string(), "test.tree#1:3/1");
        assert_eq!(c.span().to_string(), "test.tree#1:5/1");
    }

    #[test]
    fn test_nested_lines() {
        let tree = parse("a\n\tb\n\tc d\n\t\te\nf\n");

        let top: Vec<&str> = tree.kids().iter().map(Tree::ty).collect();
        assert_eq!(top, ["a", "f"]);

        let a = &tree.kids()[0];
        let under_a: Vec<&str> = a.kids().iter().map(Tree::ty).collect();
        assert_eq!(under_a, ["b", "c"]);

        let d = &a.kids()[1].kids()[0];
        assert_eq!(d.ty(), "d");
        assert_eq!(d.kids()[0].ty(), "e");
        assert_eq!(d.kids()[0].span().to_string(), "test.tree#4:3/1");
    }

    #[test]
    fn test_data() {
        let tree = parse("password \\qwerty 123\n\\top\n");

        let password = &tree.kids()[0];
        let data = &password.kids()[0];
        assert!(data.is_data());
        assert_eq!(data.value(), "qwerty 123");
        assert_eq!(data.span().to_string(), "test.tree#1:11/10");

        assert_eq!(tree.kids()[1].value(), "top");
    }

    #[test]
    fn test_data_continuation_lines() {
        let tree = parse("text \\\n\t\\foo\n\t\\bar\n");

        let text = &tree.kids()[0].kids()[0];
        assert_eq!(text.value(), "");
        assert_eq!(text.text(), "foo\nbar");
    }

    #[test]
    fn test_data_without_space_and_trailing_space() {
        let tree = parse("a\\x\nb \n");

        assert_eq!(tree.kids()[0].kids()[0].value(), "x");
        assert_eq!(tree.kids()[1].ty(), "b");
        assert!(tree.kids()[1].kids().is_empty());
    }

    #[test]
    fn test_base_indent_from_first_node() {
        let tree = parse("\t\ta\n\t\t\tb\n\t\tc\n");

        let top: Vec<&str> = tree.kids().iter().map(Tree::ty).collect();
        assert_eq!(top, ["a", "c"]);
        assert_eq!(tree.kids()[0].kids()[0].ty(), "b");
    }

    #[test]
    fn test_empty_line_resets_nesting() {
        let tree = parse("a\n\n\tb\n");

        // The empty line itself sits at the root, so `b` lands next to `a`.
        let top: Vec<&str> = tree.kids().iter().map(Tree::ty).collect();
        assert_eq!(top, ["a", "b"]);
        assert!(tree.kids()[0].kids().is_empty());
    }

    #[test]
    fn test_unicode_columns() {
        let tree = parse("héllo wörld \\ü\n");

        let world = &tree.kids()[0].kids()[0];
        assert_eq!(world.span().to_string(), "test.tree#1:7/5");
        assert_eq!(world.kids()[0].span().to_string(), "test.tree#1:14/1");
    }

    #[test]
    fn test_deep_chain() {
        let depth = 5_000;
        let tree = parse(&(vec!["a"; depth].join(" ") + "\n"));

        let mut node = &tree;
        let mut levels = 0;
        while let [kid] = node.kids() {
            node = kid;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node.span().to_string(), format!("test.tree#1:{}/1", 2 * depth - 1));
    }

    #[test]
    fn test_deep_indentation() {
        let depth = 2_000;
        let source: String = (0..depth).map(|level| "\t".repeat(level) + "a\n").collect();
        let tree = parse(&source);

        let mut node = &tree;
        let mut levels = 0;
        while let [kid] = node.kids() {
            node = kid;
            levels += 1;
        }
        assert_eq!(levels, depth);
        assert_eq!(node.span().row(), depth);
    }

    #[test]
    fn test_too_many_tabs() {
        let err = parse_err("a\n\t\tb\n");

        assert!(matches!(err, StringToTreeError::TooManyTabs { .. }));
        assert_snapshot!(err.to_string(), @"Too many tabs \t\tb test.tree#2:1/2");
    }

    #[test]
    fn test_too_few_tabs() {
        let err = parse_err("\ta\nb\n");

        assert!(matches!(err, StringToTreeError::TooFewTabs { .. }));
        assert_snapshot!(err.to_string(), @"Too few tabs b test.tree#2:1/0");
    }

    #[test]
    fn test_wrong_separator() {
        let err = parse_err("a  b\n");

        assert!(matches!(err, StringToTreeError::WrongSeparator { .. }));
        assert_eq!(err.span().unwrap().to_string(), "test.tree#1:3/1");
        assert_eq!(err.line(), Some("a  b"));

        let tabbed = parse_err("a\tb\n");
        assert_eq!(tabbed.span().unwrap().to_string(), "test.tree#1:2/1");

        let leading = parse_err(" a\n");
        assert_eq!(leading.span().unwrap().to_string(), "test.tree#1:1/1");
    }

    #[test]
    fn test_unexpected_eof() {
        let err = parse_err("a b");

        assert!(matches!(err, StringToTreeError::UnexpectedEof { .. }));
        assert_snapshot!(err.to_string(), @"Unexpected EOF, LF required a b test.tree#1:4/1");

        let dedented = parse_err("\ta\nb");
        assert!(matches!(dedented, StringToTreeError::UnexpectedEof { .. }));
    }
}
