use serde::Serialize;

/// Marker that ends a line's meaningful content when it starts a word.
const COMMENT: char = '!';

/// Banner emitted by `show running-config`; never part of the configuration.
const BANNER: &str = "Current Configuration ...";

/// One directive and its indented body.
///
/// `line` is the 1-based source line and is never consulted when matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseNode {
    /// Whitespace-separated tokens of the directive.
    pub words: Vec<String>,
    /// Directives indented under this one, in input order.
    pub children: Vec<ParseNode>,
    /// 1-based source line (0 for synthetic nodes).
    pub line: usize,
}

impl ParseNode {
    /// Build a synthetic node with no children.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            children: Vec::new(),
            line: 0,
        }
    }

    /// Attach children (builder pattern).
    pub fn with_children(mut self, children: Vec<ParseNode>) -> Self {
        self.children = children;
        self
    }

    /// Set the source line (builder pattern).
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// An open node together with the indentation of the line that opened it.
#[derive(Debug)]
struct Open {
    indent: usize,
    node: ParseNode,
}

/// Incremental indentation lexer.
///
/// The stack holds the chain of currently open ancestors, outermost first.
/// An empty stack is the synthetic root, whose indentation sits below every
/// real line. A node is attached to its parent only when it is closed, so the
/// finished tree never needs parent links.
#[derive(Debug, Default)]
pub struct Lexer {
    stack: Vec<Open>,
    line: usize,
}

impl Lexer {
    /// Create a lexer positioned before the first line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far, blank and comment lines included.
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Feed one raw line.
    ///
    /// Returns the previous top-level section once this line shows it is
    /// complete, i.e. when the line sits at the top level itself.
    pub fn push_line(&mut self, raw: &str) -> Option<ParseNode> {
        self.line += 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let content = strip_comment(raw);
        if content.trim_matches([' ', '\t']).is_empty() || content == BANNER {
            return None;
        }

        let indent = content
            .bytes()
            .take_while(|b| matches!(b, b' ' | b'\t'))
            .count();
        let words: Vec<String> = content
            .split([' ', '\t'])
            .filter(|w| !w.is_empty())
            .map(str::to_owned)
            .collect();
        tracing::trace!(line = self.line, indent, ?words, "lexed line");

        let mut completed = None;
        while self.stack.last().is_some_and(|open| open.indent >= indent) {
            completed = self.close_innermost();
        }
        self.stack.push(Open {
            indent,
            node: ParseNode {
                words,
                children: Vec::new(),
                line: self.line,
            },
        });
        completed
    }

    /// Close every open node and return the final top-level section, if any.
    pub fn finish(mut self) -> Option<ParseNode> {
        let mut completed = None;
        while !self.stack.is_empty() {
            completed = self.close_innermost();
        }
        completed
    }

    /// Pop the innermost open node. Returns it only if it was top-level;
    /// otherwise it is appended to its parent.
    fn close_innermost(&mut self) -> Option<ParseNode> {
        let open = self.stack.pop()?;
        match self.stack.last_mut() {
            Some(parent) => {
                parent.node.children.push(open.node);
                None
            }
            None => Some(open.node),
        }
    }
}

/// Lex a complete document into a forest of top-level sections.
pub fn lex<I, S>(lines: I) -> Vec<ParseNode>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut lexer = Lexer::new();
    let mut forest: Vec<ParseNode> = lines
        .into_iter()
        .filter_map(|line| lexer.push_line(line.as_ref()))
        .collect();
    forest.extend(lexer.finish());
    forest
}

/// Remove a trailing comment.
///
/// `!` only starts a comment at the beginning of the line or directly after
/// a space or tab, so `pass!word` survives intact.
fn strip_comment(line: &str) -> &str {
    let mut prev: Option<char> = None;
    for (i, c) in line.char_indices() {
        if c == COMMENT && matches!(prev, None | Some(' ' | '\t')) {
            return &line[..i];
        }
        prev = Some(c);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(node: &ParseNode) -> String {
        node.words.join(" ")
    }

    #[test]
    fn nests_by_indentation() {
        let forest = lex([
            "interface GigabitEthernet 0/1",
            " no shutdown",
            " port-channel-protocol LACP",
            "  port-channel 1 mode active",
            " mtu 9000",
            "hostname sw1",
        ]);
        assert_eq!(forest.len(), 2);
        let iface = &forest[0];
        assert_eq!(words(iface), "interface GigabitEthernet 0/1");
        assert_eq!(iface.line, 1);
        assert_eq!(iface.children.len(), 3);
        assert_eq!(words(&iface.children[1]), "port-channel-protocol LACP");
        assert_eq!(
            words(&iface.children[1].children[0]),
            "port-channel 1 mode active"
        );
        assert_eq!(iface.children[1].children[0].line, 4);
        assert_eq!(words(&iface.children[2]), "mtu 9000");
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn dedent_closes_several_levels() {
        let forest = lex(["a", " b", "  c", "   d", " e"]);
        assert_eq!(forest.len(), 1);
        let a = &forest[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(words(&a.children[0].children[0].children[0]), "d");
        assert_eq!(words(&a.children[1]), "e");
    }

    #[test]
    fn uneven_dedent_attaches_to_nearest_shallower_ancestor() {
        // "c" is deeper than "a" but shallower than "b", so it becomes a's child.
        let forest = lex(["a", "    b", "  c"]);
        assert_eq!(forest[0].children.len(), 2);
        assert_eq!(words(&forest[0].children[1]), "c");
    }

    #[test]
    fn tabs_and_spaces_count_one_unit_each() {
        let forest = lex(["a", "\tb", " c"]);
        // Both children have indentation 1 and are siblings.
        assert_eq!(forest[0].children.len(), 2);
    }

    #[test]
    fn comment_after_whitespace_is_stripped() {
        let forest = lex(["interface GigabitEthernet 0/1 ! comment"]);
        assert_eq!(
            forest[0].words,
            ["interface", "GigabitEthernet", "0/1"]
        );
    }

    #[test]
    fn embedded_bang_is_kept() {
        let forest = lex(["username admin password 7 pass!word"]);
        assert_eq!(forest[0].words[4], "pass!word");
    }

    #[test]
    fn comment_and_blank_lines_are_dropped() {
        let forest = lex(["!", "", "   ", "\t", "! full-line comment", "end"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].line, 6);
    }

    #[test]
    fn banner_is_dropped() {
        let forest = lex(["Current Configuration ...", "end"]);
        assert_eq!(forest.len(), 1);
        assert_eq!(words(&forest[0]), "end");
    }

    #[test]
    fn crlf_is_tolerated() {
        let forest = lex(["hostname sw1\r", " description x\r"]);
        assert_eq!(forest[0].words, ["hostname", "sw1"]);
        assert_eq!(forest[0].children[0].words, ["description", "x"]);
    }

    #[test]
    fn empty_input_yields_empty_forest() {
        assert!(lex(Vec::<String>::new()).is_empty());
        assert!(lex(["!", ""]).is_empty());
    }

    #[test]
    fn push_line_reports_completed_sections() {
        let mut lexer = Lexer::new();
        assert!(lexer.push_line("interface Vlan 1").is_none());
        assert!(lexer.push_line(" no shutdown").is_none());
        let done = lexer.push_line("end").unwrap();
        assert_eq!(words(&done), "interface Vlan 1");
        assert_eq!(done.children.len(), 1);
        assert_eq!(lexer.lines_read(), 3);
        assert_eq!(words(&lexer.finish().unwrap()), "end");
    }

    #[test]
    fn serialized_tree_has_no_parent_links() {
        let forest = lex(["a", " b"]);
        let json = serde_json::to_value(&forest).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "words": ["a"], "children": [
                    { "words": ["b"], "children": [], "line": 2 }
                ], "line": 1 }
            ])
        );
    }
}
