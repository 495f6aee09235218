//! Line scanner for the flowchart DSL.
//!
//! Each line is scanned left to right for node tokens (`id`, optionally followed
//! by a bracketed shape) and connector tokens. Anything the scanner does not
//! recognize is skipped one character at a time, so malformed input degrades to
//! fewer nodes and edges rather than an error.

use std::collections::HashMap;

use super::ast::{Diagram, Direction, EdgeRecord, NodeRecord, ShapeKind};

/// Bracket forms, longest opener first so `((` wins over `(`.
const SHAPES: &[(&str, &str, ShapeKind)] = &[
    ("((", "))", ShapeKind::Ellipse),
    ("{{", "}}", ShapeKind::Hexagon),
    ("[[", "]]", ShapeKind::Rect),
    ("([", "])", ShapeKind::Circle),
    ("[", "]", ShapeKind::Rect),
    ("(", ")", ShapeKind::Circle),
    ("{", "}", ShapeKind::Diamond),
];

/// Statement keywords whose lines never declare nodes or edges.
const SKIPPED_KEYWORDS: &[&str] = &["style", "classDef", "class", "linkStyle", "click", "subgraph", "end", "direction"];

/// Parse flowchart text into a [`Diagram`].
///
/// Never fails: an input with no recognizable nodes yields an empty diagram,
/// which callers treat as a whole-diagram error (see [`crate::compile`]).
#[must_use]
pub fn parse(input: &str) -> Diagram {
    let mut builder = Builder::default();
    let mut direction = None;

    for raw in input.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with("%%") || line.starts_with("```") {
            continue;
        }

        let body = match strip_header(line) {
            Some((dir, rest)) => {
                if direction.is_none() {
                    direction = dir;
                }
                rest
            }
            None => line,
        };

        if SKIPPED_KEYWORDS.iter().any(|kw| strip_keyword(body, kw).is_some()) {
            tracing::trace!(line = body, "skipping keyword line");
            continue;
        }

        scan_statement(body, &mut builder);
    }

    let diagram = Diagram { nodes: builder.nodes, edges: builder.edges, direction: direction.unwrap_or_default() };
    tracing::debug!(
        nodes = diagram.nodes.len(),
        edges = diagram.edges.len(),
        direction = ?diagram.direction,
        "parsed flowchart"
    );
    diagram
}

// =============================================================================
// DIAGRAM BUILDER
// =============================================================================

#[derive(Default)]
struct Builder {
    nodes: Vec<NodeRecord>,
    index: HashMap<String, usize>,
    edges: Vec<EdgeRecord>,
}

impl Builder {
    /// Register an explicit declaration. A later declaration of the same id
    /// replaces shape and text but keeps the first-appearance slot.
    fn declare(&mut self, id: &str, kind: ShapeKind, text: String) {
        if let Some(&i) = self.index.get(id) {
            let node = &mut self.nodes[i];
            node.kind = kind;
            node.text = text;
        } else {
            self.index.insert(id.to_owned(), self.nodes.len());
            self.nodes.push(NodeRecord { id: id.to_owned(), text, kind });
        }
    }

    fn ensure(&mut self, id: &str) {
        if !self.index.contains_key(id) {
            self.index.insert(id.to_owned(), self.nodes.len());
            self.nodes.push(NodeRecord::implicit(id));
        }
    }

    fn connect(&mut self, from: &str, to: &str, link: Link) {
        self.ensure(from);
        self.ensure(to);
        self.edges.push(EdgeRecord::new(from, to, &link.connector, link.label));
    }
}

// =============================================================================
// STATEMENT SCANNER
// =============================================================================

struct Link {
    connector: String,
    label: Option<String>,
}

fn scan_statement(line: &str, builder: &mut Builder) {
    let mut cur = Cursor::new(line);
    let mut prev: Option<&str> = None;
    let mut pending: Option<Link> = None;

    loop {
        cur.skip_ws();
        if cur.at_end() {
            break;
        }

        if let Some(id) = cur.ident() {
            if let Some((kind, text)) = cur.shape() {
                let text = clean_text(text, id);
                builder.declare(id, kind, text);
            }
            if let (Some(from), Some(link)) = (prev, pending.take()) {
                builder.connect(from, id, link);
            }
            prev = Some(id);
            continue;
        }

        if let Some(mut link) = cur.connector() {
            cur.skip_ws();
            if let Some(label) = cur.pipe_label() {
                link.label = Some(label);
            }
            if let Some(from) = prev {
                builder.ensure(from);
                pending = Some(link);
            }
            continue;
        }

        if cur.peek() == Some(';') {
            prev = None;
            pending = None;
        }
        cur.bump();
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// Bracketed shape immediately after an id: `[text]`, `((text))`, ...
    /// An opener whose closer never appears falls through to shorter forms.
    fn shape(&mut self) -> Option<(ShapeKind, &'a str)> {
        let rest = self.rest();
        for &(open, close, kind) in SHAPES {
            if let Some(after) = rest.strip_prefix(open) {
                let Some(end) = after.find(close) else {
                    continue;
                };
                self.pos += open.len() + end + close.len();
                return Some((kind, &after[..end]));
            }
        }
        None
    }

    /// Connector token, including the inline `-- text -->` label form.
    fn connector(&mut self) -> Option<Link> {
        let rest = self.rest();
        let run = rest.bytes().take_while(|b| matches!(*b, b'-' | b'.' | b'=')).count();
        if run == 0 {
            return None;
        }
        let body = &rest[..run];
        let arrowed = rest[run..].starts_with('>');

        if !arrowed {
            if let Some(link) = self.inline_label(body) {
                return Some(link);
            }
        }

        if !valid_body(body, arrowed) {
            return None;
        }
        let len = run + usize::from(arrowed);
        self.pos += len;
        Some(Link { connector: rest[..len].to_owned(), label: None })
    }

    /// `--`, `-.` or `==` opener followed by label text and a matching closer.
    fn inline_label(&mut self, opener: &str) -> Option<Link> {
        let (closer_start, fill) = match opener {
            "--" => ("--", '-'),
            "==" => ("==", '='),
            "-." => (".-", '-'),
            _ => return None,
        };

        let after = &self.rest()[opener.len()..];
        let at = after.find(closer_start)?;
        let tail = &after[at + closer_start.len()..];
        let extra = tail.chars().take_while(|c| *c == fill).count();
        let arrowed = tail[extra..].starts_with('>');

        let solid_link = opener != "-." && extra == 0 && !arrowed;
        if solid_link {
            return None;
        }

        let connector = match (opener, arrowed) {
            ("-.", true) => "-.->",
            ("-.", false) => "-.-",
            ("==", true) => "==>",
            ("==", false) => "===",
            (_, true) => "-->",
            (_, false) => "---",
        };
        let label = clean_label(&after[..at]);
        self.pos += opener.len() + at + closer_start.len() + extra + usize::from(arrowed);
        Some(Link { connector: connector.to_owned(), label })
    }

    /// `|label|` directly after a connector.
    fn pipe_label(&mut self) -> Option<String> {
        let after = self.rest().strip_prefix('|')?;
        let end = after.find('|')?;
        self.pos += end + 2;
        clean_label(&after[..end])
    }
}

/// Whether a run of `-`, `.`, `=` forms a recognized connector body.
fn valid_body(body: &str, arrowed: bool) -> bool {
    let min = if arrowed { 2 } else { 3 };
    let all = |c: char| body.chars().all(|b| b == c);
    if body.len() >= min && (all('-') || all('=')) {
        return true;
    }
    body.len() >= 3
        && body.starts_with('-')
        && body.ends_with('-')
        && body[1..body.len() - 1].chars().all(|c| c == '.')
}

// =============================================================================
// TEXT HELPERS
// =============================================================================

fn clean_text(raw: &str, id: &str) -> String {
    let text = raw.replace('"', "");
    let text = text.trim();
    if text.is_empty() { id.to_owned() } else { text.to_owned() }
}

fn clean_label(raw: &str) -> Option<String> {
    let text = raw.replace('"', "");
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_owned()) }
}

/// Recognize a `graph` / `flowchart` header, returning the direction (if any)
/// and whatever follows it on the same line.
fn strip_header(line: &str) -> Option<(Option<Direction>, &str)> {
    let rest = strip_keyword(line, "graph").or_else(|| strip_keyword(line, "flowchart"))?;
    let token_len = rest.bytes().take_while(u8::is_ascii_alphabetic).count();
    match Direction::parse(&rest[..token_len]) {
        Some(dir) => Some((Some(dir), &rest[token_len..])),
        None => Some((None, rest)),
    }
}

/// Strip a keyword prefix (case-insensitive) and return the rest.
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let head = line.get(..keyword.len())?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Some(rest.trim());
    }
    None
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod parse_test;
