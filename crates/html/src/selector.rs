//! Minimal selector engine: compound selectors joined by descendant combinators.
//!
//! Supported: `tag`, `#id`, `.class`, `*`, `[attr]`, `[attr="v"]`, `[attr^="v"]`, and any
//! whitespace-separated chain of those (`form input[type="file"]`). Selector lists (`,`) and
//! the child/sibling combinators are not supported; parsing them yields `None`.
use crate::Node;

#[derive(Clone, Debug, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    // Outermost ancestor first; the last compound matches the subject element.
    chain: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Option<Selector> {
        let input = input.trim();
        if input.is_empty() || (input.contains([',', '>', '+', '~']) && !in_brackets_only(input)) {
            return None;
        }
        let chain = split_compounds(input)?
            .into_iter()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if chain.is_empty() {
            return None;
        }
        Some(Selector { chain })
    }

    /// `ancestors` is ordered root-first and excludes `node` itself.
    pub fn matches(&self, node: &Node, ancestors: &[&Node]) -> bool {
        let Some((subject, rest)) = self.chain.split_last() else {
            return false;
        };
        if !compound_matches(subject, node) {
            return false;
        }
        // Greedy right-to-left is exact for descendant-only chains.
        let mut remaining = rest.iter().rev().peekable();
        for ancestor in ancestors.iter().rev() {
            let Some(want) = remaining.peek() else {
                break;
            };
            if compound_matches(want, ancestor) {
                remaining.next();
            }
        }
        remaining.peek().is_none()
    }
}

/// Combinator characters inside `[...]` values are literal, not combinators.
fn in_brackets_only(input: &str) -> bool {
    let mut depth = 0usize;
    for ch in input.chars() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' | '>' | '+' | '~' if depth == 0 => return false,
            _ => {}
        }
    }
    true
}

fn split_compounds(input: &str) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start: Option<usize> = None;
    for (i, ch) in input.char_indices() {
        if let Some(q) = quote {
            if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' if depth > 0 => quote = Some(ch),
            '[' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ']' => depth = depth.checked_sub(1)?,
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    parts.push(&input[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if depth != 0 || quote.is_some() {
        return None;
    }
    if let Some(s) = start {
        parts.push(&input[s..]);
    }
    Some(parts)
}

fn parse_compound(s: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = s;

    let tag_len = rest
        .find(|c: char| matches!(c, '#' | '.' | '['))
        .unwrap_or(rest.len());
    let tag = &rest[..tag_len];
    if !tag.is_empty() && tag != "*" {
        if !tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        compound.tag = Some(tag.to_ascii_lowercase());
    }
    rest = &rest[tag_len..];

    while let Some(first) = rest.chars().next() {
        match first {
            '#' | '.' => {
                let body = &rest[1..];
                let len = body
                    .find(|c: char| matches!(c, '#' | '.' | '['))
                    .unwrap_or(body.len());
                let name = &body[..len];
                if name.is_empty() {
                    return None;
                }
                if first == '#' {
                    compound.id = Some(name.to_string());
                } else {
                    compound.classes.push(name.to_string());
                }
                rest = &body[len..];
            }
            '[' => {
                let close = find_attr_close(rest)?;
                compound.attrs.push(parse_attr_match(&rest[1..close])?);
                rest = &rest[close + 1..];
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn find_attr_close(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, ch) in s.char_indices().skip(1) {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, ']') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_attr_match(body: &str) -> Option<AttrMatch> {
    let unquote = |v: &str| {
        let v = v.trim();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_string()
    };

    if let Some((name, value)) = body.split_once("^=") {
        return Some(AttrMatch {
            name: name.trim().to_ascii_lowercase(),
            op: AttrOp::Prefix(unquote(value)),
        });
    }
    if let Some((name, value)) = body.split_once('=') {
        return Some(AttrMatch {
            name: name.trim().to_ascii_lowercase(),
            op: AttrOp::Equals(unquote(value)),
        });
    }
    let name = body.trim();
    if name.is_empty() {
        return None;
    }
    Some(AttrMatch {
        name: name.to_ascii_lowercase(),
        op: AttrOp::Exists,
    })
}

fn compound_matches(compound: &Compound, node: &Node) -> bool {
    let Some(name) = node.tag_name() else {
        return false;
    };
    if let Some(tag) = &compound.tag {
        if !name.eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if node.attr("id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.iter().all(|c| node.has_class(c)) {
        return false;
    }
    compound.attrs.iter().all(|m| match (&m.op, node.attr(&m.name)) {
        (_, None) => false,
        (AttrOp::Exists, Some(_)) => true,
        (AttrOp::Equals(want), Some(v)) => v == want.as_str(),
        (AttrOp::Prefix(want), Some(v)) => v.starts_with(want.as_str()),
    })
}

/// Every element under `root` (excluding `root`) matching `selector`, in document order.
pub fn select_all<'a>(root: &'a Node, selector: &Selector) -> Vec<&'a Node> {
    fn walk<'a>(
        node: &'a Node,
        selector: &Selector,
        ancestors: &mut Vec<&'a Node>,
        out: &mut Vec<&'a Node>,
    ) {
        for child in node.children() {
            if selector.matches(child, ancestors) {
                out.push(child);
            }
            ancestors.push(child);
            walk(child, selector, ancestors, out);
            ancestors.pop();
        }
    }

    let mut out = Vec::new();
    let mut ancestors = vec![root];
    walk(root, selector, &mut ancestors, &mut out);
    out
}
