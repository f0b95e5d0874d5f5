use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

pub fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Elements whose start tag implicitly closes an open element of the same name.
fn closes_same_name(name: &str) -> bool {
    matches!(name, "option" | "li" | "p")
}

/// Build a document tree. All ids are left at `Id(0)`; the owning `Document` assigns them.
pub fn build_dom(tokens: &[Token]) -> Node {
    let mut doctype = None;
    let children = build_nodes(tokens, &mut doctype);
    Node::Document {
        id: Id(0),
        doctype,
        children,
    }
}

/// Parse a markup fragment as the children of some element (`innerHTML` semantics).
pub fn parse_fragment(markup: &str) -> Vec<Node> {
    let mut ignored = None;
    build_nodes(&tokenize(markup), &mut ignored)
}

fn build_nodes(tokens: &[Token], doctype: &mut Option<String>) -> Vec<Node> {
    let mut roots: Vec<Node> = Vec::new();
    let mut open: Vec<Node> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if doctype.is_none() {
                    *doctype = Some(s.clone());
                }
            }
            Token::Comment(text) => append(
                &mut open,
                &mut roots,
                Node::Comment {
                    id: Id(0),
                    text: text.clone(),
                },
            ),
            Token::Text(text) => {
                if !text.is_empty() {
                    append(
                        &mut open,
                        &mut roots,
                        Node::Text {
                            id: Id(0),
                            text: text.clone(),
                        },
                    );
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if closes_same_name(name) && open.last().is_some_and(|n| n.is_element_named(name))
                {
                    close_top(&mut open, &mut roots);
                }

                let style = attributes
                    .iter()
                    .find(|(k, _)| k == "style")
                    .and_then(|(_, v)| v.as_deref())
                    .map(parse_declarations)
                    .unwrap_or_default();
                let element = Node::Element {
                    id: Id(0),
                    name: name.clone(),
                    attributes: attributes.clone(),
                    style,
                    children: Vec::new(),
                };

                if *self_closing || is_void_element(name) {
                    append(&mut open, &mut roots, element);
                } else {
                    open.push(element);
                }
            }
            Token::EndTag(name) => {
                // Unmatched end tags are dropped.
                if open.iter().any(|n| n.is_element_named(name)) {
                    while let Some(top) = open.last() {
                        let matched = top.is_element_named(name);
                        close_top(&mut open, &mut roots);
                        if matched {
                            break;
                        }
                    }
                }
            }
        }
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }
    roots
}

fn append(open: &mut [Node], roots: &mut Vec<Node>, node: Node) {
    match open.last_mut().and_then(Node::children_mut) {
        Some(children) => children.push(node),
        None => roots.push(node),
    }
}

fn close_top(open: &mut Vec<Node>, roots: &mut Vec<Node>) {
    if let Some(node) = open.pop() {
        append(open, roots, node);
    }
}

/// Parse `color: red; display: none` into ordered (property, value) pairs.
pub fn parse_declarations(input: &str) -> Vec<(String, String)> {
    split_declarations(input)
        .into_iter()
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, v.trim().to_string()))
        })
        .collect()
}

/// Split on `;` outside quotes and parentheses, so `url('data:…;base64,…')` stays whole.
fn split_declarations(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}
