use crate::dom_builder::is_void_element;
use crate::entities::{escape_attr, escape_text};
use crate::{Id, Node};

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    match node {
        Node::Document { children, .. } | Node::Element { children, .. } => {
            for c in children {
                if let Some(found) = find_node_by_id_mut(c, id) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

/// The sibling list that directly contains `child`.
pub fn siblings_of_mut(node: &mut Node, child: Id) -> Option<&mut Vec<Node>> {
    let children = node.children_mut()?;
    if children.iter().any(|c| c.id() == child) {
        return Some(children);
    }
    for c in children.iter_mut() {
        if let Some(found) = siblings_of_mut(c, child) {
            return Some(found);
        }
    }
    None
}

/// First element (document order) whose `id` attribute equals `dom_id`.
pub fn find_element_by_dom_id<'a>(node: &'a Node, dom_id: &str) -> Option<&'a Node> {
    if node.element_id() == Some(dom_id) {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_element_by_dom_id(c, dom_id))
}

/// Concatenated text of all descendant text nodes (`textContent`).
pub fn collect_text(nodes: &[Node], out: &mut String) {
    for n in nodes {
        match n {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } | Node::Document { children, .. } => {
                collect_text(children, out);
            }
            Node::Comment { .. } => {}
        }
    }
}

pub fn is_descendant(ancestor: &Node, id: Id) -> bool {
    ancestor
        .children()
        .iter()
        .any(|c| c.id() == id || is_descendant(c, id))
}

/// Serialize nodes back to markup.
pub fn write_html(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                if let Some(dt) = doctype {
                    out.push_str(&format!("<!DOCTYPE {dt}>"));
                }
                write_html(children, out);
            }
            Node::Element {
                name,
                attributes,
                children,
                ..
            } => {
                out.push('<');
                out.push_str(name);
                for (k, v) in attributes {
                    out.push(' ');
                    out.push_str(k);
                    if let Some(v) = v {
                        out.push_str(&format!(r#"="{}""#, escape_attr(v)));
                    }
                }
                out.push('>');
                if is_void_element(name) {
                    continue;
                }
                if matches!(name.as_str(), "script" | "style") {
                    collect_text(children, out);
                } else {
                    write_html(children, out);
                }
                out.push_str(&format!("</{name}>"));
            }
            Node::Text { text, .. } => out.push_str(&escape_text(text)),
            Node::Comment { text, .. } => out.push_str(&format!("<!--{text}-->")),
        }
    }
}

pub fn first_styles(style: &[(String, String)]) -> String {
    style
        .iter()
        .take(3)
        .map(|(k, v)| format!(r#"{k}: {v};"#))
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per node, indented by depth; `cap` bounds the number of nodes visited.
pub fn outline_from_dom(root: &Node, cap: usize) -> Vec<String> {
    fn walk(node: &Node, depth: usize, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        let indent = "  ".repeat(depth);
        match node {
            Node::Document {
                doctype, children, ..
            } => {
                match doctype {
                    Some(dt) => out.push(format!("{indent}<!DOCTYPE {dt}>")),
                    None => out.push(format!("{indent}#document")),
                }
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Element {
                name,
                attributes,
                children,
                style,
                ..
            } => {
                let mut line = format!("{indent}<{name}");
                for key in ["id", "class", "src"] {
                    if let Some(v) = attributes
                        .iter()
                        .find(|(k, _)| k == key)
                        .and_then(|(_, v)| v.as_deref())
                        .filter(|v| !v.is_empty())
                    {
                        line.push_str(&format!(r#" {key}="{}""#, shorten(v, 60)));
                    }
                }
                line.push('>');
                let styl = first_styles(style);
                if !styl.is_empty() {
                    line.push_str(&format!("  /* {} */", shorten(&styl, 80)));
                }
                out.push(line);
                for c in children {
                    walk(c, depth + 1, out, left);
                }
            }
            Node::Text { text, .. } => {
                let t = text.replace('\n', " ").trim().to_string();
                if !t.is_empty() {
                    out.push(format!("{indent}\"{}\"", shorten(&t, 60)));
                }
            }
            Node::Comment { text, .. } => {
                let t = text.replace('\n', " ");
                out.push(format!("{indent}<!-- {} -->", shorten(t.trim(), 40)));
            }
        }
    }
    let mut out = Vec::new();
    let mut left = cap;
    walk(root, 0, &mut out, &mut left);
    out
}

fn shorten(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &s[..cut]),
        None => s.to_string(),
    }
}
