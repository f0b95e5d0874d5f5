//! Mutable document handle the preview binders read from and write through.
//!
//! Every node carries a unique `Id`. Binders resolve element ids once (`get_element_by_id`)
//! and afterwards address nodes by `Id` only. Operations on unknown ids return `None`/`false`.
use crate::dom_builder::{build_dom, parse_declarations, parse_fragment};
use crate::dom_utils::{
    collect_text, find_element_by_dom_id, find_node_by_id, find_node_by_id_mut, is_descendant,
    outline_from_dom, siblings_of_mut, write_html,
};
use crate::selector::{Selector, select_all};
use crate::tokenizer::tokenize;
use crate::types::{Id, Node, NodeId};

#[derive(Clone, Debug)]
pub struct Document {
    root: Node,
    next_id: NodeId,
}

impl Document {
    pub fn parse(markup: &str) -> Self {
        Self::from_node(build_dom(&tokenize(markup)))
    }

    /// Adopt an existing tree; all ids are reassigned.
    pub fn from_node(mut root: Node) -> Self {
        let mut next_id = 1;
        assign_fresh_ids(&mut root, &mut next_id);
        Self { root, next_id }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> Id {
        self.root.id()
    }

    pub fn node(&self, id: Id) -> Option<&Node> {
        find_node_by_id(&self.root, id)
    }

    fn node_mut(&mut self, id: Id) -> Option<&mut Node> {
        find_node_by_id_mut(&mut self.root, id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.node(id).is_some()
    }

    pub fn get_element_by_id(&self, dom_id: &str) -> Option<Id> {
        find_element_by_dom_id(&self.root, dom_id).map(Node::id)
    }

    pub fn query_selector(&self, selector: &str) -> Option<Id> {
        self.query_selector_all(selector).into_iter().next()
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<Id> {
        self.query_selector_all_within(self.root.id(), selector)
    }

    /// Matches among the descendants of `scope`; ancestors above `scope` still count
    /// for descendant combinators.
    pub fn query_selector_all_within(&self, scope: Id, selector: &str) -> Vec<Id> {
        let Some(selector) = Selector::parse(selector) else {
            log::debug!(target: "html.document", "unsupported selector {selector:?}");
            return Vec::new();
        };
        select_all(&self.root, &selector)
            .into_iter()
            .map(Node::id)
            .filter(|id| scope == self.root.id() || self.is_descendant_of(*id, scope))
            .collect()
    }

    pub fn find_descendant(&self, scope: Id, selector: &str) -> Option<Id> {
        self.query_selector_all_within(scope, selector).into_iter().next()
    }

    pub fn is_descendant_of(&self, id: Id, ancestor: Id) -> bool {
        self.node(ancestor)
            .is_some_and(|ancestor| is_descendant(ancestor, id))
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        self.node(id).and_then(Node::tag_name)
    }

    pub fn children_of(&self, id: Id) -> Vec<Id> {
        self.node(id)
            .map(|n| n.children().iter().map(Node::id).collect())
            .unwrap_or_default()
    }

    /// Descendant elements of `id` with the given tag, in document order.
    pub fn descendants_named(&self, id: Id, tag: &str) -> Vec<Id> {
        fn walk(node: &Node, tag: &str, out: &mut Vec<Id>) {
            for c in node.children() {
                if c.is_element_named(tag) {
                    out.push(c.id());
                }
                walk(c, tag, out);
            }
        }
        let mut out = Vec::new();
        if let Some(node) = self.node(id) {
            walk(node, tag, &mut out);
        }
        out
    }

    pub fn attribute(&self, id: Id, name: &str) -> Option<&str> {
        self.node(id).and_then(|n| n.attr(name))
    }

    pub fn has_attribute(&self, id: Id, name: &str) -> bool {
        self.node(id).is_some_and(|n| n.has_attr(name))
    }

    pub fn set_attribute(&mut self, id: Id, name: &str, value: &str) -> bool {
        let Some(Node::Element {
            attributes, style, ..
        }) = self.node_mut(id)
        else {
            return false;
        };
        let name = name.to_ascii_lowercase();
        match attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((name.clone(), Some(value.to_string()))),
        }
        if name == "style" {
            *style = parse_declarations(value);
        }
        true
    }

    pub fn remove_attribute(&mut self, id: Id, name: &str) -> bool {
        let Some(Node::Element {
            attributes, style, ..
        }) = self.node_mut(id)
        else {
            return false;
        };
        let before = attributes.len();
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        if name.eq_ignore_ascii_case("style") {
            style.clear();
        }
        attributes.len() != before
    }

    pub fn text_content(&self, id: Id) -> Option<String> {
        match self.node(id)? {
            Node::Text { text, .. } | Node::Comment { text, .. } => Some(text.clone()),
            node => {
                let mut out = String::new();
                collect_text(node.children(), &mut out);
                Some(out)
            }
        }
    }

    /// Replace all children with a single literal text node. Markup in `text` stays text.
    pub fn set_text_content(&mut self, id: Id, text: &str) -> bool {
        let fresh = self.allocate_id();
        match self.node_mut(id) {
            Some(Node::Text { text: t, .. }) | Some(Node::Comment { text: t, .. }) => {
                *t = text.to_string();
                true
            }
            Some(node) => {
                let Some(children) = node.children_mut() else {
                    return false;
                };
                children.clear();
                if !text.is_empty() {
                    children.push(Node::Text {
                        id: fresh,
                        text: text.to_string(),
                    });
                }
                true
            }
            None => false,
        }
    }

    pub fn inner_html(&self, id: Id) -> Option<String> {
        let node = self.node(id)?;
        let mut out = String::new();
        write_html(node.children(), &mut out);
        Some(out)
    }

    /// Replace all children with the parsed `markup`. New nodes get fresh ids.
    pub fn set_inner_html(&mut self, id: Id, markup: &str) -> bool {
        if !matches!(
            self.node(id),
            Some(Node::Element { .. } | Node::Document { .. })
        ) {
            return false;
        }
        let mut nodes = parse_fragment(markup);
        for n in &mut nodes {
            assign_fresh_ids(n, &mut self.next_id);
        }
        match self.node_mut(id).and_then(Node::children_mut) {
            Some(children) => {
                *children = nodes;
                true
            }
            None => false,
        }
    }

    pub fn style_property(&self, id: Id, property: &str) -> Option<&str> {
        match self.node(id)? {
            Node::Element { style, .. } => style
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Set one inline declaration and re-serialize the `style` attribute.
    pub fn set_style_property(&mut self, id: Id, property: &str, value: &str) -> bool {
        let Some(Node::Element {
            attributes, style, ..
        }) = self.node_mut(id)
        else {
            return false;
        };
        let property = property.trim().to_ascii_lowercase();
        match style.iter_mut().find(|(k, _)| *k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => style.push((property, value.to_string())),
        }
        let serialized = serialize_declarations(style);
        match attributes.iter_mut().find(|(k, _)| k == "style") {
            Some((_, v)) => *v = Some(serialized),
            None => attributes.push(("style".to_string(), Some(serialized))),
        }
        true
    }

    /// Drop one inline declaration; the `style` attribute goes away with the last one.
    pub fn remove_style_property(&mut self, id: Id, property: &str) -> bool {
        let Some(Node::Element {
            attributes, style, ..
        }) = self.node_mut(id)
        else {
            return false;
        };
        let before = style.len();
        style.retain(|(k, _)| !k.eq_ignore_ascii_case(property.trim()));
        if style.len() == before {
            return false;
        }
        if style.is_empty() {
            return self.remove_attribute(id, "style");
        }
        let serialized = serialize_declarations(style);
        if let Some((_, v)) = attributes.iter_mut().find(|(k, _)| k == "style") {
            *v = Some(serialized);
        }
        true
    }

    /// A detached element; it receives its id when inserted.
    pub fn create_element(name: &str, attributes: &[(&str, &str)]) -> Node {
        let attributes: Vec<(String, Option<String>)> = attributes
            .iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), Some((*v).to_string())))
            .collect();
        let style = attributes
            .iter()
            .find(|(k, _)| k == "style")
            .and_then(|(_, v)| v.as_deref())
            .map(parse_declarations)
            .unwrap_or_default();
        Node::Element {
            id: Id(0),
            name: name.to_ascii_lowercase(),
            attributes,
            style,
            children: Vec::new(),
        }
    }

    pub fn append_child(&mut self, parent: Id, mut node: Node) -> Option<Id> {
        assign_fresh_ids(&mut node, &mut self.next_id);
        let new_id = node.id();
        let children = self.node_mut(parent)?.children_mut()?;
        children.push(node);
        Some(new_id)
    }

    /// Insert `node` as the next sibling of `reference`.
    pub fn insert_after(&mut self, reference: Id, mut node: Node) -> Option<Id> {
        assign_fresh_ids(&mut node, &mut self.next_id);
        let new_id = node.id();
        let siblings = siblings_of_mut(&mut self.root, reference)?;
        let pos = siblings.iter().position(|c| c.id() == reference)?;
        siblings.insert(pos + 1, node);
        Some(new_id)
    }

    pub fn outline(&self, cap: usize) -> Vec<String> {
        outline_from_dom(&self.root, cap)
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(std::slice::from_ref(&self.root), &mut out);
        out
    }

    fn allocate_id(&mut self) -> Id {
        let id = Id(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

fn assign_fresh_ids(node: &mut Node, next: &mut NodeId) {
    node.set_id(Id(*next));
    *next = next.wrapping_add(1);
    if let Some(children) = node.children_mut() {
        for c in children {
            assign_fresh_ids(c, next);
        }
    }
}

#[cfg(test)]
mod tests;

fn serialize_declarations(style: &[(String, String)]) -> String {
    style
        .iter()
        .map(|(k, v)| format!("{k}: {v};"))
        .collect::<Vec<_>>()
        .join(" ")
}
