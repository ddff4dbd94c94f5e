//! Node arena and native mutation primitives.
//!
//! Every primitive here works on `NodeId`s and performs exactly one native
//! mutation. Handles in `node.rs` borrow the arena, call one primitive, and
//! release the borrow before returning.

use indexmap::IndexMap;

use crate::DomError;
use crate::event::ListenerStore;
use crate::utils::{is_valid_attribute_name, is_valid_class_token};

/// Index of a node in its document's arena.
///
/// Ids are never reused: detached nodes keep their slot and can be
/// reinserted later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Id for arena slot `index`. The arena is capped at `u32::MAX` slots.
    pub(crate) fn from_index(index: usize) -> Self {
        match u32::try_from(index) {
            Ok(raw) => NodeId(raw),
            Err(_) => Dom::arena_exhausted(index),
        }
    }

    /// Raw index for debugging.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// The document node. Always slot zero.
pub(crate) const ROOT: NodeId = NodeId(0);

#[derive(Debug)]
pub(crate) enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
pub(crate) struct ElementData {
    /// ASCII-lowercased tag name.
    pub(crate) tag: String,
    /// Attributes in insertion order. `class` doubles as the class list.
    pub(crate) attrs: IndexMap<String, String>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: IndexMap::new(),
        }
    }

    /// Class list as an ordered set.
    pub(crate) fn class_tokens(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        let Some(value) = self.attrs.get("class") else {
            return tokens;
        };
        for token in value.split_ascii_whitespace() {
            if !tokens.iter().any(|t| t == token) {
                tokens.push(token.to_owned());
            }
        }
        tokens
    }

    pub(crate) fn has_class(&self, name: &str) -> bool {
        self.attrs
            .get("class")
            .is_some_and(|value| value.split_ascii_whitespace().any(|t| t == name))
    }

    fn set_class_tokens(&mut self, tokens: &[String]) {
        if tokens.is_empty() {
            self.attrs.shift_remove("class");
        } else {
            self.attrs.insert("class".to_owned(), tokens.join(" "));
        }
    }
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) kind: NodeKind,
}

/// Where to place a node relative to an anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Position {
    FirstChild,
    LastChild,
    Before(NodeId),
    After(NodeId),
}

/// Arena holding every node of one document, attached or not.
#[derive(Debug)]
pub(crate) struct Dom {
    nodes: Vec<NodeData>,
    pub(crate) listeners: ListenerStore,
}

impl Dom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            listeners: ListenerStore::default(),
        }
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeData {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    pub(crate) fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(NodeKind::Element(ElementData::new(tag)))
    }

    pub(crate) fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeKind::Text(text.to_owned()))
    }

    pub(crate) fn nodes_slot(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    pub(crate) fn nodes_slot_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.index())
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        self.ensure_node(id)
    }

    pub(crate) fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id).kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> &mut ElementData {
        match &mut self.ensure_node_mut(id).kind {
            NodeKind::Element(element) => element,
            _ => Self::not_an_element(id),
        }
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub(crate) fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Is `ancestor` equal to `id` or one of its ancestors?
    pub(crate) fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(ROOT, id)
    }

    fn sibling_element(&self, id: NodeId, step: isize) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let mut pos = siblings.iter().position(|s| *s == id)? as isize;
        loop {
            pos += step;
            if pos < 0 {
                return None;
            }
            let candidate = *siblings.get(pos as usize)?;
            if self.is_element(candidate) {
                return Some(candidate);
            }
        }
    }

    pub(crate) fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_element(id, -1)
    }

    pub(crate) fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_element(id, 1)
    }

    /// Pre-order walk of the elements below `id`, excluding `id` itself.
    pub(crate) fn collect_descendant_elements(&self, id: NodeId, out: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            if self.is_element(child) {
                out.push(child);
            }
            self.collect_descendant_elements(child, out);
        }
    }

    pub(crate) fn text_content(&self, id: NodeId) -> String {
        match &self.node(id).kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Document | NodeKind::Element(_) => {
                let mut out = String::new();
                for &child in self.children(id) {
                    out.push_str(&self.text_content(child));
                }
                out
            }
        }
    }

    pub(crate) fn set_text_content(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(value) = &mut self.ensure_node_mut(id).kind {
            *value = text.to_owned();
            return;
        }
        for child in std::mem::take(&mut self.ensure_node_mut(id).children) {
            self.ensure_node_mut(child).parent = None;
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.ensure_node_mut(node).parent = Some(id);
            self.ensure_node_mut(id).children.push(node);
        }
    }

    // ------------------------------------------------------------------
    // Tree insertion
    // ------------------------------------------------------------------

    /// Unlink `id` from its parent, if any.
    pub(crate) fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.ensure_node_mut(parent).children.retain(|c| *c != id);
        self.ensure_node_mut(id).parent = None;
    }

    fn ensure_pre_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if matches!(self.node(parent).kind, NodeKind::Text(_)) {
            return Err(DomError::HierarchyRequest("text nodes cannot have children"));
        }
        if matches!(self.node(child).kind, NodeKind::Document) {
            return Err(DomError::HierarchyRequest("the document cannot be inserted"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest(
                "a node cannot be inserted into itself or its descendants",
            ));
        }
        Ok(())
    }

    /// Insert `child` under `parent` at `position`, moving it if attached.
    ///
    /// Sibling anchors must be children of `parent`.
    pub(crate) fn insert(
        &mut self,
        parent: NodeId,
        child: NodeId,
        position: Position,
    ) -> Result<(), DomError> {
        self.ensure_pre_insert(parent, child)?;
        if let Position::Before(anchor) | Position::After(anchor) = position {
            if anchor == child {
                return Ok(());
            }
        }

        self.detach(child);
        let siblings = &self.ensure_node(parent).children;
        let index = match position {
            Position::FirstChild => 0,
            Position::LastChild => siblings.len(),
            Position::Before(anchor) => self.ensure_child_index(parent, anchor),
            Position::After(anchor) => self.ensure_child_index(parent, anchor) + 1,
        };
        self.ensure_node_mut(parent).children.insert(index, child);
        self.ensure_node_mut(child).parent = Some(parent);
        Ok(())
    }

    /// Insert `node` as the previous sibling of `target`. No-op when detached.
    pub(crate) fn insert_before(&mut self, target: NodeId, node: NodeId) -> Result<(), DomError> {
        match self.parent(target) {
            Some(parent) => self.insert(parent, node, Position::Before(target)),
            None => Ok(()),
        }
    }

    /// Insert `node` as the next sibling of `target`. No-op when detached.
    pub(crate) fn insert_after(&mut self, target: NodeId, node: NodeId) -> Result<(), DomError> {
        match self.parent(target) {
            Some(parent) => self.insert(parent, node, Position::After(target)),
            None => Ok(()),
        }
    }

    // ------------------------------------------------------------------
    // Class list
    // ------------------------------------------------------------------

    pub(crate) fn add_class(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        ensure_class_token(name)?;
        let element = self.element_mut(id);
        let mut tokens = element.class_tokens();
        if !tokens.iter().any(|t| t == name) {
            tokens.push(name.to_owned());
        }
        element.set_class_tokens(&tokens);
        Ok(())
    }

    pub(crate) fn remove_class(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        ensure_class_token(name)?;
        let element = self.element_mut(id);
        if element.attrs.contains_key("class") {
            let mut tokens = element.class_tokens();
            tokens.retain(|t| t != name);
            element.set_class_tokens(&tokens);
        }
        Ok(())
    }

    /// Returns whether the class is present afterwards.
    pub(crate) fn toggle_class(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        ensure_class_token(name)?;
        if self.element_mut(id).has_class(name) {
            self.remove_class(id, name)?;
            Ok(false)
        } else {
            self.add_class(id, name)?;
            Ok(true)
        }
    }

    /// Replace `old` with `new` in place. No-op returning `false` when `old` is absent.
    pub(crate) fn replace_class(
        &mut self,
        id: NodeId,
        old: &str,
        new: &str,
    ) -> Result<bool, DomError> {
        ensure_class_token(old)?;
        ensure_class_token(new)?;
        let element = self.element_mut(id);
        let mut tokens = element.class_tokens();
        let Some(pos) = tokens.iter().position(|t| t == old) else {
            return Ok(false);
        };
        if tokens.iter().any(|t| t == new) {
            tokens.remove(pos);
        } else {
            tokens[pos] = new.to_owned();
        }
        element.set_class_tokens(&tokens);
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub(crate) fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let name = ensure_attribute_name(name)?;
        self.element_mut(id).attrs.insert(name, value.to_owned());
        Ok(())
    }

    pub(crate) fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let name = ensure_attribute_name(name)?;
        self.element_mut(id).attrs.shift_remove(&name);
        Ok(())
    }

    /// Returns whether the attribute is present afterwards.
    pub(crate) fn toggle_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        let name = ensure_attribute_name(name)?;
        let attrs = &mut self.element_mut(id).attrs;
        if attrs.shift_remove(&name).is_some() {
            Ok(false)
        } else {
            attrs.insert(name, String::new());
            Ok(true)
        }
    }
}

fn ensure_class_token(name: &str) -> Result<(), DomError> {
    if is_valid_class_token(name) {
        Ok(())
    } else {
        Err(DomError::InvalidToken(name.to_owned()))
    }
}

fn ensure_attribute_name(name: &str) -> Result<String, DomError> {
    if is_valid_attribute_name(name) {
        Ok(name.to_ascii_lowercase())
    } else {
        Err(DomError::InvalidName(name.to_owned()))
    }
}
