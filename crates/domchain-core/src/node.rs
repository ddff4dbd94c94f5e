//! Handles into the live tree.
//!
//! `Document`, `Node` and `Element` are cheap to clone and never hold a borrow
//! of the arena across calls. Each method borrows, runs one primitive, and
//! releases, so event handlers and iterators can interleave freely with
//! other mutations of the same document.

use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::rc::Rc;

use crate::dom::{Dom, NodeId, NodeKind, Position, ROOT};
use crate::event::{Event, Handler, ListenerId};
use crate::utils::{attribute_to_data_key, data_key_to_attribute};
use crate::{DomError, Result, serialize};

/// Shared handle to a live document tree.
///
/// Storage only grows. Every created node keeps its arena slot and its
/// listeners for the life of the document, including nodes that were
/// removed, so any handle can be reinserted later. Long-lived documents
/// that churn through many nodes should be replaced rather than reused.
#[derive(Clone)]
pub struct Document {
    dom: Rc<RefCell<Dom>>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            dom: Rc::new(RefCell::new(Dom::new())),
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&Dom) -> R) -> R {
        f(&self.dom.borrow())
    }

    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut Dom) -> R) -> R {
        f(&mut self.dom.borrow_mut())
    }

    /// Do both handles refer to the same tree?
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.dom, &other.dom)
    }

    /// The document node. Top-level parsed nodes are its children.
    pub fn root(&self) -> Node {
        self.node(ROOT)
    }

    pub(crate) fn node(&self, id: NodeId) -> Node {
        Node {
            doc: self.clone(),
            id,
        }
    }

    fn element(&self, id: NodeId) -> Element {
        Element {
            node: self.node(id),
        }
    }

    /// Create a detached element.
    pub fn create_element(&self, tag: &str) -> Element {
        let id = self.with_mut(|dom| dom.create_element(tag));
        self.element(id)
    }

    /// Create a detached text node.
    pub fn create_text(&self, text: &str) -> Node {
        let id = self.with_mut(|dom| dom.create_text(text));
        self.node(id)
    }

    /// Every attached element in document order.
    pub fn descendant_elements(&self) -> Vec<Element> {
        self.root().descendant_elements()
    }

    /// Serialize the whole tree.
    pub fn to_html(&self) -> String {
        self.with(|dom| serialize::inner_html(dom, ROOT))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Document").field(&self.to_html()).finish()
    }
}

/// Handle to any node: document, element, or text.
#[derive(Clone)]
pub struct Node {
    doc: Document,
    id: NodeId,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn is_element(&self) -> bool {
        self.doc.with(|dom| dom.is_element(self.id))
    }

    pub fn is_text(&self) -> bool {
        self.doc
            .with(|dom| matches!(dom.node(self.id).kind, NodeKind::Text(_)))
    }

    /// View this node as an element, if it is one.
    pub fn as_element(&self) -> Option<Element> {
        self.is_element().then(|| Element { node: self.clone() })
    }

    pub fn parent(&self) -> Option<Node> {
        let parent = self.doc.with(|dom| dom.parent(self.id))?;
        Some(self.doc.node(parent))
    }

    /// Parent if it is an element (the document node is not).
    pub fn parent_element(&self) -> Option<Element> {
        self.parent()?.as_element()
    }

    pub fn children(&self) -> Vec<Node> {
        self.doc.with(|dom| {
            dom.children(self.id)
                .iter()
                .map(|&id| self.doc.node(id))
                .collect()
        })
    }

    pub fn element_children(&self) -> Vec<Element> {
        self.doc.with(|dom| {
            dom.children(self.id)
                .iter()
                .filter(|&&id| dom.is_element(id))
                .map(|&id| self.doc.element(id))
                .collect()
        })
    }

    pub fn previous_element_sibling(&self) -> Option<Element> {
        let id = self.doc.with(|dom| dom.previous_element_sibling(self.id))?;
        Some(self.doc.element(id))
    }

    pub fn next_element_sibling(&self) -> Option<Element> {
        let id = self.doc.with(|dom| dom.next_element_sibling(self.id))?;
        Some(self.doc.element(id))
    }

    /// Elements below this node in document order.
    pub fn descendant_elements(&self) -> Vec<Element> {
        let mut ids = Vec::new();
        self.doc
            .with(|dom| dom.collect_descendant_elements(self.id, &mut ids));
        ids.into_iter().map(|id| self.doc.element(id)).collect()
    }

    /// Is this node reachable from the document node?
    pub fn is_connected(&self) -> bool {
        self.doc.with(|dom| dom.is_connected(self.id))
    }

    /// Is `other` this node or one of its descendants?
    pub fn contains(&self, other: &Node) -> bool {
        self.doc.ptr_eq(&other.doc)
            && self.doc.with(|dom| dom.is_inclusive_ancestor(self.id, other.id))
    }

    pub fn text_content(&self) -> String {
        self.doc.with(|dom| dom.text_content(self.id))
    }

    /// Replace all children with a single text node (or the text itself, for text nodes).
    pub fn set_text_content(&self, text: &str) {
        self.doc.with_mut(|dom| dom.set_text_content(self.id, text));
    }

    fn ensure_same_document(&self, other: &Node) -> Result<()> {
        if self.doc.ptr_eq(&other.doc) {
            Ok(())
        } else {
            Err(DomError::WrongDocument)
        }
    }

    /// Insert `node` as the last child, moving it if already attached.
    pub fn append(&self, node: &Node) -> Result<()> {
        self.ensure_same_document(node)?;
        self.doc
            .with_mut(|dom| dom.insert(self.id, node.id, Position::LastChild))
    }

    /// Insert `node` as the first child, moving it if already attached.
    pub fn prepend(&self, node: &Node) -> Result<()> {
        self.ensure_same_document(node)?;
        self.doc
            .with_mut(|dom| dom.insert(self.id, node.id, Position::FirstChild))
    }

    /// Insert `node` as the immediately preceding sibling. No-op when detached.
    pub fn before(&self, node: &Node) -> Result<()> {
        self.ensure_same_document(node)?;
        self.doc.with_mut(|dom| dom.insert_before(self.id, node.id))
    }

    /// Insert `node` as the immediately following sibling. No-op when detached.
    pub fn after(&self, node: &Node) -> Result<()> {
        self.ensure_same_document(node)?;
        self.doc.with_mut(|dom| dom.insert_after(self.id, node.id))
    }

    /// Detach from the parent. No-op when already detached.
    pub fn remove(&self) {
        self.doc.with_mut(|dom| dom.detach(self.id));
    }

    /// Register `handler` for every future `event` on this node.
    pub fn on(&self, event: &str, handler: Handler) -> ListenerId {
        self.doc
            .with_mut(|dom| dom.listeners.add(self.id, event, handler, false))
    }

    /// Register `handler` for the first future `event` only.
    pub fn once(&self, event: &str, handler: Handler) -> ListenerId {
        self.doc
            .with_mut(|dom| dom.listeners.add(self.id, event, handler, true))
    }

    /// Remove a registration. Returns whether it was still registered.
    pub fn off(&self, listener: ListenerId) -> bool {
        self.doc
            .with_mut(|dom| dom.listeners.remove(self.id, listener))
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.doc.with(|dom| dom.listeners.count(self.id, event))
    }

    /// Fire `event_type` at this node, then bubble through its ancestors.
    ///
    /// Handlers run with the tree unborrowed.
    pub fn dispatch(&self, event_type: &str) -> Event {
        let event = Event::new(event_type, self.clone());
        let mut cursor = Some(self.clone());

        while let Some(current) = cursor {
            event.set_current_target(current.clone());
            let ids = self
                .doc
                .with(|dom| dom.listeners.snapshot(current.id, event_type));
            for id in ids {
                let handler = self
                    .doc
                    .with_mut(|dom| dom.listeners.claim(current.id, event_type, id));
                let Some(handler) = handler else {
                    continue;
                };
                handler(&event);
                if event.immediate_propagation_stopped() {
                    break;
                }
            }
            if event.propagation_stopped() {
                break;
            }
            cursor = current.parent();
        }

        event
    }

    pub fn outer_html(&self) -> String {
        self.doc.with(|dom| serialize::outer_html(dom, self.id))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.doc.ptr_eq(&other.doc)
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.doc.with(|dom| match &dom.node(self.id).kind {
            NodeKind::Document => write!(f, "#document"),
            NodeKind::Element(element) => write!(f, "<{}>#{}", element.tag, self.id.as_u32()),
            NodeKind::Text(text) => write!(f, "{text:?}#{}", self.id.as_u32()),
        })
    }
}

/// Handle to an element node.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Element {
    node: Node,
}

impl Deref for Element {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Node {
        element.node
    }
}

impl AsRef<Node> for Element {
    fn as_ref(&self) -> &Node {
        &self.node
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node.fmt(f)
    }
}

impl Element {
    pub fn as_node(&self) -> &Node {
        &self.node
    }

    fn with_data<R>(&self, f: impl FnOnce(&crate::dom::ElementData) -> R) -> R {
        self.doc.with(|dom| match dom.element(self.id) {
            Some(element) => f(element),
            None => Dom::not_an_element(self.id),
        })
    }

    /// Lowercase tag name.
    pub fn tag_name(&self) -> String {
        self.with_data(|e| e.tag.clone())
    }

    // ------------------------------------------------------------------
    // Class list
    // ------------------------------------------------------------------

    pub fn classes(&self) -> Vec<String> {
        self.with_data(|e| e.class_tokens())
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.with_data(|e| e.has_class(name))
    }

    pub fn add_class(&self, name: &str) -> Result<()> {
        self.doc.with_mut(|dom| dom.add_class(self.id, name))
    }

    pub fn remove_class(&self, name: &str) -> Result<()> {
        self.doc.with_mut(|dom| dom.remove_class(self.id, name))
    }

    /// Flip `name`. Returns whether it is present afterwards.
    pub fn toggle_class(&self, name: &str) -> Result<bool> {
        self.doc.with_mut(|dom| dom.toggle_class(self.id, name))
    }

    /// Replace `old` with `new`, keeping its position.
    ///
    /// No-op returning `false` when `old` is absent; `new` is never added
    /// on its own.
    pub fn replace_class(&self, old: &str, new: &str) -> Result<bool> {
        self.doc.with_mut(|dom| dom.replace_class(self.id, old, new))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attribute(&self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        self.with_data(|e| e.attrs.get(&name).cloned())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.with_data(|e| e.attrs.contains_key(&name))
    }

    /// All attributes in insertion order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        self.with_data(|e| {
            e.attrs
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<()> {
        self.doc
            .with_mut(|dom| dom.set_attribute(self.id, name, value))
    }

    pub fn remove_attribute(&self, name: &str) -> Result<()> {
        self.doc.with_mut(|dom| dom.remove_attribute(self.id, name))
    }

    /// Remove `name` if present, otherwise add it with an empty value.
    /// Returns whether it is present afterwards.
    pub fn toggle_attribute(&self, name: &str) -> Result<bool> {
        self.doc.with_mut(|dom| dom.toggle_attribute(self.id, name))
    }

    // ------------------------------------------------------------------
    // Custom data (`data-*` attributes)
    // ------------------------------------------------------------------

    pub fn data(&self, key: &str) -> Option<String> {
        self.attribute(&data_key_to_attribute(key)?)
    }

    pub fn set_data(&self, key: &str, value: &str) -> Result<()> {
        let name = data_key_to_attribute(key).ok_or_else(|| DomError::InvalidName(key.into()))?;
        self.set_attribute(&name, value)
    }

    pub fn remove_data(&self, key: &str) -> Result<()> {
        let name = data_key_to_attribute(key).ok_or_else(|| DomError::InvalidName(key.into()))?;
        self.remove_attribute(&name)
    }

    /// All custom data entries in attribute order.
    pub fn dataset(&self) -> Vec<(String, String)> {
        self.attributes()
            .into_iter()
            .filter_map(|(name, value)| Some((attribute_to_data_key(&name)?, value)))
            .collect()
    }

    pub fn inner_html(&self) -> String {
        self.doc.with(|dom| serialize::inner_html(dom, self.id))
    }
}
