/* Copyright (c) 2022 Jeremy Davis (jeremydavis519@gmail.com)
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy of this software
 * and associated documentation files (the "Software"), to deal in the Software without restriction,
 * including without limitation the rights to use, copy, modify, merge, publish, distribute,
 * sublicense, and/or sell copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all copies or
 * substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT
 * NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
 * NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
 * DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.
 */

//! This module defines all the types necessary to describe a node tree, as defined by the DOM
//! standard, plus the single mutation engine (<https://dom.spec.whatwg.org/#concept-node-insert>)
//! that every structural change in this crate routes through.
//!
//! Every node in a tree is one [`Node`], a cheap `Clone`-able handle around a shared, reference-
//! counted [`NodeData`]. `NodeData` holds the four structural links (parent, previous/next
//! sibling, first/last child) plus a [`NodeKind`] carrying the type-specific payload. Parent and
//! previous-sibling links are `Weak`; first-child and next-sibling links are strong `Rc`s, so a
//! node's subtree is kept alive by its parent and the tree can never form a reference cycle. This
//! gives O(1) `firstChild`/`lastChild`/`nextSibling`/`previousSibling`, as the standard requires,
//! rather than an O(n) scan of the parent's child list.

mod attr;
mod cdata_section;
mod character_data;
mod comment;
mod document;
mod document_fragment;
mod document_type;
mod element;
mod html_collection;
mod named_node_map;
mod node_list;
mod dom_token_list;
mod processing_instruction;
mod text;

pub use self::{
    attr::Attr,
    cdata_section::CdataSection,
    character_data::CharacterData,
    comment::Comment,
    document::Document,
    document_fragment::{DocumentFragment, ShadowRoot, ShadowRootMode, SlotAssignmentMode},
    document_type::DocumentType,
    element::{ElementMatcher, Element, ShadowRootInit},
    html_collection::HtmlCollection,
    named_node_map::NamedNodeMap,
    node_list::NodeList,
    dom_token_list::DomTokenList,
    processing_instruction::ProcessingInstruction,
    text::Text,
};

/// An argument to the `ChildNode`/`ParentNode` mixin convenience methods (`before`, `after`,
/// `replaceWith`, `append`, `prepend`, `replaceChildren`): either an existing `Node` or a string
/// that gets wrapped in a new `Text` node (<https://dom.spec.whatwg.org/#converting-nodes-into-a-node>).
#[derive(Clone)]
pub enum NodeOrString {
    Node(Node),
    Text(String),
}
impl From<Node> for NodeOrString {
    fn from(n: Node) -> Self {
        NodeOrString::Node(n)
    }
}
impl From<&str> for NodeOrString {
    fn from(s: &str) -> Self {
        NodeOrString::Text(s.to_string())
    }
}
impl From<String> for NodeOrString {
    fn from(s: String) -> Self {
        NodeOrString::Text(s)
    }
}

use {
    std::{
        cell::RefCell,
        fmt,
        rc::{Rc, Weak},
    },
    crate::{
        error::{DomError, DomResult},
        namespace,
        range,
    },
};

pub(crate) type NodeRef = Rc<RefCell<NodeData>>;
pub(crate) type WeakNodeRef = Weak<RefCell<NodeData>>;

/// https://dom.spec.whatwg.org/#dom-node-nodetype
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
}

/// https://dom.spec.whatwg.org/#dom-node-comparedocumentposition
pub mod document_position {
    pub const DISCONNECTED: u16 = 0x01;
    pub const PRECEDING: u16 = 0x02;
    pub const FOLLOWING: u16 = 0x04;
    pub const CONTAINS: u16 = 0x08;
    pub const CONTAINED_BY: u16 = 0x10;
    pub const IMPLEMENTATION_SPECIFIC: u16 = 0x20;
}

/// The type-specific payload of a node.
pub(crate) enum NodeKind {
    Document(document::DocumentData),
    DocumentType(document_type::DocumentTypeData),
    DocumentFragment(document_fragment::DocumentFragmentData),
    Element(element::ElementData),
    Attr(attr::AttrData),
    Text(character_data::CharacterDataInner),
    Comment(character_data::CharacterDataInner),
    CdataSection(character_data::CharacterDataInner),
    ProcessingInstruction(processing_instruction::ProcessingInstructionData),
}

/// The shared header every node carries: its four structural links plus its payload.
pub(crate) struct NodeData {
    pub(crate) parent: Option<WeakNodeRef>,
    pub(crate) previous_sibling: Option<WeakNodeRef>,
    pub(crate) next_sibling: Option<NodeRef>,
    pub(crate) first_child: Option<NodeRef>,
    pub(crate) last_child: Option<WeakNodeRef>,
    /// `None` only for the `Document` node itself.
    pub(crate) owner_document: Option<WeakNodeRef>,
    pub(crate) kind: NodeKind,
}

impl NodeData {
    fn new(kind: NodeKind, owner_document: Option<WeakNodeRef>) -> NodeRef {
        Rc::new(RefCell::new(NodeData {
            parent: None,
            previous_sibling: None,
            next_sibling: None,
            first_child: None,
            last_child: None,
            owner_document,
            kind,
        }))
    }
}

/// A handle to one node in the tree (<https://dom.spec.whatwg.org/#interface-node>).
///
/// `Node` is the common type every kind of node narrows from and widens back to; `as_element`,
/// `as_document`, `as_character_data`, etc. perform the narrowing via a [`NodeKind`] tag match
/// rather than a trait-object downcast, so there's no vtable indirection on the hot tree-walking
/// paths.
#[derive(Clone)]
pub struct Node(pub(crate) NodeRef);

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("nodeType", &self.node_type())
            .field("nodeName", &self.node_name())
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for Node {}

impl Node {
    pub(crate) fn from_ref(r: NodeRef) -> Self {
        Node(r)
    }

    pub(crate) fn downgrade(&self) -> WeakNodeRef {
        Rc::downgrade(&self.0)
    }

    fn upgrade(weak: &WeakNodeRef) -> Option<Node> {
        weak.upgrade().map(Node)
    }

    // ---- node type / name -----------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-nodetype
    pub fn node_type(&self) -> NodeType {
        match &self.0.borrow().kind {
            NodeKind::Document(_) => NodeType::Document,
            NodeKind::DocumentType(_) => NodeType::DocumentType,
            NodeKind::DocumentFragment(_) => NodeType::DocumentFragment,
            NodeKind::Element(_) => NodeType::Element,
            NodeKind::Attr(_) => NodeType::Attribute,
            NodeKind::Text(_) => NodeType::Text,
            NodeKind::Comment(_) => NodeType::Comment,
            NodeKind::CdataSection(_) => NodeType::CdataSection,
            NodeKind::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-nodename
    pub fn node_name(&self) -> String {
        match &self.0.borrow().kind {
            NodeKind::Document(_) => "#document".to_string(),
            NodeKind::DocumentType(d) => d.name.clone(),
            NodeKind::DocumentFragment(_) => "#document-fragment".to_string(),
            NodeKind::Element(_) => Element(self.clone()).tag_name(),
            NodeKind::Attr(a) => a.qualified_name(),
            NodeKind::Text(_) => "#text".to_string(),
            NodeKind::Comment(_) => "#comment".to_string(),
            NodeKind::CdataSection(_) => "#cdata-section".to_string(),
            NodeKind::ProcessingInstruction(p) => p.target.clone(),
        }
    }

    // ---- downcasts --------------------------------------------------------------------------

    pub fn as_document(&self) -> Option<Document> {
        matches!(self.0.borrow().kind, NodeKind::Document(_)).then(|| Document(self.clone()))
    }
    pub fn as_document_type(&self) -> Option<DocumentType> {
        matches!(self.0.borrow().kind, NodeKind::DocumentType(_)).then(|| DocumentType(self.clone()))
    }
    pub fn as_document_fragment(&self) -> Option<DocumentFragment> {
        matches!(self.0.borrow().kind, NodeKind::DocumentFragment(_))
            .then(|| DocumentFragment(self.clone()))
    }
    pub fn as_shadow_root(&self) -> Option<ShadowRoot> {
        match &self.0.borrow().kind {
            NodeKind::DocumentFragment(d) if d.shadow.is_some() => {
                Some(ShadowRoot(DocumentFragment(self.clone())))
            }
            _ => None,
        }
    }
    pub fn as_element(&self) -> Option<Element> {
        matches!(self.0.borrow().kind, NodeKind::Element(_)).then(|| Element(self.clone()))
    }
    pub fn as_attr(&self) -> Option<Attr> {
        matches!(self.0.borrow().kind, NodeKind::Attr(_)).then(|| Attr(self.clone()))
    }
    pub fn as_text(&self) -> Option<Text> {
        matches!(self.0.borrow().kind, NodeKind::Text(_)).then(|| Text(self.clone()))
    }
    pub fn as_comment(&self) -> Option<Comment> {
        matches!(self.0.borrow().kind, NodeKind::Comment(_)).then(|| Comment(self.clone()))
    }
    pub fn as_cdata_section(&self) -> Option<CdataSection> {
        matches!(self.0.borrow().kind, NodeKind::CdataSection(_)).then(|| CdataSection(self.clone()))
    }
    pub fn as_processing_instruction(&self) -> Option<ProcessingInstruction> {
        matches!(self.0.borrow().kind, NodeKind::ProcessingInstruction(_))
            .then(|| ProcessingInstruction(self.clone()))
    }
    /// Any of Text/Comment/CDATASection/ProcessingInstruction.
    pub fn as_character_data(&self) -> Option<CharacterData> {
        match &self.0.borrow().kind {
            NodeKind::Text(_) | NodeKind::Comment(_) | NodeKind::CdataSection(_)
            | NodeKind::ProcessingInstruction(_) => Some(CharacterData(self.clone())),
            _ => None,
        }
    }
    pub(crate) fn is_text_like(&self) -> bool {
        matches!(
            self.0.borrow().kind,
            NodeKind::Text(_) | NodeKind::CdataSection(_)
        )
    }

    // ---- traversal (O(1)) -------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-parentnode
    pub fn parent_node(&self) -> Option<Node> {
        self.0.borrow().parent.as_ref().and_then(Node::upgrade)
    }
    /// https://dom.spec.whatwg.org/#dom-node-parentelement
    pub fn parent_element(&self) -> Option<Element> {
        self.parent_node().and_then(|n| n.as_element())
    }
    /// https://dom.spec.whatwg.org/#dom-node-firstchild
    pub fn first_child(&self) -> Option<Node> {
        self.0.borrow().first_child.clone().map(Node)
    }
    /// https://dom.spec.whatwg.org/#dom-node-lastchild
    pub fn last_child(&self) -> Option<Node> {
        self.0.borrow().last_child.as_ref().and_then(Node::upgrade)
    }
    /// https://dom.spec.whatwg.org/#dom-node-previoussibling
    pub fn previous_sibling(&self) -> Option<Node> {
        self.0.borrow().previous_sibling.as_ref().and_then(Node::upgrade)
    }
    /// https://dom.spec.whatwg.org/#dom-node-nextsibling
    pub fn next_sibling(&self) -> Option<Node> {
        self.0.borrow().next_sibling.clone().map(Node)
    }
    /// https://dom.spec.whatwg.org/#dom-node-haschildnodes
    pub fn has_child_nodes(&self) -> bool {
        self.0.borrow().first_child.is_some()
    }
    /// https://dom.spec.whatwg.org/#dom-node-childnodes
    pub fn child_nodes(&self) -> NodeList {
        NodeList::child_list(self.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-node-ownerdocument
    pub fn owner_document(&self) -> Option<Document> {
        self.0
            .borrow()
            .owner_document
            .as_ref()
            .and_then(Node::upgrade)
            .map(Document)
    }

    /// A snapshot `Vec` of this node's children, in tree order. O(n); used internally by
    /// validation and by `NodeList`'s child-list variant, which always walks the current tree
    /// rather than reading a cache.
    pub(crate) fn children(&self) -> Vec<Node> {
        let mut out = Vec::new();
        let mut next = self.first_child();
        while let Some(n) = next {
            next = n.next_sibling();
            out.push(n);
        }
        out
    }

    /// Zero-based index of `self` in its parent's child list, or panics if detached.
    pub(crate) fn index(&self) -> u32 {
        let mut i = 0u32;
        let mut node = self.previous_sibling();
        while let Some(n) = node {
            i += 1;
            node = n.previous_sibling();
        }
        i
    }

    // ---- connectedness / root ----------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-getrootnode
    ///
    /// A shadow root's host is reached only via `Element::shadow_root`, never by following
    /// `parent_node`, so walking parent pointers from inside a shadow tree terminates at the
    /// `ShadowRoot`, not the owning document.
    pub fn get_root_node(&self) -> Node {
        let mut node = self.clone();
        while let Some(parent) = node.parent_node() {
            node = parent;
        }
        node
    }
    /// https://dom.spec.whatwg.org/#dom-node-isconnected
    pub fn is_connected(&self) -> bool {
        self.get_root_node().as_document().is_some()
    }

    // ---- value / text content ----------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-nodevalue
    pub fn node_value(&self) -> Option<String> {
        if let Some(cd) = self.as_character_data() {
            Some(cd.data())
        } else if let Some(a) = self.as_attr() {
            Some(a.value())
        } else {
            None
        }
    }
    pub fn set_node_value(&self, value: Option<&str>) -> DomResult<()> {
        let value = value.unwrap_or("");
        if let Some(cd) = self.as_character_data() {
            cd.set_data(value)
        } else if let Some(a) = self.as_attr() {
            a.set_value(value);
            Ok(())
        } else {
            Ok(())
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-textcontent / #concept-node-text-content
    pub fn text_content(&self) -> Option<String> {
        match self.node_type() {
            NodeType::DocumentFragment | NodeType::Element => Some(descendant_text_content(self)),
            NodeType::Attribute => self.as_attr().map(|a| a.value()),
            NodeType::Text | NodeType::CdataSection | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.as_character_data().map(|cd| cd.data())
            }
            NodeType::Document | NodeType::DocumentType => None,
        }
    }
    /// https://dom.spec.whatwg.org/#dom-node-textcontent
    pub fn set_text_content(&self, value: Option<&str>) -> DomResult<()> {
        let value = value.unwrap_or("");
        match self.node_type() {
            NodeType::DocumentFragment | NodeType::Element => {
                let fragment_parent = self.clone();
                remove_all_children(&fragment_parent)?;
                if !value.is_empty() {
                    let doc = self.owner_document().ok_or_else(|| {
                        DomError::HierarchyRequest("node has no owner document".into())
                    })?;
                    let text = doc.create_text_node(value);
                    append_child(&text.0, &fragment_parent)?;
                }
                Ok(())
            }
            NodeType::Attribute => {
                if let Some(a) = self.as_attr() {
                    a.set_value(value);
                }
                Ok(())
            }
            NodeType::Text | NodeType::CdataSection | NodeType::ProcessingInstruction | NodeType::Comment => {
                self.as_character_data().unwrap().set_data(value)
            }
            NodeType::Document | NodeType::DocumentType => Ok(()),
        }
    }

    // ---- comparisons -----------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-contains
    pub fn contains(&self, other: &Node) -> bool {
        let mut node = Some(other.clone());
        while let Some(n) = node {
            if &n == self {
                return true;
            }
            node = n.parent_node();
        }
        false
    }
    /// https://dom.spec.whatwg.org/#dom-node-issamenode
    pub fn is_same_node(&self, other: Option<&Node>) -> bool {
        other.is_some_and(|o| self == o)
    }

    /// https://dom.spec.whatwg.org/#dom-node-isequalnode
    pub fn is_equal_node(&self, other: Option<&Node>) -> bool {
        let Some(other) = other else { return false };
        if self.node_type() != other.node_type() {
            return false;
        }
        let shallow_equal = match (&self.0.borrow().kind, &other.0.borrow().kind) {
            (NodeKind::DocumentType(a), NodeKind::DocumentType(b)) => {
                a.name == b.name && a.public_id == b.public_id && a.system_id == b.system_id
            }
            (NodeKind::Element(a), NodeKind::Element(b)) => {
                a.namespace == b.namespace
                    && a.prefix == b.prefix
                    && a.local_name == b.local_name
                    && a.attributes.is_equal(&b.attributes)
            }
            (NodeKind::Attr(a), NodeKind::Attr(b)) => {
                a.namespace == b.namespace && a.local_name == b.local_name && a.value == b.value
            }
            (NodeKind::Text(a), NodeKind::Text(b))
            | (NodeKind::Comment(a), NodeKind::Comment(b))
            | (NodeKind::CdataSection(a), NodeKind::CdataSection(b)) => a.data == b.data,
            (NodeKind::ProcessingInstruction(a), NodeKind::ProcessingInstruction(b)) => {
                a.target == b.target && a.data.data == b.data.data
            }
            (NodeKind::Document(_), NodeKind::Document(_))
            | (NodeKind::DocumentFragment(_), NodeKind::DocumentFragment(_)) => true,
            _ => return false,
        };
        if !shallow_equal {
            return false;
        }
        let self_children = self.children();
        let other_children = other.children();
        if self_children.len() != other_children.len() {
            return false;
        }
        self_children
            .iter()
            .zip(other_children.iter())
            .all(|(a, b)| a.is_equal_node(Some(b)))
    }

    /// https://dom.spec.whatwg.org/#dom-node-comparedocumentposition
    pub fn compare_document_position(&self, other: &Node) -> u16 {
        use document_position::*;
        if self == other {
            return 0;
        }
        if self.get_root_node() != other.get_root_node() {
            // Order is not well defined across trees; WHATWG picks a consistent but arbitrary one
            // based on pointer order, flagged IMPLEMENTATION_SPECIFIC.
            let arbitrary_preceding = (Rc::as_ptr(&self.0) as usize) > (Rc::as_ptr(&other.0) as usize);
            return DISCONNECTED
                | IMPLEMENTATION_SPECIFIC
                | if arbitrary_preceding { PRECEDING } else { FOLLOWING };
        }
        if self.contains(other) {
            return CONTAINED_BY | FOLLOWING;
        }
        if other.contains(self) {
            return CONTAINS | PRECEDING;
        }
        // Walk up from `other` until we find the ancestor that shares a parent with an ancestor
        // of `self`, then compare sibling order at that depth.
        let self_path = ancestor_path(self);
        let other_path = ancestor_path(other);
        let mut i = 0;
        while i < self_path.len() && i < other_path.len() && self_path[i] == other_path[i] {
            i += 1;
        }
        // self_path[i] and other_path[i] are siblings under a common parent (i > 0 here, since we
        // already ruled out ancestor relationships above and the roots matched).
        let a = &self_path[i];
        let b = &other_path[i];
        if a.index() < b.index() {
            PRECEDING
        } else {
            FOLLOWING
        }
    }

    // ---- namespace lookups -------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-lookupprefix
    pub fn lookup_prefix(&self, ns: Option<&str>) -> Option<String> {
        let ns = ns?;
        if ns.is_empty() {
            return None;
        }
        match self.node_type() {
            NodeType::Element => self.as_element().unwrap().lookup_prefix(ns),
            NodeType::Document => self
                .as_document()
                .unwrap()
                .document_element()
                .and_then(|e| e.lookup_prefix(ns)),
            NodeType::DocumentType | NodeType::DocumentFragment => None,
            NodeType::Attribute => self
                .as_attr()
                .unwrap()
                .owner_element()
                .and_then(|e| e.0.lookup_prefix(Some(ns))),
            _ => self.parent_element().and_then(|e| e.lookup_prefix(ns)),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-lookupnamespaceuri
    pub fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String> {
        match self.node_type() {
            NodeType::Element => self.as_element().unwrap().lookup_namespace_uri(prefix),
            NodeType::Document => self
                .as_document()
                .unwrap()
                .document_element()
                .and_then(|e| e.lookup_namespace_uri(prefix)),
            NodeType::DocumentType | NodeType::DocumentFragment => None,
            NodeType::Attribute => self
                .as_attr()
                .unwrap()
                .owner_element()
                .and_then(|e| e.0.lookup_namespace_uri(prefix)),
            _ => self.parent_element().and_then(|e| e.lookup_namespace_uri(prefix)),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-node-isdefaultnamespace
    pub fn is_default_namespace(&self, ns: Option<&str>) -> bool {
        self.lookup_namespace_uri(None).as_deref() == ns
    }

    // ---- mutation: the public entry points onto the mutation engine below --------------------

    /// https://dom.spec.whatwg.org/#dom-node-appendchild
    pub fn append_child(&self, node: Node) -> DomResult<Node> {
        append_child(&node, self)
    }
    /// https://dom.spec.whatwg.org/#dom-node-insertbefore
    pub fn insert_before(&self, node: Node, child: Option<Node>) -> DomResult<Node> {
        insert_before(node, self, child)
    }
    /// https://dom.spec.whatwg.org/#dom-node-removechild
    pub fn remove_child(&self, child: &Node) -> DomResult<Node> {
        remove_child(child, self)
    }
    /// https://dom.spec.whatwg.org/#dom-node-replacechild
    pub fn replace_child(&self, node: Node, old_child: Node) -> DomResult<Node> {
        replace_child(node, self, old_child)
    }

    // ---- normalize / clone -------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-node-normalize
    pub fn normalize(&self) -> DomResult<()> {
        let mut children = self.children();
        let mut i = 0;
        while i < children.len() {
            let child = children[i].clone();
            if let Some(text) = child.as_text() {
                // Merge any immediately-following Text siblings into this one.
                let mut j = i + 1;
                while j < children.len() {
                    if let Some(next_text) = children[j].as_text() {
                        let mut data = text.data();
                        data.push_str(&next_text.data());
                        text.set_data(&data)?;
                        remove_node(&children[j])?;
                        j += 1;
                    } else {
                        break;
                    }
                }
                children.drain(i + 1..j);
                if text.data().is_empty() {
                    remove_node(&children[i])?;
                    children.remove(i);
                    continue;
                }
            } else {
                child.normalize()?;
            }
            i += 1;
        }
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-node-clonenode
    pub fn clone_node(&self, deep: bool) -> Node {
        let doc = self.owner_document();
        let copy = shallow_clone(self, doc.as_ref());
        if let (Some(src), Some(dst)) = (self.as_element(), copy.as_element()) {
            dst.clone_attributes_from(&src);
        }
        if deep {
            for child in self.children() {
                let child_copy = child.clone_node(true);
                append_child(&child_copy, &copy).expect("cloning never violates hierarchy rules");
            }
        }
        copy
    }
}

/// https://dom.spec.whatwg.org/#concept-descendant-text-content
fn descendant_text_content(node: &Node) -> String {
    let mut out = String::new();
    for child in node.children() {
        if let Some(text) = child.as_character_data() {
            if matches!(child.node_type(), NodeType::Text | NodeType::CdataSection) {
                out.push_str(&text.data());
                continue;
            }
        }
        out.push_str(&descendant_text_content(&child));
    }
    out
}

/// Ancestor chain from the root down to (and including) `node`.
fn ancestor_path(node: &Node) -> Vec<Node> {
    let mut path = vec![node.clone()];
    let mut cur = node.clone();
    while let Some(parent) = cur.parent_node() {
        path.push(parent.clone());
        cur = parent;
    }
    path.reverse();
    path
}

/// https://dom.spec.whatwg.org/#concept-node-clone (steps 1-4; cloning-steps hooks are a no-op
/// here since event-target/custom-element reactions are out of scope for this crate).
fn shallow_clone(node: &Node, doc: Option<&Document>) -> Node {
    let new_owner = doc.map(|d| d.node().downgrade());
    let kind = match &node.0.borrow().kind {
        NodeKind::Document(d) => NodeKind::Document(d.shallow_clone()),
        NodeKind::DocumentType(d) => NodeKind::DocumentType(d.clone()),
        NodeKind::DocumentFragment(d) => NodeKind::DocumentFragment(d.shallow_clone()),
        NodeKind::Element(e) => NodeKind::Element(e.shallow_clone()),
        NodeKind::Attr(a) => NodeKind::Attr(a.shallow_clone()),
        NodeKind::Text(t) => NodeKind::Text(t.clone()),
        NodeKind::Comment(t) => NodeKind::Comment(t.clone()),
        NodeKind::CdataSection(t) => NodeKind::CdataSection(t.clone()),
        NodeKind::ProcessingInstruction(p) => NodeKind::ProcessingInstruction(p.clone()),
    };
    let owner = if matches!(kind, NodeKind::Document(_)) {
        None
    } else {
        new_owner.or_else(|| node.0.borrow().owner_document.clone())
    };
    Node(NodeData::new(kind, owner))
}

// ============================================================================================
// Mutation engine
// ============================================================================================

/// https://dom.spec.whatwg.org/#concept-node-ensure-pre-insertion-validity
fn ensure_pre_insertion_validity(node: &Node, parent: &Node, child: Option<&Node>) -> DomResult<()> {
    // 1. Parent must be Document, DocumentFragment, or Element.
    if !matches!(
        parent.node_type(),
        NodeType::Document | NodeType::DocumentFragment | NodeType::Element
    ) {
        return Err(DomError::HierarchyRequest(
            "parent must be a Document, DocumentFragment, or Element".into(),
        ));
    }
    // 2. Node must not be an inclusive ancestor of parent.
    if node.contains(parent) {
        return Err(DomError::HierarchyRequest(
            "node is an inclusive ancestor of parent".into(),
        ));
    }
    // 3. If child is non-null, its parent must be parent.
    if let Some(child) = child {
        if child.parent_node().as_ref() != Some(parent) {
            return Err(DomError::NotFound("child is not a child of parent".into()));
        }
    }
    // 4. Node's type must be insertable.
    if !matches!(
        node.node_type(),
        NodeType::DocumentFragment
            | NodeType::DocumentType
            | NodeType::Element
            | NodeType::Text
            | NodeType::ProcessingInstruction
            | NodeType::Comment
            | NodeType::CdataSection
    ) {
        return Err(DomError::HierarchyRequest(
            "node's type cannot be a child of any node".into(),
        ));
    }
    // 5. Text cannot be a direct child of Document; DocumentType can only be a child of Document.
    let parent_is_document = parent.node_type() == NodeType::Document;
    if (node.node_type() == NodeType::Text && parent_is_document)
        || (node.node_type() == NodeType::DocumentType && !parent_is_document)
    {
        return Err(DomError::HierarchyRequest(
            "Text cannot be a child of a Document, and DocumentType can only be one".into(),
        ));
    }
    // 6. If parent is a document, apply document-specific child-count rules.
    if parent_is_document {
        let (element_count, text_count, doctype_count) = match node.node_type() {
            NodeType::DocumentFragment => {
                let children = node.children();
                (
                    children.iter().filter(|n| n.node_type() == NodeType::Element).count(),
                    children.iter().filter(|n| n.node_type() == NodeType::Text).count(),
                    0,
                )
            }
            NodeType::Element => (1, 0, 0),
            NodeType::DocumentType => (0, 0, 1),
            _ => (0, 0, 0),
        };
        if text_count > 0 {
            return Err(DomError::HierarchyRequest(
                "a Document cannot have a Text child".into(),
            ));
        }
        let existing = parent.children();
        let existing_elements = existing
            .iter()
            .filter(|n| n.node_type() == NodeType::Element && Some(*n) != child)
            .count();
        let existing_doctypes = existing
            .iter()
            .filter(|n| n.node_type() == NodeType::DocumentType && Some(*n) != child)
            .count();
        if element_count + existing_elements > 1 {
            return Err(DomError::HierarchyRequest(
                "a Document can have at most one element child".into(),
            ));
        }
        if doctype_count + existing_doctypes > 1 {
            return Err(DomError::HierarchyRequest(
                "a Document can have at most one doctype child".into(),
            ));
        }
        if element_count > 0 {
            // A doctype must not follow any element, and a new element must not precede an
            // existing doctype when inserted without a reference child (i.e. appended).
            let ref_index = child.map(|c| c.index());
            let doctype_after = existing.iter().any(|n| {
                n.node_type() == NodeType::DocumentType
                    && ref_index.is_none_or(|ri| n.index() < ri)
            });
            if doctype_after {
                return Err(DomError::HierarchyRequest(
                    "a doctype must precede the document element".into(),
                ));
            }
        }
        if doctype_count > 0 {
            let element_before = existing.iter().any(|n| {
                n.node_type() == NodeType::Element
                    && child.is_none_or(|c| n.index() >= c.index())
            });
            if element_before {
                return Err(DomError::HierarchyRequest(
                    "a doctype must precede the document element".into(),
                ));
            }
        }
    }
    Ok(())
}

/// https://dom.spec.whatwg.org/#concept-node-pre-insert
pub(crate) fn pre_insert(node: Node, parent: &Node, child: Option<Node>) -> DomResult<Node> {
    ensure_pre_insertion_validity(&node, parent, child.as_ref())?;
    let reference_child = match &child {
        Some(c) if c == &node => node.next_sibling(),
        other => other.clone(),
    };
    insert_node(&node, parent, reference_child.as_ref())?;
    Ok(node)
}

/// https://dom.spec.whatwg.org/#concept-node-insert
///
/// Handles the `DocumentFragment` atomicity rule: a fragment's children are all spliced into
/// `parent` as a single logical step. There is no explicit "mutation record" type in this crate
/// (event dispatch is out of scope here); the single logical step is instead what makes the
/// live-range adjustment calls fire once per insertion rather than once per moved node (see
/// `range::notify_insert`).
fn insert_node(node: &Node, parent: &Node, next_child: Option<&Node>) -> DomResult<()> {
    let is_fragment = node.node_type() == NodeType::DocumentFragment;
    let nodes_to_insert: Vec<Node> = if is_fragment {
        node.children()
    } else {
        vec![node.clone()]
    };
    if nodes_to_insert.is_empty() {
        return Ok(());
    }
    let count = nodes_to_insert.len() as u32;

    if is_fragment {
        for child in &nodes_to_insert {
            detach_node(child);
        }
    }

    if let Some(child) = next_child {
        let index = child.index();
        if let Some(doc) = parent.owner_document().or_else(|| parent.as_document()) {
            range::notify_insert(&doc, parent, index, count);
        }
    }

    let doc = parent.owner_document().or_else(|| parent.as_document());
    for child in &nodes_to_insert {
        adopt_node(child, doc.as_ref());
        match next_child {
            None => link_append(child, parent),
            Some(before) => link_before(child, parent, before),
        }
    }
    log::trace!(
        "inserted {} node(s) under {:?} before {:?}",
        count,
        parent,
        next_child
    );
    Ok(())
}

/// https://dom.spec.whatwg.org/#concept-node-append
pub(crate) fn append_child(node: &Node, parent: &Node) -> DomResult<Node> {
    pre_insert(node.clone(), parent, None)
}

/// https://dom.spec.whatwg.org/#dom-node-insertbefore
pub(crate) fn insert_before(node: Node, parent: &Node, child: Option<Node>) -> DomResult<Node> {
    pre_insert(node, parent, child)
}

/// https://dom.spec.whatwg.org/#concept-node-pre-remove
fn ensure_pre_removal_validity(node: &Node, parent: &Node) -> DomResult<()> {
    if node.parent_node().as_ref() != Some(parent) {
        Err(DomError::NotFound("node is not a child of parent".into()))
    } else {
        Ok(())
    }
}

/// https://dom.spec.whatwg.org/#concept-node-remove
pub(crate) fn remove_node(node: &Node) -> DomResult<()> {
    let parent = node
        .parent_node()
        .ok_or_else(|| DomError::NotFound("node has no parent".into()))?;
    let index = node.index();
    if let Some(doc) = parent.owner_document().or_else(|| parent.as_document()) {
        range::notify_remove(&doc, &parent, node, index);
    }
    detach_node(node);
    log::trace!("removed node {:?} (was index {}) from {:?}", node, index, parent);
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-node-removechild
pub(crate) fn remove_child(node: &Node, parent: &Node) -> DomResult<Node> {
    ensure_pre_removal_validity(node, parent)?;
    remove_node(node)?;
    Ok(node.clone())
}

/// https://dom.spec.whatwg.org/#concept-node-replace-all (used only for `set_text_content`)
fn remove_all_children(parent: &Node) -> DomResult<()> {
    for child in parent.children() {
        remove_node(&child)?;
    }
    Ok(())
}

/// https://dom.spec.whatwg.org/#concept-node-replace
pub(crate) fn replace_child(node: Node, parent: &Node, old_child: Node) -> DomResult<Node> {
    ensure_pre_insertion_validity_for_replace(&node, parent, &old_child)?;
    let reference_child = old_child.next_sibling();
    let reference_child = match &reference_child {
        Some(c) if c == &node => node.next_sibling(),
        other => other.clone(),
    };
    if old_child.parent_node().as_ref() == Some(parent) {
        remove_node(&old_child)?;
    }
    insert_node(&node, parent, reference_child.as_ref())?;
    Ok(old_child)
}

fn ensure_pre_insertion_validity_for_replace(node: &Node, parent: &Node, old_child: &Node) -> DomResult<()> {
    if old_child.parent_node().as_ref() != Some(parent) {
        return Err(DomError::NotFound("child is not a child of parent".into()));
    }
    // Delegate to the general validation, treating `old_child` as the slot being replaced (i.e.
    // excluded from the document element/doctype counts).
    ensure_pre_insertion_validity(node, parent, Some(old_child))
}

/// https://dom.spec.whatwg.org/#concept-node-adopt
pub(crate) fn adopt_node(node: &Node, new_doc: Option<&Document>) {
    if let Some(parent) = node.parent_node() {
        let _ = remove_node(node);
        let _ = parent;
    }
    let old_doc = node.owner_document();
    let changed = match (&old_doc, new_doc) {
        (Some(a), Some(b)) => a.node() != b.node(),
        (None, None) => false,
        _ => true,
    };
    if changed {
        set_owner_document_recursive(node, new_doc);
    }
}

fn set_owner_document_recursive(node: &Node, doc: Option<&Document>) {
    if node.node_type() == NodeType::Document {
        return;
    }
    node.0.borrow_mut().owner_document = doc.map(|d| d.node().downgrade());
    if let Some(element) = node.as_element() {
        for attr in element.attributes().all_attrs() {
            attr.0 .0.borrow_mut().owner_document = doc.map(|d| d.node().downgrade());
        }
    }
    for child in node.children() {
        set_owner_document_recursive(&child, doc);
    }
}

// ---- tree-linking primitives (the Rc/Weak intrusive list described in the module doc) --------

fn link_append(node: &Node, parent: &Node) {
    node.0.borrow_mut().parent = Some(parent.downgrade());
    let old_last = parent.0.borrow().last_child.clone();
    match old_last.as_ref().and_then(Node::upgrade) {
        Some(last) => {
            node.0.borrow_mut().previous_sibling = Some(last.downgrade());
            last.0.borrow_mut().next_sibling = Some(node.0.clone());
        }
        None => {
            parent.0.borrow_mut().first_child = Some(node.0.clone());
        }
    }
    parent.0.borrow_mut().last_child = Some(node.downgrade());
}

fn link_before(node: &Node, parent: &Node, child: &Node) {
    let prev = child.previous_sibling();
    node.0.borrow_mut().parent = Some(parent.downgrade());
    node.0.borrow_mut().previous_sibling = prev.as_ref().map(Node::downgrade);
    node.0.borrow_mut().next_sibling = Some(child.0.clone());
    match &prev {
        Some(prev) => prev.0.borrow_mut().next_sibling = Some(node.0.clone()),
        None => parent.0.borrow_mut().first_child = Some(node.0.clone()),
    }
    child.0.borrow_mut().previous_sibling = Some(node.downgrade());
}

fn detach_node(node: &Node) {
    let parent = node.parent_node();
    let prev = node.previous_sibling();
    let next = node.next_sibling();
    match &prev {
        Some(prev) => prev.0.borrow_mut().next_sibling = next.as_ref().map(|n| n.0.clone()),
        None => {
            if let Some(parent) = &parent {
                parent.0.borrow_mut().first_child = next.as_ref().map(|n| n.0.clone());
            }
        }
    }
    match &next {
        Some(next) => next.0.borrow_mut().previous_sibling = prev.as_ref().map(Node::downgrade),
        None => {
            if let Some(parent) = &parent {
                parent.0.borrow_mut().last_child = prev.as_ref().map(Node::downgrade);
            }
        }
    }
    node.0.borrow_mut().parent = None;
    node.0.borrow_mut().previous_sibling = None;
    node.0.borrow_mut().next_sibling = None;
}

// ---- XML Name validation ------------------------------------------------------------------------

/// Accepted as a qualified-name/PI-target start character: ASCII letter, `_`, `:`, or any non-
/// ASCII codepoint. This is the permissive superset WHATWG's "validate" algorithm actually checks
/// (XML 1.0 Name production minus the combining-character/digit restrictions on the first
/// character), not strict XML 1.0.
pub(crate) fn is_xml_name_start_char(c: char) -> bool {
    c == ':' || c == '_' || c.is_ascii_alphabetic() || (!c.is_ascii() && c.is_alphabetic())
}
pub(crate) fn is_xml_name_char(c: char) -> bool {
    is_xml_name_start_char(c) || c == '-' || c == '.' || c.is_ascii_digit() || (!c.is_ascii() && c.is_alphanumeric())
}

/// https://dom.spec.whatwg.org/#validate and the name half of validate-and-extract.
pub(crate) fn validate_name(name: &str) -> DomResult<()> {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_xml_name_start_char(c) => {}
        _ => return Err(DomError::InvalidCharacter(format!("invalid name: {name:?}"))),
    }
    if !chars.all(is_xml_name_char) {
        return Err(DomError::InvalidCharacter(format!("invalid name: {name:?}")));
    }
    Ok(())
}

/// https://dom.spec.whatwg.org/#validate-and-extract
/// Returns (namespace, prefix, local_name).
pub(crate) fn validate_and_extract(
    namespace: Option<&str>,
    qualified_name: &str,
) -> DomResult<(Option<String>, Option<String>, String)> {
    let namespace = namespace.filter(|s| !s.is_empty()).map(str::to_string);
    validate_qname_syntax(qualified_name)?;
    let (prefix, local_name) = match qualified_name.split_once(':') {
        Some((p, l)) => (Some(p.to_string()), l.to_string()),
        None => (None, qualified_name.to_string()),
    };
    if prefix.is_some() && namespace.is_none() {
        return Err(DomError::Namespace(
            "a prefixed qualified name requires a namespace".into(),
        ));
    }
    if prefix.as_deref() == Some("xml") && namespace.as_deref() != Some(namespace::XML) {
        return Err(DomError::Namespace("prefix 'xml' requires the XML namespace".into()));
    }
    if (qualified_name == "xmlns" || prefix.as_deref() == Some("xmlns"))
        && namespace.as_deref() != Some(namespace::XMLNS)
    {
        return Err(DomError::Namespace(
            "'xmlns' requires the xmlns namespace".into(),
        ));
    }
    if namespace.as_deref() == Some(namespace::XMLNS)
        && qualified_name != "xmlns"
        && prefix.as_deref() != Some("xmlns")
    {
        return Err(DomError::Namespace(
            "the xmlns namespace requires an 'xmlns' name or prefix".into(),
        ));
    }
    Ok((namespace, prefix, local_name))
}

// ============================================================================================
// `ChildNode`/`ParentNode` mixins: before/after/replaceWith/remove, append/prepend/replaceChildren
// ============================================================================================

/// https://dom.spec.whatwg.org/#converting-nodes-into-a-node
pub(crate) fn convert_nodes_into_node(doc: &Document, nodes: Vec<NodeOrString>) -> Node {
    if nodes.len() == 1 {
        return match nodes.into_iter().next().unwrap() {
            NodeOrString::Node(n) => n,
            NodeOrString::Text(s) => doc.create_text_node(&s).0,
        };
    }
    let fragment = doc.create_document_fragment();
    for item in nodes {
        let child = match item {
            NodeOrString::Node(n) => n,
            NodeOrString::Text(s) => doc.create_text_node(&s).0,
        };
        append_child(&child, &fragment.0).expect("a DocumentFragment accepts any insertable node");
    }
    fragment.0
}

fn first_preceding_sibling_not_in(node: &Node, nodes: &[NodeOrString]) -> Option<Node> {
    let mut sib = node.previous_sibling();
    'outer: while let Some(s) = sib {
        for n in nodes {
            if let NodeOrString::Node(existing) = n {
                if existing == &s {
                    sib = s.previous_sibling();
                    continue 'outer;
                }
            }
        }
        return Some(s);
    }
    None
}

fn first_following_sibling_not_in(node: &Node, nodes: &[NodeOrString]) -> Option<Node> {
    let mut sib = node.next_sibling();
    'outer: while let Some(s) = sib {
        for n in nodes {
            if let NodeOrString::Node(existing) = n {
                if existing == &s {
                    sib = s.next_sibling();
                    continue 'outer;
                }
            }
        }
        return Some(s);
    }
    None
}

fn owner_doc_or_self(node: &Node) -> Document {
    node.owner_document()
        .or_else(|| node.as_document())
        .expect("a node reachable from a tree always has an owner document")
}

/// https://dom.spec.whatwg.org/#dom-childnode-before
pub(crate) fn before(node: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let Some(parent) = node.parent_node() else { return Ok(()) };
    let doc = owner_doc_or_self(node);
    let viable_previous_sibling = first_preceding_sibling_not_in(node, &nodes);
    let new_node = convert_nodes_into_node(&doc, nodes);
    let reference_child = match viable_previous_sibling {
        Some(sib) => sib.next_sibling(),
        None => parent.first_child(),
    };
    insert_before(new_node, &parent, reference_child)?;
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-childnode-after
pub(crate) fn after(node: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let Some(parent) = node.parent_node() else { return Ok(()) };
    let doc = owner_doc_or_self(node);
    let viable_next_sibling = first_following_sibling_not_in(node, &nodes);
    let new_node = convert_nodes_into_node(&doc, nodes);
    insert_before(new_node, &parent, viable_next_sibling)?;
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-childnode-replacewith
pub(crate) fn replace_with(node: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let Some(parent) = node.parent_node() else { return Ok(()) };
    let doc = owner_doc_or_self(node);
    let viable_next_sibling = first_following_sibling_not_in(node, &nodes);
    let new_node = convert_nodes_into_node(&doc, nodes);
    if node.parent_node().as_ref() == Some(&parent) {
        replace_child(new_node, &parent, node.clone())?;
    } else {
        insert_before(new_node, &parent, viable_next_sibling)?;
    }
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-childnode-remove
pub(crate) fn remove_self(node: &Node) -> DomResult<()> {
    if node.parent_node().is_some() {
        remove_node(node)?;
    }
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-parentnode-append
pub(crate) fn append_nodes(container: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let doc = owner_doc_or_self(container);
    let node = convert_nodes_into_node(&doc, nodes);
    append_child(&node, container)?;
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-parentnode-prepend
pub(crate) fn prepend_nodes(container: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let doc = owner_doc_or_self(container);
    let node = convert_nodes_into_node(&doc, nodes);
    insert_before(node, container, container.first_child())?;
    Ok(())
}

/// https://dom.spec.whatwg.org/#dom-parentnode-replacechildren
pub(crate) fn replace_children(container: &Node, nodes: Vec<NodeOrString>) -> DomResult<()> {
    let doc = owner_doc_or_self(container);
    let node = convert_nodes_into_node(&doc, nodes);
    ensure_pre_insertion_validity(&node, container, None)?;
    remove_all_children(container)?;
    insert_node(&node, container, None)?;
    Ok(())
}

fn validate_qname_syntax(qualified_name: &str) -> DomResult<()> {
    match qualified_name.split_once(':') {
        None => validate_name(qualified_name),
        Some((prefix, local)) => {
            if prefix.is_empty() || local.is_empty() || local.contains(':') {
                return Err(DomError::InvalidCharacter(format!(
                    "invalid qualified name: {qualified_name:?}"
                )));
            }
            validate_name(prefix)?;
            validate_name(local)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_insertion_is_atomic() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let fragment = doc.create_document_fragment();
        let p = doc.create_element("p").unwrap();
        let span = doc.create_element("span").unwrap();
        fragment.node().append_child(p.node().clone()).unwrap();
        fragment.node().append_child(span.node().clone()).unwrap();

        div.node().append_child(fragment.node().clone()).unwrap();

        assert!(fragment.node().first_child().is_none(), "fragment must be emptied");
        let children: Vec<Node> = div.node().children();
        assert_eq!(children, vec![p.node().clone(), span.node().clone()]);
    }

    #[test]
    fn append_then_remove_restores_child_list() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        let span = doc.create_element("span").unwrap();
        div.node().append_child(span.node().clone()).unwrap();
        assert_eq!(div.node().child_nodes().length(), 1);

        div.node().remove_child(span.node()).unwrap();
        assert_eq!(div.node().child_nodes().length(), 0);
        assert!(span.node().parent_node().is_none());
    }

    #[test]
    fn text_cannot_be_a_direct_child_of_document() {
        let doc = Document::new();
        let text = doc.create_text_node("oops");
        let err = doc.node().append_child(text.node().clone()).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn document_accepts_at_most_one_element_child() {
        let doc = Document::new();
        let html = doc.create_element("html").unwrap();
        doc.node().append_child(html.node().clone()).unwrap();
        let second = doc.create_element("html").unwrap();
        let err = doc.node().append_child(second.node().clone()).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn inserting_into_own_descendant_is_rejected() {
        let doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("span").unwrap();
        outer.node().append_child(inner.node().clone()).unwrap();
        let err = inner.node().append_child(outer.node().clone()).unwrap_err();
        assert!(matches!(err, DomError::HierarchyRequest(_)));
    }

    #[test]
    fn remove_child_rejects_non_child() {
        let doc = Document::new();
        let a = doc.create_element("a").unwrap();
        let b = doc.create_element("b").unwrap();
        let err = a.node().remove_child(b.node()).unwrap_err();
        assert!(matches!(err, DomError::NotFound(_)));
    }

    #[test]
    fn deep_clone_is_structurally_equal_and_detached() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        div.set_attribute("id", "x").unwrap();
        let span = doc.create_element("span").unwrap();
        div.node().append_child(span.node().clone()).unwrap();
        div.node().append_child(doc.create_text_node("hi").0).unwrap();

        let clone = div.node().clone_node(true);
        assert!(clone.parent_node().is_none());
        assert!(clone.is_equal_node(Some(div.node())));
        assert_ne!(clone, *div.node());
    }

    #[test]
    fn normalize_merges_adjacent_text_and_drops_empty_runs() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        div.node().append_child(doc.create_text_node("foo").0).unwrap();
        div.node().append_child(doc.create_text_node("").0).unwrap();
        div.node().append_child(doc.create_text_node("bar").0).unwrap();

        div.node().normalize().unwrap();

        let children = div.node().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].as_text().unwrap().data(), "foobar");

        // Idempotent: normalizing again changes nothing.
        div.node().normalize().unwrap();
        assert_eq!(div.node().children().len(), 1);
    }

    #[test]
    fn adopt_node_recursively_changes_owner_document() {
        let doc_a = Document::new();
        let doc_b = Document::new();
        let div = doc_a.create_element("div").unwrap();
        let span = doc_a.create_element("span").unwrap();
        div.node().append_child(span.node().clone()).unwrap();

        doc_b.node().append_child(div.node().clone()).unwrap();

        assert_eq!(div.node().owner_document().unwrap(), doc_b);
        assert_eq!(span.node().owner_document().unwrap(), doc_b);
    }

    #[test]
    fn text_content_setter_replaces_all_children_with_one_text_node() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        div.node().append_child(doc.create_element("span").unwrap().node().clone()).unwrap();
        div.node().set_text_content(Some("hello")).unwrap();

        let children = div.node().children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].as_text().unwrap().data(), "hello");
        assert_eq!(div.node().text_content().as_deref(), Some("hello"));
    }

    #[test]
    fn empty_text_content_removes_all_children_without_creating_a_text_node() {
        let doc = Document::new();
        let div = doc.create_element("div").unwrap();
        div.node().append_child(doc.create_element("span").unwrap().node().clone()).unwrap();
        div.node().set_text_content(Some("")).unwrap();
        assert!(!div.node().has_child_nodes());
    }
}
