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

//! https://dom.spec.whatwg.org/#interface-element
//!
//! The attribute table lives directly on [`ElementData`] as an
//! insertion-ordered `Vec` of `Attr` node handles; `NamedNodeMap` and `DOMTokenList` are thin live
//! views over it rather than separate owners, so a `Vec<Node>` clone never drifts from the
//! element's own state.

use {
    super::{
        document_fragment::{DocumentFragmentData, ShadowData, ShadowRootMode, SlotAssignmentMode},
        html_collection::HtmlCollection, named_node_map::NamedNodeMap, node_list::NodeList,
        Attr, DocumentFragment, NodeData, NodeKind, NodeRef, WeakNodeRef, Node, NodeType, ShadowRoot,
    },
    crate::{
        error::{DomError, DomResult},
        namespace,
    },
};

/// Options accepted by [`Element::attach_shadow`] (`ShadowRootInit`,
/// <https://dom.spec.whatwg.org/#dictdef-shadowrootinit>).
#[derive(Debug, Clone, Copy)]
pub struct ShadowRootInit {
    pub delegates_focus: bool,
    pub slot_assignment: SlotAssignmentMode,
    pub clonable: bool,
    pub serializable: bool,
}

impl Default for ShadowRootInit {
    fn default() -> Self {
        ShadowRootInit {
            delegates_focus: false,
            slot_assignment: SlotAssignmentMode::Named,
            clonable: false,
            serializable: false,
        }
    }
}

pub(crate) struct ElementData {
    pub(crate) namespace: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) local_name: String,
    pub(crate) attributes: AttributeTable,
    pub(crate) shadow_root: Option<WeakNodeRef>,
}

impl ElementData {
    pub(crate) fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    pub(crate) fn shallow_clone(&self) -> ElementData {
        ElementData {
            namespace: self.namespace.clone(),
            prefix: self.prefix.clone(),
            local_name: self.local_name.clone(),
            attributes: AttributeTable::new(),
            shadow_root: None,
        }
    }
}

/// The attribute table an `Element` owns: an insertion-ordered list of `Attr` node `Rc`s.
pub(crate) struct AttributeTable {
    pub(crate) attrs: Vec<NodeRef>,
}

impl AttributeTable {
    pub(crate) fn new() -> Self {
        AttributeTable { attrs: Vec::new() }
    }

    /// https://dom.spec.whatwg.org/#concept-node-equals, the Element case: same number of
    /// attributes, each with a match (by namespace/local-name/value; prefix excluded)
    /// in the other table. Order-independent, matching WHATWG's set semantics.
    pub(crate) fn is_equal(&self, other: &AttributeTable) -> bool {
        if self.attrs.len() != other.attrs.len() {
            return false;
        }
        let mut used = vec![false; other.attrs.len()];
        'outer: for a in &self.attrs {
            let a_key = attr_key(a);
            for (i, b) in other.attrs.iter().enumerate() {
                if !used[i] && a_key == attr_key(b) {
                    used[i] = true;
                    continue 'outer;
                }
            }
            return false;
        }
        true
    }
}

fn attr_key(r: &NodeRef) -> (Option<String>, String, String) {
    match &r.borrow().kind {
        NodeKind::Attr(a) => (a.namespace.clone(), a.local_name.clone(), a.value.clone()),
        _ => unreachable!("AttributeTable only ever holds Attr nodes"),
    }
}

/// A boundary object the (external) selector engine implements to let the core's tree-walking
/// operations (`matches`/`closest`/`querySelector`/`querySelectorAll`) ask "does this element
/// match?" without the core knowing anything about selector syntax.
pub trait ElementMatcher {
    fn matches(&self, element: &Element) -> bool;
}
impl<F: Fn(&Element) -> bool> ElementMatcher for F {
    fn matches(&self, element: &Element) -> bool {
        self(element)
    }
}

/// A handle onto an `Element` node.
#[derive(Clone, PartialEq, Eq)]
pub struct Element(pub(crate) Node);

impl Element {
    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with_data<R>(&self, f: impl FnOnce(&ElementData) -> R) -> R {
        match &self.0 .0.borrow().kind {
            NodeKind::Element(e) => f(e),
            _ => unreachable!("Element always wraps an Element node"),
        }
    }
    fn with_data_mut<R>(&self, f: impl FnOnce(&mut ElementData) -> R) -> R {
        match &mut self.0 .0.borrow_mut().kind {
            NodeKind::Element(e) => f(e),
            _ => unreachable!("Element always wraps an Element node"),
        }
    }

    // ---- identity -----------------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-element-namespaceuri
    pub fn namespace_uri(&self) -> Option<String> {
        self.with_data(|e| e.namespace.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-element-prefix
    pub fn prefix(&self) -> Option<String> {
        self.with_data(|e| e.prefix.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-element-localname
    pub fn local_name(&self) -> String {
        self.with_data(|e| e.local_name.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-element-tagname
    ///
    /// Qualified tag name, uppercased for HTML-namespace elements.
    pub fn tag_name(&self) -> String {
        let qname = self.with_data(ElementData::qualified_name);
        if self.with_data(|e| e.namespace.as_deref()) == Some(namespace::HTML) {
            qname.to_ascii_uppercase()
        } else {
            qname
        }
    }

    pub(crate) fn lookup_prefix(&self, ns: &str) -> Option<String> {
        let (my_ns, my_prefix, my_local) =
            self.with_data(|e| (e.namespace.clone(), e.prefix.clone(), e.local_name.clone()));
        if my_ns.as_deref() == Some(ns) {
            if let Some(prefix) = &my_prefix {
                return Some(prefix.clone());
            }
        }
        let _ = my_local;
        for attr in self.attributes().all_attrs() {
            if attr.prefix().as_deref() == Some("xmlns") && attr.value() == ns {
                return Some(attr.local_name());
            }
        }
        self.0.parent_element().and_then(|p| p.lookup_prefix(ns))
    }

    pub(crate) fn lookup_namespace_uri(&self, prefix: Option<&str>) -> Option<String> {
        let (my_ns, my_prefix) = self.with_data(|e| (e.namespace.clone(), e.prefix.clone()));
        if my_prefix.as_deref() == prefix && my_ns.is_some() {
            return my_ns;
        }
        for attr in self.attributes().all_attrs() {
            let is_match = match prefix {
                None => attr.prefix().is_none() && attr.local_name() == "xmlns",
                Some(p) => attr.prefix().as_deref() == Some("xmlns") && attr.local_name() == p,
            };
            if is_match {
                return (!attr.value().is_empty()).then(|| attr.value());
            }
        }
        self.0.parent_element().and_then(|p| p.lookup_namespace_uri(prefix))
    }

    // ---- id / class reflection ------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-element-id
    pub fn id(&self) -> String {
        self.get_attribute("id").unwrap_or_default()
    }
    pub fn set_id(&self, value: &str) {
        let _ = self.set_attribute("id", value);
    }
    /// https://dom.spec.whatwg.org/#dom-element-classname
    pub fn class_name(&self) -> String {
        self.get_attribute("class").unwrap_or_default()
    }
    pub fn set_class_name(&self, value: &str) {
        let _ = self.set_attribute("class", value);
    }
    /// https://dom.spec.whatwg.org/#dom-element-classlist
    pub fn class_list(&self) -> super::DomTokenList {
        super::DomTokenList::new(self.clone(), "class")
    }

    // ---- attribute accessors -----------------------------------------------------------------

    fn find_by_qname(&self, qname: &str) -> Option<NodeRef> {
        self.with_data(|e| {
            e.attributes
                .attrs
                .iter()
                .find(|r| matches!(&r.borrow().kind, NodeKind::Attr(a) if a.qualified_name() == qname))
                .cloned()
        })
    }
    fn find_by_ns(&self, ns: Option<&str>, local: &str) -> Option<NodeRef> {
        self.with_data(|e| {
            e.attributes
                .attrs
                .iter()
                .find(|r| matches!(&r.borrow().kind, NodeKind::Attr(a) if a.namespace.as_deref() == ns && a.local_name == local))
                .cloned()
        })
    }

    /// https://dom.spec.whatwg.org/#dom-element-getattributenames
    pub fn get_attribute_names(&self) -> Vec<String> {
        self.with_data(|e| {
            e.attributes
                .attrs
                .iter()
                .map(|r| match &r.borrow().kind {
                    NodeKind::Attr(a) => a.qualified_name(),
                    _ => unreachable!(),
                })
                .collect()
        })
    }

    /// https://dom.spec.whatwg.org/#dom-element-getattribute
    pub fn get_attribute(&self, qname: &str) -> Option<String> {
        self.find_by_qname(qname).map(|r| match &r.borrow().kind {
            NodeKind::Attr(a) => a.value.clone(),
            _ => unreachable!(),
        })
    }
    /// https://dom.spec.whatwg.org/#dom-element-getattributens
    pub fn get_attribute_ns(&self, ns: Option<&str>, local: &str) -> Option<String> {
        let ns = ns.filter(|s| !s.is_empty());
        self.find_by_ns(ns, local).map(|r| match &r.borrow().kind {
            NodeKind::Attr(a) => a.value.clone(),
            _ => unreachable!(),
        })
    }
    /// https://dom.spec.whatwg.org/#dom-element-hasattribute
    pub fn has_attribute(&self, qname: &str) -> bool {
        self.find_by_qname(qname).is_some()
    }
    /// https://dom.spec.whatwg.org/#dom-element-hasattributens
    pub fn has_attribute_ns(&self, ns: Option<&str>, local: &str) -> bool {
        self.find_by_ns(ns.filter(|s| !s.is_empty()), local).is_some()
    }
    /// https://dom.spec.whatwg.org/#dom-element-hasattributes
    pub fn has_attributes(&self) -> bool {
        self.with_data(|e| !e.attributes.attrs.is_empty())
    }

    /// https://dom.spec.whatwg.org/#dom-element-setattribute
    pub fn set_attribute(&self, qname: &str, value: &str) -> DomResult<()> {
        super::validate_name(qname)?;
        if let Some(existing) = self.find_by_qname(qname) {
            if let NodeKind::Attr(a) = &mut existing.borrow_mut().kind {
                a.value = value.to_string();
            }
            return Ok(());
        }
        let owner_doc = self.0.owner_document();
        let attr_ref = NodeData::new(
            NodeKind::Attr(super::attr::AttrData {
                namespace: None,
                prefix: None,
                local_name: qname.to_string(),
                value: value.to_string(),
                owner_element: Some(self.0.downgrade()),
            }),
            owner_doc.map(|d| d.node().downgrade()),
        );
        self.with_data_mut(|e| e.attributes.attrs.push(attr_ref));
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-element-setattributens
    pub fn set_attribute_ns(&self, ns: Option<&str>, qualified_name: &str, value: &str) -> DomResult<()> {
        let (namespace, prefix, local_name) = super::validate_and_extract(ns, qualified_name)?;
        if let Some(existing) = self.find_by_ns(namespace.as_deref(), &local_name) {
            if let NodeKind::Attr(a) = &mut existing.borrow_mut().kind {
                a.value = value.to_string();
            }
            return Ok(());
        }
        let owner_doc = self.0.owner_document();
        let attr_ref = NodeData::new(
            NodeKind::Attr(super::attr::AttrData {
                namespace,
                prefix,
                local_name,
                value: value.to_string(),
                owner_element: Some(self.0.downgrade()),
            }),
            owner_doc.map(|d| d.node().downgrade()),
        );
        self.with_data_mut(|e| e.attributes.attrs.push(attr_ref));
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-element-removeattribute
    pub fn remove_attribute(&self, qname: &str) {
        self.with_data_mut(|e| {
            if let Some(idx) = e.attributes.attrs.iter().position(
                |r| matches!(&r.borrow().kind, NodeKind::Attr(a) if a.qualified_name() == qname),
            ) {
                let removed = e.attributes.attrs.remove(idx);
                if let NodeKind::Attr(a) = &mut removed.borrow_mut().kind {
                    a.owner_element = None;
                }
            }
        });
    }
    /// https://dom.spec.whatwg.org/#dom-element-removeattributens
    pub fn remove_attribute_ns(&self, ns: Option<&str>, local: &str) {
        let ns = ns.filter(|s| !s.is_empty());
        self.with_data_mut(|e| {
            if let Some(idx) = e.attributes.attrs.iter().position(
                |r| matches!(&r.borrow().kind, NodeKind::Attr(a) if a.namespace.as_deref() == ns && a.local_name == local),
            ) {
                let removed = e.attributes.attrs.remove(idx);
                if let NodeKind::Attr(a) = &mut removed.borrow_mut().kind {
                    a.owner_element = None;
                }
            }
        });
    }

    /// https://dom.spec.whatwg.org/#dom-element-toggleattribute
    pub fn toggle_attribute(&self, qname: &str, force: Option<bool>) -> DomResult<bool> {
        super::validate_name(qname)?;
        let present = self.has_attribute(qname);
        match force {
            Some(true) => {
                if !present {
                    self.set_attribute(qname, "")?;
                }
                Ok(true)
            }
            Some(false) => {
                if present {
                    self.remove_attribute(qname);
                }
                Ok(false)
            }
            None => {
                if present {
                    self.remove_attribute(qname);
                    Ok(false)
                } else {
                    self.set_attribute(qname, "")?;
                    Ok(true)
                }
            }
        }
    }

    /// https://dom.spec.whatwg.org/#dom-element-attributes
    pub fn attributes(&self) -> NamedNodeMap {
        NamedNodeMap::new(self.clone())
    }
    pub(crate) fn all_attrs(&self) -> Vec<Attr> {
        self.with_data(|e| e.attributes.attrs.iter().cloned().map(|r| Attr(Node(r))).collect())
    }

    /// https://dom.spec.whatwg.org/#dom-element-getattributenode
    pub fn get_attribute_node(&self, qname: &str) -> Option<Attr> {
        self.find_by_qname(qname).map(|r| Attr(Node(r)))
    }
    /// https://dom.spec.whatwg.org/#dom-element-getattributenodens
    pub fn get_attribute_node_ns(&self, ns: Option<&str>, local: &str) -> Option<Attr> {
        self.find_by_ns(ns.filter(|s| !s.is_empty()), local).map(|r| Attr(Node(r)))
    }

    /// https://dom.spec.whatwg.org/#dom-element-setattributenode
    /// https://dom.spec.whatwg.org/#dom-element-setattributenodens
    ///
    /// Shared by both (WHATWG's `setAttributeNode`/`setAttributeNodeNS` are the same algorithm):
    /// errors with `InUseAttributeError` if `attr` is already owned by a different element.
    pub fn set_attribute_node(&self, attr: &Attr) -> DomResult<Option<Attr>> {
        if let Some(owner) = attr.owner_element() {
            if owner != *self {
                return Err(DomError::InUseAttribute(
                    "attribute is already owned by another element".into(),
                ));
            }
            return Ok(Some(attr.clone()));
        }
        let (ns, local) = match &attr.node().0.borrow().kind {
            NodeKind::Attr(a) => (a.namespace.clone(), a.local_name.clone()),
            _ => unreachable!(),
        };
        let old = self.find_by_ns(ns.as_deref(), &local).map(|r| Attr(Node(r)));
        if let Some(old) = &old {
            self.with_data_mut(|e| {
                let idx = e
                    .attributes
                    .attrs
                    .iter()
                    .position(|r| Node(r.clone()) == *old.node())
                    .expect("old attribute was just found in this table");
                e.attributes.attrs[idx] = attr.node().0.clone();
            });
            old.set_owner_element(None);
        } else {
            self.with_data_mut(|e| e.attributes.attrs.push(attr.node().0.clone()));
        }
        attr.set_owner_element(Some(self));
        Ok(old)
    }
    pub fn set_attribute_node_ns(&self, attr: &Attr) -> DomResult<Option<Attr>> {
        self.set_attribute_node(attr)
    }

    /// https://dom.spec.whatwg.org/#dom-element-removeattributenode
    pub fn remove_attribute_node(&self, attr: &Attr) -> DomResult<Attr> {
        let removed = self.with_data_mut(|e| {
            let idx = e
                .attributes
                .attrs
                .iter()
                .position(|r| Node(r.clone()) == *attr.node());
            idx.map(|idx| e.attributes.attrs.remove(idx))
        });
        match removed {
            Some(r) => {
                let attr = Attr(Node(r));
                attr.set_owner_element(None);
                Ok(attr)
            }
            None => Err(DomError::NotFound("attribute is not in this element's attribute list".into())),
        }
    }

    pub(crate) fn clone_attributes_from(&self, src: &Element) {
        let owner_doc = self.0.owner_document();
        let copies: Vec<NodeRef> = src.with_data(|se| {
            se.attributes
                .attrs
                .iter()
                .map(|r| match &r.borrow().kind {
                    NodeKind::Attr(a) => NodeData::new(
                        NodeKind::Attr(super::attr::AttrData {
                            namespace: a.namespace.clone(),
                            prefix: a.prefix.clone(),
                            local_name: a.local_name.clone(),
                            value: a.value.clone(),
                            owner_element: Some(self.0.downgrade()),
                        }),
                        owner_doc.as_ref().map(|d| d.node().downgrade()),
                    ),
                    _ => unreachable!(),
                })
                .collect()
        });
        self.with_data_mut(|e| e.attributes.attrs = copies);
    }

    // ---- traversal (Element-filtered) --------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-parentnode-children
    pub fn children(&self) -> HtmlCollection {
        HtmlCollection::children_of(self.0.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-childelementcount
    pub fn child_element_count(&self) -> u32 {
        self.0.children().iter().filter(|n| n.node_type() == NodeType::Element).count() as u32
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-firstelementchild
    pub fn first_element_child(&self) -> Option<Element> {
        self.0.children().into_iter().find_map(|n| n.as_element())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-lastelementchild
    pub fn last_element_child(&self) -> Option<Element> {
        self.0.children().into_iter().rev().find_map(|n| n.as_element())
    }

    // ---- selector-engine boundary -------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-element-matches
    pub fn matches(&self, matcher: &dyn ElementMatcher) -> bool {
        matcher.matches(self)
    }
    /// https://dom.spec.whatwg.org/#dom-element-closest
    pub fn closest(&self, matcher: &dyn ElementMatcher) -> Option<Element> {
        let mut cur = Some(self.clone());
        while let Some(el) = cur {
            if matcher.matches(&el) {
                return Some(el);
            }
            cur = el.0.parent_element();
        }
        None
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselector
    pub fn query_selector(&self, matcher: &dyn ElementMatcher) -> Option<Element> {
        find_first_descendant_element(&self.0, matcher)
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall
    pub fn query_selector_all(&self, matcher: &dyn ElementMatcher) -> NodeList {
        NodeList::static_snapshot(collect_descendant_elements(&self.0, matcher))
    }

    // ---- ChildNode / ParentNode mixins -------------------------------------------------------

    pub fn before(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::before(&self.0, nodes)
    }
    pub fn after(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::after(&self.0, nodes)
    }
    pub fn replace_with(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::replace_with(&self.0, nodes)
    }
    pub fn remove(&self) -> DomResult<()> {
        super::remove_self(&self.0)
    }
    pub fn append(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::append_nodes(&self.0, nodes)
    }
    pub fn prepend(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::prepend_nodes(&self.0, nodes)
    }
    pub fn replace_children(&self, nodes: Vec<super::NodeOrString>) -> DomResult<()> {
        super::replace_children(&self.0, nodes)
    }

    // ---- shadow DOM ----------------------------------------------------------------------------

    /// Reached only through this accessor, never through `parent_node` — a shadow root is
    /// deliberately invisible to ordinary tree traversal.
    pub fn shadow_root(&self) -> Option<super::ShadowRoot> {
        self.with_data(|e| e.shadow_root.clone())
            .and_then(|w| w.upgrade())
            .map(Node)
            .and_then(|n| n.as_shadow_root())
    }
    pub(crate) fn set_shadow_root(&self, root: &Node) {
        self.with_data_mut(|e| e.shadow_root = Some(root.downgrade()));
    }

    /// https://dom.spec.whatwg.org/#dom-element-attachshadow
    ///
    /// The returned node is a plain `DocumentFragment` node carrying shadow-specific state,
    /// bound to `self` as host; it is never linked in as a child of `self` — the host's shadow
    /// pointer is a side table, not a structural link.
    pub fn attach_shadow(&self, mode: ShadowRootMode, options: ShadowRootInit) -> DomResult<ShadowRoot> {
        if self.shadow_root().is_some() {
            return Err(DomError::NotSupported(
                "element already hosts a shadow root".into(),
            ));
        }
        let owner = self.0.owner_document();
        let node_ref = NodeData::new(
            NodeKind::DocumentFragment(DocumentFragmentData {
                shadow: Some(ShadowData {
                    mode,
                    host: self.0.downgrade(),
                    delegates_focus: options.delegates_focus,
                    slot_assignment: options.slot_assignment,
                    clonable: options.clonable,
                    serializable: options.serializable,
                }),
            }),
            owner.map(|d| d.node().downgrade()),
        );
        let shadow_node = Node(node_ref);
        self.set_shadow_root(&shadow_node);
        Ok(shadow_node.as_shadow_root().expect("just constructed as a shadow-bearing fragment"))
    }
}

/// https://dom.spec.whatwg.org/#concept-getelementsbyid shared by Document/DocumentFragment.
pub(crate) fn get_element_by_id(root: &Node, id: &str) -> Option<Element> {
    find_first_descendant_element(root, &|el: &Element| el.id() == id)
}

pub(crate) fn find_first_descendant_element(root: &Node, matcher: &dyn ElementMatcher) -> Option<Element> {
    for child in root.children() {
        if let Some(el) = child.as_element() {
            if matcher.matches(&el) {
                return Some(el);
            }
        }
        if let Some(found) = find_first_descendant_element(&child, matcher) {
            return Some(found);
        }
    }
    None
}

pub(crate) fn collect_descendant_elements(root: &Node, matcher: &dyn ElementMatcher) -> Vec<Node> {
    let mut out = Vec::new();
    walk_elements(root, matcher, &mut out);
    out
}
fn walk_elements(node: &Node, matcher: &dyn ElementMatcher, out: &mut Vec<Node>) {
    for child in node.children() {
        if let Some(el) = child.as_element() {
            if matcher.matches(&el) {
                out.push(child.clone());
            }
        }
        walk_elements(&child, matcher, out);
    }
}
