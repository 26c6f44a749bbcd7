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

//! https://dom.spec.whatwg.org/#interface-documentfragment
//! https://dom.spec.whatwg.org/#interface-shadowroot
//!
//! A `ShadowRoot` is, structurally, a `DocumentFragment` with extra shadow-specific state attached;
//! `d.shadow.is_some()` is exactly the tag `Node::as_shadow_root` checks to decide whether a
//! `DocumentFragment` node is really a shadow root. This deliberately preserves the documented
//! `getRootNode`/`parentNode` asymmetry: a shadow root is reachable only from
//! `Element::shadow_root`, never by walking `parentNode` out of the shadow tree.

use super::{
    element::{self, ElementMatcher},
    node_list::NodeList,
    Element, Node, WeakNodeRef,
};
use crate::error::DomResult;

/// https://dom.spec.whatwg.org/#enumdef-shadowrootmode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRootMode {
    Open,
    Closed,
}

/// https://dom.spec.whatwg.org/#enumdef-slotassignmentmode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAssignmentMode {
    Named,
    Manual,
}

pub(crate) struct ShadowData {
    pub(crate) mode: ShadowRootMode,
    pub(crate) host: WeakNodeRef,
    pub(crate) delegates_focus: bool,
    pub(crate) slot_assignment: SlotAssignmentMode,
    pub(crate) clonable: bool,
    pub(crate) serializable: bool,
}

pub(crate) struct DocumentFragmentData {
    pub(crate) shadow: Option<ShadowData>,
}

impl DocumentFragmentData {
    pub(crate) fn plain() -> Self {
        DocumentFragmentData { shadow: None }
    }

    /// A shadow root is never carried across a plain `cloneNode` call in this crate (only a host
    /// element's own cloning steps would know whether `clonable` permits it, and custom-element
    /// reactions are out of scope here), so every clone of a `DocumentFragment` — shadow
    /// root or not — comes back as an ordinary fragment.
    pub(crate) fn shallow_clone(&self) -> DocumentFragmentData {
        DocumentFragmentData { shadow: None }
    }
}

/// A handle onto a `DocumentFragment` node.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentFragment(pub(crate) Node);

impl DocumentFragment {
    pub fn node(&self) -> &Node {
        &self.0
    }

    /// https://dom.spec.whatwg.org/#dom-parentnode-children
    pub fn children(&self) -> super::HtmlCollection {
        super::HtmlCollection::children_of(self.0.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-childelementcount
    pub fn child_element_count(&self) -> u32 {
        self.0.children().iter().filter(|n| n.as_element().is_some()).count() as u32
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-firstelementchild
    pub fn first_element_child(&self) -> Option<Element> {
        self.0.children().into_iter().find_map(|n| n.as_element())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-lastelementchild
    pub fn last_element_child(&self) -> Option<Element> {
        self.0.children().into_iter().rev().find_map(|n| n.as_element())
    }

    /// https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        element::get_element_by_id(&self.0, id)
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselector
    pub fn query_selector(&self, matcher: &dyn ElementMatcher) -> Option<Element> {
        element::find_first_descendant_element(&self.0, matcher)
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall
    pub fn query_selector_all(&self, matcher: &dyn ElementMatcher) -> NodeList {
        NodeList::static_snapshot(element::collect_descendant_elements(&self.0, matcher))
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
}

/// A handle onto a `DocumentFragment` node whose `shadow` field is populated.
#[derive(Clone, PartialEq, Eq)]
pub struct ShadowRoot(pub(crate) DocumentFragment);

impl ShadowRoot {
    pub fn fragment(&self) -> &DocumentFragment {
        &self.0
    }
    pub fn node(&self) -> &Node {
        self.0.node()
    }

    fn with_shadow<R>(&self, f: impl FnOnce(&ShadowData) -> R) -> R {
        match &self.0 .0 .0.borrow().kind {
            super::NodeKind::DocumentFragment(d) => f(d.shadow.as_ref().expect("ShadowRoot always has shadow data")),
            _ => unreachable!("ShadowRoot always wraps a DocumentFragment node"),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-shadowroot-mode
    pub fn mode(&self) -> ShadowRootMode {
        self.with_shadow(|s| s.mode)
    }
    /// https://dom.spec.whatwg.org/#dom-shadowroot-host
    pub fn host(&self) -> Option<Element> {
        self.with_shadow(|s| s.host.clone()).upgrade().map(Node).and_then(|n| n.as_element())
    }
    /// https://dom.spec.whatwg.org/#dom-shadowroot-delegatesfocus
    pub fn delegates_focus(&self) -> bool {
        self.with_shadow(|s| s.delegates_focus)
    }
    /// https://dom.spec.whatwg.org/#dom-shadowroot-slotassignment
    pub fn slot_assignment(&self) -> SlotAssignmentMode {
        self.with_shadow(|s| s.slot_assignment)
    }
    /// https://dom.spec.whatwg.org/#dom-shadowroot-clonable
    pub fn clonable(&self) -> bool {
        self.with_shadow(|s| s.clonable)
    }
    /// https://dom.spec.whatwg.org/#dom-shadowroot-serializable
    pub fn serializable(&self) -> bool {
        self.with_shadow(|s| s.serializable)
    }
}
