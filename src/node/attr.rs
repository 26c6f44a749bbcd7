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

//! https://dom.spec.whatwg.org/#interface-attr
//!
//! An `Attr` is a `Node` like any other (it has a `nodeType`, participates in `cloneNode`, etc.)
//! but is never a child: it is owned by at most one `Element`, reached only through that
//! element's `NamedNodeMap`, and its `parentNode`/siblings are always `None`.

use super::{Element, Node, WeakNodeRef};

pub(crate) struct AttrData {
    pub(crate) namespace: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) local_name: String,
    pub(crate) value: String,
    pub(crate) owner_element: Option<WeakNodeRef>,
}

impl AttrData {
    pub(crate) fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }

    /// https://dom.spec.whatwg.org/#concept-node-clone: clones carry namespace/prefix/local-name
    /// and value but are never attached to an element.
    pub(crate) fn shallow_clone(&self) -> AttrData {
        AttrData {
            namespace: self.namespace.clone(),
            prefix: self.prefix.clone(),
            local_name: self.local_name.clone(),
            value: self.value.clone(),
            owner_element: None,
        }
    }
}

/// A handle onto an `Attr` node.
#[derive(Clone, PartialEq, Eq)]
pub struct Attr(pub(crate) Node);

impl Attr {
    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with_data<R>(&self, f: impl FnOnce(&AttrData) -> R) -> R {
        match &self.0 .0.borrow().kind {
            super::NodeKind::Attr(a) => f(a),
            _ => unreachable!("Attr always wraps an Attr node"),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-attr-namespaceuri
    pub fn namespace_uri(&self) -> Option<String> {
        self.with_data(|a| a.namespace.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-attr-prefix
    pub fn prefix(&self) -> Option<String> {
        self.with_data(|a| a.prefix.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-attr-localname
    pub fn local_name(&self) -> String {
        self.with_data(|a| a.local_name.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-attr-name
    pub fn name(&self) -> String {
        self.with_data(AttrData::qualified_name)
    }
    /// https://dom.spec.whatwg.org/#dom-attr-value
    pub fn value(&self) -> String {
        self.with_data(|a| a.value.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-attr-value
    ///
    /// The `Vec<NodeRef>` an owning element's `NamedNodeMap` holds contains the very same `Rc`
    /// as this handle, so a direct mutation here is already visible through the element's
    /// attribute table — no separate synchronization step is needed.
    pub fn set_value(&self, value: &str) {
        if let super::NodeKind::Attr(a) = &mut self.0 .0.borrow_mut().kind {
            a.value = value.to_string();
        }
    }
    /// https://dom.spec.whatwg.org/#dom-attr-ownerelement
    pub fn owner_element(&self) -> Option<Element> {
        self.with_data(|a| a.owner_element.clone())
            .and_then(|w| w.upgrade())
            .map(Node)
            .and_then(|n| n.as_element())
    }
    pub(crate) fn set_owner_element(&self, el: Option<&Element>) {
        if let super::NodeKind::Attr(a) = &mut self.0 .0.borrow_mut().kind {
            a.owner_element = el.map(|e| e.node().downgrade());
        }
    }
}
