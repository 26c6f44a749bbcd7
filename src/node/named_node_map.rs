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

//! https://dom.spec.whatwg.org/#interface-namednodemap
//!
//! A live view over an [`Element`]'s own attribute table; it owns nothing and recomputes its
//! contents from the element on every call.

use super::{Attr, Element};

#[derive(Clone)]
pub struct NamedNodeMap(Element);

impl NamedNodeMap {
    pub(crate) fn new(element: Element) -> Self {
        NamedNodeMap(element)
    }

    pub(crate) fn all_attrs(&self) -> Vec<Attr> {
        self.0.all_attrs()
    }

    /// https://dom.spec.whatwg.org/#dom-namednodemap-length
    pub fn length(&self) -> u32 {
        self.all_attrs().len() as u32
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-item
    pub fn item(&self, index: u32) -> Option<Attr> {
        self.all_attrs().into_iter().nth(index as usize)
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-getnameditem
    pub fn get_named_item(&self, qname: &str) -> Option<Attr> {
        self.0.get_attribute_node(qname)
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-getnameditemns
    pub fn get_named_item_ns(&self, ns: Option<&str>, local: &str) -> Option<Attr> {
        self.0.get_attribute_node_ns(ns, local)
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-setnameditem
    pub fn set_named_item(&self, attr: &Attr) -> crate::DomResult<Option<Attr>> {
        self.0.set_attribute_node(attr)
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-setnameditemns
    pub fn set_named_item_ns(&self, attr: &Attr) -> crate::DomResult<Option<Attr>> {
        self.0.set_attribute_node_ns(attr)
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-removenameditem
    pub fn remove_named_item(&self, qname: &str) -> crate::DomResult<Attr> {
        match self.0.get_attribute_node(qname) {
            Some(attr) => self.0.remove_attribute_node(&attr),
            None => Err(crate::DomError::NotFound(format!("no attribute named {qname:?}"))),
        }
    }
    /// https://dom.spec.whatwg.org/#dom-namednodemap-removenameditemns
    pub fn remove_named_item_ns(&self, ns: Option<&str>, local: &str) -> crate::DomResult<Attr> {
        match self.0.get_attribute_node_ns(ns, local) {
            Some(attr) => self.0.remove_attribute_node(&attr),
            None => Err(crate::DomError::NotFound(format!("no attribute with local name {local:?}"))),
        }
    }
}
