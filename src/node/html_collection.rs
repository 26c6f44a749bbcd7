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

//! https://dom.spec.whatwg.org/#interface-htmlcollection
//!
//! Like [`super::NodeList`], never caches. Two shapes cover every caller in this
//! crate: `children_of` is `Element::children`/`Document::children`'s direct-child filter, and
//! `descendants_of` backs `getElementsByTagName(NS)`/`getElementsByClassName` with a predicate run
//! over every descendant element in tree order.

use std::rc::Rc;

use {
    super::{Element, Node},
    crate::namespace,
};

type Predicate = Rc<dyn Fn(&Element) -> bool>;

enum HtmlCollectionKind {
    Children(Node),
    Descendants(Node, Predicate),
}

/// A live, element-only view over part of a tree.
#[derive(Clone)]
pub struct HtmlCollection(Rc<HtmlCollectionKind>);

impl HtmlCollection {
    pub(crate) fn children_of(parent: Node) -> Self {
        HtmlCollection(Rc::new(HtmlCollectionKind::Children(parent)))
    }

    pub(crate) fn descendants_of(root: Node, predicate: Predicate) -> Self {
        HtmlCollection(Rc::new(HtmlCollectionKind::Descendants(root, predicate)))
    }

    fn snapshot(&self) -> Vec<Element> {
        match &*self.0 {
            HtmlCollectionKind::Children(parent) => {
                parent.children().into_iter().filter_map(|n| n.as_element()).collect()
            }
            HtmlCollectionKind::Descendants(root, predicate) => {
                let mut out = Vec::new();
                walk(root, predicate, &mut out);
                out
            }
        }
    }

    /// https://dom.spec.whatwg.org/#dom-htmlcollection-length
    pub fn length(&self) -> u32 {
        self.snapshot().len() as u32
    }
    /// https://dom.spec.whatwg.org/#dom-htmlcollection-item
    pub fn item(&self, index: u32) -> Option<Element> {
        self.snapshot().into_iter().nth(index as usize)
    }

    /// https://dom.spec.whatwg.org/#dom-htmlcollection-nameditem
    ///
    /// Tree order, `id` checked before the HTML-namespace `name` attribute, first match wins.
    pub fn named_item(&self, name: &str) -> Option<Element> {
        if name.is_empty() {
            return None;
        }
        self.snapshot().into_iter().find(|el| {
            el.id() == name
                || (el.namespace_uri().as_deref() == Some(namespace::HTML)
                    && el.get_attribute("name").as_deref() == Some(name))
        })
    }

    /// The supported property names: every id, then every HTML-namespace `name`
    /// attribute, in tree order, without duplicates.
    pub fn named_properties(&self) -> Vec<String> {
        let mut out = Vec::new();
        for el in self.snapshot() {
            let id = el.id();
            if !id.is_empty() && !out.contains(&id) {
                out.push(id);
            }
        }
        for el in self.snapshot() {
            if el.namespace_uri().as_deref() != Some(namespace::HTML) {
                continue;
            }
            if let Some(name) = el.get_attribute("name") {
                if !name.is_empty() && !out.contains(&name) {
                    out.push(name);
                }
            }
        }
        out
    }

    pub fn values(&self) -> Vec<Element> {
        self.snapshot()
    }
}

fn walk(node: &Node, predicate: &Predicate, out: &mut Vec<Element>) {
    for child in node.children() {
        if let Some(el) = child.as_element() {
            if predicate(&el) {
                out.push(el);
            }
        }
        walk(&child, predicate, out);
    }
}
