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

//! https://dom.spec.whatwg.org/#interface-nodelist
//!
//! `NodeList` never caches: every accessor walks the tree under its root fresh, since a live
//! view must never cache its contents. Three constructors cover every caller in this crate:
//! `child_list` (`Node::childNodes`), `filtered` (a predicate-driven depth-first walk, used for
//! `Document::getElementsByName`), and `static_snapshot` (an immutable copy, the shape
//! `querySelectorAll` returns since the selector engine that picks the nodes lives outside this
//! crate).

use std::rc::Rc;

use super::Node;

type Predicate = Rc<dyn Fn(&Node) -> bool>;

enum NodeListKind {
    Children(Node),
    Filtered(Node, Predicate),
    Static(Vec<Node>),
}

/// A live (or, for the `Static` variant, frozen) list of nodes.
#[derive(Clone)]
pub struct NodeList(Rc<NodeListKind>);

impl NodeList {
    pub(crate) fn child_list(parent: Node) -> Self {
        NodeList(Rc::new(NodeListKind::Children(parent)))
    }

    pub(crate) fn filtered(root: Node, predicate: Predicate) -> Self {
        NodeList(Rc::new(NodeListKind::Filtered(root, predicate)))
    }

    pub(crate) fn static_snapshot(nodes: Vec<Node>) -> Self {
        NodeList(Rc::new(NodeListKind::Static(nodes)))
    }

    /// The live (or frozen) contents, recomputed on every call.
    fn snapshot(&self) -> Vec<Node> {
        match &*self.0 {
            NodeListKind::Children(parent) => parent.children(),
            NodeListKind::Filtered(root, predicate) => collect_filtered(root, predicate),
            NodeListKind::Static(nodes) => nodes.clone(),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-nodelist-length
    pub fn length(&self) -> u32 {
        self.snapshot().len() as u32
    }

    /// https://dom.spec.whatwg.org/#dom-nodelist-item
    pub fn item(&self, index: i64) -> Option<Node> {
        if index < 0 {
            return None;
        }
        self.snapshot().into_iter().nth(index as usize)
    }

    pub fn for_each(&self, mut f: impl FnMut(&Node, u32)) {
        for (i, node) in self.snapshot().iter().enumerate() {
            f(node, i as u32);
        }
    }

    pub fn entries(&self) -> Vec<(u32, Node)> {
        self.snapshot()
            .into_iter()
            .enumerate()
            .map(|(i, n)| (i as u32, n))
            .collect()
    }

    pub fn keys(&self) -> Vec<u32> {
        (0..self.length()).collect()
    }

    pub fn values(&self) -> Vec<Node> {
        self.snapshot()
    }
}

/// Depth-first pre-order walk of `root`'s descendants, collecting every node `predicate` accepts.
fn collect_filtered(root: &Node, predicate: &Predicate) -> Vec<Node> {
    let mut out = Vec::new();
    walk(root, predicate, &mut out);
    out
}

fn walk(node: &Node, predicate: &Predicate, out: &mut Vec<Node>) {
    for child in node.children() {
        if predicate(&child) {
            out.push(child.clone());
        }
        walk(&child, predicate, out);
    }
}
