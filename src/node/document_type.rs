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

//! https://dom.spec.whatwg.org/#interface-documenttype

use super::Node;

#[derive(Clone)]
pub(crate) struct DocumentTypeData {
    pub(crate) name: String,
    pub(crate) public_id: String,
    pub(crate) system_id: String,
}

/// A handle onto a `DocumentType` node.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentType(pub(crate) Node);

impl DocumentType {
    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with_data<R>(&self, f: impl FnOnce(&DocumentTypeData) -> R) -> R {
        match &self.0 .0.borrow().kind {
            super::NodeKind::DocumentType(d) => f(d),
            _ => unreachable!("DocumentType always wraps a doctype node"),
        }
    }

    /// https://dom.spec.whatwg.org/#dom-documenttype-name
    pub fn name(&self) -> String {
        self.with_data(|d| d.name.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-documenttype-publicid
    pub fn public_id(&self) -> String {
        self.with_data(|d| d.public_id.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-documenttype-systemid
    pub fn system_id(&self) -> String {
        self.with_data(|d| d.system_id.clone())
    }
}
