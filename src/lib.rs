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

//! This crate defines the Document Object Model, the standard in-memory representation of a Web
//! page's tree of nodes. It conforms to the specification at [https://dom.spec.whatwg.org/].
//!
//! It is a leaf library: it owns the node tree, the mutation algorithms, the live views
//! (`NodeList`, `HTMLCollection`, `NamedNodeMap`, `DOMTokenList`) and the `Range`/`Selection`
//! subsystem. Parsing source text into a tree, serializing a tree back to markup, and matching
//! CSS selectors against elements are the responsibility of other crates that sit on top of this
//! one; see the module docs on [`node::Document`] for the exact boundary.

pub mod error;
pub mod namespace;
pub mod strutil;
pub mod node;
pub mod range;

pub use error::{DomError, DomResult};
pub use node::{Document, Node};
