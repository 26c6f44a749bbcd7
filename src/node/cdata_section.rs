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

//! https://dom.spec.whatwg.org/#interface-cdatasection
//!
//! A CDATASection is a Text node in every respect except its node type and node name; this crate
//! keeps it as a distinct `NodeKind` variant (rather than a flag on `Text`) because `splitText`
//! must still produce a plain Text node per WHATWG even when called through the shared
//! character-data path, and the two must remain individually addressable via `as_text`/
//! `as_cdata_section`.

use {
    super::{CharacterData, Node},
    crate::error::DomResult,
};

#[derive(Clone, PartialEq, Eq)]
pub struct CdataSection(pub(crate) Node);

impl CdataSection {
    pub fn node(&self) -> &Node {
        &self.0
    }

    fn cd(&self) -> CharacterData {
        CharacterData(self.0.clone())
    }

    pub fn data(&self) -> String {
        self.cd().data()
    }
    pub fn set_data(&self, data: &str) -> DomResult<()> {
        self.cd().set_data(data)
    }
    pub fn length(&self) -> u32 {
        self.cd().length()
    }
    pub fn substring_data(&self, offset: u32, count: u32) -> DomResult<String> {
        self.cd().substring_data(offset, count)
    }
    pub fn append_data(&self, data: &str) -> DomResult<()> {
        self.cd().append_data(data)
    }
    pub fn insert_data(&self, offset: u32, data: &str) -> DomResult<()> {
        self.cd().insert_data(offset, data)
    }
    pub fn delete_data(&self, offset: u32, count: u32) -> DomResult<()> {
        self.cd().delete_data(offset, count)
    }
    pub fn replace_data(&self, offset: u32, count: u32, data: &str) -> DomResult<()> {
        self.cd().replace_data(offset, count, data)
    }
}
