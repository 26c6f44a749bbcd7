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

//! The data shared by Text, Comment, CDATASection and ProcessingInstruction
//! (<https://dom.spec.whatwg.org/#interface-characterdata>), plus the handle type that exposes
//! their common operations. Data is stored as UTF-16 code units throughout, as the DOM Standard
//! requires for every `CharacterData` offset.

use {
    super::{range, Node, NodeType},
    crate::{
        error::{DomError, DomResult},
        strutil,
    },
};

#[derive(Clone)]
pub(crate) struct CharacterDataInner {
    pub(crate) data: Vec<u16>,
}

impl CharacterDataInner {
    pub(crate) fn new(data: &str) -> Self {
        CharacterDataInner { data: strutil::to_utf16(data) }
    }
}

/// A handle onto any character-data node (Text, Comment, CDATASection, or ProcessingInstruction).
#[derive(Clone, PartialEq, Eq)]
pub struct CharacterData(pub(crate) Node);

impl CharacterData {
    fn inner_units(&self) -> Vec<u16> {
        match &self.0 .0.borrow().kind {
            super::NodeKind::Text(i) | super::NodeKind::Comment(i) | super::NodeKind::CdataSection(i) => {
                i.data.clone()
            }
            super::NodeKind::ProcessingInstruction(p) => p.data.data.clone(),
            _ => unreachable!("CharacterData always wraps a character-data node"),
        }
    }

    fn set_inner_units(&self, units: Vec<u16>) {
        let mut node = self.0 .0.borrow_mut();
        match &mut node.kind {
            super::NodeKind::Text(i) | super::NodeKind::Comment(i) | super::NodeKind::CdataSection(i) => {
                i.data = units;
            }
            super::NodeKind::ProcessingInstruction(p) => p.data.data = units,
            _ => unreachable!("CharacterData always wraps a character-data node"),
        }
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-data
    pub fn data(&self) -> String {
        strutil::from_utf16(&self.inner_units())
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-data
    pub fn set_data(&self, data: &str) -> DomResult<()> {
        self.replace_data(0, self.length(), data)
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-length
    pub fn length(&self) -> u32 {
        self.inner_units().len() as u32
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-substringdata
    pub fn substring_data(&self, offset: u32, count: u32) -> DomResult<String> {
        let units = self.inner_units();
        check_offset(offset, units.len() as u32)?;
        let start = offset as usize;
        let end = start.saturating_add(count as usize);
        Ok(strutil::from_utf16(strutil::utf16_slice(&units, start, end)))
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-appenddata
    pub fn append_data(&self, data: &str) -> DomResult<()> {
        self.replace_data(self.length(), 0, data)
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-insertdata
    pub fn insert_data(&self, offset: u32, data: &str) -> DomResult<()> {
        self.replace_data(offset, 0, data)
    }

    /// https://dom.spec.whatwg.org/#dom-characterdata-deletedata
    pub fn delete_data(&self, offset: u32, count: u32) -> DomResult<()> {
        self.replace_data(offset, count, "")
    }

    /// https://dom.spec.whatwg.org/#concept-cd-replace
    ///
    /// Clamps `count` to the remaining length, splices in `data`'s UTF-16 units, and relocates
    /// every outstanding range whose endpoint falls inside or after the replaced span.
    pub fn replace_data(&self, offset: u32, count: u32, data: &str) -> DomResult<()> {
        let mut units = self.inner_units();
        check_offset(offset, units.len() as u32)?;
        let count = count.min(units.len() as u32 - offset);
        let new_units = strutil::to_utf16(data);
        let new_len = new_units.len() as u32;
        let start = offset as usize;
        let end = start + count as usize;
        units.splice(start..end, new_units);
        self.set_inner_units(units);
        if let Some(doc) = self.0.owner_document() {
            range::notify_character_data_replace(&doc, &self.0, offset, count, new_len);
        }
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-text-splittext (shared with CDATASection, which the
    /// standard's `splitText` does not restrict to Text specifically in this implementation's
    /// scope — callers go through `Text::split_text` for the typed public entry point).
    pub(crate) fn split_text(&self, offset: u32) -> DomResult<Node> {
        let units = self.inner_units();
        let len = units.len() as u32;
        if offset > len {
            return Err(DomError::IndexSize(format!(
                "offset {offset} exceeds data length {len}"
            )));
        }
        let new_data = strutil::from_utf16(&units[offset as usize..]);
        let doc = self.0.owner_document().ok_or_else(|| {
            DomError::HierarchyRequest("character data node has no owner document".into())
        })?;
        let new_node = match self.0.node_type() {
            NodeType::CdataSection => doc.create_cdata_section(&new_data).0,
            _ => doc.create_text_node(&new_data).0,
        };
        let parent = self.0.parent_node();
        self.set_inner_units(units[..offset as usize].to_vec());
        if let Some(parent) = &parent {
            let next = self.0.next_sibling();
            super::insert_node(&new_node, parent, next.as_ref())?;
        }
        range::notify_split_text(&doc, &self.0, &new_node, offset);
        Ok(new_node)
    }
}

fn check_offset(offset: u32, len: u32) -> DomResult<()> {
    if offset > len {
        Err(DomError::IndexSize(format!("offset {offset} exceeds data length {len}")))
    } else {
        Ok(())
    }
}
