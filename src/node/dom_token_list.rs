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

//! https://dom.spec.whatwg.org/#interface-domtokenlist
//!
//! A live, order-preserving, deduplicated view over one of an element's attributes (`class` for
//! `Element::classList`, but the type is attribute-name-agnostic so other reflected token lists
//! could reuse it). Every read re-splits the attribute's current value; there is no cached token
//! vector.

use {
    super::Element,
    crate::error::{DomError, DomResult},
};

/// A live view over one whitespace-separated attribute of an `Element`.
#[derive(Clone)]
pub struct DomTokenList {
    element: Element,
    local_name: &'static str,
}

impl DomTokenList {
    pub(crate) fn new(element: Element, local_name: &'static str) -> Self {
        DomTokenList { element, local_name }
    }

    /// https://infra.spec.whatwg.org/#ordered-set — split on ASCII whitespace, drop empty runs,
    /// keep only the first occurrence of each token.
    fn tokens(&self) -> Vec<String> {
        let value = self.element.get_attribute(self.local_name).unwrap_or_default();
        split_deduped(&value)
    }

    fn write_back(&self, tokens: Vec<String>) {
        let _ = self.element.set_attribute(self.local_name, &tokens.join(" "));
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-length
    pub fn length(&self) -> u32 {
        self.tokens().len() as u32
    }
    /// https://dom.spec.whatwg.org/#dom-domtokenlist-item
    pub fn item(&self, index: u32) -> Option<String> {
        self.tokens().into_iter().nth(index as usize)
    }
    /// https://dom.spec.whatwg.org/#dom-domtokenlist-contains
    pub fn contains(&self, token: &str) -> bool {
        self.tokens().iter().any(|t| t == token)
    }
    /// https://dom.spec.whatwg.org/#dom-domtokenlist-value
    pub fn value(&self) -> String {
        self.element.get_attribute(self.local_name).unwrap_or_default()
    }
    /// https://dom.spec.whatwg.org/#dom-domtokenlist-value
    pub fn set_value(&self, value: &str) {
        let _ = self.element.set_attribute(self.local_name, value);
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-add
    pub fn add(&self, to_add: &[&str]) -> DomResult<()> {
        for token in to_add {
            validate_token(token)?;
        }
        let had_attribute = self.element.has_attribute(self.local_name);
        let mut tokens = self.tokens();
        let mut changed = false;
        for token in to_add {
            if !tokens.iter().any(|t| t == token) {
                tokens.push((*token).to_string());
                changed = true;
            }
        }
        if changed || had_attribute {
            self.write_back(tokens);
        }
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-remove
    pub fn remove(&self, to_remove: &[&str]) -> DomResult<()> {
        for token in to_remove {
            validate_token(token)?;
        }
        let tokens = self
            .tokens()
            .into_iter()
            .filter(|t| !to_remove.contains(&t.as_str()))
            .collect();
        self.write_back(tokens);
        Ok(())
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-toggle
    pub fn toggle(&self, token: &str, force: Option<bool>) -> DomResult<bool> {
        validate_token(token)?;
        let present = self.contains(token);
        match force {
            Some(true) => {
                if !present {
                    self.add(&[token])?;
                }
                Ok(true)
            }
            Some(false) => {
                if present {
                    self.remove(&[token])?;
                }
                Ok(false)
            }
            None => {
                if present {
                    self.remove(&[token])?;
                    Ok(false)
                } else {
                    self.add(&[token])?;
                    Ok(true)
                }
            }
        }
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-replace
    ///
    /// The empty-string check for both arguments precedes the whitespace check for either.
    pub fn replace(&self, old: &str, new: &str) -> DomResult<bool> {
        if old.is_empty() || new.is_empty() {
            return Err(DomError::Syntax("DOMTokenList token must not be empty".into()));
        }
        if has_whitespace(old) || has_whitespace(new) {
            return Err(DomError::InvalidCharacter(
                "DOMTokenList token must not contain ASCII whitespace".into(),
            ));
        }
        let tokens = self.tokens();
        let Some(idx) = tokens.iter().position(|t| t == old) else {
            return Ok(false);
        };
        let mut out = Vec::with_capacity(tokens.len());
        for (i, t) in tokens.into_iter().enumerate() {
            if i == idx {
                out.push(new.to_string());
            } else if i > idx && t == new {
                // A later duplicate of the replacement value collapses away.
                continue;
            } else {
                out.push(t);
            }
        }
        self.write_back(out);
        Ok(true)
    }

    /// https://dom.spec.whatwg.org/#dom-domtokenlist-supports
    pub fn supports(&self, _token: &str) -> bool {
        true
    }
}

fn has_whitespace(token: &str) -> bool {
    token.chars().any(|c| c.is_ascii_whitespace())
}

fn validate_token(token: &str) -> DomResult<()> {
    if token.is_empty() {
        return Err(DomError::Syntax("DOMTokenList token must not be empty".into()));
    }
    if has_whitespace(token) {
        return Err(DomError::InvalidCharacter(
            "DOMTokenList token must not contain ASCII whitespace".into(),
        ));
    }
    Ok(())
}

fn split_deduped(value: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in value.split(|c: char| c.is_ascii_whitespace()).filter(|s| !s.is_empty()) {
        if !out.iter().any(|seen| seen == token) {
            out.push(token.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Document;

    fn class_list(html: &Document, classes: &str) -> DomTokenList {
        let el = html.create_element("div").unwrap();
        el.set_attribute("class", classes).unwrap();
        el.class_list()
    }

    #[test]
    fn dedupes_preserving_first_occurrence_order() {
        let doc = Document::new();
        let list = class_list(&doc, "a b a c b a");
        assert_eq!(list.length(), 3);
        assert_eq!(list.item(0).as_deref(), Some("a"));
        assert_eq!(list.item(1).as_deref(), Some("b"));
        assert_eq!(list.item(2).as_deref(), Some("c"));
    }

    #[test]
    fn add_rejects_empty_and_whitespace_tokens() {
        let doc = Document::new();
        let list = class_list(&doc, "a");
        assert!(matches!(list.add(&[""]), Err(DomError::Syntax(_))));
        assert!(matches!(list.add(&["a b"]), Err(DomError::InvalidCharacter(_))));
    }

    #[test]
    fn add_does_not_create_attribute_when_nothing_added() {
        let doc = Document::new();
        let el = doc.create_element("div").unwrap();
        let list = el.class_list();
        list.add(&[]).unwrap();
        assert!(!el.has_attribute("class"));
    }

    #[test]
    fn toggle_without_force_flips_presence() {
        let doc = Document::new();
        let list = class_list(&doc, "a");
        assert_eq!(list.toggle("a", None).unwrap(), false);
        assert_eq!(list.contains("a"), false);
        assert_eq!(list.toggle("a", None).unwrap(), true);
        assert_eq!(list.contains("a"), true);
    }

    #[test]
    fn replace_keeps_order_and_drops_later_duplicate() {
        let doc = Document::new();
        let list = class_list(&doc, "a b c");
        assert!(list.replace("b", "c").unwrap());
        assert_eq!(list.value(), "a c");
    }

    #[test]
    fn replace_missing_token_returns_false_unchanged() {
        let doc = Document::new();
        let list = class_list(&doc, "a b");
        assert_eq!(list.replace("z", "y").unwrap(), false);
        assert_eq!(list.value(), "a b");
    }
}
