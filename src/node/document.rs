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

//! https://dom.spec.whatwg.org/#interface-document
//!
//! The `Document` node is the root of a tree and the factory for every other node kind: every
//! node it creates carries this document as its owner. It also carries the registry of live
//! `Range`s that `crate::range`'s `notify_*` hooks walk on every mutation.

use std::cell::RefCell;

use super::{
    attr::AttrData,
    cdata_section::CdataSection,
    character_data::CharacterDataInner,
    comment::Comment,
    document_fragment::DocumentFragmentData,
    document_type::DocumentTypeData,
    element::{self, ElementData, ElementMatcher},
    html_collection::HtmlCollection,
    node_list::NodeList,
    processing_instruction::ProcessingInstructionData,
    text::Text,
    Attr, DocumentFragment, DocumentType, Element, Node, NodeData, NodeKind, NodeType,
};
use crate::{
    error::DomResult,
    namespace,
    range::Range,
};

pub(crate) struct DocumentData {
    pub(crate) content_type: String,
    pub(crate) url: String,
    pub(crate) character_set: &'static str,
    /// Live `Range`s created against this document; `Range` itself holds only boundary points,
    /// so this is the one place a document needs a side table at all.
    pub(crate) live_ranges: RefCell<Vec<Range>>,
}

impl DocumentData {
    fn new() -> Self {
        DocumentData {
            content_type: "application/xml".to_string(),
            url: "about:blank".to_string(),
            character_set: "UTF-8",
            live_ranges: RefCell::new(Vec::new()),
        }
    }

    /// A document's clone is always a new, empty document: cloning a `Document` never pulls
    /// along the nodes it owns — those are cloned individually by `Node::clone_node`'s recursive
    /// walk over children, not through this step.
    pub(crate) fn shallow_clone(&self) -> DocumentData {
        DocumentData {
            content_type: self.content_type.clone(),
            url: self.url.clone(),
            character_set: self.character_set,
            live_ranges: RefCell::new(Vec::new()),
        }
    }
}

/// A handle onto a `Document` node.
#[derive(Clone, PartialEq, Eq)]
pub struct Document(pub(crate) Node);

impl Document {
    /// https://dom.spec.whatwg.org/#dom-document-document
    pub fn new() -> Self {
        let node_ref = NodeData::new(NodeKind::Document(DocumentData::new()), None);
        Document(Node(node_ref))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    fn with_data<R>(&self, f: impl FnOnce(&DocumentData) -> R) -> R {
        match &self.0 .0.borrow().kind {
            NodeKind::Document(d) => f(d),
            _ => unreachable!("Document always wraps a Document node"),
        }
    }

    // ---- metadata -----------------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-document-contenttype
    pub fn content_type(&self) -> String {
        self.with_data(|d| d.content_type.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-document-url
    pub fn url(&self) -> String {
        self.with_data(|d| d.url.clone())
    }
    pub fn set_url(&self, url: &str) {
        if let NodeKind::Document(d) = &mut self.0 .0.borrow_mut().kind {
            d.url = url.to_string();
        }
    }
    pub(crate) fn set_content_type(&self, content_type: &str) {
        if let NodeKind::Document(d) = &mut self.0 .0.borrow_mut().kind {
            d.content_type = content_type.to_string();
        }
    }
    /// https://dom.spec.whatwg.org/#dom-document-characterset
    pub fn character_set(&self) -> &'static str {
        self.with_data(|d| d.character_set)
    }

    // ---- structural accessors -------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-document-doctype
    pub fn doctype(&self) -> Option<DocumentType> {
        self.0.children().into_iter().find_map(|n| n.as_document_type())
    }
    /// https://dom.spec.whatwg.org/#dom-document-documentelement
    pub fn document_element(&self) -> Option<Element> {
        self.0.children().into_iter().find_map(|n| n.as_element())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-children
    pub fn children(&self) -> HtmlCollection {
        HtmlCollection::children_of(self.0.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-firstelementchild
    pub fn first_element_child(&self) -> Option<Element> {
        self.document_element()
    }

    // ---- HTML document conveniences: head, body, title ---------------------------------------
    //
    // These three accessors reach across the HTML tree shape to find well-known elements by
    // local name, even though HTML parsing itself is out of scope for this crate; they're core
    // `Document` operations, so they're implemented here rather than deferred to a consumer.

    /// https://html.spec.whatwg.org/multipage/dom.html#dom-document-head
    pub fn head(&self) -> Option<Element> {
        let root = self.document_element()?;
        root.node().children().into_iter().find_map(|n| {
            n.as_element().filter(|e| e.local_name().eq_ignore_ascii_case("head"))
        })
    }

    /// https://html.spec.whatwg.org/multipage/dom.html#dom-document-body
    pub fn body(&self) -> Option<Element> {
        let root = self.document_element()?;
        root.node().children().into_iter().find_map(|n| {
            n.as_element().filter(|e| {
                let name = e.local_name();
                name.eq_ignore_ascii_case("body") || name.eq_ignore_ascii_case("frameset")
            })
        })
    }

    /// https://html.spec.whatwg.org/multipage/dom.html#document.title
    ///
    /// Walks the whole tree in document order for the first `<title>` element (or `<svg:title>`
    /// child of the root for an SVG document), concatenating its descendant text. This matches
    /// the read-only half of the HTML algorithm; parsing/serialization are out of scope here.
    pub fn title(&self) -> String {
        let candidate = if let Some(root) = self.document_element() {
            if root.local_name().eq_ignore_ascii_case("svg") {
                root.node().children().into_iter().find_map(|n| {
                    n.as_element().filter(|e| e.local_name() == "title")
                })
            } else {
                find_first_title(self.0.clone())
            }
        } else {
            None
        };
        match candidate {
            Some(el) => collapse_whitespace(&el.node().text_content().unwrap_or_default()),
            None => String::new(),
        }
    }

    /// https://html.spec.whatwg.org/multipage/dom.html#document.title
    pub fn set_title(&self, value: &str) -> DomResult<()> {
        let Some(root) = self.document_element() else { return Ok(()) };
        if root.local_name().eq_ignore_ascii_case("svg") {
            let existing = root.node().children().into_iter().find_map(|n| {
                n.as_element().filter(|e| e.local_name() == "title")
            });
            let title_el = match existing {
                Some(el) => el,
                None => {
                    let el = self.new_element(
                        Some(namespace::SVG.to_string()),
                        None,
                        "title".to_string(),
                    );
                    super::insert_before(el.node().clone(), root.node(), root.node().first_child())?;
                    el
                }
            };
            title_el.node().set_text_content(Some(value))?;
            return Ok(());
        }
        if let Some(head) = self.head() {
            let title_el = match find_first_title(self.0.clone()) {
                Some(el) => el,
                None => {
                    let el = self.new_element(None, None, "title".to_string());
                    super::append_child(el.node(), head.node())?;
                    el
                }
            };
            title_el.node().set_text_content(Some(value))?;
        }
        Ok(())
    }

    // ---- node factories ---------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-document-createelement
    pub fn create_element(&self, local_name: &str) -> DomResult<Element> {
        super::validate_name(local_name)?;
        Ok(self.new_element(Some(namespace::HTML.to_string()), None, local_name.to_string()))
    }

    /// https://dom.spec.whatwg.org/#dom-document-createelementns
    pub fn create_element_ns(&self, ns: Option<&str>, qualified_name: &str) -> DomResult<Element> {
        let (namespace, prefix, local_name) = super::validate_and_extract(ns, qualified_name)?;
        Ok(self.new_element(namespace, prefix, local_name))
    }

    fn new_element(&self, namespace: Option<String>, prefix: Option<String>, local_name: String) -> Element {
        let node_ref = NodeData::new(
            NodeKind::Element(ElementData {
                namespace,
                prefix,
                local_name,
                attributes: element::AttributeTable::new(),
                shadow_root: None,
            }),
            Some(self.0.downgrade()),
        );
        Element(Node(node_ref))
    }

    /// https://dom.spec.whatwg.org/#dom-document-createtextnode
    pub fn create_text_node(&self, data: &str) -> Text {
        let node_ref = NodeData::new(NodeKind::Text(CharacterDataInner::new(data)), Some(self.0.downgrade()));
        Text(Node(node_ref))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createcomment
    pub fn create_comment(&self, data: &str) -> Comment {
        let node_ref = NodeData::new(NodeKind::Comment(CharacterDataInner::new(data)), Some(self.0.downgrade()));
        Comment(Node(node_ref))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createcdatasection
    ///
    /// This crate doesn't carry over the real standard's "must not be an HTML document" /
    /// "data must not contain `]]>`" restrictions (there's no HTML-vs-XML document distinction
    /// here), so this is infallible.
    pub fn create_cdata_section(&self, data: &str) -> CdataSection {
        let node_ref = NodeData::new(
            NodeKind::CdataSection(CharacterDataInner::new(data)),
            Some(self.0.downgrade()),
        );
        CdataSection(Node(node_ref))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createprocessinginstruction
    pub fn create_processing_instruction(
        &self,
        target: &str,
        data: &str,
    ) -> DomResult<super::ProcessingInstruction> {
        super::validate_name(target)?;
        if data.contains("?>") {
            return Err(crate::error::DomError::InvalidCharacter(
                "processing instruction data must not contain '?>'".into(),
            ));
        }
        let node_ref = NodeData::new(
            NodeKind::ProcessingInstruction(ProcessingInstructionData {
                target: target.to_string(),
                data: CharacterDataInner::new(data),
            }),
            Some(self.0.downgrade()),
        );
        Ok(super::ProcessingInstruction(Node(node_ref)))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createdocumentfragment
    pub fn create_document_fragment(&self) -> DocumentFragment {
        let node_ref = NodeData::new(
            NodeKind::DocumentFragment(DocumentFragmentData::plain()),
            Some(self.0.downgrade()),
        );
        DocumentFragment(Node(node_ref))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createattribute
    pub fn create_attribute(&self, local_name: &str) -> DomResult<Attr> {
        super::validate_name(local_name)?;
        Ok(self.new_attr(None, None, local_name.to_string()))
    }
    /// https://dom.spec.whatwg.org/#dom-document-createattributens
    pub fn create_attribute_ns(&self, ns: Option<&str>, qualified_name: &str) -> DomResult<Attr> {
        let (namespace, prefix, local_name) = super::validate_and_extract(ns, qualified_name)?;
        Ok(self.new_attr(namespace, prefix, local_name))
    }
    fn new_attr(&self, namespace: Option<String>, prefix: Option<String>, local_name: String) -> Attr {
        let node_ref = NodeData::new(
            NodeKind::Attr(AttrData {
                namespace,
                prefix,
                local_name,
                value: String::new(),
                owner_element: None,
            }),
            Some(self.0.downgrade()),
        );
        Attr(Node(node_ref))
    }

    /// https://dom.spec.whatwg.org/#dom-document-implementation
    ///
    /// Lazily materialized: the handle itself is stateless (it just closes over this document),
    /// so "lazy" here just means there is no field to initialize — every call produces an
    /// equally valid handle.
    pub fn implementation(&self) -> DomImplementation {
        DomImplementation(self.clone())
    }

    /// https://dom.spec.whatwg.org/#dom-document-createrange
    pub fn create_range(&self) -> Range {
        let range = Range::new(self.clone());
        self.register_range(&range);
        range
    }
    /// Registers `range` against this document so the live-range `notify_*` hooks in
    /// `crate::range` keep adjusting it. Every created range, including cloned ranges, is
    /// registered with its owning document this way.
    pub(crate) fn register_range(&self, range: &Range) {
        self.with_data(|d| d.live_ranges.borrow_mut().push(range.clone()));
    }
    pub(crate) fn live_ranges(&self) -> Vec<Range> {
        self.with_data(|d| d.live_ranges.borrow().clone())
    }

    // ---- queries ------------------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-nonelementparentnode-getelementbyid
    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        element::get_element_by_id(&self.0, id)
    }
    /// https://dom.spec.whatwg.org/#dom-document-getelementsbytagname
    pub fn get_elements_by_tag_name(&self, qualified_name: &str) -> HtmlCollection {
        if qualified_name == "*" {
            return HtmlCollection::descendants_of(self.0.clone(), std::rc::Rc::new(|_: &Element| true));
        }
        let wanted = qualified_name.to_string();
        HtmlCollection::descendants_of(
            self.0.clone(),
            std::rc::Rc::new(move |el: &Element| el.tag_name() == wanted || el.local_name() == wanted),
        )
    }
    /// https://dom.spec.whatwg.org/#dom-document-getelementsbytagnamens
    pub fn get_elements_by_tag_name_ns(&self, ns: Option<&str>, local_name: &str) -> HtmlCollection {
        let ns = ns.map(str::to_string);
        let wanted_any_ns = ns.is_none();
        let wanted_local = local_name.to_string();
        HtmlCollection::descendants_of(
            self.0.clone(),
            std::rc::Rc::new(move |el: &Element| {
                (wanted_local == "*" || el.local_name() == wanted_local)
                    && (wanted_any_ns || el.namespace_uri() == ns)
            }),
        )
    }
    /// https://dom.spec.whatwg.org/#dom-document-getelementsbyclassname
    pub fn get_elements_by_class_name(&self, class_names: &str) -> HtmlCollection {
        let wanted: Vec<String> = class_names
            .split(|c: char| c.is_ascii_whitespace())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        HtmlCollection::descendants_of(
            self.0.clone(),
            std::rc::Rc::new(move |el: &Element| {
                wanted.iter().all(|w| el.class_list().contains(w))
            }),
        )
    }
    /// A `getElementsByName`-style query: every HTML-namespace element whose `name` attribute
    /// equals `name`, in tree order. This is the concrete motivation for `NodeList`'s `Filtered`
    /// shape.
    pub fn get_elements_by_name(&self, name: &str) -> NodeList {
        let name = name.to_string();
        NodeList::filtered(
            self.0.clone(),
            std::rc::Rc::new(move |n: &Node| {
                n.as_element().is_some_and(|el| {
                    el.namespace_uri().as_deref() == Some(namespace::HTML)
                        && el.get_attribute("name").as_deref() == Some(name.as_str())
                })
            }),
        )
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselector
    pub fn query_selector(&self, matcher: &dyn ElementMatcher) -> Option<Element> {
        element::find_first_descendant_element(&self.0, matcher)
    }
    /// https://dom.spec.whatwg.org/#dom-parentnode-queryselectorall
    pub fn query_selector_all(&self, matcher: &dyn ElementMatcher) -> NodeList {
        NodeList::static_snapshot(element::collect_descendant_elements(&self.0, matcher))
    }

    // ---- adoption / import -------------------------------------------------------------------

    /// https://dom.spec.whatwg.org/#dom-document-adoptnode
    pub fn adopt_node(&self, node: &Node) -> DomResult<Node> {
        if node.node_type() == NodeType::Document {
            return Err(crate::error::DomError::NotSupported(
                "a Document cannot be adopted into another Document".into(),
            ));
        }
        super::adopt_node(node, Some(self));
        Ok(node.clone())
    }
    /// https://dom.spec.whatwg.org/#dom-document-importnode
    pub fn import_node(&self, node: &Node, deep: bool) -> DomResult<Node> {
        if node.node_type() == NodeType::Document {
            return Err(crate::error::DomError::NotSupported(
                "a Document cannot be imported into another Document".into(),
            ));
        }
        let copy = node.clone_node(deep);
        super::adopt_node(&copy, Some(self));
        Ok(copy)
    }

    // ---- ParentNode mixin -------------------------------------------------------------------

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

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

/// https://dom.spec.whatwg.org/#domimplementation
///
/// A thin factory for the node kinds a `Document` doesn't create directly (`DocumentType`, and a
/// fresh `Document` of a given flavor). Every node it produces is owned by the document that
/// handed out this handle.
#[derive(Clone)]
pub struct DomImplementation(Document);

impl DomImplementation {
    /// https://dom.spec.whatwg.org/#dom-domimplementation-createdocumenttype
    pub fn create_document_type(&self, name: &str, public_id: &str, system_id: &str) -> DomResult<DocumentType> {
        super::validate_name(name)?;
        let node_ref = NodeData::new(
            NodeKind::DocumentType(DocumentTypeData {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            }),
            Some(self.0 .0.downgrade()),
        );
        Ok(DocumentType(Node(node_ref)))
    }

    /// https://dom.spec.whatwg.org/#dom-domimplementation-createdocument
    ///
    /// Minimal XML document creation: builds a fresh, otherwise empty `Document` and, if
    /// `qualified_name` is non-empty, appends a single root element in `namespace`.
    pub fn create_document(&self, namespace: Option<&str>, qualified_name: &str) -> DomResult<Document> {
        let doc = Document::new();
        if !qualified_name.is_empty() {
            let el = doc.create_element_ns(namespace, qualified_name)?;
            super::append_child(el.node(), doc.node())?;
        }
        Ok(doc)
    }

    /// https://dom.spec.whatwg.org/#dom-domimplementation-createhtmldocument
    pub fn create_html_document(&self, title: &str) -> DomResult<Document> {
        let doc = Document::new();
        doc.set_content_type("text/html");
        let doctype_node = NodeData::new(
            NodeKind::DocumentType(DocumentTypeData {
                name: "html".to_string(),
                public_id: String::new(),
                system_id: String::new(),
            }),
            Some(doc.node().downgrade()),
        );
        super::append_child(&Node(doctype_node), doc.node())?;
        let html = doc.new_element(Some(namespace::HTML.to_string()), None, "html".to_string());
        super::append_child(html.node(), doc.node())?;
        let head = doc.new_element(Some(namespace::HTML.to_string()), None, "head".to_string());
        super::append_child(head.node(), html.node())?;
        let title_el = doc.new_element(Some(namespace::HTML.to_string()), None, "title".to_string());
        super::append_child(title_el.node(), head.node())?;
        title_el.node().set_text_content(Some(title))?;
        let body = doc.new_element(Some(namespace::HTML.to_string()), None, "body".to_string());
        super::append_child(body.node(), html.node())?;
        Ok(doc)
    }

    /// https://dom.spec.whatwg.org/#dom-domimplementation-hasfeature
    pub fn has_feature(&self) -> bool {
        true
    }
}

/// Depth-first pre-order search for the first `<title>` element in the whole tree, per the HTML
/// "document title" algorithm's non-SVG branch.
fn find_first_title(root: Node) -> Option<Element> {
    for child in root.children() {
        if let Some(el) = child.as_element() {
            if el.local_name().eq_ignore_ascii_case("title") {
                return Some(el);
            }
        }
        if let Some(found) = find_first_title(child) {
            return Some(found);
        }
    }
    None
}

/// Strips and collapses ASCII whitespace runs, matching HTML's "strip and collapse whitespace".
fn collapse_whitespace(s: &str) -> String {
    s.split_ascii_whitespace().collect::<Vec<_>>().join(" ")
}
