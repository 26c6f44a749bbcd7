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

//! The DOM's [exception taxonomy](https://webidl.spec.whatwg.org/#idl-DOMException). Every
//! validation failure that the standard describes as "throw a `FooError` `DOMException`" surfaces
//! here as a variant of [`DomError`], carrying the same `name` a browser would expose on
//! `DOMException.name` plus the legacy numeric `code`.

use thiserror::Error;

/// The result type returned by every fallible DOM operation in this crate.
pub type DomResult<T> = Result<T, DomError>;

/// A DOM exception, tagged with the WHATWG exception name it corresponds to.
///
/// `Display` renders the message a caller would see; [`DomError::name`] and [`DomError::code`]
/// expose the `DOMException.name`/`DOMException.code` fields a browser would report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("IndexSizeError: {0}")]
    IndexSize(String),
    #[error("HierarchyRequestError: {0}")]
    HierarchyRequest(String),
    #[error("WrongDocumentError: {0}")]
    WrongDocument(String),
    #[error("InvalidCharacterError: {0}")]
    InvalidCharacter(String),
    #[error("NoModificationAllowedError: {0}")]
    NoModificationAllowed(String),
    #[error("NotFoundError: {0}")]
    NotFound(String),
    #[error("NotSupportedError: {0}")]
    NotSupported(String),
    #[error("InUseAttributeError: {0}")]
    InUseAttribute(String),
    #[error("InvalidStateError: {0}")]
    InvalidState(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
    #[error("NamespaceError: {0}")]
    Namespace(String),
    #[error("InvalidNodeTypeError: {0}")]
    InvalidNodeType(String),
}

impl DomError {
    /// The string a browser would report as `DOMException.name`.
    pub fn name(&self) -> &'static str {
        match self {
            DomError::IndexSize(_) => "IndexSizeError",
            DomError::HierarchyRequest(_) => "HierarchyRequestError",
            DomError::WrongDocument(_) => "WrongDocumentError",
            DomError::InvalidCharacter(_) => "InvalidCharacterError",
            DomError::NoModificationAllowed(_) => "NoModificationAllowedError",
            DomError::NotFound(_) => "NotFoundError",
            DomError::NotSupported(_) => "NotSupportedError",
            DomError::InUseAttribute(_) => "InUseAttributeError",
            DomError::InvalidState(_) => "InvalidStateError",
            DomError::Syntax(_) => "SyntaxError",
            DomError::Namespace(_) => "NamespaceError",
            DomError::InvalidNodeType(_) => "InvalidNodeTypeError",
        }
    }

    /// The legacy numeric constant a browser would report as `DOMException.code`.
    ///
    /// Mirrors the legacy DOMException name-to-code table from the full WebIDL exception set;
    /// only the subset this crate actually raises is represented.
    pub fn code(&self) -> u16 {
        match self {
            DomError::IndexSize(_) => 1,
            DomError::HierarchyRequest(_) => 3,
            DomError::WrongDocument(_) => 4,
            DomError::InvalidCharacter(_) => 5,
            DomError::NoModificationAllowed(_) => 7,
            DomError::NotFound(_) => 8,
            DomError::NotSupported(_) => 9,
            DomError::InUseAttribute(_) => 10,
            DomError::InvalidState(_) => 11,
            DomError::Syntax(_) => 12,
            DomError::Namespace(_) => 14,
            DomError::InvalidNodeType(_) => 24,
        }
    }
}
