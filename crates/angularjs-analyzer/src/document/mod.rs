//! Text of the documents the editor has open.

pub(crate) mod document_store;
pub(crate) mod text_document;

pub use document_store::DocumentStore;
pub use text_document::Document;
