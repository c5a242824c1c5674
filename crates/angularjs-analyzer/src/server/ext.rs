//! Protocol extensions spoken with the editor extension.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::request::Request;

use crate::vfs::FileId;

pub(crate) const SET_INITIAL_FILES: &str = "angularjs/setInitialFiles";
pub(crate) const PARSE_JS_FILES: &str = "parseJsFiles";
pub(crate) const FILE_DELETED: &str = "angularjs/fileDeleted";
pub(crate) const FILE_RENAMED: &str = "angularjs/fileRenamed";
pub(crate) const FILE_SAVED: &str = "angularjs/fileSaved";
pub(crate) const FILE_CHANGED: &str = "angularjs/fileChanged";
pub(crate) const UPDATE_EXCLUSION_RULES: &str = "angularjs/updateExclusionRules";

/// Server-to-client request for the text of a file. The client answers
/// `null` when it cannot provide the content.
pub enum GetFileContent {}

impl Request for GetFileContent {
    /// The file URI, sent as a one-element positional parameter list.
    type Params = (String,);
    type Result = Option<String>;
    const METHOD: &'static str = "getFileContent";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetInitialFilesParams {
    pub files: Vec<FileId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileParams {
    pub file: FileId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRenamedParams {
    pub old_file: FileId,
    pub new_file: FileId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionRulesParams {
    pub rules: Vec<String>,
}

/// Payload of the legacy `parseJsFiles` notification.
///
/// Clients that send the URI array as a single positional parameter wrap
/// it once more (`[[uri, ...]]`); both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParseJsFilesParams {
    Wrapped([Vec<FileId>; 1]),
    Flat(Vec<FileId>),
}

impl ParseJsFilesParams {
    pub fn into_files(self) -> Vec<FileId> {
        match self {
            Self::Wrapped([files]) => files,
            Self::Flat(files) => files,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src/server/ext_tests.rs"]
mod tests;
