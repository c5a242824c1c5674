pub mod definition;
pub mod document;
pub mod progress;
pub mod server;
pub mod symbols;
pub mod text_pos;
pub mod vfs;
pub mod workspace;

pub use definition::DefinitionProvider;
pub use server::{AngularLanguageServer, build_service};
pub use symbols::{IndexStore, Location, SymbolIndex, SymbolName};
pub use vfs::{ContentFetcher, FetchError, FileId, FileSet};
pub use workspace::{FileEvent, RebuildPlan, Workspace};
