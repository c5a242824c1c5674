//! Component/directive extraction and the project-wide symbol index.

mod index;
mod scanner;
mod store;
mod types;

pub use index::{IndexEntry, SymbolIndex};
pub use scanner::{Declarations, scan_declarations};
pub use store::{IndexBuild, IndexStore, RebuildReport, build_index, build_index_incremental};
pub use types::{Declaration, Location, SymbolKind, SymbolName};
