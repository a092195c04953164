// Ledger Lens - Core Library
// Exposes all modules for use in the demo binary and tests

pub mod contact;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod transaction;

// Re-export commonly used types
pub use contact::{Address, ContactMethod, PhoneNumber};
pub use document::{links, Document, Element};
pub use error::{ParseError, PipelineError};
pub use pipeline::Pipeline;
pub use source::{
    resolve, resolve_with, source_for, DocumentSource, FetchOptions, FileSource, NetworkSource,
    SourceKind,
};
pub use transaction::{load_csv, Transaction};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
