//! Domain model types (pure).
//!
//! Records, the dataset that orders them, and the error taxonomy.

pub mod dataset;
pub mod error;
pub mod identifiers;
pub mod record;

// Re-export for convenience
pub use dataset::{reindex, CopyMode, DataSet};
pub use error::{ListError, RecordsError};
pub use identifiers::RecordIndex;
pub use record::{Record, RecordText, RichNode, UserDefined};
