pub mod error;
pub mod load;
pub mod select;
pub mod write;

pub use error::{IoError, Result};
pub use load::{load_batch, load_file, parse_records, DocumentShape, LoadReport, LoadedFile};
pub use select::FileSelector;
pub use write::{write_record_sets, write_records};
