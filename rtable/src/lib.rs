//! Ingestion of uploaded tabular files into keyed-row structures.
//!
//! Uploads are CSV as produced by the usual dataframe/series exporters: the
//! first column is the row index, the remaining columns carry values. A
//! features file becomes a [`Table`] (row key -> column -> value), a target
//! file becomes a [`Series`] (row key -> value). Both embed directly into
//! outbound backend payloads.
//!
//! ```rust
//! use rtable::parse_features;
//!
//! let table = parse_features(b",height,label\n0,1.5,cat\n1,2.0,dog\n").unwrap();
//! assert_eq!(table.len(), 2);
//! ```

mod error;
mod parse;
mod types;

pub use error::{IngestError, IngestErrorKind};
pub use parse::{check_size, parse_features, parse_target, series_to_csv, MAX_UPLOAD_BYTES};
pub use types::{Series, Table};
