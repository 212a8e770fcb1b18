//! # tessel-json
//!
//! A small JSON value library: an owned value handle, a depth-limited
//! recursive-descent parser and a serializer.
//!
//! ## Quick start
//!
//! ```rust
//! use tessel_json::{parse, Json, Kind};
//!
//! let mut doc = parse(r#"{"name": "tessel", "tags": ["json"]}"#).unwrap();
//! assert_eq!(doc.kind().unwrap(), Kind::Object);
//!
//! doc.member_mut("tags").unwrap().add_to_array("rust").unwrap();
//! doc.add_to_object("stars", 5).unwrap();
//!
//! assert_eq!(
//!     doc.dump().unwrap(),
//!     "{\n\t\"name\" : \"tessel\",\n\t\"stars\" : 5,\n\t\"tags\" : [\"json\", \"rust\"]\n}"
//! );
//!
//! // Dumped text parses back to an equal tree.
//! assert_eq!(parse(&doc.dump().unwrap()).unwrap(), doc);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` (the six JSON kinds) and `Kind`
//! - [`json`]: `Json`, the owning handle and public API surface
//! - [`parser`]: text → `Json`
//! - [`serializer`]: `Json` → text
//! - [`options`]: `ParseOptions` and depth limits
//! - [`error`]: `JsonError` and `ErrorKind`
//! - [`interop`]: `serde` / `serde_json` conversions

pub mod error;
pub mod interop;
pub mod json;
pub mod options;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{ErrorKind, JsonError, Result};
pub use json::Json;
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use parser::{parse, parse_prefix, parse_with};
pub use value::{Array, Kind, Object, Value};
