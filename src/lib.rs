//! Strict JSON codec: a single-pass parser and a canonical serializer.
//!
//! The parser converts a contiguous byte buffer into an in-memory value
//! tree with strict RFC 8259 validation and deterministic, typed error
//! statuses; the serializer emits compact or pretty JSON that preserves
//! the narrowest numeric type observed at parse time. Object keys are
//! stored and emitted in byte-wise sorted order, so output is canonical.
//!
//! # Architecture
//!
//! The implementation is organized into focused modules:
//!
//! - [`context`] - allocator capability and string buffer ownership
//! - [`error`] - flat status enumeration with stable names
//! - [`value`] - the tagged value model and its mutation surface
//! - [`parser`] - recursive-descent parser with bounded nesting depth
//! - [`serializer`] - compact and pretty canonical output
//!
//! Internal modules supply the classifier tables, UTF-8/UTF-16 helpers,
//! and numeric conversion the parser and serializer share.
//!
//! # Example
//!
//! ```
//! use strict_json::{parse, JsonContext, JsonValue};
//!
//! let ctx = JsonContext::new();
//! let value = parse(&ctx, br#"{"b": 2, "a": [1, true]}"#).unwrap();
//! assert_eq!(value["a"][1], JsonValue::boolean(&ctx, true));
//!
//! // Output is canonical: keys sort, whitespace normalizes.
//! assert_eq!(value.to_string(), r#"{"a":[1,true],"b":2}"#);
//! assert_eq!(value.to_string_pretty(), "{\n  \"a\": [1, true],\n  \"b\": 2\n}");
//! ```

// Library code must report failures as statuses, never panic mid-parse.
// The documented exceptions are the fatal value accessors.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod context;
pub mod error;
pub mod parser;
pub mod serializer;
pub mod value;

mod number;
mod tables;
mod utf8;

// Re-export commonly used types
pub use context::{AlignedAlloc, JsonContext, StrBuf, SystemAlloc};
pub use error::{JsonError, JsonResult};
pub use parser::{parse, MAX_DEPTH};
pub use serializer::{to_string, to_string_pretty};
pub use value::{JsonType, JsonValue};
