//! # gotype-demangle — readable types for gccgo AST dumps
//!
//! gccgo writes types in its AST dumps as a compact positional encoding: a one-byte
//! tag selects the form and composite forms nest recursively, closed by `e`.
//! This crate decodes that encoding and rewrites whole dump lines.
//!
//! ## Encodings
//!
//! | Encoded | Decoded |
//! |---|---|
//! | `E` `z` `v` `b` `n` | `error` `string` `void` `boolean` `nil` |
//! | `N5_int64` | `int64` |
//! | `AN5_int328e` / `AN5_int32e` | `[8]int32` / `[]int32` |
//! | `pIe` | `*interface{}` |
//! | `Mz__z` | `map[string]string` |
//! | `Czse` | `chan<-{string}` |
//! | `FppN5_int32pN5_int64erN4_boolIeee` | `func{(*int32, *int64) (bool, interface{})}` |
//!
//! ## Usage
//!
//! ```
//! use gotype_demangle::{decode, rewrite_line};
//!
//! let d = decode(b"ApN5_int328e").unwrap();
//! assert_eq!((d.text().as_str(), d.consumed), ("[8]*int32", 12));
//!
//! assert_eq!(rewrite_line("var x N5_int64 = foo123"), "var x int64 = foo123");
//! ```
//!
//! The `demangle_dump` binary filters a whole file (or stdin) line by line.

pub mod decode;
pub mod rewrite;
pub mod scan;
pub mod types;

pub use decode::{decode, DecodeError, Decoded, MAX_NESTING};
pub use rewrite::{demangle, rewrite_line, rewrite_line_counted, rewrite_stream, StreamStats};
pub use scan::{segments, ScanError, Segment};
pub use types::{ChanDir, FuncType, Member, Singleton, StructField, StructType, TypeExpr};
