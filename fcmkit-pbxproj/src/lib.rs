//! Format-preserving reader and editor for Xcode `project.pbxproj` files.
//!
//! The file is an old-style (NeXTSTEP/OpenStep) ASCII property list. This crate
//! parses it into a lossless tree, exposes the build settings of
//! `XCBuildConfiguration` objects, and writes edits back without disturbing
//! comments, ordering or indentation elsewhere in the file.
//!
//! ```
//! use fcmkit_pbxproj::{BuildValue, Document};
//!
//! let src = "{ objects = { A = { isa = XCBuildConfiguration; name = Debug; buildSettings = { }; }; }; }";
//! let mut doc = Document::parse(src).unwrap();
//! doc.update_build_property("SWIFT_VERSION", &BuildValue::from("5.0"), Some("Debug"));
//! assert_eq!(
//!     doc.get_build_property("SWIFT_VERSION", Some("Debug")),
//!     Some(BuildValue::Single("5.0".to_string()))
//! );
//! ```

pub mod document;
pub mod error;
mod lexer;
mod parser;

pub use document::{BuildValue, Document, unquote};
pub use error::{PbxprojError, Result};
