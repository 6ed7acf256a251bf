//! Extract DICOM tags and build output file stems from them.
//!
//! An output file stem is described by a template in which `%TagName` is replaced by the value of
//! that tag, optionally passed through one or more transforms first:
//!
//! ```
//! use dicom_stem::{render, TagDictionary};
//!
//! let tags: TagDictionary = [("PatientAge", "006Y"), ("ProtocolName", "MY PROTOCOL")]
//!     .into_iter()
//!     .collect();
//!
//! let result = render(&tags, "%PatientAge-%_nospc|-_ProtocolName");
//! assert_eq!(result.rendered, "006Y-MY-PROTOCOL");
//! assert!(result.any_substitution);
//! ```
//!
//! Supported transforms are `md5` (optionally truncated, e.g. `%_md5|7_PatientID`), `strmsk`
//! (character mask, e.g. `%_strmsk|******01_PatientBirthDate`), `nospc` (collapse non-word runs
//! into a separator) and `name` (a fake `LAST^FIRST^ANON` name, optionally seeded from another
//! tag, e.g. `%_name|patientID_PatientName`).

pub mod config;
pub mod dicom;
pub mod extract;
pub mod functions;
pub(crate) mod hashing;
pub mod processor;
pub mod render;
pub mod template;
pub mod transform;

#[cfg(test)]
mod test_utils;

pub use dicom_dictionary_std::tags;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use extract::{extract_tags, ExtractedTags, TagDictionary, TagSource, NO_ATTRIBUTE};
pub use functions::errors::TransformError;
pub use processor::{FileProcessor, FileReport, Processor};
pub use render::{render, RenderResult};
pub use template::{Template, TemplateError};
pub use transform::Transform;
