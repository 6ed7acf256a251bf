//! Parsing of output file stem templates.
//!
//! A template is literal text with `%`-prefixed tag references, optionally preceded by
//! transform annotations:
//!
//! ```text
//! %PatientAge-%_md5|7_PatientID-%_nospc|-_ProtocolName
//! ```
//!
//! Parsing only tokenizes the annotation syntax. Which tag a reference points to is decided when
//! rendering, against the tags of the record at hand.

use crate::functions::errors::TransformError;
use crate::transform::Transform;
use log::warn;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub(crate) const REFERENCE_MARKER: char = '%';
const ANNOTATION_DELIMITER: char = '_';

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateError {
    #[error("Invalid transform `{annotation}` in reference `%{reference}`: {source}")]
    InvalidTransform {
        reference: String,
        annotation: String,
        source: TransformError,
    },
}

/// One piece of a parsed [`Template`].
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text copied to the output as is.
    Literal(String),

    /// A `%` reference to a tag, with its transform chain.
    Reference(Reference),
}

/// A `%`-prefixed tag reference.
///
/// `tail` holds everything after the transform annotations up to the next `%`: the tag name
/// followed by any literal text. The split between the two depends on the record's tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    raw: String,
    chain: Vec<Transform>,
    tail_start: usize,
}

impl Reference {
    /// The reference text as written, without the leading `%`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The transforms to apply, in order of application.
    pub fn chain(&self) -> &[Transform] {
        &self.chain
    }

    /// The text after the annotations: tag name plus trailing literal text.
    pub fn tail(&self) -> &str {
        &self.raw[self.tail_start..]
    }
}

/// A parsed output file stem template.
///
/// A [`Template`] is immutable once parsed, so a single instance can be shared between threads
/// rendering different records.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses a template, skipping (with a warning) any transform annotation that is not valid.
    ///
    /// This never fails: a reference with a bad annotation still substitutes its tag, just
    /// without that transform.
    pub fn parse(template: &str) -> Self {
        let (segments, errors) = parse_segments(template);
        for error in errors {
            warn!("{}, skipping it", error);
        }

        Self {
            source: template.into(),
            segments,
        }
    }

    /// Parses a template, failing on the first transform annotation that is not valid.
    pub fn parse_strict(template: &str) -> Result<Self, TemplateError> {
        let (segments, errors) = parse_segments(template);
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }

        Ok(Self {
            source: template.into(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse_strict(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_segments(template: &str) -> (Vec<Segment>, Vec<TemplateError>) {
    let mut segments = Vec::new();
    let mut errors = Vec::new();
    let mut pieces = template.split(REFERENCE_MARKER);

    if let Some(leading) = pieces.next() {
        if !leading.is_empty() {
            segments.push(Segment::Literal(leading.into()));
        }
    }

    for piece in pieces {
        let (reference, reference_errors) = parse_reference(piece);
        errors.extend(reference_errors);
        segments.push(Segment::Reference(reference));
    }

    (segments, errors)
}

/// Splits the text following a `%` into its transform chain and tail.
///
/// Annotations are consumed from the start of the piece for as long as it has the shape
/// `_body_` with `body` starting with a lowercase ASCII letter and containing no underscore.
/// Tag names start with an uppercase letter, so `%_md5_PatientID` and `%PatientID_%...` are
/// never confused.
fn parse_reference(piece: &str) -> (Reference, Vec<TemplateError>) {
    let mut chain = Vec::new();
    let mut errors = Vec::new();
    let mut rest = piece;

    while let Some((annotation, remainder)) = next_annotation(rest) {
        match annotation.parse::<Transform>() {
            Ok(transform) => chain.push(transform),
            Err(source) => errors.push(TemplateError::InvalidTransform {
                reference: piece.into(),
                annotation: annotation.into(),
                source,
            }),
        }
        rest = remainder;
    }

    let reference = Reference {
        raw: piece.into(),
        chain,
        tail_start: piece.len() - rest.len(),
    };
    (reference, errors)
}

fn next_annotation(s: &str) -> Option<(&str, &str)> {
    let body_and_rest = s.strip_prefix(ANNOTATION_DELIMITER)?;
    let (body, rest) = body_and_rest.split_once(ANNOTATION_DELIMITER)?;
    if body.starts_with(|c: char| c.is_ascii_lowercase()) {
        Some((body, rest))
    } else {
        None
    }
}
