use crate::extract::TagDictionary;
use crate::template::{Reference, Segment, Template, REFERENCE_MARKER};
use log::warn;
use serde::Serialize;

/// The outcome of rendering a template against one record's tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderResult {
    /// The template with every resolvable tag reference substituted.
    pub rendered: String,

    /// Whether at least one tag reference was substituted.
    pub any_substitution: bool,
}

/// Parses `template` and renders it against `tags`.
///
/// Shorthand for [`Template::parse`] followed by [`Template::render`]; use the latter directly
/// when rendering the same template for many records.
pub fn render(tags: &TagDictionary, template: &str) -> RenderResult {
    Template::parse(template).render(tags)
}

impl Template {
    /// Substitutes the tag references of this template with values from `tags`.
    ///
    /// Each reference resolves to the longest tag name its text starts with. The transforms of
    /// the reference are then applied left to right and the result replaces the reference and
    /// its annotations. A reference that matches no tag is copied verbatim, `%` included.
    ///
    /// Rendering never fails. A transform that cannot be applied is skipped with a warning and
    /// the value is passed on unchanged.
    pub fn render(&self, tags: &TagDictionary) -> RenderResult {
        let mut rendered = String::with_capacity(self.as_str().len());
        let mut any_substitution = false;

        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Reference(reference) => match resolve(reference, tags) {
                    Some(value) => {
                        rendered.push_str(&value);
                        any_substitution = true;
                    }
                    None => {
                        rendered.push(REFERENCE_MARKER);
                        rendered.push_str(reference.raw());
                    }
                },
            }
        }

        RenderResult {
            rendered,
            any_substitution,
        }
    }
}

/// Returns the substituted text for `reference`, i.e. the transformed tag value followed by the
/// literal text after the tag name, or `None` if no tag matches.
fn resolve(reference: &Reference, tags: &TagDictionary) -> Option<String> {
    let tail = reference.tail();
    let (name, raw_value) = tags.longest_prefix_entry(tail)?;

    let mut value = raw_value.to_string();
    for transform in reference.chain() {
        match transform.apply(tags, &value) {
            Ok(transformed) => value = transformed,
            Err(e) => warn!("could not apply {} to tag {}: {}", transform, name, e),
        }
    }

    value.push_str(&tail[name.len()..]);
    Some(value)
}
