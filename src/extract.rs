use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Value stored for a tag whose value could not be read or turned into a string.
pub const NO_ATTRIBUTE: &str = "no attribute";

/// Name of the bulk pixel payload tag, which is never extracted.
pub const PIXEL_DATA: &str = "PixelData";

/// The per-record mapping of tag name (e.g. `PatientID`) to its simplified string value.
///
/// A dictionary is built fresh for every record and is never shared between records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagDictionary(BTreeMap<String, String>);

impl TagDictionary {
    pub fn new() -> Self {
        TagDictionary(BTreeMap::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the longest tag name that `s` starts with, together with its value.
    ///
    /// Picking the longest name means `%PatientIDs` resolves to `PatientIDs` and not to
    /// `PatientID` when both are present.
    pub(crate) fn longest_prefix_entry(&self, s: &str) -> Option<(&str, &str)> {
        self.iter()
            .filter(|(name, _)| s.starts_with(name))
            .max_by_key(|(name, _)| name.len())
    }
}

impl<K, V> FromIterator<(K, V)> for TagDictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TagDictionary(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Read access to the tags of one decoded record.
///
/// Implementations must not change the record; extraction only ever reads from it.
pub trait TagSource {
    /// Names of all tags present in the record, in record order.
    fn tag_names(&self) -> Vec<String>;

    /// Value of the named tag as a string, or `None` if the tag is absent or its value
    /// cannot be represented as a string.
    fn try_get_tag_value(&self, name: &str) -> Option<String>;

    /// Name of the bulk payload tag that is always left out of the extracted tags.
    fn bulk_payload_tag(&self) -> &str {
        PIXEL_DATA
    }
}

impl TagSource for BTreeMap<String, String> {
    fn tag_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn try_get_tag_value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl TagSource for HashMap<String, String> {
    fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().cloned().collect();
        names.sort();
        names
    }

    fn try_get_tag_value(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// The tags extracted from one record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedTags {
    /// Tag name to simplified value.
    pub tags: TagDictionary,

    /// The tag names that were looked up, in lookup order.
    pub tags_used: Vec<String>,
}

/// Builds the [`TagDictionary`] of a record.
///
/// If `allowlist` is empty, every tag the record reports is extracted, otherwise only the listed
/// ones. The bulk payload tag is always skipped. A tag that cannot be read is stored as
/// [`NO_ATTRIBUTE`].
pub fn extract_tags<S>(source: &S, allowlist: &[String]) -> ExtractedTags
where
    S: TagSource + ?Sized,
{
    let candidates = if allowlist.is_empty() {
        source.tag_names()
    } else {
        allowlist.to_vec()
    };

    let bulk_payload_tag = source.bulk_payload_tag();
    let mut tags = TagDictionary::new();
    let mut tags_used = Vec::with_capacity(candidates.len());

    for name in candidates {
        if name == bulk_payload_tag || tags.contains(&name) {
            continue;
        }
        let value = source
            .try_get_tag_value(&name)
            .unwrap_or_else(|| NO_ATTRIBUTE.into());
        tags.insert(name.clone(), value);
        tags_used.push(name);
    }

    ExtractedTags { tags, tags_used }
}
