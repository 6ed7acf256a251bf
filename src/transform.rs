use crate::extract::TagDictionary;
use crate::functions::common::{capitalize_first, truncate_to};
use crate::functions::errors::TransformError;
use crate::functions::mask::MaskTransformer;
use crate::functions::name::NameTransformer;
use crate::functions::nospc::NoSpaceTransformer;
use crate::functions::transform::TransformValue;
use crate::hashing::{seed_from_value, Hasher, Md5Hasher};
use log::warn;
use std::fmt;
use std::str::FromStr;

const ARG_SEPARATOR: char = '|';
// older templates write the md5 length as `_md5.4_`
const LEGACY_ARG_SEPARATOR: char = '.';

/// A newtype wrapper for specifying the length of a hash value.
/// The internal value represents the number of characters the hash should be truncated to.
/// A length of `0` gives the empty string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HashLength(pub(crate) usize);

impl HashLength {
    pub fn new(length: usize) -> Self {
        HashLength(length)
    }
}

/// A named function applied to a tag value before it is substituted into a template.
///
/// In a template, transforms are written as `_name|arg_` blocks directly in front of the tag
/// name, e.g. `%_md5|7_PatientID`.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// MD5 hash of the value as lowercase hex, optionally truncated (`md5`).
    Md5(Option<HashLength>),

    /// Character mask where `*` keeps the original character (`strmsk`).
    StrMask(String),

    /// Collapse non-alphanumeric runs and join the words with a separator (`nospc`).
    NoSpace(String),

    /// Synthetic `LAST^FIRST^ANON` name, optionally seeded by another tag's value (`name`).
    Name(Option<String>),
}

impl Transform {
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Md5(_) => "md5",
            Transform::StrMask(_) => "strmsk",
            Transform::NoSpace(_) => "nospc",
            Transform::Name(_) => "name",
        }
    }

    /// Builds a [`Transform`] from its name and optional argument.
    pub fn new(name: &str, arg: Option<&str>) -> Result<Self, TransformError> {
        let arg = arg.filter(|a| !a.is_empty());
        match name {
            "md5" => {
                // a length that is not a number must not leave the value unhashed
                let length = arg.and_then(|a| match a.parse::<usize>() {
                    Ok(length) => Some(HashLength::new(length)),
                    Err(_) => {
                        warn!("{} is not a valid hash length, using the full hash", a);
                        None
                    }
                });
                Ok(Transform::Md5(length))
            }
            "strmsk" => match arg {
                Some(mask) => Ok(Transform::StrMask(mask.into())),
                None => Err(TransformError::MissingArgument(
                    "strmsk requires a mask".into(),
                )),
            },
            "nospc" => Ok(Transform::NoSpace(arg.unwrap_or_default().into())),
            "name" => Ok(Transform::Name(arg.map(capitalize_first))),
            other => Err(TransformError::UnknownTransform(other.into())),
        }
    }

    /// Applies the transform to `value`.
    ///
    /// Only [`Transform::Name`] looks at `tags`, and only to read its seed tag.
    pub fn apply(&self, tags: &TagDictionary, value: &str) -> Result<String, TransformError> {
        match self {
            Transform::Md5(length) => {
                let hashed_value = Md5Hasher::new().hash(value);
                Ok(match length {
                    Some(length) => truncate_to(length.0, &hashed_value),
                    None => hashed_value,
                })
            }
            Transform::StrMask(mask) => MaskTransformer::new(mask).transform(value),
            Transform::NoSpace(separator) => NoSpaceTransformer::new(separator).transform(value),
            Transform::Name(seed_tag) => {
                let seed = seed_tag.as_deref().and_then(|tag| match tags.get(tag) {
                    Some(seed_value) => Some(seed_from_value(seed_value)),
                    None => {
                        warn!(
                            "seed tag {} is not available, generating an unseeded name",
                            tag
                        );
                        None
                    }
                });
                NameTransformer::new(seed).transform(value)
            }
        }
    }
}

impl FromStr for Transform {
    type Err = TransformError;

    /// Parses the body of an annotation, i.e. the text between the underscores of `_md5|7_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(ARG_SEPARATOR) {
            Some((name, arg)) => (name, Some(arg)),
            None => match s.split_once(LEGACY_ARG_SEPARATOR) {
                Some((name, arg)) => (name, Some(arg)),
                None => (s, None),
            },
        };
        Transform::new(name, arg)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg = match self {
            Transform::Md5(length) => length.map(|l| l.0.to_string()),
            Transform::StrMask(mask) => Some(mask.clone()),
            Transform::NoSpace(separator) if !separator.is_empty() => Some(separator.clone()),
            Transform::NoSpace(_) => None,
            Transform::Name(seed_tag) => seed_tag.clone(),
        };
        match arg {
            Some(arg) => write!(f, "{}{}{}", self.name(), ARG_SEPARATOR, arg),
            None => write!(f, "{}", self.name()),
        }
    }
}
