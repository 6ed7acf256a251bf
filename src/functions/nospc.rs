use super::errors::TransformError;
use super::transform::TransformValue;
use regex::Regex;
use std::sync::OnceLock;

static NON_ALPHANUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();

/// Collapses every run of non-alphanumeric characters and joins the remaining words with a
/// separator, e.g. `"MY  PROTOCOL_NAME "` with `"-"` gives `"MY-PROTOCOL-NAME"`.
pub(crate) struct NoSpaceTransformer<'a> {
    separator: &'a str,
}

impl<'a> NoSpaceTransformer<'a> {
    pub(crate) fn new(separator: &'a str) -> Self {
        Self { separator }
    }
}

impl TransformValue for NoSpaceTransformer<'_> {
    fn transform(&self, value: &str) -> Result<String, TransformError> {
        let regex = NON_ALPHANUMERIC_REGEX
            .get_or_init(|| Regex::new(r"[^\p{Alphabetic}\p{Nd}]+").unwrap());

        let spaced = regex.replace_all(value, " ");
        let result = spaced
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(self.separator);
        Ok(result)
    }
}
