use super::errors::TransformError;
use super::transform::TransformValue;

const KEEP_CHAR: char = '*';

/// Masks a value character by character.
///
/// A `*` in the mask keeps the value's character at that position, any other mask character
/// replaces it. Only the positions both strings share are paired: value characters past the end
/// of the mask are left as they are, and surplus mask characters are ignored.
pub(crate) struct MaskTransformer<'a> {
    mask: &'a str,
}

impl<'a> MaskTransformer<'a> {
    pub(crate) fn new(mask: &'a str) -> Self {
        Self { mask }
    }
}

impl TransformValue for MaskTransformer<'_> {
    fn transform(&self, value: &str) -> Result<String, TransformError> {
        let mut mask = self.mask.chars();
        let result = value
            .chars()
            .map(|c| match mask.next() {
                Some(KEEP_CHAR) | None => c,
                Some(m) => m,
            })
            .collect();
        Ok(result)
    }
}
