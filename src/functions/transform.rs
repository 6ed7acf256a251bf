use crate::functions::errors::TransformError;

pub(crate) trait TransformValue {
    fn transform(&self, value: &str) -> Result<String, TransformError>;
}
