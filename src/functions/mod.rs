pub(crate) mod common;
pub mod errors;
pub(crate) mod mask;
pub(crate) mod name;
pub(crate) mod nospc;
pub(crate) mod transform;
