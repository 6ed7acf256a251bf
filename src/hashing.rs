use md5::{Digest, Md5};

pub(crate) trait Hasher {
    fn hash(&self, input: &str) -> String;
}

/// Hashes values with MD5, returning the digest as 32 lowercase hex characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Md5Hasher;

impl Md5Hasher {
    pub(crate) fn new() -> Self {
        Self {}
    }
}

impl Hasher for Md5Hasher {
    fn hash(&self, input: &str) -> String {
        let digest = Md5::digest(input.as_bytes());
        format!("{:x}", digest)
    }
}

/// Turns a seed value into 32 bytes of RNG seed material.
///
/// The BLAKE3 hash of the raw bytes of `value`, so equal values always give equal seeds.
pub(crate) fn seed_from_value(value: &str) -> [u8; 32] {
    *blake3::hash(value.as_bytes()).as_bytes()
}
