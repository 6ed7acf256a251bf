use super::errors::TransformError;
use super::transform::TransformValue;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const ANON_SUFFIX: &str = "ANON";

const FIRST_NAMES: &[&str] = &[
    "Aaron", "Abigail", "Adam", "Alice", "Amber", "Andrew", "Anna", "Arthur", "Beatrice",
    "Benjamin", "Bianca", "Bruce", "Caleb", "Carla", "Charles", "Chloe", "Daniel", "Daisy",
    "David", "Diana", "Edward", "Eleanor", "Elijah", "Emma", "Felix", "Fiona", "Frank", "Grace",
    "Gregory", "Hannah", "Henry", "Irene", "Isaac", "Ivy", "Jack", "Jane", "Joseph", "Julia",
    "Kevin", "Laura", "Leo", "Lucy", "Martin", "Maya", "Nathan", "Nora", "Oliver", "Olivia",
    "Oscar", "Paula", "Peter", "Quinn", "Rachel", "Robert", "Rose", "Samuel", "Sarah", "Thomas",
    "Tessa", "Victor", "Violet", "Walter", "Wendy", "Zoe",
];

const LAST_NAMES: &[&str] = &[
    "Adams", "Allen", "Baker", "Barnes", "Bell", "Brooks", "Brown", "Butler", "Campbell",
    "Carter", "Clark", "Collins", "Cook", "Cooper", "Davis", "Edwards", "Evans", "Fisher",
    "Foster", "Garcia", "Gray", "Green", "Hall", "Harris", "Hayes", "Hughes", "Jackson",
    "James", "Jenkins", "Kelly", "King", "Lee", "Lewis", "Long", "Martin", "Miller", "Mitchell",
    "Moore", "Morgan", "Murphy", "Nelson", "Parker", "Perry", "Phillips", "Powell", "Price",
    "Reed", "Rivera", "Roberts", "Ross", "Russell", "Sanders", "Scott", "Stewart", "Sullivan",
    "Taylor", "Turner", "Walker", "Ward", "Watson", "White", "Wilson", "Wood", "Young",
];

/// Generates a synthetic person name in DICOM PN form, `LAST^FIRST^ANON`.
///
/// The generator is created on every call. With a seed, the same seed always gives the same
/// name; without one, the generator is seeded from system entropy. The input value is ignored.
pub(crate) struct NameTransformer {
    seed: Option<[u8; 32]>,
}

impl NameTransformer {
    pub(crate) fn new(seed: Option<[u8; 32]>) -> Self {
        Self { seed }
    }
}

impl TransformValue for NameTransformer {
    fn transform(&self, _value: &str) -> Result<String, TransformError> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::from_seed(seed),
            None => StdRng::from_entropy(),
        };

        let last = LAST_NAMES.choose(&mut rng).copied().unwrap_or("DOE");
        let first = FIRST_NAMES.choose(&mut rng).copied().unwrap_or("JOHN");

        Ok(format!(
            "{}^{}^{}",
            last.to_uppercase(),
            first.to_uppercase(),
            ANON_SUFFIX
        ))
    }
}
