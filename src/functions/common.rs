pub(crate) fn truncate_to(n: usize, s: &str) -> String {
    s.chars().take(n).collect()
}

/// Uppercases the first character, leaving the rest untouched (`patientID` -> `PatientID`).
pub(crate) fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_empty_string() {
        let truncated = truncate_to(5, "");
        assert!(truncated.is_empty());
    }

    #[test]
    fn test_truncate_to() {
        let truncated = truncate_to(3, "12345");
        assert_eq!(truncated, "123");
    }

    #[test]
    fn test_truncate_to_zero() {
        let truncated = truncate_to(0, "12345");
        assert!(truncated.is_empty());
    }

    #[test]
    fn test_truncate_to_longer_than_input() {
        assert_eq!(truncate_to(10, "12345"), "12345");
    }

    #[test]
    fn test_capitalize_first() {
        assert_eq!(capitalize_first("patientID"), "PatientID");
        assert_eq!(capitalize_first("PatientID"), "PatientID");
        assert_eq!(capitalize_first("x"), "X");
        assert_eq!(capitalize_first(""), "");
    }
}
