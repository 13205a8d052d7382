use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for Brazilian postal codes (CEP): five digits, optional hyphen,
    /// three digits.
    /// - Valid: "78550-000", "78550000"
    /// - Invalid: "7855-000", "78550 000", "abcde-fgh"
    pub static ref CEP_REGEX: Regex = Regex::new(r"^\d{5}-?\d{3}$").unwrap();
}

/// Strip the optional hyphen from a postal code before querying providers
pub fn normalize_cep(cep: &str) -> String {
    cep.trim().replace('-', "")
}

/// Content types accepted for uploaded photos (post images and avatars)
pub fn is_image_content_type(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/jpeg" | "image/png" | "image/webp" | "image/gif"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cep_regex_valid() {
        assert!(CEP_REGEX.is_match("78550-000"));
        assert!(CEP_REGEX.is_match("78550000"));
        assert!(CEP_REGEX.is_match("01001-000"));
    }

    #[test]
    fn test_cep_regex_invalid() {
        assert!(!CEP_REGEX.is_match("7855-000"));
        assert!(!CEP_REGEX.is_match("78550 000"));
        assert!(!CEP_REGEX.is_match("abcde-fgh"));
        assert!(!CEP_REGEX.is_match(""));
        assert!(!CEP_REGEX.is_match("785500000"));
    }

    #[test]
    fn test_image_content_types() {
        assert!(is_image_content_type("image/jpeg"));
        assert!(is_image_content_type("image/png"));
        assert!(!is_image_content_type("application/pdf"));
        assert!(!is_image_content_type("image/svg+xml"));
        assert!(!is_image_content_type(""));
    }

    #[test]
    fn test_normalize_cep() {
        assert_eq!(normalize_cep("78550-000"), "78550000");
        assert_eq!(normalize_cep(" 78550000 "), "78550000");
    }
}
