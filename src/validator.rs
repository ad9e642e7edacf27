//! Domain name validation.
//!
//! Runs before anything is handed to the resolver. Every check reports its
//! own failure, so a single input can fail several ways at once; the only
//! exception is an empty (or blank) input, which is reported on its own.

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 253;

/// A reason a domain string was rejected.
///
/// `Display` yields the sentence shown to the user for that reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ValidationFailure {
    #[error("The domain name has no top-level domain (for example .com).")]
    MissingTopLevelDomain,

    #[error("The domain name contains invalid characters. Only letters, digits, '.' and '-' are allowed.")]
    InvalidCharacters,

    #[error("The domain name is empty or contains only whitespace.")]
    EmptyOrWhitespace,

    #[error("The domain name must be between 3 and 253 characters long.")]
    InvalidLength,

    #[error("The domain name contains unsupported characters (non-ASCII or non-printable).")]
    UnsupportedCharacters,

    #[error("The domain name is malformed (for example, it contains consecutive dots).")]
    Other,
}

/// Every failure found for one input, in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_failures(.0))]
pub struct ValidationFailures(pub Vec<ValidationFailure>);

// Only spaces and tabs are stripped, other whitespace is left for the checks.
fn trim_blanks(input: &str) -> &str {
    input.trim_matches(|c: char| c == ' ' || c == '\t')
}

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

fn is_printable_ascii(c: char) -> bool {
    (32..=126).contains(&(c as u32))
}

/// Validates a raw domain string and returns every failure found.
///
/// An empty result means the (trimmed) input may be resolved.
pub fn validate(input: &str) -> Vec<ValidationFailure> {
    let trimmed = trim_blanks(input);

    if trimmed.is_empty() {
        return vec![ValidationFailure::EmptyOrWhitespace];
    }

    let mut failures = Vec::new();

    let len = trimmed.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        failures.push(ValidationFailure::InvalidLength);
    }

    if !trimmed.chars().all(is_domain_char) {
        failures.push(ValidationFailure::InvalidCharacters);
    }

    if !trimmed.contains('.') || trimmed.ends_with('.') {
        failures.push(ValidationFailure::MissingTopLevelDomain);
    }

    if !trimmed.chars().all(is_printable_ascii) {
        failures.push(ValidationFailure::UnsupportedCharacters);
    }

    if trimmed.contains("..") {
        failures.push(ValidationFailure::Other);
    }

    failures
}

/// Validates `input` and hands back the trimmed host when nothing failed.
pub fn validated(input: &str) -> Result<&str, ValidationFailures> {
    let failures = validate(input);
    if failures.is_empty() {
        Ok(trim_blanks(input))
    } else {
        Err(ValidationFailures(failures))
    }
}

/// Renders failures one sentence per line.
pub fn format_failures(failures: &[ValidationFailure]) -> String {
    if failures.is_empty() {
        return "No errors found.".to_string();
    }

    failures
        .iter()
        .map(ValidationFailure::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::ValidationFailure::*;
    use super::*;

    #[test]
    fn test_valid_domains_pass() {
        for domain in [
            "example.com",
            "a.b",
            "sub.example.co.uk",
            "my-host.example.org",
            "123.45.67.89",
            "xn--bcher-kva.example",
            "  example.com\t",
        ] {
            assert!(validate(domain).is_empty(), "{domain:?} should be valid");
        }
    }

    #[test]
    fn test_max_length_domain_passes() {
        // 63 + 1 + 63 + 1 + 63 + 1 + 61 = 253
        let domain = format!(
            "{}.{}.{}.{}",
            "a".repeat(63),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(61)
        );
        assert_eq!(domain.len(), 253);
        assert!(validate(&domain).is_empty());

        let too_long = format!("a{domain}");
        assert_eq!(validate(&too_long), vec![InvalidLength]);
    }

    #[test]
    fn test_blank_input_short_circuits() {
        for input in ["", " ", "\t", " \t  \t"] {
            assert_eq!(validate(input), vec![EmptyOrWhitespace]);
        }
    }

    #[test]
    fn test_single_char_reports_length_then_tld() {
        assert_eq!(validate("a"), vec![InvalidLength, MissingTopLevelDomain]);
    }

    #[test]
    fn test_consecutive_dots() {
        let failures = validate("exa..mple.com");
        assert!(failures.contains(&Other));
        assert!(!failures.contains(&InvalidCharacters));
        assert_eq!(failures, vec![Other]);
    }

    #[test]
    fn test_trailing_dot_is_missing_tld() {
        let failures = validate("example.com.");
        assert_eq!(failures, vec![MissingTopLevelDomain]);
    }

    #[test]
    fn test_non_ascii_input() {
        let failures = validate("exämple.com");
        assert_eq!(failures, vec![InvalidCharacters, UnsupportedCharacters]);
    }

    #[test]
    fn test_other_whitespace_is_not_trimmed() {
        // A newline is neither a domain character nor printable ASCII.
        let failures = validate("example.com\n");
        assert_eq!(failures, vec![InvalidCharacters, UnsupportedCharacters]);
    }

    #[test]
    fn test_printable_but_invalid_chars() {
        let failures = validate("exa mple_com");
        assert_eq!(failures, vec![InvalidCharacters, MissingTopLevelDomain]);
    }

    #[test]
    fn test_all_checks_fire_in_order() {
        let failures = validate("é..");
        assert_eq!(
            failures,
            vec![
                InvalidCharacters,
                MissingTopLevelDomain,
                UnsupportedCharacters,
                Other
            ]
        );

        let failures = validate("é.");
        assert_eq!(
            failures,
            vec![
                InvalidLength,
                InvalidCharacters,
                MissingTopLevelDomain,
                UnsupportedCharacters
            ]
        );
    }

    #[test]
    fn test_validate_is_pure() {
        for input in ["example.com", "a", "exa..mple.com", "exämple.com", " "] {
            assert_eq!(validate(input), validate(input));
        }
    }

    #[test]
    fn test_validated_returns_trimmed_host() {
        assert_eq!(validated("\t example.com "), Ok("example.com"));

        let err = validated("a").unwrap_err();
        assert_eq!(err.0, vec![InvalidLength, MissingTopLevelDomain]);
    }

    #[test]
    fn test_format_failures() {
        assert_eq!(format_failures(&[]), "No errors found.");
        assert_eq!(
            format_failures(&[InvalidLength, MissingTopLevelDomain]),
            format!("{}\n{}", InvalidLength, MissingTopLevelDomain)
        );

        let err = ValidationFailures(vec![EmptyOrWhitespace]);
        assert_eq!(
            err.to_string(),
            "The domain name is empty or contains only whitespace."
        );
    }
}
