//! Per-answer validation rules.
//!
//! A question's `customRegexValidation` wins over its `validation` rule. A
//! question with neither accepts any non-empty answer.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

use crate::domain::entities::{IntegerRange, Question};
use crate::domain::error::InputValidationError;
use crate::domain::value_objects::{InputType, UrlPattern, ValidationRule};

static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}$")
        .expect("domain regex is valid")
});

// RFC 5322 addr-spec: dot-atom or quoted local part, dot-atom or literal domain.
static ADDR_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
        r#"|"(?:[^"\\\r\n]|\\.)*")"#,
        r#"@(?:[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*"#,
        r#"|\[[^\[\]\\\r\n]*\])$"#,
    ))
    .expect("address regex is valid")
});

/// Applies a question's rule to a raw answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn validate(raw: &str, question: &Question) -> Result<(), InputValidationError> {
        if question.input_type == InputType::Textfield && raw.is_empty() {
            return Err(InputValidationError::EmptyInput);
        }

        if let Some(pattern) = question.custom_regex_validation.as_deref() {
            return validate_custom_regex(raw, pattern);
        }

        let Some(name) = question.validation.as_deref() else {
            return Ok(());
        };

        let rule: ValidationRule = name.parse()?;
        trace!(rule = %rule, variable = %question.variable_name, "Applying validation rule");

        match rule {
            ValidationRule::DomainName => validate_domain(raw),
            ValidationRule::IpAddress => validate_ip(raw),
            ValidationRule::Email => validate_email(raw),
            ValidationRule::Url => validate_url(raw, &question.url_patterns()?),
            ValidationRule::IntegerRange => validate_integer_range(raw, question.range.as_ref()),
        }
    }
}

pub fn compile_custom_regex(pattern: &str) -> Result<Regex, InputValidationError> {
    Regex::new(pattern).map_err(|e| InputValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

/// Unanchored match, so `^`/`$` are up to the pattern author.
pub fn validate_custom_regex(value: &str, pattern: &str) -> Result<(), InputValidationError> {
    let re = compile_custom_regex(pattern)?;

    if re.is_match(value) {
        Ok(())
    } else {
        Err(InputValidationError::PatternMismatch {
            value: value.to_string(),
            pattern: pattern.to_string(),
        })
    }
}

pub fn validate_domain(value: &str) -> Result<(), InputValidationError> {
    if DOMAIN_RE.is_match(value) {
        Ok(())
    } else {
        Err(InputValidationError::InvalidDomain {
            value: value.to_string(),
        })
    }
}

pub fn validate_ip(value: &str) -> Result<(), InputValidationError> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| InputValidationError::InvalidIpAddress {
            value: value.to_string(),
        })
}

// RFC 5322 specials other than `.` and `"`; an unquoted display name may not contain them.
const PHRASE_SPECIALS: [char; 11] = ['<', '>', '@', ',', ';', ':', '(', ')', '[', ']', '\\'];

/// Accepts a bare `local@domain` or `Display Name <local@domain>`.
pub fn validate_email(value: &str) -> Result<(), InputValidationError> {
    let invalid = || InputValidationError::InvalidEmail {
        value: value.to_string(),
    };

    let trimmed = value.trim();
    let addr_spec = match trimmed.strip_suffix('>') {
        Some(rest) => {
            let (display_name, addr) = rest.rsplit_once('<').ok_or_else(invalid)?;
            if display_name.contains(PHRASE_SPECIALS) && !is_quoted(display_name.trim()) {
                return Err(invalid());
            }
            addr
        }
        None => trimmed,
    };

    if ADDR_SPEC_RE.is_match(addr_spec) {
        Ok(())
    } else {
        Err(invalid())
    }
}

fn is_quoted(s: &str) -> bool {
    s.len() >= 2 && s.starts_with('"') && s.ends_with('"')
}

/// The URL needs a scheme and a host. `patterns` may narrow the scheme to
/// exactly `http` or exactly `https`; `any`, both, or none leave it open.
pub fn validate_url(value: &str, patterns: &[UrlPattern]) -> Result<(), InputValidationError> {
    let url = Url::parse(value).map_err(|e| InputValidationError::InvalidUrl {
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    if url.host_str().is_none_or(str::is_empty) {
        return Err(InputValidationError::InvalidUrl {
            value: value.to_string(),
            reason: "missing host".into(),
        });
    }

    let any = patterns.contains(&UrlPattern::Any);
    let http = patterns.contains(&UrlPattern::Http);
    let https = patterns.contains(&UrlPattern::Https);

    let required = match (any, http, https) {
        (false, true, false) => Some(UrlPattern::Http),
        (false, false, true) => Some(UrlPattern::Https),
        _ => None,
    };

    match required {
        Some(scheme) if url.scheme() != scheme.as_str() => {
            Err(InputValidationError::SchemeNotAllowed {
                scheme: url.scheme().to_string(),
                expected: scheme.as_str().to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Inclusive on both ends.
pub fn validate_integer_range(
    value: &str,
    range: Option<&IntegerRange>,
) -> Result<(), InputValidationError> {
    let (min, max) = range
        .and_then(IntegerRange::bounds)
        .ok_or(InputValidationError::MissingRange)?;

    let number: i64 = value
        .trim()
        .parse()
        .map_err(|_| InputValidationError::NotAnInteger {
            value: value.to_string(),
        })?;

    if (min..=max).contains(&number) {
        Ok(())
    } else {
        Err(InputValidationError::OutOfRange {
            value: number,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_question(patterns: &[&str]) -> Question {
        Question::text("URL?", "url")
            .with_validation("url")
            .with_valid_patterns(patterns.iter().copied())
    }

    #[test]
    fn question_without_rule_accepts_anything_non_empty() {
        let q = Question::text("Name?", "name");
        assert!(InputValidator::validate("whatever", &q).is_ok());
        assert_eq!(
            InputValidator::validate("", &q),
            Err(InputValidationError::EmptyInput)
        );
    }

    #[test]
    fn custom_regex_takes_precedence() {
        // both set is rejected by the playbook validator, but the custom
        // pattern still wins if it ever reaches here
        let q = Question::text("Code?", "code")
            .with_custom_regex(r"^[A-Z]{3}$")
            .with_validation("email");

        assert!(InputValidator::validate("ABC", &q).is_ok());
        assert!(matches!(
            InputValidator::validate("abc", &q),
            Err(InputValidationError::PatternMismatch { .. })
        ));
    }

    #[test]
    fn broken_custom_regex_is_reported() {
        let q = Question::text("Code?", "code").with_custom_regex("([a-z");
        assert!(matches!(
            InputValidator::validate("abc", &q),
            Err(InputValidationError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn unknown_rule_name_is_an_error() {
        let q = Question::text("x?", "x").with_validation("not_included");
        assert_eq!(
            InputValidator::validate("value", &q),
            Err(InputValidationError::UnknownValidationRule {
                name: "not_included".into()
            })
        );
    }

    #[test]
    fn domain_names() {
        for ok in ["example.com", "sub.example.co.uk", "a-b.example.io"] {
            assert!(validate_domain(ok).is_ok(), "{ok}");
        }
        for bad in ["example", "-bad.com", "bad-.com", "example.c", "exa_mple.com", "example.toolongtld"] {
            assert!(validate_domain(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn ip_addresses() {
        assert!(validate_ip("192.168.1.1").is_ok());
        assert!(validate_ip("::1").is_ok());
        assert!(validate_ip("2001:db8::8a2e:370:7334").is_ok());
        assert!(validate_ip("256.1.1.1").is_err());
        assert!(validate_ip("example.com").is_err());
    }

    #[test]
    fn email_addresses() {
        for ok in [
            "user@example.com",
            "first.last+tag@example.co",
            "Jane Doe <jane@example.com>",
            "<jane@example.com>",
            "user@localhost",
        ] {
            assert!(validate_email(ok).is_ok(), "{ok}");
        }
        for bad in ["plainaddress", "@example.com", "user@", "a@b@c", "Jane <jane@example.com"] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn display_name_specials_need_quotes() {
        for bad in [
            "Doe, Jane <j@x.com>",
            "Jane; Doe <j@x.com>",
            "Jane (work) <j@x.com>",
            "Ops: Jane <j@x.com>",
            "[Ops] Jane <j@x.com>",
            r"Jane\Doe <j@x.com>",
        ] {
            assert!(validate_email(bad).is_err(), "{bad}");
        }
        assert!(validate_email(r#""Doe, Jane" <j@x.com>"#).is_ok());
        assert!(validate_email("J. Doe <j@x.com>").is_ok());
    }

    #[test]
    fn url_https_only() {
        let q = url_question(&["https"]);
        assert!(InputValidator::validate("https://a.b", &q).is_ok());
        assert!(matches!(
            InputValidator::validate("http://a.b", &q),
            Err(InputValidationError::SchemeNotAllowed { .. })
        ));
    }

    #[test]
    fn url_http_only() {
        let q = url_question(&["http"]);
        assert!(InputValidator::validate("http://a.b", &q).is_ok());
        assert_eq!(
            InputValidator::validate("https://a.b", &q),
            Err(InputValidationError::SchemeNotAllowed {
                scheme: "https".into(),
                expected: "http".into(),
            })
        );
    }

    #[test]
    fn url_any_or_both_schemes_are_open() {
        for patterns in [&["any"][..], &["http", "https"][..], &[][..]] {
            let q = url_question(patterns);
            assert!(InputValidator::validate("https://a.b", &q).is_ok());
            assert!(InputValidator::validate("http://a.b", &q).is_ok());
        }
    }

    #[test]
    fn url_without_scheme_or_host_is_rejected() {
        let q = url_question(&["any"]);
        assert!(matches!(
            InputValidator::validate("a.b", &q),
            Err(InputValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            InputValidator::validate("mailto:user@example.com", &q),
            Err(InputValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn url_with_unknown_pattern_is_rejected() {
        let q = url_question(&["ftp"]);
        assert!(matches!(
            InputValidator::validate("ftp://a.b", &q),
            Err(InputValidationError::InvalidValidPattern { .. })
        ));
    }

    #[test]
    fn integer_range_is_inclusive() {
        let range = IntegerRange::new(0, 3600);
        assert!(validate_integer_range("0", Some(&range)).is_ok());
        assert!(validate_integer_range("3600", Some(&range)).is_ok());
        assert_eq!(
            validate_integer_range("-1", Some(&range)),
            Err(InputValidationError::OutOfRange {
                value: -1,
                min: 0,
                max: 3600
            })
        );
        assert!(validate_integer_range("3601", Some(&range)).is_err());
    }

    #[test]
    fn integer_range_errors() {
        let range = IntegerRange::new(1, 10);
        assert!(matches!(
            validate_integer_range("ten", Some(&range)),
            Err(InputValidationError::NotAnInteger { .. })
        ));
        assert_eq!(
            validate_integer_range("5", None),
            Err(InputValidationError::MissingRange)
        );
        let open = IntegerRange {
            min: Some(1),
            max: None,
        };
        assert_eq!(
            validate_integer_range("5", Some(&open)),
            Err(InputValidationError::MissingRange)
        );
    }
}
