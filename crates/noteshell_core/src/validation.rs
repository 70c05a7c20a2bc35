//! Client-side checks mirroring the server's registration rules.
//!
//! Run before `register` so obviously invalid input is reported without a
//! round trip. Login input is never pre-validated: the server is the
//! authority on existing accounts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$")
        .expect("valid email regex")
});
static UPPERCASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").expect("valid upper regex"));
static LOWERCASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").expect("valid lower regex"));
static DIGIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").expect("valid digit regex"));
static SPECIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[@$!%*?&#]").expect("valid special regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail,
    PasswordTooShort,
    PasswordMissingUppercase,
    PasswordMissingLowercase,
    PasswordMissingDigit,
    PasswordMissingSpecial,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::PasswordTooShort => write!(
                f,
                "password must contain at least {MIN_PASSWORD_CHARS} characters"
            ),
            Self::PasswordMissingUppercase => {
                write!(f, "password must contain at least one uppercase letter")
            }
            Self::PasswordMissingLowercase => {
                write!(f, "password must contain at least one lowercase letter")
            }
            Self::PasswordMissingDigit => write!(f, "password must contain at least one digit"),
            Self::PasswordMissingSpecial => write!(
                f,
                "password must contain at least one special character: @, $, !, %, *, ?, #, &"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Returns the trimmed address when it looks like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if EMAIL_RE.is_match(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Checks length first, then character classes, reporting the first miss.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::PasswordTooShort);
    }
    if !UPPERCASE_RE.is_match(password) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !LOWERCASE_RE.is_match(password) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if !DIGIT_RE.is_match(password) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if !SPECIAL_RE.is_match(password) {
        return Err(ValidationError::PasswordMissingSpecial);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_email, validate_password_strength, ValidationError};

    #[test]
    fn accepts_strong_password() {
        validate_password_strength("StrongPass123!").unwrap();
    }

    #[test]
    fn reports_first_missing_password_rule() {
        assert_eq!(
            validate_password_strength("Ab1!"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_password_strength("weakpass1!"),
            Err(ValidationError::PasswordMissingUppercase)
        );
        assert_eq!(
            validate_password_strength("WEAKPASS1!"),
            Err(ValidationError::PasswordMissingLowercase)
        );
        assert_eq!(
            validate_password_strength("WeakPass!!"),
            Err(ValidationError::PasswordMissingDigit)
        );
        assert_eq!(
            validate_password_strength("WeakPass12"),
            Err(ValidationError::PasswordMissingSpecial)
        );
    }

    #[test]
    fn email_is_trimmed_and_checked() {
        assert_eq!(validate_email("  u@x.com ").unwrap(), "u@x.com");
        assert_eq!(validate_email("not-an-email"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("u@localhost"), Err(ValidationError::InvalidEmail));
    }
}
