//! Email address syntax check applied before rows keyed by email are inserted.

/// Error returned when an email address is syntactically invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid email address")]
pub struct InvalidEmail;

/// Trim and validate an email address.
///
/// Accepts `local@domain.tld` shapes: exactly one `@`, a non-empty local part,
/// and a domain containing a dot that neither starts nor ends the domain.
/// No whitespace anywhere. The returned address is trimmed but otherwise
/// unchanged; case is preserved.
pub fn parse_email(raw: &str) -> Result<String, InvalidEmail> {
    let email = raw.trim();
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(InvalidEmail);
    }
    let (local, domain) = email.split_once('@').ok_or(InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(InvalidEmail);
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(InvalidEmail);
    }
    Ok(email.to_owned())
}
