//! Email shape validation

/// Basic shape check: `local@domain.tld`, no whitespace anywhere.
///
/// Intentionally loose. Deliverability is not this system's problem; the
/// check only rejects strings that cannot be addresses at all.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}
