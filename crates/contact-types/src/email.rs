//! Basic email shape check.

/// `local@domain.tld` shape: exactly one `@`, non-empty local part, a dot
/// inside the domain that is neither its first nor last character, and no
/// whitespace anywhere. Deliverability is not checked.
pub fn is_plausible_email(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rfind('.') {
        Some(dot) => dot > 0 && dot + 1 < domain.len() && !domain.starts_with('.'),
        None => false,
    }
}
