/// Canonicalizes North American numbers to `+1XXXXXXXXXX`.
///
/// Every non-digit is stripped first. Ten digits get a `+1` prefix and eleven
/// digits starting with `1` get a `+` prefix. Anything else comes back as the
/// original input, untouched.
pub fn normalize_phone(value: &str) -> String {
    let digits: String = value.chars().filter(|ch| ch.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("+1{digits}"),
        11 if digits.starts_with('1') => format!("+{digits}"),
        _ => value.to_string(),
    }
}
