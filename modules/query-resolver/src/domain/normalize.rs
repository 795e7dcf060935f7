/// Lower-case, drop apostrophes, turn every other non-alphanumeric character
/// into a separator and collapse runs of whitespace.
///
/// `"Haven't they submitted? (80%)"` becomes `"havent they submitted 80"`.
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .flat_map(char::to_lowercase)
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
