/// Derive a display name from a raw document key.
///
/// Underscores become spaces, then every run of cased letters is title-cased:
/// the first letter is upper-cased and the rest lower-cased. A letter that
/// follows a digit or punctuation starts a new run, so `covid_19_care` becomes
/// `Covid 19 Care` and `o'neil` becomes `O'Neil`.
#[must_use]
pub fn display_name_from_key(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Title-case `raw` one cased run at a time.
#[must_use]
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut previous_cased = false;
    for ch in raw.chars() {
        if previous_cased {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        previous_cased = ch.is_lowercase() || ch.is_uppercase();
    }
    out
}
