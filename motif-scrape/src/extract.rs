//! Free-text credit extraction

/// Text following `keyword`, cut at the first delimiter that occurs.
///
/// The keyword is searched case-insensitively. Delimiters are tried in
/// order and the first one present after the keyword wins. The keyword
/// itself is removed and the result trimmed. Returns an empty string when
/// the keyword does not occur.
///
/// ```
/// use motif_scrape::extract::extract_substring;
///
/// let about = "Cover art by Lexxy and Tavia.\nThanks to everyone";
/// assert_eq!(extract_substring(about, "art by", &[",", "and", ".", "\n"]), "Lexxy");
/// ```
pub fn extract_substring(text: &str, keyword: &str, delimiters: &[&str]) -> String {
    // ASCII folding keeps byte offsets aligned with `text`
    let lower = text.to_ascii_lowercase();
    let Some(start) = lower.find(&keyword.to_ascii_lowercase()) else {
        return String::new();
    };
    let tail = &text[start..];

    for delimiter in delimiters {
        if let Some(end) = tail.find(delimiter) {
            return tail[..end].replace(keyword, "").trim().to_string();
        }
    }
    tail.replace(keyword, "").trim().to_string()
}

/// Default delimiters for credit lines
pub const CREDIT_DELIMITERS: [&str; 2] = [".", "\n"];

/// Delimiters for artwork credits, which often list several artists
pub const ART_CREDIT_DELIMITERS: [&str; 4] = [",", "and", ".", "\n"];
