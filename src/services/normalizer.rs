//! Text normalization for expense search
//!
//! Folds case and common Latin diacritics so that a search for "cafe"
//! matches "Café" and "CAFÉ".

/// Normalize text to canonical search form.
///
/// Transformations:
/// - Trim surrounding whitespace
/// - Lowercase: "Groceries" → "groceries"
/// - Strip diacritics: "crème brûlée" → "creme brulee"
///
/// # Examples
/// ```
/// use spendtrack::services::normalizer::normalize_text;
///
/// assert_eq!(normalize_text("  Café "), "cafe");
/// assert_eq!(normalize_text("Supermercado Añil"), "supermercado anil");
/// ```
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(fold_diacritic)
        .collect()
}

/// Map an accented lowercase Latin letter to its base letter
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' | 'ě' => 'e',
        'ì' | 'í' | 'î' | 'ï' | 'ī' => 'i',
        'ł' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

/// True when `needle` occurs in `haystack` after normalizing both.
/// An empty needle matches everything.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    let needle = normalize_text(needle);
    needle.is_empty() || normalize_text(haystack).contains(&needle)
}
