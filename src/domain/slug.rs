//! URL-safe identifiers derived from human-readable titles.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Converts a title into a lowercase, hyphen-separated ASCII slug.
///
/// Cyrillic is transliterated, accented Latin letters lose their marks, and
/// anything else outside ASCII is dropped. The result may be empty when the
/// title has no representable characters.
#[must_use]
pub fn slugify(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();

    let disallowed =
        DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9_\s-]").expect("Invalid Regex"));
    let separators = SEPARATORS.get_or_init(|| Regex::new(r"[-\s]+").expect("Invalid Regex"));

    let mut transliterated = String::with_capacity(title.len());
    for c in title.to_lowercase().chars() {
        match transliterate_cyrillic(c) {
            Some(latin) => transliterated.push_str(latin),
            None => transliterated.push(c),
        }
    }

    let ascii: String = transliterated.nfkd().filter(char::is_ascii).collect();
    let ascii = ascii.to_lowercase();

    let cleaned = disallowed.replace_all(&ascii, "");
    let joined = separators.replace_all(&cleaned, "-");

    joined.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Returns true when `slug` only contains ASCII letters, digits, hyphens and underscores.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    static VALID: OnceLock<Regex> = OnceLock::new();

    VALID
        .get_or_init(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("Invalid Regex"))
        .is_match(slug)
}

const fn transliterate_cyrillic(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' | 'ґ' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'є' => "ye",
        'ж' => "zh",
        'з' => "z",
        'и' | 'і' => "i",
        'ї' => "yi",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "kh",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "shch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Breaking Bad"), "breaking-bad");
        assert_eq!(slugify("Pilot"), "pilot");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(slugify("  Dr. Who?  "), "dr-who");
        assert_eq!(
            slugify("Mr. Robot: eps1.0_hellofriend.mov"),
            "mr-robot-eps10_hellofriendmov"
        );
        assert_eq!(slugify("Law & Order -- SVU"), "law-order-svu");
        assert_eq!(slugify("--edge__"), "edge");
    }

    #[test]
    fn test_accents_are_stripped() {
        assert_eq!(slugify("Amélie à Paris"), "amelie-a-paris");
        assert_eq!(slugify("Señor Ávila"), "senor-avila");
    }

    #[test]
    fn test_cyrillic_is_transliterated() {
        assert_eq!(slugify("Во все тяжкие"), "vo-vse-tyazhkie");
        assert_eq!(slugify("Сезон 1"), "sezon-1");
        assert_eq!(slugify("Щука и ёж"), "shchuka-i-ezh");
    }

    #[test]
    fn test_unrepresentable_title_yields_empty_slug() {
        assert_eq!(slugify("進撃の巨人"), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("breaking-bad"));
        assert!(is_valid_slug("Season_01"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("with space"));
        assert!(!is_valid_slug("../etc"));
        assert!(!is_valid_slug("тест"));
    }
}
