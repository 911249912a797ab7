//! Text unit classification: the fast reject in front of rendering.

use pinyin::ScriptProvider;

/// Whether `text` contains any target-script character at all.
/// Iterates by character, never by byte, and short-circuits on the first hit.
pub fn contains_target_script<P: ScriptProvider>(text: &str, provider: &P) -> bool {
    text.chars().any(|ch| provider.is_target_char(ch))
}

/// Count target-script characters in `text`, stopping once `cap` is reached.
/// Callers comparing against a threshold never pay for a full count.
pub fn count_target_chars<P: ScriptProvider>(text: &str, provider: &P, cap: usize) -> usize {
    let mut count = 0;
    for ch in text.chars() {
        if provider.is_target_char(ch) {
            count += 1;
            if count >= cap {
                break;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinyin::PinyinTable;

    #[test]
    fn plain_ascii_has_no_target_chars() {
        let table = PinyinTable::new();
        assert!(!contains_target_script("hello, world", &table));
        assert_eq!(count_target_chars("hello", &table, usize::MAX), 0);
    }

    #[test]
    fn mixed_text_is_detected_and_counted() {
        let table = PinyinTable::new();
        assert!(contains_target_script("price: 三十 yuan", &table));
        assert_eq!(count_target_chars("我爱中国!", &table, usize::MAX), 4);
    }

    #[test]
    fn count_stops_at_the_cap() {
        let table = PinyinTable::new();
        assert_eq!(count_target_chars("我爱中国", &table, 2), 2);
    }

    #[test]
    fn non_target_unicode_does_not_match() {
        let table = PinyinTable::new();
        assert!(!contains_target_script("café naïve Привет", &table));
    }
}
