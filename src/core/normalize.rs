use regex::Regex;
use std::sync::LazyLock;

static SPECIAL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("valid special char pattern"));
static LEADING_NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^A-Za-z]*").expect("valid leading pattern"));

/// 把任意 key 轉成 idShort 候選字串
///
/// 1. 移除字母、數字、底線以外的字元
/// 2. 結果非空且不以字母開頭、又有 `fallback_prefix` 時，回傳 `{prefix}_{result}`
/// 3. 否則去掉開頭所有非字母字元
///
/// The result may be empty; callers drop such elements. With a prefix the
/// result is not re-validated, so a prefix with illegal characters yields an
/// illegal id.
pub fn normalize(raw: &str, fallback_prefix: &str) -> String {
    let no_special_chars = SPECIAL_CHARS.replace_all(raw, "");

    let starts_with_letter = no_special_chars
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic());

    if starts_with_letter == Some(false) && !fallback_prefix.is_empty() {
        return format!("{}_{}", fallback_prefix, no_special_chars);
    }

    LEADING_NON_LETTERS
        .replace(&no_special_chars, "")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_digit_without_prefix_is_stripped() {
        assert_eq!(normalize("1abc", ""), "abc");
        assert_eq!(normalize("123_abc", ""), "abc");
    }

    #[test]
    fn test_leading_digit_with_prefix_is_prefixed() {
        assert_eq!(normalize("1abc", "parent"), "parent_1abc");
        assert_eq!(normalize("_x", "parent"), "parent__x");
    }

    #[test]
    fn test_special_chars_are_removed() {
        assert_eq!(normalize("ansible-eth0", ""), "ansibleeth0");
        assert_eq!(normalize("a.b c/d", "p"), "abcd");
        assert_eq!(normalize("über", ""), "ber");
    }

    #[test]
    fn test_special_chars_removed_before_prefix_check() {
        assert_eq!(normalize("-9lives", "cat"), "cat_9lives");
        assert_eq!(normalize("$home", "env"), "home");
    }

    #[test]
    fn test_empty_results() {
        assert_eq!(normalize("", ""), "");
        assert_eq!(normalize("", "parent"), "");
        assert_eq!(normalize("!!!", "parent"), "");
        assert_eq!(normalize("123", ""), "");
    }

    #[test]
    fn test_letters_pass_through() {
        assert_eq!(normalize("key1", "parent"), "key1");
        assert_eq!(normalize("Key_With_Underscores", ""), "Key_With_Underscores");
    }

    #[test]
    fn test_prefix_is_not_sanitized() {
        assert_eq!(normalize("0", "my-list"), "my-list_0");
    }
}
