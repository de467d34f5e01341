//! Shared utility functions.

/// Take at most `max_chars` characters from the start of `s`.
///
/// Returns a sub-slice of the original string; never splits a UTF-8
/// character.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_chars_ascii() {
        assert_eq!(take_chars("hello world", 5), "hello");
    }

    #[test]
    fn take_chars_no_op_when_short() {
        assert_eq!(take_chars("hi", 10), "hi");
    }

    #[test]
    fn take_chars_multibyte() {
        let s = "あのね";
        assert_eq!(take_chars(s, 1), "あ");
        assert_eq!(take_chars(s, 2), "あの");
        assert_eq!(take_chars(s, 3), "あのね");
    }

    #[test]
    fn take_chars_empty() {
        assert_eq!(take_chars("", 4), "");
        assert_eq!(take_chars("abc", 0), "");
    }
}
