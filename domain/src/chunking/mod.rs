//! Splitting long text for size-limited transports
//!
//! Used at the delivery boundary only. Sizes are counted in characters.

use crate::core::error::DomainError;

/// Message size limit of common chat transports
pub const DEFAULT_CHUNK_SIZE: usize = 2000;

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Split `text` into segments of at most `max_chunk_size` characters.
///
/// The text is divided into the fewest evenly sized windows that fit the
/// limit; each segment then ends at the last sentence terminator inside its
/// window, or at the window edge when there is none. Concatenating the
/// segments gives back `text` exactly.
pub fn chunk_text(text: &str, max_chunk_size: usize) -> Result<Vec<String>, DomainError> {
    if max_chunk_size == 0 {
        return Err(DomainError::InvalidChunkSize);
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let len = chars.len();
    let byte_at = |index: usize| chars.get(index).map_or(text.len(), |(offset, _)| *offset);

    let num_chunks = len.div_ceil(max_chunk_size).max(1);
    let window = len.div_ceil(num_chunks);

    let mut chunks = Vec::with_capacity(num_chunks);
    let mut start = 0;
    while start < len {
        let mut end = (start + window).min(len);
        if end < len
            && let Some(boundary) = (start..end).rev().find(|&i| is_sentence_end(chars[i].1))
        {
            end = boundary + 1;
        }
        chunks.push(text[byte_at(start)..byte_at(end)].to_string());
        start = end;
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        assert_eq!(chunk_text("Hello.", 2000).unwrap(), vec!["Hello."]);
    }

    #[test]
    fn test_empty_text_no_chunks() {
        assert!(chunk_text("", 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(chunk_text("abc", 0), Err(DomainError::InvalidChunkSize));
    }

    #[test]
    fn test_splits_on_sentence_boundary() {
        let chunks = chunk_text("One. Two. Three.", 10).unwrap();
        assert_eq!(chunks, vec!["One.", " Two.", " Three."]);
    }

    #[test]
    fn test_question_and_exclamation_are_boundaries() {
        let chunks = chunk_text("Why? Because! Fine", 8).unwrap();
        assert_eq!(chunks.concat(), "Why? Because! Fine");
        assert_eq!(chunks[0], "Why?");
    }

    #[test]
    fn test_hard_split_without_boundary() {
        let chunks = chunk_text("abcdefghij", 4).unwrap();
        assert_eq!(chunks, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_multibyte_counts_characters() {
        let chunks = chunk_text("éééé", 2).unwrap();
        assert_eq!(chunks, vec!["éé", "éé"]);
    }

    #[test]
    fn test_segments_fit_and_reconstruct() {
        let text = "The group prefers Tuesday. Some asked for Thursday instead! \
                    Nobody wanted Monday? A few had no opinion at all and said so \
                    at considerable length without any punctuation whatsoever";
        for max in [1, 3, 7, 16, 25, 40, 80, 500] {
            let chunks = chunk_text(text, max).unwrap();
            assert!(chunks.iter().all(|c| c.chars().count() <= max), "max {max}");
            assert_eq!(chunks.concat(), text, "max {max}");
        }
    }
}
