/// Marker appended to the last kept line when text is cut off
pub const ELLIPSIS: char = '…';

/// Maximum line count used for both the title and the bullet text
pub const DEFAULT_MAX_LINES: usize = 2;

/// Wrap `text` into at most `max_lines` lines of at most `max_chars` characters.
///
/// Lines are filled greedily, breaking on whitespace. Words longer than a line
/// are split across lines, so text without spaces (Japanese, URLs) still wraps.
/// Empty text, or a zero width, gives back the original text as the only line.
/// When more than `max_lines` lines would be needed, the last kept line is cut
/// to `max_chars - 1` characters and ends with [`ELLIPSIS`].
pub fn wrap(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let lines = fill(text, max_chars);
    if lines.is_empty() {
        return vec![text.to_string()];
    }

    let max_lines = max_lines.max(1);
    if lines.len() <= max_lines {
        return lines;
    }

    let mut kept = lines;
    kept.truncate(max_lines);
    if let Some(last) = kept.last_mut() {
        *last = with_ellipsis(last, max_chars);
    }
    kept
}

/// Greedy fill. Returns no lines when there is nothing to break.
fn fill(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width == 0 {
        return lines;
    }

    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let sep = usize::from(current_len > 0);

        if current_len + sep + word_len <= width {
            if sep == 1 {
                current.push(' ');
            }
            current.push_str(word);
            current_len += sep + word_len;
            continue;
        }

        if word_len <= width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        // Word wider than a whole line: use up the current line, then chunk.
        let mut chars = word.chars();
        if current_len > 0 {
            let space_left = width.saturating_sub(current_len + 1);
            if space_left > 0 {
                current.push(' ');
                current.extend(chars.by_ref().take(space_left));
            }
            lines.push(std::mem::take(&mut current));
        }

        let rest: Vec<char> = chars.collect();
        let mut chunks = rest.chunks(width).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                lines.push(chunk.iter().collect());
            } else {
                current = chunk.iter().collect();
                current_len = chunk.len();
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn with_ellipsis(line: &str, max_chars: usize) -> String {
    let mut out: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_short_text_is_one_line() {
        assert_eq!(wrap("Stay hydrated", 22, 2), vec!["Stay hydrated"]);
    }

    #[test]
    fn test_greedy_fill() {
        assert_eq!(
            wrap("the quick brown fox jumps", 10, 5),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(wrap("  a \t b\n c  ", 10, 2), vec!["a b c"]);
    }

    #[test]
    fn test_overflow_is_truncated_with_ellipsis() {
        let lines = wrap("one two three four five six seven", 9, 2);
        assert_eq!(lines, vec!["one two", "three…"]);

        let lines = wrap("Improves focus and keeps your energy steady", 16, 2);
        assert_eq!(lines, vec!["Improves focus", "and keeps your…"]);

        let lines = wrap("Improves focus and keeps your energy steady", 13, 2);
        assert_eq!(lines, vec!["Improves", "focus and…"]);
    }

    #[test]
    fn test_short_last_line_still_gets_marker() {
        assert_eq!(wrap("aa bb cc", 2, 2), vec!["aa", "b…"]);
        assert_eq!(wrap("ab cd ef", 5, 1), vec!["ab c…"]);
    }

    #[test]
    fn test_long_words_are_broken() {
        assert_eq!(wrap("abcdefghij", 4, 5), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab cdefghij", 5, 5), vec!["ab cd", "efghi", "j"]);
    }

    #[test]
    fn test_japanese_wraps_by_characters() {
        let text = "こまめに水を飲むと集中力が続き、体調も整いやすくなります";
        let lines = wrap(text, 10, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "こまめに水を飲むと集");
        assert_eq!(char_len(&lines[1]), 10);
        assert!(lines[1].ends_with(ELLIPSIS));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(wrap("", 10, 2), vec![""]);
        assert_eq!(wrap("   ", 10, 2), vec!["   "]);
    }

    #[test]
    fn test_zero_width_keeps_text() {
        assert_eq!(wrap("hello world", 0, 2), vec!["hello world"]);
    }

    #[test]
    fn test_width_one_truncation_is_marker_only() {
        assert_eq!(wrap("a b c", 1, 2), vec!["a", "…"]);
    }

    #[test]
    fn test_zero_max_lines_acts_as_one() {
        assert_eq!(wrap("aa bb", 2, 0), vec!["a…"]);
    }

    #[test]
    fn test_deterministic() {
        let text = "Improves focus and keeps your energy steady all afternoon";
        assert_eq!(wrap(text, 12, 2), wrap(text, 12, 2));
    }

    #[test]
    fn test_line_count_and_width_bounds() {
        let samples = [
            "",
            "x",
            "Stay hydrated",
            "Improves focus and keeps your energy steady all afternoon",
            "supercalifragilisticexpialidocious is long",
            "水分補給で集中力アップ、午後の眠気も防げます",
            "a  b   c    d     e",
        ];

        for text in samples {
            for width in 1..=25 {
                for max_lines in 1..=3 {
                    let lines = wrap(text, width, max_lines);
                    assert!(!lines.is_empty() && lines.len() <= max_lines);

                    let needed = fill(text, width).len();
                    if needed > max_lines {
                        let last = lines.last().unwrap();
                        assert!(last.ends_with(ELLIPSIS), "{:?} @ {}", text, width);
                        assert!(char_len(last) <= width);
                    }

                    if !text.trim().is_empty() {
                        for line in &lines {
                            assert!(!line.is_empty(), "{:?} @ {}", text, width);
                            assert!(char_len(line) <= width, "{:?} @ {}", text, width);
                        }
                    }
                }
            }
        }
    }
}
