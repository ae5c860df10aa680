/// Greedily pack the whitespace-separated words of `text` into lines no wider than
/// `max_width`, as measured by `width_of`. Each line is built by appending words
/// (joined with a single space) for as long as the measured line still fits; a word
/// that doesn't fit even on its own is put on a line by itself rather than split.
///
/// Widths can be any unit: [Pt](crate::Pt) when measuring with a [Font](crate::Font),
/// or plain numbers. A limit at or below zero (or one that doesn't compare, like NaN)
/// places one word on each line.
///
/// ```
/// use letterpress::layout::wrap;
///
/// let lines = wrap("the quick brown fox jumps", 11, |line| line.chars().count());
/// assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
/// ```
pub fn wrap<W, F>(text: &str, max_width: W, mut width_of: F) -> Vec<String>
where
    W: PartialOrd + Copy,
    F: FnMut(&str) -> W,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if line.is_empty() || width_of(&candidate) <= max_width {
            // an empty line always takes the word, even if it overflows on its own
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{BuiltinFace, Font, Pt};

    fn chars(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap("the quick brown fox jumps", 11, chars);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn empty_and_blank_text_give_no_lines() {
        assert!(wrap("", 10, chars).is_empty());
        assert!(wrap("   \n\t  ", 10, chars).is_empty());
    }

    #[test]
    fn single_short_word_is_one_line() {
        assert_eq!(wrap("hello", 80, chars), vec!["hello"]);
    }

    #[test]
    fn long_words_are_never_split() {
        let lines = wrap("a incomprehensibilities b", 5, chars);
        assert_eq!(lines, vec!["a", "incomprehensibilities", "b"]);
    }

    #[test]
    fn non_positive_limits_give_one_word_per_line() {
        let expected = vec!["one", "two", "three"];
        assert_eq!(wrap("one two three", 0, chars), expected);
        assert_eq!(wrap("one two three", -4.0, |s: &str| s.len() as f32), expected);
        assert_eq!(wrap("one two three", f32::NAN, |s: &str| s.len() as f32), expected);
    }

    #[test]
    fn collapses_runs_of_whitespace() {
        let lines = wrap("  spaced   out\n\ttext  ", 100, chars);
        assert_eq!(lines, vec!["spaced out text"]);
    }

    #[test]
    fn lines_fit_and_preserve_words() {
        let font = Font::builtin(BuiltinFace::TimesRoman);
        let size = Pt(10.5);
        let limit = Pt(160.0);
        let text = lipsum::lipsum(120);

        let lines = wrap(&text, limit, |line| font.width_of_text(line, size));

        for line in lines.iter() {
            assert!(
                font.width_of_text(line, size) <= limit || !line.contains(' '),
                "{line:?} overflows"
            );
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }
}
