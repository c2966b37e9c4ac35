//! Pseudo-localized text for the debug locale.
//!
//! Vowels are stretched so the text grows by about half, then wrapped in
//! brackets: `"Hello"` becomes `"[Heeellooo]"`. Running with the debug locale
//! makes every string driven by a table easy to spot, and clipped or
//! hardcoded text stands out.

/// Growth factor applied to the text length.
const EXPANSION: f64 = 1.5;

const MARKUP_CHARS: [char; 5] = ['|', '{', '}', '[', ']'];

/// Generate the debug translation for a primary string.
///
/// Text carrying markup or format placeholders is only bracket-wrapped so
/// the placeholders keep working.
pub fn pseudo_translate(text: &str) -> String {
    if has_markup(text) {
        return format!("[{text}]");
    }

    let length = text.chars().count();
    let target_length = (length as f64 * EXPANSION).ceil() as usize;
    let to_add = target_length - length;
    let vowel_count = text.chars().filter(|&c| is_vowel(c)).count();

    if vowel_count == 0 {
        return format!("[{text}]");
    }

    let per_vowel = to_add.div_ceil(vowel_count);

    // Walk backwards so that earlier positions are unaffected by insertions.
    let mut chars: Vec<char> = text.chars().collect();
    for i in (0..length).rev() {
        let c = chars[i];
        if is_vowel(c) {
            let lower = c.to_ascii_lowercase();
            chars.splice(i + 1..i + 1, std::iter::repeat_n(lower, per_vowel));
        }
    }

    let expanded: String = chars.into_iter().collect();
    format!("[{expanded}]")
}

/// True when the text was already wrapped by [`pseudo_translate`] or by hand.
pub fn is_bracketed(text: &str) -> bool {
    text.starts_with('[')
}

fn has_markup(text: &str) -> bool {
    (text.contains('<') && text.contains('>')) || text.contains(MARKUP_CHARS)
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U')
}
