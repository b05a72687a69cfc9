//! human-safe rendering of codepoints for error messages

use crate::codepoint::push_codes;
use crate::spec::Spec;

/// dotted circle, carrier of a leading combining mark
const DOTTED_CIRCLE: char = '\u{25CC}';
/// left-to-right mark, resets the direction after quoted text
const LRM: char = '\u{200E}';
const ELLIPSIS: u32 = 0x2026;
/// longer sequences are shortened to both ends
const MAX_RENDERED: usize = 80;
const KEPT_PER_END: usize = 39;

/// `{HEX}`
pub fn hex_code(code: u32) -> String
{
    format!("{{{:02X}}}", code)
}

/// text with everything that must not be shown verbatim replaced by `{HEX}`
pub fn safe_str(spec: &Spec, codes: &[u32]) -> String
{
    let mut result = String::new();

    if let Some(&first) = codes.first() {
        if spec.combining_marks().contains(first) {
            result.push(DOTTED_CIRCLE);
        }
    }

    let shortened: Vec<u32>;
    let codes = match codes.len() > MAX_RENDERED {
        true => {
            shortened = codes[.. KEPT_PER_END]
                .iter()
                .copied()
                .chain(Some(ELLIPSIS))
                .chain(codes[codes.len() - KEPT_PER_END ..].iter().copied())
                .collect();
            &shortened[..]
        }
        false => codes,
    };

    let mut start = 0;

    for (i, &code) in codes.iter().enumerate() {
        if spec.should_escape().contains(code) {
            push_codes(&mut result, &codes[start .. i]);
            result.push_str(&hex_code(code));
            start = i + 1;
        }
    }

    push_codes(&mut result, &codes[start ..]);

    result
}

/// `"text"` followed by a direction reset
pub fn bidi_quoted(text: &str) -> String
{
    format!("\"{}\"{}", text, LRM)
}

/// a single codepoint: `"c"‎ {HEX}`, or just `{HEX}` when it must be escaped
pub fn quoted_code(spec: &Spec, code: u32) -> String
{
    match spec.should_escape().contains(code) {
        true => hex_code(code),
        false => format!("{} {}", bidi_quoted(&safe_str(spec, &[code])), hex_code(code)),
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn hex()
    {
        assert_eq!(hex_code(0x5), "{05}");
        assert_eq!(hex_code(0x301), "{301}");
        assert_eq!(hex_code(0x1F44D), "{1F44D}");
    }

    #[test]
    fn quoting()
    {
        assert_eq!(bidi_quoted("ab"), "\"ab\"\u{200E}");
    }
}
