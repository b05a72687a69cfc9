//! sets of codepoints and conversions between strings and codepoint sequences

use core::fmt;

/// first codepoint outside of ASCII
pub const ASCII_END: u32 = 0x80;

/// immutable set of codepoints, kept sorted and deduplicated for binary search
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CodepointSet
{
    codes: Vec<u32>,
}

impl CodepointSet
{
    /// builds a set from values in any order, duplicates are dropped
    pub fn new(mut codes: Vec<u32>) -> Self
    {
        codes.sort_unstable();
        codes.dedup();
        codes.shrink_to_fit();

        Self { codes }
    }

    #[inline(always)]
    pub fn contains(&self, code: u32) -> bool
    {
        self.codes.binary_search(&code).is_ok()
    }

    /// any of the codepoints is in the set
    pub fn contains_any(&self, codes: &[u32]) -> bool
    {
        codes.iter().any(|&code| self.contains(code))
    }

    /// every codepoint is in the set
    pub fn contains_all(&self, codes: &[u32]) -> bool
    {
        codes.iter().all(|&code| self.contains(code))
    }

    /// a new set with the codepoints matching the predicate
    pub fn filter(&self, predicate: impl Fn(u32) -> bool) -> Self
    {
        Self {
            codes: self.codes.iter().copied().filter(|&code| predicate(code)).collect(),
        }
    }

    pub fn len(&self) -> usize
    {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.codes.is_empty()
    }

    /// ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_
    {
        self.codes.iter().copied()
    }

    pub fn as_slice(&self) -> &[u32]
    {
        &self.codes
    }

    pub fn to_vec(&self) -> Vec<u32>
    {
        self.codes.clone()
    }
}

impl FromIterator<u32> for CodepointSet
{
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self
    {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<u32>> for CodepointSet
{
    fn from(codes: Vec<u32>) -> Self
    {
        Self::new(codes)
    }
}

impl fmt::Debug for CodepointSet
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_set()
            .entries(self.codes.iter().map(|code| format!("U+{:04X}", code)))
            .finish()
    }
}

/// codepoints of a string
#[inline(always)]
pub fn codes_from_str(source: &str) -> Vec<u32>
{
    source.chars().map(u32::from).collect()
}

/// string from codepoints; values outside of unicode scalar values become U+FFFD
pub fn str_from_codes(codes: &[u32]) -> String
{
    let mut result = String::with_capacity(codes.len());
    push_codes(&mut result, codes);

    result
}

/// appends codepoints to a string
#[inline(always)]
pub fn push_codes(result: &mut String, codes: &[u32])
{
    for &code in codes {
        result.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}

#[inline(always)]
pub fn is_ascii(codes: &[u32]) -> bool
{
    codes.iter().all(|&code| code < ASCII_END)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn sorted_and_deduplicated()
    {
        let set = CodepointSet::new(vec![0x301, 0x61, 0x301, 0x41]);

        assert_eq!(set.as_slice(), &[0x41, 0x61, 0x301]);
        assert!(set.contains(0x61));
        assert!(!set.contains(0x62));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn filter_keeps_order()
    {
        let set: CodepointSet = [0xE9, 0x65, 0x2D, 0x3BE].into_iter().collect();
        let ascii = set.filter(|code| code < ASCII_END);

        assert_eq!(ascii.to_vec(), vec![0x2D, 0x65]);
        assert!(set.contains_any(&[0x10, 0x3BE]));
        assert!(!set.contains_all(&[0x65, 0x66]));
    }

    #[test]
    fn strings()
    {
        let codes = codes_from_str("añ👍");

        assert_eq!(codes, vec![0x61, 0xF1, 0x1F44D]);
        assert_eq!(str_from_codes(&codes), "añ👍");
        assert_eq!(str_from_codes(&[0xD800]), "\u{FFFD}");
        assert!(is_ascii(&[0x61, 0x7F]));
        assert!(!is_ascii(&[0x61, 0x80]));
    }
}
