use std::collections::HashMap;

use crate::bits::Decoder;
use crate::error::{DecodeError, DecodeResult};

/// emoji presentation selector, optional inside a sequence
pub const FE0F: u32 = 0xFE0F;

/// an emoji as stored (beautified) and as compared (normalized, without U+FE0F)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiSequence
{
    normalized: Vec<u32>,
    beautified: Vec<u32>,
}

impl EmojiSequence
{
    pub fn new(beautified: Vec<u32>) -> Self
    {
        let normalized = beautified.iter().copied().filter(|&c| c != FE0F).collect();

        Self {
            normalized,
            beautified,
        }
    }

    pub fn normalized(&self) -> &[u32]
    {
        &self.normalized
    }

    pub fn beautified(&self) -> &[u32]
    {
        &self.beautified
    }

    /// the normalized form lost presentation selectors
    pub fn is_mangled(&self) -> bool
    {
        self.normalized.len() < self.beautified.len()
    }
}

/// trie over codepoints; terminals refer to indices of the emoji list
#[derive(Debug, Default)]
pub struct EmojiNode
{
    emoji: Option<usize>,
    children: HashMap<u32, EmojiNode>,
}

impl EmojiNode
{
    fn child(&mut self, code: u32) -> &mut EmojiNode
    {
        self.children.entry(code).or_default()
    }

    pub fn get(&self, code: u32) -> Option<&EmojiNode>
    {
        self.children.get(&code)
    }

    pub fn emoji(&self) -> Option<usize>
    {
        self.emoji
    }

    /// builds the trie, every U+FE0F of a beautified sequence may be present or absent
    pub fn build(emojis: &[EmojiSequence]) -> Self
    {
        let mut root = EmojiNode::default();

        for (index, emoji) in emojis.iter().enumerate() {
            // paths from the root, one per combination of present / absent selectors
            let mut paths: Vec<Vec<u32>> = vec![vec![]];

            for &code in emoji.beautified() {
                match code == FE0F {
                    true => {
                        let with: Vec<Vec<u32>> = paths
                            .iter()
                            .map(|path| {
                                let mut path = path.clone();
                                path.push(code);
                                path
                            })
                            .collect();

                        paths.extend(with);
                    }
                    false => paths.iter_mut().for_each(|path| path.push(code)),
                }
            }

            for path in paths {
                let mut node = &mut root;

                for code in path {
                    node = node.child(code);
                }

                node.emoji = Some(index);
            }
        }

        root
    }

    /// longest sequence starting at `start`: (emoji index, end position)
    pub fn find(&self, codes: &[u32], start: usize) -> Option<(usize, usize)>
    {
        let mut node = self;
        let mut found = None;

        for (i, &code) in codes.iter().enumerate().skip(start) {
            node = match node.get(code) {
                Some(next) => next,
                None => break,
            };

            if let Some(emoji) = node.emoji {
                found = Some((emoji, i + 1));
            }
        }

        found
    }
}

/// sequences grouped by length until a zero length, sorted by the normalized form
pub fn decode_emojis(decoder: &mut Decoder) -> DecodeResult<Vec<EmojiSequence>>
{
    let mut emojis = vec![];

    loop {
        let width = decoder.read_count()?;

        if width == 0 {
            break;
        }

        let count = decoder.read_count()?;
        let mut rows = vec![Vec::with_capacity(width); count];

        for _ in 0 .. width {
            let column = decoder.read_unsorted_deltas(count)?;

            for (row, code) in rows.iter_mut().zip(column) {
                row.push(code);
            }
        }

        emojis.extend(rows.into_iter().map(EmojiSequence::new));
    }

    if let Some(empty) = emojis.iter().find(|e| e.normalized().is_empty()) {
        return Err(DecodeError::InvalidTable(format!(
            "emoji {:X?} has no codepoints besides U+FE0F",
            empty.beautified()
        )));
    }

    emojis.sort_by(|a, b| a.normalized().cmp(b.normalized()));

    Ok(emojis)
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn emojis() -> Vec<EmojiSequence>
    {
        vec![
            EmojiSequence::new(vec![0x1F3F4]),
            EmojiSequence::new(vec![0x1F3F4, 0x200D, 0x2620, FE0F]),
            EmojiSequence::new(vec![0x2764, FE0F]),
            EmojiSequence::new(vec![0x23, FE0F, 0x20E3]),
        ]
    }

    #[test]
    fn normalized_drops_selectors()
    {
        let heart = EmojiSequence::new(vec![0x2764, FE0F]);

        assert_eq!(heart.normalized(), &[0x2764]);
        assert_eq!(heart.beautified(), &[0x2764, FE0F]);
        assert!(heart.is_mangled());
        assert!(!EmojiSequence::new(vec![0x1F680]).is_mangled());
    }

    #[test]
    fn longest_match_wins()
    {
        let root = EmojiNode::build(&emojis());
        let pirate = [0x1F3F4, 0x200D, 0x2620, FE0F, 0x61];

        assert_eq!(root.find(&pirate, 0), Some((1, 4)));
        // without the selector
        assert_eq!(root.find(&pirate[.. 3], 0), Some((1, 3)));
        // falls back to the shorter sequence
        assert_eq!(root.find(&[0x1F3F4, 0x200D, 0x61], 0), Some((0, 1)));
        assert_eq!(root.find(&pirate, 4), None);
    }

    #[test]
    fn optional_selector_in_the_middle()
    {
        let root = EmojiNode::build(&emojis());

        assert_eq!(root.find(&[0x23, FE0F, 0x20E3], 0), Some((3, 3)));
        assert_eq!(root.find(&[0x23, 0x20E3], 0), Some((3, 2)));
        assert_eq!(root.find(&[0x23], 0), None);
        assert_eq!(root.find(&[0x61, 0x2764], 1), Some((2, 2)));
    }
}
