//! ENSIP-15 tables: character classes, mappings, script groups, emoji and confusables
//!
//! decoded once from the ENSIP-15 table, read-only afterwards.

use std::collections::HashMap;

use log::{debug, info};

use crate::bits::Decoder;
use crate::codepoint::{CodepointSet, ASCII_END};
use crate::error::{DecodeError, DecodeResult};
use crate::nf::CanonicalNormalizer;

pub use emoji::{EmojiNode, EmojiSequence, FE0F};
pub use group::Group;
pub use whole::Whole;

mod emoji;
mod group;
mod whole;

/// name of the group the special casing of Greek refers to
pub const GREEK: &str = "Greek";
pub const LATIN: &str = "Latin";

/// where a codepoint stands with respect to whole-script confusables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confusion
{
    /// belongs to exactly one group and looks like nothing else
    Unique,
    /// member of the whole with this index
    Whole(usize),
    /// neither: shared by several groups, no look-alike
    Shared,
}

/// every table of the ENSIP-15 specification
///
/// the derived sets and the emoji trie index into the decoded tables, so nothing is
/// mutable from the outside:
///
/// ```compile_fail
/// fn clear(spec: &mut ens_normalize::Spec)
/// {
///     spec.emojis.clear();
/// }
/// ```
pub struct Spec
{
    should_escape: CodepointSet,
    ignored: CodepointSet,
    combining_marks: CodepointSet,
    max_non_spacing_marks: usize,
    non_spacing_marks: CodepointSet,
    /// text containing none of these is already NFC
    nfc_check: CodepointSet,
    /// codepoint -> display name
    fenced: HashMap<u32, String>,
    /// codepoint -> replacement
    mapped: HashMap<u32, Vec<u32>>,
    /// decoded groups followed by the synthetic ASCII and Emoji groups
    groups: Vec<Group>,
    emojis: Vec<EmojiSequence>,
    emoji_root: EmojiNode,
    wholes: Vec<Whole>,
    /// codepoint -> index of the last whole mentioning it
    whole_map: HashMap<u32, usize>,
    /// characters of all groups plus their decompositions
    possibly_valid: CodepointSet,
    unique_non_confusables: CodepointSet,
    /// number of decoded (non-synthetic) groups
    decoded_groups: usize,
    ascii: usize,
    emoji: usize,
    latin: Option<usize>,
    greek: Option<usize>,
}

impl Spec
{
    /// decodes a whole ENSIP-15 table; `nf` provides the decompositions of valid characters
    pub fn from_bytes(bytes: &[u8], nf: &CanonicalNormalizer) -> DecodeResult<Self>
    {
        let mut decoder = Decoder::new(bytes)?;
        let spec = Self::decode(&mut decoder, nf)?;

        decoder.assert_eof()?;

        info!(
            "loaded ENSIP-15 tables: {} groups, {} emoji, {} wholes, {} mapped, {} fenced",
            spec.decoded_groups,
            spec.emojis.len(),
            spec.wholes.len(),
            spec.mapped.len(),
            spec.fenced.len()
        );

        Ok(spec)
    }

    fn decode(decoder: &mut Decoder, nf: &CanonicalNormalizer) -> DecodeResult<Self>
    {
        let should_escape = CodepointSet::new(decoder.read_unique()?);
        let ignored = CodepointSet::new(decoder.read_unique()?);
        let combining_marks = CodepointSet::new(decoder.read_unique()?);
        let max_non_spacing_marks = decoder.read_unsigned()? as usize;
        let non_spacing_marks = CodepointSet::new(decoder.read_unique()?);
        let nfc_check = CodepointSet::new(decoder.read_unique()?);

        let fenced = decode_fenced(decoder)?;
        let mapped = decode_mapped(decoder)?;

        let mut groups = group::decode_groups(decoder)?;

        let emojis = emoji::decode_emojis(decoder)?;
        let emoji_root = EmojiNode::build(&emojis);

        let wholes = whole::decode_wholes(decoder, &groups)?;

        // union of all group characters, and those in more than one group
        let mut union: HashMap<u32, usize> = HashMap::new();

        for group in groups.iter() {
            for code in CodepointSet::from_iter(group.codes()).iter() {
                *union.entry(code).or_default() += 1;
            }
        }

        let mut whole_map = HashMap::new();

        for (index, whole) in wholes.iter().enumerate() {
            for code in whole.codes() {
                whole_map.insert(code, index);
            }
        }

        let unique_non_confusables: CodepointSet = union
            .iter()
            .filter(|&(code, &count)| count == 1 && !whole_map.contains_key(code))
            .map(|(&code, _)| code)
            .collect();

        let union: Vec<u32> = union.into_keys().collect();
        let decomposed = nf.nfd(&union);
        let possibly_valid: CodepointSet = union.into_iter().chain(decomposed).collect();

        debug!(
            "derived sets: {} possibly valid, {} unique non-confusables",
            possibly_valid.len(),
            unique_non_confusables.len()
        );

        let decoded_groups = groups.len();
        let find = |name: &str| groups.iter().position(|g| g.name == name);
        let latin = find(LATIN);
        let greek = find(GREEK);

        let ascii = groups.len();
        groups.push(Group::synthetic(
            ascii,
            "ASCII",
            possibly_valid.filter(|code| code < ASCII_END),
        ));

        let emoji = groups.len();
        groups.push(Group::synthetic(emoji, "Emoji", CodepointSet::default()));

        Ok(Self {
            should_escape,
            ignored,
            combining_marks,
            max_non_spacing_marks,
            non_spacing_marks,
            nfc_check,
            fenced,
            mapped,
            groups,
            emojis,
            emoji_root,
            wholes,
            whole_map,
            possibly_valid,
            unique_non_confusables,
            decoded_groups,
            ascii,
            emoji,
            latin,
            greek,
        })
    }

    pub fn should_escape(&self) -> &CodepointSet
    {
        &self.should_escape
    }

    pub fn ignored(&self) -> &CodepointSet
    {
        &self.ignored
    }

    pub fn combining_marks(&self) -> &CodepointSet
    {
        &self.combining_marks
    }

    pub fn max_non_spacing_marks(&self) -> usize
    {
        self.max_non_spacing_marks
    }

    pub fn non_spacing_marks(&self) -> &CodepointSet
    {
        &self.non_spacing_marks
    }

    pub fn nfc_check(&self) -> &CodepointSet
    {
        &self.nfc_check
    }

    /// display name of a fenced codepoint
    pub fn fenced(&self, code: u32) -> Option<&str>
    {
        self.fenced.get(&code).map(String::as_str)
    }

    pub fn mapped(&self, code: u32) -> Option<&[u32]>
    {
        self.mapped.get(&code).map(Vec::as_slice)
    }

    /// decoded groups followed by the synthetic ASCII and Emoji groups
    pub fn groups(&self) -> &[Group]
    {
        &self.groups
    }

    pub fn emojis(&self) -> &[EmojiSequence]
    {
        &self.emojis
    }

    /// trie over `emojis`, leaves hold indices into it
    pub fn emoji_root(&self) -> &EmojiNode
    {
        &self.emoji_root
    }

    pub fn wholes(&self) -> &[Whole]
    {
        &self.wholes
    }

    pub fn possibly_valid(&self) -> &CodepointSet
    {
        &self.possibly_valid
    }

    pub fn unique_non_confusables(&self) -> &CodepointSet
    {
        &self.unique_non_confusables
    }

    /// the groups a label can be assigned to, without the synthetic ones
    pub fn script_groups(&self) -> &[Group]
    {
        &self.groups[.. self.decoded_groups]
    }

    pub fn ascii_group(&self) -> &Group
    {
        &self.groups[self.ascii]
    }

    pub fn emoji_group(&self) -> &Group
    {
        &self.groups[self.emoji]
    }

    pub fn latin_group(&self) -> Option<&Group>
    {
        self.latin.map(|i| &self.groups[i])
    }

    pub fn greek_group(&self) -> Option<&Group>
    {
        self.greek.map(|i| &self.groups[i])
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group>
    {
        self.groups.iter().find(|g| g.name == name)
    }

    /// decoded group holding the codepoint as a primary character
    pub fn primary_group_of(&self, code: u32) -> Option<&Group>
    {
        self.script_groups().iter().find(|g| g.primary.contains(code))
    }

    pub fn confusion(&self, code: u32) -> Confusion
    {
        if self.unique_non_confusables.contains(code) {
            return Confusion::Unique;
        }

        match self.whole_map.get(&code) {
            Some(&index) => Confusion::Whole(index),
            None => Confusion::Shared,
        }
    }
}

/// sorted keys, one display name per key
fn decode_fenced(decoder: &mut Decoder) -> DecodeResult<HashMap<u32, String>>
{
    let count = decoder.read_count()?;
    let keys = decoder.read_sorted_ascending(count)?;

    let mut fenced = HashMap::with_capacity(count);

    for key in keys {
        fenced.insert(key, decoder.read_string()?);
    }

    Ok(fenced)
}

/// blocks of keys sharing a replacement width; every column is delta-coded
fn decode_mapped(decoder: &mut Decoder) -> DecodeResult<HashMap<u32, Vec<u32>>>
{
    let mut mapped = HashMap::new();

    loop {
        let width = decoder.read_count()?;

        if width == 0 {
            break;
        }

        let keys = decoder.read_sorted_unique()?;
        let mut rows = vec![Vec::with_capacity(width); keys.len()];

        for _ in 0 .. width {
            let column = decoder.read_unsorted_deltas(keys.len())?;

            for (row, code) in rows.iter_mut().zip(column) {
                row.push(code);
            }
        }

        for (key, row) in keys.into_iter().zip(rows) {
            if mapped.insert(key, row).is_some() {
                return Err(DecodeError::InvalidTable(format!(
                    "U+{:04X} is mapped twice",
                    key
                )));
            }
        }
    }

    Ok(mapped)
}

impl core::fmt::Debug for Spec
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    {
        f.debug_struct("Spec")
            .field("groups", &self.decoded_groups)
            .field("emojis", &self.emojis.len())
            .field("wholes", &self.wholes.len())
            .field("mapped", &self.mapped.len())
            .field("possibly_valid", &self.possibly_valid.len())
            .finish()
    }
}
