use core::fmt;

use crate::bits::Decoder;
use crate::codepoint::CodepointSet;
use crate::error::DecodeResult;

/// flag bit: the script is not allowed in a label
const FLAG_RESTRICTED: u32 = 1;
/// flag bit: no limit on non-spacing marks
const FLAG_CM_WHITELISTED: u32 = 2;

/// a script (or script-like class) a label must be confined to
pub struct Group
{
    /// position in the table, synthetic groups come after the decoded ones
    pub index: usize,
    pub name: String,
    pub restricted: bool,
    pub cm_whitelisted: bool,
    /// characters of the script
    pub primary: CodepointSet,
    /// characters the script additionally tolerates (shared punctuation, marks)
    pub secondary: CodepointSet,
}

impl Group
{
    /// a group without flags
    pub fn synthetic(index: usize, name: &str, primary: CodepointSet) -> Self
    {
        Self {
            index,
            name: name.to_owned(),
            restricted: false,
            cm_whitelisted: false,
            primary,
            secondary: CodepointSet::default(),
        }
    }

    #[inline(always)]
    pub fn contains(&self, code: u32) -> bool
    {
        self.primary.contains(code) || self.secondary.contains(code)
    }

    /// all codepoints, primary first
    pub fn codes(&self) -> impl Iterator<Item = u32> + '_
    {
        self.primary.iter().chain(self.secondary.iter())
    }
}

impl PartialEq for Group
{
    fn eq(&self, other: &Self) -> bool
    {
        self.index == other.index && self.name == other.name
    }
}

impl fmt::Display for Group
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self.restricted {
            true => write!(f, "Restricted[{}]", self.name),
            false => f.write_str(&self.name),
        }
    }
}

impl fmt::Debug for Group
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Group")
            .field("index", &self.index)
            .field("name", &self.name)
            .field("restricted", &self.restricted)
            .field("cm_whitelisted", &self.cm_whitelisted)
            .field("primary", &self.primary.len())
            .field("secondary", &self.secondary.len())
            .finish()
    }
}

/// groups until an empty name
pub fn decode_groups(decoder: &mut Decoder) -> DecodeResult<Vec<Group>>
{
    let mut groups = vec![];

    loop {
        let name = decoder.read_string()?;

        if name.is_empty() {
            break;
        }

        let flags = decoder.read_unsigned()?;
        let primary = CodepointSet::new(decoder.read_unique()?);
        let secondary = CodepointSet::new(decoder.read_unique()?);

        groups.push(Group {
            index: groups.len(),
            name,
            restricted: flags & FLAG_RESTRICTED != 0,
            cm_whitelisted: flags & FLAG_CM_WHITELISTED != 0,
            primary,
            secondary,
        });
    }

    Ok(groups)
}
