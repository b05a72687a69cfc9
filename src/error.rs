//! error types: table decoding, label validation and the public pipeline error

use thiserror::Error;

/// failure to decode an embedded (or caller supplied) table.
///
/// these never describe user input: a `DecodeError` means the blob and the loader
/// disagree about the format, or the blob is damaged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError
{
    /// ran out of bytes in the middle of a read
    #[error("unexpected end of table data at byte {position}")]
    UnexpectedEof
    {
        position: usize
    },

    /// the loader finished but the buffer was not consumed exactly
    #[error("table data has {remaining} unread bytes")]
    TrailingBytes
    {
        remaining: usize
    },

    /// the header did not declare any integer width
    #[error("table data has an empty magic header")]
    EmptyMagic,

    /// a magic width outside of 1..=31 bits
    #[error("magic width {0} is not supported")]
    WidthOverflow(u32),

    /// a decoded integer is not a unicode scalar value
    #[error("decoded value {0:#X} is not a unicode scalar value")]
    InvalidCodepoint(i64),

    /// the value does not fit into the widths of the magic header (encoder only)
    #[error("value {0} does not fit into the magic header")]
    Overflow(u64),

    /// structurally valid bits describing an impossible table
    #[error("invalid table: {0}")]
    InvalidTable(String),
}

/// a single ENSIP-15 rule violation inside one label.
///
/// the payloads are already rendered with [`crate::render`] and safe to show to a user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessError
{
    #[error("invalid empty label")]
    EmptyLabel,

    #[error("underscore allowed only at start")]
    LeadingUnderscore,

    #[error("invalid label extension: \"{0}\"")]
    InvalidLabelExtension(String),

    #[error("invalid leading combining mark: {0}")]
    CmLeading(String),

    #[error("emoji + combining mark: {0}")]
    CmAfterEmoji(String),

    #[error("invalid leading fenced: {0}")]
    FencedLeading(String),

    #[error("invalid adjacent fenced: {0}")]
    FencedAdjacent(String),

    #[error("invalid trailing fenced: {0}")]
    FencedTrailing(String),

    #[error("disallowed character: {0}")]
    DisallowedCharacter(String),

    #[error("illegal mixture: {0}")]
    IllegalMixture(String),

    #[error("whole-script confusable: {0}")]
    WholeConfusable(String),

    #[error("duplicate non-spacing marks: {0}")]
    NsmDuplicate(String),

    #[error("excessive non-spacing marks: {0}")]
    NsmExcessive(String),
}

/// the error of the public pipeline: the first invalid label of a name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid label \"{label}\"\u{200E}: {error}")]
pub struct NormalizeError
{
    /// safe rendering of the label as it was given
    pub label: String,
    /// the rule the label violates
    #[source]
    pub error: ProcessError,
}

/// byte-oriented entry points can also fail before any label is looked at
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError
{
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

pub type Result<T> = std::result::Result<T, NormalizeError>;
