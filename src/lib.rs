//! ENSIP-15 normalization of ENS names.
//!
//! the tables are embedded at build time (see `build.rs`); [`EnsNormalizer::from_bytes`]
//! accepts any other pair of tables.

#[macro_use]
extern crate lazy_static;

pub mod bits;
pub mod codepoint;
pub mod error;
pub mod nf;
pub mod render;
pub mod spec;
pub mod tokens;
pub mod validate;

mod normalizer;

pub use error::DecodeError;
pub use error::InputError;
pub use error::NormalizeError;
pub use error::ProcessError;
pub use error::Result;

pub use nf::CanonicalNormalizer;
pub use spec::Spec;

pub use normalizer::EnsNormalizer;
pub use normalizer::LabelInfo;
pub use normalizer::ValidLabel;
pub use normalizer::STOP;

pub use tokens::EmojiForm;
pub use tokens::NormalForm;

/// unicode normalization tables
pub const NF_DATA: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/nf.bin"));
/// ENSIP-15 tables
pub const SPEC_DATA: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/spec.bin"));

lazy_static! {
    static ref SHARED: core::result::Result<EnsNormalizer, DecodeError> =
        EnsNormalizer::from_bytes(NF_DATA, SPEC_DATA);
}

/// the normalizer over the embedded tables, decoded on first use.
///
/// panics if the embedded tables are missing or damaged: that is a broken build.
pub fn shared() -> &'static EnsNormalizer
{
    usable(&SHARED)
}

fn usable(tables: &core::result::Result<EnsNormalizer, DecodeError>) -> &EnsNormalizer
{
    match tables {
        Ok(normalizer) => normalizer,
        Err(error) => panic!("embedded ENSIP-15 tables are unusable: {}", error),
    }
}

/// [`EnsNormalizer::normalize`] with the embedded tables
pub fn normalize(name: &str) -> Result<String>
{
    shared().normalize(name)
}

/// [`EnsNormalizer::beautify`] with the embedded tables
pub fn beautify(name: &str) -> Result<String>
{
    shared().beautify(name)
}

/// [`EnsNormalizer::normalize_fragment`] with the embedded tables
pub fn normalize_fragment(fragment: &str, decompose: bool) -> Result<String>
{
    shared().normalize_fragment(fragment, decompose)
}
