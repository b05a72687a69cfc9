//! the public pipeline: names are split into labels, every label is tokenized,
//! validated and reassembled

use log::trace;

use crate::codepoint::{codes_from_str, push_codes, str_from_codes};
use crate::error::{DecodeResult, InputError, NormalizeError, ProcessError, Result};
use crate::nf::CanonicalNormalizer;
use crate::render::safe_str;
use crate::spec::{Group, Spec};
use crate::tokens::{flatten, tokenize, EmojiForm, NormalForm, OutputToken};
use crate::validate::check_valid_label;

/// label separator
pub const STOP: char = '.';

const SMALL_XI: u32 = 0x3BE;
const CAPITAL_XI: u32 = 0x39E;

/// an ENSIP-15 normalizer over a pair of decoded tables
#[derive(Debug)]
pub struct EnsNormalizer
{
    nf: CanonicalNormalizer,
    spec: Spec,
}

/// a successfully processed label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLabel
{
    /// normalized label
    pub output: String,
    /// name of the group the label belongs to
    pub group: String,
    /// the label contains at least one emoji
    pub emoji: bool,
}

/// diagnostics of one label of a name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelInfo
{
    /// the label as given
    pub input: String,
    pub result: std::result::Result<ValidLabel, ProcessError>,
}

/// a label that passed validation
struct Processed<'s>
{
    tokens: Vec<OutputToken<'s>>,
    group: &'s Group,
}

impl EnsNormalizer
{
    /// decodes both tables, the NF table first: the ENSIP-15 table depends on it
    pub fn from_bytes(nf: &[u8], spec: &[u8]) -> DecodeResult<Self>
    {
        let nf = CanonicalNormalizer::from_bytes(nf)?;
        let spec = Spec::from_bytes(spec, &nf)?;

        Ok(Self::new(nf, spec))
    }

    /// `spec` must have been decoded against `nf`
    fn new(nf: CanonicalNormalizer, spec: Spec) -> Self
    {
        Self { nf, spec }
    }

    pub fn spec(&self) -> &Spec
    {
        &self.spec
    }

    pub fn nf(&self) -> &CanonicalNormalizer
    {
        &self.nf
    }

    /// canonical form of a name, for storage and comparison
    pub fn normalize(&self, name: &str) -> Result<String>
    {
        self.transform(name, EmojiForm::Normalized)
    }

    /// like `normalize`, but emoji keep their presentation selectors and a lowercase xi
    /// outside of Greek labels is capitalized
    pub fn beautify(&self, name: &str) -> Result<String>
    {
        self.transform(name, EmojiForm::Beautified)
    }

    /// tokenization and NFC (or NFD) only, without validation. for display of partial input
    pub fn normalize_fragment(&self, fragment: &str, decompose: bool) -> Result<String>
    {
        let normal_form = match decompose {
            true => NormalForm::Nfd,
            false => NormalForm::Nfc,
        };

        let mut result = String::with_capacity(fragment.len());

        for (i, label) in fragment.split(STOP).enumerate() {
            let codes = codes_from_str(label);
            let tokens = tokenize(
                &self.spec,
                &self.nf,
                &codes,
                normal_form,
                EmojiForm::Normalized,
            )
            .map_err(|error| self.label_error(&codes, error))?;

            if i != 0 {
                result.push(STOP);
            }

            push_codes(&mut result, &flatten(&tokens));
        }

        Ok(result)
    }

    /// `normalize` for bytes that are not known to be UTF-8
    pub fn normalize_bytes(&self, name: &[u8]) -> std::result::Result<String, InputError>
    {
        Ok(self.normalize(std::str::from_utf8(name)?)?)
    }

    pub fn beautify_bytes(&self, name: &[u8]) -> std::result::Result<String, InputError>
    {
        Ok(self.beautify(std::str::from_utf8(name)?)?)
    }

    /// every label of the name with its outcome, processing does not stop at an invalid label
    pub fn split(&self, name: &str) -> Vec<LabelInfo>
    {
        if name.is_empty() {
            return vec![];
        }

        name.split(STOP)
            .map(|label| {
                let codes = codes_from_str(label);

                let result = self.process(&codes).map(|processed| ValidLabel {
                    output: str_from_codes(&flatten(&processed.tokens)),
                    group: processed.group.name.clone(),
                    emoji: processed.tokens.iter().any(OutputToken::is_emoji),
                });

                LabelInfo {
                    input: label.to_owned(),
                    result,
                }
            })
            .collect()
    }

    /// the pipeline shared by `normalize` and `beautify`; fails on the first invalid label
    fn transform(&self, name: &str, emoji_form: EmojiForm) -> Result<String>
    {
        if name.is_empty() {
            return Ok(String::new());
        }

        let mut result = String::with_capacity(name.len());

        for (i, label) in name.split(STOP).enumerate() {
            let codes = codes_from_str(label);

            let processed = self
                .process(&codes)
                .map_err(|error| self.label_error(&codes, error))?;

            let mut output: Vec<u32> = processed
                .tokens
                .iter()
                .flat_map(|token| token.codes_in(emoji_form).iter().copied())
                .collect();

            if emoji_form == EmojiForm::Beautified && !self.is_greek(processed.group) {
                output
                    .iter_mut()
                    .filter(|code| **code == SMALL_XI)
                    .for_each(|code| *code = CAPITAL_XI);
            }

            if i != 0 {
                result.push(STOP);
            }

            push_codes(&mut result, &output);
        }

        Ok(result)
    }

    /// tokenizes with normalized emoji, then validates the result
    fn process(&self, codes: &[u32]) -> std::result::Result<Processed<'_>, ProcessError>
    {
        let tokens = tokenize(
            &self.spec,
            &self.nf,
            codes,
            NormalForm::Nfc,
            EmojiForm::Normalized,
        )?;

        let normalized = flatten(&tokens);
        let group = check_valid_label(&self.spec, &self.nf, &normalized, &tokens)?;

        Ok(Processed { tokens, group })
    }

    fn is_greek(&self, group: &Group) -> bool
    {
        self.spec.greek_group().map(|greek| greek.index) == Some(group.index)
    }

    fn label_error(&self, codes: &[u32], error: ProcessError) -> NormalizeError
    {
        let label = safe_str(&self.spec, codes);

        trace!("label \"{}\" rejected: {}", label, error);

        NormalizeError { label, error }
    }
}
