//! splitting one label into text and emoji tokens

use crate::error::ProcessError;
use crate::nf::CanonicalNormalizer;
use crate::render::quoted_code;
use crate::spec::{EmojiSequence, Spec};

/// normalization applied to text tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalForm
{
    Nfc,
    Nfd,
}

/// which form of a matched emoji is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiForm
{
    /// without presentation selectors, for comparison
    Normalized,
    /// as displayed
    Beautified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputToken<'a>
{
    /// a run of valid (possibly mapped) codepoints, already normalized
    Text(Vec<u32>),
    Emoji
    {
        sequence: &'a EmojiSequence,
        form: EmojiForm,
    },
}

impl<'a> OutputToken<'a>
{
    pub fn codes(&self) -> &[u32]
    {
        match self {
            OutputToken::Text(codes) => codes.as_slice(),
            OutputToken::Emoji { form, .. } => self.codes_in(*form),
        }
    }

    /// the codepoints with emoji rendered in the given form
    pub fn codes_in(&self, form: EmojiForm) -> &[u32]
    {
        match (self, form) {
            (OutputToken::Text(codes), _) => codes.as_slice(),
            (OutputToken::Emoji { sequence, .. }, EmojiForm::Normalized) => sequence.normalized(),
            (OutputToken::Emoji { sequence, .. }, EmojiForm::Beautified) => sequence.beautified(),
        }
    }

    #[inline(always)]
    pub fn is_emoji(&self) -> bool
    {
        matches!(self, OutputToken::Emoji { .. })
    }
}

/// all codepoints of the tokens, in order
pub fn flatten(tokens: &[OutputToken]) -> Vec<u32>
{
    tokens.iter().flat_map(|t| t.codes().iter().copied()).collect()
}

/// greedy tokenization: the longest emoji at every position, otherwise a valid, mapped or
/// ignored codepoint. adjacent text is coalesced and normalized as a whole
pub fn tokenize<'a>(
    spec: &'a Spec,
    nf: &CanonicalNormalizer,
    codes: &[u32],
    normal_form: NormalForm,
    emoji_form: EmojiForm,
) -> Result<Vec<OutputToken<'a>>, ProcessError>
{
    let mut tokens = vec![];
    let mut text: Vec<u32> = vec![];
    let mut i = 0;

    while i < codes.len() {
        if let Some((index, end)) = spec.emoji_root().find(codes, i) {
            if !text.is_empty() {
                tokens.push(text_token(spec, nf, std::mem::take(&mut text), normal_form));
            }

            tokens.push(OutputToken::Emoji {
                sequence: &spec.emojis()[index],
                form: emoji_form,
            });

            i = end;
            continue;
        }

        let code = codes[i];

        if spec.possibly_valid().contains(code) {
            text.push(code);
        } else if let Some(replacement) = spec.mapped(code) {
            text.extend_from_slice(replacement);
        } else if !spec.ignored().contains(code) {
            return Err(ProcessError::DisallowedCharacter(quoted_code(spec, code)));
        }

        i += 1;
    }

    if !text.is_empty() {
        tokens.push(text_token(spec, nf, text, normal_form));
    }

    Ok(tokens)
}

fn text_token<'a>(
    spec: &Spec,
    nf: &CanonicalNormalizer,
    text: Vec<u32>,
    normal_form: NormalForm,
) -> OutputToken<'a>
{
    let codes = match normal_form {
        NormalForm::Nfc => match spec.nfc_check().contains_any(&text) {
            true => nf.nfc(&text),
            false => text,
        },
        NormalForm::Nfd => nf.nfd(&text),
    };

    OutputToken::Text(codes)
}
