//! Canonical decomposition of precomposed Vietnamese letters.
//!
//! A [`CharTriple`] is the canonical form of one letter: a base Latin letter
//! plus at most one tone mark and at most one modification. Decomposition
//! goes through Unicode NFD, except for "đ"/"Đ", which are dedicated
//! codepoints with no combining-mark decomposition and are special-cased to
//! base "d"/"D" with the stroke modification.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::mark::{LetterMod, ToneMark};

/// Combining codepoints encoding the five non-level tones.
const COMBINING_TONES: [(char, ToneMark); 5] = [
    ('\u{0300}', ToneMark::Grave),
    ('\u{0301}', ToneMark::Acute),
    ('\u{0309}', ToneMark::HookAbove),
    ('\u{0303}', ToneMark::Tilde),
    ('\u{0323}', ToneMark::Underdot),
];

/// Combining codepoints encoding the vowel-quality modifications. The stroke
/// of "đ" has no combining form and is handled by the đ short-circuit.
const COMBINING_MODS: [(char, LetterMod); 3] = [
    ('\u{0306}', LetterMod::Breve),
    ('\u{0302}', LetterMod::Circumflex),
    ('\u{031B}', LetterMod::Horn),
];

/// Bit layout of the packed form: base scalar in the low byte, tone rank in
/// bits 8..12, modification rank in bits 12..16.
pub const BASE_MASK: u16 = 0x00FF;
pub const TONE_MASK: u16 = 0x0F00;
pub const MOD_MASK: u16 = 0xF000;

const TONE_SHIFT: u16 = 8;
const MOD_SHIFT: u16 = 12;

/// Canonical form of one Vietnamese letter: case-preserving base letter, tone
/// mark, letter modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharTriple {
    pub base: char,
    pub tone: ToneMark,
    pub modification: LetterMod,
}

impl CharTriple {
    pub fn new(base: char, tone: ToneMark, modification: LetterMod) -> Self {
        Self {
            base,
            tone,
            modification,
        }
    }

    /// Pack the triple into a single integer: base scalar in the low byte,
    /// tone rank shifted by 8, modification rank shifted by 12.
    ///
    /// Over the fixed corpus (ASCII bases, tone rank < 6, modification rank
    /// < 5) the packing is collision-free, so sorting compose entries by this
    /// key gives the canonical, reproducible emission order. The same value
    /// is the wire form of a letter-in-progress for table consumers.
    pub fn pack(&self) -> u16 {
        self.base as u16 | self.tone.rank() << TONE_SHIFT | self.modification.rank() << MOD_SHIFT
    }

    /// Recover a triple from its packed form. Returns `None` when the tone or
    /// modification bits hold no valid rank.
    pub fn from_packed(packed: u16) -> Option<CharTriple> {
        let base = char::from_u32(u32::from(packed & BASE_MASK))?;
        let tone = ToneMark::from_rank((packed & TONE_MASK) >> TONE_SHIFT)?;
        let modification = LetterMod::from_rank((packed & MOD_MASK) >> MOD_SHIFT)?;
        Some(CharTriple::new(base, tone, modification))
    }
}

fn tone_of(mark: char) -> Option<ToneMark> {
    COMBINING_TONES
        .iter()
        .find(|(c, _)| *c == mark)
        .map(|&(_, tone)| tone)
}

fn mod_of(mark: char) -> Option<LetterMod> {
    COMBINING_MODS
        .iter()
        .find(|(c, _)| *c == mark)
        .map(|&(_, modification)| modification)
}

/// Decompose one precomposed Vietnamese letter into its canonical triple.
///
/// "đ"/"Đ" short-circuit to the stroke modification; everything else goes
/// through NFD, taking the first scalar as the base and classifying the
/// trailing combining marks. The scan runs to completion with the last mark
/// of each kind winning; combining marks outside both fixed sets are ignored.
///
/// Callers must only pass letters of the supported corpus; for anything
/// else the result is unspecified rather than an error.
pub fn decompose(letter: char) -> CharTriple {
    if matches!(letter, 'đ' | 'Đ') {
        let base = if letter == 'đ' { 'd' } else { 'D' };
        return CharTriple::new(base, ToneMark::Unmarked, LetterMod::Stroke);
    }

    let mut scalars = std::iter::once(letter).nfd();
    let base = scalars.next().unwrap_or(letter);
    let mut tone = ToneMark::Unmarked;
    let mut modification = LetterMod::None;

    for mark in scalars {
        if let Some(t) = tone_of(mark) {
            tone = t;
        } else if let Some(m) = mod_of(mark) {
            modification = m;
        }
    }

    CharTriple::new(base, tone, modification)
}

/// Decomposition variant used when building tables from the trusted corpus:
/// a letter carrying a second mark of the same kind is a domain violation and
/// fails generation instead of being resolved by last-match-wins.
pub(crate) fn decompose_strict(letter: char) -> Result<CharTriple> {
    if matches!(letter, 'đ' | 'Đ') {
        return Ok(decompose(letter));
    }

    let mut scalars = std::iter::once(letter).nfd();
    let base = scalars.next().unwrap_or(letter);
    let mut tone = None;
    let mut modification = None;

    for mark in scalars {
        if let Some(t) = tone_of(mark) {
            if tone.replace(t).is_some() {
                bail!("letter {letter:?} decomposes to more than one tone mark");
            }
        } else if let Some(m) = mod_of(mark) {
            if modification.replace(m).is_some() {
                bail!("letter {letter:?} decomposes to more than one modification");
            }
        }
    }

    Ok(CharTriple::new(
        base,
        tone.unwrap_or(ToneMark::Unmarked),
        modification.unwrap_or(LetterMod::None),
    ))
}
