//! Mark taxonomy for Vietnamese diacritics.
//!
//! Two closed tag sets describe everything a precomposed letter can carry: a
//! tone mark (one of the six tones, counting the unmarked level tone) and a
//! letter modification (breve, circumflex, horn, or the stroke that turns "d"
//! into "đ"). The "reset" pseudo-mark used by keying methods is deliberately
//! not a member of either set; it lives in [`MarkOutcome`], the rule-outcome
//! type, so a composed letter can never carry it.

use serde::{Deserialize, Serialize};

/// Tone mark of a Vietnamese letter. `Unmarked` is the level tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToneMark {
    Unmarked,
    Grave,
    Acute,
    HookAbove,
    Tilde,
    Underdot,
}

impl ToneMark {
    /// Canonical rank, used for ordering and bit-packing. `Unmarked` is 0,
    /// the remaining tones follow in declaration order.
    pub fn rank(self) -> u16 {
        self as u16
    }

    /// Inverse of [`ToneMark::rank`].
    pub fn from_rank(rank: u16) -> Option<ToneMark> {
        match rank {
            0 => Some(ToneMark::Unmarked),
            1 => Some(ToneMark::Grave),
            2 => Some(ToneMark::Acute),
            3 => Some(ToneMark::HookAbove),
            4 => Some(ToneMark::Tilde),
            5 => Some(ToneMark::Underdot),
            _ => None,
        }
    }

    /// Symbolic constant name, used by emitters when rendering generated
    /// sources.
    pub fn const_name(self) -> &'static str {
        match self {
            ToneMark::Unmarked => "TONE_UNMARKED",
            ToneMark::Grave => "TONE_GRAVE",
            ToneMark::Acute => "TONE_ACUTE",
            ToneMark::HookAbove => "TONE_HOOK_ABOVE",
            ToneMark::Tilde => "TONE_TILDE",
            ToneMark::Underdot => "TONE_UNDERDOT",
        }
    }
}

/// Letter modification of a Vietnamese letter. `None` is the plain form;
/// `Stroke` only ever occurs on "d"/"D".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterMod {
    None,
    Breve,
    Circumflex,
    Horn,
    Stroke,
}

impl LetterMod {
    /// Canonical rank, used for ordering and bit-packing. `None` is 0, the
    /// remaining modifications follow in declaration order.
    pub fn rank(self) -> u16 {
        self as u16
    }

    /// Inverse of [`LetterMod::rank`].
    pub fn from_rank(rank: u16) -> Option<LetterMod> {
        match rank {
            0 => Some(LetterMod::None),
            1 => Some(LetterMod::Breve),
            2 => Some(LetterMod::Circumflex),
            3 => Some(LetterMod::Horn),
            4 => Some(LetterMod::Stroke),
            _ => None,
        }
    }

    /// Symbolic constant name, used by emitters when rendering generated
    /// sources.
    pub fn const_name(self) -> &'static str {
        match self {
            LetterMod::None => "MOD_NONE",
            LetterMod::Breve => "MOD_BREVE",
            LetterMod::Circumflex => "MOD_CIRCUMFLEX",
            LetterMod::Horn => "MOD_HORN",
            LetterMod::Stroke => "MOD_STROKE",
        }
    }
}

/// Outcome of a keying-method rule: set a tone, set a modification, or clear
/// whatever tone and modification are present.
///
/// `Reset` is a sentinel meaningful only on the rule side; it never appears in
/// a decomposed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    Tone(ToneMark),
    Mod(LetterMod),
    Reset,
}

impl MarkOutcome {
    /// Symbolic constant name of the outcome's mark, `MARK_RESET` for the
    /// reset sentinel.
    pub fn const_name(self) -> &'static str {
        match self {
            MarkOutcome::Tone(tone) => tone.const_name(),
            MarkOutcome::Mod(modification) => modification.const_name(),
            MarkOutcome::Reset => "MARK_RESET",
        }
    }
}
