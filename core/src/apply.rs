//! Applying one keystroke's mark to a letter in progress.
//!
//! This is the pure table consultation a runtime engine performs per
//! keystroke. It carries no buffering and no session state: the caller owns
//! the letter being composed and hands it in by mutable reference.

use crate::mark::{LetterMod, MarkOutcome, ToneMark};
use crate::method::RuleGroup;
use crate::triple::CharTriple;

/// What applying a keystroke did to the letter in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A rule fired and set (or cleared, for reset) a mark.
    Applied,
    /// The rule's mark was already present; it was removed instead.
    Reverted,
    /// No rule fired; the letter is untouched.
    Unchanged,
}

/// Apply one keystroke to the letter in progress, against a method's
/// expanded rule groups.
///
/// Trigger and condition matching are case-insensitive; only the first group
/// matching the key is consulted, and within it only the first rule whose
/// condition fits the current base letter fires. Striking a diacritic key
/// twice reverts its mark, which is how every Telex-family method lets the
/// user type the bare trigger letter.
pub fn apply_keystroke(
    groups: &[RuleGroup],
    current: &mut CharTriple,
    key: char,
) -> ApplyOutcome {
    let Some(group) = groups
        .iter()
        .find(|group| group.trigger.eq_ignore_ascii_case(&key))
    else {
        return ApplyOutcome::Unchanged;
    };

    for rule in &group.rules {
        if let Some(condition) = rule.condition {
            if !condition.eq_ignore_ascii_case(&current.base) {
                continue;
            }
        }

        return match rule.outcome {
            MarkOutcome::Reset => {
                current.tone = ToneMark::Unmarked;
                current.modification = LetterMod::None;
                ApplyOutcome::Applied
            }
            MarkOutcome::Tone(tone) => {
                if current.tone == tone {
                    current.tone = ToneMark::Unmarked;
                    ApplyOutcome::Reverted
                } else {
                    current.tone = tone;
                    ApplyOutcome::Applied
                }
            }
            MarkOutcome::Mod(modification) => {
                if current.modification == modification {
                    current.modification = LetterMod::None;
                    ApplyOutcome::Reverted
                } else {
                    current.modification = modification;
                    ApplyOutcome::Applied
                }
            }
        };
    }

    ApplyOutcome::Unchanged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;
    use crate::method::{expand, TELEX, VNI};
    use crate::triple::decompose;

    #[test]
    fn telex_builds_a_marked_vowel() {
        let telex = expand(&TELEX);
        let mut letter = decompose('a');

        assert_eq!(apply_keystroke(&telex, &mut letter, 'w'), ApplyOutcome::Applied);
        assert_eq!(compose(&letter), Some('ă'));

        assert_eq!(apply_keystroke(&telex, &mut letter, 's'), ApplyOutcome::Applied);
        assert_eq!(compose(&letter), Some('ắ'));
    }

    #[test]
    fn double_strike_reverts_the_mark() {
        let telex = expand(&TELEX);
        let mut letter = decompose('a');

        apply_keystroke(&telex, &mut letter, 's');
        assert_eq!(compose(&letter), Some('á'));
        assert_eq!(
            apply_keystroke(&telex, &mut letter, 's'),
            ApplyOutcome::Reverted
        );
        assert_eq!(compose(&letter), Some('a'));
    }

    #[test]
    fn doubled_d_strokes_and_unstrokes() {
        let telex = expand(&TELEX);
        let mut letter = decompose('d');

        assert_eq!(apply_keystroke(&telex, &mut letter, 'd'), ApplyOutcome::Applied);
        assert_eq!(compose(&letter), Some('đ'));
        assert_eq!(
            apply_keystroke(&telex, &mut letter, 'd'),
            ApplyOutcome::Reverted
        );
        assert_eq!(compose(&letter), Some('d'));
    }

    #[test]
    fn reset_clears_tone_and_modification() {
        let telex = expand(&TELEX);
        let mut letter = decompose('ắ');

        assert_eq!(apply_keystroke(&telex, &mut letter, 'z'), ApplyOutcome::Applied);
        assert_eq!(compose(&letter), Some('a'));
    }

    #[test]
    fn condition_mismatch_leaves_letter_untouched() {
        let telex = expand(&TELEX);
        let mut letter = decompose('e');

        // "w" is declared for a/o/u bases only
        assert_eq!(
            apply_keystroke(&telex, &mut letter, 'w'),
            ApplyOutcome::Unchanged
        );
        assert_eq!(letter, decompose('e'));
    }

    #[test]
    fn matching_ignores_case() {
        let telex = expand(&TELEX);
        let mut letter = decompose('O');

        assert_eq!(apply_keystroke(&telex, &mut letter, 'W'), ApplyOutcome::Applied);
        assert_eq!(compose(&letter), Some('Ơ'));
    }

    #[test]
    fn vni_digits_apply_marks() {
        let vni = expand(&VNI);
        let mut letter = decompose('u');

        apply_keystroke(&vni, &mut letter, '7');
        apply_keystroke(&vni, &mut letter, '5');
        assert_eq!(compose(&letter), Some('ự'));

        apply_keystroke(&vni, &mut letter, '0');
        assert_eq!(compose(&letter), Some('u'));
    }
}
