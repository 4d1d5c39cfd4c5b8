//! The compose table: every precomposed Vietnamese letter keyed by its
//! canonical triple.
//!
//! The table is rebuilt from the fixed corpus on demand and validated before
//! use: a duplicate triple or a stroke outside "đ"/"Đ" would corrupt every
//! consumer downstream, so construction halts with a descriptive error
//! instead of degrading.

use std::collections::HashMap;

use anyhow::{bail, ensure, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mark::{LetterMod, ToneMark};
use crate::triple::{decompose_strict, CharTriple};

/// The fixed corpus: every precomposed letter of Vietnamese orthography,
/// uppercase then lowercase. The unadorned vowels are part of the corpus so
/// the table also answers identity lookups; "Đ"/"đ" are the only consonant
/// entries.
pub const VIETNAMESE_LETTERS: &str = concat!(
    "AÀÁẢÃẠĂẰẮẲẴẶÂẦẤẨẪẬĐEÈÉẺẼẸÊỀẾỂỄỆIÌÍỈĨỊ",
    "OÒÓỎÕỌÔỒỐỔỖỘƠỜỚỞỠỢUÙÚỦŨỤƯỪỨỬỮỰYỲÝỶỸỴ",
    "aàáảãạăằắẳẵặâầấẩẫậđeèéẻẽẹêềếểễệiìíỉĩị",
    "oòóỏõọôồốổỗộơờớởỡợuùúủũụưừứửữựyỳýỷỹỵ",
);

/// One row of the compose table: a canonical triple and the precomposed
/// letter it composes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeEntry {
    pub triple: CharTriple,
    pub letter: char,
}

/// Decompose the full corpus into the ordered compose record stream.
///
/// Entries come back sorted by [`CharTriple::pack`], so repeated runs yield
/// identical streams. Construction fails, rather than silently overwriting,
/// when two letters share a triple, when a letter carries two marks of the
/// same kind, when a base scalar is not a Latin letter, or when the stroke
/// modification shows up anywhere but "đ"/"Đ".
pub fn compose_entries() -> Result<Vec<ComposeEntry>> {
    let mut entries = Vec::new();
    let mut by_triple: HashMap<CharTriple, char> = HashMap::new();

    for letter in VIETNAMESE_LETTERS.chars() {
        let triple = decompose_strict(letter)
            .with_context(|| format!("decomposing corpus letter {letter:?}"))?;

        ensure!(
            triple.base.is_ascii_alphabetic(),
            "corpus letter {:?} decomposes to non-Latin base {:?}",
            letter,
            triple.base
        );
        if triple.modification == LetterMod::Stroke {
            ensure!(
                matches!(triple.base, 'd' | 'D') && triple.tone == ToneMark::Unmarked,
                "stroke modification outside đ/Đ on corpus letter {:?}",
                letter
            );
        }
        if let Some(previous) = by_triple.insert(triple, letter) {
            bail!("letters {previous:?} and {letter:?} decompose to the same triple {triple:?}");
        }

        entries.push(ComposeEntry { triple, letter });
    }

    entries.sort_by_key(|entry| entry.triple.pack());
    debug!(entries = entries.len(), "built compose table");
    Ok(entries)
}

static COMPOSE_TABLE: Lazy<HashMap<CharTriple, char>> = Lazy::new(|| {
    compose_entries()
        .expect("fixed corpus must build a valid compose table")
        .into_iter()
        .map(|entry| (entry.triple, entry.letter))
        .collect()
});

/// Look up the precomposed letter for a canonical triple. `None` means the
/// triple names no letter of the orthography (e.g. a circumflex on "i").
pub fn compose(triple: &CharTriple) -> Option<char> {
    COMPOSE_TABLE.get(triple).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triple::decompose;

    #[test]
    fn corpus_covers_both_cases() {
        assert_eq!(VIETNAMESE_LETTERS.chars().count(), 146);
        let upper = VIETNAMESE_LETTERS
            .chars()
            .filter(|c| c.is_uppercase())
            .count();
        assert_eq!(upper, 73);
    }

    #[test]
    fn table_builds_and_is_complete() {
        let entries = compose_entries().unwrap();
        assert_eq!(entries.len(), 146);
    }

    #[test]
    fn emission_order_is_mark_major() {
        let entries = compose_entries().unwrap();
        // keys strictly increase, ...
        for pair in entries.windows(2) {
            assert!(pair[0].triple.pack() < pair[1].triple.pack());
        }
        // ... unmarked plain letters lead and the stroked pair trails
        assert_eq!(entries[0].letter, 'A');
        assert_eq!(entries[1].letter, 'E');
        assert_eq!(entries[entries.len() - 2].letter, 'Đ');
        assert_eq!(entries[entries.len() - 1].letter, 'đ');
    }

    #[test]
    fn compose_inverts_decompose() {
        assert_eq!(compose(&decompose('ế')), Some('ế'));
        assert_eq!(compose(&decompose('Đ')), Some('Đ'));
        assert_eq!(
            compose(&CharTriple::new(
                'i',
                ToneMark::Unmarked,
                LetterMod::Circumflex
            )),
            None
        );
    }
}
