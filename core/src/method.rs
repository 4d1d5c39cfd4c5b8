//! Keying-method specifications and their expansion into flat rule tables.
//!
//! A [`MethodSpec`] is the compact, hand-authored description of one keying
//! method (Telex, VNI): each trigger key maps either to one mark outright or
//! to a mark chosen by the base letter in progress. [`expand`] flattens that
//! into unambiguous [`Rule`]s, grouped per trigger, preserving declaration
//! order on both levels. Downstream emitters render each group as one
//! registration unit, so the sequence here is the emitted sequence.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mark::{LetterMod, MarkOutcome, ToneMark};

/// What a trigger key does: apply one mark regardless of the letter in
/// progress, or pick a mark by the base letter in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum KeyBinding {
    Unconditional(MarkOutcome),
    Conditioned(Vec<(char, MarkOutcome)>),
}

/// Compact description of one keying method. Key order is declaration order
/// and is preserved through expansion.
///
/// Specifications are fixed, authored tables; the expander does not detect
/// conflicting declarations, and a trigger+condition pair declared twice is
/// undefined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSpec {
    pub name: &'static str,
    pub keys: Vec<(char, KeyBinding)>,
}

/// One expanded rule: this trigger, under this base-letter condition (if
/// any), produces this outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub trigger: char,
    pub condition: Option<char>,
    pub outcome: MarkOutcome,
}

/// All rules of one trigger, contiguous, in declared condition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    pub trigger: char,
    pub rules: Vec<Rule>,
}

/// Flatten a method specification into its ordered rule groups.
///
/// A faithful, order-preserving flattening: no validation, no conflict
/// resolution, and `Reset` is an outcome like any other.
pub fn expand(spec: &MethodSpec) -> Vec<RuleGroup> {
    let groups: Vec<RuleGroup> = spec
        .keys
        .iter()
        .map(|(trigger, binding)| {
            let rules = match binding {
                KeyBinding::Unconditional(outcome) => vec![Rule {
                    trigger: *trigger,
                    condition: None,
                    outcome: *outcome,
                }],
                KeyBinding::Conditioned(arms) => arms
                    .iter()
                    .map(|(base, outcome)| Rule {
                        trigger: *trigger,
                        condition: Some(*base),
                        outcome: *outcome,
                    })
                    .collect(),
            };
            RuleGroup {
                trigger: *trigger,
                rules,
            }
        })
        .collect();
    debug!(method = spec.name, groups = groups.len(), "expanded rule table");
    groups
}

/// Telex: tones on f/s/r/x/j, doubled vowels for the circumflex, "dd" for
/// "đ", "w" for breve/horn, "z" clears.
pub static TELEX: Lazy<MethodSpec> = Lazy::new(|| MethodSpec {
    name: "telex",
    keys: vec![
        ('f', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Grave))),
        ('s', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Acute))),
        (
            'r',
            KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::HookAbove)),
        ),
        ('x', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Tilde))),
        (
            'j',
            KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Underdot)),
        ),
        (
            'a',
            KeyBinding::Conditioned(vec![('a', MarkOutcome::Mod(LetterMod::Circumflex))]),
        ),
        (
            'd',
            KeyBinding::Conditioned(vec![('d', MarkOutcome::Mod(LetterMod::Stroke))]),
        ),
        (
            'e',
            KeyBinding::Conditioned(vec![('e', MarkOutcome::Mod(LetterMod::Circumflex))]),
        ),
        (
            'o',
            KeyBinding::Conditioned(vec![('o', MarkOutcome::Mod(LetterMod::Circumflex))]),
        ),
        (
            'w',
            KeyBinding::Conditioned(vec![
                ('a', MarkOutcome::Mod(LetterMod::Breve)),
                ('o', MarkOutcome::Mod(LetterMod::Horn)),
                ('u', MarkOutcome::Mod(LetterMod::Horn)),
            ]),
        ),
        ('z', KeyBinding::Unconditional(MarkOutcome::Reset)),
    ],
});

/// VNI: digits 1-5 for tones, 6-9 for modifications, 0 clears.
pub static VNI: Lazy<MethodSpec> = Lazy::new(|| MethodSpec {
    name: "vni",
    keys: vec![
        ('1', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Acute))),
        ('2', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Grave))),
        (
            '3',
            KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::HookAbove)),
        ),
        ('4', KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Tilde))),
        (
            '5',
            KeyBinding::Unconditional(MarkOutcome::Tone(ToneMark::Underdot)),
        ),
        (
            '6',
            KeyBinding::Unconditional(MarkOutcome::Mod(LetterMod::Circumflex)),
        ),
        (
            '7',
            KeyBinding::Unconditional(MarkOutcome::Mod(LetterMod::Horn)),
        ),
        (
            '8',
            KeyBinding::Unconditional(MarkOutcome::Mod(LetterMod::Breve)),
        ),
        (
            '9',
            KeyBinding::Unconditional(MarkOutcome::Mod(LetterMod::Stroke)),
        ),
        ('0', KeyBinding::Unconditional(MarkOutcome::Reset)),
    ],
});

/// All built-in methods, in a stable order.
pub fn builtin_methods() -> Vec<&'static MethodSpec> {
    vec![&*TELEX, &*VNI]
}

/// Look a built-in method up by its name (case-insensitive).
pub fn by_name(name: &str) -> Option<&'static MethodSpec> {
    builtin_methods()
        .into_iter()
        .find(|spec| spec.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconditional_trigger_expands_to_one_rule() {
        let groups = expand(&TELEX);
        let s = groups.iter().find(|g| g.trigger == 's').unwrap();
        assert_eq!(
            s.rules,
            vec![Rule {
                trigger: 's',
                condition: None,
                outcome: MarkOutcome::Tone(ToneMark::Acute),
            }]
        );
    }

    #[test]
    fn conditioned_trigger_expands_in_declared_order() {
        let groups = expand(&TELEX);
        let w = groups.iter().find(|g| g.trigger == 'w').unwrap();
        let arms: Vec<(Option<char>, MarkOutcome)> = w
            .rules
            .iter()
            .map(|rule| (rule.condition, rule.outcome))
            .collect();
        assert_eq!(
            arms,
            vec![
                (Some('a'), MarkOutcome::Mod(LetterMod::Breve)),
                (Some('o'), MarkOutcome::Mod(LetterMod::Horn)),
                (Some('u'), MarkOutcome::Mod(LetterMod::Horn)),
            ]
        );
    }

    #[test]
    fn reset_survives_expansion_as_reset() {
        let groups = expand(&TELEX);
        let z = groups.iter().find(|g| g.trigger == 'z').unwrap();
        assert_eq!(z.rules.len(), 1);
        assert_eq!(z.rules[0].outcome, MarkOutcome::Reset);
        assert_ne!(
            z.rules[0].outcome,
            MarkOutcome::Tone(ToneMark::Unmarked),
            "reset must stay distinguishable from the absence values"
        );
    }

    #[test]
    fn groups_follow_declaration_order() {
        let groups = expand(&TELEX);
        let triggers: Vec<char> = groups.iter().map(|g| g.trigger).collect();
        assert_eq!(
            triggers,
            vec!['f', 's', 'r', 'x', 'j', 'a', 'd', 'e', 'o', 'w', 'z']
        );

        let groups = expand(&VNI);
        let triggers: Vec<char> = groups.iter().map(|g| g.trigger).collect();
        assert_eq!(
            triggers,
            vec!['1', '2', '3', '4', '5', '6', '7', '8', '9', '0']
        );
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        assert_eq!(by_name("telex").unwrap().name, "telex");
        assert_eq!(by_name("VNI").unwrap().name, "vni");
        assert!(by_name("wubi").is_none());
    }
}
