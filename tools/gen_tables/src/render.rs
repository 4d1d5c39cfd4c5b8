// gen_tables/src/render.rs
//
// Textual rendering of the ordered record streams as C source fragments:
// column-aligned switch arms for the compose table, and one
// KEYSTROKE_DEFINE registration per trigger for each method. Rendering is a
// pure function of the streams, so repeated runs are byte-identical.

use libviet_core::{ComposeEntry, Rule, RuleGroup};

/// Render the compose stream as aligned `case` arms, one per entry, in
/// stream order. Column widths follow the widest symbol actually present.
pub fn render_compose_cases(entries: &[ComposeEntry], indent: &str) -> String {
    let tone_width = entries
        .iter()
        .map(|e| e.triple.tone.const_name().len())
        .max()
        .unwrap_or(0);
    let mod_width = entries
        .iter()
        .map(|e| e.triple.modification.const_name().len() + 1)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for entry in entries {
        let mod_label = format!("{}:", entry.triple.modification.const_name());
        out.push_str(&format!(
            "{indent}case '{base}' | {tone:<tone_width$} | {mod_label:<mod_width$} return \"{letter}\";\n",
            base = entry.triple.base,
            tone = entry.triple.tone.const_name(),
            letter = entry.letter,
        ));
    }
    out
}

fn conversion(rule: &Rule) -> String {
    match rule.condition {
        Some(base) => format!("'{}' | {}", base, rule.outcome.const_name()),
        None => rule.outcome.const_name().to_string(),
    }
}

/// Render one method's rule groups as a keystroke array. Each trigger gets a
/// single registration listing its conversions in expansion order;
/// continuation lines align under the first conversion.
pub fn render_method_array(name: &str, groups: &[RuleGroup], indent: &str) -> String {
    let mut out = format!("static struct Keystroke {}[] = {{\n", name.to_uppercase());
    for group in groups {
        let head = format!("{indent}KEYSTROKE_DEFINE('{}', ", group.trigger);
        let continuation = " ".repeat(head.len());
        out.push_str(&head);
        for (i, rule) in group.rules.iter().enumerate() {
            if i > 0 {
                out.push_str(",\n");
                out.push_str(&continuation);
            }
            out.push_str(&conversion(rule));
        }
        out.push_str("),\n");
    }
    out.push_str("};\n");
    out
}
