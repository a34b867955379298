//! Numbered action menu shown to a human combatant.

use std::io::{self, Write};

use runtime::ChoiceRequest;

use super::Narrator;

/// Writes the roster (optional), any rejection, and the numbered choices.
pub fn write_prompt<W: Write>(
    out: &mut W,
    narrator: &Narrator,
    request: &ChoiceRequest,
    show_status: bool,
) -> io::Result<()> {
    if show_status {
        for combatant in request.view.combatants() {
            let mut flags = Vec::new();
            if combatant.is_defeated() {
                flags.push("down".to_owned());
            }
            flags.extend(combatant.conditions().list().map(|c| c.to_string()));
            let marker = if combatant.id == request.actor { ">" } else { " " };
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            writeln!(
                out,
                " {} {:<12} {:>3}/{:<3} HP  AC {:>2}  {}{}",
                marker,
                combatant.name,
                combatant.hp(),
                combatant.max_hp(),
                combatant.armor_class(),
                combatant.side,
                flags
            )?;
        }
    }

    if let Some(reason) = &request.rejection {
        writeln!(out, "! {}", reason)?;
    }

    writeln!(out, "{}, choose an action:", narrator.name(request.actor))?;
    for (index, action) in request.legal.iter().enumerate() {
        writeln!(
            out,
            "  {}) {}",
            index + 1,
            narrator.describe_action(&request.view, action)
        )?;
    }
    write!(out, "> ")?;
    out.flush()
}
