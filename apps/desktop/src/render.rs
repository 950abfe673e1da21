//! Plain-text drawing of the floor plan and the unassigned pool.

use std::fmt::Write as _;

use floor_core::{layout::group_sections_by_letter, AssignmentStore};
use shared::domain::Section;

pub fn render_board(store: &AssignmentStore) -> String {
    let mut out = String::new();
    for column in group_sections_by_letter(store.sections()) {
        if let Some(top) = column.top {
            render_section(&mut out, store, top);
        }
        out.push_str("  ~~ hallway ~~\n");
        if let Some(bottom) = column.bottom {
            render_section(&mut out, store, bottom);
        }
        out.push('\n');
    }
    out
}

fn render_section(out: &mut String, store: &AssignmentStore, section: &Section) {
    let _ = writeln!(
        out,
        "{}{}",
        section.name,
        if section.is_wall_section { " [wall]" } else { "" }
    );
    for row in section.slots.chunks(section.columns()) {
        out.push_str("  ");
        for slot in row {
            let cell = match slot.company_id.as_ref().and_then(|id| store.company(id)) {
                Some(company) => format!("[{:^3}]", company.symbol),
                None => format!(" {:>3} ", slot.position),
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }
}

pub fn render_pool(store: &AssignmentStore) -> String {
    let pool = store.unassigned_companies();
    let mut out = format!("Unassigned companies ({})\n", pool.len());
    for company in pool {
        let _ = writeln!(out, "  {}  {:<12} {}", company.symbol, company.name, company.id);
    }
    out
}
