//! Static hall layout: letters A through N, each split into a top and a bottom
//! section separated by a hallway.

use shared::domain::{HalfPosition, Section, SectionId, Slot, SlotId};

pub const FIRST_LETTER: char = 'A';
pub const LAST_LETTER: char = 'N';

/// Sections against the hall walls have a single column of slots.
pub const WALL_LETTERS: [char; 2] = [FIRST_LETTER, LAST_LETTER];

/// Builds every section in generation order: `A-Top`, `A-Bottom`, `B-Top`, ...
pub fn generate_sections() -> Vec<Section> {
    (FIRST_LETTER..=LAST_LETTER)
        .flat_map(|letter| {
            [HalfPosition::Top, HalfPosition::Bottom]
                .into_iter()
                .map(move |half| build_section(letter, half))
        })
        .collect()
}

fn build_section(letter: char, half: HalfPosition) -> Section {
    let is_wall_section = WALL_LETTERS.contains(&letter);
    let slots_per_row = if is_wall_section { 1 } else { 2 };
    let id = format!("{letter}-{}", half.label());

    let slots = (1..=half.rows() * slots_per_row)
        .map(|index| Slot {
            id: SlotId::new(format!("{id}-{index}")),
            position: index as u32,
            company_id: None,
        })
        .collect();

    Section {
        name: format!("Section {letter} ({})", half.label()),
        id: SectionId::new(id),
        slots,
        is_wall_section,
        position: half,
    }
}

/// A letter column as it is drawn: top section, hallway, bottom section.
#[derive(Debug, Clone, Copy)]
pub struct SectionColumn<'a> {
    pub letter: &'a str,
    pub top: Option<&'a Section>,
    pub bottom: Option<&'a Section>,
}

/// Groups sections by letter, keeping the order in which letters first appear.
pub fn group_sections_by_letter(sections: &[Section]) -> Vec<SectionColumn<'_>> {
    let mut columns: Vec<SectionColumn<'_>> = Vec::new();

    for section in sections {
        let letter = section.letter();
        let index = match columns.iter().position(|column| column.letter == letter) {
            Some(index) => index,
            None => {
                columns.push(SectionColumn {
                    letter,
                    top: None,
                    bottom: None,
                });
                columns.len() - 1
            }
        };

        let column = &mut columns[index];
        match section.position {
            HalfPosition::Top => column.top = Some(section),
            HalfPosition::Bottom => column.bottom = Some(section),
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_two_sections_per_letter() {
        let sections = generate_sections();
        assert_eq!(sections.len(), 28);
        assert_eq!(sections[0].id.as_str(), "A-Top");
        assert_eq!(sections[1].id.as_str(), "A-Bottom");
        assert_eq!(sections[27].id.as_str(), "N-Bottom");
        assert_eq!(sections[2].name, "Section B (Top)");
    }

    #[test]
    fn wall_sections_have_one_slot_per_row() {
        for section in generate_sections() {
            let expected_columns = if matches!(section.letter(), "A" | "N") {
                1
            } else {
                2
            };
            assert_eq!(section.is_wall_section, expected_columns == 1, "{}", section.id);
            assert_eq!(section.columns(), expected_columns);

            let expected_rows = match section.position {
                HalfPosition::Top => 7,
                HalfPosition::Bottom => 8,
            };
            assert_eq!(section.slots.len(), expected_rows * expected_columns);
        }
    }

    #[test]
    fn slot_ids_encode_section_and_position() {
        let sections = generate_sections();
        let b_bottom = sections
            .iter()
            .find(|section| section.id.as_str() == "B-Bottom")
            .expect("B-Bottom");
        assert_eq!(b_bottom.slots.len(), 16);
        for (index, slot) in b_bottom.slots.iter().enumerate() {
            assert_eq!(slot.position as usize, index + 1);
            assert_eq!(slot.id.as_str(), format!("B-Bottom-{}", index + 1));
            assert!(slot.is_empty());
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate_sections(), generate_sections());
    }

    #[test]
    fn groups_pair_top_and_bottom_in_letter_order() {
        let sections = generate_sections();
        let columns = group_sections_by_letter(&sections);
        assert_eq!(columns.len(), 14);
        assert_eq!(columns[0].letter, "A");
        assert_eq!(columns[13].letter, "N");
        for column in &columns {
            let top = column.top.expect("top");
            let bottom = column.bottom.expect("bottom");
            assert_eq!(top.position, HalfPosition::Top);
            assert_eq!(bottom.position, HalfPosition::Bottom);
            assert_eq!(top.letter(), column.letter);
        }
    }
}
