use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(CompanyId);
id_newtype!(SlotId);
id_newtype!(SectionId);

/// Which half of a letter column a section occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfPosition {
    Top,
    Bottom,
}

impl HalfPosition {
    pub fn label(self) -> &'static str {
        match self {
            HalfPosition::Top => "Top",
            HalfPosition::Bottom => "Bottom",
        }
    }

    pub fn rows(self) -> usize {
        match self {
            HalfPosition::Top => 7,
            HalfPosition::Bottom => 8,
        }
    }
}

/// Where a dragged company tile came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSource {
    Unassigned,
    Slot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub position: u32,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.company_id.is_none()
    }

    pub fn holds(&self, company_id: &CompanyId) -> bool {
        self.company_id.as_ref() == Some(company_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub slots: Vec<Slot>,
    pub is_wall_section: bool,
    pub position: HalfPosition,
}

impl Section {
    /// The section letter, i.e. the part of the id before the first `-`.
    pub fn letter(&self) -> &str {
        self.id
            .as_str()
            .split('-')
            .next()
            .unwrap_or_default()
    }

    pub fn rows(&self) -> usize {
        self.position.rows()
    }

    pub fn columns(&self) -> usize {
        if self.is_wall_section {
            1
        } else {
            2
        }
    }

    /// Tooltip-style label for one of this section's slots.
    pub fn slot_label(&self, slot: &Slot) -> String {
        format!("Section {}, Slot {}", self.letter(), slot.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, is_wall_section: bool, position: HalfPosition) -> Section {
        Section {
            id: SectionId::from(id),
            name: String::new(),
            slots: Vec::new(),
            is_wall_section,
            position,
        }
    }

    #[test]
    fn section_geometry_follows_wall_flag_and_half() {
        let wall = section("A-Top", true, HalfPosition::Top);
        assert_eq!((wall.rows(), wall.columns()), (7, 1));

        let inner = section("C-Bottom", false, HalfPosition::Bottom);
        assert_eq!((inner.rows(), inner.columns()), (8, 2));
        assert_eq!(inner.letter(), "C");
    }

    #[test]
    fn slot_label_names_letter_and_position() {
        let section = section("B-Top", false, HalfPosition::Top);
        let slot = Slot {
            id: SlotId::from("B-Top-3"),
            position: 3,
            company_id: None,
        };
        assert_eq!(section.slot_label(&slot), "Section B, Slot 3");
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&CompanyId::from("company-7")).expect("json");
        assert_eq!(json, "\"company-7\"");
        let source: DropSource = serde_json::from_str("\"unassigned\"").expect("source");
        assert_eq!(source, DropSource::Unassigned);
    }
}
