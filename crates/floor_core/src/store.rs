use std::collections::{HashMap, HashSet};

use shared::{
    domain::{Company, CompanyId, DropSource, Section, Slot, SlotId},
    protocol::AssignmentRecord,
};
use tracing::warn;

use crate::{error::StoreError, layout::generate_sections, roster::generate_companies};

/// What an `assign` call did to the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignOutcome {
    /// The company left the pool for an empty slot.
    Placed,
    /// The company left the pool and the previous occupant went back to it.
    Evicted { displaced: CompanyId },
    /// The company moved out of `from`, which is now empty.
    Moved { from: SlotId },
    /// The company traded places with the occupant of the target slot.
    Swapped { with: SlotId, displaced: CompanyId },
    /// The company already occupied the target slot.
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    Cleared { slot: SlotId },
    AlreadyUnassigned,
}

/// Section and slot occupancy plus the pool of companies without a slot.
///
/// Every company of the roster is either in exactly one slot or in the pool.
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    sections: Vec<Section>,
    companies: Vec<Company>,
    unassigned: Vec<CompanyId>,
    slot_index: HashMap<SlotId, (usize, usize)>,
}

impl AssignmentStore {
    /// Builds a store over the given layout. Companies not referenced by a slot
    /// start in the pool, in roster order.
    ///
    /// Fails when a slot holds a company missing from `companies`, or when one
    /// company occupies more than one slot.
    pub fn new(sections: Vec<Section>, companies: Vec<Company>) -> Result<Self, StoreError> {
        let mut placed = HashSet::new();
        for company_id in sections
            .iter()
            .flat_map(|section| section.slots.iter())
            .filter_map(|slot| slot.company_id.as_ref())
        {
            if !companies.iter().any(|company| &company.id == company_id) {
                return Err(StoreError::UnknownCompany(company_id.clone()));
            }
            if !placed.insert(company_id) {
                return Err(StoreError::DuplicatePlacement(company_id.clone()));
            }
        }
        Ok(Self::build(sections, companies))
    }

    /// The fixed hall layout with the full roster unassigned.
    pub fn standard() -> Self {
        Self::build(generate_sections(), generate_companies())
    }

    fn build(sections: Vec<Section>, companies: Vec<Company>) -> Self {
        let slot_index = sections
            .iter()
            .enumerate()
            .flat_map(|(section_idx, section)| {
                section
                    .slots
                    .iter()
                    .enumerate()
                    .map(move |(slot_idx, slot)| (slot.id.clone(), (section_idx, slot_idx)))
            })
            .collect();

        let mut store = Self {
            sections,
            companies,
            unassigned: Vec::new(),
            slot_index,
        };
        store.unassigned = store
            .companies
            .iter()
            .filter(|company| store.slot_holding(&company.id).is_none())
            .map(|company| company.id.clone())
            .collect();
        store
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn company(&self, company_id: &CompanyId) -> Option<&Company> {
        self.companies.iter().find(|company| &company.id == company_id)
    }

    /// Pool contents in the order companies were returned to it.
    pub fn unassigned_companies(&self) -> Vec<&Company> {
        self.unassigned
            .iter()
            .filter_map(|id| self.company(id))
            .collect()
    }

    pub fn is_unassigned(&self, company_id: &CompanyId) -> bool {
        self.unassigned.contains(company_id)
    }

    pub fn slot(&self, slot_id: &SlotId) -> Option<(&Section, &Slot)> {
        let &(section_idx, slot_idx) = self.slot_index.get(slot_id)?;
        let section = &self.sections[section_idx];
        Some((section, &section.slots[slot_idx]))
    }

    /// The slot currently holding `company_id`, if any.
    pub fn slot_holding(&self, company_id: &CompanyId) -> Option<&SlotId> {
        self.sections
            .iter()
            .flat_map(|section| section.slots.iter())
            .find(|slot| slot.holds(company_id))
            .map(|slot| &slot.id)
    }

    /// Places `company_id` into `slot_id`.
    ///
    /// `source` is where the gesture says the tile came from. The store checks it
    /// against its own state and trusts the state when they disagree, so the
    /// one-slot-per-company rule cannot be broken by a stale gesture.
    pub fn assign(
        &mut self,
        slot_id: &SlotId,
        company_id: &CompanyId,
        source: DropSource,
    ) -> Result<AssignOutcome, StoreError> {
        let &(section_idx, slot_idx) = self
            .slot_index
            .get(slot_id)
            .ok_or_else(|| StoreError::UnknownSlot(slot_id.clone()))?;
        if self.company(company_id).is_none() {
            return Err(StoreError::UnknownCompany(company_id.clone()));
        }

        let existing = self.sections[section_idx].slots[slot_idx].company_id.clone();
        if existing.as_ref() == Some(company_id) {
            return Ok(AssignOutcome::Unchanged);
        }

        let origin = self.slot_holding(company_id).cloned();
        let actual = if origin.is_some() {
            DropSource::Slot
        } else {
            DropSource::Unassigned
        };
        if actual != source {
            warn!(
                slot = %slot_id,
                company = %company_id,
                claimed = ?source,
                actual = ?actual,
                "drop source disagrees with store state"
            );
        }

        let outcome = match (origin, existing) {
            (Some(from), Some(displaced)) => {
                self.set_occupant(&from, Some(displaced.clone()));
                AssignOutcome::Swapped {
                    with: from,
                    displaced,
                }
            }
            (Some(from), None) => {
                self.set_occupant(&from, None);
                AssignOutcome::Moved { from }
            }
            (None, Some(displaced)) => {
                self.unassigned.retain(|id| id != company_id);
                self.unassigned.push(displaced.clone());
                AssignOutcome::Evicted { displaced }
            }
            (None, None) => {
                self.unassigned.retain(|id| id != company_id);
                AssignOutcome::Placed
            }
        };

        self.sections[section_idx].slots[slot_idx].company_id = Some(company_id.clone());
        Ok(outcome)
    }

    /// Returns `company_id` to the pool, clearing any slot that holds it.
    pub fn remove(&mut self, company_id: &CompanyId) -> Result<RemoveOutcome, StoreError> {
        if self.company(company_id).is_none() {
            return Err(StoreError::UnknownCompany(company_id.clone()));
        }

        let mut cleared = None;
        for slot in self
            .sections
            .iter_mut()
            .flat_map(|section| section.slots.iter_mut())
            .filter(|slot| slot.holds(company_id))
        {
            slot.company_id = None;
            cleared.get_or_insert_with(|| slot.id.clone());
        }

        if !self.is_unassigned(company_id) {
            self.unassigned.push(company_id.clone());
        }

        Ok(match cleared {
            Some(slot) => RemoveOutcome::Cleared { slot },
            None => RemoveOutcome::AlreadyUnassigned,
        })
    }

    /// Every occupied slot, in section order then slot order.
    pub fn snapshot(&self) -> Vec<AssignmentRecord> {
        self.sections
            .iter()
            .flat_map(|section| {
                section.slots.iter().filter_map(move |slot| {
                    let company_id = slot.company_id.clone()?;
                    let company_name = self
                        .company(&company_id)
                        .map(|company| company.name.clone())
                        .unwrap_or_else(|| "Unknown".to_string());
                    Some(AssignmentRecord {
                        section: section.id.clone(),
                        position: slot.position,
                        company_id,
                        company_name,
                    })
                })
            })
            .collect()
    }

    fn set_occupant(&mut self, slot_id: &SlotId, company_id: Option<CompanyId>) {
        if let Some(&(section_idx, slot_idx)) = self.slot_index.get(slot_id) {
            self.sections[section_idx].slots[slot_idx].company_id = company_id;
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
