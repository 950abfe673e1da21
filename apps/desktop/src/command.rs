//! Text gestures understood by the terminal editor.

use anyhow::{anyhow, bail, Result};
use floor_core::AssignmentStore;
use shared::domain::{CompanyId, DropSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drop a tile on a slot. `source` says where the tile was picked up.
    Drop {
        company: String,
        slot: String,
        source: DropSource,
    },
    Remove {
        company: String,
    },
    Show,
    Pool,
    Snapshot,
    Save,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  place <company> <slot>   drag a company from the unassigned pool onto a slot
  move <company> <slot>    drag a placed company onto another slot (swaps if occupied)
  remove <company>         send a placed company back to the pool
  show                     draw the floor plan
  pool                     list unassigned companies
  snapshot                 print the records that would be saved
  save                     save the layout and wait for the result
  help                     this text
  quit                     leave the editor
companies may be given by id (company-3) or by name (Microsoft)";

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let command = match (verb.as_str(), args.as_slice()) {
        ("place", [company, slot]) => Command::Drop {
            company: company.to_string(),
            slot: slot.to_string(),
            source: DropSource::Unassigned,
        },
        ("move", [company, slot]) => Command::Drop {
            company: company.to_string(),
            slot: slot.to_string(),
            source: DropSource::Slot,
        },
        ("remove", [company]) => Command::Remove {
            company: company.to_string(),
        },
        ("show", []) => Command::Show,
        ("pool", []) => Command::Pool,
        ("snapshot", []) => Command::Snapshot,
        ("save", []) => Command::Save,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        ("place" | "move", _) => bail!("usage: {verb} <company> <slot>"),
        ("remove", _) => bail!("usage: remove <company>"),
        ("show" | "pool" | "snapshot" | "save" | "help" | "quit" | "exit", _) => {
            bail!("{verb} takes no arguments")
        }
        _ => bail!("unknown command `{verb}`; try `help`"),
    };
    Ok(Some(command))
}

/// Resolves a company given by id or by case-insensitive name.
pub fn resolve_company(store: &AssignmentStore, token: &str) -> Result<CompanyId> {
    let id = CompanyId::from(token);
    if store.company(&id).is_some() {
        return Ok(id);
    }
    store
        .companies()
        .iter()
        .find(|company| company.name.eq_ignore_ascii_case(token))
        .map(|company| company.id.clone())
        .ok_or_else(|| anyhow!("no company named `{token}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gestures_with_their_source() {
        assert_eq!(
            parse_command("place company-1 B-Top-1").expect("parse"),
            Some(Command::Drop {
                company: "company-1".into(),
                slot: "B-Top-1".into(),
                source: DropSource::Unassigned,
            })
        );
        assert_eq!(
            parse_command("  MOVE Apple B-Top-2 ").expect("parse"),
            Some(Command::Drop {
                company: "Apple".into(),
                slot: "B-Top-2".into(),
                source: DropSource::Slot,
            })
        );
        assert_eq!(
            parse_command("remove company-1").expect("parse"),
            Some(Command::Remove {
                company: "company-1".into()
            })
        );
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        assert_eq!(parse_command("").expect("parse"), None);
        assert_eq!(parse_command("   # setup").expect("parse"), None);
    }

    #[test]
    fn reports_bad_arity_and_unknown_verbs() {
        let err = parse_command("place company-1").expect_err("arity");
        assert!(err.to_string().contains("usage: place"));
        let err = parse_command("save now").expect_err("arity");
        assert!(err.to_string().contains("no arguments"));
        let err = parse_command("teleport x").expect_err("verb");
        assert!(err.to_string().contains("unknown command"));
    }

    #[test]
    fn resolves_company_by_id_or_name() {
        let store = AssignmentStore::standard();
        assert_eq!(
            resolve_company(&store, "company-3").expect("id").as_str(),
            "company-3"
        );
        assert_eq!(
            resolve_company(&store, "microsoft").expect("name").as_str(),
            "company-3"
        );
        assert!(resolve_company(&store, "Initech").is_err());
    }
}
