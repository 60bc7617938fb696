//! Per-species status report and order template.
//!
//! Rendering only reads the galaxy. Bookkeeping such as which ships were
//! already listed lives in local state.

mod aliens;
mod colonies;
mod orders;
mod others;
mod status;

use std::fmt::Write;

use ahash::AHashSet;

use crate::error::ReportError;
use crate::{ColonyKind, Galaxy, Inventory, Ship, ShipClass, ShipStatus, Species};

pub use aliens::{approximate_base, distorted_species_number};
pub use orders::render_orders;

const SEPARATOR_STARS: usize = 25;
const TABLE_WIDTH: usize = 76;

/// Optional event log of the previous turn, shown ahead of the status.
#[derive(Debug, Clone, Copy)]
pub struct PriorLog<'a> {
    pub turn: u32,
    pub text: &'a str,
}

/// Render the report for `species_number` at the start of `turn`. The order
/// template is appended unless `test_mode` is set.
pub fn render_report(
    galaxy: &Galaxy,
    species_number: u32,
    turn: u32,
    prior_log: Option<PriorLog<'_>>,
    test_mode: bool,
) -> Result<String, ReportError> {
    let species = galaxy
        .species(species_number)
        .ok_or(ReportError::UnknownSpecies(species_number))?;
    let mut out = String::new();
    if let Some(log) = prior_log {
        write!(out, "\n\n\t\t\tEVENT LOG FOR TURN {}\n", log.turn)?;
        out.push_str(log.text);
    }
    status::write_status(&mut out, galaxy, species, turn)?;
    let mut listed = Listed::default();
    colonies::write_producing_colonies(&mut out, galaxy, species, &mut listed)?;
    others::write_other_planets_and_ships(&mut out, species, &mut listed, test_mode)?;
    separator(&mut out);
    aliens::write_aliens(&mut out, galaxy, species)?;
    if !test_mode {
        out.push_str(&render_orders(galaxy, species)?);
    }
    Ok(out)
}

/// Indices of ships already shown in a colony's ship table.
#[derive(Debug, Default)]
pub(crate) struct Listed(AHashSet<usize>);

impl Listed {
    fn insert(&mut self, index: usize) {
        self.0.insert(index);
    }

    fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

pub(crate) fn separator(out: &mut String) {
    out.push_str("\n\n");
    out.push_str(&vec!["*"; SEPARATOR_STARS].join(" "));
    out.push('\n');
}

pub(crate) fn table_rule(out: &mut String) {
    out.push(' ');
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');
}

/// `100 CU,20 IU` style cargo list.
pub(crate) fn cargo_list(items: &Inventory) -> String {
    items
        .iter()
        .map(|(item, qty)| format!("{qty} {}", item.abbr()))
        .collect::<Vec<_>>()
        .join(",")
}

/// `, 100 CU, 20 IU` style suffix for one-line listings.
pub(crate) fn cargo_suffix(items: &Inventory) -> String {
    items
        .iter()
        .map(|(item, qty)| format!(", {qty} {}", item.abbr()))
        .collect()
}

/// Table order: starbases, then transports, then warships.
pub(crate) fn table_rank(ship: &Ship) -> u8 {
    match ship.class {
        ShipClass::Starbase => 0,
        ShipClass::Transport => 1,
        _ => 2,
    }
}

/// Whose ships a table shows. Aliens see a species column instead of cargo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Viewpoint {
    Own,
    Alien,
}

pub(crate) fn ship_table_header(out: &mut String, view: Viewpoint) {
    out.push_str("  Name                          ");
    match view {
        Viewpoint::Own => out.push_str("                 Cap. Cargo\n"),
        Viewpoint::Alien => out.push_str("                     Species\n"),
    }
    table_rule(out);
}

/// One table row for `ship`, owned by `owner`.
pub(crate) fn ship_line(
    out: &mut String,
    owner: &Species,
    ship: &Ship,
    view: Viewpoint,
) -> Result<(), ReportError> {
    match view {
        Viewpoint::Own => {
            write!(out, "  {:<50}{:>4}  ", ship.display_name(true, false)?, ship.capacity())?;
            if ship.status == ShipStatus::UnderConstruction {
                writeln!(out, "Left to pay = {}", ship.remaining_cost)?;
            } else {
                writeln!(out, "{}", cargo_list(&ship.items))?;
            }
        }
        Viewpoint::Alien => {
            write!(out, "  {:<46} ", ship.display_name(false, false)?)?;
            if ship.is_distorted() {
                let ls = owner.tech(crate::Tech::LifeSupport).init_level;
                writeln!(out, "SP {}", distorted_species_number(owner.number, ls))?;
            } else {
                writeln!(out, "SP {}", owner.name)?;
            }
        }
    }
    Ok(())
}

/// Header plus rows for the ships at `indices`, in table order.
pub(crate) fn ship_table(
    out: &mut String,
    owner: &Species,
    indices: &[usize],
    view: Viewpoint,
) -> Result<(), ReportError> {
    let mut ships: Vec<&Ship> = indices.iter().filter_map(|&i| owner.ships.get(i)).collect();
    ships.sort_by_key(|s| table_rank(s));
    ship_table_header(out, view);
    for ship in ships {
        ship_line(out, owner, ship, view)?;
    }
    Ok(())
}

/// Names of species in `numbers`, as `SP a, SP b`.
pub(crate) fn species_list(galaxy: &Galaxy, numbers: impl Iterator<Item = u32>) -> String {
    numbers
        .map(|n| format!("SP {}", galaxy.species_name(n)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn is_producing(species: &Species, index: usize) -> bool {
    species.colonies.get(index).is_some_and(|c| {
        !c.coords.is_off_map()
            && (c.kind == ColonyKind::Home
                || (c.kind != ColonyKind::Disbanded && c.econ_base() > 0))
    })
}
