//! One block per producing colony: bases, output, inventory and ships.

use std::fmt::Write;

use super::{is_producing, separator, ship_table, Listed, Viewpoint};
use crate::error::{ReportError, TurnError};
use crate::life_support::{production_penalty, LifeSupport};
use crate::text::{hundredths, tenths};
use crate::{ColonyKind, Galaxy, Item, NamedPlanet, Planet, Species, Tech};

/// Tons of warship one planetary defense unit is worth.
const PD_TONS: i64 = 50;

/// What a colony can do this turn, as printed in its report block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Outlook {
    pub ls_needed: i64,
    pub penalty: i64,
    pub raw_material: i64,
    pub capacity: i64,
    /// Gross EU generated or available, before fleet upkeep.
    pub gross: i64,
    pub upkeep: i64,
    /// Raw material beyond manufacturing capacity; may be recycled.
    pub excess_raw_material: i64,
}

impl Outlook {
    pub fn net(&self) -> i64 {
        self.gross - self.upkeep
    }
}

pub(crate) fn outlook(species: &Species, colony: &NamedPlanet, planet: &Planet, ls_needed: i64) -> Outlook {
    let penalty = production_penalty(ls_needed, species.level(Tech::LifeSupport));
    let eff = planet.econ_efficiency;
    let md = planet.mining_difficulty.max(1);

    let mut raw_material = 10 * species.level(Tech::Mining) * colony.mi_base / md;
    raw_material -= penalty * raw_material / 100;
    raw_material = (eff * raw_material + 50) / 100;
    let mut capacity = species.level(Tech::Manufacturing) * colony.ma_base / 10;
    capacity -= penalty * capacity / 100;
    capacity = (eff * capacity + 50) / 100;

    let stock = raw_material + colony.items.get(Item::RawMaterial);
    let gross = match colony.kind {
        ColonyKind::MiningColony => 2 * raw_material / 3,
        ColonyKind::ResortColony => 2 * capacity / 3,
        _ => stock.min(capacity),
    };
    let percent = species.fleet_percent_cost.min(10_000);
    Outlook {
        ls_needed,
        penalty,
        raw_material,
        capacity,
        gross,
        upkeep: (percent * gross + 5000) / 10_000,
        excess_raw_material: (stock - capacity).max(0),
    }
}

fn kind_title(colony: &NamedPlanet) -> &'static str {
    match colony.kind {
        ColonyKind::Home => "HOME PLANET",
        ColonyKind::MiningColony => "MINING COLONY",
        ColonyKind::ResortColony => "RESORT COLONY",
        _ if colony.populated => "COLONY PLANET",
        _ => "PLANET",
    }
}

pub(super) fn write_producing_colonies(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    listed: &mut Listed,
) -> Result<(), ReportError> {
    let ls = LifeSupport::for_species(galaxy, species)?;
    for (index, colony) in species.colonies.iter().enumerate() {
        if !is_producing(species, index) {
            continue;
        }
        let planet = galaxy
            .planet(colony.coords)
            .ok_or_else(|| TurnError::MissingPlanet {
                species: species.name.clone(),
                colony: colony.name.clone(),
                coords: colony.coords.id(),
            })?;
        separator(out);
        write_header(out, species, colony, ls.home.mining_difficulty)?;
        if colony.populated {
            write_notices(out, colony)?;
            write_output(out, species, colony, &outlook(species, colony, planet, ls.needed(planet)), planet)?;
        }
        write_inventory(out, colony)?;
        write_ships(out, species, colony, listed)?;
    }
    Ok(())
}

/// IUs and AUs a bombarded home planet still has to install, split in
/// proportion to its mining difficulty.
pub(crate) fn recovery_units(species: &Species, colony: &NamedPlanet, home_md: i64) -> (i64, i64) {
    let needed = species.hp_original_base - colony.econ_base();
    let denom = 100 + home_md;
    let aus = (100 * (needed + colony.mi_base) - home_md * colony.ma_base + denom / 2) / denom;
    let ius = needed - aus;
    if ius < 0 {
        (0, needed)
    } else if aus < 0 {
        (needed, 0)
    } else {
        (ius, aus)
    }
}

fn write_header(
    out: &mut String,
    species: &Species,
    colony: &NamedPlanet,
    home_md: i64,
) -> Result<(), ReportError> {
    let c = colony.coords;
    write!(out, "\n\n{}: PL {}", kind_title(colony), colony.name)?;
    writeln!(
        out,
        "\n   Coordinates: x = {}, y = {}, z = {}, planet number {}",
        c.x, c.y, c.z, c.orbit
    )?;
    if colony.kind == ColonyKind::Home && colony.econ_base() < species.hp_original_base {
        let (ius, aus) = recovery_units(species, colony, home_md);
        out.push_str("\nWARNING! Home planet has not yet completely recovered from bombardment!\n");
        writeln!(
            out,
            "         {ius} IUs and {aus} AUs will have to be installed for complete recovery."
        )?;
    }
    Ok(())
}

fn write_notices(out: &mut String, colony: &NamedPlanet) -> Result<(), ReportError> {
    if !matches!(colony.kind, ColonyKind::MiningColony | ColonyKind::ResortColony) {
        write!(out, "\nAvailable population units = {}\n", colony.pop_units)?;
    }
    if colony.siege_eff != 0 {
        out.push_str("\nWARNING!  This planet is currently under siege and will remain\n");
        out.push_str("  under siege until the combat phase of the next turn!\n");
    }
    if colony.use_on_ambush > 0 {
        out.push_str("\nIMPORTANT!  This planet has made preparations for an ambush!\n");
    }
    if colony.hidden {
        out.push_str("\nIMPORTANT!  This planet is actively hiding from alien observation!\n");
    }
    Ok(())
}

fn write_output(
    out: &mut String,
    species: &Species,
    colony: &NamedPlanet,
    outlook: &Outlook,
    planet: &Planet,
) -> Result<(), ReportError> {
    write!(
        out,
        "\nProduction penalty = {}% (LSN = {})\n",
        outlook.penalty, outlook.ls_needed
    )?;
    write!(out, "\nEconomic efficiency = {}%\n", planet.econ_efficiency)?;
    let summary = format!(
        "{} - {} = {}",
        outlook.gross,
        outlook.upkeep,
        outlook.net()
    );

    if colony.mi_base > 0 {
        write!(
            out,
            "\nMining base = {} (MI = {}, MD = {})\n",
            tenths(colony.mi_base),
            species.level(Tech::Mining),
            hundredths(planet.mining_difficulty)
        )?;
        if colony.kind == ColonyKind::MiningColony {
            writeln!(out, "   This mining colony will generate {summary} economic units this turn.")?;
        } else {
            writeln!(
                out,
                "   {} raw material units will be produced this turn.",
                outlook.raw_material
            )?;
        }
    }
    if colony.ma_base > 0 {
        if colony.kind == ColonyKind::ResortColony {
            out.push('\n');
        }
        writeln!(
            out,
            "Manufacturing base = {} (MA = {})",
            tenths(colony.ma_base),
            species.level(Tech::Manufacturing)
        )?;
        if colony.kind == ColonyKind::ResortColony {
            writeln!(out, "   This resort colony will generate {summary} economic units this turn.")?;
        } else {
            writeln!(
                out,
                "   Production capacity this turn will be {}.",
                outlook.capacity
            )?;
        }
    }

    let carried = colony.items.get(Item::RawMaterial);
    if carried > 0 {
        let rm = Item::RawMaterial.spec();
        write!(
            out,
            "\n{}s ({},C{}) carried over from last turn = {carried}\n",
            rm.name, rm.abbr, rm.carry_capacity
        )?;
    }
    if !matches!(colony.kind, ColonyKind::MiningColony | ColonyKind::ResortColony) {
        write!(out, "\nTotal available for spending this turn = {summary}\n")?;
        write!(out, "\nShipyard capacity = {}\n", colony.shipyards)?;
    }
    Ok(())
}

fn write_inventory(out: &mut String, colony: &NamedPlanet) -> Result<(), ReportError> {
    let mut header = false;
    for (item, qty) in colony.items.iter().filter(|(i, _)| *i != Item::RawMaterial) {
        if !header {
            out.push_str("\nPlanetary inventory:\n");
            header = true;
        }
        let spec = item.spec();
        write!(
            out,
            "   {}s ({},C{}) = {qty}",
            spec.name, spec.abbr, spec.carry_capacity
        )?;
        if item == Item::PlanetaryDefense {
            write!(out, " (warship equivalence = {} tons)", PD_TONS * qty)?;
        }
        out.push('\n');
    }
    Ok(())
}

fn write_ships(
    out: &mut String,
    species: &Species,
    colony: &NamedPlanet,
    listed: &mut Listed,
) -> Result<(), ReportError> {
    let here: Vec<usize> = species
        .ships
        .iter()
        .enumerate()
        .filter(|(_, s)| s.coords.same_planet(colony.coords))
        .map(|(i, _)| i)
        .collect();
    if here.is_empty() {
        return Ok(());
    }
    write!(out, "\nShips at PL {}:\n", colony.name)?;
    ship_table(out, species, &here, Viewpoint::Own)?;
    for i in here {
        listed.insert(i);
    }
    Ok(())
}
