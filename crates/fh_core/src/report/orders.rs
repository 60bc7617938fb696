//! Order template for the next turn, with auto orders filled in when the
//! species asked for them.
//!
//! Auto orders plan against a scratch copy of the few values they adjust
//! (units needed, unloading points, jump destinations), so rendering never
//! writes back to the galaxy.

use std::fmt::Write;

use ahash::AHashSet;

use super::colonies::{outlook, Outlook};
use super::separator;
use crate::error::{ReportError, TurnError};
use crate::life_support::LifeSupport;
use crate::text::commas;
use crate::{
    ColonyKind, Coords, Galaxy, Item, NamedPlanet, Propulsion, Ship, ShipClass, ShipStatus,
    Species, Tech,
};

/// Economic base at which a colony counts as self-sufficient.
const SELF_SUFFICIENT_BASE: i64 = 2000;

/// Planning state for one species' auto orders.
struct Scratch {
    ius_needed: Vec<i64>,
    aus_needed: Vec<i64>,
    /// Planet a ship unloads at this turn.
    unloading: Vec<Option<Coords>>,
    /// Where an unloaded ship heads back to.
    returning: Vec<Option<Coords>>,
    /// Destination a ship was sent to, if known.
    dest: Vec<Option<Coords>>,
    jumped: Vec<bool>,
    /// Systems already picked as a scout destination.
    claimed: AHashSet<Coords>,
}

impl Scratch {
    fn new(species: &Species) -> Self {
        Scratch {
            ius_needed: species.colonies.iter().map(|c| c.ius_needed).collect(),
            aus_needed: species.colonies.iter().map(|c| c.aus_needed).collect(),
            unloading: species.ships.iter().map(|s| s.unloading_point).collect(),
            returning: vec![None; species.ships.len()],
            dest: species.ships.iter().map(|s| s.dest).collect(),
            jumped: vec![false; species.ships.len()],
            claimed: AHashSet::new(),
        }
    }
}

fn section(out: &mut String, name: &str, what: &str) -> std::fmt::Result {
    write!(out, "START {name}\n; Place {what} orders here.\n\n")
}

/// Render the order template for `species`.
pub fn render_orders(galaxy: &Galaxy, species: &Species) -> Result<String, ReportError> {
    let mut out = String::new();
    let mut scratch = Scratch::new(species);
    separator(&mut out);
    out.push_str("\n\nORDER SECTION. Remove these two lines and everything above\n");
    out.push_str("  them, and submit only the orders below.\n\n");

    section(&mut out, "COMBAT", "combat")?;
    out.push_str("END\n\n");

    section(&mut out, "PRE-DEPARTURE", "pre-departure")?;
    write_pre_departure(&mut out, species, &mut scratch)?;
    out.push_str("END\n\n");

    section(&mut out, "JUMPS", "jump")?;
    write_jumps(&mut out, galaxy, species, &mut scratch)?;
    out.push_str("END\n\n");

    write_production(&mut out, galaxy, species, &mut scratch)?;

    section(&mut out, "POST-ARRIVAL", "post-arrival")?;
    write_scans(&mut out, species, &scratch)?;
    out.push_str("END\n\n");

    section(&mut out, "STRIKES", "strike")?;
    out.push_str("END\n");
    Ok(out)
}

// ---------------------------------------------------------------------------
// Pre-departure
// ---------------------------------------------------------------------------

fn write_pre_departure(
    out: &mut String,
    species: &Species,
    scratch: &mut Scratch,
) -> std::fmt::Result {
    for colony in species.colonies.iter().filter(|c| !c.coords.is_off_map()) {
        if colony.auto_ius == 0 && colony.auto_aus == 0 {
            out.push('\n');
        } else {
            if colony.auto_ius != 0 {
                writeln!(out, "\tInstall\t{} IU\tPL {}", colony.auto_ius, colony.name)?;
            }
            if colony.auto_aus != 0 {
                writeln!(out, "\tInstall\t{} AU\tPL {}", colony.auto_aus, colony.name)?;
            }
        }
        if !species.auto_orders {
            continue;
        }
        for (i, ship) in species.ships.iter().enumerate() {
            if !is_unloading_here(species, colony, ship) {
                continue;
            }
            write!(out, "\tUnload\t{}\n\n", ship.short_name())?;
            scratch.unloading[i] = Some(colony.coords);
            scratch.returning[i] = ship.loading_point;
        }
    }
    Ok(())
}

/// A loaded transport unloads at a growing colony outside the home system,
/// unless it was loaded there.
fn is_unloading_here(species: &Species, colony: &NamedPlanet, ship: &Ship) -> bool {
    let usable = !ship.coords.is_off_map()
        && ship.coords.same_planet(colony.coords)
        && !matches!(ship.status, ShipStatus::JumpedInCombat | ShipStatus::ForcedJump)
        && ship.class == ShipClass::Transport
        && ship.items.get(Item::Colonist) >= 1;
    if !usable || ship.loading_point.is_some_and(|p| p.same_planet(colony.coords)) {
        return false;
    }
    colony.populated
        && colony.econ_base() < SELF_SUFFICIENT_BASE
        && !colony.coords.same_system(species.home)
}

// ---------------------------------------------------------------------------
// Jumps
// ---------------------------------------------------------------------------

fn mishap_text(species: &Species, ship: &Ship, dest: Option<Coords>) -> String {
    match dest {
        Some(dest) => {
            let chance = ship.mishap_chance(dest, species.level(Tech::Gravitics));
            format!("mishap chance = {}.{:02}%", chance / 100, chance % 100)
        }
        None => "mishap chance = ???".to_string(),
    }
}

/// `PL name` when the species has a planet there, otherwise the coordinates.
fn target_name(species: &Species, at: Coords) -> String {
    match species.colony_at(at) {
        Some(colony) => format!("PL {}", colony.name),
        None => at.to_string(),
    }
}

fn write_jumps(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    scratch: &mut Scratch,
) -> Result<(), ReportError> {
    for (i, ship) in species.ships.iter().enumerate() {
        if ship.coords.is_off_map()
            || matches!(ship.status, ShipStatus::JumpedInCombat | ShipStatus::ForcedJump)
        {
            continue;
        }
        let Some(target) = ship
            .auto_jump_target
            .or(scratch.returning[i])
            .or(scratch.unloading[i])
        else {
            continue;
        };
        write!(
            out,
            "\tJump\t{}, {}\t; Age {}, {}\n\n",
            ship.display_name(true, true)?,
            target_name(species, target),
            ship.age,
            mishap_text(species, ship, Some(target))
        )?;
        scratch.jumped[i] = true;
        scratch.dest[i] = Some(target);
    }
    if species.auto_orders {
        write_auto_jumps(out, galaxy, species, scratch)?;
    }
    Ok(())
}

fn position(ship: &Ship) -> String {
    match ship.status {
        ShipStatus::InOrbit => format!("O{}", ship.coords.orbit),
        ShipStatus::OnSurface => format!("L{}", ship.coords.orbit),
        _ => "D".to_string(),
    }
}

/// Nearest system the species has not visited and no other scout is
/// already heading to.
fn closest_unvisited(galaxy: &Galaxy, species: &Species, ship: &Ship, claimed: &AHashSet<Coords>) -> Option<Coords> {
    galaxy
        .systems()
        .iter()
        .filter(|s| !s.visited_by.contains(&species.number) && !claimed.contains(&s.coords.system()))
        .min_by_key(|s| ship.coords.distance_squared(s.coords))
        .map(|s| s.coords.system())
}

fn write_auto_jumps(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    scratch: &mut Scratch,
) -> Result<(), ReportError> {
    for (i, ship) in species.ships.iter().enumerate() {
        if ship.coords.is_off_map()
            || scratch.jumped[i]
            || ship.propulsion != Propulsion::Ftl
            || matches!(
                ship.status,
                ShipStatus::UnderConstruction | ShipStatus::JumpedInCombat | ShipStatus::ForcedJump
            )
        {
            continue;
        }
        let name = ship.display_name(true, true)?;
        let c = ship.coords;
        if ship.class == ShipClass::Transport && ship.tonnage == 1 {
            let target = closest_unvisited(galaxy, species, ship, &scratch.claimed);
            let shown = target.map_or_else(|| "???".to_string(), |t| t.to_string());
            writeln!(
                out,
                "\tJump\t{name}, {shown}\n\t\t\t; Age {}, now at {c}, {}, {}",
                ship.age,
                position(ship),
                mishap_text(species, ship, target)
            )?;
            if let Some(target) = target {
                scratch.claimed.insert(target);
            }
            scratch.dest[i] = target;
        } else {
            writeln!(
                out,
                "\tJump\t{name}, ???\t; Age {}, now at {c}, {}",
                ship.age,
                position(ship)
            )?;
            scratch.dest[i] = None;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

fn is_production_site(colony: &NamedPlanet) -> bool {
    !colony.coords.is_off_map()
        && (colony.mi_base != 0 || colony.kind == ColonyKind::ResortColony)
        && (colony.ma_base != 0 || colony.kind == ColonyKind::MiningColony)
}

fn colony_outlook(galaxy: &Galaxy, species: &Species, ls: &LifeSupport<'_>, colony: &NamedPlanet) -> Result<Outlook, TurnError> {
    let planet = galaxy
        .planet(colony.coords)
        .ok_or_else(|| TurnError::MissingPlanet {
            species: species.name.clone(),
            colony: colony.name.clone(),
            coords: colony.coords.id(),
        })?;
    Ok(outlook(species, colony, planet, ls.needed(planet)))
}

fn write_production(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    scratch: &mut Scratch,
) -> Result<(), ReportError> {
    let ls = LifeSupport::for_species(galaxy, species)?;
    write!(
        out,
        "START PRODUCTION\n\n;   Economic units at start of turn = {}\n\n",
        species.econ_units
    )?;
    // Last named planet first.
    for (index, colony) in species.colonies.iter().enumerate().rev() {
        if !is_production_site(colony) {
            continue;
        }
        let outlook = colony_outlook(galaxy, species, &ls, colony)?;
        write_production_comment(out, species, colony, &outlook)?;

        let (ius, aus) = (scratch.ius_needed[index], scratch.aus_needed[index]);
        if ius != 0 {
            writeln!(out, "\tBuild\t{ius} IU")?;
        }
        if aus != 0 {
            writeln!(out, "\tBuild\t{aus} AU")?;
        }
        if ius != 0 || aus != 0 {
            out.push('\n');
        }

        if !species.auto_orders
            || matches!(colony.kind, ColonyKind::MiningColony | ColonyKind::ResortColony)
        {
            continue;
        }
        let recycle = outlook.excess_raw_material / 5;
        if recycle > 0 {
            write!(out, "\tRecycle\t{} RM\n\n", 5 * recycle)?;
        }
        write_transport_develops(out, species, colony)?;
        write_continuations(out, species, colony)?;
        write_develops(out, species, index, scratch)?;
    }
    out.push_str("END\n\n");
    Ok(())
}

fn write_production_comment(
    out: &mut String,
    species: &Species,
    colony: &NamedPlanet,
    outlook: &Outlook,
) -> Result<(), ReportError> {
    let net = outlook.net();
    writeln!(out, "    PRODUCTION PL {}", colony.name)?;
    match colony.kind {
        ColonyKind::MiningColony => {
            out.push_str("    ; The above PRODUCTION order is required for this mining colony, even\n");
            out.push_str("    ;  if no other production orders are given for it. This mining colony\n");
            writeln!(out, "    ;  will generate {net} economic units this turn.")?;
        }
        ColonyKind::ResortColony => {
            out.push_str("    ; The above PRODUCTION order is required for this resort colony, even\n");
            out.push_str("    ;  though no other production orders can be given for it.  This resort\n");
            writeln!(out, "    ;  colony will generate {net} economic units this turn.")?;
        }
        _ => {
            let c = colony.coords;
            writeln!(
                out,
                "    ; Place production orders here for planet {} (sector {} {} {} #{}).",
                colony.name, c.x, c.y, c.z, c.orbit
            )?;
            write!(
                out,
                "    ;  Avail pop = {}, shipyards = {}, to spend = {net}",
                colony.pop_units, colony.shipyards
            )?;
            if colony.kind != ColonyKind::Home {
                write!(out, " (max = {})", 2 * net)?;
            } else if species.hp_original_base != 0 {
                write!(out, " (max = {})", 5 * net)?;
            } else {
                out.push_str(" (max = no limit)");
            }
            out.push_str(".\n\n");
        }
    }
    Ok(())
}

/// Develop orders for transports the AUTO order is bringing here.
fn write_transport_develops(out: &mut String, species: &Species, colony: &NamedPlanet) -> Result<(), ReportError> {
    for ship in species.ships.iter().filter(|s| !s.coords.is_off_map()) {
        if !ship.auto_jump_target.is_some_and(|t| t.same_planet(colony.coords)) {
            continue;
        }
        let Some(destination) = ship.unloading_point.and_then(|at| species.colony_at(at)) else {
            continue;
        };
        write!(
            out,
            "\tDevelop\tPL {}, {}\n\n",
            destination.name,
            ship.short_name()
        )?;
    }
    Ok(())
}

/// Keep paying for ships under construction and growing starbases.
fn write_continuations(out: &mut String, species: &Species, colony: &NamedPlanet) -> Result<(), ReportError> {
    let ma = species.level(Tech::Manufacturing);
    for ship in species
        .ships
        .iter()
        .filter(|s| !s.coords.is_off_map() && s.coords.same_planet(colony.coords))
    {
        if ship.status == ShipStatus::UnderConstruction {
            let left = ship.remaining_cost;
            write!(
                out,
                "\tContinue\t{}, {left}\t; Left to pay = {left}\n\n",
                ship.display_name(true, true)?
            )?;
            continue;
        }
        if ship.propulsion != Propulsion::Starbase {
            continue;
        }
        let growth = ma / 2 - ship.tonnage;
        if growth >= 1 {
            write!(
                out,
                "\tContinue\tBAS {}, {}\t; Current tonnage = {}\n\n",
                ship.name,
                100 * growth,
                commas(10_000 * ship.tonnage)
            )?;
        }
    }
    Ok(())
}

/// Develop a small colony from its own population, and from a large one
/// develop the not yet self-sufficient colonies in the same system.
fn write_develops(
    out: &mut String,
    species: &Species,
    index: usize,
    scratch: &mut Scratch,
) -> Result<(), ReportError> {
    let colony = &species.colonies[index];
    let colonists = colony.items.get(Item::Colonist)
        + species
            .ships
            .iter()
            .filter(|s| s.coords.same_planet(colony.coords))
            .map(|s| s.items.get(Item::Colonist))
            .sum::<i64>();
    let total = colony.econ_base() + scratch.ius_needed[index] + scratch.aus_needed[index] + colonists;
    if colony.kind == ColonyKind::Colony && total < SELF_SUFFICIENT_BASE && colony.pop_units > 0 {
        let units = colony.pop_units.min(SELF_SUFFICIENT_BASE - total);
        write!(out, "\tDevelop\t{}\n\n", 2 * units)?;
        scratch.ius_needed[index] += units;
    }
    if total < SELF_SUFFICIENT_BASE && colony.kind != ColonyKind::Home {
        return Ok(());
    }
    for (j, other) in species.colonies.iter().enumerate() {
        if j == index || other.coords.is_off_map() || !other.coords.same_system(colony.coords) {
            continue;
        }
        let committed = other.econ_base() + scratch.ius_needed[j] + scratch.aus_needed[j];
        if committed == 0 {
            continue;
        }
        let installable = (other.items.get(Item::ColonialMining) + other.items.get(Item::ColonialManufacturing))
            .min(other.items.get(Item::Colonist));
        let projected = committed + installable;
        if projected >= SELF_SUFFICIENT_BASE {
            continue;
        }
        let units = (SELF_SUFFICIENT_BASE - projected).min(colony.pop_units);
        if units <= 0 {
            continue;
        }
        write!(out, "\tDevelop\t{}\tPL {}\n\n", 2 * units, other.name)?;
        scratch.aus_needed[j] += units;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Post-arrival
// ---------------------------------------------------------------------------

fn write_scans(out: &mut String, species: &Species, scratch: &Scratch) -> std::fmt::Result {
    if !species.auto_orders {
        return Ok(());
    }
    out.push_str("\tAuto\n\n");
    for (i, ship) in species.ships.iter().enumerate() {
        let scout = !ship.coords.is_off_map()
            && ship.status != ShipStatus::UnderConstruction
            && ship.class == ShipClass::Transport
            && ship.tonnage == 1
            && ship.propulsion == Propulsion::Ftl;
        if !scout {
            continue;
        }
        let settled = scratch.dest[i].is_some_and(|dest| {
            species
                .colonies
                .iter()
                .any(|c| c.populated && !c.coords.is_off_map() && c.coords.same_system(dest))
        });
        if !settled {
            writeln!(out, "\tScan\tTR1 {}", ship.name)?;
        }
    }
    Ok(())
}
