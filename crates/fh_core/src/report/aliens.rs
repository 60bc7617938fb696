//! Alien colonies and ships seen at locations the species shares with them.

use std::fmt::Write;

use super::{ship_line, ship_table_header, Viewpoint};
use crate::error::ReportError;
use crate::turn::{collect_locations, Location};
use crate::{ColonyKind, Coords, Galaxy, Item, NamedPlanet, Ship, ShipStatus, Species};

/// Column where the species name starts in an alien colony line.
const COLONY_LINE_WIDTH: usize = 53;

/// Economic base rounded the way aliens get to see it.
pub fn approximate_base(base: i64) -> i64 {
    if base < 100 {
        (base + 5) / 10
    } else {
        ((base + 50) / 100) * 10
    }
}

/// Number shown for a species whose ships are field distorted. It depends
/// only on the species number and its life support level at turn start.
pub fn distorted_species_number(number: u32, ls_init: i64) -> i64 {
    let lo = i64::from(number & 0x0f);
    let hi = i64::from((number >> 4) & 0x0f);
    (ls_init % 5 + 3) * (4 * lo + hi) + (ls_init % 11 + 7)
}

fn colony_label(colony: &NamedPlanet) -> &'static str {
    match colony.kind {
        ColonyKind::MiningColony => "Mining colony",
        ColonyKind::ResortColony => "Resort colony",
        ColonyKind::Home => "Home planet",
        _ if colony.econ_base() > 0 => "Colony planet",
        _ => "Uncolonized planet",
    }
}

fn has_populated_colony_on(species: &Species, at: Coords) -> bool {
    species
        .colonies
        .iter()
        .any(|c| c.populated && c.coords.same_planet(at))
}

/// Section header, written before the first sighting at a location.
struct Sighting<'a> {
    at: Coords,
    our_planet: Option<&'a str>,
    header: bool,
    ship_header: bool,
}

impl Sighting<'_> {
    fn header(&mut self, out: &mut String) -> Result<(), ReportError> {
        if !self.header {
            let c = self.at;
            write!(out, "\n\nAliens at x = {}, y = {}, z = {}", c.x, c.y, c.z)?;
            if let Some(name) = self.our_planet {
                write!(out, " (PL {name} star system)")?;
            }
            out.push_str(":\n");
            self.header = true;
        }
        Ok(())
    }
}

pub(super) fn write_aliens(out: &mut String, galaxy: &Galaxy, species: &Species) -> Result<(), ReportError> {
    let locations = collect_locations(galaxy);
    for mine in locations.iter().filter(|l| l.species == species.number) {
        let our_planet = species
            .colonies
            .iter()
            .find(|c| !c.coords.is_off_map() && c.coords.same_system(mine.at))
            .map(|c| c.name.as_str());
        let mut sighting = Sighting {
            at: mine.at,
            our_planet,
            header: false,
            ship_header: false,
        };
        for theirs in locations.iter().filter(|l| shares_system(l, mine, species.number)) {
            let Some(alien) = galaxy.species(theirs.species) else {
                continue;
            };
            write_alien_colonies(out, species, alien, &mut sighting)?;
            write_alien_ships(out, species, alien, &mut sighting)?;
        }
    }
    Ok(())
}

fn shares_system(theirs: &Location, mine: &Location, number: u32) -> bool {
    theirs.species != number && theirs.at.same_system(mine.at)
}

fn write_alien_colonies(
    out: &mut String,
    observer: &Species,
    alien: &Species,
    sighting: &mut Sighting<'_>,
) -> Result<(), ReportError> {
    let at = sighting.at;
    for colony in alien
        .colonies
        .iter()
        .filter(|c| c.populated && !c.coords.is_off_map() && c.coords.same_system(at))
    {
        let colocated = has_populated_colony_on(observer, colony.coords);
        if colony.hidden && !colocated {
            continue;
        }
        sighting.header(out)?;
        let label = format!(
            "  {} PL {} (pl #{})",
            colony_label(colony),
            colony.name,
            colony.coords.orbit
        );
        writeln!(out, "{label:<COLONY_LINE_WIDTH$}SP {}", alien.name)?;

        let base = colony.econ_base();
        if base == 0 {
            out.push_str("      (No economic base.)\n");
        } else {
            writeln!(
                out,
                "      (Economic base is approximately {}.)",
                approximate_base(base)
            )?;
        }
        if colocated {
            write_defenses(out, colony)?;
        }
        if colony.hidden {
            out.push_str("      (Colony is actively hiding from alien observation.)\n");
        }
    }
    Ok(())
}

fn write_defenses(out: &mut String, colony: &NamedPlanet) -> Result<(), ReportError> {
    let name = Item::PlanetaryDefense.name();
    match colony.items.get(Item::PlanetaryDefense) {
        0 => {}
        1 => writeln!(out, "      (There is 1 {name} on the planet.)")?,
        n => writeln!(out, "      (There are {n} {name}s on the planet.)")?,
    }
    match colony.shipyards {
        0 => {}
        1 => out.push_str("      (There is 1 shipyard on the planet.)\n"),
        n => writeln!(out, "      (There are {n} shipyards on the planet.)")?,
    }
    Ok(())
}

/// Landed ships and ships under construction stay out of sight unless the
/// observer has a populated colony on the same planet.
fn ship_is_seen(observer: &Species, ship: &Ship) -> bool {
    !matches!(ship.status, ShipStatus::OnSurface | ShipStatus::UnderConstruction)
        || has_populated_colony_on(observer, ship.coords)
}

fn write_alien_ships(
    out: &mut String,
    observer: &Species,
    alien: &Species,
    sighting: &mut Sighting<'_>,
) -> Result<(), ReportError> {
    let at = sighting.at;
    for ship in alien
        .ships
        .iter()
        .filter(|s| !s.coords.is_off_map() && s.coords.same_system(at))
        .filter(|s| ship_is_seen(observer, s))
    {
        sighting.header(out)?;
        if !sighting.ship_header {
            out.push('\n');
            ship_table_header(out, Viewpoint::Alien);
            sighting.ship_header = true;
        }
        ship_line(out, alien, ship, Viewpoint::Alien)?;
    }
    Ok(())
}
