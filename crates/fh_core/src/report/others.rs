//! One-line listings for colonies without a base and for ships away from
//! any producing colony.

use std::fmt::Write;

use super::{cargo_suffix, is_producing, separator, Listed};
use crate::error::ReportError;
use crate::{Ship, ShipStatus, Species};

fn header(out: &mut String, printed: &mut bool) {
    if !*printed {
        separator(out);
        out.push_str("\n\nOther planets and ships:\n\n");
        *printed = true;
    }
}

fn indented_ship(out: &mut String, ship: &Ship) -> Result<(), ReportError> {
    writeln!(
        out,
        "\t\t{}{}",
        ship.display_name(true, false)?,
        cargo_suffix(&ship.items)
    )?;
    Ok(())
}

/// Ships whose position the owner cannot see this turn.
fn position_unknown(ship: &Ship, test_mode: bool) -> bool {
    matches!(ship.status, ShipStatus::JumpedInCombat | ShipStatus::ForcedJump)
        || (test_mode && ship.arrived_via_wormhole)
}

pub(super) fn write_other_planets_and_ships(
    out: &mut String,
    species: &Species,
    listed: &mut Listed,
    test_mode: bool,
) -> Result<(), ReportError> {
    let mut printed = false;
    for (index, colony) in species.colonies.iter().enumerate() {
        if colony.coords.is_off_map() || is_producing(species, index) {
            continue;
        }
        header(out, &mut printed);
        let c = colony.coords;
        writeln!(
            out,
            "{:4}{:3}{:3} #{}\tPL {}{}",
            c.x,
            c.y,
            c.z,
            c.orbit,
            colony.name,
            cargo_suffix(&colony.items)
        )?;
        for (i, ship) in species.ships.iter().enumerate() {
            if listed.contains(i) || !ship.coords.same_planet(c) {
                continue;
            }
            indented_ship(out, ship)?;
            listed.insert(i);
        }
    }

    for (i, ship) in species.ships.iter().enumerate() {
        if listed.contains(i) {
            continue;
        }
        listed.insert(i);
        if ship.coords.is_off_map() {
            continue;
        }
        header(out, &mut printed);
        let name = ship.display_name(true, false)?;
        let cargo = cargo_suffix(&ship.items);
        if position_unknown(ship, test_mode) {
            writeln!(out, "  ?? ?? ??\t{name}{cargo}")?;
            continue;
        }
        let c = ship.coords;
        writeln!(out, "{:4}{:3}{:3}\t{name}{cargo}", c.x, c.y, c.z)?;
        for (j, other) in species.ships.iter().enumerate() {
            if listed.contains(j) || other.coords.is_off_map() || !other.coords.same_system(c) {
                continue;
            }
            indented_ship(out, other)?;
            listed.insert(j);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, make_ship, two_species_galaxy};
    use crate::{ColonyKind, Coords, Item, NamedPlanet, ShipClass};

    #[test]
    fn lists_claimed_planets_and_stray_ships() {
        let galaxy = two_species_galaxy(&mut make_rng());
        let mut species = galaxy.species[0].clone();
        let outpost = Coords::new(15, 12, 5).with_orbit(2);
        species.colonies.push(NamedPlanet {
            name: "Outpost".to_string(),
            coords: outpost,
            kind: ColonyKind::Colony,
            items: [(Item::Colonist, 5)].into(),
            ..NamedPlanet::default()
        });
        let mut lander = make_ship("Lander", ShipClass::Transport, 1);
        lander.coords = outpost;
        let mut scout = make_ship("Scout", ShipClass::Transport, 1);
        scout.coords = Coords::new(15, 12, 5);
        scout.status = ShipStatus::InDeepSpace;
        let mut escort = make_ship("Escort", ShipClass::Escort, 2);
        escort.coords = Coords::new(15, 12, 5).with_orbit(1);
        let mut lost = make_ship("Lost", ShipClass::Escort, 2);
        lost.status = ShipStatus::ForcedJump;
        let mut parked = make_ship("Parked", ShipClass::Escort, 2);
        parked.coords = Coords::new(1, 1, 1).with_orbit(99);
        species.ships = vec![scout, lander, escort, lost, parked];

        let mut out = String::new();
        let mut listed = Listed::default();
        write_other_planets_and_ships(&mut out, &species, &mut listed, false).unwrap();
        assert!(out.contains("\n\nOther planets and ships:\n\n"));
        assert!(out.contains("  15 12  5 #2\tPL Outpost, 5 CU\n\t\tTR1 Lander (A0,O)\n"));
        assert!(out.contains("  15 12  5\tTR1 Scout (A0,D)\n\t\tES Escort (A0,O)\n"));
        assert!(out.contains("  ?? ?? ??\tES Lost (A0,FJ)\n"));
        assert!(!out.contains("Parked"));
        assert!(!out.contains("Home 1"));
    }

    #[test]
    fn nothing_to_list_prints_nothing() {
        let galaxy = two_species_galaxy(&mut make_rng());
        let species = galaxy.species[0].clone();
        let mut out = String::new();
        write_other_planets_and_ships(&mut out, &species, &mut Listed::default(), false).unwrap();
        assert!(out.is_empty());
    }
}
