//! Where each species has a presence, and who can see whom.

use ahash::AHashSet;

use crate::{Coords, Galaxy, ShipStatus, Species};

/// One species present in one star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub species: u32,
    /// System coordinates; the orbit is always zero.
    pub at: Coords,
}

fn ship_is_present(status: ShipStatus) -> bool {
    !matches!(
        status,
        ShipStatus::ForcedJump | ShipStatus::JumpedInCombat | ShipStatus::Destroyed
    )
}

/// Every system each species occupies, one entry per species and system,
/// in species order.
pub fn collect_locations(galaxy: &Galaxy) -> Vec<Location> {
    let mut seen = AHashSet::new();
    let mut locations = Vec::new();
    for species in &galaxy.species {
        let colonies = species
            .colonies
            .iter()
            .filter(|c| c.populated && !c.coords.is_off_map())
            .map(|c| c.coords);
        let ships = species
            .ships
            .iter()
            .filter(|s| !s.coords.is_off_map() && ship_is_present(s.status))
            .map(|s| s.coords);
        for at in colonies.chain(ships) {
            let location = Location {
                species: species.number,
                at: at.system(),
            };
            if seen.insert(location) {
                locations.push(location);
            }
        }
    }
    locations
}

/// Whether `observer` can see `alien` in the system at `at`.
///
/// Undistorted ships in orbit or deep space are always visible. Colonies are
/// visible unless hidden, and hidden ones still are to an observer with a
/// populated colony on the same planet.
pub fn alien_is_visible(alien: &Species, observer: &Species, at: Coords) -> bool {
    let ship_seen = alien.ships.iter().any(|s| {
        s.coords.same_system(at)
            && matches!(s.status, ShipStatus::InOrbit | ShipStatus::InDeepSpace)
            && !s.is_distorted()
    });
    if ship_seen {
        return true;
    }
    alien
        .colonies
        .iter()
        .filter(|c| c.populated && c.coords.same_system(at))
        .any(|c| {
            !c.hidden
                || observer
                    .colonies
                    .iter()
                    .any(|mine| mine.populated && mine.coords.same_planet(c.coords))
        })
}

/// Record first contacts between species sharing a system.
pub fn update_contacts(galaxy: &mut Galaxy, locations: &[Location]) {
    let mut met = Vec::new();
    for a in locations {
        for b in locations {
            if a.species == b.species || !a.at.same_system(b.at) {
                continue;
            }
            let (Some(observer), Some(alien)) = (galaxy.species(a.species), galaxy.species(b.species))
            else {
                continue;
            };
            if !observer.contact.contains(b.species) && alien_is_visible(alien, observer, a.at) {
                met.push((a.species, b.species));
            }
        }
    }
    for (observer, alien) in met {
        if let Some(species) = galaxy.species.iter_mut().find(|s| s.number == observer) {
            species.contact.insert(alien);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, make_ship, two_species_galaxy};
    use crate::{ColonyKind, NamedPlanet, ShipClass};

    #[test]
    fn locations_are_deduplicated() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let home = galaxy.species[0].home;
        let mut ship = make_ship("Scout", ShipClass::Destroyer, 5);
        ship.coords = home;
        galaxy.species[0].ships.push(ship.clone());
        ship.name = "Picket".into();
        galaxy.species[0].ships.push(ship);
        let first: Vec<_> = collect_locations(&galaxy)
            .into_iter()
            .filter(|l| l.species == galaxy.species[0].number)
            .collect();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].at, home.system());
    }

    #[test]
    fn hidden_colony_seen_only_from_same_planet() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let at = galaxy.species[0].home;
        let hidden = NamedPlanet {
            name: "Burrow".into(),
            coords: at,
            kind: ColonyKind::Colony,
            populated: true,
            hidden: true,
            ..NamedPlanet::default()
        };
        galaxy.species[1].colonies = vec![hidden];
        galaxy.species[1].ships.clear();
        let (observer, alien) = (&galaxy.species[0], &galaxy.species[1]);
        assert!(alien_is_visible(alien, observer, at.system()));

        let mut elsewhere = galaxy.species[0].clone();
        elsewhere.colonies.clear();
        assert!(!alien_is_visible(alien, &elsewhere, at.system()));
    }

    #[test]
    fn visible_ship_creates_contact() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let target = galaxy.species[0].home;
        let mut ship = make_ship("Visitor", ShipClass::Destroyer, 5);
        ship.coords = target;
        galaxy.species[1].ships.push(ship);
        let locations = collect_locations(&galaxy);
        update_contacts(&mut galaxy, &locations);
        let (a, b) = (galaxy.species[0].number, galaxy.species[1].number);
        assert!(galaxy.species[0].contact.contains(b));
        // The visitor sees the home colony too.
        assert!(galaxy.species[1].contact.contains(a));
    }
}
