use crate::text::EventLog;
use crate::{ColonyKind, Item, Ship, ShipStatus, Species, Tech};

/// Hulls older than this are worth nothing as salvage.
const SALVAGE_LIFETIME: i64 = 60;

/// Ships on a disbanded planet go down with it: surface ships, ships
/// still under construction and starbases in orbit.
fn goes_with_planet(ship: &Ship) -> bool {
    match ship.status {
        ShipStatus::OnSurface | ShipStatus::UnderConstruction => true,
        ShipStatus::InOrbit => ship.is_starbase(),
        _ => false,
    }
}

pub fn ship_salvage(ship: &Ship) -> i64 {
    let cost = ship.original_cost();
    if ship.status == ShipStatus::UnderConstruction {
        (cost - ship.remaining_cost) / 4
    } else {
        3 * cost * (SALVAGE_LIFETIME - ship.age).max(0) / 400
    }
}

/// Value of `quantity` units left on a disbanded planet.
pub fn item_salvage(item: Item, quantity: i64, biology: i64) -> i64 {
    match item {
        Item::RawMaterial => quantity / 10,
        Item::TerraformingPlant => {
            let divisor = if biology == 0 { 100 } else { biology };
            quantity * item.cost() / divisor / 4
        }
        _ => quantity * item.cost() / 4,
    }
}

/// Convert disbanded colonies and the ships that go down with them into
/// economic units, then drop them and any destroyed ships.
pub fn salvage_disbanded(species: &mut Species, log: &mut EventLog) {
    let biology = species.level(Tech::Biology);
    let Species {
        colonies,
        ships,
        econ_units,
        ..
    } = species;
    for colony in colonies
        .iter_mut()
        .filter(|c| c.kind == ColonyKind::Disbanded && !c.coords.is_off_map())
    {
        let at = colony.coords;
        let mut salvage = 0;
        for ship in ships
            .iter_mut()
            .filter(|s| s.coords.same_planet(at) && goes_with_planet(s))
        {
            for (item, quantity) in ship.items.drain() {
                colony.items.add(item, quantity);
            }
            salvage += ship_salvage(ship);
            ship.status = ShipStatus::Destroyed;
        }
        for (item, quantity) in colony.items.drain() {
            salvage += item_salvage(item, quantity, biology);
        }
        *econ_units += salvage;
        log.event_fmt(format_args!(
            "  PL {} was disbanded, generating {salvage} economic units in salvage.\n",
            colony.name
        ));
    }
    colonies.retain(|c| c.kind != ColonyKind::Disbanded);
    ships.retain(|s| s.status != ShipStatus::Destroyed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, make_ship, two_species_galaxy};
    use crate::{NamedPlanet, ShipClass};

    #[test]
    fn terraforming_plants_scale_with_biology() {
        assert_eq!(item_salvage(Item::TerraformingPlant, 2, 0), 2 * 500 / 4);
        assert_eq!(item_salvage(Item::TerraformingPlant, 2, 50), 2 * 1000 / 4);
        // The quantity multiplies before the biology division.
        assert_eq!(item_salvage(Item::TerraformingPlant, 3, 7), 5357);
        assert_eq!(item_salvage(Item::RawMaterial, 95, 10), 9);
        assert_eq!(item_salvage(Item::Colonist, 40, 10), 10);
    }

    #[test]
    fn disbanded_colony_is_salvaged() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let species = &mut galaxy.species[0];
        let at = species.home.system().with_orbit(species.home.orbit + 1);
        species.colonies.push(NamedPlanet {
            name: "Outpost".into(),
            coords: at,
            kind: ColonyKind::Disbanded,
            items: [(Item::Colonist, 40)].into(),
            ..NamedPlanet::default()
        });

        let mut landed = make_ship("Lander", ShipClass::Destroyer, 15);
        landed.coords = at;
        landed.status = ShipStatus::OnSurface;
        landed.age = 20;
        landed.items.set(Item::RawMaterial, 100);
        let mut orbiting = landed.clone();
        orbiting.name = "Watcher".into();
        orbiting.status = ShipStatus::InOrbit;
        species.ships = vec![landed, orbiting];
        let before = species.econ_units;

        let mut log = EventLog::default();
        salvage_disbanded(species, &mut log);

        // 3 * 1500 * 40 / 400 for the hull, 10 for colonists, 10 for RM.
        let expected = 450 + 10 + 10;
        assert_eq!(species.econ_units, before + expected);
        assert!(species.colonies.iter().all(|c| c.name != "Outpost"));
        assert_eq!(species.ships.len(), 1);
        assert_eq!(species.ships[0].name, "Watcher");
        assert!(log.into_text().contains(&format!(
            "  PL Outpost was disbanded, generating {expected} economic units in salvage.\n"
        )));
    }
}
