//! Shared test fixtures for fh_core and downstream crates.
//!
//! `base_galaxy()` runs the full generator over `small_config()` and
//! `small_players(3)`. `two_species_galaxy()` is a hand-built pair of home
//! systems 20 parsecs apart, for turn and report tests that need exact
//! planets.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::dice::generate_uuid;
use crate::generator::{create_species, generate_galaxy};
use crate::setup::{Density, GalaxyConfig, PlayerSetup};
use crate::{
    Coords, Galaxy, Gas, GasShare, GasTolerance, Inventory, JumpState, Planet, PlanetSpecial,
    Propulsion, Ship, ShipClass, ShipStatus, Star, StarColor, StarKind,
};

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

/// Earth: diameter 13, gravity 1.00, classes 10/10, MD 2.20,
/// N2 78% / O2 21% / CO2 1%.
pub fn earth_like_planet(orbit: i32) -> Planet {
    Planet {
        orbit,
        diameter: 13,
        gravity: 100,
        density: 554,
        temperature_class: 10,
        pressure_class: 10,
        mining_difficulty: 220,
        mining_difficulty_increase: 0,
        atmosphere: [
            (Gas::Nitrogen, 78),
            (Gas::Oxygen, 21),
            (Gas::CarbonDioxide, 1),
        ]
        .into_iter()
        .map(|(gas, percent)| GasShare { gas, percent })
        .collect(),
        econ_efficiency: 100,
        special: PlanetSpecial::IdealHome,
        message: None,
    }
}

/// A cold, airless rock.
pub fn barren_planet(orbit: i32) -> Planet {
    Planet {
        orbit,
        diameter: 5,
        gravity: 40,
        density: 500,
        temperature_class: 3,
        pressure_class: 0,
        mining_difficulty: 150,
        mining_difficulty_increase: 0,
        atmosphere: Default::default(),
        econ_efficiency: 100,
        special: PlanetSpecial::None,
        message: None,
    }
}

/// Oxygen breather comfortable on `earth_like_planet`: O2 10..=42%,
/// chlorine among the poisons.
pub fn oxygen_breather() -> GasTolerance {
    let neutral = vec![
        Gas::Hydrogen,
        Gas::Methane,
        Gas::Helium,
        Gas::Nitrogen,
        Gas::CarbonDioxide,
        Gas::Steam,
    ];
    let poison = Gas::ALL
        .into_iter()
        .filter(|g| *g != Gas::Oxygen && !neutral.contains(g))
        .collect();
    GasTolerance {
        required: Gas::Oxygen,
        required_min: 10,
        required_max: 42,
        neutral,
        poison,
    }
}

/// A new FTL ship in orbit at the origin.
pub fn make_ship(name: &str, class: ShipClass, tonnage: i64) -> Ship {
    Ship {
        name: name.to_string(),
        coords: Coords::default(),
        class,
        propulsion: Propulsion::Ftl,
        status: ShipStatus::InOrbit,
        tonnage,
        age: 0,
        remaining_cost: 0,
        items: Inventory::default(),
        just_jumped: JumpState::None,
        arrived_via_wormhole: false,
        dest: None,
        loading_point: None,
        unloading_point: None,
        auto_jump_target: None,
    }
}

/// Three species, normal density, homes at least 4 parsecs apart.
pub fn small_config() -> GalaxyConfig {
    GalaxyConfig {
        name: "Testbed".to_string(),
        species: 3,
        density: Density::Normal,
        large_cluster: false,
        forbid_nearby_wormholes: false,
        min_distance: 4,
        min_radius: 1,
        max_radius: 50,
        radius_override: None,
        stars_override: None,
    }
}

/// `n` valid players with unique names and balanced techs.
pub fn small_players(n: usize) -> Vec<PlayerSetup> {
    (1..=n)
        .map(|i| PlayerSetup {
            email: format!("player{i}@example.com"),
            species_name: format!("Species {i}"),
            home_system_name: format!("Sol {i}"),
            home_planet_name: format!("Home {i}"),
            government_name: format!("Council {i}"),
            government_type: "Democracy".to_string(),
            military_level: 4,
            gravitics_level: 4,
            life_support_level: 4,
            biology_level: 3,
            auto_orders: false,
        })
        .collect()
}

/// A generated galaxy for `small_config()` with three species.
pub fn base_galaxy(rng: &mut ChaCha8Rng) -> Galaxy {
    generate_galaxy(&small_config(), &small_players(3), rng)
        .expect("small galaxy generates")
        .galaxy
}

fn home_system(at: Coords) -> Star {
    Star {
        coords: at,
        kind: StarKind::MainSequence,
        color: StarColor::Yellow,
        size: 5,
        planets: vec![
            barren_planet(1),
            earth_like_planet(2),
            earth_like_planet(3),
            barren_planet(4),
        ],
        wormhole: None,
        visited_by: BTreeSet::new(),
        home_species: None,
        potential_home: false,
        message: None,
    }
}

/// Two species on identical home systems at (5, 5, 5) and (25, 5, 5),
/// homes on orbit 3, plus an empty system between them.
pub fn two_species_galaxy(rng: &mut ChaCha8Rng) -> Galaxy {
    let mut galaxy = Galaxy::new(generate_uuid(rng), "Pair".to_string(), 15, 2);
    let mut empty = home_system(Coords::new(15, 12, 5));
    empty.planets.truncate(2);
    galaxy.add_system(empty);
    let players = small_players(2);
    for (number, (player, at)) in (1u32..).zip(players.iter().zip([
        Coords::new(5, 5, 5),
        Coords::new(25, 5, 5),
    ])) {
        let mut star = home_system(at);
        star.home_species = Some(number);
        star.visited_by.insert(number);
        galaxy.add_system(star);
        let species = create_species(&galaxy, number, player, at.with_orbit(3), rng)
            .expect("fixture species");
        galaxy.species.push(species);
    }
    galaxy
}
