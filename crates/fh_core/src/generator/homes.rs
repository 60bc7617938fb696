//! Home system selection, home system conversion and species creation.

use rand::seq::SliceRandom;
use rand::Rng;

use super::star::{into_band, HOME_PLANETS};
use super::templates::Templates;
use crate::dice::roll;
use crate::error::GenerateError;
use crate::setup::{GalaxyConfig, PlayerSetup};
use crate::{
    ColonyKind, Coords, Galaxy, Gas, GasTolerance, NamedPlanet, Planet, PlanetSpecial, Species,
    SpeciesMask, Tech, TechTrack,
};

/// Population units of a freshly settled home planet.
pub const HOME_POPULATION: i64 = 1500;

const REQUIRED_GAS: Gas = Gas::Oxygen;
const GOOD_GASES: usize = 7;

/// Pick a random system that can host a home world.
pub fn pick_home_system(
    galaxy: &Galaxy,
    min_distance: i64,
    rng: &mut impl Rng,
) -> Result<Coords, GenerateError> {
    let forbidden: Vec<Coords> = galaxy
        .systems()
        .iter()
        .filter(|s| s.home_species.is_some() || s.wormhole.is_some())
        .map(|s| s.coords)
        .collect();
    let mut candidates: Vec<Coords> = galaxy
        .systems()
        .iter()
        .filter(|s| s.planets.len() >= 3 && s.home_species.is_none() && s.wormhole.is_none())
        .map(|s| s.coords)
        .collect();
    candidates.shuffle(rng);
    candidates
        .into_iter()
        .find(|c| !forbidden.iter().any(|f| f.closer_than(*c, min_distance)))
        .ok_or(GenerateError::NoHomeSystem { min_distance })
}

/// Replace the system's planets with a perturbed copy of the home template
/// and return the home planet's coordinates.
pub fn convert_to_home_system(
    galaxy: &mut Galaxy,
    at: Coords,
    species: u32,
    templates: &Templates,
    rng: &mut impl Rng,
) -> Result<Coords, GenerateError> {
    let star = galaxy
        .system_mut(at)
        .ok_or(GenerateError::NoHomeSystem { min_distance: 0 })?;
    let count = i64::try_from(star.planets.len()).unwrap_or(0);
    let count = into_band(rng, count, &HOME_PLANETS);
    let template = templates
        .get(count)
        .ok_or(GenerateError::TemplateExhausted { planets: count })?;
    star.planets = template.clone();
    for planet in &mut star.planets {
        perturb(rng, planet);
    }
    star.home_species = Some(species);
    star.potential_home = true;
    star.visited_by.insert(species);
    star.planets
        .iter()
        .find(|p| p.special == PlanetSpecial::IdealHome)
        .map(|p| star.coords.with_orbit(p.orbit))
        .ok_or_else(|| GenerateError::MissingHomePlanet {
            species: species.to_string(),
        })
}

fn drift(rng: &mut impl Rng, value: i64, above: i64) -> i64 {
    if value > above {
        value - (roll(rng, 3) - 1)
    } else {
        value + (roll(rng, 3) - 1)
    }
}

fn perturb(rng: &mut impl Rng, planet: &mut Planet) {
    if planet.temperature_class != 0 {
        planet.temperature_class = drift(rng, planet.temperature_class, 12);
    }
    if planet.pressure_class != 0 {
        planet.pressure_class = drift(rng, planet.pressure_class, 12);
    }
    if planet.atmosphere.len() > 2 {
        let j = roll(rng, 25) + 10;
        if planet.atmosphere[2].percent > 50 {
            planet.atmosphere[1].percent += j;
            planet.atmosphere[2].percent -= j;
        } else if planet.atmosphere[1].percent > 50 {
            planet.atmosphere[1].percent -= j;
            planet.atmosphere[2].percent += j;
        }
    }
    planet.diameter = drift(rng, planet.diameter, 12);
    planet.gravity = if planet.gravity > 100 {
        planet.gravity - roll(rng, 10)
    } else {
        planet.gravity + roll(rng, 10)
    };
    planet.mining_difficulty = if planet.mining_difficulty > 100 {
        planet.mining_difficulty - roll(rng, 10)
    } else {
        planet.mining_difficulty + roll(rng, 10)
    };
}

/// Gas tolerances derived from the home planet's atmosphere.
pub fn gas_tolerance(
    home: &Planet,
    species_name: &str,
    rng: &mut impl Rng,
) -> Result<GasTolerance, GenerateError> {
    let pct = home.gas_percent(REQUIRED_GAS);
    if pct == 0 {
        return Err(GenerateError::MissingRequiredGas {
            species: species_name.to_string(),
            gas: REQUIRED_GAS.symbol(),
        });
    }
    let mut max = 2 * pct;
    if max < 20 {
        max += 20;
    }
    let mut neutral: Vec<Gas> = home
        .atmosphere
        .iter()
        .map(|s| s.gas)
        .chain([Gas::Helium, Gas::Steam])
        .filter(|g| *g != REQUIRED_GAS)
        .collect();
    neutral.sort();
    neutral.dedup();
    while neutral.len() + 1 < GOOD_GASES {
        if let Some(gas) = Gas::from_number(roll(rng, 13)) {
            if gas != REQUIRED_GAS && !neutral.contains(&gas) {
                neutral.push(gas);
            }
        }
    }
    neutral.sort();
    let poison = Gas::ALL
        .into_iter()
        .filter(|g| *g != REQUIRED_GAS && !neutral.contains(g))
        .collect();
    Ok(GasTolerance {
        required: REQUIRED_GAS,
        required_min: (pct / 2).max(1),
        required_max: max.min(100),
        neutral,
        poison,
    })
}

/// Create a species settled on `home`, with starting bases derived from
/// the home planet's mining difficulty.
pub fn create_species(
    galaxy: &Galaxy,
    number: u32,
    player: &PlayerSetup,
    home: Coords,
    rng: &mut impl Rng,
) -> Result<Species, GenerateError> {
    let planet = galaxy
        .planet(home)
        .ok_or_else(|| GenerateError::MissingHomePlanet {
            species: player.species_name.clone(),
        })?;
    let gases = gas_tolerance(planet, &player.species_name, rng)?;
    let mut techs = [TechTrack::default(); 6];
    for (tech, level) in [
        (Tech::Mining, 10),
        (Tech::Manufacturing, 10),
        (Tech::Military, player.military_level),
        (Tech::Gravitics, player.gravitics_level),
        (Tech::LifeSupport, player.life_support_level),
        (Tech::Biology, player.biology_level),
    ] {
        techs[tech.index()] = TechTrack::starting(level);
    }
    let mi = techs[Tech::Mining.index()].level;
    let ma = techs[Tech::Manufacturing.index()].level;
    let n = 25 * (mi + ma) + 3 * roll(rng, mi + ma);
    let colony = NamedPlanet {
        name: player.home_planet_name.clone(),
        coords: home,
        kind: ColonyKind::Home,
        populated: true,
        shipyards: 1,
        mi_base: n * planet.mining_difficulty / (10 * mi),
        ma_base: 10 * n / ma,
        pop_units: HOME_POPULATION,
        ..NamedPlanet::default()
    };
    let designed = galaxy.designed_species;
    Ok(Species {
        number,
        name: player.species_name.clone(),
        government_name: player.government_name.clone(),
        government_type: player.government_type.clone(),
        home,
        techs,
        gases,
        auto_orders: player.auto_orders,
        econ_units: 0,
        hp_original_base: colony.econ_base(),
        fleet_cost: 0,
        fleet_percent_cost: 0,
        contact: SpeciesMask::sized(designed),
        ally: SpeciesMask::sized(designed),
        enemy: SpeciesMask::sized(designed),
        colonies: vec![colony],
        ships: Vec::new(),
    })
}

/// Settle every player in turn: pick a system, convert it, create the species.
pub fn settle_players(
    galaxy: &mut Galaxy,
    config: &GalaxyConfig,
    players: &[PlayerSetup],
    templates: &Templates,
    rng: &mut impl Rng,
) -> Result<(), GenerateError> {
    for (number, player) in (1u32..).zip(players) {
        let system = pick_home_system(galaxy, config.min_distance, rng)?;
        let home = convert_to_home_system(galaxy, system, number, templates, rng)?;
        let species = create_species(galaxy, number, player, home, rng)?;
        galaxy.species.push(species);
    }
    Ok(())
}
