//! Economic efficiency, colony production and fleet maintenance.

use ahash::AHashMap;

use crate::error::TurnError;
use crate::life_support::{production_penalty, LifeSupport};
use crate::{ColonyKind, Coords, Galaxy, Item, NamedPlanet, Planet, Ship, ShipStatus, Species, Tech};

/// Combined economic base a planet supports at full efficiency.
pub const EFFICIENT_BASE: i64 = 2000;

/// Efficiency percentage for a planet carrying `base` economic base.
pub fn efficiency(base: i64) -> i64 {
    if base <= EFFICIENT_BASE {
        100
    } else {
        let excess = base - EFFICIENT_BASE;
        100 * (excess / 20 + EFFICIENT_BASE) / base
    }
}

pub fn apply_mining_difficulty_increases(galaxy: &mut Galaxy) {
    for star in galaxy.systems_mut() {
        for planet in &mut star.planets {
            planet.mining_difficulty += planet.mining_difficulty_increase;
            planet.mining_difficulty_increase = 0;
        }
    }
}

pub fn update_efficiency(galaxy: &mut Galaxy, econ_base: &AHashMap<Coords, i64>) {
    for star in galaxy.systems_mut() {
        let at = star.coords;
        for planet in &mut star.planets {
            let base = econ_base
                .get(&at.with_orbit(planet.orbit))
                .copied()
                .unwrap_or(0);
            planet.econ_efficiency = efficiency(base);
        }
    }
}

/// What a colony produces this turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Production {
    pub ls_needed: i64,
    /// Percent of output lost to the LSN shortfall.
    pub penalty: i64,
    /// Raw material units mined, after the penalty.
    pub raw_material: i64,
    /// Manufacturing capacity, after the penalty.
    pub capacity: i64,
    /// Economic units produced, after efficiency.
    pub produced: i64,
    /// Share of `produced` that goes to fleet maintenance.
    pub maintenance: i64,
    /// Raw material that exceeds manufacturing capacity.
    pub excess_raw_material: i64,
}

impl Production {
    pub fn to_spend(&self) -> i64 {
        self.produced - self.maintenance
    }
}

pub fn colony_production(
    species: &Species,
    colony: &NamedPlanet,
    planet: &Planet,
    ls_needed: i64,
) -> Production {
    let penalty = production_penalty(ls_needed, species.level(Tech::LifeSupport));
    let md = planet.mining_difficulty.max(1);
    let mut raw_material = 10 * species.level(Tech::Mining) * colony.mi_base / md;
    raw_material -= penalty * raw_material / 100;
    let mut capacity = species.level(Tech::Manufacturing) * colony.ma_base / 10;
    capacity -= penalty * capacity / 100;
    let stock = raw_material + colony.items.get(Item::RawMaterial);
    let gross = match colony.kind {
        ColonyKind::MiningColony => 2 * raw_material / 3,
        ColonyKind::ResortColony => 2 * capacity / 3,
        _ => stock.min(capacity),
    };
    let produced = (planet.econ_efficiency * gross + 50) / 100;
    Production {
        ls_needed,
        penalty,
        raw_material,
        capacity,
        produced,
        maintenance: (species.fleet_percent_cost.min(10_000) * produced + 5000) / 10_000,
        excess_raw_material: (stock - capacity).max(0),
    }
}

/// Ships still on the map pay upkeep, including those under construction.
fn counts_for_upkeep(ship: &Ship) -> bool {
    !ship.coords.is_off_map() && ship.status != ShipStatus::Destroyed
}

/// Fleet upkeep after the military-tech discount of one percent per two
/// whole ML levels.
pub fn fleet_maintenance(species: &Species) -> i64 {
    let cost: i64 = species
        .ships
        .iter()
        .filter(|s| counts_for_upkeep(s))
        .map(Ship::maintenance_cost)
        .sum();
    let discount = species.level(Tech::Military) / 2;
    (cost - discount * cost / 100).max(0)
}

/// Total economic output of all the species' colonies.
pub fn total_production(galaxy: &Galaxy, species: &Species) -> Result<i64, TurnError> {
    let ls = LifeSupport::for_species(galaxy, species)?;
    let mut total = 0;
    for colony in &species.colonies {
        if colony.coords.is_off_map() || colony.kind == ColonyKind::Disbanded {
            continue;
        }
        let planet = galaxy
            .planet(colony.coords)
            .ok_or_else(|| missing_planet(species, colony))?;
        let mut production = colony_production(species, colony, planet, ls.needed(planet));
        production.maintenance = 0;
        total += production.produced;
    }
    Ok(total)
}

/// Stores each species' fleet cost and its share of production in
/// hundredths of a percent. The share is not capped and may exceed 10000.
pub fn update_fleet_costs(galaxy: &mut Galaxy) -> Result<(), TurnError> {
    let mut costs = Vec::with_capacity(galaxy.species.len());
    for species in &galaxy.species {
        let cost = fleet_maintenance(species);
        let production = total_production(galaxy, species)?;
        let percent = if production == 0 {
            10_000
        } else {
            10_000 * cost / production
        };
        costs.push((cost, percent));
    }
    for (species, (cost, percent)) in galaxy.species.iter_mut().zip(costs) {
        species.fleet_cost = cost;
        species.fleet_percent_cost = percent;
    }
    Ok(())
}

pub(crate) fn missing_planet(species: &Species, colony: &NamedPlanet) -> TurnError {
    TurnError::MissingPlanet {
        species: species.name.clone(),
        colony: colony.name.clone(),
        coords: colony.coords.id(),
    }
}
