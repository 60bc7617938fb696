//! Galaxy generation: system placement, planets, home systems, wormholes.

mod homes;
mod planets;
mod scan;
mod star;
mod templates;
mod wormholes;

use std::fmt::Write;

use rand::Rng;

use crate::dice::{generate_uuid, lattice_point};
use crate::error::GenerateError;
use crate::life_support::LifeSupport;
use crate::setup::{GalaxyConfig, PlayerSetup, MAX_RADIUS, MAX_STARS, MIN_RADIUS, MIN_STARS};
use crate::{Galaxy, Species, Tech};

pub use homes::{
    convert_to_home_system, create_species, gas_tolerance, pick_home_system, HOME_POPULATION,
};
pub use planets::generate_planets;
pub use scan::scan_system;
pub use star::{into_band, roll_star, HOME_PLANETS, SYSTEM_PLANETS};
pub use templates::Templates;
pub use wormholes::{link_wormholes, MIN_WORMHOLE_LENGTH};

/// Minimum spacing between systems, in parsecs.
pub const MIN_SYSTEM_SPACING: i64 = 3;

const PLACEMENT_ATTEMPTS_PER_STAR: usize = 10_000;

/// A new galaxy plus the text produced while creating it.
#[derive(Debug, Clone)]
pub struct Generated {
    pub galaxy: Galaxy,
    /// Generation summary for the game master.
    pub summary: String,
    /// Home system scan per species number.
    pub scans: Vec<(u32, String)>,
}

/// Number of systems to place.
pub fn star_count(config: &GalaxyConfig) -> usize {
    config
        .stars_override
        .unwrap_or(config.species * config.density.systems_per_species())
        .clamp(MIN_STARS, MAX_STARS)
}

/// Smallest radius whose volume fits the species count, then bounded by
/// the setup's radius limits and override.
pub fn galaxy_radius(config: &GalaxyConfig) -> Result<i32, GenerateError> {
    let species = i64::try_from(config.species).unwrap_or(i64::MAX);
    let mut volume = species * 8000 / 15;
    if config.large_cluster {
        volume = volume * 3 / 2;
    }
    let mut radius = MIN_RADIUS;
    while i64::from(radius).pow(3) < volume && radius <= MAX_RADIUS {
        radius += 1;
    }
    radius = radius.max(config.min_radius).min(config.max_radius);
    if let Some(r) = config.radius_override {
        radius = r;
    }
    if (MIN_RADIUS..=MAX_RADIUS).contains(&radius) {
        Ok(radius)
    } else {
        Err(GenerateError::RadiusOutOfRange {
            radius,
            min: MIN_RADIUS,
            max: MAX_RADIUS,
        })
    }
}

/// Stars must be neither too sparse nor too dense for the radius.
pub fn check_density(stars: usize, radius: i32) -> Result<(), GenerateError> {
    let volume = 4 * 314 * i64::from(radius).pow(3) / 300;
    let chance = volume / i64::try_from(stars.max(1)).unwrap_or(1);
    if (50..=3200).contains(&chance) {
        Ok(())
    } else {
        Err(GenerateError::DensityOutOfRange { stars, radius })
    }
}

/// Place `stars` systems inside the galaxy sphere, at least
/// [`MIN_SYSTEM_SPACING`] parsecs apart.
pub fn place_systems(galaxy: &mut Galaxy, stars: usize, rng: &mut impl Rng) -> Result<(), GenerateError> {
    let center = galaxy.center();
    let limit = i64::from(galaxy.radius).pow(2) + 9;
    let mut attempts = stars * PLACEMENT_ATTEMPTS_PER_STAR;
    while galaxy.systems().len() < stars {
        if attempts == 0 {
            return Err(GenerateError::PlacementExhausted {
                placed: galaxy.systems().len(),
                wanted: stars,
            });
        }
        attempts -= 1;
        let at = lattice_point(rng, galaxy.radius);
        if at.distance_squared(center) > limit || galaxy.has_system(at) {
            continue;
        }
        let crowded = galaxy
            .systems()
            .iter()
            .any(|s| s.coords.closer_than(at, MIN_SYSTEM_SPACING));
        if !crowded {
            galaxy.add_system(roll_star(rng, at));
        }
    }
    Ok(())
}

/// Generate a galaxy for `players` from a validated setup.
///
/// Order of operations:
/// 1. Size the galaxy and place its systems.
/// 2. Build home system templates.
/// 3. Settle each player on a converted home system.
/// 4. Link natural wormholes.
/// 5. Render the summary and per-species home scans.
pub fn generate_galaxy(
    config: &GalaxyConfig,
    players: &[PlayerSetup],
    rng: &mut impl Rng,
) -> Result<Generated, GenerateError> {
    let radius = galaxy_radius(config)?;
    let stars = star_count(config);
    check_density(stars, radius)?;

    let designed = config.species.max(players.len());
    let mut galaxy = Galaxy::new(generate_uuid(rng), config.name.clone(), radius, designed);
    place_systems(&mut galaxy, stars, rng)?;

    let templates = Templates::build(rng)?;
    homes::settle_players(&mut galaxy, config, players, &templates, rng)?;
    link_wormholes(&mut galaxy, config, rng);

    let summary = summarize(&galaxy, players)?;
    let scans = home_scans(&galaxy)?;
    Ok(Generated {
        galaxy,
        summary,
        scans,
    })
}

/// The setup log each species starts with: a scan of its home system.
pub fn home_scans(galaxy: &Galaxy) -> Result<Vec<(u32, String)>, GenerateError> {
    let mut scans = Vec::with_capacity(galaxy.species.len());
    for species in &galaxy.species {
        let missing = || GenerateError::MissingHomePlanet {
            species: species.name.clone(),
        };
        let star = galaxy.system(species.home).ok_or_else(missing)?;
        let ls = LifeSupport::for_species(galaxy, species).map_err(|_| missing())?;
        let scan = scan_system(star, Some(&ls))?;
        scans.push((
            species.number,
            format!("\nScan of home star system for SP {}:\n\n{scan}\n", species.name),
        ));
    }
    Ok(scans)
}

fn summarize(galaxy: &Galaxy, players: &[PlayerSetup]) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Galaxy {} ({})", galaxy.name, galaxy.id)?;
    writeln!(out, "  radius = {} parsecs", galaxy.radius)?;
    writeln!(out, "  star systems = {}", galaxy.systems().len())?;
    writeln!(out, "  natural wormholes = {}\n", galaxy.wormhole_count())?;
    let mut histogram = [0usize; 10];
    for star in galaxy.systems() {
        histogram[star.planets.len().min(9)] += 1;
    }
    for (planets, systems) in histogram.iter().enumerate().filter(|(_, n)| **n > 0) {
        writeln!(out, "    {systems:3} systems have {planets} planets")?;
    }
    let center = galaxy.center();
    let furthest = galaxy
        .systems()
        .iter()
        .map(|s| s.coords.distance(center))
        .max()
        .unwrap_or(0);
    writeln!(out, "\nThe furthest system is {furthest} parsecs from the center.")?;
    for (species, player) in galaxy.species.iter().zip(players) {
        summarize_species(&mut out, galaxy, species, player)?;
    }
    Ok(out)
}

fn summarize_species(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    player: &PlayerSetup,
) -> std::fmt::Result {
    let Some(home) = species.colonies.first() else {
        return Ok(());
    };
    let md = galaxy
        .planet(species.home)
        .map_or(1, |p| p.mining_difficulty.max(1));
    write!(
        out,
        "\nSP {} (#{}): home system {} at {}, PL {}.\n",
        species.name, species.number, player.home_system_name, species.home, home.name
    )?;
    write!(
        out,
        "\tIn the first turn, {} raw material units will be produced,\n",
        10 * species.level(Tech::Mining) * home.mi_base / md
    )?;
    write!(
        out,
        "\tand the total production capacity will be {}.\n\n",
        species.level(Tech::Manufacturing) * home.ma_base / 10
    )
}
