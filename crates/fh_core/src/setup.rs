//! Galaxy setup and player records, with their validation rules.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, PlayerErrors, SetupError};

pub const MIN_SPECIES: usize = 1;
pub const MAX_SPECIES: usize = 100;
pub const MIN_RADIUS: i32 = 6;
pub const MAX_RADIUS: i32 = 50;
pub const MIN_STARS: usize = 12;
pub const MAX_STARS: usize = 1000;

const MAX_NAME_LEN: usize = 31;
const MIN_SPECIES_NAME_LEN: usize = 5;
const FORBIDDEN_CHARS: &[char] = &['$', '!', '`', '"', '{', '}', '\\'];

// ---------------------------------------------------------------------------
// setup.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupFile {
    pub is_verbose: bool,
    pub number_of_species: i64,
    pub galaxy: GalaxySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxySection {
    pub path: String,
    pub name: String,
    pub overrides: Overrides,
    pub large_cluster: bool,
    pub density: String,
    pub forbid_nearby_wormholes: bool,
    pub minimum_distance: i64,
    pub radius: RadiusBounds,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overrides {
    pub use_overrides: bool,
    pub radius: i32,
    pub number_of_stars: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusBounds {
    pub minimum: i32,
    pub maximum: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Sparse,
    Normal,
    High,
}

impl Density {
    fn parse(s: &str) -> Result<Density, SetupError> {
        match s {
            "" | "normal" => Ok(Density::Normal),
            "sparse" => Ok(Density::Sparse),
            "high" => Ok(Density::High),
            other => Err(SetupError::UnknownDensity(other.to_string())),
        }
    }

    /// Systems generated per species.
    pub fn systems_per_species(self) -> usize {
        match self {
            Density::Sparse => 4,
            Density::Normal => 6,
            Density::High => 9,
        }
    }
}

/// Normalised generator parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalaxyConfig {
    pub name: String,
    pub species: usize,
    pub density: Density,
    pub large_cluster: bool,
    pub forbid_nearby_wormholes: bool,
    pub min_distance: i64,
    pub min_radius: i32,
    pub max_radius: i32,
    pub radius_override: Option<i32>,
    pub stars_override: Option<usize>,
}

impl SetupFile {
    pub fn validate(&self) -> Result<GalaxyConfig, SetupError> {
        let g = &self.galaxy;
        if !is_valid_name(&g.name) {
            return Err(SetupError::InvalidGalaxyName(g.name.clone()));
        }
        let species = usize::try_from(self.number_of_species)
            .unwrap_or(0)
            .max(MIN_SPECIES);
        if species > MAX_SPECIES {
            return Err(SetupError::TooManySpecies {
                got: species,
                max: MAX_SPECIES,
            });
        }
        if !(1..=50).contains(&g.minimum_distance) {
            return Err(SetupError::MinimumDistance(g.minimum_distance));
        }
        let min_radius = g.radius.minimum.max(1);
        let max_radius = if g.radius.maximum < min_radius {
            MAX_RADIUS
        } else {
            g.radius.maximum
        };
        let overrides = &g.overrides;
        Ok(GalaxyConfig {
            name: g.name.clone(),
            species,
            density: Density::parse(&g.density)?,
            large_cluster: g.large_cluster,
            forbid_nearby_wormholes: g.forbid_nearby_wormholes,
            min_distance: g.minimum_distance,
            min_radius,
            max_radius,
            radius_override: (overrides.use_overrides && overrides.radius != 0)
                .then_some(overrides.radius),
            stars_override: (overrides.use_overrides && overrides.number_of_stars != 0)
                .then_some(overrides.number_of_stars),
        })
    }
}

// ---------------------------------------------------------------------------
// players.json
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    pub email: String,
    pub species_name: String,
    pub home_system_name: String,
    pub home_planet_name: String,
    pub government_name: String,
    pub government_type: String,
    pub military_level: i64,
    pub gravitics_level: i64,
    pub life_support_level: i64,
    pub biology_level: i64,
    pub auto_orders: bool,
}

impl PlayerSetup {
    pub fn tech_total(&self) -> i64 {
        self.military_level + self.gravitics_level + self.life_support_level + self.biology_level
    }
}

/// Letters, digits, space, `.`, `'` and `-`; not blank; no surrounding space.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name.trim() == name
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '.' | '\'' | '-'))
}

/// Validate the whole player list, reporting every problem found.
pub fn validate_players(players: &[PlayerSetup]) -> Result<(), PlayerErrors> {
    let mut errors = Vec::new();
    let mut seen: [AHashSet<String>; 4] = Default::default();
    for (i, p) in players.iter().enumerate() {
        let index = i + 1;
        if p.email.trim().is_empty() {
            errors.push(PlayerError::MissingEmail { index });
        }
        check_name(&mut errors, index, "species name", &p.species_name, MIN_SPECIES_NAME_LEN);
        check_name(&mut errors, index, "home system name", &p.home_system_name, 1);
        check_name(&mut errors, index, "home planet name", &p.home_planet_name, 1);
        check_name(&mut errors, index, "government name", &p.government_name, 1);
        check_name(&mut errors, index, "government type", &p.government_type, 1);
        let keyed = [
            ("email", &p.email),
            ("species name", &p.species_name),
            ("home system name", &p.home_system_name),
            ("home planet name", &p.home_planet_name),
        ];
        for (set, (field, value)) in seen.iter_mut().zip(keyed) {
            if !value.is_empty() && !set.insert(value.to_lowercase()) {
                errors.push(PlayerError::Duplicate {
                    index,
                    field,
                    value: value.clone(),
                });
            }
        }
        check_techs(&mut errors, index, p);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PlayerErrors(errors))
    }
}

fn check_name(
    errors: &mut Vec<PlayerError>,
    index: usize,
    field: &'static str,
    value: &str,
    min: usize,
) {
    if value.contains(FORBIDDEN_CHARS) {
        errors.push(PlayerError::ForbiddenCharacter {
            index,
            field,
            value: value.to_string(),
        });
    } else if !is_valid_name(value) {
        errors.push(PlayerError::InvalidName {
            index,
            field,
            value: value.to_string(),
        });
    }
    let len = value.chars().count();
    if len < min || len > MAX_NAME_LEN {
        errors.push(PlayerError::NameLength {
            index,
            field,
            value: value.to_string(),
            min,
            max: MAX_NAME_LEN,
        });
    }
}

fn check_techs(errors: &mut Vec<PlayerError>, index: usize, p: &PlayerSetup) {
    let levels = [
        p.military_level,
        p.gravitics_level,
        p.life_support_level,
        p.biology_level,
    ];
    if levels.iter().any(|&l| l < 0) {
        errors.push(PlayerError::NegativeTech { index });
    }
    let total = p.tech_total();
    if total != 15 {
        errors.push(PlayerError::TechTotal { index, total });
    }
}
