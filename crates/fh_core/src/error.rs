//! Error types for galaxy setup, generation, turn processing and reporting.

use std::fmt;

/// Invalid galaxy setup parameters.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("invalid galaxy name {0:?}")]
    InvalidGalaxyName(String),
    #[error("number of species must be at most {max}, got {got}")]
    TooManySpecies { got: usize, max: usize },
    #[error("unknown density {0:?}: expected sparse, normal or high")]
    UnknownDensity(String),
    #[error("minimum distance must be between 1 and 50 parsecs, got {0}")]
    MinimumDistance(i64),
}

/// One problem found in the player list.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlayerError {
    #[error("player {index}: {field} {value:?} is not a valid name")]
    InvalidName {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("player {index}: {field} {value:?} must be {min} to {max} characters")]
    NameLength {
        index: usize,
        field: &'static str,
        value: String,
        min: usize,
        max: usize,
    },
    #[error("player {index}: {field} {value:?} contains a forbidden character")]
    ForbiddenCharacter {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("player {index}: duplicate {field} {value:?}")]
    Duplicate {
        index: usize,
        field: &'static str,
        value: String,
    },
    #[error("player {index}: email must not be blank")]
    MissingEmail { index: usize },
    #[error("player {index}: tech levels must not be negative")]
    NegativeTech { index: usize },
    #[error("player {index}: ML + GV + LS + BI must total 15, got {total}")]
    TechTotal { index: usize, total: i64 },
}

/// Every problem found in the player list, collected in player order.
#[derive(Debug, PartialEq, Eq)]
pub struct PlayerErrors(pub Vec<PlayerError>);

impl fmt::Display for PlayerErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} invalid player record(s)", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for PlayerErrors {}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("galaxy radius {radius} is outside {min}..={max} parsecs")]
    RadiusOutOfRange { radius: i32, min: i32, max: i32 },
    #[error("{stars} stars in a radius of {radius} parsecs is too sparse or too dense")]
    DensityOutOfRange { stars: usize, radius: i32 },
    #[error("placed only {placed} of {wanted} systems before running out of attempts")]
    PlacementExhausted { placed: usize, wanted: usize },
    #[error("no home system template with {planets} planets found")]
    TemplateExhausted { planets: usize },
    #[error("all suitable systems are within {min_distance} parsecs of each other")]
    NoHomeSystem { min_distance: i64 },
    #[error("home planet of SP {species} has no {gas}")]
    MissingRequiredGas { species: String, gas: &'static str },
    #[error("home system of SP {species} has no ideal home planet")]
    MissingHomePlanet { species: String },
    #[error("formatting generation text")]
    Format(#[from] fmt::Error),
}

/// Internal-consistency violations found while processing a turn.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("SP {species} PL {colony} refers to missing planet {coords}")]
    MissingPlanet {
        species: String,
        colony: String,
        coords: String,
    },
    #[error("SP {species} has no home planet at {coords}")]
    MissingHomePlanet { species: String, coords: String },
    #[error("siege detection entry has unknown code {0}")]
    UnknownSiegeDetection(i64),
    #[error("ledger entry refers to unknown tech code {0}")]
    UnknownTech(i64),
    #[error("ledger entry refers to unknown item code {0}")]
    UnknownItem(i64),
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("unknown species {0}")]
    UnknownSpecies(u32),
    #[error(transparent)]
    Consistency(#[from] TurnError),
    #[error("destroyed ship {0} is still listed")]
    DestroyedShip(String),
    #[error("formatting report text")]
    Format(#[from] fmt::Error),
}
