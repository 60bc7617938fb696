//! On-disk shape of `galaxy.json`.
//!
//! Wormholes are stored once per link as `from`/`to` pairs sorted by system
//! key, so files diff cleanly between turns. Everything else is the core
//! model as-is.

use anyhow::{bail, Result};
use fh_core::{Coords, Galaxy, Species, Star};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WormholeLink {
    pub from: Coords,
    pub to: Coords,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalaxyFile {
    pub id: Uuid,
    pub name: String,
    pub radius: i32,
    pub designed_species: usize,
    /// Species names in species-number order.
    pub species_names: Vec<String>,
    pub systems: Vec<Star>,
    #[serde(default)]
    pub wormholes: Vec<WormholeLink>,
    pub species: Vec<Species>,
}

impl GalaxyFile {
    pub fn from_galaxy(galaxy: &Galaxy) -> GalaxyFile {
        let mut wormholes: Vec<WormholeLink> = galaxy
            .systems()
            .iter()
            .filter_map(|s| s.wormhole.map(|to| (s.coords, to)))
            .filter(|(from, to)| from.system_key() < to.system_key())
            .map(|(from, to)| WormholeLink { from, to })
            .collect();
        wormholes.sort_by_key(|w| (w.from.system_key(), w.to.system_key()));

        let mut systems = galaxy.systems().to_vec();
        systems.sort_by_key(|s| s.coords.system_key());
        for star in &mut systems {
            star.wormhole = None;
        }
        GalaxyFile {
            id: galaxy.id,
            name: galaxy.name.clone(),
            radius: galaxy.radius,
            designed_species: galaxy.designed_species,
            species_names: galaxy.species.iter().map(|s| s.name.clone()).collect(),
            systems,
            wormholes,
            species: galaxy.species.clone(),
        }
    }

    /// Rebuild the core model, checking that systems and wormhole termini
    /// are consistent.
    pub fn into_galaxy(self) -> Result<Galaxy> {
        let mut galaxy = Galaxy::new(self.id, self.name, self.radius, self.designed_species);
        for star in self.systems {
            let at = star.coords;
            if !galaxy.add_system(star) {
                bail!("duplicate system at {at}");
            }
        }
        for link in &self.wormholes {
            for (end, other) in [(link.from, link.to), (link.to, link.from)] {
                let Some(star) = galaxy.system_mut(end) else {
                    bail!("wormhole terminus {end} is not a star system");
                };
                if star.wormhole.is_some() {
                    bail!("system {end} has more than one wormhole");
                }
                star.wormhole = Some(other.system());
            }
        }
        for (i, species) in self.species.iter().enumerate() {
            let expected = u32::try_from(i + 1)?;
            if species.number != expected {
                bail!("species {} is stored as number {}", species.name, species.number);
            }
        }
        galaxy.species = self.species;
        Ok(galaxy)
    }
}
