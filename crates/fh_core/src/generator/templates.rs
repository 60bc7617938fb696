//! Home system templates, one per home planet count.

use std::collections::BTreeMap;

use rand::Rng;

use super::planets::generate_planets;
use super::star::HOME_PLANETS;
use crate::error::GenerateError;
use crate::{Planet, PlanetSpecial};

const TEMPLATE_ATTEMPTS: usize = 50_000;

#[derive(Debug, Clone)]
pub struct Templates(BTreeMap<usize, Vec<Planet>>);

impl Templates {
    pub fn build(rng: &mut impl Rng) -> Result<Templates, GenerateError> {
        let mut templates = BTreeMap::new();
        for count in HOME_PLANETS {
            let count = usize::try_from(count).unwrap_or(0);
            templates.insert(count, find_template(rng, count)?);
        }
        Ok(Templates(templates))
    }

    pub fn get(&self, count: usize) -> Option<&Vec<Planet>> {
        self.0.get(&count)
    }
}

fn find_template(rng: &mut impl Rng, count: usize) -> Result<Vec<Planet>, GenerateError> {
    for _ in 0..TEMPLATE_ATTEMPTS {
        let planets = generate_planets(rng, count, true);
        if is_playable(&planets) {
            return Ok(planets);
        }
    }
    Err(GenerateError::TemplateExhausted { planets: count })
}

/// Exactly one ideal home planet plus at least one other rocky planet
/// with an atmosphere to colonise.
fn is_playable(planets: &[Planet]) -> bool {
    let homes = planets
        .iter()
        .filter(|p| p.special == PlanetSpecial::IdealHome)
        .count();
    let colonies = planets
        .iter()
        .filter(|p| p.special == PlanetSpecial::None && !p.is_gas_giant() && p.pressure_class > 0)
        .count();
    homes == 1 && colonies > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn every_home_count_has_a_template() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let templates = Templates::build(&mut rng).unwrap();
        for count in 7..=9 {
            let planets = templates.get(count).unwrap();
            assert_eq!(planets.len(), count);
            assert!(is_playable(planets));
        }
        assert!(templates.get(3).is_none());
    }
}
