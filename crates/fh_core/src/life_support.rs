use crate::error::TurnError;
use crate::{Galaxy, GasTolerance, Planet, Species};

/// A species' environmental tolerances, anchored on its home planet.
#[derive(Debug, Clone, Copy)]
pub struct LifeSupport<'a> {
    pub home: &'a Planet,
    pub gases: &'a GasTolerance,
}

impl<'a> LifeSupport<'a> {
    pub fn for_species(galaxy: &'a Galaxy, species: &'a Species) -> Result<Self, TurnError> {
        let home = galaxy
            .planet(species.home)
            .ok_or_else(|| TurnError::MissingHomePlanet {
                species: species.name.clone(),
                coords: species.home.id(),
            })?;
        Ok(LifeSupport {
            home,
            gases: &species.gases,
        })
    }

    /// Life support tech needed to live on `planet`.
    pub fn needed(&self, planet: &Planet) -> i64 {
        let mut needed = 3 * (planet.temperature_class - self.home.temperature_class).abs()
            + 3 * (planet.pressure_class - self.home.pressure_class).abs();
        for share in &planet.atmosphere {
            if share.percent > 0 && self.gases.poison.contains(&share.gas) {
                needed += 3;
            }
        }
        let required = planet.gas_percent(self.gases.required);
        if required < self.gases.required_min || required > self.gases.required_max {
            needed += 3;
        }
        needed
    }
}

/// Percentage of production lost to an LSN shortfall.
pub fn production_penalty(ls_needed: i64, ls_level: i64) -> i64 {
    if ls_needed <= 0 {
        0
    } else if ls_level <= 0 {
        100
    } else {
        (100 * ls_needed / ls_level).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{earth_like_planet, oxygen_breather};
    use crate::{Gas, GasShare};

    #[test]
    fn home_planet_needs_no_life_support() {
        let home = earth_like_planet(3);
        let gases = oxygen_breather();
        let ls = LifeSupport {
            home: &home,
            gases: &gases,
        };
        assert_eq!(ls.needed(&home), 0);
    }

    #[test]
    fn differences_and_poisons_add_up() {
        let home = earth_like_planet(3);
        let gases = oxygen_breather();
        let ls = LifeSupport {
            home: &home,
            gases: &gases,
        };
        let mut hostile = earth_like_planet(4);
        hostile.temperature_class += 2;
        hostile.pressure_class -= 1;
        hostile.atmosphere = [
            GasShare {
                gas: Gas::Chlorine,
                percent: 40,
            },
            GasShare {
                gas: Gas::Nitrogen,
                percent: 60,
            },
        ]
        .into_iter()
        .collect();
        // 6 + 3 for temperature/pressure, 3 for chlorine, 3 for missing oxygen.
        assert_eq!(ls.needed(&hostile), 15);
    }

    #[test]
    fn penalty_is_capped() {
        assert_eq!(production_penalty(0, 0), 0);
        assert_eq!(production_penalty(3, 0), 100);
        assert_eq!(production_penalty(3, 12), 25);
        assert_eq!(production_penalty(30, 12), 100);
    }
}
