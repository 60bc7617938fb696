//! Planet environments for a freshly rolled star system.

use rand::Rng;

use crate::dice::roll;
use crate::{Atmosphere, Gas, GasShare, Planet, PlanetSpecial};

const START_DIAMETER: [i64; 10] = [0, 5, 12, 13, 7, 20, 143, 121, 51, 49];
const START_TEMPERATURE: [i64; 10] = [0, 29, 27, 11, 9, 8, 6, 5, 5, 3];

/// Generate `count` planets in orbits `1..=count`. With `make_earth`, the
/// first temperate rocky planet is replaced by an ideal home planet.
pub fn generate_planets(rng: &mut impl Rng, count: usize, mut make_earth: bool) -> Vec<Planet> {
    let mut planets: Vec<Planet> = Vec::with_capacity(count);
    for number in 1..=count {
        let colder_than = planets.last().map(|p| p.temperature_class);
        let planet = if make_earth {
            let candidate = roll_planet(rng, number, count, colder_than);
            if candidate.temperature_class <= 11 && !candidate.is_gas_giant() {
                make_earth = false;
                earth_like(rng, number)
            } else {
                candidate
            }
        } else {
            roll_planet(rng, number, count, colder_than)
        };
        planets.push(planet);
    }
    planets
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn orbit_of(number: usize) -> i32 {
    number as i32
}

/// Add or subtract `rolls` dice of `die` faces, each direction by coin toss.
fn jitter(rng: &mut impl Rng, base: i64, rolls: i64) -> i64 {
    let die = (base / 4).max(2);
    let mut value = base;
    for _ in 0..rolls {
        let delta = roll(rng, die);
        if roll(rng, 100) > 50 {
            value += delta;
        } else {
            value -= delta;
        }
    }
    value
}

fn nudge_into(rng: &mut impl Rng, mut value: i64, min: i64, max: i64, step: i64) -> i64 {
    while value < min {
        value += roll(rng, step);
    }
    while value > max {
        value -= roll(rng, step);
    }
    value
}

fn roll_planet(rng: &mut impl Rng, number: usize, count: usize, colder_than: Option<i64>) -> Planet {
    let slot = if count > 3 {
        9 * number / count
    } else {
        2 * number + 1
    };
    let mut diameter = jitter(rng, START_DIAMETER[slot], 4);
    while diameter < 3 {
        diameter += roll(rng, 4);
    }
    let gas_giant = diameter > 40;
    let density = if gas_giant {
        58 + roll(rng, 56) + roll(rng, 56)
    } else {
        368 + (0..4).map(|_| roll(rng, 101)).sum::<i64>()
    };
    let gravity = density * diameter / 72;

    let temperature = roll_temperature(rng, START_TEMPERATURE[slot], gas_giant, count, number);
    let temperature = colder_than.map_or(temperature, |prev| temperature.min(prev));
    let pressure = roll_pressure(rng, gravity, temperature, gas_giant);

    let mut planet = Planet {
        orbit: orbit_of(number),
        diameter,
        gravity,
        density,
        temperature_class: temperature,
        pressure_class: pressure,
        mining_difficulty: roll_mining_difficulty(rng, diameter),
        mining_difficulty_increase: 0,
        atmosphere: Atmosphere::new(),
        econ_efficiency: 100,
        special: PlanetSpecial::None,
        message: None,
    };
    if pressure > 0 {
        planet.atmosphere = roll_atmosphere(rng, temperature, gas_giant);
    }
    planet
}

fn roll_temperature(rng: &mut impl Rng, base: i64, gas_giant: bool, count: usize, number: usize) -> i64 {
    let rolls = roll(rng, 3) + roll(rng, 3) + roll(rng, 3);
    let mut t = jitter(rng, base, rolls);
    t = if gas_giant {
        nudge_into(rng, t, 3, 7, 2)
    } else {
        nudge_into(rng, t, 1, 30, 3)
    };
    // Small systems keep their inner planets warm.
    if count < 4 && number < 3 {
        while t < 12 {
            t += roll(rng, 4);
        }
    }
    t
}

fn roll_pressure(rng: &mut impl Rng, gravity: i64, temperature: i64, gas_giant: bool) -> i64 {
    let rolls = roll(rng, 3) + roll(rng, 3) + roll(rng, 3);
    let p = jitter(rng, gravity / 10, rolls);
    let p = if gas_giant {
        nudge_into(rng, p, 11, 29, 3)
    } else {
        nudge_into(rng, p, 0, 12, 3)
    };
    // Too light, too cold or too hot to hold an atmosphere.
    if gravity < 10 || !(2..=27).contains(&temperature) {
        0
    } else {
        p
    }
}

/// Mining difficulty in hundredths, roughly proportional to diameter.
fn roll_mining_difficulty(rng: &mut impl Rng, diameter: i64) -> i64 {
    let mut md = 0;
    for _ in 0..1000 {
        md = (roll(rng, 3) + roll(rng, 3) + roll(rng, 3) - roll(rng, 4)) * roll(rng, diameter)
            + roll(rng, 30)
            + roll(rng, 30);
        if (40..=500).contains(&md) {
            break;
        }
    }
    md.clamp(40, 500) * 11 / 5
}

fn roll_atmosphere(rng: &mut impl Rng, temperature: i64, gas_giant: bool) -> Atmosphere {
    let mut candidates: Vec<Gas> = Gas::ALL
        .into_iter()
        .filter(|gas| {
            let (low, high, giant_only) = gas.stability();
            (low..=high).contains(&temperature) && (gas_giant || !giant_only)
        })
        .collect();
    let wanted = usize::try_from((roll(rng, 4) + roll(rng, 4)) / 2).unwrap_or(1);
    let mut picked: Vec<(Gas, i64)> = Vec::new();
    while !candidates.is_empty() && picked.len() < wanted {
        let gas = candidates.remove(rng.gen_range(0..candidates.len()));
        picked.push((gas, roll(rng, 100)));
    }
    picked.sort_by_key(|(gas, _)| *gas);
    share_out(&picked)
}

/// Convert raw quantities into percentages summing to 100.
fn share_out(quantities: &[(Gas, i64)]) -> Atmosphere {
    let total: i64 = quantities.iter().map(|(_, q)| q).sum();
    if total == 0 {
        return Atmosphere::new();
    }
    let mut shares: Atmosphere = quantities
        .iter()
        .map(|&(gas, q)| GasShare {
            gas,
            percent: 100 * q / total,
        })
        .filter(|s| s.percent > 0)
        .collect();
    let assigned: i64 = shares.iter().map(|s| s.percent).sum();
    if let Some(largest) = shares.iter_mut().max_by_key(|s| s.percent) {
        largest.percent += 100 - assigned;
    }
    shares
}

fn earth_like(rng: &mut impl Rng, number: usize) -> Planet {
    let diameter = 11 + roll(rng, 3);
    let gravity = 93 + roll(rng, 11) + roll(rng, 11) + roll(rng, 5);
    let mut quantities = Vec::with_capacity(4);
    if roll(rng, 3) == 1 {
        quantities.push((Gas::Ammonia, roll(rng, 10)));
    }
    quantities.push((Gas::CarbonDioxide, roll(rng, 5)));
    let oxygen = 11 + roll(rng, 20);
    quantities.push((Gas::Oxygen, oxygen));
    let rest: i64 = quantities.iter().map(|(_, q)| q).sum();
    quantities.push((Gas::Nitrogen, 100 - rest));
    Planet {
        orbit: orbit_of(number),
        diameter,
        gravity,
        density: gravity * 72 / diameter,
        temperature_class: 9 + roll(rng, 3),
        pressure_class: 8 + roll(rng, 3),
        mining_difficulty: 208 + roll(rng, 11) + roll(rng, 11),
        mining_difficulty_increase: 0,
        atmosphere: quantities
            .into_iter()
            .map(|(gas, percent)| GasShare { gas, percent })
            .collect(),
        econ_efficiency: 100,
        special: PlanetSpecial::IdealHome,
        message: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn orbits_are_sequential() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let planets = generate_planets(&mut rng, 7, false);
        let orbits: Vec<i32> = planets.iter().map(|p| p.orbit).collect();
        assert_eq!(orbits, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn outer_planets_are_never_warmer() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let planets = generate_planets(&mut rng, 9, false);
            for pair in planets.windows(2) {
                assert!(pair[1].temperature_class <= pair[0].temperature_class);
            }
        }
    }

    #[test]
    fn atmospheres_sum_to_one_hundred() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            for planet in generate_planets(&mut rng, 8, false) {
                let total: i64 = planet.atmosphere.iter().map(|s| s.percent).sum();
                if planet.pressure_class == 0 {
                    assert!(planet.atmosphere.is_empty());
                } else if !planet.atmosphere.is_empty() {
                    assert_eq!(total, 100);
                }
                assert!((88..=1100).contains(&planet.mining_difficulty));
            }
        }
    }

    #[test]
    fn earth_like_has_breathable_air() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let earth = earth_like(&mut rng, 3);
        assert_eq!(earth.special, PlanetSpecial::IdealHome);
        assert!(earth.gas_percent(Gas::Oxygen) > 10);
        assert!(earth.gas_percent(Gas::Nitrogen) > 30);
        let total: i64 = earth.atmosphere.iter().map(|s| s.percent).sum();
        assert_eq!(total, 100);
    }
}
