use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use rand::Rng;

use super::planets::generate_planets;
use crate::dice::roll;
use crate::{Coords, Star, StarColor, StarKind};

/// Planet count band for ordinary systems.
pub const SYSTEM_PLANETS: RangeInclusive<i64> = 5..=9;
/// Planet count band for home systems.
pub const HOME_PLANETS: RangeInclusive<i64> = 7..=9;

pub fn roll_star(rng: &mut impl Rng, coords: Coords) -> Star {
    let kind = match roll(rng, 10) {
        1 => StarKind::Dwarf,
        2 => StarKind::Degenerate,
        3 => StarKind::Giant,
        _ => StarKind::MainSequence,
    };
    let color = StarColor::ALL[usize::try_from(roll(rng, 7) - 1).unwrap_or(0)];
    let size = roll(rng, 10) - 1;
    let mut count = -2;
    for _ in 0..kind.planet_dice() {
        count += roll(rng, color.planet_die());
    }
    let count = into_band(rng, count, &SYSTEM_PLANETS);
    Star {
        coords: coords.system(),
        kind,
        color,
        size,
        planets: generate_planets(rng, count, false),
        wormhole: None,
        visited_by: BTreeSet::new(),
        home_species: None,
        potential_home: false,
        message: None,
    }
}

/// Re-roll a planet count upward or downward until it lies in `band`.
pub fn into_band(rng: &mut impl Rng, mut count: i64, band: &RangeInclusive<i64>) -> usize {
    loop {
        if count < *band.start() {
            count += roll(rng, 2);
        } else if count > *band.end() {
            count -= roll(rng, 3);
        } else {
            return usize::try_from(count).unwrap_or(0);
        }
    }
}
