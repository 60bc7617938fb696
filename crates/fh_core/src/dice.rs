use rand::Rng;
use uuid::Uuid;

use crate::Coords;

/// Roll one die with `sides` faces, returning `1..=sides`. A die without
/// faces rolls 0.
pub fn roll(rng: &mut impl Rng, sides: i64) -> i64 {
    if sides < 1 {
        return 0;
    }
    rng.gen_range(1..=sides)
}

/// Sample a lattice point inside the cube `[0, 2r)` on every axis.
#[allow(clippy::cast_possible_truncation)]
pub fn lattice_point(rng: &mut impl Rng, radius: i32) -> Coords {
    let diameter = 2 * i64::from(radius);
    let mut axis = || (roll(rng, diameter) - 1) as i32;
    Coords::new(axis(), axis(), axis())
}

/// Generate a deterministic v4-format UUID from a seeded RNG.
pub fn generate_uuid(rng: &mut impl Rng) -> Uuid {
    let bytes: [u8; 16] = rng.gen();
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}
