//! Integer lattice coordinates plus the orbit slot of a planet within a system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Orbit value reserved for colonies and ships that are off the map.
pub const OFF_MAP_ORBIT: i32 = 99;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coords {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    #[serde(default)]
    pub orbit: i32,
}

impl Coords {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Coords { x, y, z, orbit: 0 }
    }

    pub fn with_orbit(self, orbit: i32) -> Self {
        Coords { orbit, ..self }
    }

    /// The system-level coordinates (orbit cleared).
    pub fn system(self) -> Self {
        self.with_orbit(0)
    }

    /// Unique integer key for the system these coordinates fall in.
    pub fn system_key(self) -> i64 {
        (i64::from(self.x) * 1000 + i64::from(self.y)) * 1000 + i64::from(self.z)
    }

    /// Planet identifier, `xxx.yyy.zzz/oo`.
    pub fn id(self) -> String {
        format!("{:03}.{:03}.{:03}/{:02}", self.x, self.y, self.z, self.orbit)
    }

    /// Right-aligned `x y z` triple used in report listings.
    pub fn xyz(self) -> String {
        format!("{:3} {:3} {:3}", self.x, self.y, self.z)
    }

    pub fn is_off_map(self) -> bool {
        self.orbit == OFF_MAP_ORBIT
    }

    pub fn same_system(self, other: Coords) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }

    pub fn same_planet(self, other: Coords) -> bool {
        self.same_system(other) && self.orbit == other.orbit
    }

    pub fn distance_squared(self, other: Coords) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        let dz = i64::from(self.z - other.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Distance in parsecs, rounded to the nearest whole parsec.
    #[allow(clippy::cast_possible_truncation)]
    pub fn distance(self, other: Coords) -> i64 {
        (self.distance_squared(other) as f64).sqrt().round() as i64
    }

    /// True when `other` is strictly less than `parsecs` away.
    pub fn closer_than(self, other: Coords, parsecs: i64) -> bool {
        self.distance_squared(other) < parsecs * parsecs
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_key_is_unique_per_system() {
        let a = Coords::new(1, 2, 3);
        let b = Coords::new(1, 3, 2);
        assert_eq!(a.system_key(), 1_002_003);
        assert_ne!(a.system_key(), b.system_key());
        assert_eq!(a.with_orbit(4).system_key(), a.system_key());
    }

    #[test]
    fn closer_than_is_strict() {
        let a = Coords::new(0, 0, 0);
        let b = Coords::new(3, 0, 0);
        assert!(!a.closer_than(b, 3));
        assert!(a.closer_than(b, 4));
        assert_eq!(a.distance(Coords::new(1, 1, 1)), 2);
    }

    #[test]
    fn formats_planet_id_and_triples() {
        let c = Coords::new(7, 12, 105).with_orbit(3);
        assert_eq!(c.id(), "007.012.105/03");
        assert_eq!(c.to_string(), "7 12 105");
        assert_eq!(c.xyz(), "  7  12 105");
    }

    #[test]
    fn same_planet_requires_orbit_match() {
        let a = Coords::new(5, 5, 5).with_orbit(1);
        assert!(a.same_system(a.with_orbit(2)));
        assert!(!a.same_planet(a.with_orbit(2)));
        assert!(a.with_orbit(OFF_MAP_ORBIT).is_off_map());
    }
}
