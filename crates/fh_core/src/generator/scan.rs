//! Star system scan, as shown in setup logs and reports.

use std::fmt::Write;

use crate::life_support::LifeSupport;
use crate::text::hundredths;
use crate::{Planet, Star};

/// Render a scan of `star`. LSN is computed for `viewer` when given,
/// otherwise shown as 99.
pub fn scan_system(star: &Star, viewer: Option<&LifeSupport<'_>>) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let c = star.coords;
    write!(out, "Coordinates:\tx = {}\ty = {}\tz = {}", c.x, c.y, c.z)?;
    write!(out, "\tstellar type = {}", star.stellar_type())?;
    write!(out, "   {} planets.\n\n", star.planets.len())?;
    if star.wormhole.is_some() {
        out.push_str("This star system is the terminus of a natural wormhole.\n\n");
    }
    out.push_str("               Temp  Press Mining\n");
    out.push_str("  #  Dia  Grav Class Class  Diff  LSN  Atmosphere\n");
    writeln!(out, " {}", "-".repeat(69))?;
    for planet in &star.planets {
        let lsn = viewer.map_or(99, |ls| ls.needed(planet));
        scan_planet(&mut out, planet, lsn)?;
    }
    Ok(out)
}

fn scan_planet(out: &mut String, planet: &Planet, lsn: i64) -> std::fmt::Result {
    write!(
        out,
        "  {}  {:3}  {}  {:2}    {:2}    {} {:4}  ",
        planet.orbit,
        planet.diameter,
        hundredths(planet.gravity),
        planet.temperature_class,
        planet.pressure_class,
        hundredths(planet.mining_difficulty),
        lsn
    )?;
    if planet.atmosphere.is_empty() {
        out.push_str("No atmosphere");
    } else {
        let gases: Vec<String> = planet
            .atmosphere
            .iter()
            .map(|s| format!("{}({}%)", s.gas.symbol(), s.percent))
            .collect();
        out.push_str(&gases.join(","));
    }
    out.push('\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{earth_like_planet, oxygen_breather};
    use crate::{Coords, StarColor, StarKind};

    fn star() -> Star {
        Star {
            coords: Coords::new(3, 4, 5),
            kind: StarKind::MainSequence,
            color: StarColor::Yellow,
            size: 5,
            planets: vec![earth_like_planet(1)],
            wormhole: Some(Coords::new(30, 30, 30)),
            visited_by: Default::default(),
            home_species: None,
            potential_home: false,
            message: None,
        }
    }

    #[test]
    fn scan_lists_every_planet() {
        let text = scan_system(&star(), None).unwrap();
        assert!(text.starts_with("Coordinates:\tx = 3\ty = 4\tz = 5\tstellar type = MG5   1 planets.\n\n"));
        assert!(text.contains("terminus of a natural wormhole"));
        assert!(text.contains("  1   13  1.00  10    10    2.20   99  N2(78%),O2(21%),CO2(1%)\n"));
    }

    #[test]
    fn scan_uses_viewer_life_support() {
        let s = star();
        let gases = oxygen_breather();
        let ls = LifeSupport {
            home: &s.planets[0],
            gases: &gases,
        };
        let text = scan_system(&s, Some(&ls)).unwrap();
        assert!(text.contains("2.20    0  N2"));
    }
}
