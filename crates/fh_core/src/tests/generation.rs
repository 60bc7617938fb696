use super::*;
use crate::generator::MIN_SYSTEM_SPACING;
use crate::test_fixtures::{base_galaxy, small_config, small_players};

#[test]
fn same_seed_same_galaxy() {
    let a = generate_galaxy(&small_config(), &small_players(3), &mut make_rng()).unwrap();
    let b = generate_galaxy(&small_config(), &small_players(3), &mut make_rng()).unwrap();
    assert_eq!(a.galaxy.id, b.galaxy.id);
    assert_eq!(a.galaxy.systems(), b.galaxy.systems());
    assert_eq!(a.galaxy.species, b.galaxy.species);
    assert_eq!(a.summary, b.summary);
}

#[test]
fn systems_are_spaced_inside_the_sphere() {
    let galaxy = base_galaxy(&mut make_rng());
    let center = galaxy.center();
    let limit = i64::from(galaxy.radius).pow(2) + 9;
    for (i, a) in galaxy.systems().iter().enumerate() {
        assert!(a.coords.distance_squared(center) <= limit);
        for b in &galaxy.systems()[i + 1..] {
            assert!(!a.coords.closer_than(b.coords, MIN_SYSTEM_SPACING));
        }
    }
}

#[test]
fn every_species_starts_on_its_own_home_system() {
    let galaxy = base_galaxy(&mut make_rng());
    assert_eq!(galaxy.species.len(), 3);
    for species in &galaxy.species {
        let star = galaxy.system(species.home).unwrap();
        assert_eq!(star.home_species, Some(species.number));
        assert!(star.visited_by.contains(&species.number));

        let home = species.colony_at(species.home).unwrap();
        assert_eq!(home.kind, ColonyKind::Home);
        assert!(home.populated);
        assert!(galaxy.planet(species.home).is_some());
        assert!(species.econ_units >= 0);
    }
}

#[test]
fn homes_respect_minimum_distance() {
    let galaxy = base_galaxy(&mut make_rng());
    let min = small_config().min_distance;
    for (i, a) in galaxy.species.iter().enumerate() {
        for b in &galaxy.species[i + 1..] {
            assert!(!a.home.closer_than(b.home, min), "{} and {}", a.name, b.name);
        }
    }
}

#[test]
fn summary_and_scans_cover_every_species() {
    let generated = generate_galaxy(&small_config(), &small_players(3), &mut make_rng()).unwrap();
    assert!(generated.summary.starts_with("Galaxy Testbed ("));
    for species in &generated.galaxy.species {
        assert!(generated.summary.contains(&format!("SP {} (#{})", species.name, species.number)));
    }
    let numbers: Vec<u32> = generated.scans.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert!(generated.scans[0].1.contains("Scan of home star system for SP Species 1:"));
}

#[test]
fn fresh_galaxy_reports_render() {
    let galaxy = base_galaxy(&mut make_rng());
    for species in &galaxy.species {
        let report = render_report(&galaxy, species.number, 1, None, false).unwrap();
        assert!(report.contains(&format!("Species name: {}", species.name)));
        assert!(report.contains("HOME PLANET"));
    }
}
