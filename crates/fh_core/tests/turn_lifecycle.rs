//! Integration test: generate a galaxy, run turns over it, and render the
//! reports each species would receive.

use fh_core::test_fixtures::{base_galaxy, make_rng, two_species_galaxy};
use fh_core::turn::TRANSFER_REFUSED;
use fh_core::*;
use std::collections::BTreeSet;

fn finish(galaxy: &mut Galaxy, game: &mut Game, ledger: &mut [Transaction]) -> TurnOutcome {
    let orders: BTreeSet<u32> = galaxy.species.iter().map(|s| s.number).collect();
    let messages = Messages::default();
    let inputs = TurnInputs {
        orders_received: &orders,
        messages: &messages,
    };
    finish_turn(galaxy, game, ledger, &inputs, &mut make_rng()).expect("turn finishes")
}

fn log_of(outcome: &TurnOutcome, number: u32) -> &str {
    outcome
        .logs
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, text)| text.as_str())
        .expect("log for species")
}

#[test]
fn generated_galaxy_plays_several_turns() {
    let mut galaxy = base_galaxy(&mut make_rng());
    let mut game = Game::default();

    let setup = finish(&mut galaxy, &mut game, &mut []);
    assert_eq!(game.turn, 1);
    assert!(setup.missing_orders.is_empty());
    assert_eq!(setup.logs.len(), 3);

    for expected in 2..=5 {
        let outcome = finish(&mut galaxy, &mut game, &mut []);
        assert_eq!(game.turn, expected);
        assert!(outcome.missing_orders.is_empty());
    }

    for species in &galaxy.species {
        let home = species.colony_at(species.home).expect("home colony");
        assert!(home.populated);
        assert!(species.econ_units >= 0);
        let report = render_report(&galaxy, species.number, game.turn, None, false).expect("report");
        assert!(report.contains(&format!("START OF TURN {}", game.turn)));
        assert!(report.contains("START PRODUCTION"));
    }
}

#[test]
fn offer_below_current_level_is_refused() {
    let mut galaxy = two_species_galaxy(&mut make_rng());
    galaxy.species[0].tech_mut(Tech::Military).level = 12;
    galaxy.species[1].econ_units = 1000;
    let mut control = galaxy.clone();

    let mut offer = Transaction::new(TransactionKind::TechTransfer);
    offer.donor = 2;
    offer.recipient = 1;
    offer.value = 2;
    offer.number_3 = 10;
    let mut ledger = [offer];
    finish(&mut galaxy, &mut Game { turn: 1 }, &mut ledger);
    finish(&mut control, &mut Game { turn: 1 }, &mut []);

    assert_eq!(ledger[0].number_1, TRANSFER_REFUSED);
    assert_eq!(galaxy.species[0].techs, control.species[0].techs);
    assert_eq!(galaxy.species[1].econ_units, control.species[1].econ_units);
}

/// A defended outpost with no population on the second planet of the
/// first home system.
fn defended_outpost(galaxy: &mut Galaxy, defenses: i64) -> usize {
    let at = galaxy.species[0].home.with_orbit(2);
    let species = &mut galaxy.species[0];
    species.colonies.push(NamedPlanet {
        name: "Picket".to_string(),
        coords: at,
        kind: ColonyKind::Colony,
        populated: true,
        items: [(Item::PlanetaryDefense, defenses)].into(),
        ..NamedPlanet::default()
    });
    species.colonies.len() - 1
}

#[test]
fn small_colonies_lose_one_unit_a_turn() {
    let mut galaxy = two_species_galaxy(&mut make_rng());
    let index = defended_outpost(&mut galaxy, 3);
    let mut game = Game { turn: 1 };

    let outcome = finish(&mut galaxy, &mut game, &mut []);
    let picket = &galaxy.species[0].colonies[index];
    assert_eq!(picket.items.get(Item::PlanetaryDefense), 2);
    assert!(picket.populated);
    assert!(log_of(&outcome, 1).contains(
        "  Number of planetary defense units on PL Picket was reduced by one unit due to normal attrition.\n"
    ));
}

#[test]
fn last_unit_ends_the_colony_the_same_turn() {
    let mut galaxy = two_species_galaxy(&mut make_rng());
    let index = defended_outpost(&mut galaxy, 1);
    let mut game = Game { turn: 1 };

    let outcome = finish(&mut galaxy, &mut game, &mut []);
    let picket = &galaxy.species[0].colonies[index];
    assert_eq!(picket.items.get(Item::PlanetaryDefense), 0);
    assert!(!picket.populated);
    assert!(log_of(&outcome, 1).contains("The colony is dead!\n"));
}

#[test]
fn reports_do_not_change_state() {
    let mut galaxy = two_species_galaxy(&mut make_rng());
    let mut game = Game { turn: 1 };
    finish(&mut galaxy, &mut game, &mut []);

    let species = galaxy.species.clone();
    let first = render_report(&galaxy, 2, game.turn, None, false).expect("report");
    let second = render_report(&galaxy, 2, game.turn, None, false).expect("report");
    assert_eq!(first, second);
    assert_eq!(galaxy.species, species);
}
