use super::*;
use crate::test_fixtures::{make_rng, make_ship, two_species_galaxy};
use std::collections::BTreeSet;

mod generation;
mod reports;

// --- Shared test helpers ------------------------------------------------

/// Orders received from every species in `galaxy`.
fn all_orders(galaxy: &Galaxy) -> BTreeSet<u32> {
    galaxy.species.iter().map(|s| s.number).collect()
}

/// Run one turn with no messages and orders from everyone.
fn run_turn(galaxy: &mut Galaxy, game: &mut Game, ledger: &mut [Transaction]) -> TurnOutcome {
    let orders = all_orders(galaxy);
    let messages = Messages::default();
    let inputs = TurnInputs {
        orders_received: &orders,
        messages: &messages,
    };
    let mut rng = make_rng();
    finish_turn(galaxy, game, ledger, &inputs, &mut rng).unwrap()
}

fn log_for(outcome: &TurnOutcome, number: u32) -> &str {
    outcome
        .logs
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, text)| text.as_str())
        .unwrap()
}
