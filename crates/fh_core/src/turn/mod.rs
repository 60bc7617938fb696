//! Turn processing: one call advances the game by exactly one turn.

mod colonies;
mod economy;
mod events;
mod locations;
mod salvage;
mod tech;

use std::collections::BTreeSet;

use ahash::AHashMap;
use rand::Rng;

use crate::error::TurnError;
use crate::text::EventLog;
use crate::{Coords, Galaxy, Game, JumpState, Messages, Species, ShipStatus, Transaction};

pub use colonies::update_colonies;
pub use economy::{
    apply_mining_difficulty_increases, colony_production, efficiency, fleet_maintenance,
    total_production, update_efficiency, update_fleet_costs, Production, EFFICIENT_BASE,
};
pub use locations::{alien_is_visible, collect_locations, update_contacts, Location};
pub use salvage::{item_salvage, salvage_disbanded, ship_salvage};
pub use tech::{affordable_level, INTERSPECIES_CONSTRUCTION_MA, TRANSFER_REFUSED, TRANSFER_UNFUNDED};

/// Oldest age a ship's counter can reach.
pub const MAX_SHIP_AGE: i64 = 49;

/// Everything the turn reads besides the galaxy and ledger.
#[derive(Debug, Clone, Copy)]
pub struct TurnInputs<'a> {
    /// Species numbers that submitted orders this turn.
    pub orders_received: &'a BTreeSet<u32>,
    pub messages: &'a Messages,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Event log text per species number, in species order.
    pub logs: Vec<(u32, String)>,
    /// Species that submitted no orders. Always empty on the setup turn.
    pub missing_orders: Vec<u32>,
}

/// Process the current turn of `game` and advance it by one.
///
/// `ledger` entries may be rewritten with their outcome (tech transfers
/// record cost and levels). On error, `galaxy` and `game` are partially
/// updated and must be discarded by the caller.
pub fn finish_turn(
    galaxy: &mut Galaxy,
    game: &mut Game,
    ledger: &mut [Transaction],
    inputs: &TurnInputs<'_>,
    rng: &mut impl Rng,
) -> Result<TurnOutcome, TurnError> {
    let setup = game.is_setup_turn();
    let missing_orders = if setup {
        Vec::new()
    } else {
        galaxy
            .species
            .iter()
            .map(|s| s.number)
            .filter(|n| !inputs.orders_received.contains(n))
            .collect()
    };

    apply_mining_difficulty_increases(galaxy);
    let mut logs: AHashMap<u32, EventLog> = AHashMap::new();
    let mut econ_base: AHashMap<Coords, i64> = AHashMap::new();
    for index in 0..galaxy.species.len() {
        let mut log = EventLog::default();
        if !setup {
            process_species(galaxy, index, ledger, inputs.messages, &mut econ_base, &mut log, rng)?;
        }
        let number = galaxy.species[index].number;
        events::deliver_messages(&mut log, number, ledger, inputs.messages);
        logs.insert(number, log);
    }

    update_efficiency(galaxy, &econ_base);
    if !setup {
        let locations = collect_locations(galaxy);
        update_contacts(galaxy, &locations);
        tech::report_donor_transfers(ledger, &mut logs)?;
        update_fleet_costs(galaxy)?;
    }
    game.turn += 1;

    let logs = galaxy
        .species
        .iter()
        .map(|s| (s.number, logs.remove(&s.number).unwrap_or_default().into_text()))
        .collect();
    Ok(TurnOutcome {
        logs,
        missing_orders,
    })
}

/// Every per-species event category except message delivery, in order.
fn process_species(
    galaxy: &mut Galaxy,
    index: usize,
    ledger: &mut [Transaction],
    messages: &Messages,
    econ_base: &mut AHashMap<Coords, i64>,
    log: &mut EventLog,
    rng: &mut impl Rng,
) -> Result<(), TurnError> {
    let number = galaxy.species[index].number;
    events::log_mishaps(log, number, ledger);
    salvage_disbanded(&mut galaxy.species[index], log);
    events::receive_eu_transfers(&mut galaxy.species[index], ledger, log);
    events::log_portals_and_telescopes(log, number, ledger);
    tech::receive_tech_transfers(galaxy, index, ledger, log)?;

    let species = &mut galaxy.species[index];
    tech::grow_techs(species, log, rng);
    tech::announce_new_technology(species, log);
    tech::receive_knowledge(species, ledger, log)?;

    update_colonies(galaxy, index, ledger, messages, econ_base, log, rng)?;
    age_ships(&mut galaxy.species[index]);

    events::log_landing_requests(log, number, ledger);
    events::log_construction(log, number, ledger)?;
    events::log_siege_detections(log, number, ledger)
}

/// Clear per-turn jump flags and age ships still under construction.
pub fn age_ships(species: &mut Species) {
    for ship in species.ships.iter_mut().filter(|s| !s.coords.is_off_map()) {
        ship.arrived_via_wormhole = ship.just_jumped == JumpState::ViaWormhole;
        ship.just_jumped = JumpState::None;
        if ship.status == ShipStatus::UnderConstruction {
            ship.age = (ship.age + 1).min(MAX_SHIP_AGE);
        }
    }
}
