//! Galaxy directory persistence and the create/finish/report/discard
//! workflows shared by the `fh` binary and tests.

mod galaxy_file;
mod store;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fh_core::setup::{validate_players, PlayerSetup, SetupFile};
use fh_core::{
    finish_turn, generate_galaxy, home_scans, render_report, Game, PriorLog, TurnInputs,
    MAX_TURN,
};
use rand::Rng;
use tracing::{debug, info, warn};

pub use galaxy_file::{GalaxyFile, WormholeLink};
pub use store::{read_json, write_json, Store, GAME_FILE, PLAYERS_FILE, SETUP_FILE};

/// What `create_galaxy` produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub name: String,
    pub species: usize,
    pub systems: usize,
    pub radius: i32,
    pub wormholes: usize,
}

/// Generate a new galaxy in `store` from `setup_path` and the directory's
/// `players.json`. Refuses to overwrite an existing game.
pub fn create_galaxy(store: &Store, setup_path: &Path, rng: &mut impl Rng) -> Result<Created> {
    if store.has_game() {
        bail!(
            "{} already exists; refusing to overwrite a running game",
            store.root().join(GAME_FILE).display()
        );
    }
    let setup: SetupFile = read_json(setup_path)?;
    let config = setup
        .validate()
        .with_context(|| format!("validating {}", setup_path.display()))?;
    let players_path = store.root().join(PLAYERS_FILE);
    let players: Vec<PlayerSetup> = read_json(&players_path)?;
    validate_players(&players).with_context(|| format!("validating {}", players_path.display()))?;
    if players.len() > config.species {
        bail!(
            "{} players but the setup is for {} species",
            players.len(),
            config.species
        );
    }

    let generated = generate_galaxy(&config, &players, rng).context("generating galaxy")?;
    let galaxy = &generated.galaxy;
    store.write_galaxy(0, galaxy)?;
    store.write_text(&store.turn_dir(0).join("galaxy.log.txt"), &generated.summary)?;
    for (number, scan) in &generated.scans {
        store.write_log(0, *number, scan)?;
    }
    store.write_game(&Game { turn: 0 })?;

    let created = Created {
        name: galaxy.name.clone(),
        species: galaxy.species.len(),
        systems: galaxy.systems().len(),
        radius: galaxy.radius,
        wormholes: galaxy.wormhole_count(),
    };
    info!(
        name = %created.name,
        id = %galaxy.id,
        systems = created.systems,
        species = created.species,
        radius = created.radius,
        wormholes = created.wormholes,
        "galaxy created"
    );
    Ok(created)
}

/// What `finish` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finished {
    pub old_turn: u32,
    pub new_turn: u32,
    pub missing_orders: Vec<u32>,
}

/// Process the current turn and advance `game.json` by one.
///
/// The next turn's galaxy is written before `game.json`, so a failure
/// leaves the previous turn authoritative. Event logs and ledger outcomes
/// of the finished turn are rewritten whole, so finishing a discarded turn
/// again leaves the same files as the first run.
pub fn finish(store: &Store, rng: &mut impl Rng) -> Result<Finished> {
    let mut game = store.read_game()?;
    if game.turn >= MAX_TURN {
        bail!("turn {} is the last turn a game can reach", game.turn);
    }
    let old_turn = game.turn;
    let mut galaxy = store.read_galaxy(old_turn)?;
    let mut logs: BTreeMap<u32, String> = if old_turn == 0 {
        home_scans(&galaxy)
            .context("scanning home systems")?
            .into_iter()
            .collect()
    } else {
        BTreeMap::new()
    };
    let mut ledger = store.read_ledger(old_turn)?;
    let messages = store.read_messages()?;
    let orders_received: BTreeSet<u32> = galaxy
        .species
        .iter()
        .map(|s| s.number)
        .filter(|&n| store.has_orders(old_turn, n))
        .collect();
    debug!(
        turn = old_turn,
        ledger = ledger.len(),
        messages = messages.len(),
        orders = orders_received.len(),
        "finishing turn"
    );

    let inputs = TurnInputs {
        orders_received: &orders_received,
        messages: &messages,
    };
    let outcome = finish_turn(&mut galaxy, &mut game, &mut ledger, &inputs, rng)
        .with_context(|| format!("processing turn {old_turn}"))?;

    for number in &outcome.missing_orders {
        warn!(turn = old_turn, species = number, "no orders received");
    }
    for (number, text) in &outcome.logs {
        logs.entry(*number).or_default().push_str(text);
    }
    for species in &galaxy.species {
        logs.entry(species.number).or_default();
    }
    for (number, text) in &logs {
        store.write_log(old_turn, *number, text)?;
    }
    if !ledger.is_empty() {
        store.write_outcomes(old_turn, &ledger)?;
    }
    store.write_galaxy(game.turn, &galaxy)?;
    store.write_game(&game)?;
    info!(old_turn, new_turn = game.turn, "turn finished");
    Ok(Finished {
        old_turn,
        new_turn: game.turn,
        missing_orders: outcome.missing_orders,
    })
}

/// Render the report of every species for `turn`, the current turn when
/// `None`. Returns the written paths in species order.
pub fn write_reports(store: &Store, turn: Option<u32>, test_mode: bool) -> Result<Vec<PathBuf>> {
    let turn = match turn {
        Some(turn) => turn,
        None => store.read_game()?.turn,
    };
    if !(1..=MAX_TURN).contains(&turn) {
        bail!("reports exist for turns 1 to {MAX_TURN}, not {turn}");
    }
    let galaxy = store.read_galaxy(turn)?;
    let mut written = Vec::with_capacity(galaxy.species.len());
    for species in &galaxy.species {
        let number = species.number;
        let prior_text = if turn > 1 {
            store.read_log(turn - 1, number)?
        } else {
            None
        };
        let prior_log = prior_text.as_deref().map(|text| PriorLog {
            turn: turn - 1,
            text,
        });
        let report = render_report(&galaxy, number, turn, prior_log, test_mode)
            .with_context(|| format!("rendering report for SP {}", species.name))?;
        let path = store.species_file(turn, number, "rpt");
        store.write_text(&path, &report)?;
        info!(species = number, path = %path.display(), "report written");
        written.push(path);
    }
    Ok(written)
}

/// Step `game.json` back one turn, floored at 0. Turn directories are left
/// alone. Returns the old and new turn.
pub fn discard(store: &Store) -> Result<(u32, u32)> {
    let mut game = store.read_game()?;
    let old = game.turn;
    game.turn = old.saturating_sub(1);
    store.write_game(&game)?;
    info!(old_turn = old, new_turn = game.turn, "turn discarded");
    Ok((old, game.turn))
}
