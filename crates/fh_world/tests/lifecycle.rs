//! Integration test: create → finish → report → discard against a galaxy
//! directory in a temp dir.

use fh_core::setup::{GalaxySection, RadiusBounds, SetupFile};
use fh_core::test_fixtures::small_players;
use fh_core::{Game, Transaction, TransactionKind};
use fh_world::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

fn setup_file(species: i64) -> SetupFile {
    SetupFile {
        is_verbose: false,
        number_of_species: species,
        galaxy: GalaxySection {
            name: "Testbed".to_string(),
            density: "normal".to_string(),
            minimum_distance: 4,
            radius: RadiusBounds {
                minimum: 1,
                maximum: 50,
            },
            ..GalaxySection::default()
        },
    }
}

/// A fresh galaxy directory holding setup and players for three species.
fn galaxy_dir() -> (TempDir, Store) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = Store::new(dir.path());
    write_json(&dir.path().join(SETUP_FILE), &setup_file(3)).expect("setup");
    write_json(&dir.path().join(PLAYERS_FILE), &small_players(3)).expect("players");
    (dir, store)
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn create(store: &Store) -> Created {
    let setup = store.root().join(SETUP_FILE);
    create_galaxy(store, &setup, &mut rng(1)).expect("galaxy created")
}

#[test]
fn full_lifecycle() {
    let (_dir, store) = galaxy_dir();
    let created = create(&store);
    assert_eq!(created.species, 3);
    assert_eq!(created.systems, 18);
    assert_eq!(store.read_game().unwrap(), Game { turn: 0 });
    let scan = store.read_log(0, 1).unwrap().expect("setup log");
    assert!(scan.contains("Scan of home star system for SP Species 1:"));

    // Setup turn: nobody needs orders.
    let setup = finish(&store, &mut rng(2)).unwrap();
    assert_eq!((setup.old_turn, setup.new_turn), (0, 1));
    assert!(setup.missing_orders.is_empty());

    let reports = write_reports(&store, None, false).unwrap();
    assert_eq!(reports.len(), 3);
    let first = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(first.contains("START OF TURN 1"));
    assert!(first.contains("ORDER SECTION"));
    assert!(!first.contains("EVENT LOG FOR TURN"));

    std::fs::write(store.species_file(1, 1, "ord"), "START PRODUCTION\nEND\n").unwrap();
    let turn_one = finish(&store, &mut rng(3)).unwrap();
    assert_eq!(turn_one.new_turn, 2);
    assert_eq!(turn_one.missing_orders, vec![2, 3]);

    let reports = write_reports(&store, Some(2), true).unwrap();
    let second = std::fs::read_to_string(&reports[0]).unwrap();
    assert!(second.contains("START OF TURN 2"));
    assert!(!second.contains("ORDER SECTION"));

    assert_eq!(discard(&store).unwrap(), (2, 1));
    assert!(store.turn_dir(2).exists());
    assert_eq!(discard(&store).unwrap(), (1, 0));
    assert_eq!(discard(&store).unwrap(), (0, 0));
}

#[test]
fn create_refuses_to_overwrite() {
    let (_dir, store) = galaxy_dir();
    create(&store);
    let setup = store.root().join(SETUP_FILE);
    let err = create_galaxy(&store, &setup, &mut rng(1)).unwrap_err();
    assert!(err.to_string().contains("refusing to overwrite"));
}

#[test]
fn invalid_players_are_all_reported() {
    let (dir, store) = galaxy_dir();
    let mut players = small_players(3);
    players[1].species_name = "Species 1".to_string();
    players[2].biology_level = 9;
    write_json(&dir.path().join(PLAYERS_FILE), &players).unwrap();

    let setup = store.root().join(SETUP_FILE);
    let err = create_galaxy(&store, &setup, &mut rng(1)).unwrap_err();
    let text = format!("{err:#}");
    assert!(text.contains("2 invalid player record(s)"), "{text}");
    assert!(!store.has_game());
}

#[test]
fn same_seed_same_files() {
    let (_a, first) = galaxy_dir();
    let (_b, second) = galaxy_dir();
    create(&first);
    create(&second);
    finish(&first, &mut rng(9)).unwrap();
    finish(&second, &mut rng(9)).unwrap();
    let read = |store: &Store| std::fs::read_to_string(store.turn_dir(1).join("galaxy.json")).unwrap();
    assert_eq!(read(&first), read(&second));
}

#[test]
fn ledger_outcomes_are_kept_apart() {
    let (_dir, store) = galaxy_dir();
    create(&store);
    finish(&store, &mut rng(2)).unwrap();

    let mut offer = Transaction::new(TransactionKind::TechTransfer);
    offer.donor = 2;
    offer.recipient = 1;
    offer.value = 2;
    offer.number_3 = 1;
    store.write_ledger(1, &[offer]).unwrap();
    finish(&store, &mut rng(3)).unwrap();

    let outcomes = store.read_outcomes(1).unwrap();
    assert_eq!(outcomes[0].number_1, fh_core::turn::TRANSFER_REFUSED);
    assert_eq!(store.read_ledger(1).unwrap()[0].number_1, 0);
    let log = store.read_log(1, 1).unwrap().unwrap();
    assert!(log.contains("Military tech transfer from SP"));
}

#[test]
fn refinishing_a_turn_rewrites_its_log() {
    let (_dir, store) = galaxy_dir();
    create(&store);
    finish(&store, &mut rng(2)).unwrap();

    let mut siege = Transaction::new(TransactionKind::SiegeEuTransfer);
    siege.recipient = 1;
    siege.value = 77;
    siege.name_1 = "Species 2".to_string();
    siege.name_3 = "Target".to_string();
    store.write_ledger(1, &[siege]).unwrap();
    let received = |store: &Store| {
        let log = store.read_log(1, 1).unwrap().unwrap_or_default();
        log.matches("77 economic units were received").count()
    };

    finish(&store, &mut rng(3)).unwrap();
    assert_eq!(received(&store), 1);
    assert_eq!(discard(&store).unwrap(), (2, 1));
    finish(&store, &mut rng(3)).unwrap();
    assert_eq!(received(&store), 1);
}

#[test]
fn refinishing_the_setup_turn_keeps_one_home_scan() {
    let (_dir, store) = galaxy_dir();
    create(&store);
    let header = "Scan of home star system for SP Species 1:";

    finish(&store, &mut rng(2)).unwrap();
    let first = store.read_log(0, 1).unwrap().expect("setup log");
    assert_eq!(first.matches(header).count(), 1);
    assert_eq!(discard(&store).unwrap(), (1, 0));
    finish(&store, &mut rng(2)).unwrap();
    let second = store.read_log(0, 1).unwrap().expect("setup log");
    assert_eq!(second, first);
}

#[test]
fn report_turn_must_be_positive() {
    let (_dir, store) = galaxy_dir();
    create(&store);
    assert!(write_reports(&store, None, false).is_err());
    assert!(write_reports(&store, Some(0), false).is_err());
}
