use super::*;

#[test]
fn rendering_is_read_only_and_repeatable() {
    let galaxy = two_species_galaxy(&mut make_rng());
    let before = galaxy.species.clone();
    let first = render_report(&galaxy, 1, 1, None, false).unwrap();
    let second = render_report(&galaxy, 1, 1, None, false).unwrap();
    assert_eq!(first, second);
    assert_eq!(galaxy.species, before);
}

#[test]
fn sections_come_in_order() {
    let galaxy = two_species_galaxy(&mut make_rng());
    let report = render_report(&galaxy, 2, 4, None, false).unwrap();
    let status = report.find("START OF TURN 4").unwrap();
    let home = report.find("HOME PLANET").unwrap();
    let orders = report.find("ORDER SECTION").unwrap();
    assert!(status < home && home < orders);
    assert!(report.ends_with("END\n"));
}

#[test]
fn test_mode_drops_the_order_template() {
    let galaxy = two_species_galaxy(&mut make_rng());
    let report = render_report(&galaxy, 1, 1, None, true).unwrap();
    assert!(!report.contains("ORDER SECTION"));
    assert!(report.contains("Species name: Species 1"));
}

#[test]
fn prior_log_leads_the_report() {
    let galaxy = two_species_galaxy(&mut make_rng());
    let prior = PriorLog {
        turn: 3,
        text: "\nOther events:\n  Something happened.\n",
    };
    let report = render_report(&galaxy, 1, 4, Some(prior), true).unwrap();
    assert!(report.starts_with("\n\n\t\t\tEVENT LOG FOR TURN 3\n\nOther events:\n  Something happened.\n"));
}

#[test]
fn unknown_species_is_an_error() {
    let galaxy = two_species_galaxy(&mut make_rng());
    let err = render_report(&galaxy, 9, 1, None, false).unwrap_err();
    assert!(matches!(err, ReportError::UnknownSpecies(9)));
}

#[test]
fn turn_log_feeds_the_next_report() {
    let mut galaxy = two_species_galaxy(&mut make_rng());
    let mut scout = make_ship("Eye", ShipClass::Transport, 1);
    scout.coords = galaxy.species[1].home;
    galaxy.species[0].ships.push(scout);
    let mut game = Game { turn: 1 };
    let outcome = run_turn(&mut galaxy, &mut game, &mut []);

    let prior = PriorLog {
        turn: 1,
        text: log_for(&outcome, 1),
    };
    let report = render_report(&galaxy, 1, game.turn, Some(prior), true).unwrap();
    assert!(report.contains("START OF TURN 2"));
    assert!(report.contains("Species met: SP Species 2"));
    assert!(report.contains("Aliens at x = 25, y = 5, z = 5"));
}
