//! Per-colony bookkeeping: installs, assimilation, population and growth.

use ahash::AHashMap;
use rand::Rng;

use super::economy::missing_planet;
use crate::dice::roll;
use crate::error::TurnError;
use crate::generator::HOME_POPULATION;
use crate::life_support::LifeSupport;
use crate::text::{tenths, EventLog};
use crate::{
    ColonyKind, Coords, Galaxy, Item, Messages, NamedPlanet, Species, Tech, Transaction,
    TransactionKind,
};

/// Below this many units a colony starts losing one unit a turn.
const ATTRITION_BELOW: i64 = 50;

/// LSN at or under which a manufacturing-only colony may become a resort.
const RESORT_MAX_LSN: i64 = 6;

/// What a colony needs to know about the planet it sits on.
#[derive(Debug, Clone, Copy)]
struct Site {
    ls_needed: i64,
    gravity: i64,
    mining_difficulty: i64,
    message: Option<u32>,
}

struct Context<'a> {
    species: &'a str,
    number: u32,
    life_support: i64,
    biology: i64,
    home_gravity: i64,
}

/// Planet facts for each colony, `None` for colonies off the map.
fn survey(galaxy: &Galaxy, species: &Species) -> Result<(i64, Vec<Option<Site>>), TurnError> {
    let ls = LifeSupport::for_species(galaxy, species)?;
    let mut sites = Vec::with_capacity(species.colonies.len());
    for colony in &species.colonies {
        if colony.coords.is_off_map() {
            sites.push(None);
            continue;
        }
        let planet = galaxy
            .planet(colony.coords)
            .ok_or_else(|| missing_planet(species, colony))?;
        sites.push(Some(Site {
            ls_needed: ls.needed(planet),
            gravity: planet.gravity,
            mining_difficulty: planet.mining_difficulty,
            message: planet.message,
        }));
    }
    Ok((ls.home.gravity, sites))
}

/// Update every colony of the species at `index`, adding each non-home
/// colony's economic base to `econ_base`.
pub fn update_colonies(
    galaxy: &mut Galaxy,
    index: usize,
    ledger: &[Transaction],
    messages: &Messages,
    econ_base: &mut AHashMap<Coords, i64>,
    log: &mut EventLog,
    rng: &mut impl Rng,
) -> Result<(), TurnError> {
    let (home_gravity, sites) = survey(galaxy, &galaxy.species[index])?;
    let species = &mut galaxy.species[index];
    let life_support = species.level(Tech::LifeSupport);
    let biology = species.level(Tech::Biology);
    let Species {
        number,
        name,
        colonies,
        hp_original_base,
        ..
    } = species;
    let ctx = Context {
        species: name.as_str(),
        number: *number,
        life_support,
        biology,
        home_gravity,
    };
    for (colony, site) in colonies.iter_mut().zip(sites) {
        let Some(site) = site else {
            continue;
        };
        colony.use_on_ambush = 0;
        colony.hidden = colony.hiding;
        colony.hiding = false;
        install_units(colony);
        assimilate(colony, &ctx, ledger, log);

        let was_populated = colony.populated;
        if colony.kind == ColonyKind::Home {
            if colony.populated {
                home_population(colony, hp_original_base);
            }
        } else if colony.populated {
            colony_population(colony, site, &ctx, log, rng);
        }
        if colony.populated {
            attrition(colony, log);
        }
        if colony.kind == ColonyKind::Home && colony.populated {
            grow_home_base(colony, site.mining_difficulty);
        }
        check_population(colony);
        if !was_populated && colony.populated {
            if let Some(body) = site.message.and_then(|id| messages.get(&id)) {
                log.raw().push_str(body);
            }
        }
        if colony.kind != ColonyKind::Home {
            *econ_base.entry(colony.coords).or_insert(0) += colony.econ_base();
        }
    }
    Ok(())
}

fn install_units(colony: &mut NamedPlanet) {
    colony.mi_base += colony.ius_to_install;
    colony.ma_base += colony.aus_to_install;
    colony.ius_to_install = 0;
    colony.aus_to_install = 0;
    colony.auto_ius = 0;
    colony.auto_aus = 0;
    colony.ius_needed = 0;
    colony.aus_needed = 0;
}

fn assimilate(colony: &mut NamedPlanet, ctx: &Context<'_>, ledger: &[Transaction], log: &mut EventLog) {
    for t in ledger.iter().filter(|t| {
        t.kind == TransactionKind::Assimilation
            && Transaction::names_species(t.value, ctx.number)
            && t.coords().same_planet(colony.coords)
    }) {
        colony.mi_base += t.number_1;
        colony.ma_base += t.number_2;
        colony.shipyards += t.number_3;
        log.event_fmt(format_args!(
            "  Assimilation of {} PL {} increased mining base of SP {} PL {} by {}, and manufacturing base by {}",
            t.name_1,
            t.name_2,
            ctx.species,
            colony.name,
            tenths(t.number_1),
            tenths(t.number_2)
        ));
        if t.number_3 > 0 {
            log.event_fmt(format_args!(". Number of shipyards was also increased by {}", t.number_3));
        }
        log.event().push_str(".\n");
    }
}

/// A home planet always has its full population, scaled down while it
/// recovers from bombardment.
fn home_population(colony: &mut NamedPlanet, hp_original_base: &mut i64) {
    colony.pop_units = HOME_POPULATION;
    if *hp_original_base != 0 {
        let base = colony.econ_base();
        if base >= *hp_original_base {
            *hp_original_base = 0;
        } else {
            colony.pop_units = base * HOME_POPULATION / *hp_original_base;
        }
    }
}

/// Growth percentage in tenths of a percent, negative when life support
/// cannot keep the colony alive.
fn growth_potential(ls_needed: i64, life_support: i64) -> i64 {
    if ls_needed <= 0 {
        1000
    } else if life_support <= 0 {
        -1
    } else {
        10 * (100 - 100 * ls_needed / life_support)
    }
}

fn colony_population(
    colony: &mut NamedPlanet,
    site: Site,
    ctx: &Context<'_>,
    log: &mut EventLog,
    rng: &mut impl Rng,
) {
    let potential = growth_potential(site.ls_needed, ctx.life_support);
    if potential < 0 {
        log.event_fmt(format_args!(
            "  !!! Life support tech level was too low to support colony on PL {}. Colony was destroyed.\n",
            colony.name
        ));
        colony.kind = ColonyKind::Colony;
        colony.populated = false;
        colony.mi_base = 0;
        colony.ma_base = 0;
        colony.pop_units = 0;
        colony.siege_eff = 0;
        colony.items.set(Item::Colonist, 0);
        colony.items.set(Item::PlanetaryDefense, 0);
        return;
    }

    let mut percent = potential / 100;
    percent += roll(rng, percent / 4) - roll(rng, percent / 4);
    percent += ctx.biology / 20;
    let defenses = colony.items.get(Item::PlanetaryDefense);
    let total = colony.econ_base() + colony.items.get(Item::Colonist) + defenses;
    let mut change = percent * total / 100;

    if colony.mi_base > 0 && colony.ma_base == 0 {
        colony.kind = ColonyKind::MiningColony;
        change = 0;
    } else if colony.kind == ColonyKind::MiningColony {
        colony.kind = ColonyKind::Colony;
        change = 0;
    }
    if colony.ma_base > 0
        && colony.mi_base == 0
        && site.ls_needed <= RESORT_MAX_LSN
        && site.gravity <= ctx.home_gravity
    {
        colony.kind = ColonyKind::ResortColony;
        change = 0;
    } else if colony.kind == ColonyKind::ResortColony {
        colony.kind = ColonyKind::Colony;
        change = 0;
    }
    if total == defenses {
        change = 0;
    }
    colony.pop_units = change.max(0);
}

/// Small colonies lose one unit a turn: population first, then colonists,
/// defenses, manufacturing and mining.
fn attrition(colony: &mut NamedPlanet, log: &mut EventLog) {
    let colonists = colony.items.get(Item::Colonist);
    let defenses = colony.items.get(Item::PlanetaryDefense);
    let total = colony.pop_units + colony.econ_base() + colonists + defenses;
    if total <= 0 || total >= ATTRITION_BELOW {
        return;
    }
    let name = &colony.name;
    let population_only = colony.pop_units > 0;
    let message = if population_only {
        colony.pop_units -= 1;
        format!("  The colony on PL {name} has lost one population unit to normal attrition.")
    } else if colonists > 0 {
        colony.items.set(Item::Colonist, colonists - 1);
        format!("  Number of colonist units on PL {name} was reduced by one unit due to normal attrition.")
    } else if defenses > 0 {
        colony.items.set(Item::PlanetaryDefense, defenses - 1);
        format!(
            "  Number of planetary defense units on PL {name} was reduced by one unit due to normal attrition."
        )
    } else if colony.ma_base > 0 {
        colony.ma_base -= 1;
        format!("  Manufacturing base of PL {name} was reduced by 0.1 due to normal attrition.")
    } else {
        colony.mi_base -= 1;
        format!("  Mining base of PL {name} was reduced by 0.1 due to normal attrition.")
    };
    // Losing population alone goes unreported unless it ends the colony.
    if !population_only || total == 1 {
        let dead = if total == 1 { " The colony is dead!" } else { "" };
        log.event_fmt(format_args!("{message}{dead}\n"));
    }
}

/// Home planets grow about 2% a turn, split between mining and
/// manufacturing according to the planet's mining difficulty.
fn grow_home_base(colony: &mut NamedPlanet, mining_difficulty: i64) {
    let (ib, ab) = (colony.mi_base, colony.ma_base);
    let increase = 20 * (ib + ab) / 1000;
    let denom = 100 + mining_difficulty;
    let mut ab_increase = (100 * (increase + ib) - mining_difficulty * ab + denom / 2) / denom;
    let mut ib_increase = increase - ab_increase;
    if ib_increase < 0 {
        ab_increase = increase;
        ib_increase = 0;
    }
    if ab_increase < 0 {
        ib_increase = increase;
        ab_increase = 0;
    }
    colony.mi_base += ib_increase;
    colony.ma_base += ab_increase;
}

/// Mark the colony populated or not. An emptied mining or resort colony
/// reverts to a plain colony.
fn check_population(colony: &mut NamedPlanet) {
    let total = colony.econ_base()
        + colony.pop_units
        + colony.items.get(Item::Colonist)
        + colony.items.get(Item::PlanetaryDefense)
        + colony.ius_to_install
        + colony.aus_to_install;
    if total > 0 {
        colony.populated = true;
    } else {
        colony.populated = false;
        if matches!(colony.kind, ColonyKind::MiningColony | ColonyKind::ResortColony) {
            colony.kind = ColonyKind::Colony;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, two_species_galaxy};

    fn outpost(name: &str, at: Coords) -> NamedPlanet {
        NamedPlanet {
            name: name.into(),
            coords: at,
            kind: ColonyKind::Colony,
            populated: true,
            ..NamedPlanet::default()
        }
    }

    fn site(ls_needed: i64) -> Site {
        Site {
            ls_needed,
            gravity: 100,
            mining_difficulty: 200,
            message: None,
        }
    }

    fn ctx() -> Context<'static> {
        Context {
            species: "Humans",
            number: 1,
            life_support: 10,
            biology: 0,
            home_gravity: 100,
        }
    }

    #[test]
    fn home_recovers_from_bombardment() {
        let mut colony = outpost("Earth", Coords::new(1, 1, 1).with_orbit(3));
        colony.mi_base = 300;
        colony.ma_base = 300;
        let mut original = 1200;
        home_population(&mut colony, &mut original);
        assert_eq!(colony.pop_units, 750);
        assert_eq!(original, 1200);

        colony.ma_base = 900;
        home_population(&mut colony, &mut original);
        assert_eq!(colony.pop_units, HOME_POPULATION);
        assert_eq!(original, 0);
    }

    #[test]
    fn hostile_colony_is_destroyed() {
        let mut colony = outpost("Hell", Coords::new(1, 1, 1).with_orbit(5));
        colony.mi_base = 40;
        colony.items.set(Item::Colonist, 10);
        let mut log = EventLog::default();
        colony_population(&mut colony, site(12), &ctx(), &mut log, &mut make_rng());
        assert!(!colony.populated);
        assert_eq!(colony.econ_base(), 0);
        assert_eq!(colony.items.get(Item::Colonist), 0);
        assert!(log.into_text().contains(
            "  !!! Life support tech level was too low to support colony on PL Hell. Colony was destroyed.\n"
        ));
    }

    #[test]
    fn mining_only_colony_becomes_mining_colony() {
        let mut colony = outpost("Rock", Coords::new(1, 1, 1).with_orbit(5));
        colony.mi_base = 200;
        let mut log = EventLog::default();
        colony_population(&mut colony, site(3), &ctx(), &mut log, &mut make_rng());
        assert_eq!(colony.kind, ColonyKind::MiningColony);
        assert_eq!(colony.pop_units, 0);

        colony.ma_base = 10;
        colony_population(&mut colony, site(3), &ctx(), &mut log, &mut make_rng());
        assert_eq!(colony.kind, ColonyKind::Colony);
    }

    #[test]
    fn resort_needs_light_gravity() {
        let mut colony = outpost("Spa", Coords::new(1, 1, 1).with_orbit(5));
        colony.ma_base = 200;
        let mut log = EventLog::default();
        colony_population(&mut colony, site(6), &ctx(), &mut log, &mut make_rng());
        assert_eq!(colony.kind, ColonyKind::ResortColony);

        let mut heavy = site(6);
        heavy.gravity = 150;
        colony_population(&mut colony, heavy, &ctx(), &mut log, &mut make_rng());
        assert_eq!(colony.kind, ColonyKind::Colony);
    }

    #[test]
    fn attrition_takes_colonists_before_bases() {
        let mut colony = outpost("Tiny", Coords::new(1, 1, 1).with_orbit(5));
        colony.items.set(Item::Colonist, 3);
        colony.ma_base = 5;
        let mut log = EventLog::default();
        attrition(&mut colony, &mut log);
        assert_eq!(colony.items.get(Item::Colonist), 2);
        assert_eq!(colony.ma_base, 5);
        assert!(log.into_text().ends_with(
            "  Number of colonist units on PL Tiny was reduced by one unit due to normal attrition.\n"
        ));
    }

    #[test]
    fn last_unit_kills_the_colony() {
        let mut colony = outpost("Last", Coords::new(1, 1, 1).with_orbit(5));
        colony.mi_base = 1;
        let mut log = EventLog::default();
        attrition(&mut colony, &mut log);
        check_population(&mut colony);
        assert!(!colony.populated);
        assert!(log
            .into_text()
            .ends_with("  Mining base of PL Last was reduced by 0.1 due to normal attrition. The colony is dead!\n"));
    }

    #[test]
    fn home_base_grows_two_percent() {
        let mut colony = outpost("Earth", Coords::new(1, 1, 1).with_orbit(3));
        colony.kind = ColonyKind::Home;
        colony.mi_base = 1000;
        colony.ma_base = 1000;
        grow_home_base(&mut colony, 100);
        assert_eq!(colony.econ_base(), 2040);
        assert!(colony.mi_base > 1000 || colony.ma_base > 1000);
    }

    #[test]
    fn colonies_feed_the_planet_base() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let home = galaxy.species[0].home;
        let mut colony = outpost("Moon", home);
        colony.mi_base = 150;
        colony.ma_base = 50;
        colony.hiding = true;
        colony.ius_to_install = 10;
        galaxy.species[0].colonies.push(colony);
        let mut econ = AHashMap::new();
        let mut log = EventLog::default();
        update_colonies(
            &mut galaxy,
            0,
            &[],
            &Messages::default(),
            &mut econ,
            &mut log,
            &mut make_rng(),
        )
        .unwrap();
        let moon = galaxy.species[0].colonies.last().unwrap();
        assert!(moon.hidden);
        assert!(!moon.hiding);
        assert_eq!(moon.mi_base, 160);
        assert_eq!(econ.get(&home).copied(), Some(210));
    }
}
