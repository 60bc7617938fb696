//! Tech transfers, knowledge transfers and experience-driven growth.

use ahash::AHashMap;
use rand::Rng;

use crate::dice::roll;
use crate::error::TurnError;
use crate::text::EventLog;
use crate::{Galaxy, Item, Species, Tech, TechTrack, Transaction, TransactionKind};

/// Level at which interspecies construction becomes possible.
pub const INTERSPECIES_CONSTRUCTION_MA: i64 = 25;

/// Above this level experience can raise a tech at most one level past
/// what the raw points cover.
const CAPPED_GROWTH_ABOVE: i64 = 50;

/// `number_1` of a refused transfer.
pub const TRANSFER_REFUSED: i64 = -1;
/// `number_1` of a transfer the donor could not pay for.
pub const TRANSFER_UNFUNDED: i64 = -2;

fn tech_from(code: i64) -> Result<Tech, TurnError> {
    Tech::from_code(code).ok_or(TurnError::UnknownTech(code))
}

/// Cost of raising a tech from `level` by one through a transfer.
fn transfer_step_cost(level: i64) -> i64 {
    let cost = level * level;
    cost - cost / 4
}

/// Highest level reachable from `from` towards `to` without spending more
/// than `budget`. Returns the level and what it costs.
pub fn affordable_level(from: i64, to: i64, budget: i64) -> (i64, i64) {
    let mut level = from;
    let mut cost = 0;
    while level < to {
        let step = transfer_step_cost(level);
        if cost + step > budget {
            break;
        }
        cost += step;
        level += 1;
    }
    (level, cost)
}

/// Resolve tech transfers received by the species at `index`. Donors pay
/// the cost, and each entry is rewritten with the outcome for the donor's
/// report.
pub fn receive_tech_transfers(
    galaxy: &mut Galaxy,
    index: usize,
    ledger: &mut [Transaction],
    log: &mut EventLog,
) -> Result<(), TurnError> {
    let number = galaxy.species[index].number;
    for t in ledger
        .iter_mut()
        .filter(|t| t.kind == TransactionKind::TechTransfer && t.recipient == number)
    {
        let tech = tech_from(t.value)?;
        log.event_fmt(format_args!("  {} tech transfer from SP {}", tech.name(), t.name_1));
        let current = galaxy.species[index].level(tech);
        if t.number_3 <= current {
            log.event().push_str(" failed.\n");
            t.number_1 = TRANSFER_REFUSED;
            continue;
        }
        let Some(donor) = galaxy.species.iter().position(|s| s.number == t.donor) else {
            log.event().push_str(" failed.\n");
            t.number_1 = TRANSFER_REFUSED;
            continue;
        };
        let funds = galaxy.species[donor].econ_units;
        let budget = if t.number_1 == 0 { funds } else { t.number_1.min(funds) };
        let (level, cost) = affordable_level(current, t.number_3, budget);
        if level == current {
            log.event().push_str(" failed due to lack of funding.\n");
            t.number_1 = TRANSFER_UNFUNDED;
            continue;
        }
        log.event_fmt(format_args!(
            " raised your tech level from {current} to {level} at a cost to them of {cost}.\n"
        ));
        t.number_1 = cost;
        t.number_2 = current;
        t.number_3 = level;
        galaxy.species[donor].econ_units -= cost;
        let track = galaxy.species[index].tech_mut(tech);
        track.level = level;
        track.knowledge = track.knowledge.max(level);
    }
    Ok(())
}

/// Tell donors how their transfers went.
pub fn report_donor_transfers(ledger: &[Transaction], logs: &mut AHashMap<u32, EventLog>) -> Result<(), TurnError> {
    for t in ledger.iter().filter(|t| t.kind == TransactionKind::TechTransfer) {
        let tech = tech_from(t.value)?;
        let Some(log) = logs.get_mut(&t.donor) else {
            continue;
        };
        log.event_fmt(format_args!("  {} tech transfer to SP {}", tech.name(), t.name_2));
        if t.number_1 < 0 {
            log.event().push_str(" failed");
            if t.number_1 == TRANSFER_UNFUNDED {
                log.event().push_str(" due to lack of funding");
            }
        } else {
            log.event_fmt(format_args!(
                " raised their tech level from {} to {} at a cost to you of {}",
                t.number_2, t.number_3, t.number_1
            ));
        }
        log.event().push_str(".\n");
    }
    Ok(())
}

fn growth_cost(level: i64) -> i64 {
    (level * level).max(1)
}

/// Spend experience points on `track`. Returns the new level, which the
/// caller applies.
fn grown_level(track: &mut TechTrack, rng: &mut impl Rng) -> i64 {
    let old = track.level;
    let mut level = old;
    let mut max = i64::MAX;
    if track.experience != 0 {
        let mut points = track.experience;
        let mut reach = old;
        while points >= growth_cost(reach) {
            points -= growth_cost(reach);
            reach += 1;
        }
        if old > CAPPED_GROWTH_ABOVE {
            max = reach + 1;
        }

        // Half the reachable levels are guaranteed.
        let mut points = track.experience;
        for _ in 0..(reach - old) / 2 {
            points -= growth_cost(level);
            level += 1;
        }

        // The rest come from 1-in-N rolls, N being the current level.
        while points >= level.max(1) {
            let n = level.max(1);
            points -= n;
            let i = roll(rng, 16 * n);
            if (8 * n..=8 * n + 15).contains(&i) {
                level = n + 1;
            }
        }
        track.experience = points;
    }
    if old > 0 && roll(rng, 6) == 6 {
        level += 1;
    }
    level.min(max)
}

/// Apply experience growth to every tech, logging the increases.
pub fn grow_techs(species: &mut Species, log: &mut EventLog, rng: &mut impl Rng) {
    for tech in Tech::ALL {
        let track = species.tech_mut(tech);
        let old = track.level;
        let new = grown_level(track, rng);
        if new > old {
            track.level = new;
            track.knowledge = track.knowledge.max(new);
            log.event_fmt(format_args!("  {} tech level rose from {old} to {new}.\n", tech.name()));
        }
    }
}

/// Announce items unlocked since the start of the turn and reset the
/// starting levels.
pub fn announce_new_technology(species: &mut Species, log: &mut EventLog) {
    for tech in Tech::ALL {
        let TechTrack { level, init_level, .. } = *species.tech(tech);
        if level > init_level {
            for item in Item::ALL {
                let spec = item.spec();
                if spec.critical_tech == Some(tech) && (init_level + 1..=level).contains(&spec.tech_required) {
                    log.event_fmt(format_args!("  You now have the technology to build {}s.\n", spec.name));
                }
            }
            if tech == Tech::Manufacturing
                && (init_level + 1..=level).contains(&INTERSPECIES_CONSTRUCTION_MA)
            {
                log.event()
                    .push_str("  You now have the technology to do interspecies construction.\n");
            }
        }
        species.tech_mut(tech).init_level = level;
    }
}

pub fn receive_knowledge(species: &mut Species, ledger: &[Transaction], log: &mut EventLog) -> Result<(), TurnError> {
    let number = species.number;
    for t in ledger
        .iter()
        .filter(|t| t.kind == TransactionKind::KnowledgeTransfer && t.recipient == number)
    {
        let tech = tech_from(t.value)?;
        let track = species.tech_mut(tech);
        if t.number_3 > track.level.max(track.knowledge) {
            track.knowledge = t.number_3;
            log.event_fmt(format_args!(
                "  SP {} transferred knowledge of {} to you up to tech level {}.\n",
                t.name_1,
                tech.name(),
                t.number_3
            ));
        }
    }
    Ok(())
}
