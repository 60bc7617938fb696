//! Ledger entries that only produce log text, plus EU transfers.

use crate::error::TurnError;
use crate::text::EventLog;
use crate::{Item, Messages, Species, Transaction, TransactionKind};

/// Entries of `kind` whose `field` names species `number`.
fn addressed<'a, F>(
    ledger: &'a [Transaction],
    kind: TransactionKind,
    field: F,
    number: u32,
) -> impl Iterator<Item = &'a Transaction> + 'a
where
    F: Fn(&Transaction) -> i64 + 'a,
{
    ledger
        .iter()
        .filter(move |t| t.kind == kind && Transaction::names_species(field(t), number))
}

fn item_from(code: i64) -> Result<Item, TurnError> {
    Item::from_code(code).ok_or(TurnError::UnknownItem(code))
}

fn quantity_of(quantity: i64, item: Item) -> String {
    if quantity == 1 {
        format!("{quantity} {}", item.name())
    } else {
        format!("{quantity} {}s", item.name())
    }
}

pub fn log_mishaps(log: &mut EventLog, number: u32, ledger: &[Transaction]) {
    for t in addressed(ledger, TransactionKind::ShipMishap, |t| t.number_1, number) {
        log.event_fmt(format_args!("  !!! {}", t.name_1));
        match t.value {
            v if v < 3 => log.event().push_str(" disappeared without a trace, cause unknown!\n"),
            3 => log.event_fmt(format_args!(" mis-jumped to {} {} {}!\n", t.x, t.y, t.z)),
            _ => log
                .event()
                .push_str(" had a jump mishap! A fail-safe jump unit was expended.\n"),
        }
    }
}

/// Credit incoming EU transfers. Plain transfers were already paid when the
/// order executed; siege and looting proceeds are paid here.
pub fn receive_eu_transfers(species: &mut Species, ledger: &[Transaction], log: &mut EventLog) {
    let number = species.number;
    for t in ledger.iter().filter(|t| t.recipient == number) {
        let tail = match t.kind {
            TransactionKind::EuTransfer => String::new(),
            TransactionKind::SiegeEuTransfer => format!(
                " as a result of your successful siege of their PL {}. The siege was {}% effective",
                t.name_3, t.number_1
            ),
            TransactionKind::LootingEuTransfer => {
                format!(" as a result of your looting their PL {}", t.name_3)
            }
            _ => continue,
        };
        if t.kind != TransactionKind::EuTransfer {
            species.econ_units += t.value;
        }
        log.event_fmt(format_args!(
            "  {} economic units were received from SP {}{tail}.\n",
            t.value,
            t.name_1
        ));
    }
}

pub fn log_portals_and_telescopes(log: &mut EventLog, number: u32, ledger: &[Transaction]) {
    for t in addressed(ledger, TransactionKind::AlienJumpPortalUsage, |t| t.number_1, number) {
        log.event_fmt(format_args!("  {} {} used jump portal {}.\n", t.name_1, t.name_2, t.name_3));
    }
    for t in addressed(ledger, TransactionKind::TelescopeDetection, |t| t.number_1, number) {
        log.event_fmt(format_args!(
            "! {} detected the operation of an alien gravitic telescope at x = {}, y = {}, z = {}.\n",
            t.name_1,
            t.x,
            t.y,
            t.z
        ));
    }
}

pub fn log_landing_requests(log: &mut EventLog, number: u32, ledger: &[Transaction]) {
    for t in addressed(ledger, TransactionKind::LandingRequest, |t| t.number_1, number) {
        let verdict = if t.value == 0 { "denied" } else { "granted" };
        log.event_fmt(format_args!(
            "  {} owned by SP {} was {verdict} permission to land on PL {}.\n",
            t.name_2,
            t.name_3,
            t.name_1
        ));
    }
}

pub fn log_construction(log: &mut EventLog, number: u32, ledger: &[Transaction]) -> Result<(), TurnError> {
    for t in ledger
        .iter()
        .filter(|t| t.kind == TransactionKind::InterspeciesConstruction && t.recipient == number)
    {
        let line = if t.value == 1 {
            let item = item_from(t.number_2)?;
            let verb = if t.number_1 == 1 { "was" } else { "were" };
            format!(
                "  {} {verb} constructed for you by SP {} on PL {}.",
                quantity_of(t.number_1, item),
                t.name_1,
                t.name_2
            )
        } else {
            format!("  {} was constructed for you by SP {}.", t.name_2, t.name_1)
        };
        log.event_fmt(format_args!("{line}\n"));
    }
    Ok(())
}

pub fn log_siege_detections(log: &mut EventLog, number: u32, ledger: &[Transaction]) -> Result<(), TurnError> {
    for t in addressed(ledger, TransactionKind::DetectionDuringSiege, |t| t.number_3, number) {
        let what = match t.value {
            1 => format!("landing of {} on the planet.", t.name_2),
            2 => format!(
                "construction of {}, but you destroyed it before it could be completed.",
                t.name_2
            ),
            3 => "construction of planetary defenses, but you destroyed them before they could be completed."
                .to_string(),
            4 | 5 => {
                let item = item_from(t.number_2)?;
                let direction = if t.value == 4 { "to" } else { "from" };
                format!(
                    "transfer of {} {direction} PL {}, but you destroyed them in transit.",
                    quantity_of(t.number_1, item),
                    t.name_2
                )
            }
            code => return Err(TurnError::UnknownSiegeDetection(code)),
        };
        log.event_fmt(format_args!(
            "  During the siege of {} PL {}, your forces detected the {what}\n",
            t.name_3,
            t.name_1
        ));
    }
    Ok(())
}

/// Append every message addressed to the species. Unlike the other events
/// these are delivered on the setup turn too.
pub fn deliver_messages(log: &mut EventLog, number: u32, ledger: &[Transaction], messages: &Messages) {
    for t in addressed(ledger, TransactionKind::MessageToSpecies, |t| t.number_2, number) {
        let body = u32::try_from(t.value)
            .ok()
            .and_then(|id| messages.get(&id))
            .map_or("(message not found)", String::as_str);
        log.raw_fmt(format_args!(
            "\n  You received the following message from SP {}:\n\n{body}\n  *** End of Message ***\n\n",
            t.name_1
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, two_species_galaxy};

    fn entry(kind: TransactionKind) -> Transaction {
        Transaction::new(kind)
    }

    #[test]
    fn mishap_wording_follows_value() {
        let mut log = EventLog::default();
        let mut lost = entry(TransactionKind::ShipMishap);
        lost.number_1 = 2;
        lost.name_1 = "DD Hunter".into();
        lost.value = 1;
        let mut misjump = lost.clone();
        misjump.value = 3;
        (misjump.x, misjump.y, misjump.z) = (4, 5, 6);
        let mut failsafe = lost.clone();
        failsafe.value = 4;
        log_mishaps(&mut log, 2, &[lost, misjump, failsafe]);
        assert_eq!(
            log.into_text(),
            "\nOther events:\n\
             \x20 !!! DD Hunter disappeared without a trace, cause unknown!\n\
             \x20 !!! DD Hunter mis-jumped to 4 5 6!\n\
             \x20 !!! DD Hunter had a jump mishap! A fail-safe jump unit was expended.\n"
        );
    }

    #[test]
    fn siege_proceeds_are_credited() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let species = &mut galaxy.species[0];
        let mut plain = entry(TransactionKind::EuTransfer);
        plain.recipient = species.number;
        plain.value = 100;
        plain.name_1 = "Klingons".into();
        let mut siege = plain.clone();
        siege.kind = TransactionKind::SiegeEuTransfer;
        siege.value = 40;
        siege.name_3 = "Qo'noS".into();
        siege.number_1 = 25;
        let before = species.econ_units;
        let mut log = EventLog::default();
        receive_eu_transfers(species, &[plain, siege], &mut log);
        assert_eq!(species.econ_units, before + 40);
        let text = log.into_text();
        assert!(text.contains("  100 economic units were received from SP Klingons.\n"));
        assert!(text.contains(
            "  40 economic units were received from SP Klingons as a result of your successful siege of their PL Qo'noS. The siege was 25% effective.\n"
        ));
    }

    #[test]
    fn unknown_siege_code_is_an_error() {
        let mut t = entry(TransactionKind::DetectionDuringSiege);
        t.number_3 = 1;
        t.value = 9;
        let mut log = EventLog::default();
        assert_eq!(
            log_siege_detections(&mut log, 1, &[t]),
            Err(TurnError::UnknownSiegeDetection(9))
        );
    }

    #[test]
    fn siege_transfer_names_items() {
        let mut t = entry(TransactionKind::DetectionDuringSiege);
        t.number_3 = 1;
        t.value = 4;
        t.number_1 = 20;
        t.number_2 = 4;
        t.name_1 = "Earth".into();
        t.name_2 = "Luna".into();
        t.name_3 = "SP Humans".into();
        let mut log = EventLog::default();
        log_siege_detections(&mut log, 1, &[t]).unwrap();
        assert!(log.into_text().ends_with(
            "  During the siege of SP Humans PL Earth, your forces detected the transfer of 20 Colonist Units to PL Luna, but you destroyed them in transit.\n"
        ));
    }

    #[test]
    fn messages_skip_the_events_header() {
        let mut t = entry(TransactionKind::MessageToSpecies);
        t.number_2 = 3;
        t.value = 7;
        t.name_1 = "Vulcans".into();
        let mut messages = Messages::default();
        messages.insert(7, "Live long.\n".into());
        let mut log = EventLog::default();
        deliver_messages(&mut log, 3, &[t], &messages);
        assert_eq!(
            log.into_text(),
            "\n  You received the following message from SP Vulcans:\n\nLive long.\n\n  *** End of Message ***\n\n"
        );
    }
}
