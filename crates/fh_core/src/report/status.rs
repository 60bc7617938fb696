use std::fmt::Write;

use super::species_list;
use crate::error::ReportError;
use crate::{Galaxy, Gas, Species, Tech};

pub(super) fn write_status(
    out: &mut String,
    galaxy: &Galaxy,
    species: &Species,
    turn: u32,
) -> Result<(), ReportError> {
    write!(out, "\n\t\t\t SPECIES STATUS\n\n\t\t\tSTART OF TURN {turn}\n\n")?;
    writeln!(out, "Species name: {}", species.name)?;
    writeln!(out, "Government name: {}", species.government_name)?;
    writeln!(out, "Government type: {}", species.government_type)?;

    out.push_str("\nTech Levels:\n");
    for tech in Tech::ALL {
        let track = species.tech(tech);
        write!(out, "   {} = {}", tech.name(), track.level)?;
        if track.knowledge > track.level {
            write!(out, "/{}", track.knowledge)?;
        }
        out.push('\n');
    }

    let gases = &species.gases;
    write!(
        out,
        "\n\n\nAtmospheric Requirement: {}%-{}% {}",
        gases.required_min,
        gases.required_max,
        gases.required.symbol()
    )?;
    write!(out, "\nNeutral Gases: {}", gas_list(&gases.neutral))?;
    write!(out, "\nPoisonous Gases: {}\n", gas_list(&gases.poison))?;

    let percent = species.fleet_percent_cost;
    write!(
        out,
        "\nFleet maintenance cost = {} ({}.{:02}% of total production)\n",
        species.fleet_cost,
        percent / 100,
        percent % 100
    )?;

    for (label, mask) in [
        ("Species met", &species.contact),
        ("Allies", &species.ally),
        ("Enemies", &species.enemy),
    ] {
        if mask.members().next().is_some() {
            write!(out, "\n{label}: {}\n", species_list(galaxy, mask.members()))?;
        }
    }

    write!(out, "\nEconomic units = {}\n", species.econ_units)?;
    Ok(())
}

fn gas_list(gases: &[Gas]) -> String {
    gases.iter().map(|g| g.symbol()).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{make_rng, two_species_galaxy};

    #[test]
    fn status_lists_techs_and_contacts() {
        let mut galaxy = two_species_galaxy(&mut make_rng());
        let other = galaxy.species[1].number;
        let species = &mut galaxy.species[0];
        species.tech_mut(Tech::Gravitics).knowledge = 9;
        species.contact.insert(other);
        species.fleet_cost = 120;
        species.fleet_percent_cost = 1234;
        let species = galaxy.species[0].clone();

        let mut out = String::new();
        write_status(&mut out, &galaxy, &species, 4).unwrap();
        assert!(out.starts_with("\n\t\t\t SPECIES STATUS\n\n\t\t\tSTART OF TURN 4\n\n"));
        assert!(out.contains("   Mining = 10\n"));
        assert!(out.contains("   Gravitics = 4/9\n"));
        assert!(out.contains("Atmospheric Requirement: 10%-42% O2"));
        assert!(out.contains("\nFleet maintenance cost = 120 (12.34% of total production)\n"));
        assert!(out.contains("\nSpecies met: SP Species 2\n"));
        assert!(!out.contains("Allies"));
    }
}
