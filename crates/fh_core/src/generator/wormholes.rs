use rand::seq::SliceRandom;
use rand::Rng;

use crate::setup::GalaxyConfig;
use crate::{Coords, Galaxy};

/// Shortest natural wormhole, in parsecs.
pub const MIN_WORMHOLE_LENGTH: i64 = 20;

/// Link pairs of systems with natural wormholes. Returns the number of
/// wormholes created.
pub fn link_wormholes(galaxy: &mut Galaxy, config: &GalaxyConfig, rng: &mut impl Rng) -> usize {
    let species = galaxy.species.len();
    let systems = galaxy.systems().len();
    let desired = 1 + 8 * systems.saturating_sub(species) / 100;

    let homes: Vec<Coords> = galaxy
        .systems()
        .iter()
        .filter(|s| s.home_species.is_some())
        .map(|s| s.coords)
        .collect();
    let near_home = |c: Coords| {
        config.forbid_nearby_wormholes && homes.iter().any(|h| h.closer_than(c, config.min_distance))
    };
    let eligible = |galaxy: &Galaxy, c: Coords| {
        galaxy
            .system(c)
            .is_some_and(|s| s.wormhole.is_none() && s.home_species.is_none())
            && !near_home(c)
    };

    let mut order: Vec<Coords> = galaxy.systems().iter().map(|s| s.coords).collect();
    order.shuffle(rng);
    let mut created = 0;
    for from in order {
        if created == desired {
            break;
        }
        let to = {
            let view: &Galaxy = galaxy;
            if !eligible(view, from) {
                continue;
            }
            let partners: Vec<Coords> = view
                .systems()
                .iter()
                .map(|s| s.coords)
                .filter(|&to| !from.closer_than(to, MIN_WORMHOLE_LENGTH) && eligible(view, to))
                .collect();
            match partners.choose(rng) {
                Some(&to) => to,
                None => continue,
            }
        };
        if let Some(star) = galaxy.system_mut(from) {
            star.wormhole = Some(to);
        }
        if let Some(star) = galaxy.system_mut(to) {
            star.wormhole = Some(from);
        }
        created += 1;
    }
    created
}
