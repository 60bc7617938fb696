//! Type definitions for `fh_core`.
//!
//! Galaxy, star systems, planets, species, colonies, ships and the
//! transaction ledger.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::{Coords, Gas, Item, ShipClass, StarColor, StarKind, Tech};

/// Message bodies keyed by message id.
pub type Messages = AHashMap<u32, String>;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// Item quantities, iterated in item-table order. Zero entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<Item, i64>);

impl Inventory {
    pub fn get(&self, item: Item) -> i64 {
        self.0.get(&item).copied().unwrap_or(0)
    }

    pub fn set(&mut self, item: Item, quantity: i64) {
        if quantity == 0 {
            self.0.remove(&item);
        } else {
            self.0.insert(item, quantity);
        }
    }

    pub fn add(&mut self, item: Item, quantity: i64) {
        self.set(item, self.get(item) + quantity);
    }

    /// Non-zero entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (Item, i64)> + '_ {
        self.0.iter().map(|(item, qty)| (*item, *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Remove and return every entry.
    pub fn drain(&mut self) -> Vec<(Item, i64)> {
        std::mem::take(&mut self.0).into_iter().collect()
    }
}

impl<const N: usize> From<[(Item, i64); N]> for Inventory {
    fn from(entries: [(Item, i64); N]) -> Self {
        let mut inv = Inventory::default();
        for (item, qty) in entries {
            inv.add(item, qty);
        }
        inv
    }
}

// ---------------------------------------------------------------------------
// Planets and stars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasShare {
    pub gas: Gas,
    pub percent: i64,
}

pub type Atmosphere = SmallVec<[GasShare; 4]>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanetSpecial {
    #[default]
    None,
    IdealHome,
    IdealColony,
    RadioactiveHellhole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub orbit: i32,
    pub diameter: i64,
    /// Surface gravity in hundredths of a standard g.
    pub gravity: i64,
    /// Density in hundredths of g/cc.
    pub density: i64,
    pub temperature_class: i64,
    pub pressure_class: i64,
    /// Mining difficulty in hundredths.
    pub mining_difficulty: i64,
    #[serde(default)]
    pub mining_difficulty_increase: i64,
    #[serde(default)]
    pub atmosphere: Atmosphere,
    #[serde(default = "full_efficiency")]
    pub econ_efficiency: i64,
    #[serde(default)]
    pub special: PlanetSpecial,
    #[serde(default)]
    pub message: Option<u32>,
}

fn full_efficiency() -> i64 {
    100
}

impl Planet {
    pub fn gas_percent(&self, gas: Gas) -> i64 {
        self.atmosphere
            .iter()
            .find(|share| share.gas == gas)
            .map_or(0, |share| share.percent)
    }

    pub fn is_gas_giant(&self) -> bool {
        self.diameter > 40
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Star {
    pub coords: Coords,
    pub kind: StarKind,
    pub color: StarColor,
    pub size: i64,
    pub planets: Vec<Planet>,
    #[serde(default)]
    pub wormhole: Option<Coords>,
    #[serde(default)]
    pub visited_by: BTreeSet<u32>,
    #[serde(default)]
    pub home_species: Option<u32>,
    #[serde(default)]
    pub potential_home: bool,
    #[serde(default)]
    pub message: Option<u32>,
}

impl Star {
    /// Planet in the given (1-based) orbit.
    pub fn planet(&self, orbit: i32) -> Option<&Planet> {
        let index = usize::try_from(orbit).ok()?.checked_sub(1)?;
        self.planets.get(index)
    }

    pub fn planet_mut(&mut self, orbit: i32) -> Option<&mut Planet> {
        let index = usize::try_from(orbit).ok()?.checked_sub(1)?;
        self.planets.get_mut(index)
    }

    /// Stellar classification, e.g. `dG5`.
    pub fn stellar_type(&self) -> String {
        format!("{}{}{}", self.kind.code(), self.color.code(), self.size)
    }
}

// ---------------------------------------------------------------------------
// Galaxy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Galaxy {
    pub id: Uuid,
    pub name: String,
    pub radius: i32,
    /// Species count the galaxy was designed for; sizes contact masks.
    pub designed_species: usize,
    pub species: Vec<Species>,
    systems: Vec<Star>,
    index: AHashMap<i64, usize>,
}

impl Galaxy {
    pub fn new(id: Uuid, name: String, radius: i32, designed_species: usize) -> Self {
        Galaxy {
            id,
            name,
            radius,
            designed_species,
            species: Vec::new(),
            systems: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub fn center(&self) -> Coords {
        Coords::new(self.radius, self.radius, self.radius)
    }

    /// Add a system. Returns false when a system already sits at its key.
    pub fn add_system(&mut self, star: Star) -> bool {
        let key = star.coords.system_key();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.systems.len());
        self.systems.push(star);
        true
    }

    pub fn systems(&self) -> &[Star] {
        &self.systems
    }

    pub fn systems_mut(&mut self) -> &mut [Star] {
        &mut self.systems
    }

    pub fn has_system(&self, at: Coords) -> bool {
        self.index.contains_key(&at.system_key())
    }

    pub fn system(&self, at: Coords) -> Option<&Star> {
        self.index.get(&at.system_key()).map(|&i| &self.systems[i])
    }

    pub fn system_mut(&mut self, at: Coords) -> Option<&mut Star> {
        let i = *self.index.get(&at.system_key())?;
        self.systems.get_mut(i)
    }

    pub fn planet(&self, at: Coords) -> Option<&Planet> {
        self.system(at)?.planet(at.orbit)
    }

    pub fn planet_mut(&mut self, at: Coords) -> Option<&mut Planet> {
        self.system_mut(at)?.planet_mut(at.orbit)
    }

    pub fn species(&self, number: u32) -> Option<&Species> {
        self.species.iter().find(|sp| sp.number == number)
    }

    pub fn species_name(&self, number: u32) -> &str {
        self.species(number).map_or("???", |sp| sp.name.as_str())
    }

    pub fn wormhole_count(&self) -> usize {
        self.systems.iter().filter(|s| s.wormhole.is_some()).count() / 2
    }
}

// ---------------------------------------------------------------------------
// Species
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechTrack {
    pub level: i64,
    /// Level as of the last high-tech notice.
    pub init_level: i64,
    /// Knowledge received from other species, not yet usable.
    pub knowledge: i64,
    pub experience: i64,
}

impl TechTrack {
    pub fn starting(level: i64) -> Self {
        TechTrack {
            level,
            init_level: level,
            knowledge: level,
            experience: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasTolerance {
    pub required: Gas,
    pub required_min: i64,
    pub required_max: i64,
    pub neutral: Vec<Gas>,
    pub poison: Vec<Gas>,
}

/// Per-species flags indexed by species number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeciesMask(Vec<bool>);

impl SpeciesMask {
    pub fn sized(designed_species: usize) -> Self {
        SpeciesMask(vec![false; designed_species + 1])
    }

    pub fn contains(&self, number: u32) -> bool {
        self.0.get(number as usize).copied().unwrap_or(false)
    }

    pub fn insert(&mut self, number: u32) {
        let i = number as usize;
        if i >= self.0.len() {
            self.0.resize(i + 1, false);
        }
        self.0[i] = true;
    }

    /// Species numbers in ascending order.
    pub fn members(&self) -> impl Iterator<Item = u32> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, set)| **set)
            .filter_map(|(i, _)| u32::try_from(i).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Species {
    pub number: u32,
    pub name: String,
    pub government_name: String,
    pub government_type: String,
    /// Coordinates of the home planet.
    pub home: Coords,
    pub techs: [TechTrack; 6],
    pub gases: GasTolerance,
    #[serde(default)]
    pub auto_orders: bool,
    pub econ_units: i64,
    /// Mining plus manufacturing base of the home planet at creation.
    pub hp_original_base: i64,
    #[serde(default)]
    pub fleet_cost: i64,
    /// Fleet cost as ten-thousandths of total production.
    #[serde(default)]
    pub fleet_percent_cost: i64,
    pub contact: SpeciesMask,
    pub ally: SpeciesMask,
    pub enemy: SpeciesMask,
    pub colonies: Vec<NamedPlanet>,
    pub ships: Vec<Ship>,
}

impl Species {
    pub fn tech(&self, tech: Tech) -> &TechTrack {
        &self.techs[tech.index()]
    }

    pub fn tech_mut(&mut self, tech: Tech) -> &mut TechTrack {
        &mut self.techs[tech.index()]
    }

    pub fn level(&self, tech: Tech) -> i64 {
        self.tech(tech).level
    }

    /// Reference used for this species in reports, e.g. `SP Vulcans`.
    pub fn label(&self) -> String {
        format!("SP {}", self.name)
    }

    pub fn colony_at(&self, at: Coords) -> Option<&NamedPlanet> {
        self.colonies.iter().find(|c| c.coords.same_planet(at))
    }
}

// ---------------------------------------------------------------------------
// Colonies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColonyKind {
    /// Named but not settled.
    #[default]
    Claimed,
    Home,
    Colony,
    MiningColony,
    ResortColony,
    Disbanded,
}

impl ColonyKind {
    pub fn is_colony(self) -> bool {
        matches!(
            self,
            ColonyKind::Colony | ColonyKind::MiningColony | ColonyKind::ResortColony
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedPlanet {
    pub name: String,
    pub coords: Coords,
    pub kind: ColonyKind,
    pub populated: bool,
    pub hiding: bool,
    pub hidden: bool,
    pub siege_eff: i64,
    pub shipyards: i64,
    /// Mining base, tenths.
    pub mi_base: i64,
    /// Manufacturing base, tenths.
    pub ma_base: i64,
    pub pop_units: i64,
    pub ius_needed: i64,
    pub aus_needed: i64,
    pub auto_ius: i64,
    pub auto_aus: i64,
    pub ius_to_install: i64,
    pub aus_to_install: i64,
    pub use_on_ambush: i64,
    pub message: Option<u32>,
    pub items: Inventory,
}

impl NamedPlanet {
    pub fn econ_base(&self) -> i64 {
        self.mi_base + self.ma_base
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Propulsion {
    Ftl,
    SubLight,
    Starbase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShipStatus {
    UnderConstruction,
    OnSurface,
    InOrbit,
    InDeepSpace,
    JumpedInCombat,
    ForcedJump,
    Destroyed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JumpState {
    #[default]
    None,
    Jumped,
    Moved,
    ViaWormhole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub coords: Coords,
    pub class: ShipClass,
    pub propulsion: Propulsion,
    pub status: ShipStatus,
    pub tonnage: i64,
    #[serde(default)]
    pub age: i64,
    #[serde(default)]
    pub remaining_cost: i64,
    #[serde(default)]
    pub items: Inventory,
    #[serde(default)]
    pub just_jumped: JumpState,
    #[serde(default)]
    pub arrived_via_wormhole: bool,
    #[serde(default)]
    pub dest: Option<Coords>,
    #[serde(default)]
    pub loading_point: Option<Coords>,
    #[serde(default)]
    pub unloading_point: Option<Coords>,
    #[serde(default)]
    pub auto_jump_target: Option<Coords>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum TransactionKind {
    EuTransfer = 1,
    MessageToSpecies = 2,
    BesiegePlanet = 3,
    SiegeEuTransfer = 4,
    TechTransfer = 5,
    DetectionDuringSiege = 6,
    ShipMishap = 7,
    Assimilation = 8,
    InterspeciesConstruction = 9,
    TelescopeDetection = 10,
    AlienJumpPortalUsage = 11,
    KnowledgeTransfer = 12,
    LandingRequest = 13,
    LootingEuTransfer = 14,
    AlliesOrder = 15,
}

impl TransactionKind {
    const ALL: [TransactionKind; 15] = [
        TransactionKind::EuTransfer,
        TransactionKind::MessageToSpecies,
        TransactionKind::BesiegePlanet,
        TransactionKind::SiegeEuTransfer,
        TransactionKind::TechTransfer,
        TransactionKind::DetectionDuringSiege,
        TransactionKind::ShipMishap,
        TransactionKind::Assimilation,
        TransactionKind::InterspeciesConstruction,
        TransactionKind::TelescopeDetection,
        TransactionKind::AlienJumpPortalUsage,
        TransactionKind::KnowledgeTransfer,
        TransactionKind::LandingRequest,
        TransactionKind::LootingEuTransfer,
        TransactionKind::AlliesOrder,
    ];
}

impl TryFrom<u8> for TransactionKind {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        usize::from(code)
            .checked_sub(1)
            .and_then(|i| TransactionKind::ALL.get(i).copied())
            .ok_or_else(|| format!("unknown transaction type {code}"))
    }
}

impl From<TransactionKind> for u8 {
    fn from(kind: TransactionKind) -> u8 {
        kind as u8
    }
}

/// One interspecies ledger entry. The meaning of the numbered payload
/// fields depends on the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub donor: u32,
    #[serde(default)]
    pub recipient: u32,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub z: i32,
    #[serde(default)]
    pub pn: i32,
    #[serde(default)]
    pub number_1: i64,
    #[serde(default)]
    pub name_1: String,
    #[serde(default)]
    pub number_2: i64,
    #[serde(default)]
    pub name_2: String,
    #[serde(default)]
    pub number_3: i64,
    #[serde(default)]
    pub name_3: String,
}

impl Transaction {
    pub fn new(kind: TransactionKind) -> Self {
        Transaction {
            kind,
            donor: 0,
            recipient: 0,
            value: 0,
            x: 0,
            y: 0,
            z: 0,
            pn: 0,
            number_1: 0,
            name_1: String::new(),
            number_2: 0,
            name_2: String::new(),
            number_3: 0,
            name_3: String::new(),
        }
    }

    pub fn coords(&self) -> Coords {
        Coords::new(self.x, self.y, self.z).with_orbit(self.pn)
    }

    /// True when a numbered payload field names the given species.
    pub fn names_species(field: i64, number: u32) -> bool {
        field == i64::from(number)
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Highest turn number a game can reach.
pub const MAX_TURN: u32 = 999_999;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Current turn; 0 is the setup turn.
    pub turn: u32,
}

impl Game {
    pub fn is_setup_turn(self) -> bool {
        self.turn == 0
    }
}
