//! Static game tables: technologies, items, ship classes, gases and stellar
//! classifications.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Technologies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tech {
    #[serde(rename = "MI")]
    Mining,
    #[serde(rename = "MA")]
    Manufacturing,
    #[serde(rename = "ML")]
    Military,
    #[serde(rename = "GV")]
    Gravitics,
    #[serde(rename = "LS")]
    LifeSupport,
    #[serde(rename = "BI")]
    Biology,
}

impl Tech {
    pub const ALL: [Tech; 6] = [
        Tech::Mining,
        Tech::Manufacturing,
        Tech::Military,
        Tech::Gravitics,
        Tech::LifeSupport,
        Tech::Biology,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tech from its ledger code (0-based table position).
    pub fn from_code(code: i64) -> Option<Tech> {
        usize::try_from(code).ok().and_then(|i| Tech::ALL.get(i).copied())
    }

    pub fn abbr(self) -> &'static str {
        match self {
            Tech::Mining => "MI",
            Tech::Manufacturing => "MA",
            Tech::Military => "ML",
            Tech::Gravitics => "GV",
            Tech::LifeSupport => "LS",
            Tech::Biology => "BI",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tech::Mining => "Mining",
            Tech::Manufacturing => "Manufacturing",
            Tech::Military => "Military",
            Tech::Gravitics => "Gravitics",
            Tech::LifeSupport => "Life Support",
            Tech::Biology => "Biology",
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Item {
    #[serde(rename = "RM")]
    RawMaterial,
    #[serde(rename = "PD")]
    PlanetaryDefense,
    #[serde(rename = "SU")]
    StarbaseUnit,
    #[serde(rename = "DR")]
    DamageRepair,
    #[serde(rename = "CU")]
    Colonist,
    #[serde(rename = "IU")]
    ColonialMining,
    #[serde(rename = "AU")]
    ColonialManufacturing,
    #[serde(rename = "FS")]
    FailSafeJump,
    #[serde(rename = "JP")]
    JumpPortal,
    #[serde(rename = "FM")]
    ForcedMisjump,
    #[serde(rename = "FJ")]
    ForcedJump,
    #[serde(rename = "GT")]
    GraviticTelescope,
    #[serde(rename = "FD")]
    FieldDistortion,
    #[serde(rename = "TP")]
    TerraformingPlant,
    #[serde(rename = "GW")]
    GermWarfare,
    #[serde(rename = "SG1")]
    Shield1,
    #[serde(rename = "SG2")]
    Shield2,
    #[serde(rename = "SG3")]
    Shield3,
    #[serde(rename = "SG4")]
    Shield4,
    #[serde(rename = "SG5")]
    Shield5,
    #[serde(rename = "SG6")]
    Shield6,
    #[serde(rename = "SG7")]
    Shield7,
    #[serde(rename = "SG8")]
    Shield8,
    #[serde(rename = "SG9")]
    Shield9,
    #[serde(rename = "GU1")]
    Gun1,
    #[serde(rename = "GU2")]
    Gun2,
    #[serde(rename = "GU3")]
    Gun3,
    #[serde(rename = "GU4")]
    Gun4,
    #[serde(rename = "GU5")]
    Gun5,
    #[serde(rename = "GU6")]
    Gun6,
    #[serde(rename = "GU7")]
    Gun7,
    #[serde(rename = "GU8")]
    Gun8,
    #[serde(rename = "GU9")]
    Gun9,
    #[serde(rename = "X1")]
    X1,
    #[serde(rename = "X2")]
    X2,
    #[serde(rename = "X3")]
    X3,
    #[serde(rename = "X4")]
    X4,
    #[serde(rename = "X5")]
    X5,
}

pub struct ItemSpec {
    pub abbr: &'static str,
    pub name: &'static str,
    pub cost: i64,
    pub carry_capacity: i64,
    pub critical_tech: Option<Tech>,
    pub tech_required: i64,
}

const fn item(
    abbr: &'static str,
    name: &'static str,
    cost: i64,
    carry_capacity: i64,
    critical_tech: Option<Tech>,
    tech_required: i64,
) -> ItemSpec {
    ItemSpec {
        abbr,
        name,
        cost,
        carry_capacity,
        critical_tech,
        tech_required,
    }
}

const MI: Option<Tech> = Some(Tech::Mining);
const MA: Option<Tech> = Some(Tech::Manufacturing);
const ML: Option<Tech> = Some(Tech::Military);
const GV: Option<Tech> = Some(Tech::Gravitics);
const LS: Option<Tech> = Some(Tech::LifeSupport);
const BI: Option<Tech> = Some(Tech::Biology);

static ITEMS: [ItemSpec; 38] = [
    item("RM", "Raw Material Unit", 1, 1, MI, 1),
    item("PD", "Planetary Defense Unit", 1, 3, ML, 1),
    item("SU", "Starbase Unit", 110, 20, MA, 20),
    item("DR", "Damage Repair Unit", 50, 1, MA, 30),
    item("CU", "Colonist Unit", 1, 1, LS, 1),
    item("IU", "Colonial Mining Unit", 1, 1, MI, 1),
    item("AU", "Colonial Manufacturing Unit", 1, 1, MA, 1),
    item("FS", "Fail-Safe Jump Unit", 25, 1, GV, 20),
    item("JP", "Jump Portal Unit", 100, 10, GV, 25),
    item("FM", "Forced Misjump Unit", 100, 5, GV, 30),
    item("FJ", "Forced Jump Unit", 125, 5, GV, 40),
    item("GT", "Gravitic Telescope Unit", 500, 20, GV, 50),
    item("FD", "Field Distortion Unit", 50, 1, LS, 20),
    item("TP", "Terraforming Plant", 50000, 100, BI, 40),
    item("GW", "Germ Warfare Bomb", 1000, 100, BI, 50),
    item("SG1", "Mark-1 Shield Generator", 250, 5, LS, 10),
    item("SG2", "Mark-2 Shield Generator", 500, 10, LS, 20),
    item("SG3", "Mark-3 Shield Generator", 750, 15, LS, 30),
    item("SG4", "Mark-4 Shield Generator", 1000, 20, LS, 40),
    item("SG5", "Mark-5 Shield Generator", 1250, 25, LS, 50),
    item("SG6", "Mark-6 Shield Generator", 1500, 30, LS, 60),
    item("SG7", "Mark-7 Shield Generator", 1750, 35, LS, 70),
    item("SG8", "Mark-8 Shield Generator", 2000, 40, LS, 80),
    item("SG9", "Mark-9 Shield Generator", 2250, 45, LS, 90),
    item("GU1", "Mark-1 Gun Unit", 250, 5, ML, 10),
    item("GU2", "Mark-2 Gun Unit", 500, 10, ML, 20),
    item("GU3", "Mark-3 Gun Unit", 750, 15, ML, 30),
    item("GU4", "Mark-4 Gun Unit", 1000, 20, ML, 40),
    item("GU5", "Mark-5 Gun Unit", 1250, 25, ML, 50),
    item("GU6", "Mark-6 Gun Unit", 1500, 30, ML, 60),
    item("GU7", "Mark-7 Gun Unit", 1750, 35, ML, 70),
    item("GU8", "Mark-8 Gun Unit", 2000, 40, ML, 80),
    item("GU9", "Mark-9 Gun Unit", 2250, 45, ML, 90),
    item("X1", "X1 Unit", 9999, 9999, None, 999),
    item("X2", "X2 Unit", 9999, 9999, None, 999),
    item("X3", "X3 Unit", 9999, 9999, None, 999),
    item("X4", "X4 Unit", 9999, 9999, None, 999),
    item("X5", "X5 Unit", 9999, 9999, None, 999),
];

impl Item {
    pub const ALL: [Item; 38] = [
        Item::RawMaterial,
        Item::PlanetaryDefense,
        Item::StarbaseUnit,
        Item::DamageRepair,
        Item::Colonist,
        Item::ColonialMining,
        Item::ColonialManufacturing,
        Item::FailSafeJump,
        Item::JumpPortal,
        Item::ForcedMisjump,
        Item::ForcedJump,
        Item::GraviticTelescope,
        Item::FieldDistortion,
        Item::TerraformingPlant,
        Item::GermWarfare,
        Item::Shield1,
        Item::Shield2,
        Item::Shield3,
        Item::Shield4,
        Item::Shield5,
        Item::Shield6,
        Item::Shield7,
        Item::Shield8,
        Item::Shield9,
        Item::Gun1,
        Item::Gun2,
        Item::Gun3,
        Item::Gun4,
        Item::Gun5,
        Item::Gun6,
        Item::Gun7,
        Item::Gun8,
        Item::Gun9,
        Item::X1,
        Item::X2,
        Item::X3,
        Item::X4,
        Item::X5,
    ];

    pub fn spec(self) -> &'static ItemSpec {
        &ITEMS[self as usize]
    }

    /// Item from its ledger code (0-based table position).
    pub fn from_code(code: i64) -> Option<Item> {
        usize::try_from(code).ok().and_then(|i| Item::ALL.get(i).copied())
    }

    pub fn abbr(self) -> &'static str {
        self.spec().abbr
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn cost(self) -> i64 {
        self.spec().cost
    }
}

// ---------------------------------------------------------------------------
// Ship classes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipClass {
    #[serde(rename = "PB")]
    PicketBoat,
    #[serde(rename = "CT")]
    Corvette,
    #[serde(rename = "ES")]
    Escort,
    #[serde(rename = "FF")]
    Frigate,
    #[serde(rename = "DD")]
    Destroyer,
    #[serde(rename = "CL")]
    LightCruiser,
    #[serde(rename = "CS")]
    StrikeCruiser,
    #[serde(rename = "CA")]
    HeavyCruiser,
    #[serde(rename = "CC")]
    CommandCruiser,
    #[serde(rename = "BC")]
    Battlecruiser,
    #[serde(rename = "BS")]
    Battleship,
    #[serde(rename = "DN")]
    Dreadnought,
    #[serde(rename = "SD")]
    SuperDreadnought,
    #[serde(rename = "BM")]
    Battlemoon,
    #[serde(rename = "BW")]
    Battleworld,
    #[serde(rename = "BR")]
    Battlestar,
    #[serde(rename = "BA")]
    Starbase,
    #[serde(rename = "TR")]
    Transport,
}

impl ShipClass {
    pub fn abbr(self) -> &'static str {
        self.spec().0
    }

    /// Hull size in units of 10,000 tons. Starbases and transports carry
    /// their tonnage on the ship itself.
    pub fn tonnage(self) -> i64 {
        self.spec().1
    }

    /// Construction cost. Starbases and transports are priced per tonnage unit.
    pub fn cost(self) -> i64 {
        self.spec().2
    }

    fn spec(self) -> (&'static str, i64, i64) {
        match self {
            ShipClass::PicketBoat => ("PB", 1, 100),
            ShipClass::Corvette => ("CT", 2, 200),
            ShipClass::Escort => ("ES", 5, 500),
            ShipClass::Frigate => ("FF", 10, 1000),
            ShipClass::Destroyer => ("DD", 15, 1500),
            ShipClass::LightCruiser => ("CL", 20, 2000),
            ShipClass::StrikeCruiser => ("CS", 25, 2500),
            ShipClass::HeavyCruiser => ("CA", 30, 3000),
            ShipClass::CommandCruiser => ("CC", 35, 3500),
            ShipClass::Battlecruiser => ("BC", 40, 4000),
            ShipClass::Battleship => ("BS", 45, 4500),
            ShipClass::Dreadnought => ("DN", 50, 5000),
            ShipClass::SuperDreadnought => ("SD", 55, 5500),
            ShipClass::Battlemoon => ("BM", 60, 6000),
            ShipClass::Battleworld => ("BW", 65, 6500),
            ShipClass::Battlestar => ("BR", 70, 7000),
            ShipClass::Starbase => ("BA", 1, 100),
            ShipClass::Transport => ("TR", 1, 100),
        }
    }
}

// ---------------------------------------------------------------------------
// Gases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Gas {
    #[serde(rename = "H2")]
    Hydrogen,
    #[serde(rename = "CH4")]
    Methane,
    #[serde(rename = "He")]
    Helium,
    #[serde(rename = "NH3")]
    Ammonia,
    #[serde(rename = "N2")]
    Nitrogen,
    #[serde(rename = "CO2")]
    CarbonDioxide,
    #[serde(rename = "O2")]
    Oxygen,
    #[serde(rename = "HCl")]
    HydrogenChloride,
    #[serde(rename = "Cl2")]
    Chlorine,
    #[serde(rename = "F2")]
    Fluorine,
    #[serde(rename = "H2O")]
    Steam,
    #[serde(rename = "SO2")]
    SulfurDioxide,
    #[serde(rename = "H2S")]
    HydrogenSulfide,
}

impl Gas {
    pub const ALL: [Gas; 13] = [
        Gas::Hydrogen,
        Gas::Methane,
        Gas::Helium,
        Gas::Ammonia,
        Gas::Nitrogen,
        Gas::CarbonDioxide,
        Gas::Oxygen,
        Gas::HydrogenChloride,
        Gas::Chlorine,
        Gas::Fluorine,
        Gas::Steam,
        Gas::SulfurDioxide,
        Gas::HydrogenSulfide,
    ];

    /// Gas from its 1-based table number.
    pub fn from_number(n: i64) -> Option<Gas> {
        usize::try_from(n - 1).ok().and_then(|i| Gas::ALL.get(i).copied())
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Gas::Hydrogen => "H2",
            Gas::Methane => "CH4",
            Gas::Helium => "He",
            Gas::Ammonia => "NH3",
            Gas::Nitrogen => "N2",
            Gas::CarbonDioxide => "CO2",
            Gas::Oxygen => "O2",
            Gas::HydrogenChloride => "HCl",
            Gas::Chlorine => "Cl2",
            Gas::Fluorine => "F2",
            Gas::Steam => "H2O",
            Gas::SulfurDioxide => "SO2",
            Gas::HydrogenSulfide => "H2S",
        }
    }

    /// Temperature classes over which the gas stays in the atmosphere, and
    /// whether only a gas giant's gravity can hold it.
    pub(crate) fn stability(self) -> (i64, i64, bool) {
        match self {
            Gas::Hydrogen | Gas::Helium => (1, 30, true),
            Gas::Methane => (3, 11, false),
            Gas::Ammonia => (7, 13, false),
            Gas::Nitrogen => (2, 30, false),
            Gas::CarbonDioxide => (9, 30, false),
            Gas::Oxygen => (5, 18, false),
            Gas::HydrogenChloride | Gas::Chlorine => (12, 30, false),
            Gas::Fluorine => (2, 10, false),
            Gas::Steam => (10, 17, false),
            Gas::SulfurDioxide => (14, 30, false),
            Gas::HydrogenSulfide => (11, 30, false),
        }
    }
}

// ---------------------------------------------------------------------------
// Stars
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarKind {
    Dwarf,
    Degenerate,
    MainSequence,
    Giant,
}

impl StarKind {
    pub fn code(self) -> char {
        match self {
            StarKind::Dwarf => 'd',
            StarKind::Degenerate => 'D',
            StarKind::MainSequence => 'M',
            StarKind::Giant => 'g',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StarKind::Dwarf => "dwarf",
            StarKind::Degenerate => "degenerate",
            StarKind::MainSequence => "main sequence",
            StarKind::Giant => "giant",
        }
    }

    /// Number of dice rolled for the planet count.
    pub(crate) fn planet_dice(self) -> i64 {
        match self {
            StarKind::Dwarf => 1,
            StarKind::Degenerate | StarKind::MainSequence => 2,
            StarKind::Giant => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarColor {
    Blue,
    BlueWhite,
    White,
    YellowWhite,
    Yellow,
    Orange,
    Red,
}

impl StarColor {
    pub const ALL: [StarColor; 7] = [
        StarColor::Blue,
        StarColor::BlueWhite,
        StarColor::White,
        StarColor::YellowWhite,
        StarColor::Yellow,
        StarColor::Orange,
        StarColor::Red,
    ];

    pub fn code(self) -> char {
        match self {
            StarColor::Blue => 'O',
            StarColor::BlueWhite => 'B',
            StarColor::White => 'A',
            StarColor::YellowWhite => 'F',
            StarColor::Yellow => 'G',
            StarColor::Orange => 'K',
            StarColor::Red => 'M',
        }
    }

    /// Size of the die rolled for the planet count; hotter stars hold more planets.
    pub(crate) fn planet_die(self) -> i64 {
        8 - self as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_table_lines_up_with_enum() {
        for (i, item) in Item::ALL.iter().enumerate() {
            assert_eq!(*item as usize, i);
        }
        assert_eq!(Item::Shield4.abbr(), "SG4");
        assert_eq!(Item::Gun9.cost(), 2250);
        assert_eq!(Item::TerraformingPlant.spec().critical_tech, Some(Tech::Biology));
        assert_eq!(Item::from_code(5), Some(Item::ColonialMining));
        assert_eq!(Item::from_code(38), None);
    }

    #[test]
    fn ship_classes_scale_with_size() {
        assert_eq!(ShipClass::Frigate.abbr(), "FF");
        assert_eq!(ShipClass::Battlestar.tonnage(), 70);
        assert_eq!(ShipClass::Transport.cost(), 100);
    }

    #[test]
    fn gas_numbers_are_one_based() {
        assert_eq!(Gas::from_number(1), Some(Gas::Hydrogen));
        assert_eq!(Gas::from_number(13), Some(Gas::HydrogenSulfide));
        assert_eq!(Gas::from_number(0), None);
        assert_eq!(Gas::Oxygen.symbol(), "O2");
    }

    #[test]
    fn star_codes() {
        assert_eq!(StarColor::Blue.planet_die(), 8);
        assert_eq!(StarColor::Red.planet_die(), 2);
        assert_eq!(StarKind::Giant.code(), 'g');
    }
}
