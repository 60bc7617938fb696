//! Ship-level derived values: names, capacity, costs and jump risk.

use crate::error::ReportError;
use crate::{Coords, Item, Propulsion, Ship, ShipClass, ShipStatus};

impl Ship {
    pub fn is_starbase(&self) -> bool {
        self.class == ShipClass::Starbase
    }

    pub fn is_transport(&self) -> bool {
        self.class == ShipClass::Transport
    }

    pub fn is_sub_light(&self) -> bool {
        self.propulsion == Propulsion::SubLight
    }

    /// Cargo capacity in carrying units.
    pub fn capacity(&self) -> i64 {
        match self.class {
            ShipClass::Starbase => 10 * self.tonnage,
            ShipClass::Transport => 10 * self.tonnage + self.tonnage * self.tonnage / 2,
            _ => self.tonnage,
        }
    }

    /// True when every ton of the hull is covered by field distortion units.
    pub fn is_distorted(&self) -> bool {
        self.status != ShipStatus::OnSurface
            && self.tonnage > 0
            && self.items.get(Item::FieldDistortion) == self.tonnage
    }

    /// Full construction cost of the hull.
    pub fn original_cost(&self) -> i64 {
        let mut cost = self.class.cost();
        if self.is_transport() || self.is_starbase() {
            cost *= self.tonnage;
        }
        if self.is_sub_light() {
            cost = 3 * cost / 4;
        }
        cost
    }

    /// Per-turn upkeep before the military-tech discount.
    pub fn maintenance_cost(&self) -> i64 {
        let mut cost = match self.class {
            ShipClass::Transport => 4 * self.tonnage,
            ShipClass::Starbase => 10 * self.tonnage,
            _ => 20 * self.tonnage,
        };
        if self.is_sub_light() {
            cost -= cost / 4;
        }
        cost
    }

    fn suffix(&self) -> &'static str {
        if self.propulsion == Propulsion::Ftl {
            ""
        } else {
            "S"
        }
    }

    /// Class and name, e.g. `TR12S Nomad` or `DD Hunter`.
    pub fn short_name(&self) -> String {
        if self.is_transport() {
            format!("TR{}{} {}", self.tonnage, self.suffix(), self.name)
        } else {
            format!("{}{} {}", self.class.abbr(), self.suffix(), self.name)
        }
    }

    fn distorted_name(&self) -> String {
        match self.class {
            ShipClass::Transport => format!("TR{} ???", self.tonnage),
            ShipClass::Starbase => "BAS ???".to_string(),
            class => format!("{} ???", class.abbr()),
        }
    }

    fn status_code(&self) -> Result<&'static str, ReportError> {
        Ok(match self.status {
            ShipStatus::UnderConstruction => "C",
            ShipStatus::OnSurface => "L",
            ShipStatus::InOrbit => "O",
            ShipStatus::InDeepSpace => "D",
            ShipStatus::ForcedJump => "FJ",
            ShipStatus::JumpedInCombat => "WD",
            ShipStatus::Destroyed => return Err(ReportError::DestroyedShip(self.name.clone())),
        })
    }

    /// Name as printed in reports, with the `(A<age>,<status>)` suffix unless
    /// `truncate` is set. Alien viewers see field-distorted ships as `???`.
    pub fn display_name(&self, ignore_distortion: bool, truncate: bool) -> Result<String, ReportError> {
        let distorted = !ignore_distortion && self.is_distorted();
        let mut name = if distorted {
            self.distorted_name()
        } else {
            self.short_name()
        };
        if truncate {
            return Ok(name);
        }
        name.push_str(" (");
        if !distorted && self.status != ShipStatus::UnderConstruction {
            name.push_str(&format!("A{},", self.age));
        }
        name.push_str(self.status_code()?);
        if self.is_starbase() {
            name.push_str(&format!(",{} tons", 10_000 * self.tonnage));
        }
        name.push(')');
        Ok(name)
    }

    /// Chance of a jump mishap to `dest`, in hundredths of a percent.
    pub fn mishap_chance(&self, dest: Coords, gravitics: i64) -> i64 {
        if gravitics <= 0 {
            return 10_000;
        }
        let mut chance = 100 * self.coords.distance_squared(dest) / gravitics;
        if self.age > 0 && chance < 10_000 {
            let mut success = 10_000 - chance;
            success -= 2 * self.age * success / 100;
            chance = 10_000 - success;
        }
        chance.min(10_000)
    }
}
