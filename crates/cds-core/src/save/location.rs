use serde::Serialize;

use crate::lookup::CityLookup;

/// Raw location byte meaning "serving in a fleet, not in any city".
pub const FLEET_SENTINEL: u8 = 255;

/// Where a character currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "city")]
pub enum Location {
    City(u8),
    Fleet,
}

impl Location {
    pub fn from_raw(value: u8) -> Self {
        if value == FLEET_SENTINEL {
            Self::Fleet
        } else {
            Self::City(value)
        }
    }

    pub fn to_raw(self) -> u8 {
        match self {
            Self::City(id) => id,
            Self::Fleet => FLEET_SENTINEL,
        }
    }

    pub fn is_fleet(self) -> bool {
        self == Self::Fleet
    }

    /// Display name, falling back to the raw index when the city is unknown.
    pub fn display_name<L: CityLookup + ?Sized>(self, cities: &L) -> String {
        match self {
            Self::Fleet => "Fleet".to_string(),
            Self::City(id) => cities
                .city_name(id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Unknown({})", id)),
        }
    }
}
