//! Building markers placed on map cells.
//!
//! A cell holds at most one building. Buildings are either land buildings or
//! water buildings (ports and bridges), never both.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    #[default]
    None,
    City,
    Ruin,
    Temple,
    Signpost,
    Road,
    Port,
    Bridge,
    StandingStone,
}

impl Building {
    pub const ALL: [Building; 9] = [
        Building::None,
        Building::City,
        Building::Ruin,
        Building::Temple,
        Building::Signpost,
        Building::Road,
        Building::Port,
        Building::Bridge,
        Building::StandingStone,
    ];

    pub const fn is_land(self) -> bool {
        matches!(
            self,
            Building::City
                | Building::Ruin
                | Building::Temple
                | Building::Signpost
                | Building::Road
                | Building::StandingStone
        )
    }

    pub const fn is_water(self) -> bool {
        matches!(self, Building::Port | Building::Bridge)
    }

    /// Lets ground units cross between land and water.
    pub const fn links_shore(self) -> bool {
        self.is_water()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_land_and_water_are_exclusive() {
        for building in Building::ALL {
            assert!(!(building.is_land() && building.is_water()), "{building:?}");
        }
    }

    #[test]
    fn test_none_is_neither() {
        assert!(!Building::None.is_land());
        assert!(!Building::None.is_water());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Building::StandingStone).unwrap();
        assert_eq!(json, "\"standing_stone\"");
        let parsed: Building = serde_json::from_str("\"port\"").unwrap();
        assert_eq!(parsed, Building::Port);
    }
}
