use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CityId(pub u32);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// The parts of a city the threat assessment reads.
///
/// Cities themselves live in the game domain; assessments only keep the id.
pub trait City {
    fn id(&self) -> CityId;

    /// Armies currently garrisoned in the city.
    fn count_defenders(&self) -> u32;
}
