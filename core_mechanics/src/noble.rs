use std::fmt;

use serde::{Deserialize, Serialize};

use super::funds::Funds;

pub const NOBLE_VICTORY_POINTS: u8 = 3;

/// A noble visits the first player whose bonuses cover `cost`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Noble {
    pub id: NobleId,
    pub cost: Funds,
}

impl Noble {
    pub fn new(id: NobleId, cost: Funds) -> Self {
        Self { id, cost }
    }

    pub fn victory_points(&self) -> u8 {
        NOBLE_VICTORY_POINTS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NobleId {
    id: u8,
}

impl NobleId {
    pub fn new(id: u8) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u8 {
        self.id
    }
}

impl fmt::Display for NobleId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "noble #{}", self.id)
    }
}
