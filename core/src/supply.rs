//! Stock tracking for the finite intervention tools.

use serde::{Deserialize, Serialize};

use crate::{config::SupplyConfig, intervention::InterventionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionSupply {
    pub vaccines:  u32,
    pub hospitals: u32,
    capacity:      SupplyConfig,
}

impl InterventionSupply {
    pub fn new(capacity: SupplyConfig) -> Self {
        Self {
            vaccines:  capacity.vaccines,
            hospitals: capacity.hospitals,
            capacity,
        }
    }

    /// Units left for `kind`. `None` means unlimited.
    pub fn remaining(&self, kind: InterventionKind) -> Option<u32> {
        match kind {
            InterventionKind::Vaccination => Some(self.vaccines),
            InterventionKind::Hospital    => Some(self.hospitals),
            InterventionKind::Quarantine  => None,
        }
    }

    /// Take one unit of `kind`. Returns false (and takes nothing)
    /// when the stock is exhausted.
    pub fn try_consume(&mut self, kind: InterventionKind) -> bool {
        let stock = match kind {
            InterventionKind::Vaccination => &mut self.vaccines,
            InterventionKind::Hospital    => &mut self.hospitals,
            InterventionKind::Quarantine  => return true,
        };
        if *stock == 0 {
            return false;
        }
        *stock -= 1;
        true
    }

    pub fn refill(&mut self) {
        self.vaccines = self.capacity.vaccines;
        self.hospitals = self.capacity.hospitals;
    }
}
