// Validity constraints over triads and enumeration of the eligible set.
//
// `GeneratorConstraints` is a pure predicate: scope decides which limbs a
// slot may hold, and three flags reject doubles, kick-less cells, and kick
// doubles. `EligibleSet::enumerate` walks every ordered triple over the
// scope's limbs (8 or 27 of them) and keeps the survivors.
//
// The eligible set is keyed by identity string in a BTreeMap so that
// iterating it (and therefore every seeded random pick) happens in the same
// order on every run.
//
// `requireKick` and `allowKickDoubles` are inert under hands-only scope,
// except that `requireKick` there empties the set entirely; the engine
// handles that with its fallback phrase (see engine.rs).

use crate::limb::{Limb, LimbScope, TriadCell};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneratorConstraints {
    pub scope: LimbScope,
    /// Allow the same limb twice within one cell (any pair of positions).
    pub include_doubles: bool,
    /// Every cell must contain at least one kick.
    pub require_kick: bool,
    /// Allow the kick on two adjacent positions.
    pub allow_kick_doubles: bool,
}

impl GeneratorConstraints {
    /// Hands only, doubles allowed. Produces all 8 R/L cells.
    pub fn hands_only() -> Self {
        GeneratorConstraints {
            scope: LimbScope::HandsOnly,
            include_doubles: true,
            require_kick: false,
            allow_kick_doubles: false,
        }
    }

    /// Full kit with no restrictions. Produces all 27 cells.
    pub fn full_kit() -> Self {
        GeneratorConstraints {
            scope: LimbScope::HandsAndKick,
            include_doubles: true,
            require_kick: false,
            allow_kick_doubles: true,
        }
    }

    /// Stable string key for coverage tracking. Equal constraints produce
    /// equal signatures and vice versa.
    pub fn signature(&self) -> String {
        format!(
            "{}|d{}|k{}|kd{}",
            self.scope.tag(),
            self.include_doubles as u8,
            self.require_kick as u8,
            self.allow_kick_doubles as u8,
        )
    }

    /// Whether a single cell passes every rule.
    pub fn allows(&self, cell: &TriadCell) -> bool {
        let scope = self.scope.limbs();
        if !cell.limbs().iter().all(|l| scope.contains(l)) {
            return false;
        }
        if !self.include_doubles && cell.has_double() {
            return false;
        }
        if self.require_kick && !cell.contains(Limb::Kick) {
            return false;
        }
        if !self.allow_kick_doubles && cell.has_kick_double() {
            return false;
        }
        true
    }
}

/// The cells that satisfy one set of constraints, keyed by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibleSet {
    cells: BTreeMap<String, TriadCell>,
}

impl EligibleSet {
    /// Enumerate every ordered triple over the scope's limbs and keep the
    /// ones `constraints` allows.
    pub fn enumerate(constraints: &GeneratorConstraints) -> Self {
        let limbs = constraints.scope.limbs();
        let mut cells = BTreeMap::new();
        for &a in limbs {
            for &b in limbs {
                for &c in limbs {
                    let cell = TriadCell::new(a, b, c);
                    if constraints.allows(&cell) {
                        cells.insert(cell.identity(), cell);
                    }
                }
            }
        }
        EligibleSet { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cells.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<TriadCell> {
        self.cells.get(id).copied()
    }

    /// Identity strings in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn cells(&self) -> impl Iterator<Item = TriadCell> + '_ {
        self.cells.values().copied()
    }
}
