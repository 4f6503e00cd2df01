// Orchestration presets: which drum voice each limb plays.
//
// Patterns only carry the preset id. Rendering code resolves the id here to
// label rows ("Hi-hat", "Snare", "Kick"); the engine itself never looks at
// the labels.

use crate::limb::Limb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestrationPreset {
    pub id: &'static str,
    pub right: &'static str,
    pub left: &'static str,
    pub kick: &'static str,
}

#[rustfmt::skip]
const BUILTIN: &[OrchestrationPreset] = &[
    OrchestrationPreset { id: "snare", right: "Snare", left: "Snare", kick: "Kick" },
    OrchestrationPreset { id: "kit", right: "Hi-hat", left: "Snare", kick: "Kick" },
    OrchestrationPreset { id: "ride", right: "Ride", left: "Snare", kick: "Kick" },
    OrchestrationPreset { id: "toms", right: "Floor tom", left: "Rack tom", kick: "Kick" },
    OrchestrationPreset { id: "double-kick", right: "Crash", left: "Snare", kick: "Double kick" },
];

impl OrchestrationPreset {
    /// Look up a built-in preset. Unknown ids resolve to `None`; callers
    /// fall back to plain limb names.
    pub fn builtin(id: &str) -> Option<Self> {
        BUILTIN.iter().find(|p| p.id == id).copied()
    }

    pub fn all() -> &'static [OrchestrationPreset] {
        BUILTIN
    }

    pub fn voice(&self, limb: Limb) -> &'static str {
        match limb {
            Limb::RightHand => self.right,
            Limb::LeftHand => self.left,
            Limb::Kick => self.kick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genre::GenreTable;

    #[test]
    fn builtin_genres_reference_known_orchestrations() {
        for preset in GenreTable::builtin().presets() {
            assert!(
                OrchestrationPreset::builtin(&preset.orchestration).is_some(),
                "genre {} references unknown orchestration {}",
                preset.id,
                preset.orchestration
            );
        }
    }

    #[test]
    fn voice_lookup() {
        let kit = OrchestrationPreset::builtin("kit").unwrap();
        assert_eq!(kit.voice(Limb::RightHand), "Hi-hat");
        assert_eq!(kit.voice(Limb::Kick), "Kick");
        assert!(OrchestrationPreset::builtin("cowbell").is_none());
    }
}
