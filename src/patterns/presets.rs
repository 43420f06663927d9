//! Built-in breathing patterns.

use crate::session::BreathingPattern;

/// Id of the pattern used when nothing else is configured.
pub const DEFAULT_PATTERN_ID: &str = "box";

/// All built-in patterns, in display order.
#[must_use]
pub fn presets() -> Vec<BreathingPattern> {
    vec![
        BreathingPattern::new("box", [4, 4, 4, 4], 4)
            .with_name("Box Breathing")
            .with_description("Equal inhale, hold, exhale and hold. Steadies focus."),
        BreathingPattern::new("relax", [4, 7, 8, 0], 4)
            .with_name("4-7-8 Relaxing Breath")
            .with_description("Long hold and slow exhale. Winds down before sleep."),
        BreathingPattern::new("coherent", [5, 0, 5, 0], 10)
            .with_name("Coherent Breathing")
            .with_description("Six breaths a minute with no holds."),
        BreathingPattern::new("triangle", [4, 4, 4, 0], 6)
            .with_name("Triangle Breathing")
            .with_description("Inhale, hold, exhale, then straight into the next breath."),
        BreathingPattern::new("calm", [4, 2, 6, 0], 6)
            .with_name("Calming Breath")
            .with_description("Exhale longer than the inhale."),
    ]
}

/// Find a built-in pattern by id.
#[must_use]
pub fn preset(id: &str) -> Option<BreathingPattern> {
    presets().into_iter().find(|p| p.id == id)
}

/// Whether `id` names a built-in pattern.
#[must_use]
pub fn is_preset(id: &str) -> bool {
    presets().iter().any(|p| p.id == id)
}
