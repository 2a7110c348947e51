//! Environmental impact of each eco-action
//!
//! Habits are scored by exact action name. Anything not listed falls back to
//! the generic "Otro" entry.

/// CO₂ (kg) saved and points awarded for one logged action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    pub co2: f64,
    pub points: i64,
}

/// Action label used for anything outside the table
pub const DEFAULT_ACTION: &str = "Otro";

const DEFAULT_IMPACT: Impact = Impact {
    co2: 0.1,
    points: 2,
};

const IMPACTS: &[(&str, Impact)] = &[
    ("Reciclar plástico", Impact { co2: 0.5, points: 10 }),
    ("Usar bicicleta", Impact { co2: 1.5, points: 25 }),
    ("Ahorro de agua", Impact { co2: 0.3, points: 5 }),
    ("Comprar a granel", Impact { co2: 0.8, points: 15 }),
    ("Apagar luces", Impact { co2: 0.2, points: 4 }),
    (DEFAULT_ACTION, DEFAULT_IMPACT),
];

/// Impact of an action, exact match, default for unknown actions
pub fn lookup(action: &str) -> Impact {
    IMPACTS
        .iter()
        .find(|(name, _)| *name == action)
        .map_or(DEFAULT_IMPACT, |(_, impact)| *impact)
}

/// Every scored action in display order, the default entry last
pub fn known_actions() -> &'static [(&'static str, Impact)] {
    IMPACTS
}
