pub mod best_ball;
pub mod custom;
pub mod engine;
pub mod match_play;
pub mod nassau;
pub mod scramble;
pub mod skins;
pub mod status;
pub mod stroke_play;
pub mod wolf;

use fairway_core::format_registry::FormatRegistry;

pub use engine::{Settlement, SettlementEngine};
pub use status::StatusReporter;

/// Registry holding every built-in settlement format.
pub fn default_registry() -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(Box::new(skins::Skins));
    registry.register(Box::new(nassau::Nassau));
    registry.register(Box::new(match_play::MatchPlay));
    registry.register(Box::new(stroke_play::StrokePlay));
    registry.register(Box::new(scramble::Scramble));
    registry.register(Box::new(wolf::Wolf));
    registry.register(Box::new(best_ball::BestBall));
    registry.register(Box::new(custom::Custom));
    registry
}
