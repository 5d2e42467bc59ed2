use std::collections::HashMap;

use crate::format_trait::SettlementFormat;
use crate::game::GameFormat;

/// Lookup table of settlement strategies keyed by format tag.
#[derive(Default)]
pub struct FormatRegistry {
    formats: HashMap<GameFormat, Box<dyn SettlementFormat>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy under its own tag, replacing any previous one.
    pub fn register(&mut self, format: Box<dyn SettlementFormat>) {
        self.formats.insert(format.format(), format);
    }

    pub fn get(&self, format: GameFormat) -> Option<&dyn SettlementFormat> {
        self.formats.get(&format).map(|f| f.as_ref())
    }

    pub fn contains(&self, format: GameFormat) -> bool {
        self.formats.contains_key(&format)
    }

    /// Registered tags, in declaration order of [`GameFormat`].
    pub fn formats(&self) -> Vec<GameFormat> {
        GameFormat::ALL
            .into_iter()
            .filter(|f| self.formats.contains_key(f))
            .collect()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_trait::{Payout, SettlementContext};

    struct Fixed(GameFormat);

    impl SettlementFormat for Fixed {
        fn format(&self) -> GameFormat {
            self.0
        }

        fn settle(&self, _ctx: &SettlementContext<'_>) -> Payout {
            Payout::Unchanged
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = FormatRegistry::new();
        registry.register(Box::new(Fixed(GameFormat::Wolf)));
        registry.register(Box::new(Fixed(GameFormat::Skins)));

        assert!(registry.contains(GameFormat::Skins));
        assert!(registry.get(GameFormat::Nassau).is_none());
        assert_eq!(
            registry.get(GameFormat::Wolf).map(|f| f.format()),
            Some(GameFormat::Wolf)
        );
        assert_eq!(registry.formats(), vec![GameFormat::Skins, GameFormat::Wolf]);
    }
}
