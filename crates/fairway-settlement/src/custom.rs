use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;

/// Custom games are never settled automatically; winnings come from manual
/// overrides only.
pub struct Custom;

impl SettlementFormat for Custom {
    fn format(&self) -> GameFormat {
        GameFormat::Custom
    }

    fn settle(&self, _ctx: &SettlementContext<'_>) -> Payout {
        Payout::Unchanged
    }
}
