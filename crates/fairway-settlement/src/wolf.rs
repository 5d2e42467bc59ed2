use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;

/// Wolf has no rules of its own yet (no wolf rotation, no lone wolf); it is
/// settled as stroke play.
pub struct Wolf;

impl SettlementFormat for Wolf {
    fn format(&self) -> GameFormat {
        GameFormat::Wolf
    }

    fn settle(&self, _ctx: &SettlementContext<'_>) -> Payout {
        Payout::Delegate(GameFormat::StrokePlay)
    }
}
