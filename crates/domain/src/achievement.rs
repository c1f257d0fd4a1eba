use serde::{Deserialize, Serialize};

/// One entry in a game's achievement catalog.
///
/// Produced by the achievement source; never mutated by the streak engine.
/// `name` is the stable identifier, unique within a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub icon_url: String,
}
