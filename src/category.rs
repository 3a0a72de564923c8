// src/category.rs
//
// Event classification. The tracking allow-list pairs each keyword with a
// closed category variant, so embed color and symbol come from a total
// function over the enum rather than a second round of name matching.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    HiramRift,
    AkaschInvasion,
    Kraken,
    JolaMeinaGlenn,
    BlackDragon,
    GoldenPlains,
    Other,
}

impl EventCategory {
    /// Discord embed color for this category.
    pub fn color(self) -> u32 {
        match self {
            EventCategory::HiramRift | EventCategory::AkaschInvasion => 0x3498db,
            EventCategory::GoldenPlains => 0x9b59b6,
            EventCategory::Kraken
            | EventCategory::JolaMeinaGlenn
            | EventCategory::BlackDragon => 0xe74c3c,
            EventCategory::Other => 0x95a5a6,
        }
    }

    /// Symbol prefixed to the alert title.
    pub fn symbol(self) -> &'static str {
        match self {
            EventCategory::HiramRift => "🌀",
            EventCategory::AkaschInvasion => "🌌",
            EventCategory::Kraken => "🐙",
            EventCategory::JolaMeinaGlenn => "🔥",
            EventCategory::BlackDragon => "🐉",
            EventCategory::GoldenPlains => "⚔️",
            EventCategory::Other => "⏰",
        }
    }
}

/// One allow-list entry: events whose display name contains `keyword`
/// (case-insensitive) are tracked and styled per `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetRule {
    pub keyword: String,
    pub category: EventCategory,
}

impl TargetRule {
    pub fn new(keyword: &str, category: EventCategory) -> Self {
        Self {
            keyword: keyword.to_string(),
            category,
        }
    }
}

/// The stock tracked-event list.
pub fn default_targets() -> Vec<TargetRule> {
    vec![
        TargetRule::new("hiram rift", EventCategory::HiramRift),
        TargetRule::new("akasch invasion", EventCategory::AkaschInvasion),
        TargetRule::new("kraken", EventCategory::Kraken),
        TargetRule::new("jola, meina, & glenn", EventCategory::JolaMeinaGlenn),
        TargetRule::new("black dragon", EventCategory::BlackDragon),
        TargetRule::new("golden plains battle", EventCategory::GoldenPlains),
    ]
}

/// First rule whose keyword is a case-insensitive substring of `name`,
/// or `None` when the event is not tracked at all.
pub fn classify<'a>(name: &str, rules: &'a [TargetRule]) -> Option<&'a TargetRule> {
    let name = name.to_lowercase();
    rules
        .iter()
        .find(|r| name.contains(&r.keyword.to_lowercase()))
}
