//! Dice and loot mechanics. Every function takes the random source so play
//! can be replayed from a seed.
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use strum_macros::{Display, EnumIter, EnumString};

use crate::errors::GameError;
use crate::models::tool::ToolSpec;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn gold_multiplier(&self) -> i32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 5,
            Rarity::Legendary => 10,
        }
    }

    pub fn special_item_chance(&self) -> f64 {
        match self {
            Rarity::Common => 0.1,
            Rarity::Uncommon => 0.3,
            Rarity::Rare => 0.5,
            Rarity::Epic => 0.7,
            Rarity::Legendary => 0.9,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Combat,
    Exploration,
    Social,
    #[default]
    Random,
}

impl EventKind {
    /// Unknown kinds fall back to random events
    pub fn parse(kind: &str) -> Self {
        match kind.trim().to_lowercase().as_str() {
            "combat" => EventKind::Combat,
            "exploration" => EventKind::Exploration,
            "social" => EventKind::Social,
            _ => EventKind::Random,
        }
    }

    fn descriptions(&self) -> &'static [&'static str] {
        match self {
            EventKind::Combat => &[
                "A band of goblins emerges from the shadows!",
                "A fierce dragon blocks your path!",
                "Undead warriors rise from the ground!",
                "A pack of wolves surrounds you!",
                "A mysterious knight challenges you to combat!",
            ],
            EventKind::Exploration => &[
                "You discover a hidden cave entrance!",
                "Ancient ruins lie ahead!",
                "A magical portal appears before you!",
                "You find a mysterious artifact!",
                "A secret passage reveals itself!",
            ],
            EventKind::Social => &[
                "A friendly merchant offers you goods!",
                "A wise old sage shares ancient knowledge!",
                "A mysterious stranger approaches you!",
                "Villagers ask for your help!",
                "A royal messenger delivers important news!",
            ],
            EventKind::Random => &[
                "A sudden storm approaches!",
                "You hear distant music!",
                "A shooting star streaks across the sky!",
                "The ground begins to tremble!",
                "A magical aura surrounds you!",
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub total: u32,
    pub rolls: Vec<u32>,
    pub sides: u32,
    pub count: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub description: String,
    pub severity: u32,
    pub duration: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatDamage {
    pub damage: i32,
    pub is_critical: bool,
    pub base_damage: i32,
    pub level_bonus: i32,
    pub weapon_bonus: i32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub gold: i32,
    pub rarity: Rarity,
    pub has_special_item: bool,
    pub monster_level: i32,
    pub description: String,
}

const CRITICAL_CHANCE: f64 = 0.05;

pub fn roll_dice<R: Rng + ?Sized>(
    rng: &mut R,
    sides: u32,
    count: u32,
) -> Result<DiceRoll, GameError> {
    if sides < 2 {
        return Err(GameError::TooFewSides);
    }
    if count < 1 {
        return Err(GameError::NoDice);
    }

    let rolls: Vec<u32> = (0..count).map(|_| rng.gen_range(1..=sides)).collect();
    let total: u32 = rolls.iter().sum();
    let listed = rolls
        .iter()
        .map(|roll| roll.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Ok(DiceRoll {
        total,
        description: format!("Rolled {}d{} = [{}] (Total: {})", count, sides, listed, total),
        rolls,
        sides,
        count,
    })
}

/// A single die, for callers whose sides are constant and valid
pub(crate) fn d<R: Rng + ?Sized>(rng: &mut R, sides: u32) -> u32 {
    rng.gen_range(1..=sides.max(2))
}

pub fn generate_event<R: Rng + ?Sized>(rng: &mut R, kind: EventKind) -> GameEvent {
    let description = kind
        .descriptions()
        .choose(rng)
        .copied()
        .unwrap_or_default()
        .to_string();

    GameEvent {
        kind,
        description,
        severity: rng.gen_range(1..=10),
        duration: rng.gen_range(1..=5),
    }
}

pub fn combat_damage<R: Rng + ?Sized>(
    rng: &mut R,
    attacker_level: i32,
    weapon_power: i32,
) -> CombatDamage {
    let base_damage = rng.gen_range(1..=10);
    let level_bonus = attacker_level * 2;
    let weapon_bonus = weapon_power * rng.gen_range(1..=5);

    let is_critical = rng.gen::<f64>() < CRITICAL_CHANCE;
    let mut damage = base_damage + level_bonus + weapon_bonus;
    if is_critical {
        damage *= 2;
    }

    CombatDamage {
        damage,
        is_critical,
        base_damage,
        level_bonus,
        weapon_bonus,
        description: format!(
            "{}Dealt {} damage",
            if is_critical { "CRITICAL HIT! " } else { "" },
            damage
        ),
    }
}

pub fn generate_loot<R: Rng + ?Sized>(rng: &mut R, monster_level: i32, rarity: Rarity) -> Loot {
    let gold = rng.gen_range(1..=10) * monster_level * rarity.gold_multiplier();
    let has_special_item = rng.gen::<f64>() < rarity.special_item_chance();

    Loot {
        gold,
        rarity,
        has_special_item,
        monster_level,
        description: format!("Found {} gold pieces", gold),
    }
}

/// Descriptors advertised to every game agent
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "roll_dice",
            "Roll dice for game mechanics",
            json!({"sides": "int", "count": "int"}),
        ),
        ToolSpec::new(
            "generate_event",
            "Generate random events",
            json!({"event_type": "str"}),
        ),
        ToolSpec::new(
            "calculate_combat_damage",
            "Calculate combat damage",
            json!({"attacker_level": "int", "weapon_power": "int"}),
        ),
        ToolSpec::new(
            "generate_loot",
            "Generate loot",
            json!({"monster_level": "int", "rarity": "str"}),
        ),
    ]
}
