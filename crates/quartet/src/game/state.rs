use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::Display;

use super::tools::Rarity;

pub const STARTING_LOCATION: &str = "Starting Village";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rarity: Option<Rarity>,
}

impl Item {
    pub fn new(name: &str, kind: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            description: description.to_string(),
            power: None,
            rarity: None,
        }
    }

    pub fn with_power(mut self, power: i32) -> Self {
        self.power = Some(power);
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRewards {
    pub experience: i32,
    pub gold: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    pub title: String,
    pub description: String,
    pub rewards: QuestRewards,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Quest {
    pub fn new(title: &str, description: &str, rewards: QuestRewards) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            rewards,
            accepted_at: None,
            completed: false,
            completed_at: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub accessory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub level: i32,
    pub health: i32,
    pub max_health: i32,
    pub experience: i32,
    pub gold: i32,
    pub inventory: Vec<Item>,
    pub equipment: Equipment,
    pub location: String,
    pub quests: Vec<Quest>,
    pub achievements: Vec<String>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            health: 100,
            max_health: 100,
            experience: 0,
            gold: 50,
            inventory: Vec::new(),
            equipment: Equipment::default(),
            location: STARTING_LOCATION.to_string(),
            quests: Vec::new(),
            achievements: Vec::new(),
        }
    }

    pub fn experience_to_next_level(&self) -> i32 {
        self.level * 100
    }

    pub fn active_quests(&self) -> usize {
        self.quests.iter().filter(|quest| !quest.completed).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub current_location: String,
    pub discovered_locations: Vec<String>,
    pub time_of_day: String,
    pub weather: String,
    pub events: Vec<Value>,
}

impl Default for World {
    fn default() -> Self {
        Self {
            current_location: STARTING_LOCATION.to_string(),
            discovered_locations: vec![STARTING_LOCATION.to_string()],
            time_of_day: "morning".to_string(),
            weather: "clear".to_string(),
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    #[default]
    Exploration,
    Combat,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub health: i32,
    pub level: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub monster: Monster,
    pub monster_health: i32,
    pub round: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueState {
    pub npc: String,
    pub topic: String,
}

/// Everything the game tracks about one playthrough. Nothing is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub world: World,
    pub game_mode: GameMode,
    pub combat_state: Option<CombatState>,
    pub dialogue_state: Option<DialogueState>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new("Adventurer")
    }
}

impl GameState {
    pub fn new(player_name: &str) -> Self {
        Self {
            player: Player::new(player_name),
            world: World::default(),
            game_mode: GameMode::Exploration,
            combat_state: None,
            dialogue_state: None,
        }
    }

    /// JSON form embedded into prompts
    pub fn snapshot(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn update_location(&mut self, location: &str) {
        self.player.location = location.to_string();
        self.world.current_location = location.to_string();
        if !self
            .world
            .discovered_locations
            .iter()
            .any(|known| known == location)
        {
            self.world.discovered_locations.push(location.to_string());
        }
    }

    /// Levels up at most once per call, carrying the surplus over
    pub fn add_experience(&mut self, amount: i32) -> String {
        self.player.experience += amount;

        let required = self.player.experience_to_next_level();
        if self.player.experience >= required {
            self.player.level += 1;
            self.player.experience -= required;
            self.player.max_health += 20;
            self.player.health = self.player.max_health;
            return format!("🎉 Level up! You are now level {}!", self.player.level);
        }

        format!("Gained {} experience points.", amount)
    }

    pub fn add_gold(&mut self, amount: i32) -> String {
        self.player.gold += amount;
        format!("Found {} gold pieces.", amount)
    }

    pub fn add_item(&mut self, item: Item) -> String {
        let message = format!("Added {} to inventory.", item.name);
        self.player.inventory.push(item);
        message
    }

    /// Removes the first item with exactly this name
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self
            .player
            .inventory
            .iter()
            .position(|item| item.name == name)?;
        Some(self.player.inventory.remove(index))
    }

    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.player
            .inventory
            .iter()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn heal(&mut self, amount: i32) -> String {
        let before = self.player.health;
        self.player.health = (self.player.health + amount).min(self.player.max_health);
        format!("Healed {} health points.", self.player.health - before)
    }

    pub fn damage(&mut self, amount: i32) -> String {
        self.player.health = (self.player.health - amount).max(0);
        format!("Took {} damage.", amount)
    }

    pub fn is_defeated(&self) -> bool {
        self.player.health <= 0
    }

    pub fn start_combat(&mut self, monster: Monster) {
        self.game_mode = GameMode::Combat;
        self.combat_state = Some(CombatState {
            monster_health: monster.health,
            monster,
            round: 1,
        });
    }

    pub fn end_combat(&mut self) {
        self.game_mode = GameMode::Exploration;
        self.combat_state = None;
    }

    pub fn start_dialogue(&mut self, npc: &str) {
        self.game_mode = GameMode::Dialogue;
        self.dialogue_state = Some(DialogueState {
            npc: npc.to_string(),
            topic: "greeting".to_string(),
        });
    }

    pub fn end_dialogue(&mut self) {
        self.game_mode = GameMode::Exploration;
        self.dialogue_state = None;
    }

    pub fn add_quest(&mut self, mut quest: Quest) -> String {
        quest.accepted_at = Some(Utc::now());
        quest.completed = false;
        let message = format!("New quest accepted: {}", quest.title);
        self.player.quests.push(quest);
        message
    }

    /// Completes the first open quest with this title and pays its rewards
    pub fn complete_quest(&mut self, title: &str) -> String {
        let Some(quest) = self
            .player
            .quests
            .iter_mut()
            .find(|quest| quest.title == title && !quest.completed)
        else {
            return format!("Quest '{}' not found or already completed.", title);
        };

        quest.completed = true;
        quest.completed_at = Some(Utc::now());
        let rewards = quest.rewards;

        if rewards.experience > 0 {
            self.add_experience(rewards.experience);
        }
        if rewards.gold > 0 {
            self.add_gold(rewards.gold);
        }
        format!("Quest completed: {}!", title)
    }

    pub fn add_achievement(&mut self, achievement: &str) -> Option<String> {
        if self.player.achievements.iter().any(|a| a == achievement) {
            return None;
        }
        self.player.achievements.push(achievement.to_string());
        Some(format!("Achievement unlocked: {}!", achievement))
    }

    pub fn status_summary(&self) -> String {
        let player = &self.player;
        [
            format!("🧙‍♂️ {} - Level {}", player.name, player.level),
            format!("❤️ Health: {}/{}", player.health, player.max_health),
            format!(
                "⭐ Experience: {}/{}",
                player.experience,
                player.experience_to_next_level()
            ),
            format!("💰 Gold: {}", player.gold),
            format!("📍 Location: {}", player.location),
            format!("🎒 Inventory: {} items", player.inventory.len()),
            format!("📜 Active Quests: {}", player.active_quests()),
            format!("🏆 Achievements: {}", player.achievements.len()),
        ]
        .join("\n")
    }
}
