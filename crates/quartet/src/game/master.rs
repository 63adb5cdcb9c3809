use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::agents::{ItemAgent, MonsterAgent, NarratorAgent};
use super::state::{GameMode, GameState, Item, Monster, Quest, QuestRewards, STARTING_LOCATION};
use super::tools::{self, EventKind, Rarity};
use crate::errors::AgentResult;
use crate::providers::base::Provider;

pub const GAME_TITLE: &str = "🧠 AI Adventure Game Master";

const MONSTER_TYPES: [&str; 5] = [
    "goblin",
    "wolf",
    "bandit",
    "undead warrior",
    "mysterious creature",
];

pub const WELCOME: &str = "Welcome to an AI-powered text adventure game!

You are an adventurer in a mysterious world filled with magic, monsters, and treasures.
Three AI agents will guide your journey:
• 🎭 Narrator Agent - Tells the story and describes your surroundings
• ⚔️ Monster Agent - Manages combat encounters and battles
• 🎒 Item Agent - Handles your inventory and rewards

Type 'help' at any time to see available commands.
Type 'quit' to exit the game.

Your adventure begins now...";

pub const HELP: &str = "Available Commands:
• help - Show this help message
• status - Show your character status
• inventory - Show your inventory
• explore - Explore the current location
• <number> - Pick one of the listed choices
• move <location> - Move to a different location
• use <item> - Use an item from inventory
• buy - Buy from the shop you are visiting
• quit - Exit the game

Combat Commands (during combat):
• attack - Attack the monster
• defend - Defend against attacks
• flee - Try to escape from combat";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    #[default]
    VillageSquare,
    ElderHouse,
    ForestPath,
    DarkCave,
    AncientRuins,
}

impl Scene {
    pub fn location(&self) -> &'static str {
        match self {
            Scene::VillageSquare => STARTING_LOCATION,
            Scene::ElderHouse => "Elder's House",
            Scene::ForestPath => "Forest Path",
            Scene::DarkCave => "Dark Cave",
            Scene::AncientRuins => "Ancient Ruins",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scene::VillageSquare => "You stand in the bustling village square. Merchants call out their wares, children play in the streets, and the smell of fresh bread wafts from the bakery. The village elder's house stands prominently to the north, while a mysterious forest path leads east.",
            Scene::ElderHouse => "You enter the elder's house, a cozy building filled with ancient books and mysterious artifacts. The village elder sits by the fireplace, looking wise and welcoming.",
            Scene::ForestPath => "You walk along a winding forest path. Tall trees create a canopy overhead, and you can hear the sounds of wildlife in the distance. The path seems to lead deeper into the forest.",
            Scene::DarkCave => "You enter a dark, mysterious cave. The air is cool and damp, and you can hear water dripping somewhere in the distance. Strange markings cover the walls.",
            Scene::AncientRuins => "You discover ancient ruins, remnants of a long-forgotten civilization. Crumbling stone structures stand testament to the passage of time.",
        }
    }

    pub fn choices(&self) -> &'static [&'static str] {
        match self {
            Scene::VillageSquare => &[
                "Visit the village elder",
                "Explore the forest path",
                "Check the local shop",
                "Talk to villagers",
            ],
            Scene::ElderHouse => &[
                "Ask for a quest",
                "Learn about the village history",
                "Return to village square",
            ],
            Scene::ForestPath => &[
                "Continue deeper into the forest",
                "Search for resources",
                "Return to village square",
            ],
            Scene::DarkCave => &[
                "Explore deeper into the cave",
                "Search for treasures",
                "Return to the forest path",
            ],
            Scene::AncientRuins => &[
                "Investigate the ruins",
                "Search for artifacts",
                "Return to the forest path",
            ],
        }
    }

    /// Scene whose location name matches, ignoring case
    pub fn at(location: &str) -> Option<Scene> {
        Scene::iter().find(|scene| scene.location().eq_ignore_ascii_case(location.trim()))
    }
}

/// One block of output for the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// Titled block, usually model prose
    Panel { title: String, body: String },
    /// A single status line
    Line(String),
}

impl Output {
    fn panel(title: &str, body: impl Into<String>) -> Self {
        Output::Panel {
            title: title.to_string(),
            body: body.into(),
        }
    }

    fn line(text: impl Into<String>) -> Self {
        Output::Line(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Output::Panel { body, .. } => body,
            Output::Line(line) => line,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Turn {
    pub outputs: Vec<Output>,
    /// The player quit or was defeated
    pub finished: bool,
}

impl Turn {
    fn push(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Everything printed this turn, joined by newlines
    pub fn transcript(&self) -> String {
        self.outputs
            .iter()
            .map(|output| output.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs a text adventure: interprets player commands, keeps the game state
/// and asks the narrator, monster and item agents for prose.
pub struct GameMaster<R: Rng = StdRng> {
    state: GameState,
    scene: Scene,
    shop_open: bool,
    narrator: NarratorAgent,
    monsters: MonsterAgent,
    items: ItemAgent,
    rng: R,
}

impl GameMaster<StdRng> {
    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Self::with_rng(provider, StdRng::from_entropy())
    }
}

impl<R: Rng> GameMaster<R> {
    pub fn with_rng(provider: Arc<dyn Provider>, rng: R) -> AgentResult<Self> {
        Ok(Self {
            state: GameState::default(),
            scene: Scene::default(),
            shop_open: false,
            narrator: NarratorAgent::new(provider.clone())?,
            monsters: MonsterAgent::new(provider.clone())?,
            items: ItemAgent::new(provider)?,
            rng,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn narrator(&self) -> &NarratorAgent {
        &self.narrator
    }

    /// The first turn: describe where the player starts
    pub async fn opening(&mut self) -> Turn {
        let mut turn = Turn::default();
        self.explore(&mut turn).await;
        turn
    }

    pub async fn handle(&mut self, input: &str) -> Turn {
        let mut turn = Turn::default();
        let input = input.trim();
        let command = input.to_lowercase();
        tracing::debug!(command = %command, mode = %self.state.game_mode, "game command");

        match command.as_str() {
            "quit" | "exit" => {
                turn.push(Output::line("Thanks for playing! Goodbye!"));
                turn.finished = true;
            }
            "help" => turn.push(Output::panel("❓ Help", HELP)),
            "status" => turn.push(Output::panel(
                "📊 Character Status",
                self.state.status_summary(),
            )),
            "inventory" => turn.push(Output::panel("🎒 Inventory", self.inventory_listing())),
            "explore" => self.explore(&mut turn).await,
            "buy" => self.buy(&mut turn).await,
            "attack" | "defend" | "flee" => {
                if self.state.game_mode == GameMode::Combat {
                    self.combat_round(&command, &mut turn).await;
                } else {
                    turn.push(Output::line("❌ You're not in combat!"));
                }
            }
            _ if command.starts_with("move ") => {
                self.move_to(input.get(5..).unwrap_or_default().trim(), &mut turn)
            }
            _ if command.starts_with("use ") => {
                self.use_item(input.get(4..).unwrap_or_default().trim(), &mut turn)
                    .await
            }
            _ if !command.is_empty() && command.chars().all(|c| c.is_ascii_digit()) => {
                self.numbered_choice(&command, &mut turn).await
            }
            _ => turn.push(Output::line(
                "❌ Unknown command. Type 'help' for available commands.",
            )),
        }

        if self.state.is_defeated() && !turn.finished {
            turn.push(Output::line("💀 You have been defeated! Game over."));
            turn.finished = true;
        }
        turn
    }

    fn inventory_listing(&self) -> String {
        if self.state.player.inventory.is_empty() {
            return "Your inventory is empty.".to_string();
        }
        self.state
            .player
            .inventory
            .iter()
            .map(|item| format!("• {} ({}) - {}", item.name, item.kind, item.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn choice_menu(&self) -> String {
        let mut menu = String::from("What would you like to do?");
        for (i, choice) in self.scene.choices().iter().enumerate() {
            menu.push_str(&format!("\n{}. {}", i + 1, choice));
        }
        menu
    }

    /// Narrate the current scene, or improvise when the player wandered
    /// somewhere without a scripted scene
    async fn explore(&mut self, turn: &mut Turn) {
        let narration = if self.state.player.location == self.scene.location() {
            self.narrator
                .narrate_scene(self.scene.description(), &[], Some(&self.state))
                .await
        } else {
            self.narrator
                .describe_environment(&self.state.player.location, "mysterious", Some(&self.state))
                .await
        };
        turn.push(Output::panel("📍 Current Location", narration));
        turn.push(Output::line(self.choice_menu()));
    }

    fn move_to(&mut self, location: &str, turn: &mut Turn) {
        if location.is_empty() {
            turn.push(Output::line("❌ Where do you want to go?"));
            return;
        }
        match Scene::at(location) {
            Some(scene) => {
                self.scene = scene;
                self.state.update_location(scene.location());
            }
            None => self.state.update_location(location),
        }
        self.shop_open = false;
        turn.push(Output::line(format!(
            "📍 Moved to {}",
            self.state.player.location
        )));
    }

    async fn use_item(&mut self, name: &str, turn: &mut Turn) {
        let Some(item) = self.state.find_item(name).cloned() else {
            turn.push(Output::line(format!(
                "❌ Item '{}' not found in inventory.",
                name
            )));
            return;
        };
        let situation = match self.state.game_mode {
            GameMode::Combat => "combat",
            _ => "general",
        };
        let suggestion = self
            .items
            .suggest_item_use(&item, situation, Some(&self.state))
            .await;
        turn.push(Output::panel("🔧 Use Item", suggestion));
    }

    async fn numbered_choice(&mut self, command: &str, turn: &mut Turn) {
        if self.state.game_mode != GameMode::Exploration {
            turn.push(Output::line("❌ Invalid command."));
            return;
        }
        let choices = self.scene.choices();
        match command.parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => {
                self.exploration_choice(choices[n - 1], turn).await
            }
            _ => turn.push(Output::line("❌ Invalid choice number.")),
        }
    }

    /// Keyword dispatch over the chosen text, checked in a fixed order
    async fn exploration_choice(&mut self, choice: &str, turn: &mut Turn) {
        let lowered = choice.to_lowercase();
        let destination = if lowered.contains("elder") {
            Some(Scene::ElderHouse)
        } else if lowered.contains("forest") && !lowered.contains("return") {
            Some(Scene::ForestPath)
        } else if lowered.contains("cave") {
            Some(Scene::DarkCave)
        } else if lowered.contains("ruins") {
            Some(Scene::AncientRuins)
        } else if lowered.contains("return") {
            Some(if lowered.contains("village") {
                Scene::VillageSquare
            } else {
                Scene::ForestPath
            })
        } else {
            None
        };

        if let Some(scene) = destination {
            self.scene = scene;
            self.shop_open = false;
            self.state.update_location(scene.location());
            let story = self
                .narrator
                .progress_story(choice, scene.location(), Some(&self.state))
                .await;
            turn.push(Output::panel("📖 Story Progress", story));
            turn.push(Output::line(self.choice_menu()));
        } else if lowered.contains("shop") {
            self.open_shop(turn).await;
        } else if lowered.contains("quest") {
            let message = self.state.add_quest(Quest::new(
                "The Lost Artifact",
                "Find the ancient artifact hidden in the ruins",
                QuestRewards {
                    experience: 100,
                    gold: 50,
                },
            ));
            turn.push(Output::panel("📜 New Quest", message));
        } else {
            let location = self.state.player.location.clone();
            let story = self
                .narrator
                .progress_story(choice, &location, Some(&self.state))
                .await;
            turn.push(Output::panel("📖 Story Progress", story));
            self.maybe_random_event(turn).await;
        }
    }

    async fn open_shop(&mut self, turn: &mut Turn) {
        let listing = self
            .items
            .create_shop_inventory("general", self.state.player.level)
            .await;
        self.shop_open = true;
        turn.push(Output::panel("🏪 Shop", listing));
        turn.push(Output::line("Type 'buy' to purchase something."));
    }

    async fn buy(&mut self, turn: &mut Turn) {
        if !self.shop_open {
            turn.push(Output::line("❌ There is no shop here."));
            return;
        }
        let description = self
            .items
            .generate_item(&mut self.rng, "sword", Rarity::Common, 5)
            .await;
        turn.push(Output::panel("🛒 Purchase", description));

        let sword = Item::new(
            "Rusty Sword",
            "weapon",
            "A basic sword that could use some sharpening",
        )
        .with_power(5);
        turn.push(Output::line(format!("✅ {}", self.state.add_item(sword))));
    }

    async fn maybe_random_event(&mut self, turn: &mut Turn) {
        if tools::d(&mut self.rng, 20) <= 15 {
            return;
        }
        let event = tools::generate_event(&mut self.rng, EventKind::Random);
        turn.push(Output::panel(
            "🎲 Random Event",
            format!("Random event: {}", event.description),
        ));

        if tools::d(&mut self.rng, 20) > 18 {
            self.start_random_combat(turn).await;
        }
    }

    async fn start_random_combat(&mut self, turn: &mut Turn) {
        let index = tools::d(&mut self.rng, MONSTER_TYPES.len() as u32) as usize - 1;
        let monster_type = MONSTER_TYPES[index];

        let encounter = self
            .monsters
            .create_encounter(&mut self.rng, monster_type, self.state.player.level)
            .await;
        turn.push(Output::panel("⚔️ Combat Encounter", encounter));

        self.state.start_combat(Monster {
            name: monster_type.to_string(),
            health: 30,
            level: 3,
        });
        tracing::info!(monster = monster_type, "combat started");
        turn.push(Output::line(
            "Combat has begun! Use 'attack', 'defend', or 'flee' commands.",
        ));
    }

    async fn combat_round(&mut self, action: &str, turn: &mut Turn) {
        let Some(combat) = self.state.combat_state.clone() else {
            turn.push(Output::line("Not in combat."));
            return;
        };
        let monster = combat.monster;

        match action {
            "attack" => {
                let narration = self
                    .monsters
                    .manage_combat_round(
                        &mut self.rng,
                        "attack",
                        self.state.player.level,
                        monster.level,
                        combat.monster_health,
                        self.state.player.health,
                    )
                    .await;
                turn.push(Output::panel("⚔️ Combat", narration));

                let damage = tools::d(&mut self.rng, 10) as i32 + self.state.player.level * 2;
                let remaining = combat.monster_health - damage;
                if let Some(combat) = self.state.combat_state.as_mut() {
                    combat.monster_health = remaining;
                    combat.round += 1;
                }
                turn.push(Output::line(format!(
                    "💥 You deal {} damage to the {}!",
                    damage, monster.name
                )));

                if remaining <= 0 {
                    self.victory(&monster, turn).await;
                    return;
                }
                let counter = tools::d(&mut self.rng, 8) as i32;
                self.monster_strikes(&monster, counter, turn);
            }
            "defend" => {
                turn.push(Output::line("🛡️ You take a defensive stance!"));
                let damage = (tools::d(&mut self.rng, 8) as i32 - 3).max(1);
                self.monster_strikes(&monster, damage, turn);
            }
            "flee" => {
                if tools::d(&mut self.rng, 20) > 10 {
                    turn.push(Output::line("🏃 You successfully flee from combat!"));
                    self.state.end_combat();
                } else {
                    turn.push(Output::line("❌ You fail to escape!"));
                    let counter = tools::d(&mut self.rng, 8) as i32;
                    self.monster_strikes(&monster, counter, turn);
                }
            }
            _ => {}
        }
    }

    fn monster_strikes(&mut self, monster: &Monster, damage: i32, turn: &mut Turn) {
        self.state.damage(damage);
        turn.push(Output::line(format!(
            "💥 The {} deals {} damage to you!",
            monster.name, damage
        )));
    }

    async fn victory(&mut self, monster: &Monster, turn: &mut Turn) {
        turn.push(Output::line(format!("🎉 You defeated the {}!", monster.name)));

        let loot = tools::generate_loot(&mut self.rng, monster.level, Rarity::Common);
        turn.push(Output::line(format!("💰 {}", loot.description)));
        let experience = self.state.add_experience(monster.level * 10);
        let gold = self.state.add_gold(loot.gold);
        turn.push(Output::line(format!("⭐ {}", experience)));
        turn.push(Output::line(format!("💰 {}", gold)));

        if loot.has_special_item {
            let description = self
                .items
                .generate_item(&mut self.rng, "treasure", Rarity::Uncommon, 5)
                .await;
            turn.push(Output::panel("🎁 Special Item Found", description));
            let artifact = Item::new(
                "Mysterious Artifact",
                "treasure",
                "A strange artifact with unknown powers",
            )
            .with_rarity(Rarity::Uncommon);
            turn.push(Output::line(format!("✅ {}", self.state.add_item(artifact))));
        }

        self.state.end_combat();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use crate::providers::offline::OfflineProvider;

    fn master(seed: u64) -> GameMaster<StdRng> {
        GameMaster::with_rng(Arc::new(OfflineProvider::new()), StdRng::seed_from_u64(seed))
            .unwrap()
    }

    fn goblin() -> Monster {
        Monster {
            name: "goblin".to_string(),
            health: 30,
            level: 3,
        }
    }

    #[tokio::test]
    async fn test_help_status_and_quit() {
        let mut gm = master(1);
        assert!(gm.handle("HELP").await.transcript().contains("Available Commands"));
        assert!(gm
            .handle("status")
            .await
            .transcript()
            .contains("❤️ Health: 100/100"));

        let turn = gm.handle("quit").await;
        assert!(turn.finished);
        assert_eq!(turn.transcript(), "Thanks for playing! Goodbye!");
    }

    #[tokio::test]
    async fn test_unknown_and_out_of_combat_commands() {
        let mut gm = master(1);
        assert_eq!(
            gm.handle("dance").await.transcript(),
            "❌ Unknown command. Type 'help' for available commands."
        );
        assert_eq!(gm.handle("attack").await.transcript(), "❌ You're not in combat!");
        assert_eq!(gm.handle("9").await.transcript(), "❌ Invalid choice number.");
        assert_eq!(gm.handle("buy").await.transcript(), "❌ There is no shop here.");
    }

    #[tokio::test]
    async fn test_explore_lists_scene_choices() {
        let provider = Arc::new(MockProvider::replying(&["Lanterns flicker."]));
        let mut gm = GameMaster::with_rng(provider.clone(), StdRng::seed_from_u64(2)).unwrap();

        let turn = gm.opening().await;
        assert_eq!(turn.outputs[0].text(), "Lanterns flicker.");
        assert!(turn.outputs[1].text().ends_with("4. Talk to villagers"));
        let calls = provider.calls();
        assert!(calls[0].1[0]
            .text
            .starts_with("Narrate this scene: You stand in the bustling village square."));

        gm.handle("move Mountain Pass").await;
        gm.handle("explore").await;
        assert!(provider.calls()[1].1[0]
            .text
            .starts_with("Describe the environment at Mountain Pass with a mysterious atmosphere."));
    }

    #[tokio::test]
    async fn test_choices_move_between_scenes() {
        let mut gm = master(3);

        gm.handle("1").await;
        assert_eq!(gm.scene(), Scene::ElderHouse);
        assert_eq!(gm.state().player.location, "Elder's House");

        // accept the quest
        let turn = gm.handle("1").await;
        assert!(turn
            .transcript()
            .contains("New quest accepted: The Lost Artifact"));
        assert_eq!(gm.state().player.active_quests(), 1);

        gm.handle("3").await;
        assert_eq!(gm.scene(), Scene::VillageSquare);

        gm.handle("2").await;
        assert_eq!(gm.scene(), Scene::ForestPath);
        gm.handle("3").await;
        assert_eq!(gm.scene(), Scene::VillageSquare);
        assert_eq!(
            gm.state().world.discovered_locations,
            vec!["Starting Village", "Elder's House", "Forest Path"]
        );
    }

    #[tokio::test]
    async fn test_shop_then_buy_adds_sword() {
        let mut gm = master(4);
        let turn = gm.handle("3").await;
        assert!(turn.transcript().contains("Type 'buy'"));

        let turn = gm.handle("buy").await;
        assert!(turn
            .transcript()
            .ends_with("✅ Added Rusty Sword to inventory."));
        assert_eq!(gm.state().player.inventory[0].power, Some(5));

        let turn = gm.handle("use rusty sword").await;
        assert!(matches!(&turn.outputs[0], Output::Panel { title, .. } if title == "🔧 Use Item"));
        assert_eq!(
            gm.handle("use shield").await.transcript(),
            "❌ Item 'shield' not found in inventory."
        );
    }

    #[tokio::test]
    async fn test_move_matches_known_scenes() {
        let mut gm = master(5);
        gm.handle("move dark cave").await;
        assert_eq!(gm.scene(), Scene::DarkCave);
        assert_eq!(gm.state().player.location, "Dark Cave");

        gm.handle("move Mountain Pass").await;
        assert_eq!(gm.state().player.location, "Mountain Pass");
        assert_eq!(gm.scene(), Scene::DarkCave);
    }

    #[tokio::test]
    async fn test_attack_until_victory() {
        let mut gm = master(6);
        gm.state_mut().start_combat(goblin());

        let mut rounds = 0;
        while gm.state().game_mode == GameMode::Combat {
            let turn = gm.handle("attack").await;
            assert!(turn.transcript().contains("damage to the goblin!"));
            rounds += 1;
            assert!(rounds < 20);
        }

        // 30 health against d10 + 2 per round always falls within 10 rounds
        assert!(rounds <= 10);
        assert_eq!(gm.state().player.experience, 30);
        assert!(gm.state().player.gold > 50);
        assert!(gm.state().combat_state.is_none());
    }

    #[tokio::test]
    async fn test_defend_always_costs_health() {
        let mut gm = master(7);
        gm.state_mut().start_combat(goblin());
        for _ in 0..5 {
            let before = gm.state().player.health;
            gm.handle("defend").await;
            let taken = before - gm.state().player.health;
            assert!((1..=5).contains(&taken));
        }
    }

    #[tokio::test]
    async fn test_defeat_ends_game() {
        let mut gm = master(8);
        gm.state_mut().start_combat(goblin());
        gm.state_mut().player.health = 1;

        let turn = gm.handle("defend").await;
        assert!(turn.finished);
        assert!(turn
            .transcript()
            .ends_with("💀 You have been defeated! Game over."));
    }

    #[tokio::test]
    async fn test_failed_flee_and_defend_take_counterattacks() {
        let mut gm = master(10);
        gm.state_mut().start_combat(goblin());

        let turn = gm.handle("defend").await;
        assert!(turn.transcript().contains("💥 The goblin deals"));

        let mut failed = None;
        for _ in 0..50 {
            if gm.state().game_mode != GameMode::Combat {
                gm.state_mut().start_combat(goblin());
            }
            gm.state_mut().player.health = 100;
            let turn = gm.handle("flee").await;
            if turn.transcript().contains("❌ You fail to escape!") {
                failed = Some(turn);
                break;
            }
        }

        let turn = failed.expect("a d20 roll of 10 or less within 50 tries");
        assert!(turn.transcript().contains("💥 The goblin deals"));
        let taken = 100 - gm.state().player.health;
        assert!((1..=8).contains(&taken));
        assert_eq!(gm.state().game_mode, GameMode::Combat);
    }

    #[tokio::test]
    async fn test_numbered_choice_blocked_in_combat() {
        let mut gm = master(9);
        gm.state_mut().start_combat(goblin());
        assert_eq!(gm.handle("1").await.transcript(), "❌ Invalid command.");
    }

    #[test]
    fn test_scene_lookup() {
        assert_eq!(Scene::at("forest path"), Some(Scene::ForestPath));
        assert_eq!(Scene::at("Starting Village"), Some(Scene::VillageSquare));
        assert_eq!(Scene::at("Atlantis"), None);
        assert!(Scene::iter().all(|scene| !scene.choices().is_empty()));
    }
}
