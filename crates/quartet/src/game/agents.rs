use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use super::state::{GameState, Item};
use super::tools::{self, EventKind, Rarity};
use crate::agent::{error_reply, Agent};
use crate::errors::AgentResult;
use crate::models::tool::ToolSpec;
use crate::prompt_template::render_prompt;
use crate::providers::base::Provider;

#[derive(Serialize)]
struct SystemContext<'a> {
    persona: &'a str,
    tools: &'a [ToolSpec],
    state: Option<String>,
}

/// A game persona with the dice tools advertised in its prompt
struct GameAgent {
    agent: Agent,
    persona: String,
}

impl GameAgent {
    fn new(
        name: &str,
        description: &str,
        persona_template: &str,
        provider: Arc<dyn Provider>,
    ) -> AgentResult<Self> {
        let mut agent = Agent::new(name, description, provider);
        for tool in tools::tool_specs() {
            agent.add_tool(tool);
        }
        let persona = render_prompt(persona_template, &serde_json::json!({}))?;
        Ok(Self { agent, persona })
    }

    fn system_prompt(&self, state: Option<&GameState>) -> AgentResult<String> {
        let state = state
            .map(|state| serde_json::to_string_pretty(&state.snapshot()))
            .transpose()
            .map_err(|e| crate::errors::AgentError::Internal(e.to_string()))?;
        Ok(render_prompt(
            "game_system.md",
            &SystemContext {
                persona: &self.persona,
                tools: self.agent.tools(),
                state,
            },
        )?)
    }

    async fn generate(&mut self, input: &str, state: Option<&GameState>) -> String {
        match self.system_prompt(state) {
            Ok(system) => self.agent.respond(&system, input).await,
            Err(err) => error_reply(&err),
        }
    }
}

pub struct NarratorAgent {
    inner: GameAgent,
}

impl NarratorAgent {
    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            inner: GameAgent::new(
                "NarratorAgent",
                "Tells the story and describes your surroundings",
                "game_narrator.md",
                provider,
            )?,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.inner.agent
    }

    pub async fn narrate_scene(
        &mut self,
        scene_description: &str,
        choices: &[&str],
        state: Option<&GameState>,
    ) -> String {
        let mut prompt = format!("Narrate this scene: {}", scene_description);
        if !choices.is_empty() {
            prompt.push_str("\n\nPresent these choices to the player:\n");
            for (i, choice) in choices.iter().enumerate() {
                prompt.push_str(&format!("{}. {}\n", i + 1, choice));
            }
        }
        self.inner.generate(&prompt, state).await
    }

    pub async fn progress_story(
        &mut self,
        choice: &str,
        location: &str,
        state: Option<&GameState>,
    ) -> String {
        let prompt = format!(
            "Player chose: {}\nCurrent location: {}\n\nProgress the story naturally and describe what happens next.",
            choice, location
        );
        self.inner.generate(&prompt, state).await
    }

    pub async fn describe_environment(
        &mut self,
        location: &str,
        atmosphere: &str,
        state: Option<&GameState>,
    ) -> String {
        let prompt = format!(
            "Describe the environment at {} with a {} atmosphere. Make it vivid and immersive.",
            location, atmosphere
        );
        self.inner.generate(&prompt, state).await
    }
}

pub struct MonsterAgent {
    inner: GameAgent,
}

impl MonsterAgent {
    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            inner: GameAgent::new(
                "MonsterAgent",
                "Manages combat encounters and battles",
                "game_monster.md",
                provider,
            )?,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.inner.agent
    }

    /// Describe a new encounter, seeded with a combat event and a d20
    /// difficulty roll
    pub async fn create_encounter<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        monster_type: &str,
        player_level: i32,
    ) -> String {
        let event = tools::generate_event(rng, EventKind::Combat);
        let difficulty = tools::d(rng, 20);
        let prompt = format!(
            "Create a {} encounter for a level {} player.\nEvent: {}\nDifficulty roll: Rolled 1d20 = [{}] (Total: {})\n\nDescribe the monster, its appearance, and the combat situation.",
            monster_type, player_level, event.description, difficulty, difficulty
        );
        self.inner.generate(&prompt, None).await
    }

    pub async fn manage_combat_round<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        player_action: &str,
        player_level: i32,
        monster_level: i32,
        monster_health: i32,
        player_health: i32,
    ) -> String {
        let player_hit = tools::combat_damage(rng, player_level, 2);
        let monster_hit = tools::combat_damage(rng, monster_level, 1);
        let prompt = format!(
            "Combat round:\nPlayer action: {}\nPlayer damage dealt: {}\nMonster damage dealt: {}\nMonster health: {}\nPlayer health: {}\n\nDescribe the combat round vividly and determine the outcome.",
            player_action,
            player_hit.description,
            monster_hit.description,
            monster_health,
            player_health
        );
        self.inner.generate(&prompt, None).await
    }

    pub async fn describe_monster_action(&mut self, monster_type: &str, action: &str) -> String {
        let prompt = format!(
            "The {} performs this action: {}. Describe it vividly and dramatically.",
            monster_type, action
        );
        self.inner.generate(&prompt, None).await
    }
}

pub struct ItemAgent {
    inner: GameAgent,
}

impl ItemAgent {
    pub fn new(provider: Arc<dyn Provider>) -> AgentResult<Self> {
        Ok(Self {
            inner: GameAgent::new(
                "ItemAgent",
                "Handles your inventory and rewards",
                "game_item.md",
                provider,
            )?,
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.inner.agent
    }

    pub async fn generate_item<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        item_type: &str,
        rarity: Rarity,
        monster_level: i32,
    ) -> String {
        let loot = tools::generate_loot(rng, monster_level, rarity);
        let prompt = format!(
            "Generate a {} {} item.\nLoot details: {}\n\nCreate a detailed description of the item, its properties, and potential uses.",
            rarity, item_type, loot.description
        );
        self.inner.generate(&prompt, None).await
    }

    /// An empty inventory is answered without asking the model
    pub async fn describe_inventory(&mut self, inventory: &[Item]) -> String {
        if inventory.is_empty() {
            return "Your inventory is empty.".to_string();
        }
        let listing = serde_json::to_string_pretty(inventory).unwrap_or_default();
        let prompt = format!(
            "Describe the player's inventory containing these items: {}",
            listing
        );
        self.inner.generate(&prompt, None).await
    }

    pub async fn suggest_item_use(
        &mut self,
        item: &Item,
        situation: &str,
        state: Option<&GameState>,
    ) -> String {
        let listing = serde_json::to_string_pretty(item).unwrap_or_default();
        let prompt = format!(
            "Item: {}\nSituation: {}\n\nSuggest how the player might use this item effectively in this situation.",
            listing, situation
        );
        self.inner.generate(&prompt, state).await
    }

    pub async fn create_shop_inventory(&mut self, shop_type: &str, player_level: i32) -> String {
        let prompt = format!(
            "Create a {} shop inventory suitable for a level {} player.\nInclude various items with different rarities and prices.\nPresent them in an engaging way that makes the player want to browse.",
            shop_type, player_level
        );
        self.inner.generate(&prompt, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::mock::MockProvider;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[tokio::test]
    async fn test_narrator_prompt_layout() {
        let provider = Arc::new(MockProvider::replying(&["The square bustles."]));
        let mut narrator = NarratorAgent::new(provider.clone()).unwrap();
        let state = GameState::default();

        let reply = narrator
            .narrate_scene(
                "The village square",
                &["Visit the village elder", "Check the local shop"],
                Some(&state),
            )
            .await;
        assert_eq!(reply, "The square bustles.");

        let (system, messages) = &provider.calls()[0];
        assert!(system.starts_with("You are a master storyteller"));
        assert!(system.contains("- roll_dice("));
        assert!(system.contains("sides: int"));
        assert!(system.contains("): Roll dice for game mechanics\n"));
        assert!(system.contains("Current game state: {"));
        assert!(system
            .trim_end()
            .ends_with("describe what you're doing and the results."));
        assert!(messages[0]
            .text
            .ends_with("1. Visit the village elder\n2. Check the local shop\n"));
        assert_eq!(narrator.agent().history().len(), 2);
    }

    #[tokio::test]
    async fn test_prompt_without_state_omits_block() {
        let provider = Arc::new(MockProvider::replying(&["Grr"]));
        let mut monster = MonsterAgent::new(provider.clone()).unwrap();
        monster.describe_monster_action("goblin", "swing club").await;

        let (system, messages) = &provider.calls()[0];
        assert!(!system.contains("Current game state"));
        assert_eq!(
            messages[0].text,
            "The goblin performs this action: swing club. Describe it vividly and dramatically."
        );
    }

    #[tokio::test]
    async fn test_encounter_uses_tools() {
        let provider = Arc::new(MockProvider::replying(&["A goblin appears"]));
        let mut monster = MonsterAgent::new(provider.clone()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        monster.create_encounter(&mut rng, "goblin", 2).await;
        let prompt = &provider.calls()[0].1[0].text;
        assert!(prompt.starts_with("Create a goblin encounter for a level 2 player."));
        assert!(prompt.contains("Difficulty roll: Rolled 1d20 = ["));
    }

    #[tokio::test]
    async fn test_empty_inventory_skips_model() {
        let provider = Arc::new(MockProvider::replying(&[]));
        let mut items = ItemAgent::new(provider.clone()).unwrap();
        assert_eq!(items.describe_inventory(&[]).await, "Your inventory is empty.");
        assert!(provider.calls().is_empty());

        let sword = Item::new("Rusty Sword", "weapon", "Dull").with_power(5);
        items.describe_inventory(&[sword]).await;
        assert!(provider.calls()[0].1[0].text.contains("\"power\": 5"));
    }

    #[tokio::test]
    async fn test_game_agent_errors_become_text() {
        let mut items = ItemAgent::new(Arc::new(MockProvider::failing("quota"))).unwrap();
        let reply = items.create_shop_inventory("general", 1).await;
        assert_eq!(reply, "Error generating response: quota");
    }
}
