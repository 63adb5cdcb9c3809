//! Game Master: a text adventure driven by a command interpreter, with three
//! agents (narrator, monster, item) supplying the prose.
pub mod agents;
pub mod master;
pub mod state;
pub mod tools;

pub use agents::{ItemAgent, MonsterAgent, NarratorAgent};
pub use master::{GameMaster, Output, Scene, Turn, GAME_TITLE, HELP, WELCOME};
pub use state::{GameMode, GameState, Item, Monster, Player, Quest, QuestRewards, World};
pub use tools::{EventKind, Rarity};
