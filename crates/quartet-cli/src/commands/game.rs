use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use rand::rngs::StdRng;
use rand::SeedableRng;

use quartet::game::{GameMaster, Output, Turn, GAME_TITLE, WELCOME};
use quartet::providers::base::Provider;

use crate::prompt::rustyline::RustylinePrompt;
use crate::prompt::{busy, header, render_markdown, InputType, Theme};

#[derive(Subcommand)]
pub enum GameCommand {
    /// Start a new adventure
    Play {
        /// Your character's name
        #[arg(long, default_value = "Adventurer")]
        name: String,
        /// Seed dice rolls and encounters for a repeatable run
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub async fn run(command: GameCommand, provider: Arc<dyn Provider>) -> Result<()> {
    match command {
        GameCommand::Play { name, seed } => {
            let rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let mut game = GameMaster::with_rng(provider, rng)?;
            game.state_mut().player.name = name;
            play(&mut game).await
        }
    }
}

async fn play(game: &mut GameMaster) -> Result<()> {
    header(GAME_TITLE);
    render_markdown(WELCOME, Theme::Dark)?;

    // quit words go to the game master so it can say goodbye
    let mut prompt = RustylinePrompt::new(&[])?;
    let opening = busy("The narrator sets the scene", game.opening()).await;
    show(&opening, prompt.theme())?;

    loop {
        let input = prompt.get_input()?;
        let command = match input.input_type {
            InputType::Exit => break,
            InputType::AskAgain => continue,
            InputType::Message => input.content.unwrap_or_default(),
        };

        let turn = busy("The story unfolds", game.handle(&command)).await;
        show(&turn, prompt.theme())?;
        if turn.finished {
            break;
        }
    }
    Ok(())
}

fn show(turn: &Turn, theme: Theme) -> Result<()> {
    for output in &turn.outputs {
        match output {
            Output::Panel { title, body } => {
                header(title);
                render_markdown(body, theme)?;
            }
            Output::Line(line) => println!("{}", line),
        }
    }
    Ok(())
}
