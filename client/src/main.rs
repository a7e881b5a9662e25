mod board_view;
mod player_command;
mod settings;
mod terminal_renderer;

use clap::Parser;
use common::puzzle2048::{MoveOutcome, Session};
use common::storage::FileStateStore;
use common::{EngineError, SessionRng, log, logger};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use board_view::{render_board, render_leaderboard};
use player_command::{HELP, PlayerCommand, parse_command};
use settings::{Args, ClientSettings, get_config_manager};
use terminal_renderer::TerminalRenderer;

type InputLines = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let file_config = get_config_manager(args.config.as_deref()).get_or_create_config()?;
    let settings = ClientSettings::resolve(&args, file_config)?;

    let store = FileStateStore::new(&settings.game.state_dir);
    let rng = SessionRng::from_optional_seed(settings.game.seed);
    let mut session = Session::new(&settings.game, store, rng)?;
    log!("Session started with seed {}", session.seed());

    let renderer = TerminalRenderer::new(settings.game.grid_size, settings.step_delay);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if session.was_restored() {
        println!("Resumed your last game.");
    }
    println!("{}", HELP);
    print!("{}", render_board(session.grid(), session.score()));

    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            println!("Unknown command. {}", HELP);
            continue;
        };

        match command {
            PlayerCommand::Move(direction) => {
                if session.is_game_over() {
                    println!("The game is over: undo (u) or restart (r).");
                    continue;
                }
                match session.play_move(direction, &renderer).await? {
                    MoveOutcome::Rejected => continue,
                    MoveOutcome::Settled(_) => {}
                    MoveOutcome::GameOver(_) => {
                        print!("{}", render_board(session.grid(), session.score()));
                        prompt_high_score(&mut session, &mut lines).await?;
                        continue;
                    }
                }
            }
            PlayerCommand::Undo => match session.undo() {
                Ok(true) => {}
                Ok(false) => {
                    println!("Nothing to undo.");
                    continue;
                }
                Err(EngineError::MoveInFlight) => continue,
                Err(e) => return Err(e.into()),
            },
            PlayerCommand::Restart => session.restart()?,
            PlayerCommand::Leaderboard => {
                print!("{}", render_leaderboard(&session.leaderboard()));
                continue;
            }
            PlayerCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            PlayerCommand::Quit => break,
        }

        print!("{}", render_board(session.grid(), session.score()));
    }

    log!("Bye");
    Ok(())
}

async fn prompt_high_score(
    session: &mut Session<FileStateStore>,
    lines: &mut InputLines,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Enter your name for the leaderboard (empty to skip):");
    let Some(name) = lines.next_line().await? else {
        return Ok(());
    };

    match session.record_high_score(&name) {
        Some(rank) => {
            println!("Saved as #{}.", rank + 1);
            print!("{}", render_leaderboard(&session.leaderboard()));
        }
        None if !name.trim().is_empty() => println!("Score did not make the leaderboard."),
        None => {}
    }
    println!("Press r to play again.");
    Ok(())
}
