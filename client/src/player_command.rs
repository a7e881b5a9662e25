use common::puzzle2048::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlayerCommand {
    Move(Direction),
    Undo,
    Restart,
    Leaderboard,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<PlayerCommand> {
    let command = match input.trim().to_ascii_lowercase().as_str() {
        "w" | "up" | "k" => PlayerCommand::Move(Direction::Up),
        "s" | "down" | "j" => PlayerCommand::Move(Direction::Down),
        "a" | "left" | "h" => PlayerCommand::Move(Direction::Left),
        "d" | "right" | "l" => PlayerCommand::Move(Direction::Right),
        "u" | "undo" => PlayerCommand::Undo,
        "r" | "restart" => PlayerCommand::Restart,
        "b" | "board" | "leaderboard" => PlayerCommand::Leaderboard,
        "?" | "help" => PlayerCommand::Help,
        "q" | "quit" | "exit" => PlayerCommand::Quit,
        _ => return None,
    };
    Some(command)
}

pub const HELP: &str = "w/a/s/d (or up/left/down/right) move, u undo, r restart, b leaderboard, q quit";
