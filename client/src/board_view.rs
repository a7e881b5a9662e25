use common::puzzle2048::{Grid, Leaderboard};

const CELL_WIDTH: usize = 6;

pub fn render_board(grid: &Grid, score: u32) -> String {
    let size = grid.size();
    let separator = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(size));

    let mut out = format!("Score: {}\n", score);
    out.push_str(&separator);
    for row in grid.values().chunks(size.max(1)) {
        out.push('|');
        for value in row {
            match value {
                Some(value) => out.push_str(&format!("{:^width$}|", value, width = CELL_WIDTH)),
                None => out.push_str(&format!("{:^width$}|", ".", width = CELL_WIDTH)),
            }
        }
        out.push('\n');
        out.push_str(&separator);
    }
    out
}

pub fn render_leaderboard(leaderboard: &Leaderboard) -> String {
    if leaderboard.is_empty() {
        return "No high scores yet\n".to_string();
    }

    leaderboard
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "{:>2}. {:<16} {:>8}  {}\n",
                i + 1,
                entry.name,
                entry.score,
                entry.date
            )
        })
        .collect()
}
