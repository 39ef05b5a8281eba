use std::time::{Duration, Instant};

/// Session statistics shown in the header
#[derive(Debug, Default)]
pub struct GameMetrics {
    /// Set while a game is running
    started_at: Option<Instant>,
    /// Time spent in the current or last game; frozen once it ends
    pub elapsed_time: Duration,
    pub last_score: u32,
    pub high_score: u32,
    pub games_played: u32,
    /// Ticks run in the current game
    pub ticks: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the game clock
    pub fn update(&mut self) {
        if let Some(started_at) = self.started_at {
            self.elapsed_time = started_at.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        *self = Self {
            started_at: Some(Instant::now()),
            high_score: self.high_score,
            games_played: self.games_played,
            ..Self::default()
        };
    }

    pub fn on_tick(&mut self, score: u32) {
        self.ticks += 1;
        self.last_score = score;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.started_at = None;
        self.last_score = final_score;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    pub fn format_time(&self) -> String {
        format_duration(self.elapsed_time)
    }
}

/// `MM:SS`; minutes keep counting past the hour
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
