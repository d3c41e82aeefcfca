use std::time::{Duration, Instant};

/// Running totals for one process: the clock of the current game and the
/// best length reached so far
pub struct SessionStats {
    pub game_started: Instant,
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub games_played: u32,
    /// Set while a finished game is on screen; the clock stops there
    finished: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            games_played: 0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.game_started.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.finished = false;
    }

    pub fn on_game_over(&mut self, final_length: usize) {
        self.update();
        self.finished = true;
        self.games_played += 1;
        self.best_length = self.best_length.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut stats = SessionStats::new();
        stats.elapsed_time = Duration::from_secs(125);
        assert_eq!(stats.format_time(), "02:05");

        stats.elapsed_time = Duration::from_secs(0);
        assert_eq!(stats.format_time(), "00:00");

        stats.elapsed_time = Duration::from_secs(3661);
        assert_eq!(stats.format_time(), "61:01");
    }

    #[test]
    fn test_best_length_tracking() {
        let mut stats = SessionStats::new();

        stats.on_game_over(10);
        assert_eq!(stats.best_length, 10);
        assert_eq!(stats.games_played, 1);

        stats.on_game_over(5);
        assert_eq!(stats.best_length, 10);
        assert_eq!(stats.games_played, 2);
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut stats = SessionStats::new();
        stats.on_game_over(3);
        let frozen = stats.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        stats.update();
        assert_eq!(stats.elapsed_time, frozen);

        stats.on_game_start();
        std::thread::sleep(Duration::from_millis(20));
        stats.update();
        assert!(stats.elapsed_time >= Duration::from_millis(20));
    }
}
