use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::session_rng::SessionRng;
use crate::settings::GameSettings;
use crate::types::Direction;

/// A direction change issued before `update` on the given tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedCommand {
    pub tick: u64,
    pub direction: Direction,
}

/// Everything needed to re-simulate a game: the seed, the field bounds and
/// the per-tick direction commands. Serializable so hosts can store or ship
/// it; this crate itself does no I/O.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    pub settings: GameSettings,
    pub commands: Vec<RecordedCommand>,
}

/// Captures commands while a live game runs. The host must record each
/// direction change under the tick on which it was applied, before that
/// tick's `update` call.
pub struct GameRecorder {
    record: GameRecord,
}

impl GameRecorder {
    pub fn new(seed: u64, settings: GameSettings) -> Self {
        Self {
            record: GameRecord {
                seed,
                settings,
                commands: Vec::new(),
            },
        }
    }

    pub fn record_command(&mut self, tick: u64, direction: Direction) {
        self.record.commands.push(RecordedCommand { tick, direction });
    }

    pub fn commands_count(&self) -> usize {
        self.record.commands.len()
    }

    pub fn finalize(mut self) -> GameRecord {
        self.record.commands.sort_by_key(|c| c.tick);
        self.record
    }
}

/// Deterministically re-simulates a `GameRecord`, one tick per `step` call.
pub struct ReplayPlayer {
    record: GameRecord,
    state: GameState,
    rng: SessionRng,
    current_tick: u64,
    next_command: usize,
}

impl ReplayPlayer {
    pub fn new(record: GameRecord) -> Self {
        let mut rng = SessionRng::new(record.seed);
        let state = GameState::new(&record.settings, &mut rng);
        Self {
            record,
            state,
            rng,
            current_tick: 0,
            next_command: 0,
        }
    }

    /// Applies the commands recorded for the current tick, then advances the
    /// game. Returns `update`'s result.
    pub fn step(&mut self) -> bool {
        while let Some(command) = self.record.commands.get(self.next_command) {
            if command.tick != self.current_tick {
                break;
            }
            self.state.set_direction(command.direction);
            self.next_command += 1;
        }

        let changed = self.state.update(&mut self.rng);
        self.current_tick += 1;
        changed
    }

    /// Steps until the game ends or `max_ticks` have been replayed. A snake
    /// on a toroidal grid can run forever, so a bound is required.
    pub fn run(&mut self, max_ticks: u64) {
        while self.current_tick < max_ticks && !self.state.is_game_over() {
            self.step();
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_game_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn snake_cells(state: &GameState) -> Vec<Point> {
        (0..state.snake_length())
            .map(|i| state.snake_segment(i).unwrap())
            .collect()
    }

    fn drive_live_game(seed: u64, commands: &[RecordedCommand], ticks: u64) -> GameState {
        let settings = GameSettings::new(12, 12);
        let mut rng = SessionRng::new(seed);
        let mut state = GameState::new(&settings, &mut rng);
        let mut next = 0;
        for tick in 0..ticks {
            while next < commands.len() && commands[next].tick == tick {
                state.set_direction(commands[next].direction);
                next += 1;
            }
            if !state.update(&mut rng) {
                break;
            }
        }
        state
    }

    #[test]
    fn test_replay_reproduces_live_game() {
        let seed = 7;
        let settings = GameSettings::new(12, 12);
        let mut recorder = GameRecorder::new(seed, settings);
        recorder.record_command(3, Direction::Down);
        recorder.record_command(8, Direction::Left);
        recorder.record_command(14, Direction::Up);
        recorder.record_command(20, Direction::Right);
        let record = recorder.finalize();

        let live = drive_live_game(seed, &record.commands, 30);

        let mut player = ReplayPlayer::new(record);
        player.run(30);

        assert_eq!(player.state().score(), live.score());
        assert_eq!(player.state().is_game_over(), live.is_game_over());
        assert_eq!(player.state().food_position(), live.food_position());
        assert_eq!(snake_cells(player.state()), snake_cells(&live));
    }

    #[test]
    fn test_finalize_sorts_commands_by_tick() {
        let mut recorder = GameRecorder::new(1, GameSettings::default());
        recorder.record_command(9, Direction::Up);
        recorder.record_command(2, Direction::Down);
        recorder.record_command(5, Direction::Left);
        assert_eq!(recorder.commands_count(), 3);

        let record = recorder.finalize();
        let ticks: Vec<u64> = record.commands.iter().map(|c| c.tick).collect();
        assert_eq!(ticks, vec![2, 5, 9]);
    }

    #[test]
    fn test_record_yaml_round_trip() {
        let mut recorder = GameRecorder::new(99, GameSettings::new(15, 10));
        recorder.record_command(0, Direction::Up);
        recorder.record_command(4, Direction::Left);
        let record = recorder.finalize();

        let yaml = serde_yaml_ng::to_string(&record).unwrap();
        let restored: GameRecord = serde_yaml_ng::from_str(&yaml).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_run_stops_at_tick_bound() {
        let record = GameRecorder::new(3, GameSettings::new(12, 12)).finalize();
        let mut player = ReplayPlayer::new(record);
        player.run(25);
        assert!(player.current_tick() <= 25);
        if !player.is_finished() {
            assert_eq!(player.current_tick(), 25);
        }
    }
}
