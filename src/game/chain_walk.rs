use tracing::info;

use super::{
    action::ChainAction,
    board::{Board, Observation, Position},
    config::ChainWalkConfig,
    engine::{EngineError, Game, Plot, TimeStep},
};

/// The classic chain-walk problem
///
/// The player walks left or right along a single row. Reaching the leftmost
/// cell pays a small reward, reaching the rightmost cell pays a large one, and
/// either ends the episode.
pub struct ChainWalk {
    config: ChainWalkConfig,
    board: Board,
    player: usize,
    plot: Plot,
    started: bool,
}

impl ChainWalk {
    /// Build a chain walk from its configuration
    pub fn new(config: ChainWalkConfig) -> Result<Self, EngineError> {
        if config.width < 3 {
            return Err(EngineError::InvalidLayout(format!(
                "chain width must be at least 3, got {}",
                config.width
            )));
        }
        if config.start == 0 || config.start >= config.width - 1 {
            return Err(EngineError::InvalidLayout(format!(
                "start column {} must lie strictly inside a chain of width {}",
                config.start, config.width
            )));
        }

        let board = Board::from_art(&[config.art()])?;

        Ok(Self {
            player: config.start,
            config,
            board,
            plot: Plot::new(),
            started: false,
        })
    }

    /// Current column of the player
    pub fn player_column(&self) -> usize {
        self.player
    }

    fn observe(&self) -> Observation {
        Observation::new(self.board.clone())
    }

    fn move_player(&mut self, action: ChainAction) {
        let last = self.config.width - 1;
        let target = self.player.saturating_add_signed(action.delta()).min(last);

        if target != self.player {
            self.board.set(Position::new(0, self.player), self.config.floor);
            self.board.set(Position::new(0, target), self.config.player);
            self.player = target;
        }

        if self.player == 0 {
            self.plot.add_reward(self.config.left_reward);
            self.plot.log("Reached the left end of the chain");
            self.plot.terminate_episode(0.0);
        } else if self.player == last {
            self.plot.add_reward(self.config.right_reward);
            self.plot.log("Reached the right end of the chain");
            self.plot.terminate_episode(0.0);
        }
    }
}

impl Game for ChainWalk {
    type Action = ChainAction;

    fn its_showtime(&mut self) -> Result<TimeStep, EngineError> {
        if self.started {
            return Err(EngineError::AlreadyStarted);
        }
        self.started = true;
        info!(width = self.config.width, start = self.player, "Chain walk started");

        let (reward, _) = self.plot.finish_frame();
        Ok(TimeStep {
            observation: self.observe(),
            reward,
            discount: None,
        })
    }

    fn play(&mut self, action: ChainAction) -> Result<TimeStep, EngineError> {
        if !self.started {
            return Err(EngineError::NotStarted);
        }
        if self.plot.is_terminated() {
            return Err(EngineError::GameOver);
        }

        self.move_player(action);

        let (reward, discount) = self.plot.finish_frame();
        if self.plot.is_terminated() {
            info!(
                frames = self.plot.frame(),
                column = self.player,
                reward = reward.unwrap_or(0.0),
                "Chain walk finished"
            );
        }

        Ok(TimeStep {
            observation: self.observe(),
            reward,
            discount: Some(discount),
        })
    }

    fn game_over(&self) -> bool {
        self.plot.is_terminated()
    }

    fn drain_log(&mut self) -> Vec<String> {
        self.plot.drain_log()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> ChainWalk {
        let mut game = ChainWalk::new(ChainWalkConfig::default()).unwrap();
        game.its_showtime().unwrap();
        game
    }

    #[test]
    fn test_kickoff() {
        let mut game = ChainWalk::new(ChainWalkConfig::default()).unwrap();
        let step = game.its_showtime().unwrap();

        assert_eq!(step.reward, None);
        assert_eq!(step.observation.board.cols(), 23);
        assert_eq!(step.observation.board.find('P'), Some(Position::new(0, 1)));
        assert!(!game.game_over());
    }

    #[test]
    fn test_walk_right_to_the_end() {
        let mut game = started();

        for _ in 0..20 {
            let step = game.play(ChainAction::Right).unwrap();
            assert_eq!(step.reward, None);
            assert!(!game.game_over());
        }

        let step = game.play(ChainAction::Right).unwrap();
        assert_eq!(step.reward, Some(100.0));
        assert_eq!(step.discount, Some(0.0));
        assert_eq!(game.player_column(), 22);
        assert!(game.game_over());
    }

    #[test]
    fn test_walk_left_once() {
        let mut game = started();

        let step = game.play(ChainAction::Left).unwrap();
        assert_eq!(step.reward, Some(1.0));
        assert_eq!(step.observation.board.find('P'), Some(Position::new(0, 0)));
        assert!(game.game_over());
    }

    #[test]
    fn test_stay_keeps_position() {
        let mut game = started();

        let step = game.play(ChainAction::Stay).unwrap();
        assert_eq!(step.reward, None);
        assert_eq!(step.discount, Some(1.0));
        assert_eq!(game.player_column(), 1);
    }

    #[test]
    fn test_lifecycle_errors() {
        let mut game = ChainWalk::new(ChainWalkConfig::default()).unwrap();
        assert_eq!(game.play(ChainAction::Right), Err(EngineError::NotStarted));

        game.its_showtime().unwrap();
        assert_eq!(game.its_showtime(), Err(EngineError::AlreadyStarted));

        game.play(ChainAction::Left).unwrap();
        assert_eq!(game.play(ChainAction::Right), Err(EngineError::GameOver));
    }

    #[test]
    fn test_log_drained_once() {
        let mut game = started();
        game.play(ChainAction::Left).unwrap();

        assert_eq!(game.drain_log().len(), 1);
        assert!(game.drain_log().is_empty());
    }

    #[test]
    fn test_invalid_layouts() {
        assert!(ChainWalk::new(ChainWalkConfig::new(2, 1)).is_err());
        assert!(ChainWalk::new(ChainWalkConfig::new(10, 0)).is_err());
        assert!(ChainWalk::new(ChainWalkConfig::new(10, 9)).is_err());
        assert!(ChainWalk::new(ChainWalkConfig::new(3, 1)).is_ok());
    }
}
