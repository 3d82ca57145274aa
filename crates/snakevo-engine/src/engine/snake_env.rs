use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    StepError,
    core::{Direction, Position, Snake},
    environment::{Environment, Transition},
};

use super::{
    AWAY_FROM_FOOD_REWARD, DEATH_REWARD, FOOD_REWARD, SnakeConfig, TOWARDS_FOOD_REWARD,
    observation::{self, OBSERVATION_LEN},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum EpisodeState {
    Running,
    Collided,
    Starved,
    GridFilled,
}

/// A seeded snake episode.
///
/// The random generator only drives food placement and is never reseeded by
/// [`Environment::reset`], so consecutive episodes see different food but the
/// whole sequence is reproducible from the seed.
#[derive(Debug, Clone)]
pub struct SnakeEnv {
    config: SnakeConfig,
    rng: Pcg32,
    snake: Snake,
    food: Option<Position>,
    state: EpisodeState,
    score: usize,
    steps_taken: usize,
    steps_since_food: usize,
}

impl SnakeEnv {
    #[must_use]
    pub fn with_seed(config: SnakeConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Seeds the environment from the OS random source.
    #[must_use]
    pub fn from_os_rng(config: SnakeConfig) -> Self {
        Self::with_rng(config, Pcg32::from_os_rng())
    }

    fn with_rng(config: SnakeConfig, rng: Pcg32) -> Self {
        let mut env = Self {
            config,
            rng,
            snake: Snake::new(start_position(&config), Direction::Up),
            food: None,
            state: EpisodeState::Running,
            score: 0,
            steps_taken: 0,
            steps_since_food: 0,
        };
        env.reset();
        env
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    #[must_use]
    pub fn state(&self) -> EpisodeState {
        self.state
    }

    fn observe(&self) -> Vec<f32> {
        observation::observe(&self.config, &self.snake, self.food)
    }

    fn spawn_food(&mut self) {
        let free = (0..self.config.grid_height)
            .flat_map(|y| (0..self.config.grid_width).map(move |x| (x, y)))
            .map(|(x, y)| Position::new(i32::from(x), i32::from(y)))
            .filter(|pos| !self.snake.contains(*pos))
            .collect::<Vec<_>>();
        self.food = if free.is_empty() {
            None
        } else {
            Some(free[self.rng.random_range(0..free.len())])
        };
    }

    fn finish(&mut self, state: EpisodeState) -> Transition {
        self.state = state;
        Transition {
            observation: self.observe(),
            reward: DEATH_REWARD,
            done: true,
        }
    }
}

fn start_position(config: &SnakeConfig) -> Position {
    Position::new(
        i32::from(config.grid_width / 2),
        i32::from(config.grid_height / 2),
    )
}

impl Environment for SnakeEnv {
    type Error = StepError;

    fn observation_len(&self) -> usize {
        OBSERVATION_LEN
    }

    fn action_count(&self) -> usize {
        Direction::LEN
    }

    fn reset(&mut self) -> Transition {
        self.snake = Snake::new(start_position(&self.config), Direction::Up);
        self.state = EpisodeState::Running;
        self.score = 0;
        self.steps_taken = 0;
        self.steps_since_food = 0;
        self.spawn_food();
        Transition::initial(self.observe())
    }

    fn step(&mut self, action: usize) -> Result<Transition, StepError> {
        if !self.state.is_running() {
            return Err(StepError::EpisodeFinished);
        }
        let direction = Direction::from_action(action).ok_or(StepError::InvalidAction {
            action,
            action_count: Direction::LEN,
        })?;

        self.snake.turn(direction);
        self.steps_taken += 1;
        self.steps_since_food += 1;

        let next = self.snake.next_head();
        let eats = self.food == Some(next);
        if !next.is_inside(self.config.grid_width, self.config.grid_height)
            || self.snake.bites(next, eats)
        {
            return Ok(self.finish(EpisodeState::Collided));
        }

        let previous_distance = self.food.map(|food| self.snake.head().manhattan_distance(food));
        self.snake.advance(eats);

        if eats {
            self.score += 1;
            self.steps_since_food = 0;
            self.spawn_food();
            if self.food.is_none() {
                self.state = EpisodeState::GridFilled;
                return Ok(Transition {
                    observation: self.observe(),
                    reward: FOOD_REWARD,
                    done: true,
                });
            }
            return Ok(Transition {
                observation: self.observe(),
                reward: FOOD_REWARD,
                done: false,
            });
        }

        if self.steps_since_food > self.config.max_steps_without_food {
            return Ok(self.finish(EpisodeState::Starved));
        }

        let reward = match (previous_distance, self.food) {
            (Some(before), Some(food)) if self.snake.head().manhattan_distance(food) < before => {
                TOWARDS_FOOD_REWARD
            }
            _ => AWAY_FROM_FOOD_REWARD,
        };
        Ok(Transition {
            observation: self.observe(),
            reward,
            done: false,
        })
    }

    fn score(&self) -> usize {
        self.score
    }

    fn steps_taken(&self) -> usize {
        self.steps_taken
    }
}
