use serde::{Deserialize, Serialize};

/// Reward for eating one piece of food.
pub const FOOD_REWARD: f32 = 10.0;
/// Reward for ending the episode by collision or starvation.
pub const DEATH_REWARD: f32 = -100.0;
/// Shaping reward for a step that reduces the distance to the food.
pub const TOWARDS_FOOD_REWARD: f32 = 1.0;
/// Shaping reward for a step that does not reduce the distance to the food.
pub const AWAY_FROM_FOOD_REWARD: f32 = -1.0;

/// Static parameters of a snake environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeConfig {
    pub grid_width: u16,
    pub grid_height: u16,
    /// Episode cutoff: steps allowed since the last food before starving.
    pub max_steps_without_food: usize,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            max_steps_without_food: 200,
        }
    }
}

impl SnakeConfig {
    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.grid_width) * usize::from(self.grid_height)
    }
}
