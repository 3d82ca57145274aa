//! Ray-cast observation of the grid as seen from the snake's head.
//!
//! Eight rays are cast from the head (N, NE, E, SE, S, SW, W, NW). Each ray
//! contributes three values:
//!
//! ```text
//! wall  = 1 / (cells inside the grid along the ray + 1)
//! body  = 1 if a body segment lies on the ray, else 0
//! food  = 1 if the food lies on the ray, else 0
//! ```
//!
//! followed by the one-hot heading, for [`OBSERVATION_LEN`] values in total.

use crate::core::{Direction, Position, Snake};

use super::SnakeConfig;

const RAYS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub const OBSERVATION_LEN: usize = RAYS.len() * 3 + Direction::LEN;

#[must_use]
pub fn observe(config: &SnakeConfig, snake: &Snake, food: Option<Position>) -> Vec<f32> {
    let mut observation = Vec::with_capacity(OBSERVATION_LEN);
    let head = snake.head();
    for (dx, dy) in RAYS {
        let mut distance = 0_u16;
        let mut body_seen = false;
        let mut food_seen = false;
        let mut cursor = head.offset(dx, dy);
        while cursor.is_inside(config.grid_width, config.grid_height) {
            distance += 1;
            body_seen |= snake.contains(cursor);
            food_seen |= food == Some(cursor);
            cursor = cursor.offset(dx, dy);
        }
        observation.push(1.0 / (f32::from(distance) + 1.0));
        observation.push(f32::from(u8::from(body_seen)));
        observation.push(f32::from(u8::from(food_seen)));
    }
    observation.extend(snake.heading().one_hot());
    observation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_length() {
        let config = SnakeConfig::default();
        let snake = Snake::new(Position::new(5, 5), Direction::Up);
        let observation = observe(&config, &snake, None);
        assert_eq!(observation.len(), OBSERVATION_LEN);
    }

    #[test]
    fn test_food_and_wall_rays() {
        let config = SnakeConfig {
            grid_width: 5,
            grid_height: 5,
            ..SnakeConfig::default()
        };
        let snake = Snake::new(Position::new(2, 2), Direction::Right);
        let observation = observe(&config, &snake, Some(Position::new(4, 2)));

        // east ray is the third ray
        let east = &observation[6..9];
        assert_eq!(east, &[1.0 / 3.0, 0.0, 1.0]);
        // north ray sees no food
        assert_eq!(observation[2], 0.0);
        // heading one-hot
        assert_eq!(&observation[24..], &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_head_against_wall() {
        let config = SnakeConfig {
            grid_width: 5,
            grid_height: 5,
            ..SnakeConfig::default()
        };
        let snake = Snake::new(Position::new(2, 0), Direction::Up);
        let observation = observe(&config, &snake, None);
        assert_eq!(observation[0], 1.0);
    }
}
