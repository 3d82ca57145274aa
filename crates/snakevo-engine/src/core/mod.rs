//! Grid primitives shared by the snake environment.

pub use self::{direction::*, position::*, snake::*};

mod direction;
mod position;
mod snake;
