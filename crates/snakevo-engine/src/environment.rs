//! The environment contract consumed by the evolutionary core.
//!
//! An environment runs one episode at a time. The core only ever calls
//! [`Environment::reset`] once, then [`Environment::step`] until a transition
//! reports `done`, and finally reads [`Environment::score`] and
//! [`Environment::steps_taken`].

use std::error::Error;

/// Result of resetting or stepping an environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub observation: Vec<f32>,
    pub reward: f32,
    pub done: bool,
}

impl Transition {
    /// The transition returned by a fresh reset: zero reward, not done.
    #[must_use]
    pub fn initial(observation: Vec<f32>) -> Self {
        Self {
            observation,
            reward: 0.0,
            done: false,
        }
    }
}

/// A simulation an agent can play through.
///
/// Implementations must bound episode length themselves so that a policy that
/// never makes progress still terminates.
pub trait Environment {
    type Error: Error + Send + Sync + 'static;

    /// Length of every observation vector produced by this environment.
    fn observation_len(&self) -> usize;

    /// Number of discrete actions accepted by [`Environment::step`].
    fn action_count(&self) -> usize;

    /// Starts a new episode.
    fn reset(&mut self) -> Transition;

    /// Advances the episode by one action.
    fn step(&mut self, action: usize) -> Result<Transition, Self::Error>;

    /// Items collected during the current episode.
    fn score(&self) -> usize;

    /// Steps taken during the current episode.
    fn steps_taken(&self) -> usize;
}
