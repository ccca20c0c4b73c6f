//! Business logic over the repository
//!
//! Services are cheap to clone and hold only `Arc`s, so each request works with
//! the same explicitly constructed instances.

pub mod match_finder;
pub mod selection;
pub mod winner_simulator;

pub use match_finder::MatchFinder;
pub use selection::{Selector, UniformSelector};
pub use winner_simulator::{SimulationError, WinnerSimulator};
