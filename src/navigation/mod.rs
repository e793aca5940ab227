//! Navigation around the sun

pub mod geometry;
pub mod movement;
pub mod ring;

pub use geometry::Obstacle;
pub use movement::{MoveOutcome, Navigator};
pub use ring::ResourceRing;
