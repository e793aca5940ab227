//! Stardash Commander - per-turn decision engine for Stardash

pub mod ai;
pub mod core;
pub mod game;
pub mod navigation;
pub mod relay;
pub mod scenario;
