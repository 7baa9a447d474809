//! HTTP route handlers

pub mod boxers;
pub mod leaderboard;
pub mod ring;
pub mod status;
