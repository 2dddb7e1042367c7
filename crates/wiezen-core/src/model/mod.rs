pub mod catalog;
pub mod player;
pub mod rule;
pub mod score;
