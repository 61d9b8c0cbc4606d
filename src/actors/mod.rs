pub mod hazard;
pub mod player;
