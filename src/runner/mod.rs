//! Side-scrolling runner core.
//!
//! The player rolls along the ground, jumping over obstacles and picking up
//! coins that scroll in from the right. Scroll speed grows with the score.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
