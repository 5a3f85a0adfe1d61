pub mod health;
pub mod quotes;
pub mod stake;
