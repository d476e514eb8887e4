/*
    Top-level
*/

mod calculator;
mod context;
mod error;
mod number;
mod ops;
mod quantity;
mod rational;
mod util;

pub mod converter;
pub use calculator::*;
pub use context::*;
pub use error::*;
pub use number::*;
pub use ops::*;
pub use quantity::*;
pub use rational::*;
