#![no_std]

extern crate alloc;

pub use board::*;
pub use bonus::*;
pub use config::*;
pub use error::*;
pub use generator::*;
pub use level::*;
pub use peek::*;
pub use reveal::*;
pub use rng::*;
pub use schedule::*;
pub use score::*;
pub use session::*;
pub use state::*;
pub use types::*;
pub use undo::*;

mod board;
mod bonus;
mod config;
mod error;
mod generator;
mod level;
mod peek;
mod reveal;
mod rng;
mod schedule;
mod score;
mod session;
mod state;
mod types;
mod undo;
