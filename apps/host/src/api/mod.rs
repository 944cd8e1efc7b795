pub mod client;
pub mod file;

pub use client::GameApi;
pub use file::read_game_file;
