pub mod background;
pub mod board;
pub mod controller;
pub mod headful;
pub mod piece;
pub mod playtest;
pub mod render;
pub mod settings;
pub mod spawner;
pub mod state;
