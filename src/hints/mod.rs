pub mod alphabet;
pub mod filter;
pub mod hint_model;
pub mod link_text;
pub mod render;
