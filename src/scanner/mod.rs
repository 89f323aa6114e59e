pub mod clickable;
pub mod scanner;
pub mod visibility;
