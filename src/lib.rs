//! Keyboard link hinting: find the actionable elements of a page, give each
//! a short typeable label, and narrow them down key by key until one is
//! selected.

pub mod cli;
pub mod controller;
pub mod dom;
pub mod error;
pub mod hints;
pub mod report;
pub mod scanner;
pub mod trace;
