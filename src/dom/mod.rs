pub mod dom_model;
pub mod snapshot;
