pub mod activation;
pub mod controller;
pub mod host;
pub mod scheduler;
pub mod session;
