pub mod controller;
pub mod engine;
pub mod model;
pub mod router;
pub mod service;
