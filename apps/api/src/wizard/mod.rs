pub mod controller;
pub mod handlers;
pub mod validation;
