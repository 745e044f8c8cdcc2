pub mod action;
pub mod evaluator;
pub mod finalize;
pub mod progress_model;
pub mod screen;
