pub mod element_model;
pub mod element_type;
pub mod line;
pub mod normalize;
pub mod parser;
