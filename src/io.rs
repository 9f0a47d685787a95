pub mod error;
pub mod mapping;
pub mod obj_loader;
pub mod scanner;
