pub mod console;
pub mod not_found;
