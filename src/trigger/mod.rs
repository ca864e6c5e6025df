pub mod pin;
pub mod registry;
