pub mod hosts;
pub mod plugin;
pub mod tools;
