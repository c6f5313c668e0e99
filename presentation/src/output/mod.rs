//! Terminal output: notifications and the streaming explanation display

pub mod console;
pub mod terminal;
