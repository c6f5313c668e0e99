//! User input

pub mod prompter;
