#![warn(clippy::all, clippy::pedantic)]

pub mod dropper_tests;
pub mod selector_tests;
