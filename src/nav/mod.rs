mod navigator;

pub use navigator::{Direction, Navigator, step};
