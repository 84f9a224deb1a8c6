pub mod speech;

pub use speech::*;
