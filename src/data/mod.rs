pub mod example;
pub mod parity;

pub use example::Example;
pub use parity::Parity;
