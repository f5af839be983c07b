mod simulate;
mod validate;

pub use simulate::Simulate;
pub use validate::Validate;
