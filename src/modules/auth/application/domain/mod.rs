pub mod entities;

pub use entities::{Capability, Principal, Role};
