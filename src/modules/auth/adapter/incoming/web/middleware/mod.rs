mod capability_gate;

pub use capability_gate::CapabilityGate;
