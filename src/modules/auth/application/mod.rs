pub mod access_policy;
pub mod domain;
pub mod ports;
pub mod use_cases;
