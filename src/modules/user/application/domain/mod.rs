pub mod entities;

pub use entities::{Gender, Lifecycle, Post, User, UserDetails, UserProfile};
