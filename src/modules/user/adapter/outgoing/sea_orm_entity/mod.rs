pub mod posts;
pub mod user_profiles;
pub mod users;
