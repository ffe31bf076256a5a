pub mod user_query;
pub mod user_repository;

pub use user_query::{
    DeletedScope, PageRequest, PageResult, UserCriteria, UserQuery, UserQueryError, MAX_PAGE,
};
pub use user_repository::{
    CreateUserData, PatchProfileData, PatchUserData, UserRepository, UserRepositoryError,
};
