mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod restore_user;
mod update_user;
mod verify_email;

pub use create_user::{CreateUserError, CreateUserInput, CreateUserUseCase};
pub use delete_user::{DeleteUserError, DeleteUserUseCase};
pub use get_user::{GetUserError, GetUserUseCase};
pub use list_users::{ListUsersError, ListUsersUseCase};
pub use restore_user::{RestoreUserError, RestoreUserUseCase};
pub use update_user::{UpdateProfileInput, UpdateUserError, UpdateUserInput, UpdateUserUseCase};
pub use verify_email::{VerifyEmailError, VerifyEmailUseCase};
