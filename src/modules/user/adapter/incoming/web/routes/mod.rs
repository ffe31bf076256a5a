mod create_user;
mod delete_user;
mod get_user;
mod list_users;
mod restore_user;
mod update_user;
mod verify_email;

pub use create_user::{__path_create_user_handler, create_user_handler};
pub use delete_user::{__path_delete_user_handler, delete_user_handler};
pub use get_user::{__path_get_user_handler, get_user_handler};
pub use list_users::{__path_list_users_handler, list_users_handler};
pub use restore_user::{__path_restore_user_handler, restore_user_handler};
pub use update_user::{
    __path_patch_user_handler, __path_put_user_handler, patch_user_handler, put_user_handler,
};
pub use verify_email::{__path_verify_email_handler, verify_email_handler};
