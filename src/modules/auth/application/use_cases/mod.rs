pub mod login_user;

pub use login_user::{
    LoginError, LoginOutput, LoginRequest, LoginRequestError, LoginUserService, LoginUserUseCase,
};
