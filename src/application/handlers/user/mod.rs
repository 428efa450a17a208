//! Account handlers.

mod login;
mod register;

pub use login::{LoginCommand, LoginError, LoginHandler, LoginResult};
pub use register::{RegisterError, RegisterUserCommand, RegisterUserHandler};
