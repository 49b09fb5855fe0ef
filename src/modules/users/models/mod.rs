pub mod user;

pub use user::{
    hash_password, verify_password, CreateUserRequest, LoginRequest, UpdateUserRequest, User,
    UserResponse, UserRole,
};
