mod auth_dto;

pub use auth_dto::{AuthPayload, LoginRequest, RegisterForm, RegisterRequest};
