mod worker_dto;

pub use worker_dto::*;
