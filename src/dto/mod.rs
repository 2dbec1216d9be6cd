pub mod application_dto;
pub mod auth_dto;
pub mod chat_dto;
pub mod home_dto;
pub mod offer_dto;
pub mod profile_dto;
