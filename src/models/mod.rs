pub mod application;
pub mod category;
pub mod message;
pub mod offer;
pub mod profile;
pub mod user;
