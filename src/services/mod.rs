pub mod application_service;
pub mod auth_service;
pub mod category_service;
pub mod chat_service;
pub mod feed_service;
pub mod indicator_service;
pub mod match_service;
pub mod offer_query;
pub mod offer_service;
pub mod profile_service;

#[cfg(test)]
pub(crate) mod test_support;
