pub mod api;
pub mod api_url;
pub mod config;
pub mod doctor;
pub mod http;
pub mod messages;
pub mod names;
pub mod route;
pub mod store;
#[cfg(test)]
pub(crate) mod test_support;
pub mod time;
