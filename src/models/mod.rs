pub mod api_response;
pub mod network_config;
pub mod page;
pub mod quote;
pub mod token;
pub mod transaction;
pub mod transfer;
pub mod wallet;
