pub mod blockchain_service;
pub mod contracts;
pub mod network_config;
pub mod page_service;
pub mod quote_service;
pub mod session;
pub mod submission_service;
pub mod units;
pub mod validation;
pub mod wallet_service;

#[cfg(test)]
pub mod testing;
