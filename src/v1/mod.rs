pub mod aws;
pub mod config;
pub mod event;
pub mod handler;

#[cfg(test)]
pub(crate) mod test_support;
