pub mod error;
pub(crate) mod extractor;
pub(crate) mod fetcher;
pub mod meteomatics;
pub mod source;
#[cfg(test)]
pub(crate) mod stub;
