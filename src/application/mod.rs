// Application layer - fetch seam and the poll service
pub mod json_fetcher;
pub mod poll_service;
