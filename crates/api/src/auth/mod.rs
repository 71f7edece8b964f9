//! Authentication: JWT token handling and the request extractor.

pub mod jwt;
