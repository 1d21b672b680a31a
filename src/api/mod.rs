// Processing server API client module
//
// POST /upload (multipart) and POST /process (JSON) against the
// document-processing server.

pub mod client;
pub mod error;
pub mod types;
