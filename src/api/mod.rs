/// Analysis API module
///
/// This module talks to the remote analysis service:
/// - Multipart image upload and response parsing (client.rs)

pub mod client;
