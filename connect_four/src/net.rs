//! Wire shapes exchanged with a remote game authority.
//!
//! Only the JSON shape matters here; transport lives with the client.

/// Snapshot, listing and identifier types for the remote game API.
pub mod messages;
