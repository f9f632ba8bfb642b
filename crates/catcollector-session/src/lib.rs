//! Browser session plumbing shared by catcollector services.
//!
//! Provides the session cookie builders, a header-level token reader, and the
//! opaque session token generator. Session storage lives with the service.

pub mod cookie;
pub mod token;
