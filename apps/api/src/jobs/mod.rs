// Job search: the fixed posting catalog and the keyword/location/skill matcher
// the agent calls through its `search_jobs` tool.

pub mod catalog;
pub mod handlers;
pub mod matcher;
pub mod models;
