//! Issue model and the report container handed to the aggregation pipeline.

pub mod issue;
pub mod report;
