//! Reports, formatters and tabular export

pub mod export;
pub mod formatter;
pub mod report;
