//! Skill extraction, similarity and scoring

pub mod catalog;
pub mod skills;
pub mod similarity;
pub mod scoring;
pub mod summary;
pub mod contact;
pub mod candidate;
pub mod screener;
