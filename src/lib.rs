// Quarry: keyword mining and topic recommendation for blog content
//
// This is the library root. The extraction core is pure and lives in
// `extract`; everything else is the plumbing that feeds it documents and
// stores what comes out.

pub mod config;
pub mod db;
pub mod extract;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
