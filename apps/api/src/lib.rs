//! Résumé / job-description keyword matcher.
//!
//! `extraction` turns a PDF into text, `matching` compares keyword sets,
//! `analysis` ties the two together and `routes` exposes them over HTTP.

pub mod analysis;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod matching;
pub mod routes;
pub mod state;
