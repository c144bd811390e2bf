//! Loyalty tiers and shop availability for the mystery-bag marketplace.
//!
//! The hosted backend owns storage, auth and realtime feeds. This crate owns the two
//! pieces of decision logic the client evaluates on every render: which loyalty tier a
//! user sits in (and whether they just levelled up), and whether a shop is open now.

pub mod cli;
pub mod config;
pub mod hours;
pub mod server;
pub mod storage;
pub mod tier;
