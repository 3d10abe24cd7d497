//! Domain layer for the Realm Portal backend.
//!
//! This crate contains:
//! - Domain models (news, rules, sections, store items, discounts, users, site info)
//! - The session value and its transitions
//! - Pure view logic: search filters, section grouping, discount pricing

pub mod models;
pub mod services;
