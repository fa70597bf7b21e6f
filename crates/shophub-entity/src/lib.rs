//! # shophub-entity
//!
//! Domain entity models for ShopHub notifications. Every struct in this
//! crate represents a domain value object. All entities derive `Debug`,
//! `Clone`, `Serialize`, and `Deserialize`.

pub mod notification;
