//! Generator for UniFi controller tool servers.
//!
//! The pipeline reads an endpoint inventory and captured samples
//! ([`inventory`]), infers a field schema per endpoint ([`schema`]), names
//! and classifies every tool through the override tables ([`naming`]),
//! assembles a render context ([`generation`]) and renders it through a
//! Tera template bundle ([`infrastructure`]). [`verification`] recomputes the
//! expected counts independently and [`selection`] predicts which tools a
//! generated server registers for a module selection.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod inventory;
pub mod naming;
pub mod schema;
pub mod selection;
pub mod verification;
