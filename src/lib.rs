// SPDX-License-Identifier: MPL-2.0
//! `veracity_core` is the session and localization core of the Veracity
//! content-verification app.
//!
//! It merges an external identity event stream with asynchronously fetched
//! authorization records into a single consistent session view, and resolves
//! dotted translation keys against embedded per-language catalogs with
//! fallback, parameter substitution, and a persisted language preference.

#![doc(html_root_url = "https://docs.rs/veracity_core/0.2.0")]

pub mod config;
pub mod error;
pub mod i18n;
pub mod session;
