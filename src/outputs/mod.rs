//! Output generation for the normalized schedule.
//!
//! One sink: [`json`] writes the assembled [`Schedule`](crate::models::Schedule)
//! to a single pretty-printed JSON file, fully overwriting the previous
//! run's document.

pub mod json;
