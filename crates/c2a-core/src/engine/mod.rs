//! # Engine Module
//!
//! Implements the conversion engine that turns a parsed CHARMM structure into
//! a finished AMOEBA fragment.
//!
//! ## Overview
//!
//! The engine owns everything between parsing and writing: the batch
//! configuration, the error taxonomy shared by all conversions, progress
//! reporting, and the fragment builder with its ordered correction tasks.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Batch paths, file extensions and failure policy
//! - **Error Handling** ([`error`]) - Per-structure conversion errors naming the failing resource
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Fragment Builder** ([`fragment`]) - Bond merge, hydrogen and ion corrections, type assignment

pub mod config;
pub mod error;
pub mod fragment;
pub mod progress;
pub(crate) mod tasks;
