//! # Workflows Module
//!
//! High-level entry points that tie the `core` readers and writer to the
//! `engine` fragment builder.
//!
//! ## Architecture
//!
//! - **Single Conversion** ([`convert`]) - One PDB/PSF pair to one TXYZ file
//! - **Batch Conversion** ([`batch`]) - Directory discovery and parallel conversion of every pair
//! - **Reporting** ([`report`]) - Per-structure outcomes and CSV summaries of a batch

pub mod batch;
pub mod convert;
pub mod report;
