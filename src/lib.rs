//! qlot - translatable-string extraction for Quarto documents
//!
//! qlot is a CLI tool and library that pulls translatable text spans out
//! of `.qmd` documents (front matter, headers, prose, shortcode
//! directive attributes) and rewrites each document into per-language
//! copies. Every extracted span is replaced by a stable key reference,
//! and each emitted copy carries a generated `langstrings:` block: the
//! source language holds the original text, every other language holds
//! empty placeholders awaiting translation.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (user-facing commands)
//! - `config`: Configuration file loading and per-document options
//! - `emit`: Per-language document assembly
//! - `pipeline`: One extraction run per document (registry ownership)
//! - `registry`: Key generation, deduplication and usage tracking
//! - `report`: Operator-facing result reporting
//! - `scan`: Line-oriented document scanner and rewriters
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod emit;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod scan;
pub mod utils;
