//! iconsmith turns folders of SVG icons into React and Vue components.
//! It provides SVG markup rewriting, component synthesis from templates,
//! batch generation with per-folder barrels, and readme generation.

/// Command-line interface module for the iconsmith application
pub mod cli;

/// Type declaration build for generated barrels
pub mod compiler;

/// Configuration handling
/// Supports JSON and YAML formats (build.config.json, build.config.yml, build.config.yaml)
pub mod config;

/// Common constants and defaults
pub mod constants;

/// Error types and handling for the iconsmith application
pub mod error;

/// External source formatting
pub mod formatter;

pub mod logger;

/// SVG tokenizer and markup rewriting
pub mod markup;

/// Component and attribute naming
pub mod naming;

/// Batch generation orchestration
/// Combines all components to generate the final output
pub mod processor;

/// Markdown icon tables
pub mod readme;

/// Template rendering functionality
pub mod renderer;

/// Summary table of generated files
pub mod report;

/// Component synthesis for React and Vue
pub mod synthesizer;

/// Icon folder discovery
pub mod walker;
