//! Workspace for the build script: configuration model and code generator.
pub mod conf;
pub mod domain;
pub mod errors;
pub mod gen_config;
