// apps/ww_cli/src/commands/mod.rs

//! CLI 子命令

pub mod eval;
pub mod generate;
