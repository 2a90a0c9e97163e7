//! 配置管理
//!
//! 默认值 -> config.toml -> config.{APP_ENV}.toml -> 环境变量，后者覆盖前者。

mod load;
mod structs;

pub use structs::*;
