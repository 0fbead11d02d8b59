//! 核心模块 - 配置、前台调度和错误定义
//!
//! # 模块结构
//!
//! - [`Config`] - 运行配置
//! - [`FrontDesk`] - 命令入口 (access gate + engine + dispatch)
//! - [`DeskError`] - 业务错误

pub mod config;
pub mod desk;
pub mod error;

pub use config::Config;
pub use desk::{DeskNotice, FrontDesk};
pub use error::{DeskError, DeskResult};
