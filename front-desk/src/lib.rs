//! Front Desk - 酒店前台运营工作流引擎
//!
//! # 架构概述
//!
//! 单进程、内存快照的后台引擎：
//!
//! - **实体存储** (`store`): copy-on-write 快照 + 写事务
//! - **权限** (`access`): 角色 × 模块访问表, 任务可见范围
//! - **预订生命周期** (`bookings`): confirmed → checked-in → checked-out
//! - **任务看板** (`tasks`): 状态泳道、优先级、指派、拖拽排序、模板
//! - **会话** (`conversations`): 每位客人一个会话, 未读计数
//! - **派发** (`dispatch`): 领域事件 → 员工邮件 / 通知 / 任务 / 客人消息
//! - **前台入口** (`core::desk`): 命令处理、幂等、变更广播
//!
//! # 模块结构
//!
//! ```text
//! front-desk/src/
//! ├── core/           # 配置、FrontDesk、错误
//! ├── store/          # 实体存储
//! ├── access/         # 权限表
//! ├── bookings/       # 预订生命周期
//! ├── tasks/          # 任务看板
//! ├── conversations/  # 客人会话
//! ├── dispatch/       # 事件派发 + 文本生成
//! ├── inbox/          # 站内通知、员工邮件
//! ├── admin/          # 员工与客房管理
//! ├── portal/         # 客人自助入口
//! └── utils/          # 日志
//! ```

pub mod access;
pub mod admin;
pub mod bookings;
pub mod conversations;
pub mod core;
pub mod dispatch;
pub mod inbox;
pub mod portal;
pub mod seed;
pub mod store;
pub mod tasks;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, DeskError, DeskNotice, DeskResult, FrontDesk};
pub use dispatch::{HttpTextGenerator, TemplateGenerator, TextGenerator};
pub use portal::GuestPortal;
pub use store::{EntityStore, SeedData, Snapshot};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
