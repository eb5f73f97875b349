//! 旅行社区管理控制台 - 核心逻辑
//!
//! 与 DOM 无关的部分都在这里，可以在原生目标上直接测试：
//! - `session`: 会话门禁与持久化存储抽象
//! - `api` / `request`: 类型化 REST 客户端与可替换的 HTTP 传输
//! - `router`: 控制台内的视图路由状态机
//! - `loaders` / `actions`: 视图加载与变更操作的结果模型
//! - `console`: 把以上组合为界面层调用的门面

pub mod actions;
pub mod api;
pub mod config;
pub mod console;
pub mod error;
pub mod loaders;
pub mod request;
pub mod router;
pub mod session;

pub use api::AdminApi;
pub use config::ConsoleConfig;
pub use console::AdminConsole;
pub use error::{ActionError, ApiError, LoginError, ValidationError};
pub use loaders::{ListState, LoadOutcome};
pub use request::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use router::{Transition, View, ViewRouter};
pub use session::{KeyValueStore, MemoryStore, Session, SessionGate, SessionRequired};
