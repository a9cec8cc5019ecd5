//! UI 模块
//!
//! 采用 MVI (Model-View-Intent) 架构：
//! - Model (state.rs): App 结构体，持有输入、派生结果与配置
//! - Intent (actions.rs / input.rs): 按键翻译成语义化 Action
//! - Update (logic.rs): dispatch 处理 Action 并同步重算派生结果
//! - View (view/): 纯函数，将 State 映射为 UI

pub mod actions;
pub mod input;
pub mod logic;
pub mod state;
pub mod view;

// Re-export for convenience
pub use input::handle_key_event;
pub use state::App;
pub use view::render;
