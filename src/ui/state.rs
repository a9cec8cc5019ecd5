//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{SplitResult, SplitState, TIP_PERCENTAGES, compute_split};
use crate::storage::Config;

/// 应用状态
pub struct App {
    pub state: SplitState,
    pub result: SplitResult,
    pub config: Config,
    pub focus: Field,
    pub mode: AppMode,
    pub input_buffer: String,
    pub picker_index: usize,
    pub message: Option<String>,
}

/// 表单字段（自上而下的三行）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Amount,
    People,
    Tip,
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    EditingAmount,
    PickingPeople,
    PickingTip,
}

impl App {
    /// 创建新的应用实例；默认小费档位来自配置
    pub fn new(config: Config) -> Self {
        let state = SplitState {
            tip_percentage: config.effective_default_tip(),
            ..SplitState::default()
        };
        let mut app = Self {
            state,
            result: SplitResult::default(),
            config,
            focus: Field::Amount,
            mode: AppMode::Normal,
            input_buffer: String::new(),
            picker_index: 0,
            message: None,
        };
        app.refresh_result();
        app
    }

    /// 重新计算派生结果；每次输入变更后同步调用
    pub fn refresh_result(&mut self) {
        match compute_split(&self.state) {
            Ok(result) => {
                tracing::debug!(
                    grand_total = %result.grand_total,
                    per_person = %result.amount_per_person,
                    "重新计算完成"
                );
                self.result = result;
            }
            // UI 的取值范围到不了校验错误；万一到了，保留上次结果
            Err(e) => {
                tracing::warn!(state = ?self.state, "计算失败: {}", e);
                self.message = Some(e.to_string());
            }
        }
    }

    /// 当前小费比例在档位表中的下标
    pub fn current_tip_index(&self) -> usize {
        TIP_PERCENTAGES
            .iter()
            .position(|&t| t == self.state.tip_percentage)
            .unwrap_or(0)
    }
}
