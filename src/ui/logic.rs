//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法

use rust_decimal::Decimal;

use super::actions::Action;
use super::state::{App, AppMode, Field};
use crate::models::{MAX_PEOPLE_SELECTOR, TIP_PERCENTAGES};
use crate::money::parse_amount;

impl App {
    /// 核心逻辑分发；返回 true 表示退出应用
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::StartEditAmount => self.start_edit_amount(),
            Action::StartPickPeople => self.start_pick_people(),
            Action::StartPickTip => self.start_pick_tip(),
            Action::StartEditFocused => match self.focus {
                Field::Amount => self.start_edit_amount(),
                Field::People => self.start_pick_people(),
                Field::Tip => self.start_pick_tip(),
            },

            Action::Cancel => self.cancel(),

            Action::Submit => match self.mode {
                AppMode::EditingAmount => self.confirm_amount(),
                AppMode::PickingPeople => self.confirm_people(),
                AppMode::PickingTip => self.confirm_tip(),
                AppMode::Normal => {}
            },

            Action::Input(c) => {
                if self.mode == AppMode::EditingAmount {
                    self.input_buffer.push(c);
                }
            }

            Action::DeleteChar => {
                if self.mode == AppMode::EditingAmount {
                    self.input_buffer.pop();
                }
            }
        }
        false
    }

    // ============ 导航相关 ============

    /// 向上移动焦点/选择
    pub fn move_up(&mut self) {
        match self.mode {
            AppMode::Normal => {
                self.focus = match self.focus {
                    Field::Amount => Field::Amount,
                    Field::People => Field::Amount,
                    Field::Tip => Field::People,
                };
            }
            AppMode::PickingPeople | AppMode::PickingTip => {
                if self.picker_index > 0 {
                    self.picker_index -= 1;
                }
            }
            AppMode::EditingAmount => {}
        }
    }

    /// 向下移动焦点/选择
    pub fn move_down(&mut self) {
        match self.mode {
            AppMode::Normal => {
                self.focus = match self.focus {
                    Field::Amount => Field::People,
                    Field::People => Field::Tip,
                    Field::Tip => Field::Tip,
                };
            }
            AppMode::PickingPeople => {
                if self.picker_index < MAX_PEOPLE_SELECTOR as usize {
                    self.picker_index += 1;
                }
            }
            AppMode::PickingTip => {
                if self.picker_index + 1 < TIP_PERCENTAGES.len() {
                    self.picker_index += 1;
                }
            }
            AppMode::EditingAmount => {}
        }
    }

    // ============ 金额编辑相关 ============

    /// 开始编辑账单金额
    pub fn start_edit_amount(&mut self) {
        self.focus = Field::Amount;
        self.mode = AppMode::EditingAmount;
        self.input_buffer = if self.state.check_amount.is_zero() {
            String::new()
        } else {
            self.state.check_amount.to_string()
        };
        self.message = None;
    }

    /// 确认金额输入；解析失败或为负时停在编辑态让用户改
    pub fn confirm_amount(&mut self) {
        match parse_amount(&self.input_buffer) {
            Ok(amount) if amount < Decimal::ZERO => {
                self.message = Some("账单金额不能为负数".to_string());
            }
            Ok(amount) => {
                self.state.check_amount = amount;
                self.refresh_result();
                self.mode = AppMode::Normal;
                self.input_buffer.clear();
                self.message = Some("金额已更新".to_string());
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    // ============ 人数选择相关 ============

    /// 打开人数选择器，定位到当前选择
    pub fn start_pick_people(&mut self) {
        self.focus = Field::People;
        self.mode = AppMode::PickingPeople;
        self.picker_index = self.state.people_selector as usize;
        self.message = None;
    }

    /// 确认人数选择
    pub fn confirm_people(&mut self) {
        self.state.people_selector = self.picker_index as u32;
        self.refresh_result();
        self.mode = AppMode::Normal;
        self.message = Some(format!("按 {} 人分账", self.state.party_size()));
    }

    // ============ 小费选择相关 ============

    /// 打开小费档位选择器，定位到当前档位
    pub fn start_pick_tip(&mut self) {
        self.focus = Field::Tip;
        self.mode = AppMode::PickingTip;
        self.picker_index = self.current_tip_index();
        self.message = None;
    }

    /// 确认小费档位
    pub fn confirm_tip(&mut self) {
        self.state.tip_percentage = TIP_PERCENTAGES[self.picker_index];
        self.refresh_result();
        self.mode = AppMode::Normal;
        self.message = Some(format!("小费比例 {}%", self.state.tip_percentage));
    }

    // ============ 通用操作 ============

    /// 取消当前操作
    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.input_buffer.clear();
        self.message = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::super::actions::Action;
    use super::super::state::{App, AppMode, Field};
    use crate::storage::Config;

    fn test_app() -> App {
        App::new(Config::default())
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.dispatch(Action::Input(c));
        }
    }

    #[test]
    fn amount_edit_commits_and_recomputes() {
        let mut app = test_app();
        app.dispatch(Action::StartEditAmount);
        type_str(&mut app, "100");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.state.check_amount, dec!(100));
        assert_eq!(app.result.amount_per_person, dec!(60));
        assert_eq!(app.result.total_with_tip, dec!(120));
    }

    #[test]
    fn negative_amount_is_rejected_in_place() {
        let mut app = test_app();
        app.dispatch(Action::StartEditAmount);
        type_str(&mut app, "-5");
        app.dispatch(Action::Submit);

        // 仍停留在编辑态，状态未被污染
        assert_eq!(app.mode, AppMode::EditingAmount);
        assert_eq!(app.state.check_amount, dec!(0));
        assert!(app.message.is_some());
    }

    #[test]
    fn garbage_amount_is_rejected_in_place() {
        let mut app = test_app();
        app.dispatch(Action::StartEditAmount);
        type_str(&mut app, "abc");
        app.dispatch(Action::Submit);

        assert_eq!(app.mode, AppMode::EditingAmount);
        assert_eq!(app.state.check_amount, dec!(0));
        assert!(app.message.is_some());
    }

    #[test]
    fn people_picker_commits_selector() {
        let mut app = test_app();
        app.dispatch(Action::StartPickPeople);
        for _ in 0..3 {
            app.dispatch(Action::MoveSelectionDown);
        }
        app.dispatch(Action::Submit);

        assert_eq!(app.state.people_selector, 3);
        assert_eq!(app.state.party_size(), 5);
    }

    #[test]
    fn tip_picker_cannot_leave_allowed_set() {
        let mut app = test_app();
        app.dispatch(Action::StartPickTip);
        // 一路往下也不会越过最后一档
        for _ in 0..20 {
            app.dispatch(Action::MoveSelectionDown);
        }
        app.dispatch(Action::Submit);

        assert_eq!(app.state.tip_percentage, 30);
    }

    #[test]
    fn cancel_keeps_previous_state() {
        let mut app = test_app();
        app.dispatch(Action::StartEditAmount);
        type_str(&mut app, "42");
        app.dispatch(Action::Cancel);

        assert_eq!(app.mode, AppMode::Normal);
        assert_eq!(app.state.check_amount, dec!(0));
        assert_eq!(app.input_buffer, "");
    }

    #[test]
    fn enter_opens_editor_for_focused_field() {
        let mut app = test_app();
        app.dispatch(Action::MoveSelectionDown); // Amount -> People
        app.dispatch(Action::StartEditFocused);

        assert_eq!(app.focus, Field::People);
        assert_eq!(app.mode, AppMode::PickingPeople);
    }

    #[test]
    fn quit_returns_true() {
        let mut app = test_app();
        assert!(app.dispatch(Action::Quit));
    }
}
