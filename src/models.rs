//! 分账核心模型
//!
//! 账单状态、小费档位表、纯函数计算及输入校验。
//! 这里不碰 UI、不碰 IO，派生结果完全由三个输入决定。

use rust_decimal::Decimal;
use thiserror::Error;

/// 允许的小费比例档位（百分比）
pub const TIP_PERCENTAGES: [u32; 6] = [0, 10, 15, 20, 25, 30];

/// 人数选择器上限；选择器 + 2 = 实际人数，对应 2 到 99 人
pub const MAX_PEOPLE_SELECTOR: u32 = 97;

/// 默认小费比例
pub const DEFAULT_TIP: u32 = 20;

/// 账单状态
#[derive(Debug, Clone, PartialEq)]
pub struct SplitState {
    /// 账单金额（非负）
    pub check_amount: Decimal,
    /// 人数选择器，0..=97
    pub people_selector: u32,
    /// 小费比例，必须在 [`TIP_PERCENTAGES`] 中
    pub tip_percentage: u32,
}

impl Default for SplitState {
    fn default() -> Self {
        Self {
            check_amount: Decimal::ZERO,
            people_selector: 0,
            tip_percentage: DEFAULT_TIP,
        }
    }
}

impl SplitState {
    /// 实际分账人数 = 选择器值 + 2，最少 2 人
    pub fn party_size(&self) -> u32 {
        self.people_selector + 2
    }
}

/// 派生结果；全部保留原始精度，四舍五入只发生在显示层
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResult {
    /// 小费金额
    pub tip_value: Decimal,
    /// 账单 + 小费
    pub grand_total: Decimal,
    /// 每人应付
    pub amount_per_person: Decimal,
    /// 由每人金额反推的总额，与 grand_total 在除法精度内一致
    pub total_with_tip: Decimal,
}

/// 输入校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("账单金额不能为负: {0}")]
    NegativeAmount(Decimal),
    #[error("人数选择超出范围: {0}")]
    PartyTooLarge(u32),
    #[error("不支持的小费比例: {0}%")]
    UnsupportedTip(u32),
}

/// 计算分账结果
///
/// 确定性纯函数：校验三个输入后依次算出小费、总额、每人应付。
/// 总额最后由每人金额乘回人数，而不是直接复用中间的 grand_total。
pub fn compute_split(state: &SplitState) -> Result<SplitResult, SplitError> {
    if state.check_amount < Decimal::ZERO {
        return Err(SplitError::NegativeAmount(state.check_amount));
    }
    if state.people_selector > MAX_PEOPLE_SELECTOR {
        return Err(SplitError::PartyTooLarge(state.people_selector));
    }
    if !TIP_PERCENTAGES.contains(&state.tip_percentage) {
        return Err(SplitError::UnsupportedTip(state.tip_percentage));
    }

    let party = Decimal::from(state.party_size());
    let tip_value = state.check_amount * Decimal::from(state.tip_percentage) / Decimal::ONE_HUNDRED;
    let grand_total = state.check_amount + tip_value;
    let amount_per_person = grand_total / party;
    let total_with_tip = party * amount_per_person;

    Ok(SplitResult {
        tip_value,
        grand_total,
        amount_per_person,
        total_with_tip,
    })
}


#[cfg(test)]
mod prop_tests {
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use super::*;

    /// 随机合法状态：金额 0 到 100,000.00，选择器和小费都在取值范围内
    fn arb_state() -> impl Strategy<Value = SplitState> {
        (
            0i64..=10_000_000,
            0u32..=MAX_PEOPLE_SELECTOR,
            0usize..TIP_PERCENTAGES.len(),
        )
            .prop_map(|(cents, selector, tip_index)| SplitState {
                check_amount: Decimal::new(cents, 2),
                people_selector: selector,
                tip_percentage: TIP_PERCENTAGES[tip_index],
            })
    }

    proptest! {
        // 每人金额 × 人数 在除法精度内等于总额
        #[test]
        fn per_person_times_party_matches_total(state in arb_state()) {
            let result = compute_split(&state).unwrap();
            let party = Decimal::from(state.party_size());

            let diff = (result.amount_per_person * party - result.grand_total).abs();
            prop_assert!(diff < Decimal::new(1, 9), "diff {} for {:?}", diff, state);
            prop_assert_eq!(result.total_with_tip, result.amount_per_person * party);
        }

        // 小费为 0 时总额就是账单金额
        #[test]
        fn zero_tip_is_identity(
            cents in 0i64..=10_000_000,
            selector in 0u32..=MAX_PEOPLE_SELECTOR,
        ) {
            let state = SplitState {
                check_amount: Decimal::new(cents, 2),
                people_selector: selector,
                tip_percentage: 0,
            };
            let result = compute_split(&state).unwrap();
            prop_assert_eq!(result.grand_total, state.check_amount);
            prop_assert_eq!(result.total_with_tip, state.check_amount);
        }

        // 其他输入不变时，提高小费档位不会减少总额
        #[test]
        fn raising_tip_never_lowers_total(
            cents in 0i64..=10_000_000,
            selector in 0u32..=MAX_PEOPLE_SELECTOR,
            tip_index in 0usize..TIP_PERCENTAGES.len() - 1,
        ) {
            let lower = SplitState {
                check_amount: Decimal::new(cents, 2),
                people_selector: selector,
                tip_percentage: TIP_PERCENTAGES[tip_index],
            };
            let higher = SplitState {
                tip_percentage: TIP_PERCENTAGES[tip_index + 1],
                ..lower.clone()
            };

            let low = compute_split(&lower).unwrap();
            let high = compute_split(&higher).unwrap();
            prop_assert!(high.total_with_tip >= low.total_with_tip);
        }

        // 其他输入不变时，加人不会增加每人应付
        #[test]
        fn more_people_never_raises_share(
            cents in 0i64..=10_000_000,
            selector in 0u32..MAX_PEOPLE_SELECTOR,
            tip_index in 0usize..TIP_PERCENTAGES.len(),
        ) {
            let fewer = SplitState {
                check_amount: Decimal::new(cents, 2),
                people_selector: selector,
                tip_percentage: TIP_PERCENTAGES[tip_index],
            };
            let more = SplitState {
                people_selector: selector + 1,
                ..fewer.clone()
            };

            let few = compute_split(&fewer).unwrap();
            let many = compute_split(&more).unwrap();
            prop_assert!(many.amount_per_person <= few.amount_per_person);
        }
    }
}
