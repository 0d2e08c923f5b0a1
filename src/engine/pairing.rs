// ==========================================
// 周中聚会排程核心 - 配对校验
// ==========================================
// 职责: 儿童主分派人与助手的配对安全校验
// 红线: 安全策略,不受规则配置影响
// ==========================================

use crate::domain::publisher::Publisher;
use crate::domain::types::AgeGroup;
use crate::engine::rule_evaluator::ValidationOutcome;

pub const PAIRING_OK: &str = "Pareamento válido.";
pub const REASON_PARENT_ONLY: &str =
    "Crianças só podem ter um dos pais como ajudante. Autorização para terceiros não concedida.";
pub const REASON_ADULT_REQUIRED: &str = "O ajudante de uma criança deve ser um adulto.";

pub struct PairingValidator;

impl PairingValidator {
    /// 校验主分派人与助手的配对
    ///
    /// # 规则
    /// 1. 主分派人非儿童 → 合格
    /// 2. 助手为登记的父母 → 合格
    /// 3. 未授权与非父母配对 → 不合格
    /// 4. 已授权但助手非成年 → 不合格
    pub fn validate(principal: &Publisher, helper: &Publisher) -> ValidationOutcome {
        if principal.age_group != AgeGroup::Child {
            return ValidationOutcome::valid(PAIRING_OK);
        }

        if principal.is_parent(&helper.id) {
            return ValidationOutcome::valid(PAIRING_OK);
        }

        if !principal.can_pair_with_non_parent {
            return ValidationOutcome::invalid(REASON_PARENT_ONLY);
        }

        if helper.age_group != AgeGroup::Adult {
            return ValidationOutcome::invalid(REASON_ADULT_REQUIRED);
        }

        ValidationOutcome::valid(PAIRING_OK)
    }
}
