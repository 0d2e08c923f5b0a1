// ==========================================
// 周中聚会排程核心 - 特别活动影响
// ==========================================
// 职责: 将一周的特别活动应用到展示单元序列
// 顺序: 缩时 → 模板结构影响 → 分区监督访问的结束评论改派
// ==========================================
// 注: 缩时可能使时长为负,不做截断
// ==========================================

use crate::config::MeetingConfig;
use crate::domain::event::{EventImpact, EventTemplate, SpecialEvent};
use crate::domain::timeline::{AssignedPart, DisplayUnit};
use crate::domain::types::PartType;
use tracing::{debug, warn};

pub struct EventImpactApplier {
    reduction_fallback_minutes: i32,
    circuit_overseer_marker: String,
}

impl EventImpactApplier {
    pub fn new(config: &MeetingConfig) -> Self {
        Self {
            reduction_fallback_minutes: config.reduction_fallback_minutes,
            circuit_overseer_marker: config.circuit_overseer_marker.clone(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 应用活动影响
    ///
    /// # 规则
    /// 1. 缩时: 首个目标类型部分的时长减去配置分钟数(无存储时长按基准值计)
    /// 2. REPLACE_PART: 替换首个匹配部分;无匹配时插入最后一个基督徒生活部分之后,
    ///    否则研经主持之前,否则末尾
    /// 3. REPLACE_SECTION: 删除所有目标类型部分后追加特别部分
    /// 4. ADD_PART: 插入研经主持之前,否则末尾
    ///    REASSIGN_PART 与未识别动作: 结构不变,缩时与改派仍生效
    /// 5. 分区监督访问: 结束评论改派给活动指定人
    pub fn apply(
        &self,
        mut units: Vec<DisplayUnit>,
        event: &SpecialEvent,
        template: &EventTemplate,
    ) -> Vec<DisplayUnit> {
        if let Some(reduction) = event.configuration.time_reduction.filter(|r| r.minutes > 0) {
            match units.iter_mut().find(|u| u.part.part_type == reduction.target_type) {
                Some(unit) => {
                    let base = unit.part.duration.unwrap_or(self.reduction_fallback_minutes);
                    unit.part.duration = Some(base - reduction.minutes);
                    debug!(
                        part_id = %unit.part.id,
                        minutes = reduction.minutes,
                        "缩时已应用"
                    );
                }
                None => warn!(target_type = %reduction.target_type, "缩时目标不存在"),
            }
        }

        let special = DisplayUnit::single(Self::special_part(event, template));

        match &template.impact {
            EventImpact::ReplacePart { target_type } => {
                let target = target_type.first();
                let index = target.and_then(|t| units.iter().position(|u| u.part.part_type == t));
                match index {
                    Some(i) => units[i] = special,
                    None => {
                        let at = Self::fallback_position(&units);
                        units.insert(at, special);
                    }
                }
            }
            EventImpact::ReplaceSection { target_type } => {
                units.retain(|u| !target_type.contains(u.part.part_type));
                units.push(special);
            }
            EventImpact::AddPart => {
                match units.iter().position(|u| u.part.part_type == PartType::StudyConductor) {
                    Some(i) => units.insert(i, special),
                    None => units.push(special),
                }
            }
            EventImpact::ReassignPart { .. } | EventImpact::Unsupported => {
                debug!(template_id = %template.id, "活动动作不改变部分结构");
            }
        }

        if template.is_circuit_overseer_visit(&self.circuit_overseer_marker) {
            if let Some(closing) = units
                .iter_mut()
                .find(|u| u.part.part_type == PartType::ClosingComments)
            {
                closing.part.publisher_name = event.assigned_to.clone();
            }
        }

        debug!(event_id = %event.id, template_id = %template.id, units = units.len(), "活动影响已应用");
        units
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 特别部分: 以活动 id 为 id,归入基督徒生活
    ///
    /// 主题为空时依次回落到模板默认主题、模板名称
    fn special_part(event: &SpecialEvent, template: &EventTemplate) -> AssignedPart {
        let theme = if !event.theme.trim().is_empty() {
            event.theme.clone()
        } else {
            template
                .defaults
                .theme
                .clone()
                .unwrap_or_else(|| template.name.clone())
        };
        AssignedPart {
            id: event.id.clone(),
            part_title: theme,
            part_type: PartType::ChristianLife,
            duration: Some(event.duration),
            publisher_name: event.assigned_to.clone(),
        }
    }

    fn fallback_position(units: &[DisplayUnit]) -> usize {
        if let Some(last_life) = units
            .iter()
            .rposition(|u| u.part.part_type == PartType::ChristianLife)
        {
            return last_life + 1;
        }
        units
            .iter()
            .position(|u| u.part.part_type == PartType::StudyConductor)
            .unwrap_or(units.len())
    }
}

impl Default for EventImpactApplier {
    fn default() -> Self {
        Self::new(&MeetingConfig::default())
    }
}
