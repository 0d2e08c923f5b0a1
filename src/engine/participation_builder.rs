// ==========================================
// 周中聚会排程核心 - 参与记录生成
// ==========================================
// 职责: 部分 + 分派槽位 → 参与记录 / 时间线输入
// 红线: 新的历史记录只从这里产生
// ==========================================
// 说明: 助手行类型为 Ajudante,标题固定为 "Ajudante",不带时长
// 说明: 槽位中的 id 找不到传道员时,以 id 原文作为姓名
// ==========================================

use crate::calendar::WeekContext;
use crate::domain::part::{AssignmentState, Assignments, PartToAssign};
use crate::domain::participation::Participation;
use crate::domain::publisher::Publisher;
use crate::domain::timeline::AssignedPart;
use crate::domain::types::{titles, PartType};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use tracing::debug;
use uuid::Uuid;

pub struct ParticipationBuilder {
    unassigned_label: String,
}

impl ParticipationBuilder {
    pub fn new(unassigned_label: &str) -> Self {
        Self {
            unassigned_label: unassigned_label.to_string(),
        }
    }

    /// 生成待保存的参与记录
    ///
    /// # 规则
    /// - 主分派为空的部分整体跳过(含其助手)
    /// - 需要助手且助手已分派时追加助手行
    /// - 日期取本周聚会日,id 为新 uuid
    pub fn from_assignments(
        &self,
        parts: &[PartToAssign],
        assignments: &Assignments,
        publishers: &[Publisher],
        week: &WeekContext,
    ) -> Vec<Participation> {
        let date = Self::meeting_timestamp(week);
        let empty = AssignmentState::default();
        let mut records = Vec::with_capacity(parts.len() * 2);

        for part in parts {
            let state = assignments.get(&part.id).unwrap_or(&empty);
            let Some(student) = state.student() else {
                continue;
            };

            records.push(Participation {
                id: Uuid::new_v4().to_string(),
                publisher_name: Self::name_of(publishers, student),
                week: week.week_id.clone(),
                date,
                part_title: part.part_title.clone(),
                part_type: part.part_type,
                duration: part.duration,
            });

            if let Some(helper) = state.helper().filter(|_| part.requires_helper) {
                records.push(Participation {
                    id: Uuid::new_v4().to_string(),
                    publisher_name: Self::name_of(publishers, helper),
                    week: week.week_id.clone(),
                    date,
                    part_title: titles::HELPER.to_string(),
                    part_type: PartType::Helper,
                    duration: None,
                });
            }
        }

        debug!(week = %week.week_id, records = records.len(), "参与记录生成完成");
        records
    }

    /// 生成时间线输入(预览)
    ///
    /// 未分派槽位以占位标签输出,不跳过任何部分
    pub fn preview(
        &self,
        parts: &[PartToAssign],
        assignments: &Assignments,
        publishers: &[Publisher],
    ) -> Vec<AssignedPart> {
        let empty = AssignmentState::default();
        let mut rows = Vec::with_capacity(parts.len() * 2);

        for part in parts {
            let state = assignments.get(&part.id).unwrap_or(&empty);
            rows.push(AssignedPart {
                id: part.id.clone(),
                part_title: part.part_title.clone(),
                part_type: part.part_type,
                duration: part.duration,
                publisher_name: self.display_name(publishers, state.student()),
            });

            if part.requires_helper {
                rows.push(AssignedPart {
                    id: format!("{}-helper", part.id),
                    part_title: titles::HELPER.to_string(),
                    part_type: PartType::Helper,
                    duration: None,
                    publisher_name: self.display_name(publishers, state.helper()),
                });
            }
        }

        rows
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn display_name(&self, publishers: &[Publisher], id: Option<&str>) -> String {
        match id {
            Some(id) => Self::name_of(publishers, id),
            None => self.unassigned_label.clone(),
        }
    }

    fn name_of(publishers: &[Publisher], id: &str) -> String {
        publishers
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    fn meeting_timestamp(week: &WeekContext) -> DateTime<Utc> {
        Utc.from_utc_datetime(&week.meeting_date.and_time(NaiveTime::default()))
    }
}

impl Default for ParticipationBuilder {
    fn default() -> Self {
        Self::new("N/D")
    }
}
