// ==========================================
// 周中聚会排程核心 - 手动分派编辑
// ==========================================
// 职责: 手动绑定槽位、主席同步、保存前完整性检查
// 红线: 手动绑定时同一传道员从其他槽位移除(主席标记的主分派除外)
// ==========================================

use crate::domain::part::{Assignments, PartToAssign};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Principal,
    Helper,
}

/// 未填写的槽位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSlot {
    pub part_id: String,
    pub part_title: String,
    pub slot: Slot,
}

pub struct AssignmentEditor {
    // 无状态
}

impl AssignmentEditor {
    pub fn new() -> Self {
        Self {}
    }

    /// 手动绑定(或清空)一个槽位
    ///
    /// # 规则
    /// 1. 绑定时,同一传道员在其他部分的助手槽位被清空
    /// 2. 主分派槽位同样被清空,但主席标记部分保留
    /// 3. `publisher_id` 为 None 时仅清空目标槽位
    pub fn assign(
        &self,
        parts: &[PartToAssign],
        assignments: &mut Assignments,
        part_id: &str,
        slot: Slot,
        publisher_id: Option<&str>,
    ) {
        if let Some(id) = publisher_id {
            for (other_id, state) in assignments.iter_mut() {
                if other_id == part_id {
                    continue;
                }
                if state.student() == Some(id) {
                    let keeps = parts
                        .iter()
                        .find(|p| &p.id == other_id)
                        .map_or(true, |p| p.is_presided());
                    if !keeps {
                        debug!(part_id = %other_id, publisher_id = %id, "移除重复主分派");
                        state.student_id = None;
                    }
                }
                if state.helper() == Some(id) {
                    debug!(part_id = %other_id, publisher_id = %id, "移除重复助手");
                    state.helper_id = None;
                }
            }
        }

        let state = assignments.entry(part_id.to_string()).or_default();
        let value = publisher_id.map(str::to_string);
        match slot {
            Slot::Principal => state.student_id = value,
            Slot::Helper => state.helper_id = value,
        }
    }

    /// 将主席人选同步到所有主席标记部分
    ///
    /// # 返回
    /// 是否有槽位被改动
    pub fn propagate_presiding_officer(&self, parts: &[PartToAssign], assignments: &mut Assignments) -> bool {
        let Some(presiding_part) = parts.iter().find(|p| p.is_presiding_officer_slot()) else {
            return false;
        };
        let Some(presiding_id) = assignments
            .get(&presiding_part.id)
            .and_then(|s| s.student())
            .map(str::to_string)
        else {
            return false;
        };

        let mut changed = false;
        for part in parts.iter().filter(|p| p.is_presided()) {
            let state = assignments.entry(part.id.clone()).or_default();
            if state.student() != Some(presiding_id.as_str()) {
                state.student_id = Some(presiding_id.clone());
                changed = true;
            }
        }
        changed
    }

    /// 保存前检查: 缺少主分派(主席标记部分除外)或必需助手的槽位
    pub fn missing_slots(&self, parts: &[PartToAssign], assignments: &Assignments) -> Vec<MissingSlot> {
        let mut missing = Vec::new();
        for part in parts {
            let state = assignments.get(&part.id);
            if !part.is_presided() && state.and_then(|s| s.student()).is_none() {
                missing.push(MissingSlot {
                    part_id: part.id.clone(),
                    part_title: part.part_title.clone(),
                    slot: Slot::Principal,
                });
            }
            if part.requires_helper && state.and_then(|s| s.helper()).is_none() {
                missing.push(MissingSlot {
                    part_id: part.id.clone(),
                    part_title: part.part_title.clone(),
                    slot: Slot::Helper,
                });
            }
        }
        missing
    }
}

impl Default for AssignmentEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::part::{AssignmentState, PreAssignment};
    use crate::domain::types::PartType;

    fn part(id: &str, title: &str, part_type: PartType) -> PartToAssign {
        PartToAssign {
            id: id.to_string(),
            part_title: title.to_string(),
            part_type,
            duration: None,
            requires_helper: false,
            pre_assigned_to: None,
        }
    }

    fn state(student: Option<&str>, helper: Option<&str>) -> AssignmentState {
        AssignmentState {
            student_id: student.map(str::to_string),
            helper_id: helper.map(str::to_string),
        }
    }

    fn parts() -> Vec<PartToAssign> {
        let mut prayer = part("op", "Oração Inicial", PartType::OpeningPrayer);
        prayer.pre_assigned_to = Some(PreAssignment::PresidingOfficer);
        let mut ministry = part("m", "Iniciando conversas", PartType::Ministry);
        ministry.requires_helper = true;
        vec![
            part("pres", "Presidente", PartType::PresidingOfficer),
            prayer,
            part("t", "Discurso", PartType::Treasures),
            ministry,
        ]
    }

    #[test]
    fn test_assign_moves_publisher_between_slots() {
        let parts = parts();
        let mut a = Assignments::new();
        a.insert("t".to_string(), state(Some("x"), None));
        a.insert("m".to_string(), state(Some("y"), Some("x")));
        a.insert("op".to_string(), state(Some("x"), None));

        AssignmentEditor::new().assign(&parts, &mut a, "pres", Slot::Principal, Some("x"));

        assert_eq!(a["pres"].student(), Some("x"));
        assert_eq!(a["t"].student(), None);
        assert_eq!(a["m"].helper(), None);
        assert_eq!(a["m"].student(), Some("y"));
        // 主席标记部分保留
        assert_eq!(a["op"].student(), Some("x"));
    }

    #[test]
    fn test_assign_none_clears_only_target() {
        let parts = parts();
        let mut a = Assignments::new();
        a.insert("m".to_string(), state(Some("y"), Some("z")));
        AssignmentEditor::new().assign(&parts, &mut a, "m", Slot::Helper, None);
        assert_eq!(a["m"], state(Some("y"), None));
    }

    #[test]
    fn test_propagate_presiding_officer() {
        let parts = parts();
        let editor = AssignmentEditor::new();
        let mut a = Assignments::new();
        assert!(!editor.propagate_presiding_officer(&parts, &mut a));

        a.insert("pres".to_string(), state(Some("p"), None));
        assert!(editor.propagate_presiding_officer(&parts, &mut a));
        assert_eq!(a["op"].student(), Some("p"));
        assert!(!editor.propagate_presiding_officer(&parts, &mut a));
    }

    #[test]
    fn test_missing_slots() {
        let parts = parts();
        let mut a = Assignments::new();
        a.insert("pres".to_string(), state(Some("p"), None));
        a.insert("m".to_string(), state(Some("y"), None));

        let missing = AssignmentEditor::new().missing_slots(&parts, &a);
        let keys: Vec<(&str, Slot)> = missing.iter().map(|m| (m.part_id.as_str(), m.slot)).collect();
        assert_eq!(keys, vec![("t", Slot::Principal), ("m", Slot::Helper)]);
    }
}
