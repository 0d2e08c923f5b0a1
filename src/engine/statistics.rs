// ==========================================
// 周中聚会排程核心 - 统计引擎
// ==========================================
// 职责: 按传道员汇总历史参与情况,计算会众总览
// 说明: 历史记录按姓名(含别名)归属,无法匹配的记录不计入个人统计
// ==========================================

use crate::domain::participation::Participation;
use crate::domain::publisher::Publisher;
use crate::domain::types::{Gender, PartType};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// 单个传道员的参与统计
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherStats {
    pub publisher_id: String,
    pub publisher_name: String,
    pub total_assignments: usize,
    pub last_assignment_date: Option<DateTime<Utc>>,
    pub last_assignment_week: Option<String>,
    pub last_assignment_title: Option<String>,
    pub last_assignment_type: Option<PartType>,
    /// 相邻两次分派的平均间隔天数(四舍五入),少于两个不同日期时为空
    pub avg_days_between_assignments: Option<i64>,
}

/// 具备各项特权的在职弟兄人数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivilegeCounts {
    pub presiding: usize,
    pub talks: usize,
    pub study_conductors: usize,
    pub prayers: usize,
}

/// 会众总览
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallSummary {
    pub active_publishers: usize,
    /// 不含诗歌
    pub total_assignments: usize,
    /// 保留一位小数
    pub avg_parts_per_publisher: f64,
    pub privileges: PrivilegeCounts,
}

pub struct StatisticsEngine {
    // 无状态
}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 逐个传道员计算统计,输出顺序与输入一致
    pub fn publisher_stats(&self, publishers: &[Publisher], history: &[Participation]) -> Vec<PublisherStats> {
        publishers
            .iter()
            .map(|publisher| {
                let mut own: Vec<&Participation> = history
                    .iter()
                    .filter(|p| publisher.matches_name(&p.publisher_name))
                    .collect();
                own.sort_by_key(|p| p.timestamp_millis());

                let last = own.last();
                PublisherStats {
                    publisher_id: publisher.id.clone(),
                    publisher_name: publisher.name.clone(),
                    total_assignments: own.len(),
                    last_assignment_date: last.map(|p| p.date),
                    last_assignment_week: last.map(|p| p.week.clone()),
                    last_assignment_title: last.map(|p| p.part_title.clone()),
                    last_assignment_type: last.map(|p| p.part_type),
                    avg_days_between_assignments: Self::average_gap_days(&own),
                }
            })
            .collect()
    }

    /// 会众总览
    ///
    /// # 规则
    /// - 在职传道员: is_serving
    /// - 总分派数不含诗歌
    /// - 无在职传道员时平均值为 0
    pub fn overall_summary(&self, publishers: &[Publisher], history: &[Participation]) -> OverallSummary {
        let active_publishers = publishers.iter().filter(|p| p.is_serving).count();
        let total_assignments = history
            .iter()
            .filter(|p| p.part_type != PartType::Song)
            .count();

        let avg_parts_per_publisher = if active_publishers > 0 {
            let raw = total_assignments as f64 / active_publishers as f64;
            (raw * 10.0).round() / 10.0
        } else {
            0.0
        };

        let brothers = publishers
            .iter()
            .filter(|p| p.gender == Gender::Brother && p.is_serving);
        let mut privileges = PrivilegeCounts::default();
        for brother in brothers {
            let pv = &brother.privileges;
            privileges.presiding += usize::from(pv.can_preside);
            privileges.talks += usize::from(pv.can_give_talks);
            privileges.study_conductors += usize::from(pv.can_conduct_study);
            privileges.prayers += usize::from(pv.can_pray);
        }

        debug!(active_publishers, total_assignments, "会众总览计算完成");
        OverallSummary {
            active_publishers,
            total_assignments,
            avg_parts_per_publisher,
            privileges,
        }
    }

    // 同日多条记录之间的零间隔不计入
    fn average_gap_days(sorted: &[&Participation]) -> Option<i64> {
        let gaps: Vec<f64> = sorted
            .windows(2)
            .map(|w| w[1].timestamp_millis() - w[0].timestamp_millis())
            .filter(|diff| *diff > 0)
            .map(|diff| diff as f64 / MILLIS_PER_DAY)
            .collect();

        if gaps.is_empty() {
            return None;
        }
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        Some(mean.round() as i64)
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
