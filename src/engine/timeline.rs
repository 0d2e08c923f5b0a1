// ==========================================
// 周中聚会排程核心 - 时间线编排引擎
// ==========================================
// 职责: 已分派部分 → 带开始时间的展示序列
// 流程: 展示配对 → 特别活动影响 → 顺序计时(插入辅导条目)
// ==========================================
// 说明: 时长非正的部分照常输出,过滤在规范化阶段完成
// ==========================================

use crate::config::MeetingConfig;
use crate::domain::event::{EventTemplate, SpecialEvent};
use crate::domain::timeline::{AssignedPart, DisplayUnit, SectionTag, TimedEntry};
use crate::domain::types::{titles, PartType};
use crate::engine::event_impact::EventImpactApplier;
use chrono::{Duration, NaiveTime};
use std::collections::HashSet;
use tracing::{debug, instrument};

// ==========================================
// TimelineComposer - 时间线编排引擎
// ==========================================
pub struct TimelineComposer {
    config: MeetingConfig,
    impact: EventImpactApplier,
}

impl TimelineComposer {
    pub fn new(config: MeetingConfig) -> Self {
        let impact = EventImpactApplier::new(&config);
        Self { config, impact }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 编排时间线
    ///
    /// # 参数
    /// - `parts`: 已分派部分(规范顺序)
    /// - `event`: 本周特别活动及其模板(每周至多一个)
    #[instrument(skip_all, fields(parts = parts.len(), has_event = event.is_some()))]
    pub fn compose(
        &self,
        parts: &[AssignedPart],
        event: Option<(&SpecialEvent, &EventTemplate)>,
    ) -> Vec<TimedEntry> {
        let mut units = Self::pair_for_display(parts);
        if let Some((special, template)) = event {
            units = self.impact.apply(units, special, template);
        }
        self.stamp(&units)
    }

    /// 展示配对
    ///
    /// # 规则
    /// - 独立的助手与研经朗读部分不单独输出
    /// - 传道部分(非演讲)与其后首个未用的助手合并
    /// - 研经主持与其后首个未用的朗读合并
    pub fn pair_for_display(parts: &[AssignedPart]) -> Vec<DisplayUnit> {
        let mut used: HashSet<usize> = HashSet::new();
        let mut units = Vec::with_capacity(parts.len());

        for (i, part) in parts.iter().enumerate() {
            if used.contains(&i) || matches!(part.part_type, PartType::Helper | PartType::StudyReader) {
                continue;
            }

            let pair_type = match part.part_type {
                PartType::Ministry if !part.title_contains("discurso") => Some(PartType::Helper),
                PartType::StudyConductor => Some(PartType::StudyReader),
                _ => None,
            };

            let pair = pair_type.and_then(|wanted| {
                let j = (i + 1..parts.len()).find(|j| !used.contains(j) && parts[*j].part_type == wanted)?;
                used.insert(j);
                Some(parts[j].clone())
            });

            units.push(DisplayUnit {
                part: part.clone(),
                pair,
            });
        }

        units
    }

    // ==========================================
    // 计时
    // ==========================================

    fn stamp(&self, units: &[DisplayUnit]) -> Vec<TimedEntry> {
        let fixed = &self.config.fixed_durations;
        let mut clock = self.start_time();
        let mut entries = Vec::with_capacity(units.len() + 4);

        let presiding_name = units
            .iter()
            .find(|u| u.part.part_type == PartType::PresidingOfficer)
            .map(|u| u.part.publisher_name.clone())
            .unwrap_or_default();

        for unit in units {
            let part = &unit.part;
            let mut duration = part.duration.unwrap_or(0);
            let mut section = SectionTag::Section(part.part_type);

            match part.part_type {
                PartType::Song => duration = self.config.song_minutes,
                PartType::OpeningPrayer => {
                    duration = fixed.opening_prayer;
                    section = SectionTag::Opening;
                }
                PartType::ClosingPrayer => {
                    duration = fixed.closing_prayer;
                    section = SectionTag::Closing;
                }
                PartType::ClosingComments => {
                    duration = fixed.closing_comments;
                    section = SectionTag::Closing;
                }
                PartType::PresidingOfficer => section = SectionTag::Opening,
                _ => {}
            }
            if part.part_title == self.config.presiding_officer_label {
                duration = fixed.presiding_officer;
                section = SectionTag::Opening;
            } else if part.part_title == titles::OPENING_COMMENTS {
                duration = fixed.opening_comments;
                section = SectionTag::Opening;
            }

            entries.push(TimedEntry {
                id: part.id.clone(),
                start_time: Self::format_clock(clock),
                part_title: part.part_title.clone(),
                assignee_display: unit.assignee_display(),
                duration_label: Self::duration_label(duration),
                section_tag: section,
                is_counseling_note: false,
            });

            let needs_counsel = part.title_contains("leitura da bíblia")
                || (part.part_type == PartType::Ministry && !part.title_contains("discurso"));

            if needs_counsel && !presiding_name.is_empty() {
                clock = Self::advance(clock, duration);
                duration = self.config.counseling_minutes;
                entries.push(TimedEntry {
                    id: format!("counsel-{}", part.id),
                    start_time: Self::format_clock(clock),
                    part_title: titles::COUNSELING.to_string(),
                    assignee_display: presiding_name.clone(),
                    duration_label: Self::duration_label(duration),
                    section_tag: SectionTag::Section(part.part_type),
                    is_counseling_note: true,
                });
            }

            clock = Self::advance(clock, duration);
        }

        debug!(entries = entries.len(), end = %Self::format_clock(clock), "时间线编排完成");
        entries
    }

    fn start_time(&self) -> NaiveTime {
        self.config
            .start_time()
            .or_else(|| NaiveTime::from_hms_opt(19, 30, 0))
            .unwrap_or_default()
    }

    fn advance(clock: NaiveTime, minutes: i32) -> NaiveTime {
        clock + Duration::minutes(i64::from(minutes))
    }

    fn format_clock(clock: NaiveTime) -> String {
        clock.format("%H:%M").to_string()
    }

    fn duration_label(minutes: i32) -> String {
        if minutes > 0 {
            format!("({} min)", minutes)
        } else {
            String::new()
        }
    }
}

impl Default for TimelineComposer {
    fn default() -> Self {
        Self::new(MeetingConfig::default())
    }
}
