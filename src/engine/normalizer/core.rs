use super::matchers::{
    default_closing_comments, default_study_reader, PartMatcher, Step,
    EXPLICIT_CLOSING_COMMENTS, ORPHANED_COMMENTS, SKELETON, STUDY_CONDUCTOR, STUDY_READER,
};
use crate::domain::part::{PartToAssign, PreAssignment, SchedulePart};
use crate::domain::part::to_parts_to_assign;
use crate::domain::types::{titles, PartType};
use tracing::{debug, info, instrument};

// ==========================================
// ScheduleNormalizer - 规范结构引擎
// ==========================================
pub struct ScheduleNormalizer {
    // 无状态,骨架由匹配表声明
}

/// 单次规范化的取用状态
///
/// 每个原始部分至多被取用一次,未被任何步骤取用的部分被丢弃
struct Picker<'a> {
    raw: &'a [SchedulePart],
    used: Vec<bool>,
}

impl<'a> Picker<'a> {
    fn new(raw: &'a [SchedulePart]) -> Self {
        Self {
            raw,
            used: vec![false; raw.len()],
        }
    }

    fn first(&mut self, matcher: &PartMatcher) -> Option<SchedulePart> {
        let index = (0..self.raw.len()).find(|&i| !self.used[i] && matcher.matches(&self.raw[i]))?;
        self.used[index] = true;
        Some(self.raw[index].clone())
    }

    fn last(&mut self, matcher: &PartMatcher) -> Option<SchedulePart> {
        let index = (0..self.raw.len())
            .rev()
            .find(|&i| !self.used[i] && matcher.matches(&self.raw[i]))?;
        self.used[index] = true;
        Some(self.raw[index].clone())
    }

    fn all(&mut self, matcher: &PartMatcher) -> Vec<SchedulePart> {
        let mut taken = Vec::new();
        for (i, part) in self.raw.iter().enumerate() {
            if !self.used[i] && matcher.matches(part) {
                self.used[i] = true;
                taken.push(part.clone());
            }
        }
        taken
    }

    fn dropped(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }
}

impl ScheduleNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 规范化原始部分列表
    ///
    /// # 顺序
    /// 1. 主席 → 开场祷告 → 开场评论
    /// 2. 宝藏: 演讲 → 属灵珠宝 → 读经 → 其余宝藏部分
    /// 3. 传道与助手(原顺序)
    /// 4. 基督徒生活(原顺序) → 研经主持 → 研经朗读
    /// 5. 结束评论 → 结束祷告
    ///
    /// 未被骨架取用的部分(诗歌、辅导行等)被丢弃
    #[instrument(skip(self, raw_parts), fields(raw = raw_parts.len()))]
    pub fn normalize(&self, raw_parts: &[SchedulePart]) -> Vec<SchedulePart> {
        let mut picker = Picker::new(raw_parts);
        let mut ordered: Vec<SchedulePart> = Vec::with_capacity(raw_parts.len() + 6);

        for step in SKELETON.iter() {
            match step {
                Step::Required { matcher, default } => {
                    ordered.push(picker.first(matcher).unwrap_or_else(default));
                }
                Step::First(matcher) => {
                    if let Some(part) = picker.first(matcher) {
                        ordered.push(part);
                    }
                }
                Step::All(matcher) => {
                    ordered.extend(picker.all(matcher));
                }
                Step::StudyPair => {
                    if let Some(conductor) = picker.first(&STUDY_CONDUCTOR) {
                        ordered.push(conductor);
                        ordered.push(picker.first(&STUDY_READER).unwrap_or_else(default_study_reader));
                    }
                }
                Step::ClosingComments => {
                    ordered.push(Self::closing_comments(&mut picker));
                }
            }
        }

        let dropped = picker.dropped();
        if dropped > 0 {
            debug!(dropped, "丢弃骨架外的原始部分");
        }
        info!(parts = ordered.len(), "聚会结构规范化完成");

        ordered
    }

    /// 规范化并转为待分派列表(缺失 id 按位置生成)
    pub fn normalize_to_assign(&self, raw_parts: &[SchedulePart]) -> Vec<PartToAssign> {
        to_parts_to_assign(self.normalize(raw_parts))
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 结束评论
    ///
    /// # 规则
    /// 1. 显式结束评论类型优先
    /// 2. 否则取最后一个孤立的"评论"主席部分并改型
    /// 3. 否则合成 3 分钟默认部分
    /// 4. 标题、类型与主席预分派一律强制
    fn closing_comments(picker: &mut Picker<'_>) -> SchedulePart {
        let found = picker
            .first(&EXPLICIT_CLOSING_COMMENTS)
            .or_else(|| picker.last(&ORPHANED_COMMENTS));

        match found {
            Some(mut part) => {
                part.part_title = titles::CLOSING_COMMENTS.to_string();
                part.part_type = PartType::ClosingComments;
                part.pre_assigned_to = Some(PreAssignment::PresidingOfficer);
                part
            }
            None => default_closing_comments(),
        }
    }
}

impl Default for ScheduleNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
