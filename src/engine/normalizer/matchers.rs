// ==========================================
// 周中聚会排程核心 - 规范结构匹配表
// ==========================================
// 职责: 以有序表声明聚会骨架 (类型, 标题谓词) → 取用方式
// 说明: 标题匹配一律忽略大小写
// ==========================================

use crate::domain::part::SchedulePart;
use crate::domain::types::{titles, PartType};

// ==========================================
// 标题谓词
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitlePredicate {
    Any,
    /// 标题包含片段
    Contains(&'static str),
    /// 标题不包含任一片段
    ExcludesAll(&'static [&'static str]),
}

impl TitlePredicate {
    pub fn matches(&self, title: &str) -> bool {
        let lower = title.to_lowercase();
        match self {
            TitlePredicate::Any => true,
            TitlePredicate::Contains(fragment) => lower.contains(&fragment.to_lowercase()),
            TitlePredicate::ExcludesAll(fragments) => fragments
                .iter()
                .all(|fragment| !lower.contains(&fragment.to_lowercase())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartMatcher {
    pub types: &'static [PartType],
    pub title: TitlePredicate,
}

impl PartMatcher {
    pub const fn of(types: &'static [PartType], title: TitlePredicate) -> Self {
        Self { types, title }
    }

    pub fn matches(&self, part: &SchedulePart) -> bool {
        self.types.contains(&part.part_type) && self.title.matches(&part.part_title)
    }
}

// ==========================================
// 骨架步骤
// ==========================================
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// 必需部分: 取首个匹配,否则合成默认
    Required {
        matcher: PartMatcher,
        default: fn() -> SchedulePart,
    },
    /// 可选部分: 取首个匹配
    First(PartMatcher),
    /// 取全部匹配,保持原相对顺序
    All(PartMatcher),
    /// 研经主持 + 紧随其后的朗读(缺失则合成)
    StudyPair,
    /// 结束评论: 显式实例 → 孤立评论改型 → 合成默认
    ClosingComments,
}

pub const PRESIDING_OFFICER: PartMatcher = PartMatcher::of(
    &[PartType::PresidingOfficer],
    TitlePredicate::Contains(titles::PRESIDING_OFFICER),
);
pub const OPENING_COMMENTS: PartMatcher = PartMatcher::of(
    &[PartType::PresidingOfficer],
    TitlePredicate::Contains(titles::OPENING_COMMENTS),
);
pub const TREASURES_DISCOURSE: PartMatcher = PartMatcher::of(
    &[PartType::Treasures],
    TitlePredicate::ExcludesAll(&["joias", "leitura"]),
);
pub const SPIRITUAL_GEMS: PartMatcher =
    PartMatcher::of(&[PartType::Treasures], TitlePredicate::Contains("joias"));
pub const BIBLE_READING: PartMatcher =
    PartMatcher::of(&[PartType::Treasures], TitlePredicate::Contains("leitura"));
pub const STUDY_CONDUCTOR: PartMatcher =
    PartMatcher::of(&[PartType::StudyConductor], TitlePredicate::Any);
pub const STUDY_READER: PartMatcher = PartMatcher::of(&[PartType::StudyReader], TitlePredicate::Any);
pub const EXPLICIT_CLOSING_COMMENTS: PartMatcher =
    PartMatcher::of(&[PartType::ClosingComments], TitlePredicate::Any);
/// 被误标为主席类型的评论(开场实例已先行取用)
pub const ORPHANED_COMMENTS: PartMatcher = PartMatcher::of(
    &[PartType::PresidingOfficer],
    TitlePredicate::Contains("comentários"),
);

/// 聚会骨架,按顺序执行
pub const SKELETON: [Step; 12] = [
    Step::Required {
        matcher: PRESIDING_OFFICER,
        default: default_presiding_officer,
    },
    Step::Required {
        matcher: PartMatcher::of(&[PartType::OpeningPrayer], TitlePredicate::Any),
        default: default_opening_prayer,
    },
    Step::Required {
        matcher: OPENING_COMMENTS,
        default: default_opening_comments,
    },
    // 宝藏: 演讲 → 属灵珠宝 → 读经 → 其余
    Step::All(TREASURES_DISCOURSE),
    Step::First(SPIRITUAL_GEMS),
    Step::First(BIBLE_READING),
    Step::All(PartMatcher::of(&[PartType::Treasures], TitlePredicate::Any)),
    // 传道与助手保持原顺序,配对在后续阶段完成
    Step::All(PartMatcher::of(
        &[PartType::Ministry, PartType::Helper],
        TitlePredicate::Any,
    )),
    Step::All(PartMatcher::of(&[PartType::ChristianLife], TitlePredicate::Any)),
    Step::StudyPair,
    Step::ClosingComments,
    Step::Required {
        matcher: PartMatcher::of(&[PartType::ClosingPrayer], TitlePredicate::Any),
        default: default_closing_prayer,
    },
];

// ==========================================
// 默认部分
// ==========================================

pub fn default_presiding_officer() -> SchedulePart {
    SchedulePart::new(titles::PRESIDING_OFFICER, PartType::PresidingOfficer, 0)
}

pub fn default_opening_prayer() -> SchedulePart {
    SchedulePart::new(titles::OPENING_PRAYER, PartType::OpeningPrayer, 1).presided()
}

pub fn default_opening_comments() -> SchedulePart {
    SchedulePart::new(titles::OPENING_COMMENTS, PartType::PresidingOfficer, 1).presided()
}

pub fn default_study_reader() -> SchedulePart {
    SchedulePart::new(titles::STUDY_READER, PartType::StudyReader, 0)
}

pub fn default_closing_comments() -> SchedulePart {
    SchedulePart::new(titles::CLOSING_COMMENTS, PartType::ClosingComments, 3).presided()
}

pub fn default_closing_prayer() -> SchedulePart {
    SchedulePart::new(titles::CLOSING_PRAYER, PartType::ClosingPrayer, 1)
}
