// ==========================================
// 周中聚会排程核心 - 抽取结果接入
// ==========================================
// 职责: 外部抽取的 {标题, 类型提示, 分钟} 条目 → 原始聚会部分
// 说明: 条目按手册顺序给出;分区标题只更新上下文,不产出部分
// 说明: 结果仍需经规范结构引擎整理
// ==========================================

use crate::domain::part::{PreAssignment, SchedulePart};
use crate::domain::types::PartType;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 抽取器给出的类型提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    SectionHeader,
    #[serde(rename = "CÂNTICO")]
    Song,
    Discourse,
    StudentPart,
    Closing,
    BibleStudy,
    #[serde(other)]
    Other,
}

/// 抽取条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// 手册中的标题原文
    pub part: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub min: Option<i32>,
}

impl ExtractedItem {
    pub fn new(part: &str, kind: ItemKind, min: Option<i32>) -> Self {
        Self {
            part: part.to_string(),
            kind,
            min,
        }
    }
}

pub struct PartIntake {
    // 无状态
}

impl PartIntake {
    pub fn new() -> Self {
        Self {}
    }

    /// 分类抽取条目
    ///
    /// # 规则
    /// 1. 分区标题更新上下文(默认基督徒生活),不产出部分
    /// 2. 诗歌与"término"条目丢弃
    /// 3. 按标题关键词与类型提示判定类型,否则取上下文
    /// 4. 单独的"comentários": 前 3 条视为开场,末 3 条视为结束
    /// 5. 非演讲的传道部分需要助手
    /// 6. 开场祷告、结束评论、主席评论预分派给主席
    pub fn classify(&self, items: &[ExtractedItem]) -> Vec<SchedulePart> {
        if items.is_empty() {
            info!("抽取结果为空,无可分派部分");
            return Vec::new();
        }

        let total = items.len();
        let mut context = PartType::ChristianLife;
        let mut parts = Vec::with_capacity(total);

        for (index, item) in items.iter().enumerate() {
            let title = item.part.to_lowercase();

            if item.kind == ItemKind::SectionHeader {
                if title.contains("tesouros") {
                    context = PartType::Treasures;
                } else if title.contains("ministério") {
                    context = PartType::Ministry;
                } else if title.contains("vida cristã") {
                    context = PartType::ChristianLife;
                }
                continue;
            }

            if item.kind == ItemKind::Song || title.contains("término") || title.contains("cântico") {
                continue;
            }

            let mut part_type = Self::map_kind(item.kind, &title, context);

            if title.contains("oração") && !title.contains("final") && index < 4 {
                part_type = PartType::OpeningPrayer;
            }

            if title.contains("comentários") && !title.contains("iniciais") && !title.contains("finais") {
                if index < 3 {
                    part_type = PartType::PresidingOfficer;
                } else if index + 4 > total {
                    part_type = PartType::ClosingComments;
                }
            }

            let requires_helper = part_type == PartType::Ministry && !title.contains("discurso");
            let presided = matches!(part_type, PartType::OpeningPrayer | PartType::ClosingComments)
                || (part_type == PartType::PresidingOfficer && title.contains("comentários"));

            parts.push(SchedulePart {
                id: None,
                part_title: item.part.clone(),
                part_type,
                duration: item.min,
                requires_helper,
                pre_assigned_to: presided.then_some(PreAssignment::PresidingOfficer),
            });
        }

        debug!(items = total, parts = parts.len(), "抽取条目分类完成");
        parts
    }

    fn map_kind(kind: ItemKind, title: &str, context: PartType) -> PartType {
        if title.contains("oração") && title.contains("inicial") {
            return PartType::OpeningPrayer;
        }
        if title.contains("oração") && (title.contains("final") || kind == ItemKind::Closing) {
            return PartType::ClosingPrayer;
        }
        if title.contains("comentários") {
            if title.contains("finais") || kind == ItemKind::Closing {
                return PartType::ClosingComments;
            }
            return PartType::PresidingOfficer;
        }
        if title.contains("leitura da bíblia") || title.contains("joias espirituais") {
            return PartType::Treasures;
        }
        if title.contains("estudo bíblico") || kind == ItemKind::BibleStudy {
            return PartType::StudyConductor;
        }
        match kind {
            ItemKind::StudentPart if context == PartType::Treasures => PartType::Treasures,
            ItemKind::StudentPart => PartType::Ministry,
            _ => context,
        }
    }
}

impl Default for PartIntake {
    fn default() -> Self {
        Self::new()
    }
}

const TREASURES_KEYWORDS: [&str; 9] = [
    "tesouros", "pacto", "salvador", "agradeçam", "rei jesus", "retribuir", "caminho", "perseverar",
    "sofrimento",
];
const LIFE_KEYWORDS: [&str; 6] = [
    "amor", "dinheiro", "promessas", "necessidades locais", "organização", "sofrer",
];
const MINISTRY_KEYWORDS: [&str; 5] = [
    "iniciando conversas",
    "cultivando o interesse",
    "fazendo discípulos",
    "explicando suas crenças",
    "discurso",
];

/// 仅凭标题推断部分类型(手工录入的历史记录使用)
pub fn infer_part_type(title: &str) -> PartType {
    let title = title.to_lowercase();
    let has = |fragment: &str| title.contains(fragment);

    if has("presidente") {
        PartType::PresidingOfficer
    } else if has("oração inicial") {
        PartType::OpeningPrayer
    } else if has("oração final") {
        PartType::ClosingPrayer
    } else if has("cântico") {
        PartType::Song
    } else if has("comentários finais") {
        PartType::ClosingComments
    } else if has("ajudante") {
        PartType::Helper
    } else if has("leitura da bíblia") || has("joias espirituais") {
        PartType::Treasures
    } else if MINISTRY_KEYWORDS.iter().any(|kw| has(kw)) {
        PartType::Ministry
    } else if has("estudo bíblico de congregação") {
        PartType::StudyConductor
    } else if TREASURES_KEYWORDS.iter().any(|kw| has(kw)) {
        PartType::Treasures
    } else if LIFE_KEYWORDS.iter().any(|kw| has(kw)) {
        PartType::ChristianLife
    } else {
        PartType::ChristianLife
    }
}
