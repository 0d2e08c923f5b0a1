// ==========================================
// 周中聚会排程核心 - 领域类型定义
// ==========================================
// 职责: 部分类型、人员属性枚举、固定标题常量
// 序列化格式: 与外部数据一致的葡萄牙语标签
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 部分类型 (Part Type)
// ==========================================
// 序列化为聚会手册中的原文标签,规则条件按该标签比较
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartType {
    #[serde(rename = "Presidente")]
    PresidingOfficer, // 主席(含开场评论)
    #[serde(rename = "Oração Inicial")]
    OpeningPrayer, // 开场祷告
    #[serde(rename = "Oração Final")]
    ClosingPrayer, // 结束祷告
    #[serde(rename = "Tesouros da Palavra de Deus")]
    Treasures, // 宝藏部分
    #[serde(rename = "Faça Seu Melhor no Ministério")]
    Ministry, // 传道部分
    #[serde(rename = "Nossa Vida Cristã")]
    ChristianLife, // 基督徒生活部分
    #[serde(rename = "Dirigente do EBC")]
    StudyConductor, // 会众研经主持
    #[serde(rename = "Leitor do EBC")]
    StudyReader, // 会众研经朗读
    #[serde(rename = "Ajudante")]
    Helper, // 助手
    #[serde(rename = "Cântico")]
    Song, // 诗歌
    #[serde(rename = "Comentários Finais")]
    ClosingComments, // 结束评论
}

impl PartType {
    /// 原文标签(规则条件中的 partType 取值)
    pub fn label(&self) -> &'static str {
        match self {
            PartType::PresidingOfficer => "Presidente",
            PartType::OpeningPrayer => "Oração Inicial",
            PartType::ClosingPrayer => "Oração Final",
            PartType::Treasures => "Tesouros da Palavra de Deus",
            PartType::Ministry => "Faça Seu Melhor no Ministério",
            PartType::ChristianLife => "Nossa Vida Cristã",
            PartType::StudyConductor => "Dirigente do EBC",
            PartType::StudyReader => "Leitor do EBC",
            PartType::Helper => "Ajudante",
            PartType::Song => "Cântico",
            PartType::ClosingComments => "Comentários Finais",
        }
    }

    /// 从原文标签解析
    pub fn from_label(label: &str) -> Option<Self> {
        const ALL: [PartType; 11] = [
            PartType::PresidingOfficer,
            PartType::OpeningPrayer,
            PartType::ClosingPrayer,
            PartType::Treasures,
            PartType::Ministry,
            PartType::ChristianLife,
            PartType::StudyConductor,
            PartType::StudyReader,
            PartType::Helper,
            PartType::Song,
            PartType::ClosingComments,
        ];
        let label = label.trim();
        ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for PartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 性别 (Gender)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Brother,
    Sister,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Brother => "brother",
            Gender::Sister => "sister",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 会众身份 (Condition)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Ancião")]
    Elder,
    #[serde(rename = "Servo Ministerial")]
    MinisterialServant,
    #[serde(rename = "Publicador")]
    Publisher,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Elder => "Ancião",
            Condition::MinisterialServant => "Servo Ministerial",
            Condition::Publisher => "Publicador",
        }
    }

    /// 是否为基础层级(非任命身份)
    pub fn is_base_tier(&self) -> bool {
        matches!(self, Condition::Publisher)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 年龄组 (Age Group)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "Adulto")]
    Adult,
    #[serde(rename = "Jovem")]
    Teen,
    #[serde(rename = "Criança")]
    Child,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Adult => "Adulto",
            AgeGroup::Teen => "Jovem",
            AgeGroup::Child => "Criança",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 可用性模式 (Availability Mode)
// ==========================================
// always: 默认可用,例外日期不可用
// never:  默认不可用,仅例外日期可用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AvailabilityMode {
    #[default]
    #[serde(rename = "always")]
    DefaultAvailable,
    #[serde(rename = "never")]
    DefaultUnavailable,
}

// ==========================================
// 候选排序模式 (Sort Mode)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SortMode {
    /// 合格优先 + 负载均衡 + 最近分派时间升序
    #[default]
    #[serde(rename = "lastDate")]
    LastAssigned,
    /// 仅按姓名字母序
    #[serde(rename = "name")]
    Name,
}

// ==========================================
// 固定标题
// ==========================================
pub mod titles {
    pub const PRESIDING_OFFICER: &str = "Presidente";
    pub const OPENING_PRAYER: &str = "Oração Inicial";
    pub const OPENING_COMMENTS: &str = "Comentários Iniciais";
    pub const CLOSING_COMMENTS: &str = "Comentários Finais";
    pub const CLOSING_PRAYER: &str = "Oração Final";
    pub const STUDY_READER: &str = "Leitor do EBC";
    pub const HELPER: &str = "Ajudante";
    pub const COUNSELING: &str = "Aconselhamento";
}
