// ==========================================
// 周中聚会排程核心 - 周日历工具
// ==========================================
// 职责: 周标签解析、聚会日期推算、周列表生成
// 支持: ISO 周 id (YYYY-MM-DD) 与葡萄牙语旧式标签 ("3-9 de NOV, 2025")
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

const MONTHS: [(&str, u32); 24] = [
    ("JAN", 1),
    ("JANEIRO", 1),
    ("FEV", 2),
    ("FEVEREIRO", 2),
    ("MAR", 3),
    ("MARÇO", 3),
    ("ABR", 4),
    ("ABRIL", 4),
    ("MAI", 5),
    ("MAIO", 5),
    ("JUN", 6),
    ("JUNHO", 6),
    ("JUL", 7),
    ("JULHO", 7),
    ("AGO", 8),
    ("AGOSTO", 8),
    ("SET", 9),
    ("SETEMBRO", 9),
    ("OUT", 10),
    ("OUTUBRO", 10),
    ("NOV", 11),
    ("NOVEMBRO", 11),
    ("DEZ", 12),
    ("DEZEMBRO", 12),
];

const MONTH_ABBR: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

fn month_from_token(token: &str) -> Option<u32> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == token)
        .map(|(_, month)| *month)
}

/// 清理 PDF 文本: 零宽/不换行空格 → 空格,长短破折号 → 连字符,合并空白
pub fn clean_text(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' | '\u{00A0}' => ' ',
            '–' | '—' => '-',
            other => other,
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 解析周标签为该周起始日期
///
/// # 规则
/// 1. ISO 日期直接解析
/// 2. 显式年份(20xx) > fallback_year > 按 today 推断(跨年边界修正)
/// 3. 起始日取 "DD-DD" 片段的前半,否则取首个片段
///
/// # 返回
/// - None: 无法识别日或月
pub fn parse_week_date(label: &str, fallback_year: Option<i32>, today: NaiveDate) -> Option<NaiveDate> {
    let cleaned: String = clean_text(label)
        .to_uppercase()
        .chars()
        .filter(|c| *c != ',' && *c != '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(&cleaned, "%Y-%m-%d") {
        return Some(date);
    }

    let tokens: Vec<&str> = cleaned.split(' ').collect();

    let explicit_year = tokens
        .iter()
        .find(|t| t.len() == 4 && t.starts_with("20") && t.chars().all(|c| c.is_ascii_digit()))
        .and_then(|t| t.parse::<i32>().ok());

    let day_token = tokens
        .iter()
        .find(|t| is_day_range(t))
        .or_else(|| tokens.first())?;
    let start_day = leading_number(day_token.split('-').next()?)?;

    let month = tokens.iter().find_map(|t| month_from_token(t))?;

    let year = explicit_year.or(fallback_year).unwrap_or_else(|| {
        let current = today.year();
        if today.month() >= 11 && month <= 2 {
            current + 1
        } else if today.month() <= 2 && month >= 11 {
            current - 1
        } else {
            current
        }
    });

    NaiveDate::from_ymd_opt(year, month, start_day)
}

fn is_day_range(token: &str) -> bool {
    let mut parts = token.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), None) => {
            (1..=2).contains(&a.len())
                && (1..=2).contains(&b.len())
                && a.chars().all(|c| c.is_ascii_digit())
                && b.chars().all(|c| c.is_ascii_digit())
        }
        _ => false,
    }
}

fn leading_number(token: &str) -> Option<u32> {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// 由周起始日(周一)推算聚会日: 奇数年周三,偶数年周四
pub fn meeting_date_for_week(week_start: NaiveDate) -> NaiveDate {
    let offset = if week_start.year() % 2 != 0 { 2 } else { 3 };
    week_start + Duration::days(offset)
}

/// 格式化周区间标签
///
/// 例: 2025-11-03 → "3-9 de NOV, 2025"
pub fn format_week_range(start: NaiveDate) -> String {
    let end = start + Duration::days(6);
    let start_month = MONTH_ABBR[start.month0() as usize];
    let end_month = MONTH_ABBR[end.month0() as usize];

    if start.month() == end.month() && start.year() == end.year() {
        format!("{}-{} de {}, {}", start.day(), end.day(), start_month, start.year())
    } else if start.year() == end.year() {
        format!(
            "{} de {} - {} de {}, {}",
            start.day(),
            start_month,
            end.day(),
            end_month,
            start.year()
        )
    } else {
        format!(
            "{} de {}, {} - {} de {}, {}",
            start.day(),
            start_month,
            start.year(),
            end.day(),
            end_month,
            end.year()
        )
    }
}

/// 周 id 转展示标签;旧式标签(含空格或逗号)原样返回
pub fn format_week_label(week_id: &str) -> String {
    if week_id.contains(' ') || week_id.contains(',') {
        return week_id.to_string();
    }
    match NaiveDate::parse_from_str(week_id.trim(), "%Y-%m-%d") {
        Ok(date) => format_week_range(date),
        Err(_) => week_id.to_string(),
    }
}

/// 手册中的一周
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkbookWeek {
    /// 周一 ISO 日期
    pub id: String,
    pub label: String,
}

/// 由手册名称生成周列表
///
/// 例: "Novembro/Dezembro 2025" → 覆盖 11 月 1 日至 12 月 31 日的所有周(以周一为 id)
pub fn weeks_for_workbook(workbook_name: &str) -> Vec<WorkbookWeek> {
    let upper = clean_text(workbook_name).to_uppercase();
    let tokens: Vec<&str> = upper.split(' ').collect();

    let Some(pos) = tokens.iter().position(|t| t.contains('/')) else {
        return Vec::new();
    };
    let mut months = tokens[pos].split('/');
    let (Some(start_month), Some(end_month)) = (
        months.next().and_then(month_from_token),
        months.next().and_then(month_from_token),
    ) else {
        return Vec::new();
    };
    let Some(year) = tokens
        .get(pos + 1)
        .filter(|t| t.len() == 4)
        .and_then(|t| t.parse::<i32>().ok())
    else {
        return Vec::new();
    };

    let Some(first_day) = NaiveDate::from_ymd_opt(year, start_month, 1) else {
        return Vec::new();
    };
    let Some(last_day) = last_day_of_month(year, end_month) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut monday = first_day.week(Weekday::Mon).first_day();
    while monday <= last_day {
        weeks.push(WorkbookWeek {
            id: monday.format("%Y-%m-%d").to_string(),
            label: format_week_range(monday),
        });
        monday += Duration::days(7);
    }
    weeks
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).map(|d| d - Duration::days(1))
}

// ==========================================
// WeekContext - 一周的评估上下文
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekContext {
    pub week_id: String,
    /// 可用性判定所用的聚会日期
    pub meeting_date: NaiveDate,
}

impl WeekContext {
    pub fn new(week_id: &str, meeting_date: NaiveDate) -> Self {
        Self {
            week_id: week_id.to_string(),
            meeting_date,
        }
    }

    /// 由周标签构造;无法解析时以 today 作为聚会日期
    pub fn from_week_label(label: &str, today: NaiveDate) -> Self {
        match parse_week_date(label, None, today) {
            Some(week_start) => Self {
                week_id: week_start.format("%Y-%m-%d").to_string(),
                meeting_date: meeting_date_for_week(week_start),
            },
            None => Self {
                week_id: label.to_string(),
                meeting_date: today,
            },
        }
    }
}
