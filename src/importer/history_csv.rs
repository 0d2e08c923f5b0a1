// ==========================================
// 周中聚会排程核心 - 历史记录 CSV 导入
// ==========================================
// 职责: CSV 文件 → 参与记录
// 表头: publisherName, week, date, partTitle, type, duration
// ==========================================
// 说明: 完全空白的行跳过;表头大小写与首尾空白不敏感
// 说明: type 为空时按标题推断;date 为空时由 ISO 周 id 推算聚会日
// ==========================================

use crate::calendar::meeting_date_for_week;
use crate::domain::participation::Participation;
use crate::domain::types::PartType;
use crate::engine::intake::infer_part_type;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

const COL_NAME: &str = "publishername";
const COL_WEEK: &str = "week";
const COL_DATE: &str = "date";
const COL_TITLE: &str = "parttitle";
const COL_TYPE: &str = "type";
const COL_DURATION: &str = "duration";

pub struct HistoryCsvImporter;

impl HistoryCsvImporter {
    /// 从文件导入
    ///
    /// # 返回
    /// - `Err(FileNotFound)`: 文件不存在
    /// - `Err(UnsupportedFormat)`: 扩展名不是 csv
    pub fn import_file(&self, path: &Path) -> ImportResult<Vec<Participation>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(ext.to_string_lossy().to_string()));
            }
        }

        let file = File::open(path)?;
        let records = self.import_reader(file)?;
        info!(path = %path.display(), records = records.len(), "历史记录导入完成");
        Ok(records)
    }

    /// 从任意读取源导入
    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<Participation>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            // 表头为第 1 行
            let row = idx + 2;

            let fields: HashMap<&str, &str> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.as_str(), v.trim()))
                .collect();

            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(Self::map_row(row, &fields)?);
        }

        debug!(records = records.len(), "CSV 行映射完成");
        Ok(records)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn map_row(row: usize, fields: &HashMap<&str, &str>) -> ImportResult<Participation> {
        let get = |key: &str| fields.get(key).copied().unwrap_or("");
        let required = |key: &str, field: &str| -> ImportResult<String> {
            let value = get(key);
            if value.is_empty() {
                return Err(ImportError::MissingField {
                    row,
                    field: field.to_string(),
                });
            }
            Ok(value.to_string())
        };

        let publisher_name = required(COL_NAME, "publisherName")?;
        let part_title = required(COL_TITLE, "partTitle")?;

        let part_type = match get(COL_TYPE) {
            "" => infer_part_type(&part_title),
            label => PartType::from_label(label).ok_or_else(|| ImportError::TypeConversionError {
                row,
                field: "type".to_string(),
                message: format!("未知部分类型 {}", label),
            })?,
        };

        let duration = match get(COL_DURATION) {
            "" => None,
            raw => Some(raw.parse::<i32>().map_err(|e| ImportError::TypeConversionError {
                row,
                field: "duration".to_string(),
                message: e.to_string(),
            })?),
        };

        let week = get(COL_WEEK);
        let date = match get(COL_DATE) {
            "" => Self::date_from_week(row, week)?,
            raw => Self::parse_date(row, raw)?,
        };
        let week = if week.is_empty() {
            date.format("%Y-%m-%d").to_string()
        } else {
            week.to_string()
        };

        Ok(Participation {
            id: Uuid::new_v4().to_string(),
            publisher_name,
            week,
            date,
            part_title,
            part_type,
            duration,
        })
    }

    fn parse_date(row: usize, raw: &str) -> ImportResult<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Self::midnight)
            .map_err(|_| ImportError::DateFormatError {
                row,
                value: raw.to_string(),
            })
    }

    fn date_from_week(row: usize, week: &str) -> ImportResult<DateTime<Utc>> {
        match NaiveDate::parse_from_str(week, "%Y-%m-%d") {
            Ok(start) => Ok(Self::midnight(meeting_date_for_week(start))),
            Err(_) if week.is_empty() => Err(ImportError::MissingField {
                row,
                field: "date".to_string(),
            }),
            Err(_) => Err(ImportError::DateFormatError {
                row,
                value: week.to_string(),
            }),
        }
    }

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
    }
}
