// ==========================================
// 周中聚会排程核心 - 配置管理器
// ==========================================
// 职责: 配置文件加载、校验、写出
// 存储: JSON 文件(缺失键取默认值)
// ==========================================

use crate::config::meeting_config::MeetingConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 {path}: {message}")]
    Read { path: String, message: String },

    #[error("配置文件解析失败 {path}: {message}")]
    Parse { path: String, message: String },

    #[error("配置无效: {0}")]
    Invalid(String),

    #[error("配置文件写入失败 {path}: {message}")]
    Write { path: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: Option<PathBuf>,
    config: MeetingConfig,
}

impl ConfigManager {
    /// 使用默认配置(无文件)
    pub fn with_defaults() -> Self {
        Self {
            path: None,
            config: MeetingConfig::default(),
        }
    }

    /// 从 JSON 文件加载并校验
    ///
    /// # 返回
    /// - `Err(ConfigError::Read)`: 文件不可读
    /// - `Err(ConfigError::Parse)`: JSON 结构错误
    /// - `Err(ConfigError::Invalid)`: 校验未通过
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        let config: MeetingConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        config.validate().map_err(ConfigError::Invalid)?;

        info!(path = %shown, start = %config.meeting_start, "配置加载完成");
        Ok(Self {
            path: Some(path.to_path_buf()),
            config,
        })
    }

    /// 有路径则加载,否则使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                debug!("未指定配置文件,使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &MeetingConfig {
        &self.config
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn into_config(self) -> MeetingConfig {
        self.config
    }

    /// 写出当前配置(格式化 JSON)
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let json = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Write {
            path: shown.clone(),
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| ConfigError::Write {
            path: shown,
            message: e.to_string(),
        })
    }
}
