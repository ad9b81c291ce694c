use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// 指定配置文件路径的环境变量。
pub const CONFIG_ENV: &str = "IRIS_CONFIG";

/// 应用配置的根结构。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub mechanism: MechanismConfig,
}

impl AppConfig {
    /// 从显式路径加载配置。
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 自动发现配置文件：优先读取环境变量 `IRIS_CONFIG`，否则寻找 `./config/default.toml`。
    /// 若文件缺失，则返回默认配置。
    pub fn discover() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join("config").join("default.toml"))
            .map_err(|source| ConfigError::Context {
                message: "获取当前工作目录失败".to_string(),
                source,
            })?;

        if default_path.exists() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }
}

/// 日志配置，支持设置默认等级。
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_pretty")]
    pub pretty: bool,
    /// `batch` 未指定输出目录时使用。
    #[serde(default = "OutputConfig::default_directory")]
    pub directory: PathBuf,
}

impl OutputConfig {
    fn default_pretty() -> bool {
        true
    }

    fn default_directory() -> PathBuf {
        PathBuf::from("iris_diaphragm")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: Self::default_pretty(),
            directory: Self::default_directory(),
        }
    }
}

/// 机构经验系数与尺寸覆盖。尺寸字段缺省时沿用各布局自己的默认值。
#[derive(Debug, Clone, Deserialize)]
pub struct MechanismConfig {
    #[serde(default = "MechanismConfig::default_aperture_scale")]
    pub aperture_scale: f64,
    #[serde(default = "MechanismConfig::default_seed_tip_scale")]
    pub seed_tip_scale: f64,
    #[serde(default)]
    pub pivot_radius: Option<f64>,
    #[serde(default)]
    pub blade_length: Option<f64>,
    #[serde(default)]
    pub blade_base_width: Option<f64>,
    #[serde(default)]
    pub blade_tip_width: Option<f64>,
}

impl MechanismConfig {
    fn default_aperture_scale() -> f64 {
        0.8
    }

    fn default_seed_tip_scale() -> f64 {
        0.7
    }
}

impl Default for MechanismConfig {
    fn default() -> Self {
        Self {
            aperture_scale: Self::default_aperture_scale(),
            seed_tip_scale: Self::default_seed_tip_scale(),
            pivot_radius: None,
            blade_length: None,
            blade_base_width: None,
            blade_tip_width: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件 {path:?} 失败: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("解析配置文件 {path:?} 失败: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}
