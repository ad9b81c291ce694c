use std::fs;
use std::path::{Path, PathBuf};

use iris_core::document::{ConstraintDocument, SCHEMA};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum IoError {
    #[error("不支持的文档格式: {0}")]
    UnsupportedSchema(String),
    #[error("failed to read file {path:?}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write file {path:?}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("文档 {path:?} 结构无效: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("序列化约束文档失败: {0}")]
    Encode(#[source] serde_json::Error),
}

pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<ConstraintDocument, IoError>;
}

pub trait DocumentSaver {
    fn save(&self, document: &ConstraintDocument, path: &Path) -> Result<(), IoError>;
}

/// `slvs-json/1` 文档的读写入口。
///
/// 读取时经由 [`ConstraintDocument`] 的反序列化重新执行全部结构校验，
/// 因此手工编辑过的文件若出现悬空引用会在这里被拒绝。
#[derive(Debug, Clone, Copy)]
pub struct JsonFacade {
    pretty: bool,
}

impl JsonFacade {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn with_pretty(pretty: bool) -> Self {
        Self { pretty }
    }

    pub fn to_json(&self, document: &ConstraintDocument) -> Result<String, IoError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        };
        encoded.map_err(IoError::Encode)
    }

    pub fn from_json(&self, text: &str) -> Result<ConstraintDocument, IoError> {
        parse(text, Path::new("<memory>"))
    }
}

impl Default for JsonFacade {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(text: &str, path: &Path) -> Result<ConstraintDocument, IoError> {
    let document: ConstraintDocument =
        serde_json::from_str(text).map_err(|source| IoError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    if document.schema() != SCHEMA {
        return Err(IoError::UnsupportedSchema(document.schema().to_string()));
    }
    Ok(document)
}

impl DocumentLoader for JsonFacade {
    fn load(&self, path: &Path) -> Result<ConstraintDocument, IoError> {
        let data = fs::read_to_string(path).map_err(|source| IoError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let document = parse(&data, path).inspect_err(|err| {
            warn!(path = %path.display(), error = %err, "约束文档加载失败");
        })?;
        debug!(
            path = %path.display(),
            entities = document.entities().len(),
            constraints = document.constraints().len(),
            "已加载约束文档"
        );
        Ok(document)
    }
}

impl DocumentSaver for JsonFacade {
    fn save(&self, document: &ConstraintDocument, path: &Path) -> Result<(), IoError> {
        let mut text = self.to_json(document)?;
        text.push('\n');
        if let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| IoError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| IoError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "已写出约束文档");
        Ok(())
    }
}
