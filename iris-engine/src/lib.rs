pub mod assembler;
pub mod builder;
pub mod generator;
pub mod layout;
pub mod params;
pub mod presets;
pub mod summary;

pub use generator::Generator;
pub use layout::Variant;
pub use params::MechanismParams;

pub mod errors {
    use iris_core::validate::ValidationError;
    use thiserror::Error;

    use crate::layout::Variant;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("叶片数量 {requested} 小于对称机构的最小值 {minimum}")]
        InvalidBladeCount { requested: u32, minimum: u32 },
        #[error("未知的叶片布局 `{0}`（可选: fixed, constrained, tapered）")]
        UnknownVariant(String),
        #[error("叶片布局 {0} 未注册")]
        LayoutNotRegistered(Variant),
        #[error("文档校验失败: {0}")]
        Document(#[from] ValidationError),
    }

    /// 错误的粗粒度分类：参数问题由调用方修正后可重试，悬空引用说明生成器本身有缺陷。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ErrorKind {
        InvalidParameter,
        DanglingReference,
    }

    impl EngineError {
        pub fn kind(&self) -> ErrorKind {
            match self {
                EngineError::InvalidBladeCount { .. }
                | EngineError::UnknownVariant(_)
                | EngineError::LayoutNotRegistered(_) => ErrorKind::InvalidParameter,
                EngineError::Document(ValidationError::UndeclaredParameter { .. }) => {
                    ErrorKind::InvalidParameter
                }
                EngineError::Document(_) => ErrorKind::DanglingReference,
            }
        }
    }
}
