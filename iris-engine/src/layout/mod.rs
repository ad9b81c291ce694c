//! 叶片几何策略。三种布局共用标识方案与组装器，只在实体/约束集合上不同。

mod constrained;
mod fixed;
mod tapered;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use iris_core::document::ConstraintDocument;
use tracing::debug;

use crate::assembler;
use crate::builder::DocumentBuilder;
use crate::errors::EngineError;
use crate::params::{BladeDimensions, MechanismParams};

pub use constrained::ConstrainedLayout;
pub use fixed::FixedLayout;
pub use tapered::TaperedLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 枢轴位置固定的三角形叶片。
    Fixed,
    /// 枢轴由约束链定位的三角形叶片。
    Constrained,
    /// 由约束定位、带垂直与重合约束的锥形梯形叶片。
    Tapered,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Fixed, Variant::Constrained, Variant::Tapered];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Fixed => "fixed",
            Variant::Constrained => "constrained",
            Variant::Tapered => "tapered",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|variant| variant.name() == wanted)
            .ok_or_else(|| EngineError::UnknownVariant(s.to_string()))
    }
}

/// 调用方未给出参数时使用的默认值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantDefaults {
    pub blade_count: u32,
    pub blade_angle: f64,
    pub dimensions: BladeDimensions,
}

/// 一种叶片布局：声明参数、按依赖顺序产生实体、再产生只引用已声明实体的约束。
pub trait BladeLayout: Send + Sync {
    fn variant(&self) -> Variant;

    fn defaults(&self) -> VariantDefaults;

    fn declare_parameters(&self, params: &MechanismParams, doc: &mut DocumentBuilder);

    fn emit_entities(&self, params: &MechanismParams, doc: &mut DocumentBuilder);

    fn emit_constraints(&self, params: &MechanismParams, doc: &mut DocumentBuilder);
}

/// 按参数→实体→约束的顺序跑完一次合成并交给组装器。
pub fn synthesize(
    layout: &dyn BladeLayout,
    params: &MechanismParams,
) -> Result<ConstraintDocument, EngineError> {
    let mut doc = DocumentBuilder::new();
    layout.declare_parameters(params, &mut doc);
    layout.emit_entities(params, &mut doc);
    debug!(
        variant = %layout.variant(),
        entities = doc.entities().len(),
        "实体生成完成"
    );
    layout.emit_constraints(params, &mut doc);
    debug!(
        variant = %layout.variant(),
        constraints = doc.constraints().len(),
        "约束生成完成"
    );
    assembler::assemble(doc, params)
}

/// 布局注册表，按变体分派。
pub struct LayoutRegistry {
    layouts: HashMap<Variant, Box<dyn BladeLayout>>,
}

impl LayoutRegistry {
    /// 注册全部内置布局。
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(FixedLayout);
        registry.register(ConstrainedLayout);
        registry.register(TaperedLayout);
        registry
    }

    pub fn empty() -> Self {
        Self {
            layouts: HashMap::new(),
        }
    }

    pub fn register<L: BladeLayout + 'static>(&mut self, layout: L) {
        self.layouts.insert(layout.variant(), Box::new(layout));
    }

    pub fn get(&self, variant: Variant) -> Result<&dyn BladeLayout, EngineError> {
        self.layouts
            .get(&variant)
            .map(|layout| layout.as_ref())
            .ok_or(EngineError::LayoutNotRegistered(variant))
    }

    pub fn available_variants(&self) -> impl Iterator<Item = Variant> + '_ {
        self.layouts.keys().copied()
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
