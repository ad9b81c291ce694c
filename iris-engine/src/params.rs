use iris_core::ids::BladeIndex;

use crate::errors::EngineError;

/// 少于三片叶片的"光圈"没有有意义的旋转对称性。
pub const MIN_BLADES: u32 = 3;

/// 光圈直径系数：`diameter = 2 · cos(blade_angle) · blade_length · scale`。经验值。
pub const DEFAULT_APERTURE_SCALE: f64 = 0.8;
/// 固定枢轴变体中叶尖初值沿叶片方向的比例。经验值。
pub const DEFAULT_SEED_TIP_SCALE: f64 = 0.7;

pub const PIVOT_RADIUS: &str = "pivot_radius";
pub const BLADE_LENGTH: &str = "blade_length";
pub const BLADE_ANGLE: &str = "blade_angle";
pub const APERTURE_SIZE: &str = "aperture_size";
pub const NUM_BLADES: &str = "num_blades";
pub const BLADE_BASE_WIDTH: &str = "blade_base_width";
pub const BLADE_TIP_WIDTH: &str = "blade_tip_width";

/// 叶片几何尺寸（毫米）。梯形宽度只对锥形叶片有意义。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeDimensions {
    pub pivot_radius: f64,
    pub blade_length: f64,
    pub base_width: Option<f64>,
    pub tip_width: Option<f64>,
}

impl BladeDimensions {
    /// 三角形叶片只需要枢轴半径和叶片长度。
    pub fn triangular(pivot_radius: f64, blade_length: f64) -> Self {
        Self {
            pivot_radius,
            blade_length,
            base_width: None,
            tip_width: None,
        }
    }

    pub fn tapered(pivot_radius: f64, blade_length: f64, base_width: f64, tip_width: f64) -> Self {
        Self {
            pivot_radius,
            blade_length,
            base_width: Some(base_width),
            tip_width: Some(tip_width),
        }
    }

    /// 用覆盖值替换对应尺寸，未指定的保持不变。
    pub fn with_overrides(self, overrides: &DimensionOverrides) -> Self {
        Self {
            pivot_radius: overrides.pivot_radius.unwrap_or(self.pivot_radius),
            blade_length: overrides.blade_length.unwrap_or(self.blade_length),
            base_width: overrides.base_width.or(self.base_width),
            tip_width: overrides.tip_width.or(self.tip_width),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionOverrides {
    pub pivot_radius: Option<f64>,
    pub blade_length: Option<f64>,
    pub base_width: Option<f64>,
    pub tip_width: Option<f64>,
}

/// 原生成器中没有几何推导的经验常数，统一放在这里以便配置。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalConstants {
    pub aperture_scale: f64,
    pub seed_tip_scale: f64,
}

impl Default for EmpiricalConstants {
    fn default() -> Self {
        Self {
            aperture_scale: DEFAULT_APERTURE_SCALE,
            seed_tip_scale: DEFAULT_SEED_TIP_SCALE,
        }
    }
}

/// 一次合成所需的全部参数。叶片数量在构造时校验，角度不做任何限制。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MechanismParams {
    blade_count: u32,
    blade_angle: f64,
    dimensions: BladeDimensions,
    constants: EmpiricalConstants,
}

impl MechanismParams {
    pub fn new(
        blade_count: u32,
        blade_angle: f64,
        dimensions: BladeDimensions,
    ) -> Result<Self, EngineError> {
        if blade_count < MIN_BLADES {
            return Err(EngineError::InvalidBladeCount {
                requested: blade_count,
                minimum: MIN_BLADES,
            });
        }
        Ok(Self {
            blade_count,
            blade_angle,
            dimensions,
            constants: EmpiricalConstants::default(),
        })
    }

    pub fn with_constants(mut self, constants: EmpiricalConstants) -> Self {
        self.constants = constants;
        self
    }

    #[inline]
    pub fn blade_count(&self) -> u32 {
        self.blade_count
    }

    /// 叶片相对径向线的夹角（度）。
    #[inline]
    pub fn blade_angle(&self) -> f64 {
        self.blade_angle
    }

    #[inline]
    pub fn dimensions(&self) -> &BladeDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn constants(&self) -> &EmpiricalConstants {
        &self.constants
    }

    #[inline]
    pub fn pivot_radius(&self) -> f64 {
        self.dimensions.pivot_radius
    }

    #[inline]
    pub fn blade_length(&self) -> f64 {
        self.dimensions.blade_length
    }

    /// 相邻枢轴之间的角度间隔：`360 / n`。
    #[inline]
    pub fn angle_step(&self) -> f64 {
        360.0 / f64::from(self.blade_count)
    }

    /// 第 `i` 片叶片径向线的初值方向，第一片沿 +X 轴。
    #[inline]
    pub fn spoke_angle(&self, index: BladeIndex) -> f64 {
        f64::from(index.get() - 1) * self.angle_step()
    }

    /// 光圈半径：`cos(blade_angle) · blade_length · aperture_scale`。
    pub fn aperture_radius(&self) -> f64 {
        self.blade_angle.to_radians().cos() * self.blade_length() * self.constants.aperture_scale
    }

    #[inline]
    pub fn aperture_diameter(&self) -> f64 {
        self.aperture_radius() * 2.0
    }

    pub fn blade_indices(&self) -> impl Iterator<Item = BladeIndex> {
        BladeIndex::all(self.blade_count)
    }

    /// 最后一片叶片的编号，闭合约束以它为起点。
    pub fn last_index(&self) -> BladeIndex {
        BladeIndex::new(self.blade_count).unwrap_or(BladeIndex::FIRST)
    }
}
