use iris_core::document::ConstraintDocument;
use tracing::info;

use crate::errors::EngineError;
use crate::layout::{LayoutRegistry, Variant, VariantDefaults, synthesize};
use crate::params::{DimensionOverrides, EmpiricalConstants, MechanismParams};

/// 对外入口：选择布局、补全参数、合成文档。
///
/// 不持有任何跨调用的可变状态，同样的输入总是得到结构相同的文档。
pub struct Generator {
    registry: LayoutRegistry,
    constants: EmpiricalConstants,
    overrides: DimensionOverrides,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            registry: LayoutRegistry::new(),
            constants: EmpiricalConstants::default(),
            overrides: DimensionOverrides::default(),
        }
    }

    pub fn with_constants(mut self, constants: EmpiricalConstants) -> Self {
        self.constants = constants;
        self
    }

    /// 覆盖所有布局的默认尺寸。
    pub fn with_overrides(mut self, overrides: DimensionOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn defaults(&self, variant: Variant) -> Result<VariantDefaults, EngineError> {
        Ok(self.registry.get(variant)?.defaults())
    }

    /// 未指定的叶片数量与角度取布局默认值；叶片数量不足时报错。
    pub fn params(
        &self,
        variant: Variant,
        blade_count: Option<u32>,
        blade_angle: Option<f64>,
    ) -> Result<MechanismParams, EngineError> {
        let defaults = self.defaults(variant)?;
        let params = MechanismParams::new(
            blade_count.unwrap_or(defaults.blade_count),
            blade_angle.unwrap_or(defaults.blade_angle),
            defaults.dimensions.with_overrides(&self.overrides),
        )?;
        Ok(params.with_constants(self.constants))
    }

    pub fn generate(
        &self,
        variant: Variant,
        blade_count: u32,
        blade_angle: f64,
    ) -> Result<ConstraintDocument, EngineError> {
        let params = self.params(variant, Some(blade_count), Some(blade_angle))?;
        self.generate_with(variant, &params)
    }

    pub fn generate_with(
        &self,
        variant: Variant,
        params: &MechanismParams,
    ) -> Result<ConstraintDocument, EngineError> {
        info!(
            %variant,
            blade_count = params.blade_count(),
            blade_angle = params.blade_angle(),
            angle_step = params.angle_step(),
            "合成虹膜约束文档"
        );
        let layout = self.registry.get(variant)?;
        synthesize(layout, params)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn defaults_fill_missing_arguments() {
        let generator = Generator::new();
        let params = generator.params(Variant::Fixed, None, None).unwrap();
        assert_eq!(params.blade_count(), 6);
        assert!((params.blade_angle() - 30.0).abs() < f64::EPSILON);
        assert!((params.angle_step() - 60.0).abs() < f64::EPSILON);

        let tapered = generator.params(Variant::Tapered, None, Some(40.0)).unwrap();
        assert_eq!(tapered.blade_count(), 8);
        assert!((tapered.pivot_radius() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn two_blades_are_rejected_for_every_variant() {
        let generator = Generator::new();
        for variant in Variant::ALL {
            for blades in [0, 2] {
                let err = generator.generate(variant, blades, 30.0).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidParameter);
            }
            assert!(generator.generate(variant, 3, 30.0).is_ok());
        }
    }

    #[test]
    fn overrides_reach_declared_parameters() {
        let generator = Generator::new().with_overrides(DimensionOverrides {
            pivot_radius: Some(75.0),
            ..DimensionOverrides::default()
        });
        let doc = generator.generate(Variant::Constrained, 6, 30.0).unwrap();
        assert_eq!(doc.parameter("pivot_radius"), Some(75.0));
        assert_eq!(doc.parameter("blade_length"), Some(50.0));
    }

    #[test]
    fn repeated_generation_is_structurally_identical() {
        let generator = Generator::new();
        for variant in Variant::ALL {
            let first = generator.generate(variant, 7, 42.5).unwrap();
            let second = generator.generate(variant, 7, 42.5).unwrap();
            assert_eq!(first, second);
        }
    }
}
