use iris_core::document::{Constraint, ParamValue};
use iris_core::geometry::Point3;
use iris_core::ids::{self, Role, blade_id};

use super::{BladeLayout, Variant, VariantDefaults};
use crate::builder::DocumentBuilder;
use crate::params::{
    APERTURE_SIZE, BLADE_ANGLE, BLADE_LENGTH, BladeDimensions, MechanismParams, PIVOT_RADIUS,
};

/// 枢轴位置固定的三角形叶片。
///
/// 枢轴和叶尖按圆周均布给出初值，每个枢轴再加 `fixed` 约束，
/// 因此只有叶片角参数可以变化，径向线的角度被冻结。
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLayout;

impl BladeLayout for FixedLayout {
    fn variant(&self) -> Variant {
        Variant::Fixed
    }

    fn defaults(&self) -> VariantDefaults {
        VariantDefaults {
            blade_count: 6,
            blade_angle: 30.0,
            dimensions: BladeDimensions::triangular(60.0, 50.0),
        }
    }

    fn declare_parameters(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        doc.declare(PIVOT_RADIUS, params.pivot_radius());
        doc.declare(BLADE_LENGTH, params.blade_length());
        doc.declare(BLADE_ANGLE, params.blade_angle());
        doc.declare(APERTURE_SIZE, params.aperture_radius());
    }

    fn emit_entities(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        doc.point(ids::CENTER, Point3::ORIGIN);
        doc.circle(ids::PIVOT_CIRCLE, Point3::ORIGIN, params.pivot_radius() * 2.0);
        doc.circle(ids::APERTURE_GUIDE, Point3::ORIGIN, params.aperture_diameter());

        let tip_reach = params.blade_length() * params.constants().seed_tip_scale;
        for index in params.blade_indices() {
            let spoke_angle = params.spoke_angle(index);
            let pivot = Point3::from_polar(params.pivot_radius(), spoke_angle);
            let tip = pivot.offset_polar(tip_reach, spoke_angle + params.blade_angle());

            let pivot_id = blade_id(Role::Pivot, index);
            let tip_id = blade_id(Role::Tip, index);
            doc.point(pivot_id.clone(), pivot);
            doc.line(blade_id(Role::Radial, index), ids::CENTER, pivot_id.clone());
            doc.point(tip_id.clone(), tip);
            doc.line(blade_id(Role::Blade, index), pivot_id, tip_id);
        }
    }

    fn emit_constraints(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        doc.push_constraint(Constraint::fixed(ids::CENTER));
        for index in params.blade_indices() {
            doc.push_constraint(Constraint::fixed(blade_id(Role::Pivot, index)));
            doc.push_constraint(Constraint::distance(
                blade_id(Role::Pivot, index),
                blade_id(Role::Tip, index),
                ParamValue::symbol(BLADE_LENGTH),
            ));
            doc.push_constraint(Constraint::angle(
                blade_id(Role::Radial, index),
                blade_id(Role::Blade, index),
                ParamValue::symbol(BLADE_ANGLE),
            ));
        }
    }
}
