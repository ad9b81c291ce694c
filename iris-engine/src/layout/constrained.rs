use iris_core::document::{Constraint, ParamValue};
use iris_core::geometry::Point3;
use iris_core::ids::{self, Role, blade_id};

use super::{BladeLayout, Variant, VariantDefaults};
use crate::builder::DocumentBuilder;
use crate::params::{
    BLADE_ANGLE, BLADE_LENGTH, BladeDimensions, MechanismParams, NUM_BLADES, PIVOT_RADIUS,
};

/// 第一片叶尖相对第一枢轴的初值偏移。
const FIRST_TIP_SEED_OFFSET: (f64, f64) = (30.0, 20.0);
/// 其余枢轴的初值放在 `(r/2, r/2)`，不代表真实位置。
const TRAILING_PIVOT_SEED_FACTOR: f64 = 0.5;
/// 其余叶尖的初值。
const TRAILING_TIP_SEED: (f64, f64) = (30.0, 30.0);

/// 由约束链定位枢轴的三角形叶片。
///
/// 只有第一条径向线被约束为水平，以此消除整体旋转自由度；其余枢轴只给出任意初值，
/// 真实位置完全由距离约束与相邻径向线之间的角度链决定。
/// 叶尖由叶片角与光圈圆共同确定，因此不再约束叶片长度。
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstrainedLayout;

impl BladeLayout for ConstrainedLayout {
    fn variant(&self) -> Variant {
        Variant::Constrained
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
        doc.declare(NUM_BLADES, f64::from(params.blade_count()));
    }

    fn emit_entities(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        let radius = params.pivot_radius();
        doc.point(ids::CENTER, Point3::ORIGIN);
        doc.circle(ids::PIVOT_CIRCLE, Point3::ORIGIN, radius * 2.0);

        for index in params.blade_indices() {
            let (pivot_seed, tip_seed) = if index.is_first() {
                (
                    Point3::new(radius, 0.0, 0.0),
                    Point3::new(
                        radius + FIRST_TIP_SEED_OFFSET.0,
                        FIRST_TIP_SEED_OFFSET.1,
                        0.0,
                    ),
                )
            } else {
                let half = radius * TRAILING_PIVOT_SEED_FACTOR;
                (
                    Point3::new(half, half, 0.0),
                    Point3::new(TRAILING_TIP_SEED.0, TRAILING_TIP_SEED.1, 0.0),
                )
            };

            let pivot_id = blade_id(Role::Pivot, index);
            let tip_id = blade_id(Role::Tip, index);
            doc.point(pivot_id.clone(), pivot_seed);
            doc.line(blade_id(Role::Radial, index), ids::CENTER, pivot_id.clone());
            doc.point(tip_id.clone(), tip_seed);
            doc.line(blade_id(Role::Blade, index), pivot_id, tip_id);
        }

        doc.circle(ids::APERTURE, Point3::ORIGIN, params.aperture_diameter());
    }

    fn emit_constraints(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        let count = params.blade_count();
        doc.push_constraint(Constraint::fixed(ids::CENTER));

        for index in params.blade_indices() {
            if index.is_first() {
                doc.push_constraint(Constraint::horizontal(blade_id(Role::Radial, index)));
            }
            doc.push_constraint(Constraint::distance(
                ids::CENTER,
                blade_id(Role::Pivot, index),
                ParamValue::symbol(PIVOT_RADIUS),
            ));
            if !index.is_first() {
                doc.push_constraint(Constraint::angle(
                    blade_id(Role::Radial, index.prev(count)),
                    blade_id(Role::Radial, index),
                    ParamValue::literal(params.angle_step()),
                ));
            }
            doc.push_constraint(Constraint::angle(
                blade_id(Role::Radial, index),
                blade_id(Role::Blade, index),
                ParamValue::symbol(BLADE_ANGLE),
            ));
        }

        let last = params.last_index();
        doc.push_constraint(Constraint::angle(
            blade_id(Role::Radial, last),
            blade_id(Role::Radial, last.next(count)),
            ParamValue::literal(params.angle_step()),
        ));

        for index in params.blade_indices() {
            doc.push_constraint(Constraint::point_on_circle(
                blade_id(Role::Tip, index),
                ids::APERTURE,
            ));
        }
    }
}
