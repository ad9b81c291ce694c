use iris_core::document::{Constraint, ParamValue};
use iris_core::geometry::Point3;
use iris_core::ids::{self, BladeIndex, Role, blade_id};
use tracing::warn;

use super::{BladeLayout, Variant, VariantDefaults};
use crate::builder::DocumentBuilder;
use crate::params::{
    BLADE_ANGLE, BLADE_BASE_WIDTH, BLADE_LENGTH, BLADE_TIP_WIDTH, BladeDimensions,
    MechanismParams, PIVOT_RADIUS,
};

pub const DEFAULT_BASE_WIDTH: f64 = 45.0;
pub const DEFAULT_TIP_WIDTH: f64 = 15.0;

/// 叶尖与四个角点共用的占位初值，没有几何含义。
const PLACEHOLDER_SEED: Point3 = Point3::new(1.0, 1.0, 0.0);

/// 锥形梯形叶片。
///
/// 每片叶片由中心线和四个角点构成。角点只有占位初值，
/// 由以下四组约束共同确定形状：枢轴落在底边上、叶尖落在顶边上、
/// 底边与顶边都垂直于中心线、底边与顶边各有固定宽度（顶边更窄即为锥度）。
/// 去掉任意一组，角点位置都会不唯一。
#[derive(Debug, Clone, Copy, Default)]
pub struct TaperedLayout;

impl TaperedLayout {
    fn widths(params: &MechanismParams) -> (f64, f64) {
        let dims = params.dimensions();
        (
            dims.base_width.unwrap_or(DEFAULT_BASE_WIDTH),
            dims.tip_width.unwrap_or(DEFAULT_TIP_WIDTH),
        )
    }

    fn emit_blade_entities(index: BladeIndex, pivot_seed: Point3, doc: &mut DocumentBuilder) {
        let id = |role| blade_id(role, index);

        doc.point(id(Role::Pivot), pivot_seed);
        doc.line(id(Role::Spoke), ids::CENTER, id(Role::Pivot));

        doc.point(id(Role::Tip), PLACEHOLDER_SEED);
        doc.line(id(Role::Centerline), id(Role::Pivot), id(Role::Tip));

        doc.point(id(Role::BaseLeft), PLACEHOLDER_SEED);
        doc.point(id(Role::BaseRight), PLACEHOLDER_SEED);
        doc.line(id(Role::BaseEdge), id(Role::BaseLeft), id(Role::BaseRight));

        doc.point(id(Role::TipLeft), PLACEHOLDER_SEED);
        doc.point(id(Role::TipRight), PLACEHOLDER_SEED);
        doc.line(id(Role::TipEdge), id(Role::TipLeft), id(Role::TipRight));

        doc.line(id(Role::LeftEdge), id(Role::BaseLeft), id(Role::TipLeft));
        doc.line(id(Role::RightEdge), id(Role::BaseRight), id(Role::TipRight));
    }
}

impl BladeLayout for TaperedLayout {
    fn variant(&self) -> Variant {
        Variant::Tapered
    }

    fn defaults(&self) -> VariantDefaults {
        VariantDefaults {
            blade_count: 8,
            blade_angle: 60.0,
            dimensions: BladeDimensions::tapered(
                120.0,
                100.0,
                DEFAULT_BASE_WIDTH,
                DEFAULT_TIP_WIDTH,
            ),
        }
    }

    fn declare_parameters(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        let (base_width, tip_width) = Self::widths(params);
        if tip_width >= base_width {
            warn!(base_width, tip_width, "顶边不窄于底边，叶片没有锥度");
        }
        doc.declare(PIVOT_RADIUS, params.pivot_radius());
        doc.declare(BLADE_LENGTH, params.blade_length());
        doc.declare(BLADE_ANGLE, params.blade_angle());
        doc.declare(BLADE_BASE_WIDTH, base_width);
        doc.declare(BLADE_TIP_WIDTH, tip_width);
    }

    fn emit_entities(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        doc.point(ids::CENTER, Point3::ORIGIN);
        for index in params.blade_indices() {
            let pivot_seed = Point3::from_polar(params.pivot_radius(), params.spoke_angle(index));
            Self::emit_blade_entities(index, pivot_seed, doc);
        }
    }

    fn emit_constraints(&self, params: &MechanismParams, doc: &mut DocumentBuilder) {
        let count = params.blade_count();
        doc.push_constraint(Constraint::fixed(ids::CENTER));
        doc.push_constraint(Constraint::fixed(blade_id(Role::Pivot, BladeIndex::FIRST)));

        for index in params.blade_indices() {
            let id = |role| blade_id(role, index);

            if !index.is_first() {
                doc.push_constraint(Constraint::distance(
                    ids::CENTER,
                    id(Role::Pivot),
                    ParamValue::symbol(PIVOT_RADIUS),
                ));
                doc.push_constraint(Constraint::angle(
                    blade_id(Role::Spoke, index.prev(count)),
                    id(Role::Spoke),
                    ParamValue::literal(params.angle_step()),
                ));
            }

            doc.push_constraint(Constraint::distance(
                id(Role::Pivot),
                id(Role::Tip),
                ParamValue::symbol(BLADE_LENGTH),
            ));
            doc.push_constraint(Constraint::angle(
                id(Role::Spoke),
                id(Role::Centerline),
                ParamValue::symbol(BLADE_ANGLE),
            ));

            // 枢轴落在底边上（不是角点），叶尖落在顶边上。
            doc.push_constraint(Constraint::coincident(id(Role::Pivot), vec![id(Role::BaseEdge)]));
            doc.push_constraint(Constraint::coincident(id(Role::Tip), vec![id(Role::TipEdge)]));

            doc.push_constraint(Constraint::distance(
                id(Role::BaseLeft),
                id(Role::BaseRight),
                ParamValue::symbol(BLADE_BASE_WIDTH),
            ));
            doc.push_constraint(Constraint::distance(
                id(Role::TipLeft),
                id(Role::TipRight),
                ParamValue::symbol(BLADE_TIP_WIDTH),
            ));

            doc.push_constraint(Constraint::perpendicular(
                id(Role::Centerline),
                id(Role::BaseEdge),
            ));
            doc.push_constraint(Constraint::perpendicular(
                id(Role::Centerline),
                id(Role::TipEdge),
            ));
        }

        let last = params.last_index();
        doc.push_constraint(Constraint::angle(
            blade_id(Role::Spoke, last),
            blade_id(Role::Spoke, last.next(count)),
            ParamValue::literal(params.angle_step()),
        ));
    }
}
