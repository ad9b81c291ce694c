use std::collections::{HashMap, HashSet};

use iris_core::document::{Constraint, ConstraintDocument, ConstraintKind, Entity};
use iris_core::ids::{self, BladeIndex, Role, blade_id};
use iris_engine::errors::ErrorKind;
use iris_engine::summary::DocumentSummary;
use iris_engine::{Generator, Variant};
use proptest::prelude::*;

fn variant_strategy() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::Fixed),
        Just(Variant::Constrained),
        Just(Variant::Tapered),
    ]
}

/// 每个实体或约束引用的标识都必须在实体列表中更早出现。
fn assert_forward_references(doc: &ConstraintDocument) {
    let position: HashMap<&str, usize> = doc
        .entities()
        .iter()
        .enumerate()
        .map(|(index, entity)| (entity.id(), index))
        .collect();
    assert_eq!(position.len(), doc.entities().len(), "duplicate entity ids");

    for (index, entity) in doc.entities().iter().enumerate() {
        for (reference, _) in entity.references() {
            let declared = position
                .get(reference)
                .unwrap_or_else(|| panic!("{} references unknown {reference}", entity.id()));
            assert!(*declared < index, "{} references later {reference}", entity.id());
        }
    }
    for constraint in doc.constraints() {
        for (reference, _) in constraint.references() {
            assert!(
                position.contains_key(reference),
                "{} references unknown {reference}",
                constraint.describe()
            );
        }
    }
}

fn spoke_role(variant: Variant) -> Role {
    match variant {
        Variant::Tapered => Role::Spoke,
        Variant::Fixed | Variant::Constrained => Role::Radial,
    }
}

proptest! {
    #[test]
    fn pivots_and_spokes_match_blade_count(
        variant in variant_strategy(),
        blades in 3u32..40,
        angle in -90.0f64..180.0,
    ) {
        let doc = Generator::new().generate(variant, blades, angle).unwrap();
        let declared: HashSet<&str> = doc.entities().iter().map(Entity::id).collect();

        let pivots = doc
            .entities()
            .iter()
            .filter(|e| e.id().starts_with("pivot") && e.id() != ids::PIVOT_CIRCLE)
            .count();
        prop_assert_eq!(pivots, blades as usize);

        for index in BladeIndex::all(blades) {
            prop_assert!(declared.contains(blade_id(Role::Pivot, index).as_str()));
            let spoke = blade_id(spoke_role(variant), index);
            match doc.entity(&spoke) {
                Some(Entity::Line { p1, p2, .. }) => {
                    prop_assert_eq!(p1.as_str(), ids::CENTER);
                    prop_assert_eq!(p2.clone(), blade_id(Role::Pivot, index));
                }
                other => prop_assert!(false, "missing spoke {}: {:?}", spoke, other),
            }
        }
    }

    #[test]
    fn references_only_point_backwards(
        variant in variant_strategy(),
        blades in 3u32..30,
        angle in 0.0f64..90.0,
    ) {
        let doc = Generator::new().generate(variant, blades, angle).unwrap();
        assert_forward_references(&doc);
    }

    #[test]
    fn symbolic_values_resolve_to_declared_parameters(
        variant in variant_strategy(),
        blades in 3u32..30,
        angle in 0.0f64..90.0,
    ) {
        let doc = Generator::new().generate(variant, blades, angle).unwrap();
        for constraint in doc.constraints() {
            if let Some(value) = constraint.value() {
                let resolved = value.resolve(doc.parameters());
                prop_assert!(resolved.is_some(), "{}", constraint.describe());
            }
        }
        prop_assert_eq!(doc.parameter("blade_angle"), Some(angle));
    }

    #[test]
    fn spoke_chain_sums_to_full_turn(
        variant in prop_oneof![Just(Variant::Constrained), Just(Variant::Tapered)],
        blades in 3u32..60,
        angle in 0.0f64..90.0,
    ) {
        let doc = Generator::new().generate(variant, blades, angle).unwrap();
        let summary = DocumentSummary::of(&doc);
        prop_assert!((summary.literal_angle_total - 360.0).abs() < 1e-9);

        let chain = doc
            .constraints()
            .iter()
            .filter(|c| c.kind() == ConstraintKind::Angle)
            .filter(|c| c.value().and_then(|v| v.as_literal()).is_some())
            .count();
        prop_assert_eq!(chain, blades as usize);
    }

    #[test]
    fn every_blade_shares_the_blade_angle_parameter(
        variant in variant_strategy(),
        blades in 3u32..30,
    ) {
        let doc = Generator::new().generate(variant, blades, 30.0).unwrap();
        let synchronized = doc
            .constraints()
            .iter()
            .filter(|c| c.value().and_then(|v| v.as_symbol()) == Some("blade_angle"))
            .count();
        prop_assert_eq!(synchronized, blades as usize);
    }

    #[test]
    fn below_three_blades_is_invalid(
        variant in variant_strategy(),
        blades in 0u32..3,
        angle in 0.0f64..90.0,
    ) {
        let err = Generator::new().generate(variant, blades, angle).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }
}

#[test]
fn tapered_eight_blade_scenario() {
    let doc = Generator::new().generate(Variant::Tapered, 8, 60.0).unwrap();
    let summary = DocumentSummary::of(&doc);

    let corner_roles = [Role::BaseLeft, Role::BaseRight, Role::TipLeft, Role::TipRight];
    let corners: usize = BladeIndex::all(8)
        .map(|index| {
            corner_roles
                .iter()
                .filter(|role| doc.entity(&blade_id(**role, index)).is_some())
                .count()
        })
        .sum();
    assert_eq!(corners, 32);
    assert_eq!(summary.count(ConstraintKind::Perpendicular), 16);

    let coincidence_targets: usize = doc
        .constraints()
        .iter()
        .map(|c| match c {
            Constraint::Coincident { of, .. } => of.len(),
            _ => 0,
        })
        .sum();
    assert_eq!(coincidence_targets, 16);
}

#[test]
fn fixed_six_blade_scenario() {
    let generator = Generator::new();
    let params = generator.params(Variant::Fixed, Some(6), Some(30.0)).unwrap();
    assert!((params.angle_step() - 60.0).abs() < f64::EPSILON);

    let doc = generator.generate_with(Variant::Fixed, &params).unwrap();
    let summary = DocumentSummary::of(&doc);
    let fixed_pivots = doc
        .constraints()
        .iter()
        .filter(|c| matches!(c, Constraint::Fixed { entity } if entity.starts_with("pivot")))
        .count();
    assert_eq!(fixed_pivots, 6);
    assert_eq!(summary.count(ConstraintKind::Distance), 6);
    assert_eq!(summary.count(ConstraintKind::Angle), 6);
}

#[test]
fn minimum_blade_count_is_accepted() {
    for variant in Variant::ALL {
        let doc = Generator::new().generate(variant, 3, 30.0).unwrap();
        assert_forward_references(&doc);
    }
}

#[test]
fn fixed_layout_states_no_spoke_chain() {
    for blades in 3..40 {
        let doc = Generator::new().generate(Variant::Fixed, blades, 30.0).unwrap();
        let summary = DocumentSummary::of(&doc);
        let literal_angles = doc
            .constraints()
            .iter()
            .filter(|c| c.kind() == ConstraintKind::Angle)
            .filter(|c| c.value().and_then(|v| v.as_literal()).is_some())
            .count();
        assert_eq!(literal_angles, 0, "{blades} blades");
        assert_eq!(summary.literal_angle_total, 0.0);
    }
}

#[test]
fn emitted_entities_match_their_role_kind() {
    for variant in Variant::ALL {
        let doc = Generator::new().generate(variant, 5, 30.0).unwrap();
        let mut matched = 0;
        for index in BladeIndex::all(5) {
            for role in Role::ALL {
                if let Some(entity) = doc.entity(&blade_id(role, index)) {
                    assert_eq!(entity.kind(), role.kind(), "{variant}: {}", entity.id());
                    matched += 1;
                }
            }
        }
        assert!(matched >= 5 * 4, "{variant} emitted only {matched} blade entities");
    }
}
