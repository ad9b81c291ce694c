use std::collections::HashMap;

use thiserror::Error;

use crate::document::{Constraint, Entity, EntityKind, Parameters};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("标识 `{0}` 重复声明")]
    DuplicateIdentifier(String),
    #[error("`{owner}` 引用了尚未声明的{expected}实体 `{reference}`")]
    DanglingReference {
        owner: String,
        reference: String,
        expected: EntityKind,
    },
    #[error("`{owner}` 期望 `{reference}` 为{expected}，实际为{found}")]
    KindMismatch {
        owner: String,
        reference: String,
        expected: EntityKind,
        found: EntityKind,
    },
    #[error("`{owner}` 引用了未声明的参数 `${name}`")]
    UndeclaredParameter { owner: String, name: String },
    #[error("`{owner}` 的重合约束没有目标直线")]
    EmptyCoincidence { owner: String },
    #[error("实体标识不能为空")]
    EmptyIdentifier,
}

/// 逐项检查文档不变量：
/// 标识唯一；实体只引用排在它之前的实体；约束只引用已声明实体且类型匹配；
/// 每个 `$` 引用都能在参数表中找到。
pub fn validate(
    parameters: &Parameters,
    entities: &[Entity],
    constraints: &[Constraint],
) -> Result<(), ValidationError> {
    let mut declared: HashMap<&str, EntityKind> = HashMap::with_capacity(entities.len());

    for entity in entities {
        let id = entity.id();
        if id.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        check_references(id, entity.references(), &declared)?;
        if declared.insert(id, entity.kind()).is_some() {
            return Err(ValidationError::DuplicateIdentifier(id.to_string()));
        }
    }

    for constraint in constraints {
        let owner = constraint.describe();
        if let Constraint::Coincident { of, .. } = constraint {
            if of.is_empty() {
                return Err(ValidationError::EmptyCoincidence { owner });
            }
        }
        check_references(&owner, constraint.references(), &declared)?;
        if let Some(name) = constraint.value().and_then(|value| value.as_symbol()) {
            if !parameters.contains_key(name) {
                return Err(ValidationError::UndeclaredParameter {
                    owner,
                    name: name.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn check_references(
    owner: &str,
    references: Vec<(&str, EntityKind)>,
    declared: &HashMap<&str, EntityKind>,
) -> Result<(), ValidationError> {
    for (reference, expected) in references {
        match declared.get(reference) {
            None => {
                return Err(ValidationError::DanglingReference {
                    owner: owner.to_string(),
                    reference: reference.to_string(),
                    expected,
                });
            }
            Some(found) if *found != expected => {
                return Err(ValidationError::KindMismatch {
                    owner: owner.to_string(),
                    reference: reference.to_string(),
                    expected,
                    found: *found,
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ParamValue;
    use crate::geometry::Point3;

    fn base_entities() -> Vec<Entity> {
        vec![
            Entity::point("center", Point3::ORIGIN),
            Entity::point("pivot1", Point3::new(60.0, 0.0, 0.0)),
            Entity::line("radial1", "center", "pivot1"),
        ]
    }

    #[test]
    fn accepts_well_ordered_document() {
        let constraints = vec![Constraint::fixed("center"), Constraint::horizontal("radial1")];
        assert_eq!(validate(&Parameters::new(), &base_entities(), &constraints), Ok(()));
    }

    #[test]
    fn rejects_duplicate_identifiers() {
        let mut entities = base_entities();
        entities.push(Entity::point("pivot1", Point3::ORIGIN));
        let err = validate(&Parameters::new(), &entities, &[]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateIdentifier("pivot1".to_string()));
    }

    #[test]
    fn rejects_forward_references_between_entities() {
        let entities = vec![
            Entity::point("center", Point3::ORIGIN),
            Entity::line("radial1", "center", "pivot1"),
            Entity::point("pivot1", Point3::new(60.0, 0.0, 0.0)),
        ];
        let err = validate(&Parameters::new(), &entities, &[]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::DanglingReference { ref owner, ref reference, .. }
                if owner == "radial1" && reference == "pivot1"
        ));
    }

    #[test]
    fn rejects_constraints_on_unknown_or_mismatched_entities() {
        let entities = base_entities();
        let err =
            validate(&Parameters::new(), &entities, &[Constraint::fixed("pivot9")]).unwrap_err();
        assert!(matches!(err, ValidationError::DanglingReference { .. }));

        let err = validate(
            &Parameters::new(),
            &entities,
            &[Constraint::horizontal("pivot1")],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::KindMismatch {
                expected: EntityKind::Line,
                found: EntityKind::Point,
                ..
            }
        ));
    }

    #[test]
    fn rejects_undeclared_symbolic_parameters() {
        let constraints = vec![Constraint::distance(
            "center",
            "pivot1",
            ParamValue::symbol("pivot_radius"),
        )];
        let err = validate(&Parameters::new(), &base_entities(), &constraints).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::UndeclaredParameter { ref name, .. } if name == "pivot_radius"
        ));

        let mut parameters = Parameters::new();
        parameters.insert("pivot_radius".to_string(), 60.0);
        assert!(validate(&parameters, &base_entities(), &constraints).is_ok());
    }

    #[test]
    fn rejects_empty_coincidence_targets() {
        let constraints = vec![Constraint::coincident("pivot1", Vec::new())];
        let err = validate(&Parameters::new(), &base_entities(), &constraints).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyCoincidence { .. }));
    }
}
