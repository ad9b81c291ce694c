use std::collections::BTreeMap;

use iris_core::document::{ConstraintDocument, ConstraintKind, Entity};

/// 文档概览：按类型统计实体与约束数量。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSummary {
    pub points: usize,
    pub lines: usize,
    pub circles: usize,
    pub constraints: BTreeMap<ConstraintKind, usize>,
    /// 所有字面量角度约束之和。三种布局中字面量角度只出现在相邻径向线之间，
    /// 闭合的角度链总和应为 360。
    pub literal_angle_total: f64,
}

impl DocumentSummary {
    pub fn of(document: &ConstraintDocument) -> Self {
        let mut summary = DocumentSummary::default();
        for entity in document.entities() {
            match entity {
                Entity::Point { .. } => summary.points += 1,
                Entity::Line { .. } => summary.lines += 1,
                Entity::Circle { .. } => summary.circles += 1,
            }
        }
        for constraint in document.constraints() {
            *summary.constraints.entry(constraint.kind()).or_default() += 1;
            if constraint.kind() == ConstraintKind::Angle {
                if let Some(step) = constraint.value().and_then(|value| value.as_literal()) {
                    summary.literal_angle_total += step;
                }
            }
        }
        summary
    }

    #[inline]
    pub fn count(&self, kind: ConstraintKind) -> usize {
        self.constraints.get(&kind).copied().unwrap_or(0)
    }

    #[inline]
    pub fn entity_total(&self) -> usize {
        self.points + self.lines + self.circles
    }

    pub fn constraint_total(&self) -> usize {
        self.constraints.values().sum()
    }
}
