use iris_core::document::{Constraint, Entity, Parameters};
use iris_core::geometry::Point3;

/// 一次合成过程中累积参数、实体与约束的构建器。
///
/// 只追加不修改；完成后整体交给 [`crate::assembler::assemble`] 校验并冻结为文档。
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    parameters: Parameters,
    entities: Vec<Entity>,
    constraints: Vec<Constraint>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: &str, value: f64) {
        self.parameters.insert(name.to_string(), value);
    }

    pub fn push_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    #[inline]
    pub fn point(&mut self, id: impl Into<String>, at: Point3) {
        self.push_entity(Entity::point(id, at));
    }

    #[inline]
    pub fn line(&mut self, id: impl Into<String>, p1: impl Into<String>, p2: impl Into<String>) {
        self.push_entity(Entity::line(id, p1, p2));
    }

    #[inline]
    pub fn circle(&mut self, id: impl Into<String>, center: Point3, diameter: f64) {
        self.push_entity(Entity::circle(id, center, diameter));
    }

    pub fn push_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    #[inline]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn into_parts(self) -> (Parameters, Vec<Entity>, Vec<Constraint>) {
        (self.parameters, self.entities, self.constraints)
    }
}
