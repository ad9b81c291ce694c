pub mod ids;
pub mod validate;

pub mod geometry {
    use glam::DVec3;
    use serde::{Deserialize, Serialize};

    /// 三维点，序列化为 `[x, y, z]`。虹膜文档只在 z = 0 平面内布置实体。
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct Point3(pub DVec3);

    impl Point3 {
        pub const ORIGIN: Point3 = Point3(DVec3::ZERO);

        #[inline]
        pub const fn new(x: f64, y: f64, z: f64) -> Self {
            Self(DVec3::new(x, y, z))
        }

        /// 平面极坐标构造，角度以度为单位，从 +X 轴逆时针计。
        #[inline]
        pub fn from_polar(radius: f64, degrees: f64) -> Self {
            let radians = degrees.to_radians();
            Self::new(radians.cos() * radius, radians.sin() * radius, 0.0)
        }

        /// 沿给定方向（度）平移一段距离。
        #[inline]
        pub fn offset_polar(self, distance: f64, degrees: f64) -> Self {
            Self(self.0 + Self::from_polar(distance, degrees).0)
        }

        #[inline]
        pub fn x(self) -> f64 {
            self.0.x
        }

        #[inline]
        pub fn y(self) -> f64 {
            self.0.y
        }

        #[inline]
        pub fn z(self) -> f64 {
            self.0.z
        }
    }

    impl Default for Point3 {
        fn default() -> Self {
            Self::ORIGIN
        }
    }
}

pub mod document {
    use std::collections::BTreeMap;
    use std::fmt;

    use serde::{Deserialize, Serialize};

    use crate::geometry::Point3;
    use crate::validate::{ValidationError, validate};

    /// 当前生成器输出的格式标记。
    pub const SCHEMA: &str = "slvs-json/1";
    /// 线性单位：毫米。
    pub const UNITS: &str = "mm";
    /// 约束字段中引用命名参数的前缀。
    pub const PARAMETER_SIGIL: char = '$';

    /// 参数表：名称到数值字面量的映射，按名称排序以保证输出稳定。
    pub type Parameters = BTreeMap<String, f64>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum EntityKind {
        Point,
        Line,
        Circle,
    }

    impl EntityKind {
        pub fn as_str(self) -> &'static str {
            match self {
                EntityKind::Point => "point",
                EntityKind::Line => "line",
                EntityKind::Circle => "circle",
            }
        }
    }

    impl fmt::Display for EntityKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// 约束数值：字面量，或以 `$` 开头的命名参数引用。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(try_from = "RawParamValue", into = "RawParamValue")]
    pub enum ParamValue {
        Literal(f64),
        Symbol(String),
    }

    impl ParamValue {
        #[inline]
        pub fn literal(value: f64) -> Self {
            ParamValue::Literal(value)
        }

        /// 引用参数表中的命名参数。传入名称不含前缀。
        #[inline]
        pub fn symbol(name: impl Into<String>) -> Self {
            ParamValue::Symbol(name.into())
        }

        #[inline]
        pub fn as_literal(&self) -> Option<f64> {
            match self {
                ParamValue::Literal(value) => Some(*value),
                ParamValue::Symbol(_) => None,
            }
        }

        #[inline]
        pub fn as_symbol(&self) -> Option<&str> {
            match self {
                ParamValue::Symbol(name) => Some(name),
                ParamValue::Literal(_) => None,
            }
        }

        /// 在给定参数表下求值；未声明的参数返回 `None`。
        pub fn resolve(&self, parameters: &Parameters) -> Option<f64> {
            match self {
                ParamValue::Literal(value) => Some(*value),
                ParamValue::Symbol(name) => parameters.get(name).copied(),
            }
        }
    }

    impl fmt::Display for ParamValue {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                ParamValue::Literal(value) => write!(f, "{value}"),
                ParamValue::Symbol(name) => write!(f, "{PARAMETER_SIGIL}{name}"),
            }
        }
    }

    /// JSON 中的原始形态：数字为字面量，字符串必须带 `$` 前缀。
    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(untagged)]
    enum RawParamValue {
        Number(f64),
        Text(String),
    }

    impl TryFrom<RawParamValue> for ParamValue {
        type Error = String;

        fn try_from(raw: RawParamValue) -> Result<Self, Self::Error> {
            match raw {
                RawParamValue::Number(value) => Ok(ParamValue::Literal(value)),
                RawParamValue::Text(text) => match text.strip_prefix(PARAMETER_SIGIL) {
                    Some(name) if !name.is_empty() => Ok(ParamValue::Symbol(name.to_string())),
                    _ => Err(format!(
                        "参数引用 `{text}` 必须以 `{PARAMETER_SIGIL}` 开头并带有名称"
                    )),
                },
            }
        }
    }

    impl From<ParamValue> for RawParamValue {
        fn from(value: ParamValue) -> Self {
            match value {
                ParamValue::Literal(number) => RawParamValue::Number(number),
                ParamValue::Symbol(name) => RawParamValue::Text(format!("{PARAMETER_SIGIL}{name}")),
            }
        }
    }

    /// 几何实体。`Point::at` 与 `Circle::center` 仅是求解初值，不具权威性。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    pub enum Entity {
        Point { id: String, at: Point3 },
        Line { id: String, p1: String, p2: String },
        Circle {
            id: String,
            center: Point3,
            diameter: f64,
        },
    }

    impl Entity {
        #[inline]
        pub fn point(id: impl Into<String>, at: Point3) -> Self {
            Entity::Point { id: id.into(), at }
        }

        #[inline]
        pub fn line(id: impl Into<String>, p1: impl Into<String>, p2: impl Into<String>) -> Self {
            Entity::Line {
                id: id.into(),
                p1: p1.into(),
                p2: p2.into(),
            }
        }

        #[inline]
        pub fn circle(id: impl Into<String>, center: Point3, diameter: f64) -> Self {
            Entity::Circle {
                id: id.into(),
                center,
                diameter,
            }
        }

        #[inline]
        pub fn id(&self) -> &str {
            match self {
                Entity::Point { id, .. } | Entity::Line { id, .. } | Entity::Circle { id, .. } => {
                    id
                }
            }
        }

        #[inline]
        pub fn kind(&self) -> EntityKind {
            match self {
                Entity::Point { .. } => EntityKind::Point,
                Entity::Line { .. } => EntityKind::Line,
                Entity::Circle { .. } => EntityKind::Circle,
            }
        }

        /// 该实体引用的其他实体及其期望类型。
        pub fn references(&self) -> Vec<(&str, EntityKind)> {
            match self {
                Entity::Line { p1, p2, .. } => {
                    vec![(p1.as_str(), EntityKind::Point), (p2.as_str(), EntityKind::Point)]
                }
                Entity::Point { .. } | Entity::Circle { .. } => Vec::new(),
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub enum ConstraintKind {
        Fixed,
        Distance,
        Angle,
        Perpendicular,
        Coincident,
        PointOnCircle,
        Horizontal,
    }

    impl ConstraintKind {
        pub fn as_str(self) -> &'static str {
            match self {
                ConstraintKind::Fixed => "fixed",
                ConstraintKind::Distance => "distance",
                ConstraintKind::Angle => "angle",
                ConstraintKind::Perpendicular => "perpendicular",
                ConstraintKind::Coincident => "coincident",
                ConstraintKind::PointOnCircle => "point_on_circle",
                ConstraintKind::Horizontal => "horizontal",
            }
        }
    }

    impl fmt::Display for ConstraintKind {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.as_str())
        }
    }

    /// 符号约束。字段名即 JSON 字段名。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    pub enum Constraint {
        /// 求解时不得移动该点。
        Fixed { entity: String },
        /// 两点间距离。
        Distance {
            between: [String; 2],
            value: ParamValue,
        },
        /// 两条直线方向间的夹角（度）。
        Angle {
            between: [String; 2],
            value: ParamValue,
        },
        Perpendicular { a: String, b: String },
        /// 点必须落在 `of` 中的每条直线上（不要求在端点）。
        Coincident { at: String, of: Vec<String> },
        PointOnCircle { point: String, circle: String },
        Horizontal { a: String },
    }

    impl Constraint {
        #[inline]
        pub fn fixed(entity: impl Into<String>) -> Self {
            Constraint::Fixed {
                entity: entity.into(),
            }
        }

        #[inline]
        pub fn distance(a: impl Into<String>, b: impl Into<String>, value: ParamValue) -> Self {
            Constraint::Distance {
                between: [a.into(), b.into()],
                value,
            }
        }

        #[inline]
        pub fn angle(a: impl Into<String>, b: impl Into<String>, value: ParamValue) -> Self {
            Constraint::Angle {
                between: [a.into(), b.into()],
                value,
            }
        }

        #[inline]
        pub fn perpendicular(a: impl Into<String>, b: impl Into<String>) -> Self {
            Constraint::Perpendicular {
                a: a.into(),
                b: b.into(),
            }
        }

        #[inline]
        pub fn coincident(at: impl Into<String>, of: Vec<String>) -> Self {
            Constraint::Coincident { at: at.into(), of }
        }

        #[inline]
        pub fn point_on_circle(point: impl Into<String>, circle: impl Into<String>) -> Self {
            Constraint::PointOnCircle {
                point: point.into(),
                circle: circle.into(),
            }
        }

        #[inline]
        pub fn horizontal(a: impl Into<String>) -> Self {
            Constraint::Horizontal { a: a.into() }
        }

        pub fn kind(&self) -> ConstraintKind {
            match self {
                Constraint::Fixed { .. } => ConstraintKind::Fixed,
                Constraint::Distance { .. } => ConstraintKind::Distance,
                Constraint::Angle { .. } => ConstraintKind::Angle,
                Constraint::Perpendicular { .. } => ConstraintKind::Perpendicular,
                Constraint::Coincident { .. } => ConstraintKind::Coincident,
                Constraint::PointOnCircle { .. } => ConstraintKind::PointOnCircle,
                Constraint::Horizontal { .. } => ConstraintKind::Horizontal,
            }
        }

        /// 约束涉及的实体引用及其期望类型，顺序与字段顺序一致。
        pub fn references(&self) -> Vec<(&str, EntityKind)> {
            match self {
                Constraint::Fixed { entity } => vec![(entity.as_str(), EntityKind::Point)],
                Constraint::Distance { between, .. } => between
                    .iter()
                    .map(|id| (id.as_str(), EntityKind::Point))
                    .collect(),
                Constraint::Angle { between, .. } => between
                    .iter()
                    .map(|id| (id.as_str(), EntityKind::Line))
                    .collect(),
                Constraint::Perpendicular { a, b } => {
                    vec![(a.as_str(), EntityKind::Line), (b.as_str(), EntityKind::Line)]
                }
                Constraint::Coincident { at, of } => {
                    let mut refs = vec![(at.as_str(), EntityKind::Point)];
                    refs.extend(of.iter().map(|id| (id.as_str(), EntityKind::Line)));
                    refs
                }
                Constraint::PointOnCircle { point, circle } => vec![
                    (point.as_str(), EntityKind::Point),
                    (circle.as_str(), EntityKind::Circle),
                ],
                Constraint::Horizontal { a } => vec![(a.as_str(), EntityKind::Line)],
            }
        }

        #[inline]
        pub fn value(&self) -> Option<&ParamValue> {
            match self {
                Constraint::Distance { value, .. } | Constraint::Angle { value, .. } => Some(value),
                _ => None,
            }
        }

        /// 日志与错误信息中使用的简短描述，例如 `angle(radial1, radial2)`。
        pub fn describe(&self) -> String {
            let refs: Vec<&str> = self.references().into_iter().map(|(id, _)| id).collect();
            format!("{}({})", self.kind(), refs.join(", "))
        }
    }

    /// 完整的约束文档。构造即校验，之后只读。
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(try_from = "RawDocument")]
    pub struct ConstraintDocument {
        schema: String,
        units: String,
        parameters: Parameters,
        entities: Vec<Entity>,
        constraints: Vec<Constraint>,
    }

    impl ConstraintDocument {
        /// 校验标识唯一性、前向引用与参数引用后构造文档。
        pub fn new(
            schema: impl Into<String>,
            units: impl Into<String>,
            parameters: Parameters,
            entities: Vec<Entity>,
            constraints: Vec<Constraint>,
        ) -> Result<Self, ValidationError> {
            validate(&parameters, &entities, &constraints)?;
            Ok(Self {
                schema: schema.into(),
                units: units.into(),
                parameters,
                entities,
                constraints,
            })
        }

        #[inline]
        pub fn schema(&self) -> &str {
            &self.schema
        }

        #[inline]
        pub fn units(&self) -> &str {
            &self.units
        }

        #[inline]
        pub fn parameters(&self) -> &Parameters {
            &self.parameters
        }

        #[inline]
        pub fn parameter(&self, name: &str) -> Option<f64> {
            self.parameters.get(name).copied()
        }

        #[inline]
        pub fn entities(&self) -> &[Entity] {
            &self.entities
        }

        #[inline]
        pub fn constraints(&self) -> &[Constraint] {
            &self.constraints
        }

        pub fn entity(&self, id: &str) -> Option<&Entity> {
            self.entities.iter().find(|entity| entity.id() == id)
        }

        /// 实体在有序列表中的位置。
        pub fn position_of(&self, id: &str) -> Option<usize> {
            self.entities.iter().position(|entity| entity.id() == id)
        }
    }

    #[derive(Debug, Deserialize)]
    struct RawDocument {
        schema: String,
        units: String,
        #[serde(default)]
        parameters: Parameters,
        #[serde(default)]
        entities: Vec<Entity>,
        #[serde(default)]
        constraints: Vec<Constraint>,
    }

    impl TryFrom<RawDocument> for ConstraintDocument {
        type Error = ValidationError;

        fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
            ConstraintDocument::new(
                raw.schema,
                raw.units,
                raw.parameters,
                raw.entities,
                raw.constraints,
            )
        }
    }

}
