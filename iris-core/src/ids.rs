//! 按叶片编号派生实体标识。
//!
//! 标识只由 `(角色, 编号)` 决定，约束生成阶段可以直接重算任意实体的标识，无需查表。

use std::fmt;
use std::num::NonZeroU32;

use crate::document::EntityKind;

/// 机构中心点。
pub const CENTER: &str = "center";
/// 枢轴所在圆（仅作参考）。
pub const PIVOT_CIRCLE: &str = "pivot_circle";
/// 叶片尖端必须落在其上的光圈圆。
pub const APERTURE: &str = "aperture";
/// 固定枢轴变体中的光圈参考圆。
pub const APERTURE_GUIDE: &str = "aperture_guide";

/// 不带编号的共享标识。
pub const SHARED_IDS: [&str; 4] = [CENTER, PIVOT_CIRCLE, APERTURE, APERTURE_GUIDE];

/// 叶片编号，从 1 开始。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BladeIndex(NonZeroU32);

impl BladeIndex {
    pub const FIRST: BladeIndex = BladeIndex(NonZeroU32::MIN);

    /// 0 不是合法编号。
    #[inline]
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// 依次产生 `1..=count`。
    pub fn all(count: u32) -> impl Iterator<Item = BladeIndex> {
        (1..=count).filter_map(BladeIndex::new)
    }

    /// 环上的下一片叶片，`count` 之后回到 1。
    #[inline]
    pub fn next(self, count: u32) -> BladeIndex {
        if self.get() >= count {
            Self::FIRST
        } else {
            BladeIndex(self.0.saturating_add(1))
        }
    }

    /// 环上的上一片叶片，1 之前是 `count`。
    #[inline]
    pub fn prev(self, count: u32) -> BladeIndex {
        match self.get() {
            1 => BladeIndex::new(count).unwrap_or(Self::FIRST),
            raw => BladeIndex::new(raw - 1).unwrap_or(Self::FIRST),
        }
    }

    #[inline]
    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }
}

impl fmt::Display for BladeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 单片叶片内实体的角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Pivot,
    Radial,
    Spoke,
    Tip,
    Blade,
    Centerline,
    BaseLeft,
    BaseRight,
    TipLeft,
    TipRight,
    BaseEdge,
    TipEdge,
    LeftEdge,
    RightEdge,
}

impl Role {
    pub const ALL: [Role; 14] = [
        Role::Pivot,
        Role::Radial,
        Role::Spoke,
        Role::Tip,
        Role::Blade,
        Role::Centerline,
        Role::BaseLeft,
        Role::BaseRight,
        Role::TipLeft,
        Role::TipRight,
        Role::BaseEdge,
        Role::TipEdge,
        Role::LeftEdge,
        Role::RightEdge,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Role::Pivot => "pivot",
            Role::Radial => "radial",
            Role::Spoke => "spoke",
            Role::Tip => "tip",
            Role::Blade => "blade",
            Role::Centerline => "centerline",
            Role::BaseLeft => "base_left",
            Role::BaseRight => "base_right",
            Role::TipLeft => "tip_left",
            Role::TipRight => "tip_right",
            Role::BaseEdge => "base_edge",
            Role::TipEdge => "tip_edge",
            Role::LeftEdge => "left_edge",
            Role::RightEdge => "right_edge",
        }
    }

    /// 该角色对应的实体类型。
    pub fn kind(self) -> EntityKind {
        match self {
            Role::Pivot
            | Role::Tip
            | Role::BaseLeft
            | Role::BaseRight
            | Role::TipLeft
            | Role::TipRight => EntityKind::Point,
            Role::Radial
            | Role::Spoke
            | Role::Blade
            | Role::Centerline
            | Role::BaseEdge
            | Role::TipEdge
            | Role::LeftEdge
            | Role::RightEdge => EntityKind::Line,
        }
    }
}

/// `(角色, 编号)` → 标识。
///
/// 枢轴、径向线、辐条与叶片直线直接拼接编号（`pivot3`、`blade3`）；
/// 其余角色挂在叶片名下（`blade3_tip`、`blade3_base_edge`）。
pub fn blade_id(role: Role, index: BladeIndex) -> String {
    match role {
        Role::Pivot | Role::Radial | Role::Spoke | Role::Blade => {
            format!("{}{}", role.tag(), index)
        }
        _ => format!("blade{}_{}", index, role.tag()),
    }
}
