use crate::layout::Variant;

/// 预设的机构配置，用于批量输出一组光圈开合状态。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub variant: Variant,
    pub blade_count: u32,
    pub blade_angle: f64,
}

impl Preset {
    const fn tapered(name: &'static str, blade_count: u32, blade_angle: f64) -> Self {
        Self {
            name,
            variant: Variant::Tapered,
            blade_count,
            blade_angle,
        }
    }

    pub fn file_name(&self) -> String {
        format!("sophisticated_{}.json", self.name)
    }
}

/// 锥形叶片的光圈扫描：一份 8 叶 60° 的主文档，外加 6 叶与 8 叶各三种开合状态。
/// 同一叶片数下只有 `blade_angle` 不同。
pub fn aperture_sweep() -> Vec<Preset> {
    vec![
        Preset::tapered("8blade", 8, 60.0),
        Preset::tapered("6blade_closed", 6, 35.0),
        Preset::tapered("6blade_mid", 6, 55.0),
        Preset::tapered("6blade_open", 6, 75.0),
        Preset::tapered("8blade_closed", 8, 40.0),
        Preset::tapered("8blade_mid", 8, 60.0),
        Preset::tapered("8blade_open", 8, 80.0),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn sweep_file_names_are_unique() {
        let presets = aperture_sweep();
        let names: HashSet<String> = presets.iter().map(Preset::file_name).collect();
        assert_eq!(names.len(), presets.len());
        assert!(names.contains("sophisticated_8blade.json"));
        assert!(names.contains("sophisticated_6blade_open.json"));
    }
}
