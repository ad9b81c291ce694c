use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use iris_engine::Variant;
use tracing::warn;

/// 生成虹膜光圈机构的 `slvs-json/1` 约束文档。
#[derive(Debug, Parser)]
#[command(name = "iris-diaphragm", version, about)]
pub struct Cli {
    /// 指定配置文件，跳过 `IRIS_CONFIG` 与 `./config/default.toml` 的自动发现。
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 生成单份约束文档，未指定 OUTPUT 时写到标准输出。
    Generate(GenerateArgs),
    /// 按预设的开合状态批量生成锥形叶片文档。
    Batch(BatchArgs),
    /// 读取并校验约束文档，打印概览。
    Inspect(InspectArgs),
}

#[derive(Debug, Args)]
#[command(allow_negative_numbers = true)]
pub struct GenerateArgs {
    #[arg(long, default_value_t = Variant::Fixed)]
    pub variant: Variant,

    /// 叶片数量；无法解析时使用布局默认值。
    pub blades: Option<String>,

    /// 叶片相对径向线的角度（度）；无法解析时使用布局默认值。
    pub angle: Option<String>,

    pub output: Option<PathBuf>,

    /// 输出紧凑 JSON，覆盖配置中的 `output.pretty`。
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// 默认取配置中的 `output.directory`。
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    pub file: PathBuf,
}

/// 宽松解析叶片数量。小数视为无法解析而非截断；负数按 0 处理，交给引擎报告数量不足。
pub fn lenient_blade_count(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    match raw.trim().parse::<i64>() {
        Ok(value) if value < 0 => Some(0),
        Ok(value) => match u32::try_from(value) {
            Ok(count) => Some(count),
            Err(_) => {
                warn!(input = raw, "叶片数量超出范围，使用默认值");
                None
            }
        },
        Err(_) => {
            warn!(input = raw, "无法解析叶片数量，使用默认值");
            None
        }
    }
}

/// 0° 是合法角度，只有无法解析或非有限值才回退默认值。
pub fn lenient_angle(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(input = raw, "无法解析叶片角度，使用默认值");
            None
        }
    }
}
