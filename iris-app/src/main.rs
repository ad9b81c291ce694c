use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use iris_config::{AppConfig, ConfigError, MechanismConfig};
use iris_engine::Generator;
use iris_engine::params::{DimensionOverrides, EmpiricalConstants};
use iris_engine::presets::aperture_sweep;
use iris_io::{DocumentLoader, DocumentSaver, JsonFacade};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod report;

use cli::{BatchArgs, Cli, Command, GenerateArgs, InspectArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = load_configuration(cli.config.as_deref());
    let config = loaded.as_ref().cloned().unwrap_or_default();
    init_logging(&config);

    if let Err(err) = loaded {
        if cli.config.is_some() {
            error!(error = %err, "加载指定配置失败");
            eprintln!("错误: {err}");
            return ExitCode::FAILURE;
        }
        match &err {
            ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => {
                warn!(path = %path.display(), error = %err, "加载默认配置失败，使用内建默认值");
            }
            ConfigError::Context { .. } => {
                warn!(error = %err, "加载默认配置失败，使用内建默认值");
            }
        }
    }

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            error!(error = %message, "执行失败");
            eprintln!("错误: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Generate(args) => generate(args, config),
        Command::Batch(args) => batch(args, config),
        Command::Inspect(args) => inspect(args),
    }
}

fn generate(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let generator = generator_from(&config.mechanism);
    let params = generator.params(
        args.variant,
        cli::lenient_blade_count(args.blades.as_deref()),
        cli::lenient_angle(args.angle.as_deref()),
    )?;
    let document = generator.generate_with(args.variant, &params)?;
    let facade = JsonFacade::with_pretty(config.output.pretty && !args.compact);

    match args.output {
        Some(path) => {
            facade
                .save(&document, &path)
                .with_context(|| format!("写出 {} 失败", path.display()))?;
            info!(path = %path.display(), "约束文档已生成");
            report::print_summary(
                &format!(
                    "已生成 {} 布局：{} 片叶片，叶片角 {}°，写入 {}",
                    args.variant,
                    params.blade_count(),
                    params.blade_angle(),
                    path.display()
                ),
                &document,
            );
        }
        None => println!("{}", facade.to_json(&document)?),
    }
    Ok(())
}

fn batch(args: BatchArgs, config: &AppConfig) -> Result<()> {
    let generator = generator_from(&config.mechanism);
    let facade = JsonFacade::with_pretty(config.output.pretty);
    let directory = args
        .output_dir
        .unwrap_or_else(|| config.output.directory.clone());

    let presets = aperture_sweep();
    for preset in &presets {
        let document = generator
            .generate(preset.variant, preset.blade_count, preset.blade_angle)
            .with_context(|| format!("生成预设 {} 失败", preset.name))?;
        let path = directory.join(preset.file_name());
        facade
            .save(&document, &path)
            .with_context(|| format!("写出 {} 失败", path.display()))?;
        println!(
            "{}: {} 片叶片，叶片角 {}°，{} 个实体，{} 条约束",
            path.display(),
            preset.blade_count,
            preset.blade_angle,
            document.entities().len(),
            document.constraints().len()
        );
    }
    info!(directory = %directory.display(), count = presets.len(), "批量生成完成");
    Ok(())
}

fn inspect(args: InspectArgs) -> Result<()> {
    let document = JsonFacade::new()
        .load(&args.file)
        .with_context(|| format!("无法加载 {}", args.file.display()))?;
    report::print_summary(&format!("{}", args.file.display()), &document);
    Ok(())
}

fn generator_from(mechanism: &MechanismConfig) -> Generator {
    Generator::new()
        .with_constants(EmpiricalConstants {
            aperture_scale: mechanism.aperture_scale,
            seed_tip_scale: mechanism.seed_tip_scale,
        })
        .with_overrides(DimensionOverrides {
            pivot_radius: mechanism.pivot_radius,
            blade_length: mechanism.blade_length,
            base_width: mechanism.blade_base_width,
            tip_width: mechanism.blade_tip_width,
        })
}

fn load_configuration(override_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match override_path {
        Some(path) => AppConfig::from_file(path),
        None => AppConfig::discover(),
    }
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_new(config.logging.level.clone()).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        // 已初始化，忽略
    }
}
