use iris_core::document::ConstraintDocument;
use iris_engine::summary::DocumentSummary;
use tracing::info;

/// 打印文档概览：参数、实体与约束统计。
pub fn print_summary(title: &str, document: &ConstraintDocument) {
    let summary = DocumentSummary::of(document);
    info!(
        entities = summary.entity_total(),
        constraints = summary.constraint_total(),
        "文档统计"
    );

    println!("{title}");
    println!("  格式: {} ({})", document.schema(), document.units());
    println!("  参数:");
    for (name, value) in document.parameters() {
        println!("    - {name} = {value:.3}");
    }
    println!(
        "  实体: {} 个（点 {}，直线 {}，圆 {}）",
        summary.entity_total(),
        summary.points,
        summary.lines,
        summary.circles
    );
    println!("  约束: {} 条", summary.constraint_total());
    for (kind, count) in &summary.constraints {
        println!("    - {kind}: {count}");
    }
    if summary.literal_angle_total > 0.0 {
        println!("  径向角度链总和: {:.3}°", summary.literal_angle_total);
    }
}
