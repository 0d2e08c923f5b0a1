// ==========================================
// 周中聚会排程核心 - 命令行入口
// ==========================================
// 用法: meeting-scheduler <bundle.json> [config.json]
// 日志: MEETING_LOG_FORMAT=json 输出 JSON 日志
// 流程: 加载 → 规范化 → 自动分派 → 时间线编排 → JSON 输出(stdout)
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::Utc;
use meeting_scheduler::engine::{
    AssignmentEditor, AutoFillAssigner, ParticipationBuilder, RankingPool, ScheduleNormalizer,
    TimelineComposer,
};
use meeting_scheduler::importer::WeekBundle;
use meeting_scheduler::{logging, ConfigManager, APP_NAME, VERSION};
use std::path::PathBuf;
use tracing::{info, warn};

fn main() -> Result<()> {
    logging::init_from_env();

    let mut args = std::env::args().skip(1);
    let Some(bundle_path) = args.next().map(PathBuf::from) else {
        bail!("用法: meeting-scheduler <bundle.json> [config.json]");
    };
    let config_path = args.next().map(PathBuf::from);

    info!("{} v{}", APP_NAME, VERSION);

    let config = ConfigManager::load_or_default(config_path.as_deref())
        .context("配置加载失败")?
        .into_config();
    let bundle = WeekBundle::load(&bundle_path)
        .with_context(|| format!("周数据包加载失败: {}", bundle_path.display()))?;

    let week = bundle.week_context(Utc::now().date_naive());
    let raw_parts = bundle.raw_parts();
    if raw_parts.is_empty() {
        info!(week = %week.week_id, "无可分派部分");
    }

    let parts = ScheduleNormalizer::new().normalize_to_assign(&raw_parts);
    let pool = RankingPool {
        publishers: &bundle.publishers,
        history: &bundle.history,
        rules: &bundle.rules,
        week: &week,
    };

    let mut assignments = AutoFillAssigner::new().auto_fill(&parts, &bundle.assignments, &pool);

    let editor = AssignmentEditor::new();
    editor.propagate_presiding_officer(&parts, &mut assignments);
    let missing = editor.missing_slots(&parts, &assignments);
    for slot in &missing {
        warn!(part_id = %slot.part_id, title = %slot.part_title, slot = ?slot.slot, "槽位未分派");
    }

    let rows = ParticipationBuilder::new(&config.unassigned_label).preview(
        &parts,
        &assignments,
        &bundle.publishers,
    );
    let timeline = TimelineComposer::new(config).compose(&rows, bundle.event_for(&week));

    let output = serde_json::json!({
        "week": week.week_id,
        "meetingDate": week.meeting_date,
        "assignments": assignments,
        "missing": missing,
        "timeline": timeline,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("结果序列化失败")?
    );

    info!(entries = timeline.len(), missing = missing.len(), "排程完成");
    Ok(())
}
