// ==========================================
// 装修承包项目财务绩效引擎 - 命令行入口
// ==========================================
// 用法: contractor-profit <projects.json> [--config <config.json>] [--costs <line_items.csv>] [--json-log]
// 输出: 各项目财务报告 + 项目组合汇总 (JSON, stdout)
// ==========================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use contractor_profit::api::ProjectFinancialsApi;
use contractor_profit::config::ConfigManager;
use contractor_profit::engine::FinancialEngine;
use contractor_profit::logging;
use contractor_profit::repository::InMemoryProjectRepository;
use serde_json::json;

const USAGE: &str =
    "用法: contractor-profit <projects.json> [--config <config.json>] [--costs <line_items.csv>] [--json-log]";

/// 命令行参数
#[derive(Debug, Default)]
struct CliArgs {
    projects_path: PathBuf,
    config_path: Option<PathBuf>,
    costs_path: Option<PathBuf>,
    json_log: bool,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut projects_path = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().context("--config 缺少参数")?;
                cli.config_path = Some(PathBuf::from(value));
            }
            "--costs" => {
                let value = args.next().context("--costs 缺少参数")?;
                cli.costs_path = Some(PathBuf::from(value));
            }
            "--json-log" => cli.json_log = true,
            "-h" | "--help" => bail!("{}", USAGE),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            other => {
                if projects_path.is_some() {
                    bail!("只能指定一个项目快照文件\n{}", USAGE);
                }
                projects_path = Some(PathBuf::from(other));
            }
        }
    }

    cli.projects_path = projects_path.with_context(|| format!("缺少项目快照文件\n{}", USAGE))?;
    Ok(cli)
}

fn main() -> Result<()> {
    let cli = parse_args(std::env::args().skip(1))?;

    // 初始化日志系统
    logging::init(cli.json_log);

    tracing::info!("{} v{}", contractor_profit::APP_NAME, contractor_profit::VERSION);

    // 加载配置
    let config_manager = ConfigManager::load(cli.config_path.as_deref())
        .context("引擎配置加载失败")?;
    let engine = Arc::new(FinancialEngine::new(config_manager.config().clone()));

    // 加载项目快照
    let repo = InMemoryProjectRepository::from_json_file(&cli.projects_path)
        .with_context(|| format!("项目快照加载失败: {}", cli.projects_path.display()))?;
    let api = ProjectFinancialsApi::new(Arc::new(repo), engine);

    // 回写成本流水
    if let Some(costs_path) = &cli.costs_path {
        let updated = api
            .import_cost_csv(costs_path)
            .with_context(|| format!("成本流水导入失败: {}", costs_path.display()))?;
        tracing::info!(projects = updated, "成本流水已应用");
    }

    let reports = api.list_project_financials()?;
    let portfolio = api.get_portfolio_overview()?;

    let output = json!({
        "config": config_manager.config(),
        "reports": reports,
        "portfolio": portfolio,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
