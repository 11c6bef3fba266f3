//! 储蓄债券估值报表
//!
//! 从 TreasuryDirect 查询持有的储蓄债券当前价值，输出汇总报表
//! 数据来源：https://www.treasurydirect.gov/BC/SBCPrice

mod config;   // 配置
mod error;    // 错误类型
mod models;   // 数据模型定义
mod services; // 业务逻辑服务

use env_logger::Env;
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use crate::config::AppConfig;
use crate::services::treasury::TreasuryClient;
use crate::services::{bond_list, pipeline, report};

/// 跳过模式下存在失败债券时的退出码
const EXIT_PARTIAL: u8 = 3;

/// 应用程序入口
///
/// 用法: savings-bond-report [债券列表文件]
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let config_path = AppConfig::find_file();
    let mut config = AppConfig::load(config_path)?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match config_path {
        Some(path) => log::info!("从 {} 加载配置成功", path),
        None => log::info!("使用默认配置"),
    }

    if let Some(bonds_file) = env::args().nth(1) {
        config.report.bonds_file = bonds_file;
    }

    let queries = bond_list::load_bond_list(&config.report.bonds_file)?;

    let client = TreasuryClient::new(&config.service)?;
    log::info!("估值服务: {}", client.endpoint());

    let mut output = pipeline::run(&client, &queries, config.report.on_error).await?;
    report::sort_records(&mut output.records, config.report.sort_by);

    let mut stdout = io::stdout().lock();
    write!(stdout, "{}", report::render_table(&output.records))?;

    // 合计失败时表格仍然输出
    let total = report::render_total(&output.records);
    if let Ok(total) = &total {
        write!(stdout, "{}", total)?;
    }
    write!(stdout, "{}", report::render_failures(&output.failures))?;
    stdout.flush()?;

    total?;

    if output.failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        log::warn!("{} 只债券估值失败", output.failures.len());
        Ok(ExitCode::from(EXIT_PARTIAL))
    }
}
