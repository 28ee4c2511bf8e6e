/// 日志工具模块
///
/// 提供启动横幅、统计输出和文本截断等辅助函数
use tracing::info;

use crate::orchestrator::ScrapeReport;

/// 记录程序启动信息
///
/// # 参数
/// - `page_url`: 列表页地址
/// - `concurrency`: 同时处理的详情页数
pub fn log_startup(page_url: &str, concurrency: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 列表抓取模式");
    info!("🌐 列表页: {}", page_url);
    info!("📊 并发数: {}", concurrency);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `report`: 本次运行结果
/// - `output_dir`: 输出目录
pub fn print_final_stats(report: &ScrapeReport, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("🔗 链接: {}", report.links.len());
    info!("✅ 完整记录: {}", report.complete_records());
    info!("⚠️ 字段失败: {}", report.failures.len());
    info!("❌ 跳过的链接: {}", report.link_errors.len());
    info!("{}", "=".repeat(60));
    info!("\n结果已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
