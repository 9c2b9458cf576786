// ==========================================
// 记录管理服务 - 命令行入口
// ==========================================
// 用途: 对已有数据库执行一次文件导入并打印报告,
//       便于联调与数据准备;线上入口是外部 HTTP 宿主
// 约定: 数据库表结构须已预置,本程序不做迁移
// ==========================================

use databridge_core::config::StoreConfig;
use databridge_core::{logging, StudentApi};

#[tokio::main]
async fn main() {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", databridge_core::APP_NAME);
    tracing::info!("系统版本: {}", databridge_core::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    let Some(file_path) = args.get(1) else {
        eprintln!("用法: databridge-core <上传文件路径>");
        eprintln!();
        eprintln!("数据库路径取自 {} 环境变量,", databridge_core::config::DB_PATH_ENV);
        eprintln!("未设置时回退到用户数据目录。");
        std::process::exit(2);
    };

    let config = StoreConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);

    let bytes = match std::fs::read(file_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(file = %file_path, error = %e, "读取上传文件失败");
            std::process::exit(1);
        }
    };

    let api = StudentApi::new(config.db_path);
    match api.upload_students(file_path, &bytes).await {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                tracing::error!(error = %e, "序列化报告失败");
                std::process::exit(1);
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "导入失败");
            std::process::exit(1);
        }
    }
}
