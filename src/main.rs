// ==========================================
// 商品目录批量导入系统 - 命令行入口
// ==========================================
// 用途: 本地校验/导出数据文件（不连接在线目录，
//       应用阶段由宿主系统集成 ImportApi 完成）
// 用法:
//   catalog-import <file.csv|file.xlsx>
//   catalog-import <file.csv|file.xlsx> --json
//   catalog-import <file.csv|file.xlsx> --export <out.csv|out.xlsx>
// ==========================================

use catalog_import::domain::types::FileFormat;
use catalog_import::importer::{CatalogImporter, CatalogImporterImpl};
use catalog_import::logging;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", catalog_import::APP_NAME);
    tracing::info!("系统版本: {}", catalog_import::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("用法: catalog-import <file.csv|file.xlsx> [--export <out.csv|out.xlsx>]");
        return ExitCode::from(2);
    }

    let file_path = Path::new(&args[1]);
    let importer = CatalogImporterImpl::default();

    // 解析 + 规范化 + 校验
    let session = match importer.import_from_path(file_path).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("导入失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // JSON 模式: 完整校验结果输出给脚本/前端消费
    let validation = &session.validation;
    if args.iter().any(|a| a == "--json") {
        match serde_json::to_string_pretty(validation) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("报告序列化失败: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return if validation.is_valid {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        };
    }

    // 打印校验报告
    println!("总行数: {}", validation.total_rows);
    println!("有效行数: {}", validation.valid_rows);
    println!(
        "问题: {} 错误 / {} 警告 / {} 提示",
        validation.summary.errors, validation.summary.warnings, validation.summary.infos
    );
    for issue in &validation.issues {
        let location = if issue.row == 0 {
            "数据集".to_string()
        } else {
            format!("行 {}", issue.row)
        };
        println!("  [{:?}] {} {}: {}", issue.severity, location, issue.field, issue.message);
    }
    println!(
        "结论: {}",
        if validation.is_valid {
            "校验通过，可以应用"
        } else {
            "校验未通过，禁止应用"
        }
    );

    // 可选导出（与校验结果无关）
    if args.len() >= 4 && args[2] == "--export" {
        let out_path = Path::new(&args[3]);
        let ext = out_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let Some(format) = FileFormat::from_extension(&ext) else {
            eprintln!("不支持的导出格式: {}", ext);
            return ExitCode::FAILURE;
        };

        match importer.export_rows(&session.rows, format) {
            Ok(bytes) => {
                if let Err(e) = std::fs::write(out_path, bytes) {
                    eprintln!("导出文件写入失败: {}", e);
                    return ExitCode::FAILURE;
                }
                println!("已导出: {}", out_path.display());
            }
            Err(e) => {
                eprintln!("导出失败: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    if validation.is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
