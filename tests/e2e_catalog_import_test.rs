// ==========================================
// 端到端集成测试 - 商品目录导入完整流程
// ==========================================
// 测试目标: 从 CSV 字节流到应用/导出的完整管道
// 覆盖范围: ImportApi + CatalogImporter + ApplyOrchestrator
// ==========================================

use async_trait::async_trait;
use catalog_import::api::{ApiError, ImportApi};
use catalog_import::domain::session::{SnapshotContext, SnapshotHandle};
use catalog_import::domain::types::{ApplyState, FileFormat, Severity};
use catalog_import::logging;
use catalog_import::repository::{CatalogRepository, RepositoryError};
use catalog_import::ProductRow;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ==========================================
// InMemoryCatalog - 端到端测试用目录协作方
// ==========================================
#[derive(Clone, Default)]
struct InMemoryCatalog {
    products: Arc<Mutex<Vec<ProductRow>>>,
    snapshot_count: Arc<AtomicUsize>,
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn create_snapshot(
        &self,
        _context: SnapshotContext,
    ) -> Result<SnapshotHandle, RepositoryError> {
        let n = self.snapshot_count.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SnapshotHandle {
            snapshot_id: format!("snap-{n}"),
            created_at: Utc::now(),
        })
    }

    async fn apply_catalog_write(&self, rows: &[ProductRow]) -> Result<usize, RepositoryError> {
        // 按 handle upsert
        let mut products = self.products.lock().unwrap();
        for row in rows {
            if let Some(existing) = products.iter_mut().find(|p| p.handle == row.handle) {
                *existing = row.clone();
            } else {
                products.push(row.clone());
            }
        }
        Ok(rows.len())
    }
}

const GOOD_CSV: &[u8] = b"Handle,Title,Description,Tags\n\
    p1,Wireless Headphones,\"Great sound, 30h battery, noise cancelling, comfortable fit\",\"audio,music\"\n\
    p2,Ceramic Mug,\"A ceramic mug with a comfortable handle that holds 350ml of liquid\",kitchen\n";

// ==========================================
// 测试用例 1: 完整场景（加载 → 校验失败 → 修正 → 应用）
// ==========================================
#[tokio::test]
async fn test_e2e_duplicate_handle_scenario() {
    logging::init_test();

    // 重复 handle p1 + 第二行超短描述
    let bad_csv: &[u8] = b"Handle,Title,Description,Tags\n\
        p1,Wireless Headphones,\"Great sound, 30h battery, noise cancelling\",\"audio,music\"\n\
        p1,Other Title,short,audio\n";

    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog.clone());

    // 步骤 1: 加载并校验
    let response = api
        .load_from_bytes(bad_csv.to_vec(), FileFormat::Csv, Some("bad.csv".to_string()))
        .await
        .expect("解析应成功");

    assert_eq!(response.total_rows, 2);
    assert!(!response.is_valid);
    // 恰好一个 Error: 重复 handle p1（描述过短只是 Warning）
    let errors: Vec<_> = response
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("\"p1\""));
    assert!(response
        .issues
        .iter()
        .any(|i| i.severity == Severity::Warning && i.field == "description"));

    // 步骤 2: 校验失败时应用被本地拒绝，目录无变化
    let apply_result = api.apply().await;
    assert!(matches!(apply_result, Err(ApiError::ApplyRejected(_))));
    assert_eq!(catalog.snapshot_count.load(Ordering::SeqCst), 0);
    assert!(catalog.products.lock().unwrap().is_empty());

    // 步骤 3: 校验失败的数据仍可导出供外部修正
    let exported = api.export(FileFormat::Csv).expect("失败数据应可导出");
    assert!(!exported.is_empty());

    // 步骤 4: 加载修正后的文件（新会话整体替换旧会话）
    let response = api
        .load_from_bytes(GOOD_CSV.to_vec(), FileFormat::Csv, Some("good.csv".to_string()))
        .await
        .expect("解析应成功");
    assert!(response.is_valid);
    assert_eq!(response.valid_rows, 2);

    // 步骤 5: 应用成功，快照先行
    let apply = api.apply().await.expect("应用应成功");
    assert_eq!(apply.applied_rows, 2);
    assert_eq!(apply.snapshot_id, "snap-1");
    assert_eq!(api.apply_state(), Some(ApplyState::Applied));
    assert_eq!(catalog.products.lock().unwrap().len(), 2);
}

// ==========================================
// 测试用例 2: 会话替换语义
// ==========================================
#[tokio::test]
async fn test_new_load_replaces_session() {
    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog);

    let first = api
        .load_from_bytes(GOOD_CSV.to_vec(), FileFormat::Csv, None)
        .await
        .unwrap();
    let second = api
        .load_from_bytes(GOOD_CSV.to_vec(), FileFormat::Csv, None)
        .await
        .unwrap();

    // 新会话有新 ID，旧会话被整体替换
    assert_ne!(first.session_id, second.session_id);
    assert_eq!(
        api.session().map(|s| s.session_id.clone()),
        Some(second.session_id)
    );
}

// ==========================================
// 测试用例 3: 已应用会话不可重复应用，新会话可继续
// ==========================================
#[tokio::test]
async fn test_applied_session_terminal_new_session_fresh() {
    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog.clone());

    api.load_from_bytes(GOOD_CSV.to_vec(), FileFormat::Csv, None)
        .await
        .unwrap();
    api.apply().await.expect("首次应用应成功");

    // 同一会话重复应用被拒绝
    let again = api.apply().await;
    assert!(matches!(again, Err(ApiError::ApplyRejected(_))));

    // 新上传开启全新会话，可再次应用（产生第二个快照）
    api.load_from_bytes(GOOD_CSV.to_vec(), FileFormat::Csv, None)
        .await
        .unwrap();
    let apply = api.apply().await.expect("新会话应用应成功");
    assert_eq!(apply.snapshot_id, "snap-2");
}

// ==========================================
// 测试用例 4: 未加载文件时的接口防护
// ==========================================
#[tokio::test]
async fn test_no_session_guards() {
    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog);

    assert!(matches!(
        api.apply().await,
        Err(ApiError::NoActiveSession(_))
    ));
    assert!(matches!(
        api.export(FileFormat::Csv),
        Err(ApiError::NoActiveSession(_))
    ));
    assert_eq!(api.apply_state(), None);
}

// ==========================================
// 测试用例 5: 解析失败不产生会话（无部分状态）
// ==========================================
#[tokio::test]
async fn test_parse_failure_leaves_no_partial_state() {
    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog);

    let result = api
        .load_from_bytes(Vec::new(), FileFormat::Csv, None)
        .await;

    assert!(matches!(result, Err(ApiError::ImportFailed(_))));
    assert!(api.session().is_none());
}

// ==========================================
// 测试用例 6: Excel 输入走同一管道
// ==========================================
#[tokio::test]
async fn test_e2e_xlsx_input() {
    // 用导出器生成 xlsx 字节流作为输入
    use catalog_import::importer::catalog_importer_trait::CatalogExporter;
    use catalog_import::importer::CatalogExporterImpl;

    let rows = vec![ProductRow {
        handle: "p1".to_string(),
        title: "Desk Lamp".to_string(),
        description: "An adjustable desk lamp with warm and cold light temperature modes."
            .to_string(),
        tags: Some("office".to_string()),
        image: None,
        category: None,
        price: Some("39.00".to_string()),
        sku: None,
        row_number: 2,
    }];
    let bytes = CatalogExporterImpl
        .serialize(&rows, FileFormat::Xlsx)
        .unwrap();

    let catalog = InMemoryCatalog::default();
    let mut api = ImportApi::new(catalog.clone());

    let response = api
        .load_from_bytes(bytes, FileFormat::Xlsx, Some("products.xlsx".to_string()))
        .await
        .expect("xlsx 解析应成功");

    assert!(response.is_valid);
    assert_eq!(response.total_rows, 1);

    let apply = api.apply().await.expect("应用应成功");
    assert_eq!(apply.applied_rows, 1);
    assert_eq!(catalog.products.lock().unwrap()[0].handle, "p1");
}
