// ==========================================
// 商品目录批量导入系统 - 导出序列化器实现
// ==========================================
// 职责: 规范化商品行 → CSV / Excel 字节流
// 说明: 固定 8 列结构，表头小写后即规范字段首选别名，
//       导出再导入可无损还原
// ==========================================

use crate::domain::product::ProductRow;
use crate::domain::types::FileFormat;
use crate::importer::catalog_importer_trait::CatalogExporter as CatalogExporterTrait;
use crate::importer::error::{ImportError, ImportResult};
use rust_xlsxwriter::Workbook;

// 导出列顺序（与规范字段一一对应）
const EXPORT_HEADERS: [&str; 8] = [
    "Handle",
    "Title",
    "Description",
    "Tags",
    "Image",
    "Category",
    "Price",
    "SKU",
];

pub struct CatalogExporter;

impl CatalogExporterTrait for CatalogExporter {
    /// 序列化商品行（与校验结果无关）
    fn serialize(&self, rows: &[ProductRow], format: FileFormat) -> ImportResult<Vec<u8>> {
        match format {
            FileFormat::Csv => self.serialize_csv(rows),
            FileFormat::Xlsx => self.serialize_xlsx(rows),
        }
    }
}

impl CatalogExporter {
    /// 单行的 8 列取值（可选字段缺省为空串）
    fn record_values(&self, row: &ProductRow) -> [String; 8] {
        [
            row.handle.clone(),
            row.title.clone(),
            row.description.clone(),
            row.tags.clone().unwrap_or_default(),
            row.image.clone().unwrap_or_default(),
            row.category.clone().unwrap_or_default(),
            row.price.clone().unwrap_or_default(),
            row.sku.clone().unwrap_or_default(),
        ]
    }

    /// CSV 序列化（csv 库按 RFC 4180 自动加引号并双写内嵌引号）
    fn serialize_csv(&self, rows: &[ProductRow]) -> ImportResult<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(EXPORT_HEADERS)?;
        for row in rows {
            writer.write_record(&self.record_values(row))?;
        }

        writer
            .into_inner()
            .map_err(|e| ImportError::ExportError(e.to_string()))
    }

    /// Excel 序列化（单工作表，内存缓冲区）
    fn serialize_xlsx(&self, rows: &[ProductRow]) -> ImportResult<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Products")?;

        // 表头行
        for (col, header) in EXPORT_HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        // 数据行
        for (idx, row) in rows.iter().enumerate() {
            for (col, value) in self.record_values(row).iter().enumerate() {
                worksheet.write_string(idx as u32 + 1, col as u16, value.as_str())?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
