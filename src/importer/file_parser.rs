// ==========================================
// 商品目录批量导入系统 - 文件解析器实现
// ==========================================
// 支持: CSV (.csv) / Excel (.xlsx)
// 职责: 原始字节流 → RawTable（两种格式产出一致结构）
// ==========================================

use crate::domain::product::RawTable;
use crate::domain::types::FileFormat;
use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（csv 库已按 RFC 4180 去引号；此处统一小写 + 去空白）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();

        // 无任何有效表头 = 空文件
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyFile);
        }

        // 读取数据行
        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        // 打开工作簿（内存游标）
        let cursor = Cursor::new(bytes);
        let mut workbook: Xlsx<_> =
            Xlsx::new(cursor).map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 仅读取第一个工作表（多工作表的商品集合并语义未定义）
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError("工作簿无工作表".to_string()));
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 提取表头（第一行）
        let mut rows_iter = range.rows();
        let header_row = rows_iter.next().ok_or(ImportError::EmptyFile)?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_lowercase())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyFile);
        }

        // 读取数据行
        let mut rows = Vec::new();
        for data_row in rows_iter {
            let mut row_map = HashMap::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(row_map);
        }

        Ok(RawTable { headers, rows })
    }
}

// ==========================================
// 通用文件解析器（按格式/扩展名分发）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 按已判定格式解析字节流
    pub fn parse_bytes(&self, bytes: &[u8], format: FileFormat) -> ImportResult<RawTable> {
        match format {
            FileFormat::Csv => CsvParser.parse_bytes(bytes),
            FileFormat::Xlsx => ExcelParser.parse_bytes(bytes),
        }
    }

    /// 读取文件并按扩展名自动选择解析器
    pub fn parse_path<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<(RawTable, FileFormat)> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let format =
            FileFormat::from_extension(&ext).ok_or(ImportError::UnsupportedFormat(ext))?;

        let bytes = std::fs::read(path)?;
        let table = self.parse_bytes(&bytes, format)?;
        Ok((table, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_basic() {
        let bytes = b"Handle,Title,Price\np1,Mug,9.99\np2,Cup,4.50\n";

        let table = CsvParser.parse_bytes(bytes).unwrap();

        assert_eq!(table.headers, vec!["handle", "title", "price"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("handle"), Some(&"p1".to_string()));
        assert_eq!(table.rows[1].get("price"), Some(&"4.50".to_string()));
    }

    #[test]
    fn test_csv_parser_quoted_fields() {
        // 引号内的逗号不是分隔符，双引号 "" 转义为字面引号
        let bytes =
            b"handle,title,description\np1,\"Mug, large\",\"He said \"\"hi\"\" once\"\n";

        let table = CsvParser.parse_bytes(bytes).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("title"), Some(&"Mug, large".to_string()));
        assert_eq!(
            table.rows[0].get("description"),
            Some(&"He said \"hi\" once".to_string())
        );
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let bytes = b"handle,title\np1,Mug\n,\n\np2,Cup\n";

        let table = CsvParser.parse_bytes(bytes).unwrap();

        // 空白行与全空行均应跳过
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_csv_parser_empty_input() {
        let result = CsvParser.parse_bytes(b"");
        assert!(matches!(result, Err(ImportError::EmptyFile)));
    }

    #[test]
    fn test_csv_parser_header_only() {
        // 仅表头不是解析错误，产出 0 数据行
        let table = CsvParser.parse_bytes(b"handle,title\n").unwrap();
        assert_eq!(table.rows.len(), 0);
        assert_eq!(table.headers.len(), 2);
    }

    #[test]
    fn test_csv_parser_headers_lowercased() {
        let table = CsvParser.parse_bytes(b"HANDLE, Title \np1,Mug\n").unwrap();
        assert_eq!(table.headers, vec!["handle", "title"]);
    }

    #[test]
    fn test_excel_parser_roundtrip_bytes() {
        // 用 rust_xlsxwriter 生成工作簿字节流，再用 calamine 解析
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.write_string(0, 0, "Handle").unwrap();
        worksheet.write_string(0, 1, "Title").unwrap();
        worksheet.write_string(1, 0, "p1").unwrap();
        worksheet.write_string(1, 1, "Mug").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = ExcelParser.parse_bytes(&bytes).unwrap();

        assert_eq!(table.headers, vec!["handle", "title"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("handle"), Some(&"p1".to_string()));
    }

    #[test]
    fn test_excel_parser_corrupt_bytes() {
        let result = ExcelParser.parse_bytes(b"not an xlsx container");
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_universal_parser_by_extension() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "handle,title").unwrap();
        writeln!(temp_file, "p1,Mug").unwrap();

        let (table, format) = UniversalFileParser.parse_path(temp_file.path()).unwrap();

        assert_eq!(format, FileFormat::Csv);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_universal_parser_unsupported_extension() {
        let temp_file = NamedTempFile::with_suffix(".txt").unwrap();
        let result = UniversalFileParser.parse_path(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_universal_parser_file_not_found() {
        let result = UniversalFileParser.parse_path("non_existent.csv");
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
