// ==========================================
// 记录管理服务 - 文件摄取器
// ==========================================
// 职责: 字节流 + 声明扩展名 → 惰性 ImportRow 序列
// 支持: Excel (.xlsx, 仅首个工作表) / CSV (.csv, 逗号分隔)
// 约定: 第 1 行为表头,跳过;数据行号从 2 起
// ==========================================

use crate::domain::import::ImportRow;
use crate::importer::error::ImportError;
use calamine::{Reader, Xlsx};
use csv::ReaderBuilder;
use std::io::Cursor;

/// 单次上传允许的最大数据行数
pub const MAX_IMPORT_ROWS: usize = 1000;

// ==========================================
// FileIngestor - 扩展名分发入口
// ==========================================
pub struct FileIngestor;

impl FileIngestor {
    /// 打开上传的字节流,返回候选行序列
    ///
    /// # 参数
    /// - bytes: 上传文件内容
    /// - extension: 声明的扩展名（大小写不敏感,不含点号）
    ///
    /// # 返回
    /// - Ok(RowStream): 惰性、有限、不可重放的行序列
    /// - Err(EmptyFile): 空负载 / 无工作表 / 无数据维度
    /// - Err(UnsupportedFormat): 既非 xlsx 也非 csv
    /// - Err(RowLimitExceeded): Excel 声明维度超限（预检）
    ///
    /// # 行数上限
    /// Excel 在打开时按已用区域预检;CSV 在迭代中增量计数,
    /// 第 1001 个数据行出现时由流产出致命错误,整批作废
    pub fn open(bytes: &[u8], extension: &str) -> Result<RowStream, ImportError> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        match extension.to_ascii_lowercase().as_str() {
            "csv" => Self::open_csv(bytes),
            "xlsx" => Self::open_sheet(bytes),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }

    fn open_csv(bytes: &[u8]) -> Result<RowStream, ImportError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致,列数校验交给验证器
            .from_reader(Cursor::new(bytes.to_vec()));

        Ok(RowStream::Csv(CsvRowStream {
            records: reader.into_records(),
            data_rows: 0,
        }))
    }

    fn open_sheet(bytes: &[u8]) -> Result<RowStream, ImportError> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec()))
            .map_err(|e| ImportError::SpreadsheetParseError(e.to_string()))?;

        // 仅读取第一个工作表
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        let sheet_name = sheet_names[0].clone();
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::SpreadsheetParseError(e.to_string()))?;

        // 预检: 已用区域的声明维度
        let height = range.height();
        if height <= 1 {
            return Err(ImportError::EmptyFile);
        }
        if height - 1 > MAX_IMPORT_ROWS {
            return Err(ImportError::RowLimitExceeded {
                limit: MAX_IMPORT_ROWS,
            });
        }

        // calamine 已将区域整体载入内存,此处直接物化;
        // 行号按物理行计（表头=1）,全空行跳过但保留行号推进
        let mut rows = Vec::new();
        for (idx, cells) in range.rows().enumerate().skip(1) {
            let raw_fields: Vec<String> = cells
                .iter()
                .map(|cell| cell.to_string().trim().to_string())
                .collect();

            if raw_fields.iter().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(ImportRow {
                row_number: idx + 1,
                raw_fields,
            });
        }

        if rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        Ok(RowStream::Sheet(rows.into_iter()))
    }
}

// ==========================================
// RowStream - 候选行序列
// ==========================================
// CSV 分支为真惰性（增量读取 + 增量限行）,
// Excel 分支为预检后的物化序列
pub enum RowStream {
    Csv(CsvRowStream),
    Sheet(std::vec::IntoIter<ImportRow>),
}

impl Iterator for RowStream {
    type Item = Result<ImportRow, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            RowStream::Csv(stream) => stream.next(),
            RowStream::Sheet(rows) => rows.next().map(Ok),
        }
    }
}

// ==========================================
// CsvRowStream - CSV 行序列
// ==========================================
pub struct CsvRowStream {
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    data_rows: usize,
}

impl Iterator for CsvRowStream {
    type Item = Result<ImportRow, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => return Some(Err(ImportError::from(e))),
        };

        self.data_rows += 1;
        if self.data_rows > MAX_IMPORT_ROWS {
            return Some(Err(ImportError::RowLimitExceeded {
                limit: MAX_IMPORT_ROWS,
            }));
        }

        // 行号取文件物理行（表头占第 1 行,空行不产出记录但行号照常推进）
        let row_number = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(self.data_rows + 1);

        Some(Ok(ImportRow {
            row_number,
            raw_fields: record.iter().map(|s| s.to_string()).collect(),
        }))
    }
}
