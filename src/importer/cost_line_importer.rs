// ==========================================
// 装修承包财务引擎 - 成本流水导入器
// ==========================================
// 列: project_id, category, amount, description (可选)
// 红线: 非法类别/金额直接拒绝,不做兜底
// ==========================================

use crate::domain::project::CostLineItem;
use crate::domain::types::CostCategory;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawRecord};
use std::io::Read;
use std::path::Path;

const COL_PROJECT_ID: &str = "project_id";
const COL_CATEGORY: &str = "category";
const COL_AMOUNT: &str = "amount";
const COL_DESCRIPTION: &str = "description";

pub struct CostLineImporter {
    parser: CsvParser,
}

impl CostLineImporter {
    pub fn new() -> Self {
        Self { parser: CsvParser }
    }

    /// 从 CSV 文件导入成本流水
    pub fn import_csv(&self, path: &Path) -> ImportResult<Vec<CostLineItem>> {
        let records = self.parser.parse_file(path)?;
        let items = self.map_records(records)?;
        tracing::info!(path = %path.display(), count = items.len(), "成本流水导入完成");
        Ok(items)
    }

    /// 从任意输入源导入成本流水
    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<CostLineItem>> {
        let records = self.parser.parse_reader(reader)?;
        self.map_records(records)
    }

    fn map_records(&self, records: Vec<RawRecord>) -> ImportResult<Vec<CostLineItem>> {
        records
            .into_iter()
            .map(|(row, fields)| -> ImportResult<CostLineItem> {
                let project_id = required(&fields, row, COL_PROJECT_ID)?;

                let category_raw = required(&fields, row, COL_CATEGORY)?;
                let category = category_raw.parse::<CostCategory>().map_err(|e| {
                    ImportError::FieldValueError {
                        row,
                        field: COL_CATEGORY.to_string(),
                        message: e.to_string(),
                    }
                })?;

                let amount_raw = required(&fields, row, COL_AMOUNT)?;
                let amount = parse_amount(&amount_raw).ok_or_else(|| ImportError::FieldValueError {
                    row,
                    field: COL_AMOUNT.to_string(),
                    message: format!("金额必须为有限非负数, 实际 {}", amount_raw),
                })?;

                let description = fields
                    .get(COL_DESCRIPTION)
                    .filter(|d| !d.is_empty())
                    .cloned();

                Ok(CostLineItem {
                    project_id,
                    category,
                    amount,
                    description,
                })
            })
            .collect()
    }
}

impl Default for CostLineImporter {
    fn default() -> Self {
        Self::new()
    }
}

fn required(
    fields: &std::collections::HashMap<String, String>,
    row: usize,
    column: &str,
) -> ImportResult<String> {
    match fields.get(column) {
        None => Err(ImportError::MissingColumn(column.to_string())),
        Some(v) if v.is_empty() => Err(ImportError::FieldValueError {
            row,
            field: column.to_string(),
            message: "值为空".to_string(),
        }),
        Some(v) => Ok(v.clone()),
    }
}

/// 解析金额,允许 "$" 前缀与千分位
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_reader() {
        let data = "project_id,category,amount,description\n\
                    P-1,labor,\"$1,250.50\",Framing crew\n\
                    P-1,Material,400,\n\
                    P-2,subcontract,3000,Electrician\n";

        let items = CostLineImporter::new().import_reader(data.as_bytes()).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].category, CostCategory::Labor);
        assert_eq!(items[0].amount, 1250.5);
        assert_eq!(items[0].description.as_deref(), Some("Framing crew"));
        assert_eq!(items[1].category, CostCategory::Material);
        assert_eq!(items[1].description, None);
        assert_eq!(items[2].project_id, "P-2");
    }

    #[test]
    fn test_bad_category_reports_row() {
        let data = "project_id,category,amount\nP-1,labor,10\nP-1,equipment,20\n";
        let err = CostLineImporter::new().import_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ImportError::FieldValueError { row: 2, ref field, .. } if field == "category"
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let data = "project_id,category,amount\nP-1,labor,-10\n";
        let err = CostLineImporter::new().import_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::FieldValueError { ref field, .. } if field == "amount"));
    }

    #[test]
    fn test_missing_column() {
        let data = "project_id,amount\nP-1,10\n";
        let err = CostLineImporter::new().import_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn(ref c) if c == "category"));
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1,800"), Some(1800.0));
        assert_eq!(parse_amount("$42.10"), Some(42.1));
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("abc"), None);
    }
}
