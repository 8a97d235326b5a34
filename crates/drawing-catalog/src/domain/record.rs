//! Catalog and BOM row models

use super::Category;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One drawing row of the catalog.
///
/// Field names follow the source spreadsheet headers. Columns without a
/// dedicated field are kept in `extra`, in source column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "FILENAME", default, deserialize_with = "lenient_string")]
    pub filename: String,
    #[serde(rename = "BLOCK", default, deserialize_with = "lenient_string")]
    pub block: String,
    #[serde(
        rename = "MOD. NO",
        alias = "MOD_NO",
        alias = "MOD NO",
        default,
        deserialize_with = "lenient_string"
    )]
    pub module_no: String,
    #[serde(
        rename = "CATEGORY",
        alias = "category",
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
    #[serde(rename = "DWG. Title", alias = "TITLE", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(
        rename = "NESTING DWG",
        alias = "NESTING_DWG",
        default,
        deserialize_with = "lenient_string"
    )]
    pub nesting_dwg: String,
    #[serde(rename = "REV1", default, deserialize_with = "lenient_string")]
    pub revision: String,
    #[serde(rename = "REMARK", alias = "REMARKS", default, deserialize_with = "lenient_string")]
    pub remarks: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogRecord {
    /// Create a record with the three facet/identity fields set.
    pub fn new(block: &str, module_no: &str, filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            block: block.to_string(),
            module_no: module_no.to_string(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// Tag every untagged record of a set with `category`.
pub fn with_category(records: Vec<CatalogRecord>, category: Category) -> Vec<CatalogRecord> {
    records
        .into_iter()
        .map(|mut r| {
            r.category.get_or_insert(category);
            r
        })
        .collect()
}

/// One fabricated part (weld / material row) of the bill of materials.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BomRecord {
    #[serde(rename = "WELD UNIQUE ID", default, deserialize_with = "lenient_string")]
    pub weld_id: String,
    #[serde(rename = "BLOCK", default, deserialize_with = "lenient_string")]
    pub block: String,
    #[serde(rename = "FILENAME", default, deserialize_with = "lenient_string")]
    pub filename: String,
    #[serde(rename = "DWG. Title", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "MOD. NO", alias = "MOD_NO", default, deserialize_with = "lenient_string")]
    pub module_no: String,
    #[serde(rename = "MATNO", default, deserialize_with = "lenient_string")]
    pub matno: String,
    #[serde(rename = "STEEL NO", default, deserialize_with = "lenient_string")]
    pub steel_no: String,
    #[serde(
        rename = "NESTING DWG",
        alias = "NESTING_DWG",
        default,
        deserialize_with = "lenient_string"
    )]
    pub nesting_dwg: String,
    #[serde(rename = "Grade", default, deserialize_with = "lenient_string")]
    pub grade: String,
    /// Thickness
    #[serde(rename = "T", default, deserialize_with = "lenient_string")]
    pub thickness: String,
    /// Breadth
    #[serde(rename = "B", default, deserialize_with = "lenient_string")]
    pub breadth: String,
    /// Length or outer diameter
    #[serde(rename = "L(OD)", default, deserialize_with = "lenient_string")]
    pub length: String,
    #[serde(rename = "WEIGHT", default, deserialize_with = "lenient_string")]
    pub weight: String,
    #[serde(rename = "WNO", default, deserialize_with = "lenient_string")]
    pub wno: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BomRecord {
    /// The drawing reference used for cross-referencing: the filename when
    /// present, otherwise the nesting drawing.
    pub fn link_source(&self) -> &str {
        if self.filename.trim().is_empty() {
            &self.nesting_dwg
        } else {
            &self.filename
        }
    }
}

/// Render any JSON scalar as a string; null and missing become empty.
pub(crate) fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_to_string(&value))
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Category::from_key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalog_record_from_spreadsheet_row() {
        let row = json!({
            "BLOCK": "B1",
            "MOD. NO": 12,
            "FILENAME": "BA21-OS-TOPS-ST-706406-002-EN_01",
            "DWG. Title": null,
            "WORKSCOPE": "HULL"
        });
        let record: CatalogRecord = serde_json::from_value(row).unwrap();
        assert_eq!(record.block, "B1");
        assert_eq!(record.module_no, "12");
        assert_eq!(record.title, "");
        assert_eq!(record.category, None);
        assert_eq!(record.extra.get("WORKSCOPE"), Some(&json!("HULL")));
    }

    #[test]
    fn catalog_record_category_is_lenient() {
        let tagged: CatalogRecord =
            serde_json::from_value(json!({"CATEGORY": "assembly-cad"})).unwrap();
        assert_eq!(tagged.category, Some(Category::AssemblyCad));

        let unknown: CatalogRecord = serde_json::from_value(json!({"CATEGORY": "xyz"})).unwrap();
        assert_eq!(unknown.category, None);
    }

    #[test]
    fn nesting_alias() {
        let record: CatalogRecord =
            serde_json::from_value(json!({"NESTING_DWG": "N100 (2EA)"})).unwrap();
        assert_eq!(record.nesting_dwg, "N100 (2EA)");
    }

    #[test]
    fn with_category_keeps_existing_tags() {
        let records = vec![
            CatalogRecord::new("A1", "M1", "a"),
            CatalogRecord::new("A1", "M1", "b").with_category(Category::AssemblyCad),
        ];
        let tagged = with_category(records, Category::AssemblyPdf);
        assert_eq!(tagged[0].category, Some(Category::AssemblyPdf));
        assert_eq!(tagged[1].category, Some(Category::AssemblyCad));
    }

    #[test]
    fn bom_link_source_prefers_filename() {
        let mut row = BomRecord {
            nesting_dwg: "N1".to_string(),
            ..BomRecord::default()
        };
        assert_eq!(row.link_source(), "N1");
        row.filename = "F1".to_string();
        assert_eq!(row.link_source(), "F1");
    }
}
