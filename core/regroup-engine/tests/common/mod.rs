//! FILENAME: tests/common/mod.rs
//! Fixtures for regroup-engine integration tests.

#![allow(dead_code)]

use std::rc::Rc;
use dataview::{
    CategoryColumn, ColumnMetadata, DataViewCategorical, PrimitiveValue, ScopeIdentity,
    ValueColumn, ValueColumns,
};

/// Sales by year (rows) and region (series), with "Sales" and "Profit" per region.
pub const SALES_BY_REGION: &str = r#"{
    "categories": [
        {
            "source": { "display_name": "Year", "query_name": "Calendar.Year" },
            "values": [{ "Number": 2022.0 }, { "Number": 2023.0 }]
        }
    ],
    "values": {
        "source": { "display_name": "Region", "query_name": "Geo.Region" },
        "columns": [
            { "identity": { "key": "North" }, "source": { "display_name": "Sales", "index": 1, "is_measure": true }, "values": [{ "Number": 100.0 }, { "Number": 110.0 }] },
            { "identity": { "key": "North" }, "source": { "display_name": "Profit", "index": 2, "is_measure": true }, "values": [{ "Number": 10.0 }, { "Number": 12.0 }] },
            { "identity": { "key": "South" }, "source": { "display_name": "Sales", "index": 1, "is_measure": true }, "values": [{ "Number": 200.0 }, { "Number": 180.0 }] },
            { "identity": { "key": "South" }, "source": { "display_name": "Profit", "index": 2, "is_measure": true }, "values": [{ "Number": 25.0 }, { "Number": 20.0 }] },
            { "identity": { "key": "West" }, "source": { "display_name": "Sales", "index": 1, "is_measure": true }, "values": [{ "Number": 50.0 }, { "Number": 75.0 }] },
            { "identity": { "key": "West" }, "source": { "display_name": "Profit", "index": 2, "is_measure": true }, "values": [{ "Number": 5.0 }, { "Number": 9.0 }] }
        ]
    }
}"#;

pub fn load(json: &str) -> DataViewCategorical {
    serde_json::from_str(json).expect("fixture should deserialize")
}

pub fn measure(name: &str, identity: Option<&str>) -> Rc<ValueColumn> {
    let mut column = ValueColumn::new(ColumnMetadata::measure(name), vec![PrimitiveValue::Number(1.0)]);
    column.identity = identity.map(ScopeIdentity::new);
    Rc::new(column)
}

pub fn year_categories(rows: usize) -> Option<Vec<CategoryColumn>> {
    let values = (0..rows)
        .map(|row| PrimitiveValue::Number(2000.0 + row as f64))
        .collect();
    Some(vec![CategoryColumn::new(ColumnMetadata::new("Year"), values)])
}

pub fn dynamic_table(rows: usize, columns: Vec<Rc<ValueColumn>>) -> DataViewCategorical {
    DataViewCategorical::new(
        year_categories(rows),
        Some(ValueColumns::new(columns, Some(ColumnMetadata::new("Region")))),
    )
}

pub fn static_table(rows: usize, columns: Vec<Rc<ValueColumn>>) -> DataViewCategorical {
    DataViewCategorical::new(year_categories(rows), Some(ValueColumns::new(columns, None)))
}

/// Display names of each group's columns, for compact assertions.
pub fn group_names(table: &DataViewCategorical) -> Vec<Vec<String>> {
    table
        .values
        .as_ref()
        .map(|values| {
            values
                .grouped()
                .iter()
                .map(|group| {
                    group
                        .values
                        .iter()
                        .map(|column| column.source.display_name.clone())
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default()
}
