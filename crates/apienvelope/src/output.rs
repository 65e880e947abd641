use std::collections::BTreeMap;
use std::io::IsTerminal;

use apienvelope_core::Envelope;
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary<'a> {
    pub api_version: &'a str,
    pub context: &'a str,
    pub id: &'a str,
    pub method: &'a str,
    pub params: BTreeMap<&'a str, &'a str>,
    pub kind: &'a str,
    pub fields: Vec<String>,
    pub deleted: bool,
    pub item_count: usize,
    pub current_item_count: usize,
    pub total_items: i64,
    pub page_index: i64,
    pub total_pages: i64,
    pub error_code: i64,
    pub error_message: &'a str,
    pub error_details: usize,
}

impl<'a> Summary<'a> {
    pub fn of(env: &'a Envelope) -> Self {
        Self {
            api_version: &env.api_version,
            context: &env.context,
            id: &env.id,
            method: &env.method,
            params: env
                .params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            kind: &env.data.kind,
            fields: env.data.fields(),
            deleted: env.data.deleted,
            item_count: env.data.item_count(),
            current_item_count: env.data.current_item_count(),
            total_items: env.data.total_items,
            page_index: env.data.page_index,
            total_pages: env.data.total_pages,
            error_code: env.error.code,
            error_message: &env.error.message,
            error_details: env.error.errors.len(),
        }
    }

    fn rows(&self) -> Vec<(&'static str, String)> {
        let params = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        vec![
            ("apiVersion", self.api_version.to_string()),
            ("context", self.context.to_string()),
            ("id", self.id.to_string()),
            ("method", self.method.to_string()),
            ("params", params),
            ("kind", self.kind.to_string()),
            ("fields", self.fields.join(",")),
            ("deleted", self.deleted.to_string()),
            ("items", self.item_count.to_string()),
            ("currentItemCount", self.current_item_count.to_string()),
            ("totalItems", self.total_items.to_string()),
            ("pageIndex", self.page_index.to_string()),
            ("totalPages", self.total_pages.to_string()),
            ("error.code", self.error_code.to_string()),
            ("error.message", self.error_message.to_string()),
            ("error.errors", self.error_details.to_string()),
        ]
    }
}

pub fn print_summary(summary: &Summary<'_>, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(summary).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (name, value) in summary.rows() {
                table.add_row(vec![name.to_string(), value]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for (name, value) in summary.rows() {
                if !value.is_empty() {
                    println!("{name}={value}");
                }
            }
        }
    }
}

#[derive(Serialize)]
struct ItemOutput<'a> {
    index: usize,
    item: &'a Value,
}

/// Accumulates decoded items so the table format can render them together.
pub struct ItemPrinter {
    format: OutputFormat,
    table: Option<Table>,
}

impl ItemPrinter {
    pub fn new(format: OutputFormat) -> Self {
        let table = match format {
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["INDEX", "ITEM"]);
                Some(table)
            }
            _ => None,
        };
        Self { format, table }
    }

    pub fn print(&mut self, index: usize, item: &Value) {
        match self.format {
            OutputFormat::Json => {
                let out = ItemOutput { index, item };
                println!(
                    "{}",
                    serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
                );
            }
            OutputFormat::Table => {
                if let Some(table) = self.table.as_mut() {
                    table.add_row(vec![index.to_string(), item.to_string()]);
                }
            }
            OutputFormat::Pretty => {
                let body = serde_json::to_string_pretty(item).unwrap_or_else(|_| item.to_string());
                println!("[{index}] {body}");
            }
        }
    }

    pub fn finish(self) {
        if let Some(table) = self.table {
            println!("{table}");
        }
    }
}
