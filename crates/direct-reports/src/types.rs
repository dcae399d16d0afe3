//! Types for the Reports service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use yandex_direct_client::ApiUnits;

use crate::error::{Error, ErrorKind, Result};

/// `DateRangeType` that requires explicit `DateFrom`/`DateTo`.
pub const CUSTOM_DATE: &str = "CUSTOM_DATE";

/// How the service builds the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// The service picks online or offline mode.
    Auto,
    /// Build while the request is open.
    Online,
    /// Queue the report and poll for it.
    Offline,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Auto => "auto",
            ProcessingMode::Online => "online",
            ProcessingMode::Offline => "offline",
        }
    }
}

/// A report request: the definition plus the header switches that control
/// the output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub report_definition: Value,
    pub return_money_in_micros: bool,
    pub skip_report_header: bool,
    pub skip_column_header: bool,
    pub skip_report_summary: bool,
    pub include_vat: Option<bool>,
    pub include_discount: Option<bool>,
    pub processing_mode: Option<ProcessingMode>,
    pub extra_headers: BTreeMap<String, String>,
}

fn flag(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}

fn yes_no(value: bool) -> String {
    if value { "YES" } else { "NO" }.to_string()
}

impl ReportRequest {
    /// Create a request with the default switches: no report title, no
    /// summary line, column names included, money in currency units.
    pub fn new(report_definition: Value) -> Self {
        Self {
            report_definition,
            return_money_in_micros: false,
            skip_report_header: true,
            skip_column_header: false,
            skip_report_summary: true,
            include_vat: None,
            include_discount: None,
            processing_mode: None,
            extra_headers: BTreeMap::new(),
        }
    }

    /// Create a request from a typed definition.
    pub fn from_definition(definition: &ReportDefinition) -> Result<Self> {
        Ok(Self::new(definition.to_value()?))
    }

    pub fn with_money_in_micros(mut self, enabled: bool) -> Self {
        self.return_money_in_micros = enabled;
        self
    }

    pub fn with_report_header(mut self, include: bool) -> Self {
        self.skip_report_header = !include;
        self
    }

    pub fn with_column_header(mut self, include: bool) -> Self {
        self.skip_column_header = !include;
        self
    }

    pub fn with_report_summary(mut self, include: bool) -> Self {
        self.skip_report_summary = !include;
        self
    }

    pub fn with_vat(mut self, include: bool) -> Self {
        self.include_vat = Some(include);
        self
    }

    pub fn with_discount(mut self, include: bool) -> Self {
        self.include_discount = Some(include);
        self
    }

    pub fn with_processing_mode(mut self, mode: ProcessingMode) -> Self {
        self.processing_mode = Some(mode);
        self
    }

    /// Add a header sent after the built-in ones, replacing any of them with
    /// the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Headers describing the output format. Extra headers come last.
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            (
                "returnMoneyInMicros".to_string(),
                flag(self.return_money_in_micros),
            ),
            ("skipReportHeader".to_string(), flag(self.skip_report_header)),
            ("skipColumnHeader".to_string(), flag(self.skip_column_header)),
            (
                "skipReportSummary".to_string(),
                flag(self.skip_report_summary),
            ),
        ];
        if let Some(vat) = self.include_vat {
            headers.push(("IncludeVAT".to_string(), yes_no(vat)));
        }
        if let Some(discount) = self.include_discount {
            headers.push(("IncludeDiscount".to_string(), yes_no(discount)));
        }
        if let Some(mode) = self.processing_mode {
            headers.push(("processingMode".to_string(), mode.as_str().to_string()));
        }
        headers.extend(
            self.extra_headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        headers
    }

    /// Value of a boolean header as it goes on the wire, extra headers
    /// included. The last header with a matching name wins.
    pub(crate) fn effective_flag(&self, name: &str) -> bool {
        self.headers()
            .iter()
            .rev()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .is_some_and(|(_, value)| value.trim().eq_ignore_ascii_case("true"))
    }

    /// Request body.
    pub fn payload(&self) -> Value {
        json!({ "params": self.report_definition })
    }
}

/// A `SelectionCriteria.Filter` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Filter {
    pub field: String,
    pub operator: String,
    pub values: Vec<String>,
}

/// An `OrderBy` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBy {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

/// Builder for the `params` object of a report request.
///
/// ```rust,ignore
/// let definition = ReportDefinition::new("Weekly", "CAMPAIGN_PERFORMANCE_REPORT")
///     .with_field_names(["Date", "CampaignId", "Clicks", "Cost"])
///     .with_date_range(from, to)
///     .with_filter("CampaignId", "IN", ["123", "456"]);
/// let request = ReportRequest::from_definition(&definition)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDefinition {
    pub report_name: String,
    pub report_type: String,
    pub date_range_type: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub filters: Vec<Filter>,
    pub field_names: Vec<String>,
    pub order_by: Vec<OrderBy>,
    pub page_limit: Option<u64>,
    pub include_vat: bool,
    pub format: String,
}

impl ReportDefinition {
    /// A TSV report over the last 7 days, VAT included.
    pub fn new(report_name: impl Into<String>, report_type: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
            report_type: report_type.into(),
            date_range_type: "LAST_7_DAYS".to_string(),
            date_from: None,
            date_to: None,
            filters: Vec::new(),
            field_names: Vec::new(),
            order_by: Vec::new(),
            page_limit: None,
            include_vat: true,
            format: "TSV".to_string(),
        }
    }

    pub fn with_field_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.field_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_date_range_type(mut self, range: impl Into<String>) -> Self {
        self.date_range_type = range.into();
        self
    }

    /// Explicit dates; switches the range type to `CUSTOM_DATE`.
    pub fn with_date_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.date_range_type = CUSTOM_DATE.to_string();
        self.date_from = Some(from);
        self.date_to = Some(to);
        self
    }

    pub fn with_filter<S: Into<String>>(
        mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            operator: operator.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_order_by(mut self, field: impl Into<String>, sort_order: Option<&str>) -> Self {
        self.order_by.push(OrderBy {
            field: field.into(),
            sort_order: sort_order.map(str::to_string),
        });
        self
    }

    pub fn with_page_limit(mut self, limit: u64) -> Self {
        self.page_limit = Some(limit);
        self
    }

    pub fn with_vat(mut self, include: bool) -> Self {
        self.include_vat = include;
        self
    }

    /// Check the definition and render it as the `params` object.
    pub fn to_value(&self) -> Result<Value> {
        let invalid = |msg: &str| Err(Error::new(ErrorKind::Definition(msg.to_string())));

        if self.report_name.trim().is_empty() {
            return invalid("ReportName cannot be empty");
        }
        if self.field_names.is_empty() {
            return invalid("FieldNames cannot be empty");
        }

        let custom = self.date_range_type == CUSTOM_DATE;
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) if custom => {
                if from > to {
                    return invalid("DateFrom must not be after DateTo");
                }
            }
            (None, None) if !custom => {}
            _ if custom => return invalid("CUSTOM_DATE requires both DateFrom and DateTo"),
            _ => return invalid("DateFrom/DateTo are only allowed with CUSTOM_DATE"),
        }

        let mut criteria = serde_json::Map::new();
        if let Some(from) = self.date_from {
            criteria.insert("DateFrom".to_string(), serde_json::to_value(from)?);
        }
        if let Some(to) = self.date_to {
            criteria.insert("DateTo".to_string(), serde_json::to_value(to)?);
        }
        if !self.filters.is_empty() {
            criteria.insert("Filter".to_string(), serde_json::to_value(&self.filters)?);
        }

        let mut params = serde_json::Map::new();
        params.insert("SelectionCriteria".to_string(), Value::Object(criteria));
        params.insert("FieldNames".to_string(), json!(self.field_names));
        if !self.order_by.is_empty() {
            params.insert("OrderBy".to_string(), serde_json::to_value(&self.order_by)?);
        }
        if let Some(limit) = self.page_limit {
            params.insert("Page".to_string(), json!({ "Limit": limit }));
        }
        params.insert("ReportName".to_string(), json!(self.report_name));
        params.insert("ReportType".to_string(), json!(self.report_type));
        params.insert("DateRangeType".to_string(), json!(self.date_range_type));
        params.insert("Format".to_string(), json!(self.format));
        params.insert("IncludeVAT".to_string(), json!(yes_no(self.include_vat)));

        Ok(Value::Object(params))
    }
}

/// A generated report.
#[derive(Debug, Clone)]
pub struct Report {
    /// Raw TSV body.
    pub body: String,
    pub request_id: Option<String>,
    pub units: Option<ApiUnits>,
    pub(crate) has_title: bool,
    pub(crate) has_column_header: bool,
    pub(crate) has_summary: bool,
}

impl Report {
    pub(crate) fn new(body: String, request: &ReportRequest) -> Self {
        Self {
            body,
            request_id: None,
            units: None,
            has_title: !request.effective_flag("skipReportHeader"),
            has_column_header: !request.effective_flag("skipColumnHeader"),
            has_summary: !request.effective_flag("skipReportSummary"),
        }
    }

    /// Parse the TSV body. The title line and the `Total rows` summary line
    /// are dropped when the request asked for them.
    pub fn table(&self) -> Result<ReportTable> {
        let mut lines: Vec<&str> = self.body.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if self.has_title && !lines.is_empty() {
            lines.remove(0);
        }
        if self.has_summary {
            lines.pop();
        }

        let data = lines.join("\n");
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(self.has_column_header)
            .from_reader(data.as_bytes());

        let columns = if self.has_column_header {
            reader.headers()?.iter().map(str::to_string).collect()
        } else {
            Vec::new()
        };

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(ReportTable { columns, rows })
    }
}

/// Parsed report rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    /// Column names; empty when the column header was skipped.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell of `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let index = self.column_index(name)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }
}
