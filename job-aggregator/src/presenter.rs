use crate::display::{render_cell, DetailView};
use crate::types::{AggregatorError, ColumnManifest, ColumnSpec, JobRecord, Presenter};
use serde::Serialize;
use std::io::Write;

/// Rows per page offered by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const OPTIONS: [usize; 4] = [10, 20, 50, 100];

    pub fn rows(&self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = AggregatorError;

    fn try_from(rows: usize) -> Result<Self, Self::Error> {
        match rows {
            10 => Ok(PageSize::Ten),
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::Hundred),
            other => Err(AggregatorError::Config(format!(
                "page size must be one of {:?}, got {}",
                PageSize::OPTIONS,
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub size: PageSize,
    /// Zero-based
    pub index: usize,
}

impl Pagination {
    pub fn new(size: PageSize, index: usize) -> Self {
        Self { size, index }
    }

    /// Rows of the current page; empty past the end.
    pub fn page<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.index.saturating_mul(self.size.rows());
        if start >= rows.len() {
            return &rows[rows.len()..];
        }
        let end = (start + self.size.rows()).min(rows.len());
        &rows[start..end]
    }

    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.size.rows()).max(1)
    }
}

/// Plain-text table, one page at a time.
pub struct TablePresenter<W: Write> {
    out: W,
    pagination: Pagination,
    details: bool,
}

impl<W: Write> TablePresenter<W> {
    pub fn new(out: W, pagination: Pagination) -> Self {
        Self {
            out,
            pagination,
            details: false,
        }
    }

    /// Print the expanded detail view under every row.
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn char_width(column: &ColumnSpec) -> usize {
        (column.width as usize / 6).max(column.label.chars().count()).max(4)
    }

    fn write_row(&mut self, cells: &[(String, usize)]) -> std::io::Result<()> {
        let line = cells
            .iter()
            .map(|(cell, width)| fit(cell, *width))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(self.out, "{}", line.trim_end())
    }

    fn write_detail(&mut self, record: &JobRecord) -> std::io::Result<()> {
        let detail = DetailView::from_record(record);
        writeln!(self.out, "    Job Description: {}", detail.description)?;
        for (label, value) in detail.fields() {
            writeln!(self.out, "    {:<22}{}", label, value)?;
        }
        Ok(())
    }
}

fn fit(cell: &str, width: usize) -> String {
    let count = cell.chars().count();
    if count <= width {
        format!("{}{}", cell, " ".repeat(width - count))
    } else {
        let mut truncated: String = cell.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

impl<W: Write> Presenter for TablePresenter<W> {
    fn present(&mut self, manifest: &ColumnManifest, records: &[JobRecord]) -> anyhow::Result<()> {
        let widths: Vec<usize> = manifest.columns.iter().map(Self::char_width).collect();

        let header: Vec<(String, usize)> = manifest
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| (column.label.clone(), *width))
            .collect();
        self.write_row(&header)?;

        let rule_len = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        writeln!(self.out, "{}", "-".repeat(rule_len))?;

        for record in self.pagination.page(records) {
            let cells: Vec<(String, usize)> = manifest
                .columns
                .iter()
                .zip(&widths)
                .map(|(column, width)| (render_cell(column, record), *width))
                .collect();
            self.write_row(&cells)?;
            if self.details {
                self.write_detail(record)?;
            }
        }

        writeln!(
            self.out,
            "Page {} of {} ({} records, {} per page)",
            self.pagination.index + 1,
            self.pagination.page_count(records.len()),
            records.len(),
            self.pagination.size.rows()
        )?;
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    columns: &'a ColumnManifest,
    records: &'a [JobRecord],
}

/// `{columns, records}` for a browser table widget.
pub struct JsonPresenter<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonPresenter<W> {
    fn present(&mut self, manifest: &ColumnManifest, records: &[JobRecord]) -> anyhow::Result<()> {
        let document = JsonDocument {
            columns: manifest,
            records,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &document)?;
        } else {
            serde_json::to_writer(&mut self.out, &document)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}
