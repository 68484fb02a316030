//! Styled spreadsheet output, re-saved after every appended record.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use concerts_core::{locale, ConcertRecord, RecordSink};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::SinkError;

const HEADER_FILL: u32 = 0x0044_72C4;
const DATA_BORDER: u32 = 0x00D3_D3D3;
const ZEBRA_FILL: u32 = 0x00F2_F2F2;

const COLUMN_WIDTHS: [f64; 6] = [15.0, 20.0, 35.0, 40.0, 20.0, 18.0];

/// Columns rendered left-aligned and wrapped (venue, program). The rest are
/// centered.
const WRAPPED_COLUMNS: [u16; 2] = [2, 3];

/// Name of the output file for a run started at `now`.
#[must_use]
pub fn output_filename<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("concerts_{}.xlsx", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Value written into one cell of a data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    Number(u32),
    Blank,
}

/// The six cells of a record's row, in header order.
#[must_use]
pub fn row_cells(record: &ConcertRecord) -> [Cell<'_>; 6] {
    [
        Cell::Text(&record.date),
        Cell::Text(&record.city),
        Cell::Text(&record.venue),
        Cell::Text(&record.program),
        Cell::Text(record.ticket_status.label()),
        record.available_seats.map_or(Cell::Blank, Cell::Number),
    ]
}

/// Whether a zero-based sheet row is an even row as the spreadsheet numbers
/// them (the header is row 1).
fn is_zebra_row(row: u32) -> bool {
    (row + 1) % 2 == 0
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_font_size(12)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Black)
}

fn data_format(column: u16, zebra: bool) -> Format {
    let mut format = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(DATA_BORDER))
        .set_align(FormatAlign::VerticalCenter);
    format = if WRAPPED_COLUMNS.contains(&column) {
        format.set_align(FormatAlign::Left).set_text_wrap()
    } else {
        format.set_align(FormatAlign::Center)
    };
    if zebra {
        format = format.set_background_color(Color::RGB(ZEBRA_FILL));
    }
    format
}

/// Appends records to a single-sheet workbook on disk.
///
/// The file is written when the sink is created and again after each
/// record, so an interrupted run keeps everything processed so far.
pub struct XlsxSink {
    workbook: Workbook,
    path: PathBuf,
    next_row: u32,
}

impl XlsxSink {
    /// Create the workbook in `dir` with a styled header row and save it.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::OutputDir`] if `dir` cannot be created and
    /// [`SinkError::Xlsx`] if the workbook cannot be built or written.
    pub fn create<Tz>(dir: &Path, now: &DateTime<Tz>) -> Result<Self, SinkError>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        std::fs::create_dir_all(dir).map_err(|source| SinkError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dir.join(output_filename(now));

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(locale::SHEET_NAME)?;

        let header = header_format();
        for (col, label) in (0u16..).zip(locale::COLUMN_HEADERS) {
            sheet.write_string_with_format(0, col, label, &header)?;
        }
        for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
            sheet.set_column_width(col, width)?;
        }
        sheet.set_freeze_panes(1, 0)?;

        workbook.save(&path)?;
        tracing::info!(path = %path.display(), "output workbook created");

        Ok(Self {
            workbook,
            path,
            next_row: 1,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of data rows written so far.
    #[cfg(test)]
    fn rows_written(&self) -> u32 {
        self.next_row - 1
    }
}

impl RecordSink for XlsxSink {
    type Error = SinkError;

    fn append(&mut self, record: &ConcertRecord) -> Result<(), SinkError> {
        let row = self.next_row;
        let zebra = is_zebra_row(row);
        let sheet = self.workbook.worksheet_from_index(0)?;

        for (col, cell) in (0u16..).zip(row_cells(record)) {
            let format = data_format(col, zebra);
            match cell {
                Cell::Text(text) => {
                    sheet.write_string_with_format(row, col, text, &format)?;
                }
                Cell::Number(n) => {
                    sheet.write_number_with_format(row, col, f64::from(n), &format)?;
                }
                Cell::Blank => {
                    sheet.write_blank(row, col, &format)?;
                }
            }
        }

        self.workbook.save(&self.path)?;
        self.next_row += 1;
        tracing::debug!(row, path = %self.path.display(), "record saved");
        Ok(())
    }
}
