use crate::cli::{io, ui::style::UiStyle};

/// Column header; the rendered width grows to fit the widest cell.
#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
}

impl TableColumn {
    pub fn new(header: impl Into<String>, min_width: usize) -> Self {
        Self {
            header: header.into(),
            min_width,
        }
    }
}

/// Simple table model used for read-only listings.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row<S: Into<String>>(&mut self, cells: Vec<S>) {
        self.rows
            .push(cells.into_iter().map(|value| value.into()).collect());
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| display_width(cell))
                    .chain([display_width(&column.header), column.min_width])
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

/// Renders [`Table`]s as padded columns.
pub struct TableRenderer;

impl TableRenderer {
    pub fn lines(table: &Table, style: &UiStyle) -> Vec<String> {
        let widths = table.widths();
        let total = widths.iter().map(|width| width + 2).sum::<usize>();
        let mut lines = Vec::with_capacity(table.rows.len() + 3);

        let header: Vec<String> = table
            .columns
            .iter()
            .map(|column| column.header.clone())
            .collect();
        lines.push(style.apply_header_style(&join_padded(&header, &widths)));
        lines.push(style.horizontal_line(total));
        for row in &table.rows {
            lines.push(join_padded(row, &widths));
        }
        lines
    }

    pub fn render(table: &Table, style: &UiStyle) {
        for line in Self::lines(table, style) {
            io::println_text(&line);
        }
    }
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, width) in widths.iter().enumerate() {
        let cell = cells.get(idx).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        if idx + 1 < widths.len() {
            let pad = width.saturating_sub(display_width(cell)) + 2;
            line.push_str(&" ".repeat(pad));
        }
    }
    line.trim_end().to_string()
}

/// Terminal columns taken by `text`. Emoji and CJK glyphs take two; a
/// variation selector takes none.
pub(crate) fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

fn char_width(ch: char) -> usize {
    match u32::from(ch) {
        0xFE00..=0xFE0F | 0x200B..=0x200D => 0,
        0x1100..=0x115F
        | 0x231A..=0x231B
        | 0x23E9..=0x23EC
        | 0x23F0
        | 0x23F3
        | 0x25FD..=0x25FE
        | 0x2614..=0x2615
        | 0x2648..=0x2653
        | 0x267F
        | 0x2693
        | 0x26A1
        | 0x26AA..=0x26AB
        | 0x26BD..=0x26BE
        | 0x26C4..=0x26C5
        | 0x26CE
        | 0x26D4
        | 0x26EA
        | 0x26F2..=0x26F3
        | 0x26F5
        | 0x26FA
        | 0x26FD
        | 0x2705
        | 0x270A..=0x270B
        | 0x2728
        | 0x274C
        | 0x274E
        | 0x2753..=0x2755
        | 0x2757
        | 0x2795..=0x2797
        | 0x27B0
        | 0x27BF
        | 0x2B1B..=0x2B1C
        | 0x2B50
        | 0x2B55
        | 0x2E80..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x1F000..=0x1FAFF
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}
