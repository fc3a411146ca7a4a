use std::{borrow::Cow, fmt::Write};

/// Builds a pipe-delimited table that reads well in a terminal and renders as Markdown.
#[derive(Default)]
pub struct TextTableBuilder<'a, Seq> {
    headers: &'a [Cow<'a, str>],
    rows: Vec<Seq>,
    alignments: Cow<'a, [Alignment]>,
}

#[derive(Clone, Copy, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl<'a, Seq> TextTableBuilder<'a, Seq>
where
    Seq: AsRef<[Cow<'a, str>]> + Default,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: &'a [Alignment]) -> Self {
        self.alignments = Cow::Borrowed(alignments);
        self
    }

    pub fn headers(mut self, headers: &'a [Cow<'a, str>]) -> Self {
        self.headers = headers;
        if self.alignments.is_empty() {
            self.alignments = Cow::Owned(vec![Alignment::default(); self.headers.len()]);
        }
        self
    }

    pub fn row(mut self, row: Seq) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Seq>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> String {
        let col_count = self.headers.len();
        if col_count == 0 {
            return String::new();
        }

        let mut col_widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.as_ref().iter().enumerate().take(col_count) {
                col_widths[i] = col_widths[i].max(display_width(cell));
            }
        }
        // Room for the alignment colons in the separator row.
        for width in &mut col_widths {
            *width = (*width).max(3);
        }

        let mut table = String::with_capacity(64 * (self.rows.len() + 2));
        self.write_row(&mut table, self.headers, &col_widths);

        table.push('|');
        for (i, width) in col_widths.iter().enumerate() {
            let dashes = "-".repeat(width - 1);
            let _ = match self.alignment(i) {
                Alignment::Left => write!(&mut table, " :{dashes} |"),
                Alignment::Center => write!(&mut table, " :{}: |", &dashes[1..]),
                Alignment::Right => write!(&mut table, " {dashes}: |"),
            };
        }
        table.push('\n');

        for row in &self.rows {
            self.write_row(&mut table, row.as_ref(), &col_widths);
        }

        table
    }

    fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    fn write_row(&self, table: &mut String, cells: &[Cow<'a, str>], col_widths: &[usize]) {
        table.push('|');
        for (i, width) in col_widths.iter().copied().enumerate() {
            let cell = cells.get(i).map(|cell| &**cell).unwrap_or("");
            let padding = width.saturating_sub(display_width(cell));
            let (left, right) = match self.alignment(i) {
                Alignment::Left => (0, padding),
                Alignment::Center => (padding / 2, padding - padding / 2),
                Alignment::Right => (padding, 0),
            };
            let _ = write!(
                table,
                " {:left$}{}{:right$} |",
                "",
                escape_pipes(cell),
                ""
            );
        }
        table.push('\n');
    }
}

/// Monospace width, counting non-ASCII characters as double width.
fn display_width(text: &str) -> usize {
    text.chars()
        .map(|c| if c.is_ascii() { 1 } else { 2 })
        .sum()
}

fn escape_pipes(s: &str) -> Cow<'_, str> {
    if s.contains('|') {
        Cow::Owned(s.replace('|', "/"))
    } else {
        Cow::Borrowed(s)
    }
}
