/// Column layout for the dashboard grid drawn into the output image.
///
/// Tracks the widest cell per column (in characters) as rows are added, then
/// converts widths into pixel geometry for the renderer.
pub struct GridLayout {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl GridLayout {
    /// Create a layout with the given column headers
    pub fn new(headers: Vec<&str>) -> Self {
        let col_widths = headers.iter().map(|h| h.len()).collect();
        let headers = headers.iter().map(|h| h.to_string()).collect();
        GridLayout {
            headers,
            rows: Vec::new(),
            col_widths,
        }
    }

    /// Add a row, widening any column whose cell is the longest seen so far
    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, col) in row.iter().enumerate() {
            if i < self.col_widths.len() {
                self.col_widths[i] = self.col_widths[i].max(col.len());
            }
        }
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Per-column pixel widths: character count times glyph width, plus
    /// padding on both sides.
    pub fn column_widths_px(&self, char_px: u32, pad_px: u32) -> Vec<u32> {
        self.col_widths
            .iter()
            .map(|&w| w as u32 * char_px + 2 * pad_px)
            .collect()
    }

    /// X offset of each column's left edge, relative to the grid origin.
    pub fn column_offsets_px(&self, char_px: u32, pad_px: u32) -> Vec<u32> {
        let mut offsets = Vec::with_capacity(self.col_widths.len());
        let mut x = 0;
        for width in self.column_widths_px(char_px, pad_px) {
            offsets.push(x);
            x += width;
        }
        offsets
    }

    pub fn total_width_px(&self, char_px: u32, pad_px: u32) -> u32 {
        self.column_widths_px(char_px, pad_px).iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_track_widest_cell() {
        let mut grid = GridLayout::new(vec!["Coin", "Price"]);
        grid.add_row(vec!["Bitcoin".to_string(), "$64,000".to_string()]);
        grid.add_row(vec!["Sol".to_string(), "$150".to_string()]);

        // "Bitcoin" (7) beats "Coin" (4); "$64,000" (7) beats "Price" (5)
        assert_eq!(grid.column_widths_px(10, 0), vec![70, 70]);
        assert_eq!(grid.rows().len(), 2);
    }

    #[test]
    fn test_offsets_and_total() {
        let mut grid = GridLayout::new(vec!["A", "BB", "CCC"]);
        grid.add_row(vec!["x".to_string(), "y".to_string(), "z".to_string()]);

        let offsets = grid.column_offsets_px(10, 5);
        assert_eq!(offsets, vec![0, 20, 50]);
        assert_eq!(grid.total_width_px(10, 5), 90);
    }

    #[test]
    fn test_headers_set_minimum_width() {
        let grid = GridLayout::new(vec!["Week Change"]);
        assert_eq!(grid.total_width_px(1, 0), 11);
    }
}
