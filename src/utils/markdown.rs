use serde::Serialize;

/// 从模型回答中解析出的 Markdown 表格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkdownTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// 每行第一列的值，跳过重复出现的 `Crop` 表头
    pub fn first_column_values(&self) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.first())
            .filter(|cell| !cell.is_empty() && !cell.eq_ignore_ascii_case("crop"))
            .cloned()
            .collect()
    }

    /// 按表头名取某列（不区分大小写）
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self
            .header
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 解析 Markdown 表格。
///
/// 第一行为表头，随后的对齐行（`|---|:--|`）被跳过；
/// 列数与表头不一致的行丢弃。少于两行时返回 `None`。
pub fn parse_markdown_table(md: &str) -> Option<MarkdownTable> {
    let lines: Vec<&str> = md
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return None;
    }

    let header = split_row(lines[0]);
    let rows = lines[1..]
        .iter()
        .skip_while(|line| is_alignment_row(line))
        .map(|line| split_row(line))
        .filter(|row| row.len() == header.len())
        .collect();

    Some(MarkdownTable { header, rows })
}

fn split_row(line: &str) -> Vec<String> {
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);
    line.split('|').map(|cell| cell.trim().to_string()).collect()
}

// 形如 `|---`、`| :--`、`---` 的行
fn is_alignment_row(line: &str) -> bool {
    let rest = line.strip_prefix('|').unwrap_or(line).trim_start();
    let rest = rest.strip_prefix(':').unwrap_or(rest);
    rest.starts_with('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECOMMENDATION: &str = "
| Crop | Yield (quintals/hectare) | Duration (days) |
|------|:-------------------------|----------------:|
| Rice | 40-50 | 120 |
| Maize | 25-30 | 95 |
| broken row |
";

    #[test]
    fn parses_header_and_rows() {
        let table = parse_markdown_table(RECOMMENDATION).unwrap();
        assert_eq!(
            table.header,
            vec!["Crop", "Yield (quintals/hectare)", "Duration (days)"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["Maize", "25-30", "95"]);
    }

    #[test]
    fn crop_names_come_from_first_column() {
        let table = parse_markdown_table(RECOMMENDATION).unwrap();
        assert_eq!(table.first_column_values(), vec!["Rice", "Maize"]);
        assert_eq!(
            table.column("duration (days)").unwrap(),
            vec!["120", "95"]
        );
        assert!(table.column("Water").is_none());
    }

    #[test]
    fn too_short_input_is_none() {
        assert!(parse_markdown_table("").is_none());
        assert!(parse_markdown_table("| Crop |").is_none());
        assert!(parse_markdown_table("\n\n| Crop |\n\n").is_none());
    }

    #[test]
    fn fallback_table_from_backend() {
        let md = "| Crop | Yield (quintals/hectare) | Duration (days) |\n|------|--------------------------|------------------|\n| No data available | - | - |";
        let table = parse_markdown_table(md).unwrap();
        assert_eq!(table.first_column_values(), vec!["No data available"]);
    }

    #[test]
    fn tables_without_outer_pipes() {
        let table = parse_markdown_table("Crop | Season\n--- | ---\nWheat | Rabi").unwrap();
        assert_eq!(table.header, vec!["Crop", "Season"]);
        assert_eq!(table.rows, vec![vec!["Wheat".to_string(), "Rabi".to_string()]]);
    }
}
