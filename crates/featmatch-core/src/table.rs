//! CSV match table.

use crate::error::{Error, Result};
use crate::highlight::MatchRow;
use std::path::Path;

pub const COLUMNS: [&str; 6] = [
    "Subgraph #",
    "Nodes (ids)",
    "Nodes (types)",
    "Edges (names)",
    "Edges (kind)",
    "Color",
];

const EMPTY_CELL: &str = "-";

fn join_cell<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<S> = items.into_iter().collect();
    if parts.is_empty() {
        return EMPTY_CELL.to_string();
    }
    parts
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(", ")
}

impl MatchRow {
    /// Cells in [`COLUMNS`] order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.index.to_string(),
            join_cell(self.node_ids.iter().map(|id| id.as_str())),
            join_cell(&self.node_types),
            join_cell(&self.edge_names),
            join_cell(self.edge_classes.iter().map(|c| c.as_str())),
            self.color.to_string(),
        ]
    }
}

/// Header plus rows, as written to or read back from disk.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MatchTable {
    pub fn from_rows(rows: &[MatchRow]) -> Self {
        Self {
            headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows: rows.iter().map(|r| r.to_record().to_vec()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let bytes = self.to_csv_bytes(Path::new("<memory>"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn to_csv_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let table_err = |source: csv::Error| Error::Table {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers).map_err(table_err)?;
        for row in &self.rows {
            writer.write_record(row).map_err(table_err)?;
        }
        writer
            .into_inner()
            .map_err(|err| table_err(csv::Error::from(err.into_error())))
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_csv_bytes(path)?;
        std::fs::write(path, bytes).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), rows = self.rows.len(), "wrote match table");
        Ok(())
    }

    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table_err = |source: csv::Error| Error::Table {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);
        let headers = reader
            .headers()
            .map_err(table_err)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(table_err)?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::{EdgeClass, NodeId};

    fn row(index: usize) -> MatchRow {
        MatchRow {
            index,
            node_ids: vec![NodeId::from("3"), NodeId::from("4")],
            node_types: vec!["slot".to_string(), "step".to_string()],
            edge_names: vec!["(slot - step)".to_string()],
            edge_classes: vec![EdgeClass::Convex],
            color: "red",
        }
    }

    #[test]
    fn record_joins_multi_valued_cells() {
        assert_eq!(
            row(1).to_record(),
            [
                "1".to_string(),
                "3, 4".to_string(),
                "slot, step".to_string(),
                "(slot - step)".to_string(),
                "CX".to_string(),
                "red".to_string(),
            ]
        );
    }

    #[test]
    fn empty_lists_render_as_dash() {
        let r = MatchRow {
            index: 1,
            node_ids: Vec::new(),
            node_types: Vec::new(),
            edge_names: Vec::new(),
            edge_classes: Vec::new(),
            color: "red",
        };
        let rec = r.to_record();
        assert_eq!(rec[1], "-");
        assert_eq!(rec[3], "-");
        assert_eq!(rec[4], "-");
    }

    #[test]
    fn csv_quotes_cells_with_commas() {
        let table = MatchTable::from_rows(&[row(1)]);
        let text = table.to_csv_string().expect("csv");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Subgraph #,Nodes (ids),Nodes (types),Edges (names),Edges (kind),Color")
        );
        assert_eq!(
            lines.next(),
            Some(r#"1,"3, 4","slot, step",(slot - step),CX,red"#)
        );
    }

    #[test]
    fn written_table_reads_back_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("subgraph_results.csv");
        let table = MatchTable::from_rows(&[row(1), row(2)]);

        table.write_csv(&path).expect("write");
        let back = MatchTable::read_csv(&path).expect("read");

        assert_eq!(back, table);
    }

    #[test]
    fn reading_a_missing_table_is_an_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = MatchTable::read_csv(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got {err:?}");
    }
}
