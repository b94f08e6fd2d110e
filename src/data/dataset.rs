use std::{fs, ops::Range, path::Path};

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, s};
use serde::Deserialize;

use super::DatasetErr;
use crate::error::{InputErr, Result};

/// Named columns to pull out of a CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DatasetSchema {
    pub features: Vec<String>,
    pub target: String,
}

impl Default for DatasetSchema {
    /// The transaction fraud layout: five balance columns and the `isFraud` flag.
    fn default() -> Self {
        Self {
            features: [
                "amount",
                "oldbalanceOrg",
                "newbalanceOrig",
                "oldbalanceDest",
                "newbalanceDest",
            ]
            .map(String::from)
            .to_vec(),
            target: "isFraud".to_string(),
        }
    }
}

/// Checks that `features` is a non-empty rectangular matrix matching `labels`,
/// and that every label is either `0` or `1`.
///
/// # Returns
/// The number of features per row.
pub fn validate(features: &[Vec<f64>], labels: &[f64]) -> std::result::Result<usize, InputErr> {
    let dim = features.first().ok_or(InputErr::EmptyDataset)?.len();
    if dim == 0 {
        return Err(InputErr::EmptyRow);
    }

    if let Some((row, x)) = features.iter().enumerate().find(|(_, x)| x.len() != dim) {
        return Err(InputErr::RaggedRow {
            row,
            got: x.len(),
            expected: dim,
        });
    }

    if labels.len() != features.len() {
        return Err(InputErr::LabelCountMismatch {
            got: labels.len(),
            expected: features.len(),
        });
    }

    check_labels(labels.iter().copied())?;
    Ok(dim)
}

pub(crate) fn check_labels(labels: impl IntoIterator<Item = f64>) -> std::result::Result<(), InputErr> {
    match labels
        .into_iter()
        .enumerate()
        .find(|&(_, y)| y != 0. && y != 1.)
    {
        Some((row, value)) => Err(InputErr::InvalidLabel { row, value }),
        None => Ok(()),
    }
}

/// A validated, in-memory binary classification dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: Array2<f64>,
    labels: Array1<f64>,
}

impl Dataset {
    /// Creates a new dataset from owned rows.
    ///
    /// # Errors
    /// `MlErr::InvalidInput` if the rows are empty or ragged, if the label count
    /// doesn't match, or if a label is outside `{0, 1}`.
    pub fn new(features: Vec<Vec<f64>>, labels: Vec<f64>) -> Result<Self> {
        Self::from_rows(&features, &labels)
    }

    /// Creates a new dataset by copying borrowed rows, see `Dataset::new`.
    pub fn from_rows(features: &[Vec<f64>], labels: &[f64]) -> Result<Self> {
        let dim = validate(features, labels)?;
        let flat = features.iter().flatten().copied().collect();

        Ok(Self {
            features: Array2::from_shape_vec((features.len(), dim), flat)?,
            labels: Array1::from(labels.to_vec()),
        })
    }

    /// Reads a CSV file with a header line and extracts the columns named in `schema`.
    ///
    /// # Arguments
    /// * `path` - The CSV file.
    /// * `schema` - Which columns are features and which is the target.
    pub fn from_csv<P: AsRef<Path>>(path: P, schema: &DatasetSchema) -> std::result::Result<Self, DatasetErr> {
        let content = fs::read_to_string(path)?;
        Self::parse_csv(&content, schema)
    }

    /// Parses CSV text, see `Dataset::from_csv`.
    ///
    /// Cells may be quoted. Feature cells that fail to parse are read as `0.0`, a
    /// target cell that fails to parse is an error. Blank lines are skipped. Line
    /// numbers in errors are 1-based.
    pub fn parse_csv(content: &str, schema: &DatasetSchema) -> std::result::Result<Self, DatasetErr> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let header = reader.headers()?.clone();
        if header.is_empty() {
            return Err(DatasetErr::MissingHeader);
        }

        let column = |name: &str| {
            header
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DatasetErr::MissingColumn(name.to_string()))
        };

        let feature_cols = schema
            .features
            .iter()
            .map(|name| column(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let target_col = column(&schema.target)?;
        let needed = feature_cols
            .iter()
            .copied()
            .chain([target_col])
            .max()
            .map_or(0, |max| max + 1);

        let mut features: Vec<Vec<f64>> = Vec::new();
        let mut labels: Vec<f64> = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |pos| pos.line() as usize);
            if record.len() < needed {
                return Err(DatasetErr::ShortRow {
                    line,
                    got: record.len(),
                    needed,
                });
            }

            features.push(
                feature_cols
                    .iter()
                    .map(|&col| record[col].parse::<f64>().unwrap_or(0.))
                    .collect(),
            );

            let target = &record[target_col];
            labels.push(target.parse().map_err(|_| DatasetErr::ParseTarget {
                line,
                value: target.to_string(),
            })?);
        }

        Ok(Self::new(features, labels)?)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the amount of features per row.
    #[inline]
    pub fn dim(&self) -> usize {
        self.features.ncols()
    }

    /// Borrows the entire dataset.
    pub fn view(&self) -> DatasetView<'_> {
        DatasetView {
            features: self.features.view(),
            labels: self.labels.view(),
        }
    }

    /// Splits the dataset in two without shuffling: the first `floor(ratio * len)` rows
    /// and the remaining ones.
    ///
    /// # Arguments
    /// * `ratio` - The share of rows in the first part, must lie in `(0, 1)`.
    ///
    /// # Returns
    /// The `(train, test)` views or `DatasetErr::InvalidRatio`.
    pub fn split(&self, ratio: f64) -> std::result::Result<(DatasetView<'_>, DatasetView<'_>), DatasetErr> {
        if !(ratio > 0. && ratio < 1.) {
            return Err(DatasetErr::InvalidRatio(ratio));
        }

        let at = (ratio * self.len() as f64).floor() as usize;
        let view = self.view();
        Ok((view.rows(0..at), view.rows(at..self.len())))
    }
}

/// A borrowed, read-only window over a `Dataset`.
#[derive(Debug, Clone, Copy)]
pub struct DatasetView<'a> {
    features: ArrayView2<'a, f64>,
    labels: ArrayView1<'a, f64>,
}

impl<'a> DatasetView<'a> {
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.features.ncols()
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'a, f64> {
        self.features
    }

    #[inline]
    pub fn labels(&self) -> ArrayView1<'a, f64> {
        self.labels
    }

    /// Narrows the view to `range`, relative to this view.
    ///
    /// # Panics
    /// If `range` is out of bounds.
    pub fn rows(&self, range: Range<usize>) -> DatasetView<'a> {
        DatasetView {
            features: self.features.slice_move(s![range.clone(), ..]),
            labels: self.labels.slice_move(s![range]),
        }
    }
}

impl<'a> From<&'a Dataset> for DatasetView<'a> {
    fn from(value: &'a Dataset) -> Self {
        value.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MlErr;

    const CSV: &str = "\
step,amount,oldbalanceOrg,newbalanceOrig,oldbalanceDest,newbalanceDest,isFraud
1,9839.64,170136.0,160296.36,0.0,0.0,0
1,181.0,181.0,0.0,0.0,0.0,1

1,n/a,0.0,0.0,21182.0,0.0,0
";

    #[test]
    fn dataset_basic() {
        let ds = Dataset::new(vec![vec![1., 2.], vec![3., 4.]], vec![0., 1.]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.dim(), 2);
        assert_eq!(ds.view().features()[[1, 0]], 3.);
    }

    #[test]
    fn dataset_rejects_invalid_input() {
        let err = Dataset::new(vec![], vec![]).unwrap_err();
        assert!(matches!(err, MlErr::InvalidInput(InputErr::EmptyDataset)));

        let err = Dataset::new(vec![vec![1., 2.], vec![3.]], vec![0., 1.]).unwrap_err();
        assert!(matches!(
            err,
            MlErr::InvalidInput(InputErr::RaggedRow { row: 1, got: 1, expected: 2 })
        ));

        let err = Dataset::new(vec![vec![1.]], vec![0., 1.]).unwrap_err();
        assert!(matches!(err, MlErr::InvalidInput(InputErr::LabelCountMismatch { .. })));

        let err = Dataset::new(vec![vec![1.], vec![2.]], vec![0., 0.5]).unwrap_err();
        assert!(matches!(err, MlErr::InvalidInput(InputErr::InvalidLabel { row: 1, .. })));

        let err = Dataset::new(vec![vec![]], vec![0.]).unwrap_err();
        assert!(matches!(err, MlErr::InvalidInput(InputErr::EmptyRow)));
    }

    #[test]
    fn parse_csv_picks_schema_columns() {
        let ds = Dataset::parse_csv(CSV, &DatasetSchema::default()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.dim(), 5);
        assert_eq!(ds.view().features().row(0).to_vec(), [9839.64, 170136.0, 160296.36, 0.0, 0.0]);
        assert_eq!(ds.view().labels().to_vec(), [0., 1., 0.]);
    }

    #[test]
    fn parse_csv_reads_bad_features_as_zero() {
        let ds = Dataset::parse_csv(CSV, &DatasetSchema::default()).unwrap();
        assert_eq!(ds.view().features()[[2, 0]], 0.);
        assert_eq!(ds.view().features()[[2, 3]], 21182.);
    }

    #[test]
    fn parse_csv_honors_quoted_cells() {
        let schema = DatasetSchema {
            features: vec!["amount".into()],
            target: "isFraud".into(),
        };
        let csv = "\"amount\",note,isFraud\n2.5,\"wire, urgent\",1\n\"0.5\",plain,0\n";

        let ds = Dataset::parse_csv(csv, &schema).unwrap();
        assert_eq!(ds.view().features().column(0).to_vec(), [2.5, 0.5]);
        assert_eq!(ds.view().labels().to_vec(), [1., 0.]);
    }

    #[test]
    fn parse_csv_reports_missing_column() {
        let csv = "amount,isFraud\n1.0,0\n";
        let err = Dataset::parse_csv(csv, &DatasetSchema::default()).unwrap_err();
        assert!(matches!(err, DatasetErr::MissingColumn(col) if col == "oldbalanceOrg"));
    }

    #[test]
    fn parse_csv_reports_bad_target() {
        let schema = DatasetSchema {
            features: vec!["a".into()],
            target: "y".into(),
        };
        let err = Dataset::parse_csv("a,y\n1,0\n2,maybe\n", &schema).unwrap_err();
        assert!(matches!(err, DatasetErr::ParseTarget { line: 3, ref value } if value == "maybe"));

        let err = Dataset::parse_csv("a,y\n1\n", &schema).unwrap_err();
        assert!(matches!(err, DatasetErr::ShortRow { line: 2, got: 1, needed: 2 }));
    }

    #[test]
    fn parse_csv_without_rows_is_empty_dataset() {
        let schema = DatasetSchema {
            features: vec!["a".into()],
            target: "y".into(),
        };
        assert!(matches!(Dataset::parse_csv("", &schema), Err(DatasetErr::MissingHeader)));
        assert!(matches!(
            Dataset::parse_csv("a,y\n", &schema),
            Err(DatasetErr::Invalid(MlErr::InvalidInput(InputErr::EmptyDataset)))
        ));
    }

    #[test]
    fn split_keeps_order() {
        let rows = (0..10).map(|i| vec![i as f64]).collect();
        let ds = Dataset::new(rows, vec![0.; 10]).unwrap();

        let (train, test) = ds.split(0.8).unwrap();
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
        assert_eq!(test.features()[[0, 0]], 8.);

        assert!(matches!(ds.split(1.), Err(DatasetErr::InvalidRatio(_))));
        assert!(matches!(ds.split(0.), Err(DatasetErr::InvalidRatio(_))));
    }
}
