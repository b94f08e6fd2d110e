use std::{
    error::Error,
    fmt::{self, Display},
    fs::File,
    io::{self, Write},
    time::{Duration, Instant},
};

use log::{info, warn};
use ndarray::ArrayView1;

use crate::{
    config::Config,
    data::{Dataset, DatasetErr},
    error::MlErr,
    metrics,
    model::LogisticRegression,
    report::Report,
};

/// Failures of a session operation.
#[derive(Debug)]
pub enum SessionErr {
    DatasetNotLoaded,
    ModelNotTrained,
    Dataset(DatasetErr),
    Ml(MlErr),
    Io(io::Error),
}

impl Display for SessionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionErr::DatasetNotLoaded => f.write_str("load a dataset first"),
            SessionErr::ModelNotTrained => f.write_str("train the model first"),
            SessionErr::Dataset(e) => write!(f, "dataset error: {e}"),
            SessionErr::Ml(e) => write!(f, "training error: {e}"),
            SessionErr::Io(e) => write!(f, "io error: {e}"),
        }
    }
}

impl Error for SessionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionErr::Dataset(e) => Some(e),
            SessionErr::Ml(e) => Some(e),
            SessionErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DatasetErr> for SessionErr {
    fn from(value: DatasetErr) -> Self {
        Self::Dataset(value)
    }
}

impl From<MlErr> for SessionErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

impl From<io::Error> for SessionErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Holds everything a user works with between commands: the loaded dataset,
/// the model and where results are reported.
///
/// The model is trained on the first `train_ratio` share of the rows and
/// evaluated on the rest.
pub struct Session<W: Write = File> {
    config: Config,
    report: Report<W>,
    dataset: Option<Dataset>,
    model: Option<LogisticRegression>,
}

impl<W: Write> Session<W> {
    /// Creates a new `Session` with nothing loaded.
    pub fn new(config: Config, report: Report<W>) -> Self {
        Self {
            config,
            report,
            dataset: None,
            model: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn report(&self) -> &Report<W> {
        &self.report
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn model(&self) -> Option<&LogisticRegression> {
        self.model.as_ref()
    }

    pub fn is_trained(&self) -> bool {
        self.model.as_ref().is_some_and(LogisticRegression::is_trained)
    }

    /// Reads the dataset from the configured CSV file, see `Session::set_dataset`.
    ///
    /// # Returns
    /// The amount of loaded rows.
    pub fn load_dataset(&mut self) -> Result<usize, SessionErr> {
        let dataset = Dataset::from_csv(&self.config.dataset_path, &self.config.schema)?;
        info!(
            "loaded {} rows with {} features from {}",
            dataset.len(),
            dataset.dim(),
            self.config.dataset_path.display()
        );
        self.set_dataset(dataset)
    }

    /// Replaces the session's dataset, discarding any trained model.
    pub fn set_dataset(&mut self, dataset: Dataset) -> Result<usize, SessionErr> {
        let len = dataset.len();
        self.dataset = Some(dataset);
        self.model = None;

        self.report.record(format_args!("dataset loaded with {len} samples"))?;
        Ok(len)
    }

    /// Trains a fresh model on the training split.
    ///
    /// # Returns
    /// How long the training took.
    pub fn train(&mut self) -> Result<Duration, SessionErr> {
        let dataset = self.dataset.as_ref().ok_or(SessionErr::DatasetNotLoaded)?;
        let (train, _) = dataset.split(self.config.train_ratio)?;

        let mut model = LogisticRegression::new(self.config.learning_rate, self.config.epochs)?;

        let start = Instant::now();
        model.fit(train, self.config.workers)?;
        let elapsed = start.elapsed();

        info!(rows = train.len(), workers = self.config.workers.get(); "model trained in {elapsed:?}");
        self.model = Some(model);
        self.report.record(format_args!("model trained in {elapsed:?}"))?;
        Ok(elapsed)
    }

    /// Scores the test split with the trained model.
    ///
    /// # Returns
    /// The accuracy, in `[0, 1]`.
    pub fn evaluate(&mut self) -> Result<f64, SessionErr> {
        let model = self
            .model
            .as_ref()
            .filter(|m| m.is_trained())
            .ok_or(SessionErr::ModelNotTrained)?;
        let dataset = self.dataset.as_ref().ok_or(SessionErr::DatasetNotLoaded)?;
        let (_, test) = dataset.split(self.config.train_ratio)?;

        if test.is_empty() {
            warn!("the test split is empty, nothing to evaluate");
        }

        let predictions = model.predict_rows(test.features())?;
        let accuracy = metrics::accuracy(ArrayView1::from(&predictions), test.labels())?;

        info!("accuracy on {} rows: {:.2}%", test.len(), accuracy * 100.);
        self.report
            .record(format_args!("model accuracy: {:.2}%", accuracy * 100.))?;
        Ok(accuracy)
    }
}
