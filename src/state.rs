use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::chart::render_histogram;
use crate::data::loader::DEFAULT_DATA_FILE;
use crate::data::{histogram, load_file, summarize, Dataset, DEFAULT_BUCKET_COUNT};

// ---------------------------------------------------------------------------
// Notices (modal messages)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Analyze/visualize was requested before any rows were loaded.
    NoData,
    Collaboration,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::NoData => "No Data",
            Notice::Collaboration => "Collaboration",
        }
    }

    pub fn body(&self) -> &'static str {
        match self {
            Notice::NoData => "Please gather data first.",
            Notice::Collaboration => "Remember to use Git for collaborative coding!",
        }
    }
}

// ---------------------------------------------------------------------------
// Rendered chart
// ---------------------------------------------------------------------------

/// An encoded PNG plus the URI the image loader caches it under.
#[derive(Debug, Clone)]
pub struct HistogramImage {
    pub uri: String,
    pub png: Arc<[u8]>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// File read by "Gather Data".
    pub data_path: PathBuf,

    /// Currently loaded rows.  Empty until the first successful load.
    pub dataset: Dataset,

    /// Text shown under the buttons after "Analyze Data".
    pub analysis: Option<String>,

    /// Latest rendered histogram.
    pub histogram: Option<HistogramImage>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Modal message awaiting dismissal.
    pub notice: Option<Notice>,

    /// URI of a replaced histogram whose cached texture should be dropped.
    retired_image: Option<String>,

    renders: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl AppState {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            dataset: Dataset::default(),
            analysis: None,
            histogram: None,
            status_message: None,
            notice: None,
            retired_image: None,
            renders: 0,
        }
    }

    /// Load [`Self::data_path`], replacing the dataset only on success.
    pub fn gather_data(&mut self) {
        let path = self.data_path.clone();
        match read_dataset(&path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to gather data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Swap in a freshly loaded dataset.  Derived outputs of the old one are cleared.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.analysis = None;
        self.retire_histogram();
        self.status_message = None;
    }

    /// Compute the mean and store its display text.
    pub fn analyze(&mut self) {
        let summary = summarize(&self.dataset);
        if summary.is_empty() {
            self.notice = Some(Notice::NoData);
        }
        self.analysis = Some(summary.to_string());
    }

    /// Bucket the series and render it to a PNG.
    pub fn visualize(&mut self) {
        let png = match self.render_current() {
            Ok(Some(png)) => png,
            Ok(None) => {
                self.notice = Some(Notice::NoData);
                return;
            }
            Err(e) => {
                log::error!("Failed to visualize data: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                return;
            }
        };

        self.retire_histogram();
        self.renders += 1;
        self.histogram = Some(HistogramImage {
            uri: format!("bytes://histogram-{}.png", self.renders),
            png: png.into(),
        });
    }

    pub fn remind_collaboration(&mut self) {
        self.notice = Some(Notice::Collaboration);
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Take the URI of a histogram that is no longer displayed.
    pub fn take_retired_image(&mut self) -> Option<String> {
        self.retired_image.take()
    }

    fn render_current(&self) -> Result<Option<Vec<u8>>> {
        let Some(hist) = histogram(&self.dataset, DEFAULT_BUCKET_COUNT)? else {
            return Ok(None);
        };
        let png = render_histogram(&hist).context("rendering histogram")?;
        Ok(Some(png))
    }

    fn retire_histogram(&mut self) {
        if let Some(old) = self.histogram.take() {
            self.retired_image = Some(old.uri);
        }
    }
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    load_file(path).with_context(|| format!("gathering data from {}", path.display()))
}
