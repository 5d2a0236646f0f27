use crate::deconvolution::MethodKind;
use crate::degrade::Degraded;
use crate::frame::Frame;
use crate::quality::QualityReport;

/// Coarse phases of a pipeline run, as shown by progress bars.
#[derive(Clone, Copy, Debug)]
pub enum PipelineStage {
    Processing,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Processing => write!(f, "Restoring images"),
            Self::Writing => write!(f, "Saving images"),
        }
    }
}

/// Which degraded input a restoration started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Blurred plus additive noise.
    Noisy,
    /// Blurred only.
    BlurOnly,
}

impl Route {
    pub const ALL: [Route; 2] = [Route::Noisy, Route::BlurOnly];

    /// Prefix used in output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Noisy => "noisy",
            Self::BlurOnly => "blurry",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Noisy => write!(f, "Blur + noise"),
            Self::BlurOnly => write!(f, "Blur only"),
        }
    }
}

/// One restored frame and its scores.
#[derive(Clone, Debug)]
pub struct Restoration {
    pub route: Route,
    pub method: MethodKind,
    pub frame: Frame,
    pub quality: QualityReport,
}

/// Everything produced for one ground-truth image.
#[derive(Clone, Debug)]
pub struct ImageRun {
    pub name: String,
    pub original: Frame,
    pub degraded: Degraded,
    /// Degraded inputs scored against the original, per route.
    pub baselines: Vec<(Route, QualityReport)>,
    pub restorations: Vec<Restoration>,
}

impl ImageRun {
    pub fn baseline(&self, route: Route) -> Option<&QualityReport> {
        self.baselines
            .iter()
            .find(|(r, _)| *r == route)
            .map(|(_, q)| q)
    }

    pub fn restoration(&self, route: Route, method: MethodKind) -> Option<&Restoration> {
        self.restorations
            .iter()
            .find(|r| r.route == route && r.method == method)
    }
}

/// Result of a pipeline run, in input order.
#[derive(Clone, Debug, Default)]
pub struct PipelineReport {
    pub images: Vec<ImageRun>,
}

/// Progress callbacks for [`run_pipeline_reported`](super::run_pipeline_reported).
///
/// Called from rayon workers, hence `Send + Sync`. Every hook defaults to
/// doing nothing.
pub trait ProgressReporter: Send + Sync {
    /// Entering `stage`; `total_items` is the image count when known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// `items_done` images of the current stage are complete.
    fn advance(&self, _items_done: usize) {}

    fn finish_stage(&self) {}
}

/// Silent reporter behind [`run_pipeline`](super::run_pipeline).
pub(super) struct NoOpReporter;

impl ProgressReporter for NoOpReporter {}
