use crate::auth::{Authenticator, Session};
use crate::color::ColorMap;
use crate::config::AppConfig;
use crate::data::export::{display_table, DisplayTable};
use crate::data::filter::FilterSelection;
use crate::data::loader::load_file;
use crate::data::model::{Dataset, Dimension, Metric};
use crate::data::rank::Weights;
use crate::pipeline::{run_pipeline, Ranking};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,
    pub auth: Authenticator,
    pub session: Session,

    /// Login form fields.
    pub login_user: String,
    pub login_password: String,
    pub login_error: Option<String>,

    /// Loaded dataset (None until a successful load).
    pub dataset: Option<Dataset>,
    /// Blocking load error; no ranking is shown while set.
    pub load_error: Option<String>,

    pub selection: FilterSelection,
    pub weights: Weights,

    /// Last pipeline result and its display form.
    pub ranking: Option<Ranking>,
    pub table: Option<DisplayTable>,

    /// Which dimension colours its column in the table.
    pub color_dimension: Dimension,
    pub color_map: Option<ColorMap>,

    /// Status message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            auth: Authenticator::new(config.users.clone()),
            weights: config.weights,
            config,
            session: Session::default(),
            login_user: String::new(),
            login_password: String::new(),
            login_error: None,
            dataset: None,
            load_error: None,
            selection: FilterSelection::default(),
            ranking: None,
            table: None,
            color_dimension: Dimension::Channel,
            color_map: None,
            status_message: None,
        }
    }

    /// Submit the login form; loads the dataset on success.
    pub fn submit_login(&mut self) {
        match self
            .session
            .login(&self.auth, &self.login_user, &self.login_password)
        {
            Ok(()) => {
                self.login_error = None;
                self.login_password.clear();
                self.reload();
            }
            Err(e) => self.login_error = Some(e.to_string()),
        }
    }

    /// Drop the session and everything derived from the data.
    pub fn logout(&mut self) {
        self.session.logout();
        *self = AppState::new(self.config.clone());
    }

    /// Read the source file again and reset filters to "everything".
    pub fn reload(&mut self) {
        match load_file(&self.config.source_path) {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => {
                log::error!("Failed to load {}: {e}", self.config.source_path.display());
                self.dataset = None;
                self.ranking = None;
                self.table = None;
                self.load_error = Some(e.to_string());
            }
        }
    }

    /// Ingest a newly loaded dataset, initialise filters and colour.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.selection = FilterSelection::all(&dataset);
        self.color_map = Some(ColorMap::new(
            self.color_dimension,
            dataset.distinct(self.color_dimension),
        ));
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.recompute();
    }

    /// Re-run the pipeline after a filter or weight change.
    pub fn recompute(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let ranking = run_pipeline(ds, &self.selection, &self.weights);
        self.table = Some(display_table(&ranking));
        self.ranking = Some(ranking);
    }

    pub fn set_color_dimension(&mut self, dim: Dimension) {
        self.color_dimension = dim;
        if self.color_map.as_ref().is_some_and(|cm| cm.dimension == dim) {
            return;
        }
        if let Some(ds) = &self.dataset {
            self.color_map = Some(ColorMap::new(dim, ds.distinct(dim)));
        }
    }

    pub fn toggle_filter_value(&mut self, dim: Dimension, value: &Option<String>) {
        self.selection.toggle(dim, value);
        self.recompute();
    }

    pub fn select_all(&mut self, dim: Dimension) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(ds, dim);
            self.recompute();
        }
    }

    pub fn select_none(&mut self, dim: Dimension) {
        self.selection.select_none(dim);
        self.recompute();
    }

    pub fn set_weight(&mut self, metric: Metric, value: u8) {
        let mut w = self.weights;
        *w.get_mut(metric) = value;
        let was_warned = self.weights.warning().is_some();
        self.weights = Weights::new(w.kilos, w.sales, w.numeric_distribution, w.caf);
        match self.weights.warning() {
            Some(warning) if !was_warned => log::warn!("{warning}"),
            None if was_warned => log::info!("Weights add up to 100% again"),
            _ => {}
        }
        self.recompute();
    }
}
