use std::path::PathBuf;

use sapre_dashboard::config::Config;
use sapre_dashboard::data::export::export_records;
use sapre_dashboard::data::filter::{FilterSpec, apply};
use sapre_dashboard::data::model::{ClaimRecord, Claimant, Status};
use sapre_dashboard::data::store::RecordStore;

use crate::color::StatusColors;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Analytics,
    Reports,
    Settings,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Analytics, Page::Reports, Page::Settings];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard Principal",
            Page::Analytics => "Análises Avançadas",
            Page::Reports => "Relatórios",
            Page::Settings => "Configurações",
        }
    }
}

/// Message shown in the top bar until replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: Config,

    /// Where the Settings page saves `config`.
    pub config_path: PathBuf,

    /// Simulated dataset, regenerated on refresh or fee-rate change.
    pub store: RecordStore,

    /// Snapshot of the store's records for the current generation.
    pub records: Vec<ClaimRecord>,

    /// Store generation `records` was copied from.
    records_generation: u64,

    /// Current filter selections.
    pub filters: FilterSpec,

    /// Records passing `filters` (cached).
    pub filtered: Vec<ClaimRecord>,

    pub page: Page,

    pub colors: StatusColors,

    pub status_message: Option<StatusMessage>,

    /// Set by the export buttons, consumed after the page is drawn.
    pub export_pending: bool,

    /// Destination chosen through "Export as…", overriding the configured path once.
    pub export_target: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: Config, config_path: PathBuf) -> sapre_dashboard::Result<Self> {
        let mut store = RecordStore::new(config.seed, config.record_count, config.fee_rate)?;
        let records = store.records().to_vec();
        let filters = FilterSpec::for_records(&records);
        let filtered = apply(&records, &filters);

        Ok(Self {
            config,
            config_path,
            records_generation: store.generation(),
            store,
            records,
            filters,
            filtered,
            page: Page::default(),
            colors: StatusColors::default(),
            status_message: None,
            export_pending: false,
            export_target: None,
        })
    }

    /// Pick up a regenerated dataset, if any, and refilter.
    pub fn sync_records(&mut self) {
        self.store.records();
        if self.store.generation() != self.records_generation {
            self.records = self.store.records().to_vec();
            self.records_generation = self.store.generation();
            self.refilter();
        }
    }

    /// Recompute `filtered` after a filter change.
    pub fn refilter(&mut self) {
        self.filtered = apply(&self.records, &self.filters);
    }

    /// "Atualizar Dados": drop the cache and rebuild the dataset.
    pub fn refresh(&mut self) {
        self.store.invalidate();
        self.sync_records();
    }

    pub fn toggle_status(&mut self, status: Status) {
        self.filters.toggle_status(status);
        self.refilter();
    }

    pub fn toggle_claimant(&mut self, claimant: Claimant) {
        self.filters.toggle_claimant(claimant);
        self.refilter();
    }

    /// Select every status present in the data.
    pub fn select_all_statuses(&mut self) {
        self.filters.statuses = Some(self.records.iter().map(|r| r.status).collect());
        self.refilter();
    }

    pub fn select_no_statuses(&mut self) {
        self.filters.statuses = Some(Default::default());
        self.refilter();
    }

    pub fn select_all_claimants(&mut self) {
        self.filters.claimants = Some(self.records.iter().map(|r| r.claimant).collect());
        self.refilter();
    }

    pub fn select_no_claimants(&mut self) {
        self.filters.claimants = Some(Default::default());
        self.refilter();
    }

    /// Apply a fee rate chosen on the Settings page. Fees are recomputed.
    pub fn set_fee_rate_pct(&mut self, pct: u32) {
        self.config.set_fee_rate_pct(pct);
        match self.store.set_fee_rate(self.config.fee_rate) {
            Ok(()) => self.sync_records(),
            Err(e) => self.status_message = Some(StatusMessage::Error(e.to_string())),
        }
    }

    pub fn save_settings(&mut self) {
        self.status_message = Some(match self.config.save(&self.config_path) {
            Ok(()) => StatusMessage::Success("Configurações salvas com sucesso!".into()),
            Err(e) => StatusMessage::Error(e.to_string()),
        });
    }

    pub fn request_export(&mut self, target: Option<PathBuf>) {
        self.export_target = target;
        self.export_pending = true;
    }

    /// Write the filtered records if an export was requested this frame.
    pub fn run_pending_export(&mut self) {
        if !self.export_pending {
            return;
        }
        self.export_pending = false;

        let path = self
            .export_target
            .take()
            .unwrap_or_else(|| self.config.export_path.clone());
        self.status_message = Some(match export_records(&path, &self.filtered) {
            Ok(()) => StatusMessage::Success(format!(
                "Relatório exportado como {}",
                path.display()
            )),
            Err(e) => {
                log::error!("{e}");
                StatusMessage::Error(format!("Erro ao exportar: {e}"))
            }
        });
    }
}
