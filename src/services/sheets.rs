//! Rate-sheet store
//!
//! Loads rate-sheet documents from a local JSON file or an HTTP(S) URL and
//! serves them read-only to the calculation endpoints. Sheets live in
//! memory behind an RwLock; calculation never mutates them. All reads that
//! leave this module are filtered through the visibility policy.

use crate::core::model::RateSheet;
use crate::core::visibility::{Requester, can_view};
use crate::utils::error::{RatesError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};
use tracing::{debug, info, warn};

/// In-memory rate-sheet store with a refreshable external source
#[derive(Debug, Clone)]
pub struct RateSheetService {
    /// Sheets keyed by `original_name`
    sheet_data: Arc<RwLock<HashMap<String, RateSheet>>>,
    /// Last successful load
    last_updated: Arc<RwLock<SystemTime>>,
    /// HTTP client for URL sources
    http_client: reqwest::Client,
    /// JSON file path or HTTP(S) URL; `None` runs with an empty store
    source: Option<String>,
    /// Staleness threshold for `needs_refresh`
    cache_ttl: Duration,
}

/// Store statistics for the stats endpoint
#[derive(Debug, Clone, serde::Serialize)]
pub struct SheetStatistics {
    pub total_sheets: usize,
    pub live_sheets: usize,
    pub unlisted_sheets: usize,
    pub total_zones: usize,
    pub total_countries: usize,
    #[serde(skip)]
    pub last_updated: SystemTime,
}

impl RateSheetService {
    /// Create a new sheet service
    pub fn new(source: Option<String>, cache_ttl: Duration) -> Self {
        let service = Self {
            sheet_data: Arc::new(RwLock::new(HashMap::new())),
            last_updated: Arc::new(RwLock::new(SystemTime::UNIX_EPOCH)),
            http_client: reqwest::Client::new(),
            source,
            cache_ttl,
        };

        info!("Rate sheet service initialized");
        service
    }

    /// Load sheet data from the configured source
    pub async fn initialize(&self) -> Result<()> {
        self.refresh_sheet_data().await
    }

    /// Force refresh sheet data immediately
    pub async fn force_refresh(&self) -> Result<()> {
        info!("Force refreshing rate sheet data");
        self.refresh_sheet_data().await
    }

    /// Refresh sheet data from the configured source
    pub async fn refresh_sheet_data(&self) -> Result<()> {
        let source = match &self.source {
            Some(source) => source.clone(),
            None => {
                debug!("No sheet source configured, store left as-is");
                return Ok(());
            }
        };

        info!("Refreshing rate sheets from: {}", source);

        let sheets = if source.starts_with("http") {
            self.load_from_url(&source).await?
        } else {
            self.load_from_file(&source).await?
        };

        {
            let mut sheet_data = self.sheet_data.write().unwrap();
            sheet_data.clear();
            for sheet in sheets {
                sheet_data.insert(sheet.original_name.clone(), sheet);
            }
        }

        {
            let mut last_updated = self.last_updated.write().unwrap();
            *last_updated = SystemTime::now();
        }

        info!("Rate sheet data refreshed successfully");
        Ok(())
    }

    /// Load sheets from a URL
    async fn load_from_url(&self, url: &str) -> Result<Vec<RateSheet>> {
        let response = self
            .http_client
            .get(url)
            .timeout(Duration::from_secs(30))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RatesError::sheet_store(format!(
                "HTTP {}: failed to fetch rate sheets",
                response.status()
            )));
        }

        let text = response.text().await?;
        let sheets: Vec<RateSheet> = serde_json::from_str(&text)?;

        debug!("Loaded {} rate sheets from URL", sheets.len());
        Ok(sheets)
    }

    /// Load sheets from a local JSON file
    async fn load_from_file(&self, path: &str) -> Result<Vec<RateSheet>> {
        let content = tokio::fs::read_to_string(path).await?;
        let sheets: Vec<RateSheet> = serde_json::from_str(&content)?;

        debug!("Loaded {} rate sheets from file", sheets.len());
        Ok(sheets)
    }

    /// Check if sheet data is older than the cache TTL
    pub fn needs_refresh(&self) -> bool {
        let last_updated = self.last_updated.read().unwrap();
        SystemTime::now()
            .duration_since(*last_updated)
            .map(|age| age > self.cache_ttl)
            .unwrap_or(true)
    }

    /// Spawn the periodic refresh task
    pub fn start_auto_refresh_task(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let service = Arc::clone(&self);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(service.cache_ttl);
            // First tick fires immediately; initialize() already loaded.
            interval.tick().await;

            loop {
                interval.tick().await;

                if let Err(e) = service.refresh_sheet_data().await {
                    warn!("Auto-refresh of rate sheets failed: {}", e);
                } else {
                    debug!("Auto-refresh of rate sheets completed");
                }
            }
        })
    }

    /// Unfiltered lookup by sheet name; service-internal and admin use only
    pub fn get(&self, original_name: &str) -> Option<RateSheet> {
        let sheet_data = self.sheet_data.read().unwrap();
        sheet_data.get(original_name).cloned()
    }

    /// Lookup by sheet name, subject to the requester's visibility
    pub fn get_visible(&self, original_name: &str, requester: &Requester) -> Option<RateSheet> {
        self.get(original_name)
            .filter(|sheet| can_view(sheet, requester))
    }

    /// Batch lookup preserving input order
    ///
    /// Missing or invisible names yield `None` slots so callers can keep
    /// column positions aligned with the requested service list.
    pub fn get_many(&self, names: &[String], requester: &Requester) -> Vec<Option<RateSheet>> {
        names
            .iter()
            .map(|name| self.get_visible(name, requester))
            .collect()
    }

    /// Every sheet the requester may see
    pub fn visible_sheets(&self, requester: &Requester) -> Vec<RateSheet> {
        let sheet_data = self.sheet_data.read().unwrap();
        let mut sheets: Vec<RateSheet> = sheet_data
            .values()
            .filter(|sheet| can_view(sheet, requester))
            .cloned()
            .collect();
        sheets.sort_by(|a, b| a.original_name.cmp(&b.original_name));
        sheets
    }

    /// Names of every sheet the requester may see, sorted
    pub fn service_names(&self, requester: &Requester) -> Vec<String> {
        self.visible_sheets(requester)
            .into_iter()
            .map(|sheet| sheet.original_name)
            .collect()
    }

    /// Insert or replace a sheet
    pub fn upsert_sheet(&self, sheet: RateSheet) {
        let mut sheet_data = self.sheet_data.write().unwrap();
        sheet_data.insert(sheet.original_name.clone(), sheet);
    }

    /// Remove a sheet by name
    pub fn remove_sheet(&self, original_name: &str) -> Option<RateSheet> {
        let mut sheet_data = self.sheet_data.write().unwrap();
        sheet_data.remove(original_name)
    }

    /// Store statistics
    pub fn statistics(&self) -> SheetStatistics {
        let sheet_data = self.sheet_data.read().unwrap();

        let mut live_sheets = 0;
        let mut unlisted_sheets = 0;
        let mut total_zones = 0;
        let mut countries = std::collections::HashSet::new();

        for sheet in sheet_data.values() {
            match sheet.status {
                crate::core::model::SheetStatus::Live => live_sheets += 1,
                crate::core::model::SheetStatus::Unlisted => unlisted_sheets += 1,
            }
            total_zones += sheet.zones.len();
            for zone in &sheet.zones {
                for country in &zone.countries {
                    countries.insert(country.trim().to_ascii_lowercase());
                }
            }
        }

        SheetStatistics {
            total_sheets: sheet_data.len(),
            live_sheets,
            unlisted_sheets,
            total_zones,
            total_countries: countries.len(),
            last_updated: *self.last_updated.read().unwrap(),
        }
    }

    /// Last successful load time
    pub fn last_updated(&self) -> SystemTime {
        *self.last_updated.read().unwrap()
    }
}
