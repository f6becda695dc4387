use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::CoreError;
use crate::models::stock::Stock;

use super::record::StockRecord;
use super::repository::{LoadOutcome, StockRepository};

/// File-backed repository: one pretty-printed JSON record per symbol
/// under a single root directory. The storage key is the lowercased
/// symbol (`aapl.json`), so at most one record exists per symbol
/// regardless of input casing.
pub struct FileStockRepository {
    root: PathBuf,
}

impl FileStockRepository {
    /// Open a repository rooted at `root`, creating the directory if it
    /// does not exist yet.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, symbol: &str) -> PathBuf {
        self.root.join(format!("{}.json", symbol.to_lowercase()))
    }
}

#[async_trait]
impl StockRepository for FileStockRepository {
    async fn load(&self, symbol: &str) -> LoadOutcome {
        let path = self.record_path(symbol);

        let json = match fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadOutcome::NotFound,
            Err(e) => {
                return LoadOutcome::Corrupted {
                    symbol: symbol.to_uppercase(),
                    cause: e.to_string(),
                }
            }
        };

        let record: StockRecord = match serde_json::from_str(&json) {
            Ok(record) => record,
            Err(e) => {
                return LoadOutcome::Corrupted {
                    symbol: symbol.to_uppercase(),
                    cause: e.to_string(),
                }
            }
        };

        match record.into_stock(symbol) {
            Ok(stock) => LoadOutcome::Loaded(stock),
            Err(e) => LoadOutcome::Corrupted {
                symbol: symbol.to_uppercase(),
                cause: e.to_string(),
            },
        }
    }

    async fn get_all(&self) -> Vec<Stock> {
        let mut symbols = Vec::new();

        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                symbols.push(stem.to_string());
            }
        }
        symbols.sort();

        let mut stocks = Vec::with_capacity(symbols.len());
        for symbol in &symbols {
            stocks.push(self.get_by_symbol(symbol).await);
        }
        stocks
    }

    async fn save(&self, stock: &Stock) -> Result<(), CoreError> {
        let record = StockRecord::from(stock);
        let json = serde_json::to_string_pretty(&record)?;

        // Write the snapshot to a sibling temp file, then rename over the
        // record. Rename within one directory is a single-step replace,
        // so a half-written record is never observable.
        let path = self.record_path(stock.symbol());
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn delete(&self, symbol: &str) -> Result<(), CoreError> {
        match fs::remove_file(self.record_path(symbol)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, symbol: &str) -> bool {
        fs::try_exists(self.record_path(symbol)).await.unwrap_or(false)
    }
}
