//! # Inventory Store
//!
//! An [`Inventory`] bound to a file: loaded once at construction, written back
//! on an explicit [`InventoryStore::save`].
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  InventoryStore::open(path)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Storage::read_all(path) ──► missing file?  ──► empty inventory        │
//! │       │                  ──► other failure? ──► logged, LoadReport      │
//! │       ▼                                                                 │
//! │  codec::decode(blob) ──► bad line? ──► Lenient: skip + LoadReport      │
//! │       │                              └► Strict:  Err(Parse { line })    │
//! │       ▼                                                                 │
//! │  LOADED ◄──── get / add / remove / purchase / cancel_purchase          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save() ──► codec::encode ──► Storage::write_all (full overwrite)      │
//! │                                                                         │
//! │  There is no reload: open a new store to re-read the file.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use shelf_core::{codec, CoreResult, Inventory, InventoryTable, ParseError, Product};
use tracing::{debug, error, info, warn};

use crate::config::{LoadPolicy, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::storage::{FileStorage, Storage};

// =============================================================================
// Load Report
// =============================================================================

/// A line dropped by a lenient load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the file.
    pub line: usize,
    /// Why the line was dropped.
    pub error: ParseError,
}

/// What happened while loading the inventory file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Lines decoded into records, duplicates included.
    pub lines_loaded: usize,

    /// Lines dropped under [`LoadPolicy::Lenient`].
    pub skipped: Vec<SkippedLine>,

    /// True when the file did not exist yet.
    pub missing_file: bool,

    /// Read failure other than a missing file; the inventory started empty.
    pub read_error: Option<StoreError>,
}

impl LoadReport {
    /// Returns true if every line loaded and the file was readable.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.read_error.is_none()
    }
}

// =============================================================================
// Inventory Store
// =============================================================================

/// File-backed inventory.
#[derive(Debug)]
pub struct InventoryStore<S: Storage = FileStorage> {
    path: PathBuf,
    storage: S,
    inventory: Inventory,
    report: LoadReport,
    dirty: bool,
}

impl InventoryStore<FileStorage> {
    /// Opens the inventory at `path` with atomic saves and a lenient load.
    ///
    /// Never fails: an unreadable file is logged and yields an empty
    /// inventory, malformed lines are skipped. Inspect
    /// [`InventoryStore::load_report`] for what was dropped.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let storage = FileStorage::default();
        let (inventory, report) = load_lenient(&path, &storage);
        InventoryStore {
            path,
            storage,
            inventory,
            report,
            dirty: false,
        }
    }

    /// Opens the inventory described by a [`StoreConfig`].
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;
        let storage = if config.storage.atomic_writes {
            FileStorage::atomic()
        } else {
            FileStorage::direct()
        };
        Self::with_storage(config.inventory_path(), storage, config.load_policy())
    }
}

impl<S: Storage> InventoryStore<S> {
    /// Opens the inventory at `path` through any [`Storage`].
    ///
    /// ## Errors
    /// `StoreError::Parse` for the first malformed line, under
    /// [`LoadPolicy::Strict`] only. Read failures never fail construction;
    /// they land in the [`LoadReport`].
    pub fn with_storage(path: impl Into<PathBuf>, storage: S, policy: LoadPolicy) -> StoreResult<Self> {
        let path = path.into();
        let (inventory, report) = match policy {
            LoadPolicy::Lenient => load_lenient(&path, &storage),
            LoadPolicy::Strict => load_strict(&path, &storage)?,
        };

        Ok(InventoryStore {
            path,
            storage,
            inventory,
            report,
            dirty: false,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the in-memory inventory.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Outcome of the load performed at construction.
    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    /// Returns true if the inventory changed since it was loaded or saved.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Snapshot of every record.
    pub fn get_all(&self) -> Vec<Product> {
        self.inventory.get_all()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.inventory.get(name)
    }

    /// Fixed-width rendering of the inventory.
    pub fn display(&self) -> InventoryTable<'_> {
        self.inventory.table()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Inserts or replaces a product.
    pub fn add(&mut self, product: Product) -> Option<Product> {
        debug!(name = %product.name, quantity = product.quantity, "Adding product");
        self.dirty = true;
        self.inventory.add(product)
    }

    /// Removes the whole record; `requested_quantity` has no effect.
    pub fn remove(&mut self, product: &Product, requested_quantity: i64) -> Option<Product> {
        debug!(name = %product.name, requested_quantity, "Removing product");
        let removed = self.inventory.remove(product, requested_quantity);
        self.dirty |= removed.is_some();
        removed
    }

    /// Deletes the record stored under `name`.
    pub fn delete(&mut self, name: &str) -> Option<Product> {
        debug!(name = %name, "Deleting product");
        let removed = self.inventory.delete(name);
        self.dirty |= removed.is_some();
        removed
    }

    /// Takes `quantity` units out of stock. See [`Inventory::remove_quantity`].
    pub fn remove_quantity(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        let result = self.inventory.remove_quantity(name, quantity);
        self.record("Stock removal", name, quantity, &result);
        result
    }

    /// Sells `quantity` units. See [`Inventory::purchase`].
    pub fn purchase(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        let result = self.inventory.purchase(name, quantity);
        self.record("Purchase", name, quantity, &result);
        result
    }

    /// Returns `quantity` units to stock. See [`Inventory::cancel_purchase`].
    pub fn cancel_purchase(&mut self, name: &str, quantity: i64) -> CoreResult<i64> {
        let result = self.inventory.cancel_purchase(name, quantity);
        self.record("Purchase cancellation", name, quantity, &result);
        result
    }

    fn record(&mut self, operation: &str, name: &str, quantity: i64, result: &CoreResult<i64>) {
        match result {
            Ok(remaining) => {
                self.dirty = true;
                debug!(name = %name, quantity, remaining, "{} applied", operation);
            }
            Err(e) => warn!(name = %name, quantity, error = %e, "{} rejected", operation),
        }
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes every record back to the file, replacing its contents.
    ///
    /// Failures are logged and returned; on failure the in-memory inventory
    /// is untouched and still counts as unsaved.
    pub fn save(&mut self) -> StoreResult<()> {
        let blob = codec::encode(self.inventory.iter()).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Error encoding inventory");
            StoreError::Encode(e)
        })?;

        self.storage.write_all(&self.path, &blob).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Error saving inventory");
            e
        })?;

        self.dirty = false;
        info!(
            path = %self.path.display(),
            products = self.inventory.len(),
            "Inventory saved"
        );
        Ok(())
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Reads and decodes, skipping bad lines.
fn load_lenient<S: Storage>(path: &Path, storage: &S) -> (Inventory, LoadReport) {
    let mut report = LoadReport::default();
    let mut inventory = Inventory::new();
    let Some(blob) = read_blob(path, storage, &mut report) else {
        return (inventory, report);
    };

    for (line, result) in codec::decode(&blob) {
        match result {
            Ok(product) => insert_loaded(&mut inventory, &mut report, line, product),
            Err(e) => {
                warn!(path = %path.display(), line, error = %e, "Skipping malformed inventory line");
                report.skipped.push(SkippedLine { line, error: e });
            }
        }
    }

    log_loaded(path, &inventory, &report);
    (inventory, report)
}

/// Reads and decodes, failing on the first bad line.
fn load_strict<S: Storage>(path: &Path, storage: &S) -> StoreResult<(Inventory, LoadReport)> {
    let mut report = LoadReport::default();
    let mut inventory = Inventory::new();
    let Some(blob) = read_blob(path, storage, &mut report) else {
        return Ok((inventory, report));
    };

    for (line, result) in codec::decode(&blob) {
        let product = result.map_err(|e| {
            error!(path = %path.display(), line, error = %e, "Malformed inventory line");
            StoreError::parse(line, e)
        })?;
        insert_loaded(&mut inventory, &mut report, line, product);
    }

    log_loaded(path, &inventory, &report);
    Ok((inventory, report))
}

/// Returns the file contents, or `None` after recording why there are none.
fn read_blob<S: Storage>(path: &Path, storage: &S, report: &mut LoadReport) -> Option<String> {
    match storage.read_all(path) {
        Ok(blob) => Some(blob),
        Err(e) if e.is_not_found() => {
            info!(path = %path.display(), "Inventory file not found, starting empty");
            report.missing_file = true;
            None
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error loading inventory");
            report.read_error = Some(e);
            None
        }
    }
}

fn insert_loaded(inventory: &mut Inventory, report: &mut LoadReport, line: usize, product: Product) {
    if let Some(previous) = inventory.add(product) {
        debug!(line, name = %previous.name, "Duplicate product name, later line wins");
    }
    report.lines_loaded += 1;
}

fn log_loaded(path: &Path, inventory: &Inventory, report: &LoadReport) {
    info!(
        path = %path.display(),
        products = inventory.len(),
        skipped = report.skipped.len(),
        "Inventory loaded"
    );
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use shelf_core::{CoreError, Money};

    const CHESS: &str = "Type: Game|Name: Chess|Description: Classic strategy|Price: 19.99|Quantity: 5";
    const NETFLIX: &str =
        "Type: Subscription|Name: Netflix|Description: Monthly plan|Price: 15.49|Quantity: 100";

    fn memory_store(blob: &str) -> InventoryStore<MemoryStorage> {
        InventoryStore::with_storage(
            "inventory.txt",
            MemoryStorage::with_file("inventory.txt", blob),
            LoadPolicy::Lenient,
        )
        .unwrap()
    }

    #[test]
    fn test_load_populates_inventory() {
        let store = memory_store(&format!("{}\n{}\n", CHESS, NETFLIX));

        assert_eq!(store.get_all().len(), 2);
        assert_eq!(store.get("netflix").unwrap().price, Money::from_cents(1549));
        assert!(store.load_report().is_clean());
        assert_eq!(store.load_report().lines_loaded, 2);
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_duplicate_names_last_line_wins() {
        let blob = format!(
            "{}\nType: Game|Name: CHESS|Description: Travel set|Price: 9.99|Quantity: 1\n",
            CHESS
        );
        let store = memory_store(&blob);

        assert_eq!(store.get_all().len(), 1);
        let chess = store.get("chess").unwrap();
        assert_eq!(chess.name, "CHESS");
        assert_eq!(chess.quantity, 1);
        assert_eq!(chess.description, "Travel set");
    }

    #[test]
    fn test_lenient_load_skips_malformed_lines() {
        let blob = format!("{}\nType: Game|Name: Go|Description: Stones\n", CHESS);
        let store = memory_store(&blob);

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Chess");

        let report = store.load_report();
        assert!(!report.is_clean());
        assert_eq!(
            report.skipped,
            vec![SkippedLine {
                line: 2,
                error: ParseError::FieldCount {
                    expected: 5,
                    found: 3
                },
            }]
        );
    }

    #[test]
    fn test_lenient_load_keeps_lines_after_bad_price() {
        let blob = format!(
            "Type: Game|Name: Go|Description: Stones|Price: lots|Quantity: 1\n{}\n",
            CHESS
        );
        let store = memory_store(&blob);

        assert_eq!(store.get_all().len(), 1);
        assert!(store.get("chess").is_some());
        assert_eq!(store.load_report().skipped[0].line, 1);
    }

    #[test]
    fn test_strict_load_fails_on_malformed_line() {
        let blob = format!("{}\nType: Game|Name: Go|Description: Stones\n", CHESS);
        let err = InventoryStore::with_storage(
            "inventory.txt",
            MemoryStorage::with_file("inventory.txt", blob),
            LoadPolicy::Strict,
        )
        .unwrap_err();

        assert!(matches!(err, StoreError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_strict_load_accepts_clean_file() {
        let store = InventoryStore::with_storage(
            "inventory.txt",
            MemoryStorage::with_file("inventory.txt", format!("{}\n", CHESS)),
            LoadPolicy::Strict,
        )
        .unwrap();
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_missing_file_starts_empty() {
        for policy in [LoadPolicy::Lenient, LoadPolicy::Strict] {
            let store =
                InventoryStore::with_storage("absent.txt", MemoryStorage::new(), policy).unwrap();
            assert!(store.get_all().is_empty());
            assert!(store.load_report().missing_file);
            assert!(store.load_report().is_clean());
        }
    }

    #[test]
    fn test_unreadable_file_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let store = InventoryStore::open(dir.path());

        assert!(store.get_all().is_empty());
        assert!(matches!(
            store.load_report().read_error,
            Some(StoreError::Io { .. })
        ));

        let strict =
            InventoryStore::with_storage(dir.path(), FileStorage::default(), LoadPolicy::Strict)
                .unwrap();
        assert!(strict.get_all().is_empty());
        assert!(strict.load_report().read_error.is_some());
    }

    #[test]
    fn test_operations_and_dirty_flag() {
        let mut store = memory_store(&format!("{}\n", CHESS));

        assert_eq!(store.purchase("CHESS", 3), Ok(2));
        assert!(store.has_unsaved_changes());
        store.save().unwrap();
        assert!(!store.has_unsaved_changes());

        assert!(matches!(
            store.purchase("chess", 10),
            Err(CoreError::InsufficientStock { .. })
        ));
        assert!(!store.has_unsaved_changes());

        assert_eq!(store.cancel_purchase("chess", 3), Ok(5));
        assert_eq!(store.remove_quantity("chess", 1), Ok(4));
        assert!(store.cancel_purchase("missing", 1).is_err());
    }

    #[test]
    fn test_extreme_quantities_do_not_overflow() {
        let blob = "Type: Game|Name: Chess|Description: Hoard|Price: 1.00|Quantity: 9223372036854775807\n\
                    Type: Game|Name: Go|Description: Empty|Price: 1.00|Quantity: 0\n";
        let mut store = memory_store(blob);
        assert!(store.load_report().is_clean());

        assert!(matches!(
            store.cancel_purchase("chess", 1),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert!(matches!(
            store.purchase("go", i64::MIN),
            Err(CoreError::QuantityOverflow { .. })
        ));
        assert!(!store.has_unsaved_changes());
        assert_eq!(store.get("chess").unwrap().quantity, i64::MAX);
        assert_eq!(store.get("go").unwrap().quantity, 0);

        assert_eq!(store.inventory().total_value(), None);
        assert_eq!(store.inventory().total_quantity(), Some(i64::MAX));
    }

    #[test]
    fn test_remove_ignores_quantity() {
        let mut store = memory_store(&format!("{}\n{}\n", CHESS, NETFLIX));
        let chess = store.get("chess").unwrap().clone();

        assert!(store.remove(&chess, 1).is_some());
        assert!(store.get_all().iter().all(|p| p.name != "Chess"));
        assert_eq!(store.get_all().len(), 1);
        assert!(store.delete("netflix").is_some());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_save_writes_line_format() {
        let storage = MemoryStorage::new();
        let mut store =
            InventoryStore::with_storage("out.txt", &storage, LoadPolicy::Lenient).unwrap();
        store.add(Product::new(
            "Boardgame",
            "Catan",
            "Trade and build",
            Money::from_cents(4450),
            3,
        ));
        store.save().unwrap();

        assert_eq!(
            storage.contents(Path::new("out.txt")).unwrap(),
            "Type: Boardgame|Name: Catan|Description: Trade and build|Price: 44.50|Quantity: 3\n"
        );
    }

    #[test]
    fn test_save_rejects_unencodable_record() {
        let storage = MemoryStorage::with_file("inventory.txt", format!("{}\n", CHESS));
        let mut store =
            InventoryStore::with_storage("inventory.txt", &storage, LoadPolicy::Lenient).unwrap();
        store.add(Product::new("Game", "Rock|Paper", "", Money::from_cents(100), 1));

        let err = store.save().unwrap_err();
        assert!(matches!(err, StoreError::Encode(_)));
        assert!(!err.is_recoverable());
        assert!(store.has_unsaved_changes());
        assert_eq!(
            storage.contents(Path::new("inventory.txt")).unwrap(),
            format!("{}\n", CHESS)
        );
    }

    #[test]
    fn test_save_refuses_records_that_would_not_reload() {
        let rejected = [
            Product::new("Game", "", "nameless", Money::from_cents(100), 1),
            Product::new("Game", " Chess ", "padded", Money::from_cents(100), 1),
            Product::new("Game", "Go", "negative", Money::from_cents(-100), 1),
        ];

        for product in rejected {
            let storage = MemoryStorage::with_file("inventory.txt", format!("{}\n", CHESS));
            let mut store =
                InventoryStore::with_storage("inventory.txt", &storage, LoadPolicy::Lenient)
                    .unwrap();
            store.add(product);

            assert!(matches!(store.save(), Err(StoreError::Encode(_))));
            assert_eq!(
                storage.contents(Path::new("inventory.txt")).unwrap(),
                format!("{}\n", CHESS)
            );
        }
    }

    #[test]
    fn test_saved_file_reloads_strictly() {
        let storage = MemoryStorage::new();
        let mut store =
            InventoryStore::with_storage("inventory.txt", &storage, LoadPolicy::Lenient).unwrap();
        store.add(Product::new("Game", "Chess", "", Money::from_cents(0), i64::MAX));
        store.add(Product::new("Accessory", "Dice Set", "d6: x12", Money::from_cents(350), -3));
        store.save().unwrap();

        let reloaded =
            InventoryStore::with_storage("inventory.txt", &storage, LoadPolicy::Strict).unwrap();
        assert!(reloaded.load_report().is_clean());
        assert_eq!(reloaded.get_all(), store.get_all());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");

        let mut store = InventoryStore::open(&path);
        assert!(store.load_report().missing_file);
        store.add(Product::new("Game", "Chess", "Classic", Money::from_cents(1999), 5));
        store.add(Product::new("Subscription", "Netflix", "Monthly", Money::from_cents(1549), -2));
        store.add(Product::new("Boardgame", "Catan", "", Money::from_cents(0), 0));
        store.save().unwrap();

        let reopened = InventoryStore::open(&path);
        assert!(reopened.load_report().is_clean());
        assert_eq!(reopened.get_all(), store.get_all());
        assert!(!FileStorage::temp_path(&path).exists());
    }

    #[test]
    fn test_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory.txt");
        std::fs::write(&path, format!("{}\nbroken line\n", CHESS)).unwrap();

        let lenient = InventoryStore::from_config(&StoreConfig::new(&path)).unwrap();
        assert_eq!(lenient.get_all().len(), 1);

        let strict = StoreConfig::new(&path).policy(LoadPolicy::Strict);
        assert!(InventoryStore::from_config(&strict).is_err());

        assert!(InventoryStore::from_config(&StoreConfig::new("")).is_err());
    }

    #[test]
    fn test_display_lists_products() {
        let store = memory_store(&format!("{}\n", CHESS));
        let table = store.display().to_string();

        assert!(table.starts_with("Current Inventory:"));
        assert!(table.contains("Chess"));
        assert!(table.contains("$19.99"));
    }
}
