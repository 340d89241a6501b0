//! Lazily loaded set of performance databases.

use crate::container::Container;
use crate::database::{Configuration, PerformanceDatabase};
use crate::error::DatabaseResult;
use ags_fluids::WorkingFluid;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the database containers live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLayout {
    /// One container holding every configuration and fluid.
    SingleFile(PathBuf),
    /// One container per pair, named `{configuration}_{fluid}.json`.
    Directory(PathBuf),
}

impl CatalogLayout {
    fn path_for(&self, configuration: Configuration, fluid: WorkingFluid) -> PathBuf {
        match self {
            CatalogLayout::SingleFile(path) => path.clone(),
            CatalogLayout::Directory(dir) => {
                dir.join(format!("{}_{}.json", configuration.key(), fluid.key()))
            }
        }
    }
}

/// Loads each (configuration, fluid) database on first use and keeps it.
#[derive(Debug)]
pub struct DatabaseCatalog {
    layout: CatalogLayout,
    loaded: HashMap<(Configuration, WorkingFluid), Arc<PerformanceDatabase>>,
}

impl DatabaseCatalog {
    pub fn new(layout: CatalogLayout) -> Self {
        Self {
            layout,
            loaded: HashMap::new(),
        }
    }

    /// Catalog rooted at `path`: a directory of per-pair files, or a single
    /// container file.
    pub fn open(path: &Path) -> Self {
        if path.is_dir() {
            Self::new(CatalogLayout::Directory(path.to_path_buf()))
        } else {
            Self::new(CatalogLayout::SingleFile(path.to_path_buf()))
        }
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn get(
        &mut self,
        configuration: Configuration,
        fluid: WorkingFluid,
    ) -> DatabaseResult<Arc<PerformanceDatabase>> {
        if let Some(db) = self.loaded.get(&(configuration, fluid)) {
            return Ok(Arc::clone(db));
        }

        let path = self.layout.path_for(configuration, fluid);
        tracing::debug!(path = %path.display(), %configuration, %fluid, "loading performance database");
        let container = Container::open(&path)?;
        let db = Arc::new(PerformanceDatabase::load(&container, configuration, fluid)?);
        self.loaded.insert((configuration, fluid), Arc::clone(&db));
        Ok(db)
    }

    pub fn is_loaded(&self, configuration: Configuration, fluid: WorkingFluid) -> bool {
        self.loaded.contains_key(&(configuration, fluid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_layout_names_files_by_pair() {
        let layout = CatalogLayout::Directory(PathBuf::from("/data"));
        assert_eq!(
            layout.path_for(Configuration::ULoop, WorkingFluid::CarbonDioxide),
            PathBuf::from("/data/utube_sCO2.json")
        );
    }

    #[test]
    fn missing_file_is_data_load_error() {
        let mut catalog = DatabaseCatalog::new(CatalogLayout::SingleFile(PathBuf::from(
            "/nonexistent/ags/database.json",
        )));
        let err = catalog
            .get(Configuration::Coaxial, WorkingFluid::Water)
            .unwrap_err();
        assert!(matches!(err, crate::DatabaseError::DataLoad { .. }));
        assert!(!catalog.is_loaded(Configuration::Coaxial, WorkingFluid::Water));
    }
}
