use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use cardwise::CardCatalog;

pub(crate) const CATALOG_ENV: &str = "CARDWISE_CATALOG";
pub(crate) const CATALOG_FILE: &str = "cards.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CatalogSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) catalog: CatalogSource,
}

impl Config {
    /// Catalog source, first hit wins: `--catalog`, `$CARDWISE_CATALOG`,
    /// `cards.csv` in the data directory, the built-in table.
    pub(crate) fn resolve(catalog_flag: Option<&str>) -> Result<Self> {
        let env = std::env::var(CATALOG_ENV).ok().filter(|v| !v.trim().is_empty());
        let data_dir = data_dir();
        Self::resolve_from(catalog_flag, env.as_deref(), data_dir.as_deref())
    }

    fn resolve_from(
        catalog_flag: Option<&str>,
        env: Option<&str>,
        data_dir: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = catalog_flag.or(env) {
            let path = PathBuf::from(crate::run::shellexpand(path));
            if !path.exists() {
                anyhow::bail!("Catalog file not found: {}", path.display());
            }
            return Ok(Self {
                catalog: CatalogSource::File(path),
            });
        }

        let catalog = match data_dir.map(|d| d.join(CATALOG_FILE)) {
            Some(path) if path.exists() => CatalogSource::File(path),
            _ => CatalogSource::Builtin,
        };
        Ok(Self { catalog })
    }

    pub(crate) fn load_catalog(&self) -> Result<CardCatalog> {
        match &self.catalog {
            CatalogSource::Builtin => Ok(CardCatalog::builtin()),
            CatalogSource::File(path) => CardCatalog::load_csv(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display())),
        }
    }
}

fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "cardwise", "Cardwise")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::resolve_from(None, None, Some(dir.path())).unwrap();
        assert_eq!(cfg.catalog, CatalogSource::Builtin);
        assert!(!cfg.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_no_data_dir() {
        let cfg = Config::resolve_from(None, None, None).unwrap();
        assert_eq!(cfg.catalog, CatalogSource::Builtin);
    }

    #[test]
    fn test_data_dir_file_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CATALOG_FILE);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"institution,product,category,rate\nacme,Plain,everything,1\n")
            .unwrap();

        let cfg = Config::resolve_from(None, None, Some(dir.path())).unwrap();
        assert_eq!(cfg.catalog, CatalogSource::File(path));
        let catalog = cfg.load_catalog().unwrap();
        assert!(catalog.find("Plain").is_some());
    }

    #[test]
    fn test_flag_beats_env() {
        let flag = tempfile::NamedTempFile::new().unwrap();
        let env = tempfile::NamedTempFile::new().unwrap();
        let cfg = Config::resolve_from(
            flag.path().to_str(),
            env.path().to_str(),
            None,
        )
        .unwrap();
        assert_eq!(cfg.catalog, CatalogSource::File(flag.path().to_path_buf()));
    }

    #[test]
    fn test_env_used_without_flag() {
        let env = tempfile::NamedTempFile::new().unwrap();
        let cfg = Config::resolve_from(None, env.path().to_str(), None).unwrap();
        assert_eq!(cfg.catalog, CatalogSource::File(env.path().to_path_buf()));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::resolve_from(Some("/nonexistent/cards.csv"), None, None).unwrap_err();
        assert!(err.to_string().contains("Catalog file not found"));
    }

    #[test]
    fn test_bad_catalog_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"institution,product,category,rate\nacme,Plain,dining,1\n")
            .unwrap();
        let cfg = Config::resolve_from(file.path().to_str(), None, None).unwrap();
        let err = cfg.load_catalog().unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
