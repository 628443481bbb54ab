use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use pushbox_level::{import_level, LevelModel};
use tracing::info;

const LEVEL_EXTENSION: &str = "json";

/// Levels compiled into the binary, keyed by level name.
static BUILTIN_LEVELS: [(&str, &str); 2] = [
    ("Corridor", include_str!("../levels/corridor.json")),
    ("Corner", include_str!("../levels/corner.json")),
];

/// Read-only built-in levels plus a writable directory of custom levels.
#[derive(Clone, Debug)]
pub(crate) struct LevelLibrary {
    custom_dir: PathBuf,
}

impl LevelLibrary {
    /// Creates a library that stores custom levels under `custom_dir`.
    #[must_use]
    pub(crate) fn new(custom_dir: impl Into<PathBuf>) -> Self {
        Self {
            custom_dir: custom_dir.into(),
        }
    }

    /// Names of the bundled levels, in bundle order.
    pub(crate) fn builtin_names(&self) -> impl Iterator<Item = &'static str> {
        BUILTIN_LEVELS.iter().map(|(name, _)| *name)
    }

    /// Names of the saved custom levels, sorted alphabetically.
    ///
    /// A levels directory that does not exist yet simply has no levels.
    pub(crate) fn custom_names(&self) -> Result<Vec<String>> {
        let context = || format!("failed to list levels in {}", self.custom_dir.display());
        let entries = match fs::read_dir(&self.custom_dir) {
            Ok(entries) => entries,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(error).with_context(context),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry.with_context(context)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEVEL_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Resolves `reference` to a level: a built-in name first, then a custom
    /// level name, then a literal file path.
    pub(crate) fn load(&self, reference: &str) -> Result<LevelModel> {
        if let Some((_, text)) = BUILTIN_LEVELS.iter().find(|(name, _)| *name == reference) {
            return import_level(text)
                .with_context(|| format!("built-in level {reference} is corrupt"));
        }

        let candidates = [self.custom_path(reference).ok(), Some(PathBuf::from(reference))];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return load_file(&path);
            }
        }

        bail!("no built-in level, custom level or file named `{reference}`")
    }

    /// Writes exported level `text` to the custom levels directory under
    /// `name`, returning the written path.
    ///
    /// Names of built-in levels are refused since lookups would never reach
    /// the custom copy.
    pub(crate) fn store(&self, name: &str, text: &str) -> Result<PathBuf> {
        if self.builtin_names().any(|builtin| builtin == name) {
            bail!("`{name}` is a built-in level name");
        }
        let path = self.custom_path(name)?;

        fs::create_dir_all(&self.custom_dir).with_context(|| {
            format!(
                "failed to create levels directory {}",
                self.custom_dir.display()
            )
        })?;
        fs::write(&path, text)
            .with_context(|| format!("failed to write level to {}", path.display()))?;
        info!(level = name, path = %path.display(), "level saved");
        Ok(path)
    }

    fn custom_path(&self, name: &str) -> Result<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || Path::new(name).is_absolute();
        if invalid {
            bail!("`{name}` cannot be used as a level file name");
        }
        Ok(self.custom_dir.join(format!("{name}.{LEVEL_EXTENSION}")))
    }
}

/// Reads the raw text of the level file at `path`.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read level at {}", path.display()))
}

/// Reads and decodes the level stored at `path`.
pub(crate) fn load_file(path: &Path) -> Result<LevelModel> {
    let text = read_file(path)?;
    let level = import_level(&text)
        .with_context(|| format!("failed to decode level at {}", path.display()))?;
    info!(level = level.name(), path = %path.display(), "level loaded");
    Ok(level)
}
