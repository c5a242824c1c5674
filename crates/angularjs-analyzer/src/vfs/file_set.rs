use std::collections::HashSet;

use super::FileId;

/// The candidate files a full rebuild enumerates.
///
/// Filtering happens when a file is inserted. Changing the exclusion rules
/// or the extension filter only affects later insertions; files already in
/// the set stay until they are removed explicitly. Order is insertion order,
/// which is also the order rebuilds visit files in (and therefore decides
/// which declaration wins when two files register the same name).
#[derive(Debug, Clone, Default)]
pub struct FileSet {
    files: Vec<FileId>,
    /// Membership mirror of `files`.
    tracked: HashSet<FileId>,
    exclusions: Vec<String>,
    extensions: Vec<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the exclusion rules. Rules are case-insensitive substrings.
    pub fn update_exclusions<S: AsRef<str>>(
        &mut self,
        rules: impl IntoIterator<Item = S>,
    ) {
        self.exclusions = normalize_rules(rules, |rule| rule);
    }

    /// Restrict insertions to identifiers ending in one of `extensions`.
    /// An empty list accepts every file.
    pub fn set_extensions<S: AsRef<str>>(
        &mut self,
        extensions: impl IntoIterator<Item = S>,
    ) {
        self.extensions = normalize_rules(extensions, |ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        });
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclusions
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Whether `file` would pass the current filter.
    pub fn accepts(
        &self,
        file: &FileId,
    ) -> bool {
        let lowered = file.as_str().to_lowercase();
        let extension_ok = self.extensions.is_empty() || self.extensions.iter().any(|ext| lowered.ends_with(ext));
        extension_ok && !self.exclusions.iter().any(|rule| lowered.contains(rule.as_str()))
    }

    /// Replace the whole set. Returns how many files were accepted.
    pub fn set_initial(
        &mut self,
        files: impl IntoIterator<Item = FileId>,
    ) -> usize {
        self.files.clear();
        self.tracked.clear();
        for file in files {
            self.add(file);
        }
        self.files.len()
    }

    /// Insert `file` if it passes the filter and is not tracked yet.
    pub fn add(
        &mut self,
        file: FileId,
    ) -> bool {
        if !self.accepts(&file) || self.contains(&file) {
            return false;
        }
        self.tracked.insert(file.clone());
        self.files.push(file);
        true
    }

    pub fn remove(
        &mut self,
        file: &FileId,
    ) -> bool {
        if !self.tracked.remove(file) {
            return false;
        }
        self.files.retain(|tracked| tracked != file);
        true
    }

    /// Swap `old` for `new` in place, skipping the filter.
    ///
    /// Returns `false` when `old` is not tracked. If `new` is already tracked
    /// the old entry is simply dropped.
    pub fn rename(
        &mut self,
        old: &FileId,
        new: FileId,
    ) -> bool {
        if !self.tracked.contains(old) {
            return false;
        }
        let Some(position) = self.files.iter().position(|tracked| tracked == old) else {
            return false;
        };
        self.tracked.remove(old);
        if self.contains(&new) {
            self.files.remove(position);
        } else {
            self.tracked.insert(new.clone());
            self.files[position] = new;
        }
        true
    }

    pub fn contains(
        &self,
        file: &FileId,
    ) -> bool {
        self.tracked.contains(file)
    }

    pub fn files(&self) -> &[FileId] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize_rules<S: AsRef<str>>(
    rules: impl IntoIterator<Item = S>,
    shape: impl Fn(String) -> String,
) -> Vec<String> {
    let mut seen = HashSet::new();
    rules
        .into_iter()
        .map(|rule| rule.as_ref().trim().to_lowercase())
        .filter(|rule| !rule.is_empty())
        .map(shape)
        .filter(|rule| seen.insert(rule.clone()))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src/vfs/file_set_tests.rs"]
mod tests;
