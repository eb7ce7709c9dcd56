//! The formatter trait: the parse/render capability pair every file format provides.
//!
//! Formats implement the per-file hooks ([`Formatter::parse`], [`Formatter::render`],
//! language detection and output naming); the directory-level operations are
//! provided on top of them.

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use ignore::WalkBuilder;
use tracing::{debug, info};

use crate::{error::Error, types::StringTable};

/// A localization file format that can read into and render from a [`StringTable`].
///
/// # Example
///
/// ```rust,no_run
/// use tizencodec::{StringTable, formats::TizenFormatter, traits::Formatter};
///
/// let formatter = TizenFormatter::new();
/// let mut table = StringTable::new();
/// formatter.read_all_files(&mut table, "res".as_ref())?;
/// formatter.write_all_files(&table, "out".as_ref())?;
/// # Ok::<(), tizencodec::Error>(())
/// ```
pub trait Formatter {
    /// Registry name of the format (e.g. `"tizen"`).
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    /// File name used for single-file writes when the caller gives none.
    fn default_file_name(&self) -> &str;

    /// Whether `path` looks like a directory of this format's files.
    fn can_handle_directory(&self, path: &Path) -> bool;

    /// The table language a file at `path` holds, if it can be determined.
    fn determine_language_given_path(&self, path: &Path) -> Option<String>;

    /// Output file name for a table language, or `None` if the format cannot write it.
    fn file_name_for_language(&self, lang: &str) -> Option<String>;

    /// Records every entry of `content` into `table` under `lang`.
    fn parse(&self, table: &mut StringTable, content: &str, lang: &str);

    /// Renders the whole file for `lang`.
    fn render(&self, table: &StringTable, lang: &str) -> String;

    /// Reads one file. The content is BOM-sniffed and decoded to UTF-8.
    fn read_file(&self, table: &mut StringTable, path: &Path, lang: &str) -> Result<(), Error> {
        let file = File::open(path)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut content = String::new();
        decoder.read_to_string(&mut content)?;

        self.parse(table, &content, lang);
        info!(path = %path.display(), lang, "read {} file", self.name());
        Ok(())
    }

    /// Writes one file.
    fn write_file(&self, table: &StringTable, path: &Path, lang: &str) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(self.render(table, lang).as_bytes())?;
        writer.flush()?;
        info!(path = %path.display(), lang, "wrote {} file", self.name());
        Ok(())
    }

    /// Lists every file below `path` whose language can be determined, in sorted order.
    fn scan_directory(&self, path: &Path) -> Result<Vec<(PathBuf, String)>, Error> {
        if !path.is_dir() {
            return Err(Error::DirectoryNotFound(path.to_path_buf()));
        }

        let walker = WalkBuilder::new(path)
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut found = Vec::new();
        for dent in walker {
            let dent = match dent {
                Ok(d) => d,
                Err(e) => {
                    debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !dent.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let relative = dent.path().strip_prefix(path).unwrap_or(dent.path());
            match self.determine_language_given_path(relative) {
                Some(lang) => found.push((dent.path().to_path_buf(), lang)),
                None => debug!(path = %dent.path().display(), "no supported language, skipping"),
            }
        }
        Ok(found)
    }

    /// Reads every recognized file below `path`. Returns the languages read, in file order.
    fn read_all_files(&self, table: &mut StringTable, path: &Path) -> Result<Vec<String>, Error> {
        let files = self.scan_directory(path)?;
        if files.is_empty() {
            return Err(Error::NoLanguagesFound(path.to_path_buf()));
        }

        let mut langs_read = Vec::with_capacity(files.len());
        for (file, lang) in files {
            self.read_file(table, &file, &lang)?;
            langs_read.push(lang);
        }
        Ok(langs_read)
    }

    /// Writes one file per writable language of `table` into the existing directory `path`.
    /// Returns the languages written.
    ///
    /// Nothing is written when two languages of the table map to the same file.
    /// Files written before an I/O failure are kept.
    fn write_all_files(&self, table: &StringTable, path: &Path) -> Result<Vec<String>, Error> {
        if !path.is_dir() {
            return Err(Error::DirectoryNotFound(path.to_path_buf()));
        }

        let mut planned: Vec<(String, String)> = Vec::new();
        for lang in table.all_languages() {
            let Some(file_name) = self.file_name_for_language(&lang) else {
                debug!(lang = lang.as_str(), "language not supported by {}, skipping", self.name());
                continue;
            };
            if let Some((_, first)) = planned.iter().find(|(f, _)| *f == file_name) {
                return Err(Error::LanguageCollision {
                    file: path.join(&file_name),
                    first: first.clone(),
                    second: lang,
                });
            }
            planned.push((file_name, lang));
        }

        if planned.is_empty() {
            return Err(Error::NoLanguagesWritten(path.to_path_buf()));
        }
        for (file_name, lang) in &planned {
            self.write_file(table, &path.join(file_name), lang)?;
        }
        Ok(planned.into_iter().map(|(_, lang)| lang).collect())
    }
}
