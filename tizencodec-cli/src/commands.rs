use std::{
    fs,
    path::{Path, PathBuf},
};

use tizencodec::{
    Error, Formatter, FormatterRegistry, LanguageTable, StringTable, TizenFormatter, TizenOptions,
};
use tracing::debug;

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub format: String,
    pub lang_map: Option<PathBuf>,
    pub generator: Option<String>,
}

impl GlobalOptions {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Default::default()
        }
    }

    pub fn with_lang_map(mut self, path: impl Into<PathBuf>) -> Self {
        self.lang_map = Some(path.into());
        self
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = Some(generator.into());
        self
    }

    /// The language table: built-in mappings merged with the `--lang-map` file, if any.
    pub fn language_table(&self) -> Result<LanguageTable, Error> {
        match &self.lang_map {
            Some(path) => {
                debug!(path = %path.display(), "loading language map");
                LanguageTable::from_toml_str(&fs::read_to_string(path)?)
            }
            None => Ok(LanguageTable::default()),
        }
    }

    /// Builds the registry, replacing the stock tizen formatter when the
    /// language table or generator was customized.
    pub fn registry(&self) -> Result<FormatterRegistry, Error> {
        let mut registry = FormatterRegistry::with_defaults();
        if self.lang_map.is_some() || self.generator.is_some() {
            let mut options = TizenOptions::new();
            if let Some(generator) = &self.generator {
                options = options.with_generator(generator.clone());
            }
            registry.register(Box::new(
                TizenFormatter::new()
                    .with_languages(self.language_table()?)
                    .with_options(options),
            ));
        }
        Ok(registry)
    }
}

pub fn run_generate_all_command(
    options: &GlobalOptions,
    model: &Path,
    dir: &Path,
) -> Result<(), Error> {
    let registry = options.registry()?;
    let formatter = registry.get(&options.format)?;
    let table = StringTable::load_from_file(model)?;

    let written = formatter.write_all_files(&table, dir)?;
    println!(
        "✅ Generated {} file(s) in {}: {}",
        written.len(),
        dir.display(),
        written.join(", ")
    );
    Ok(())
}

pub fn run_generate_command(
    options: &GlobalOptions,
    model: &Path,
    file: &Path,
    lang: &str,
) -> Result<(), Error> {
    let registry = options.registry()?;
    let formatter = registry.get(&options.format)?;
    if formatter.file_name_for_language(lang).is_none() {
        return Err(Error::UnknownLanguage(lang.to_string()));
    }
    let table = StringTable::load_from_file(model)?;

    formatter.write_file(&table, file, lang)?;
    println!("✅ Generated {} ({})", file.display(), lang);
    Ok(())
}

pub fn run_consume_all_command(
    options: &GlobalOptions,
    model: &Path,
    dir: &Path,
    output: Option<&Path>,
) -> Result<(), Error> {
    let registry = options.registry()?;
    let formatter = registry.get(&options.format)?;
    let mut table = StringTable::load_from_file(model)?;

    let read = formatter.read_all_files(&mut table, dir)?;
    let output = output.unwrap_or(model);
    table.save_to_file(output)?;
    println!(
        "✅ Consumed {} file(s) from {} into {}",
        read.len(),
        dir.display(),
        output.display()
    );
    Ok(())
}

pub fn run_consume_command(
    options: &GlobalOptions,
    model: &Path,
    file: &Path,
    lang: Option<&str>,
    output: Option<&Path>,
) -> Result<(), Error> {
    let registry = options.registry()?;
    let formatter = registry.get(&options.format)?;
    let lang = match lang {
        Some(lang) => lang.to_string(),
        None => formatter
            .determine_language_given_path(file)
            .ok_or_else(|| Error::UnknownLanguage(file.display().to_string()))?,
    };
    let mut table = StringTable::load_from_file(model)?;

    formatter.read_file(&mut table, file, &lang)?;
    let output = output.unwrap_or(model);
    table.save_to_file(output)?;
    println!(
        "✅ Consumed {} ({}) into {}",
        file.display(),
        lang,
        output.display()
    );
    Ok(())
}

pub fn run_languages_command(options: &GlobalOptions) -> Result<(), Error> {
    let languages = options.language_table()?;
    for (locale, tag) in languages.iter() {
        println!("{:<8} {}", locale, tag);
    }
    Ok(())
}
