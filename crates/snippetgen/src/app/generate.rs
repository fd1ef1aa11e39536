//! End-to-end pipeline: walk, extract, aggregate, render.

use std::path::PathBuf;

use crate::app::aggregate::Aggregator;
use crate::app::diagnostics::{Diagnostic, Diagnostics};
use crate::app::extract::SnippetExtractor;
use crate::app::paths::PathNormalizer;
use crate::app::walk::{SkipRules, TreeWalker};
use crate::domain::errors::GenerateError;
use crate::domain::model::{GeneratedModule, is_identifier, is_type_path};
use crate::infra::config::Config;
use crate::infra::render::ModuleRenderer;

/// Runtime options for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub package: String,
    pub scan_dir: PathBuf,
    /// Base for location paths; `None` records absolute paths.
    pub rel_base: Option<PathBuf>,
    pub skip: SkipRules,
    pub location_import: String,
}

impl GenerateOptions {
    /// Build options from resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            package: config.generate.package().to_owned(),
            scan_dir: config.scan.dir().to_path_buf(),
            rel_base: config.scan.rel_base(),
            skip: SkipRules::new(config.scan.skip()),
            location_import: config.generate.location_import().to_owned(),
        }
    }
}

/// Drives a [`SnippetExtractor`] over a tree and renders the collected module.
pub struct Generator<E> {
    extractor: E,
    renderer: ModuleRenderer,
}

impl<E: SnippetExtractor> Generator<E> {
    pub fn new(extractor: E, renderer: ModuleRenderer) -> Self {
        Self {
            extractor,
            renderer,
        }
    }

    /// Walk the scan directory and collect every snippet into one module.
    ///
    /// Extraction failures are reported to `diagnostics` and the file is treated as empty;
    /// traversal and path failures abort.
    pub fn build_module(
        &self,
        options: &GenerateOptions,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<GeneratedModule, GenerateError> {
        if !is_identifier(&options.package) {
            return Err(GenerateError::InvalidPackage(options.package.clone()));
        }
        if !is_type_path(&options.location_import) {
            return Err(GenerateError::InvalidLocationImport(
                options.location_import.clone(),
            ));
        }

        let normalizer = PathNormalizer::new(options.rel_base.as_deref())?;
        let mut aggregator = Aggregator::new(normalizer, options.location_import.clone());
        let walker = TreeWalker::new(&options.scan_dir, options.skip.clone());

        walker.walk(|path| {
            let records = match self.extractor.extract(path) {
                Ok(records) => records,
                Err(error) => {
                    diagnostics.report(Diagnostic::ExtractionFailed {
                        path: path.to_path_buf(),
                        error,
                    });
                    Vec::new()
                }
            };
            aggregator.accept(path, records, &mut *diagnostics)?;
            Ok(())
        })?;

        tracing::info!(
            files = aggregator.files_seen(),
            snippets = aggregator.snippet_count(),
            "collected snippets"
        );
        Ok(aggregator.finalize(options.package.clone()))
    }

    /// Build the module and render it to source text.
    pub fn generate(
        &self,
        options: &GenerateOptions,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<String, GenerateError> {
        let module = self.build_module(options, diagnostics)?;
        self.renderer.render(&module)
    }
}
