// Tue Jan 20 2026 - Alex

use super::error::{EngineError, EngineResult};
use crate::config::Config;
use crate::structure::{InterfaceAssembler, InterfaceDeclaration, LineOutcome};
use crate::symbol::{
    ClassifiedLine, DemangleOptions, Demangler, GnuV2Demangler, LineClassifier, SymbolError, SymbolResult,
    TypeNormalizer,
};
use log::{debug, info, trace};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub lines_read: usize,
    pub blank_lines_skipped: usize,
    pub thunks: usize,
    pub virtual_prototypes: usize,
    pub members_emitted: usize,
    pub members_suppressed: usize,
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub declaration: InterfaceDeclaration,
    pub stats: PipelineStats,
}

/// Raw symbol line -> classifier -> demangler -> normalizer -> assembler.
pub struct Pipeline<D: Demangler> {
    config: Config,
    classifier: LineClassifier,
    demangler: D,
    normalizer: TypeNormalizer,
}

impl Pipeline<GnuV2Demangler> {
    pub fn with_config(config: Config) -> EngineResult<Self> {
        Self::new(config, GnuV2Demangler::new())
    }
}

impl<D: Demangler> Pipeline<D> {
    pub fn new(config: Config, demangler: D) -> EngineResult<Self> {
        config.validate().map_err(EngineError::Config)?;
        debug!("Using the {} demangler", demangler.name());

        Ok(Self {
            classifier: LineClassifier::new(config.format_version),
            normalizer: TypeNormalizer::new(),
            config,
            demangler,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn demangler(&self) -> &D {
        &self.demangler
    }

    /// Demangles one identifier and normalizes its parameter types.
    pub fn signature(&self, identifier: &str) -> SymbolResult<String> {
        let demangled = self
            .demangler
            .demangle(identifier, DemangleOptions::PARAMS | DemangleOptions::ANSI)?;

        if demangled.trim().is_empty() {
            return Err(SymbolError::EmptySignature(identifier.to_string()));
        }

        Ok(self.normalizer.normalize(&demangled))
    }

    pub fn run<I, S>(&self, lines: I) -> EngineResult<PipelineOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_lines(lines.into_iter().map(Ok))
    }

    pub fn run_reader<R: BufRead>(&self, reader: R) -> EngineResult<PipelineOutput> {
        self.run_lines(reader.lines())
    }

    pub fn run_file(&self, path: &Path) -> EngineResult<PipelineOutput> {
        info!("Reading symbols from {}", path.display());
        let file = File::open(path)?;
        self.run_reader(BufReader::new(file))
    }

    fn run_lines<I, S>(&self, lines: I) -> EngineResult<PipelineOutput>
    where
        I: Iterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut assembler = InterfaceAssembler::new(&self.config);
        let mut stats = PipelineStats::default();

        for (index, line) in lines.enumerate() {
            let line = line?;
            let line = line.as_ref();
            let line_number = index + 1;
            stats.lines_read += 1;

            let classified = self
                .classifier
                .classify(line)
                .map_err(|e| EngineError::at_line(line_number, e))?;
            trace!("Line {}: {} line", line_number, classified.kind());

            let Some(identifier) = classified.identifier() else {
                trace!("Line {}: skipping blank line", line_number);
                stats.blank_lines_skipped += 1;
                continue;
            };

            match classified {
                ClassifiedLine::Thunk { thunk_id, .. } => {
                    debug!("Line {}: stripped thunk {} prefix", line_number, thunk_id);
                    stats.thunks += 1;
                }
                ClassifiedLine::VirtualPrototype { return_type, .. } => {
                    debug!("Line {}: stripped virtual prototype returning {}", line_number, return_type);
                    stats.virtual_prototypes += 1;
                }
                _ => {}
            }

            let signature = self
                .signature(identifier)
                .map_err(|e| EngineError::at_line(line_number, e))?;
            trace!("Line {}: {} -> {}", line_number, identifier, signature);

            match assembler.push(&signature) {
                LineOutcome::Member => stats.members_emitted += 1,
                LineOutcome::Suppressed => stats.members_suppressed += 1,
            }
        }

        let declaration = assembler.finish();
        info!(
            "Processed {} lines: {} members, {} suppressed",
            stats.lines_read, stats.members_emitted, stats.members_suppressed
        );

        Ok(PipelineOutput { declaration, stats })
    }
}
