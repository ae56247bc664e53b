//! Archive operations.
//!
//! [`SevenZip`] exposes one async method per verb. Each builds the command
//! template, composes the argument vector, and runs it through the
//! primary/secondary binary policy with the verb's output parser. Progress
//! callbacks receive the entries classified from each stdout chunk.
//!
//! ```rust,ignore
//! use sevenzip_engine::{EngineConfig, OperationRequest, SevenZip, Switches};
//!
//! let zip = SevenZip::new(EngineConfig::load()?);
//! let request = OperationRequest::new("backup.7z")
//!     .files(vec!["docs", "*.md"])
//!     .switches(Switches::new().with("mx", "9"));
//!
//! let args = zip.add(&request, |added| println!("{:?}", added)).await?;
//! ```

use crate::binary::BinaryLocation;
use crate::command::{self, ArgumentVector, FileSelection, Verb};
use crate::config::EngineConfig;
use crate::error::{Result, SevenZipError};
use crate::parsers::{ArchiveManifest, Discard, ListEntry, ListParser, MarkerParser};
use crate::runner;
use crate::switches::{self, Switches};

/// Destination placeholder: a folder named after the archive
pub const DEFAULT_DESTINATION: &str = "*";

/// Inputs of one operation
#[derive(Debug, Clone, Default)]
pub struct OperationRequest {
    pub archive: String,
    pub files: FileSelection,
    /// Output directory of the extract verbs
    pub destination: Option<String>,
    pub switches: Switches,
    /// Use the alternate `other32` install of the binaries
    pub alternate_install: bool,
}

impl OperationRequest {
    pub fn new(archive: impl Into<String>) -> Self {
        Self {
            archive: archive.into(),
            ..Default::default()
        }
    }

    pub fn files(mut self, files: impl Into<FileSelection>) -> Self {
        self.files = files.into();
        self
    }

    /// Rename pairs, rendered as alternating old and new names.
    pub fn rename_pairs<S: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (S, S)>,
    ) -> Self {
        let names = pairs
            .into_iter()
            .flat_map(|(old, new)| [old.into(), new.into()])
            .collect::<Vec<String>>();
        self.files = FileSelection::Many(names);
        self
    }

    pub fn destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn switches(mut self, switches: Switches) -> Self {
        self.switches = switches;
        self
    }

    pub fn alternate_install(mut self, alternate: bool) -> Self {
        self.alternate_install = alternate;
        self
    }

    fn destination_or_default(&self) -> &str {
        self.destination.as_deref().unwrap_or(DEFAULT_DESTINATION)
    }
}

/// Archive operations backed by the 7-Zip executables
#[derive(Debug, Clone, Default)]
pub struct SevenZip {
    config: EngineConfig,
}

impl SevenZip {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Location of a binary, e.g. `7z` or `7za`.
    pub fn binary(&self, name: &str, alternate: bool) -> Result<BinaryLocation> {
        self.config.locate(name, alternate)
    }

    async fn run_marked<F>(
        &self,
        verb: Verb,
        request: &OperationRequest,
        template: String,
        files: &FileSelection,
        switches: &Switches,
        mut on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let args = command::compose(&template, files, switches)?;
        let alternate = request.alternate_install;
        let echoed = match verb.marker() {
            Some(marker) => {
                let new_parser = || MarkerParser::new(marker);
                runner::run_with_fallback(
                    &self.config,
                    verb,
                    &args,
                    alternate,
                    new_parser,
                    &mut on_progress,
                )
                .await?
                .0
            }
            None => {
                runner::run_with_fallback(
                    &self.config,
                    verb,
                    &args,
                    alternate,
                    || Discard,
                    &mut on_progress,
                )
                .await?
                .0
            }
        };
        Ok(echoed)
    }

    /// Create an archive or add files to it. Progress: added paths.
    pub async fn add<F>(&self, request: &OperationRequest, on_progress: F) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let template = command::template(Verb::Add, &request.archive, None)?;
        self.run_marked(
            Verb::Add,
            request,
            template,
            &request.files,
            &request.switches,
            on_progress,
        )
        .await
    }

    /// Delete files from an archive.
    pub async fn delete(&self, request: &OperationRequest) -> Result<ArgumentVector> {
        let template = command::template(Verb::Delete, &request.archive, None)?;
        self.run_marked(
            Verb::Delete,
            request,
            template,
            &request.files,
            &request.switches,
            |_| {},
        )
        .await
    }

    /// Extract an archive into a flat destination. Progress: extracted paths.
    pub async fn extract<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let template = command::template(
            Verb::Extract,
            &request.archive,
            Some(request.destination_or_default()),
        )?;
        self.run_marked(
            Verb::Extract,
            request,
            template,
            &FileSelection::None,
            &request.switches,
            on_progress,
        )
        .await
    }

    /// Extract an archive keeping full paths. Progress: extracted paths.
    pub async fn extract_full<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let template = command::template(
            Verb::ExtractFull,
            &request.archive,
            Some(request.destination_or_default()),
        )?;
        self.run_marked(
            Verb::ExtractFull,
            request,
            template,
            &FileSelection::None,
            &request.switches,
            on_progress,
        )
        .await
    }

    /// Extract only the selected files, recursively, overwriting existing
    /// ones. Progress: extracted paths.
    pub async fn only<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let selected: Vec<String> = request.files.paths().iter().map(|p| p.to_string()).collect();
        if selected.is_empty() {
            return Err(SevenZipError::invalid_input(
                "extracting selected files needs at least one file",
            ));
        }

        let template = command::template(
            Verb::Only,
            &request.archive,
            Some(request.destination_or_default()),
        )?;
        let switches = request.switches.clone().with(switches::FILES, selected);
        self.run_marked(
            Verb::Only,
            request,
            template,
            &FileSelection::None,
            &switches,
            on_progress,
        )
        .await
    }

    /// List an archive. Progress: table rows as they are parsed.
    pub async fn list<F>(
        &self,
        request: &OperationRequest,
        mut on_progress: F,
    ) -> Result<ArchiveManifest>
    where
        F: FnMut(Vec<ListEntry>) + Send,
    {
        let template = command::template(Verb::List, &request.archive, None)?;
        let args = command::compose(&template, &FileSelection::None, &request.switches)?;
        let (_, parser) = runner::run_with_fallback(
            &self.config,
            Verb::List,
            &args,
            request.alternate_install,
            ListParser::new,
            &mut on_progress,
        )
        .await?;
        Ok(parser.into_manifest())
    }

    /// Rename entries. The file selection holds old/new name pairs.
    /// Progress: renamed paths.
    pub async fn rename<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let names = request.files.paths();
        if names.is_empty() || names.len() % 2 != 0 {
            return Err(SevenZipError::invalid_input(
                "renaming expects pairs of old and new names",
            ));
        }

        let template = command::template(Verb::Rename, &request.archive, None)?;
        self.run_marked(
            Verb::Rename,
            request,
            template,
            &request.files,
            &request.switches,
            on_progress,
        )
        .await
    }

    /// Test archive integrity. Progress: tested paths.
    pub async fn test<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let template = command::template(Verb::Test, &request.archive, None)?;
        self.run_marked(
            Verb::Test,
            request,
            template,
            &FileSelection::None,
            &request.switches,
            on_progress,
        )
        .await
    }

    /// Update files in an archive. Progress: updated paths.
    pub async fn update<F>(
        &self,
        request: &OperationRequest,
        on_progress: F,
    ) -> Result<ArgumentVector>
    where
        F: FnMut(Vec<String>) + Send,
    {
        let template = command::template(Verb::Update, &request.archive, None)?;
        self.run_marked(
            Verb::Update,
            request,
            template,
            &request.files,
            &request.switches,
            on_progress,
        )
        .await
    }
}
