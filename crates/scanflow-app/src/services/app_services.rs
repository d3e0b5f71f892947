// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — resolves the data directory, loads the persisted
// configuration, and hands out the splitter and worker to the CLI.

use std::path::{Path, PathBuf};

use scanflow_core::SplitterConfig;
use scanflow_core::error::Result;
use scanflow_core::types::SplitRequest;
use scanflow_document::SplitterService;
use tracing::{info, warn};

use super::data_dir;
use crate::worker::{SplitHandle, SplitWorker};

const CONFIG_FILE: &str = "config.json";

/// Services shared by all CLI commands.
pub struct AppServices {
    data_dir: PathBuf,
    config: SplitterConfig,
    splitter: SplitterService,
}

impl AppServices {
    /// Initialise services. Call once at startup.
    ///
    /// `base` overrides the data directory; a missing or unreadable config
    /// falls back to defaults.
    pub fn init(base: Option<&Path>) -> Result<Self> {
        let dir = data_dir::data_dir(base)?;
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();

        Ok(Self {
            data_dir: dir,
            config,
            splitter: SplitterService::new(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn splitter(&self) -> SplitterService {
        self.splitter
    }

    /// Where the debug log is written.
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.log_file_name)
    }

    /// Start a split on the background worker.
    pub fn start_split(&self, request: SplitRequest) -> SplitHandle {
        SplitWorker::spawn(self.splitter, request)
    }

    /// Remember `dir` as the output directory to offer next time.
    pub fn remember_output_dir(&mut self, dir: &Path) {
        if self.config.last_output_dir.as_deref() == Some(dir) {
            return;
        }
        self.config.last_output_dir = Some(dir.to_path_buf());
        if let Err(e) = persist_config(&self.data_dir, &self.config) {
            warn!(error = %e, "failed to persist config");
        }
    }
}

fn load_config(data_dir: &Path) -> Option<SplitterConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &SplitterConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
