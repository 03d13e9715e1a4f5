//! Regeneration of the project's `COPYRIGHT.md` and `LICENSE.md`.
//!
//! Triggered by the check when a `@copyright` fix is applied to content that
//! carried a year range. Fire-and-forget: failures are logged, never reported
//! as diagnostics.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Datelike;

use crate::date_range::DateRange;
use crate::domain::error::Result;
use crate::obs::{emit_regeneration, emit_regeneration_error};

/// File names of the generated artifacts. Files with these names are never
/// checked themselves.
pub const COPYRIGHT_FILE: &str = "COPYRIGHT.md";
pub const LICENSE_FILE: &str = "LICENSE.md";

/// Collaborator that rewrites licensing artifacts for a year range.
pub trait LicenseRegenerator: Send + Sync {
    fn regenerate(&self, range: &DateRange);
}

/// Does nothing. Used for report-only runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegenerator;

impl LicenseRegenerator for NoopRegenerator {
    fn regenerate(&self, _range: &DateRange) {}
}

/// Remembers every requested range. Parallel runs check through one of these
/// and regenerate once from [`RecordingRegenerator::merged`] afterwards.
#[derive(Debug, Default)]
pub struct RecordingRegenerator {
    calls: Mutex<Vec<DateRange>>,
}

impl RecordingRegenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DateRange> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Smallest range covering every recorded one; `None` when nothing was
    /// recorded. Independent of the order the calls arrived in.
    pub fn merged(&self) -> Option<DateRange> {
        self.calls().into_iter().reduce(DateRange::widen)
    }
}

impl LicenseRegenerator for RecordingRegenerator {
    fn regenerate(&self, range: &DateRange) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(*range);
        }
    }
}

/// Writes `COPYRIGHT.md` and `LICENSE.md` into the project root.
#[derive(Debug)]
pub struct FsLicenseFiles {
    root: PathBuf,
    holder: String,
    // serialises concurrent regenerations from parallel file checks
    write_lock: Mutex<()>,
}

impl FsLicenseFiles {
    pub fn new(root: impl Into<PathBuf>, holder: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            holder: holder.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Write both files for `years` (already rendered, e.g. `2015-2018`).
    pub fn write_files(&self, years: &str) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|p| p.into_inner());
        std::fs::write(
            self.root.join(COPYRIGHT_FILE),
            render_copyright(years, &self.holder),
        )?;
        std::fs::write(
            self.root.join(LICENSE_FILE),
            render_license(years, &self.holder),
        )?;
        Ok(())
    }
}

impl LicenseRegenerator for FsLicenseFiles {
    fn regenerate(&self, range: &DateRange) {
        let years = range.render(chrono::Utc::now().year());
        match self.write_files(&years) {
            Ok(()) => emit_regeneration(&self.root, &years),
            Err(e) => emit_regeneration_error(&self.root, &e),
        }
    }
}

pub fn render_copyright(years: &str, holder: &str) -> String {
    format!("Copyright (c) {years}, {holder}.\nAll rights reserved.\n")
}

/// New BSD (3-clause) licence text.
pub fn render_license(years: &str, holder: &str) -> String {
    format!(
        "Copyright (c) {years}, {holder}.
All rights reserved.

Redistribution and use in source and binary forms, with or without
modification, are permitted provided that the following conditions are met:

- Redistributions of source code must retain the above copyright notice, this
  list of conditions and the following disclaimer.

- Redistributions in binary form must reproduce the above copyright notice,
  this list of conditions and the following disclaimer in the documentation
  and/or other materials provided with the distribution.

- Neither the name of {holder} nor the names of its contributors may be used
  to endorse or promote products derived from this software without specific
  prior written permission.

THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS \"AS IS\" AND
ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED
WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT OWNER OR CONTRIBUTORS BE LIABLE FOR
ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES
(INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES;
LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON
ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE OF THIS
SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
"
    )
}
