// ABOUTME: Single-document export via API metadata and the UI clipboard action
// ABOUTME: Handles rate-limit backoff, duplicate skip, and metadata injection

use crate::{
    api::ApiClient, browser::Page, manifest::Manifest, sanitize::sanitize, Error, ManifestEntry,
    Result,
};
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Pause before the next request once remaining quota drops below this.
pub const RATE_LIMIT_LOW_WATER: u32 = 5;

const CLIPBOARD_TIMEOUT: Duration = Duration::from_secs(10);
const CLIPBOARD_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Exported { file_path: PathBuf },
    /// A same-named file already exists and duplicate-checking is on.
    SkippedDuplicate { file_path: PathBuf },
    /// Neither the Document nor the Spreadsheet export menu exists for
    /// this thread, so the UI offers no Markdown export.
    SkippedNoExportControl { doc_id: String },
}

pub struct ExportOptions {
    /// Web UI domain, e.g. https://example.quip.com
    pub domain: String,
    pub dupe_check: bool,
}

pub fn export_document<P: Page>(
    api: &ApiClient,
    page: &P,
    manifest: &mut Manifest,
    opts: &ExportOptions,
    doc_id: &str,
    dir: &Path,
) -> Result<ExportOutcome> {
    let (response, rate_limit) = api.get_thread(doc_id)?;
    let thread = response.thread;
    let title = thread.title.as_deref().unwrap_or("untitled").to_string();
    let file_path = dir.join(format!("{}.md", sanitize(&title)));

    if let Some(wait) = rate_limit.backoff(RATE_LIMIT_LOW_WATER) {
        println!(
            "Approaching API rate limit, waiting {} seconds...",
            wait.as_secs()
        );
        std::thread::sleep(wait);
    }

    if opts.dupe_check && file_path.exists() {
        return Ok(ExportOutcome::SkippedDuplicate { file_path });
    }

    page.goto(&format!("{}/{}", opts.domain, doc_id))?;

    // Two known document-type UI variants
    if !page.click_button("Document")? && !page.click_button("Spreadsheet")? {
        return Ok(ExportOutcome::SkippedNoExportControl {
            doc_id: doc_id.to_string(),
        });
    }

    // Clearing first makes the subsequent non-empty read unambiguous, even
    // when the same document was exported earlier in the run.
    page.clear_clipboard()?;
    page.hover_menu_item("Export")?;
    page.click_menu_item("Markdown")?;
    let markdown = wait_for_clipboard(page, doc_id, CLIPBOARD_TIMEOUT)?;

    let content = inject_metadata(
        &markdown,
        doc_id,
        &format_usec(thread.created_usec),
        &format_usec(thread.updated_usec),
    );
    std::fs::write(&file_path, content)?;

    manifest.append(&ManifestEntry {
        doc_id: doc_id.to_string(),
        title,
        file_path: file_path.display().to_string(),
    })?;

    Ok(ExportOutcome::Exported { file_path })
}

fn wait_for_clipboard<P: Page>(page: &P, doc_id: &str, timeout: Duration) -> Result<String> {
    let deadline = Instant::now() + timeout;
    loop {
        let text = page.read_clipboard()?;
        if !text.is_empty() {
            return Ok(text);
        }
        if Instant::now() >= deadline {
            return Err(Error::ClipboardTimeout {
                doc_id: doc_id.to_string(),
                waited_secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(CLIPBOARD_POLL_INTERVAL);
    }
}

/// Insert DocID and date lines right after the first line of the export,
/// which by convention is the document's title heading. Carriage returns
/// are stripped first.
fn inject_metadata(markdown: &str, doc_id: &str, created: &str, modified: &str) -> String {
    let cleaned = markdown.replace('\r', "");
    let (first_line, rest) = match cleaned.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (cleaned.as_str(), ""),
    };
    format!(
        "{}\nDocID: {}\nCreation Date: {}\nModification Date: {}\n\n{}",
        first_line, doc_id, created, modified, rest
    )
}

fn format_usec(usec: i64) -> String {
    DateTime::from_timestamp_micros(usec)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}
