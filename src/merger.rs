//! Marker-delimited document merger
//!
//! Splices a generated fragment into a target file between a start and end
//! marker line, leaving everything outside the markers untouched. Each call
//! is a full read-modify-write of the target; concurrent writers to the same
//! file are not supported.

use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

const BOM: &str = "\u{FEFF}";

/// What a merge did (or would do, in dry-run mode) to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeAction {
    /// Target did not exist and was created with the fragment
    Created,
    /// Existing marked region was replaced
    Replaced,
    /// No markers found; fragment was appended
    Appended,
    /// Target already contained exactly this fragment
    Unchanged,
}

impl MergeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeAction::Created => "created",
            MergeAction::Replaced => "updated",
            MergeAction::Appended => "appended",
            MergeAction::Unchanged => "unchanged",
        }
    }

    /// Whether the target's content differs after the merge
    pub fn is_change(&self) -> bool {
        !matches!(self, MergeAction::Unchanged)
    }
}

/// Result of merging one fragment into one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub path: PathBuf,
    pub action: MergeAction,
}

impl MergeOutcome {
    pub fn message(&self) -> String {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string());
        match self.action {
            MergeAction::Created => format!("Created {}", name),
            MergeAction::Replaced => format!("Updated {}", name),
            MergeAction::Appended => format!("Appended section to {}", name),
            MergeAction::Unchanged => format!("{} is up to date", name),
        }
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Compute the new document text without touching the filesystem
///
/// `existing` is `None` when the target does not exist yet. Returns the
/// action and the full new content. Fails when the start marker is present
/// without a following end marker.
pub fn merge_content(
    path: &Path,
    existing: Option<&str>,
    fragment: &str,
    (start, end): (&str, &str),
) -> Result<(MergeAction, String)> {
    let fragment_lines = fragment_lines(fragment, start, end);

    let Some(existing) = existing else {
        return Ok((MergeAction::Created, join_lines(&fragment_lines)));
    };

    // A byte-order mark stays in place but must not hide a marker on line 1
    let (bom, body) = match existing.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", existing),
    };

    // Lines keep their own terminators so text outside the markers is
    // reproduced byte-for-byte
    let lines: Vec<&str> = body.split_inclusive('\n').collect();
    let start_idx = lines.iter().position(|l| l.trim_end() == start);

    let (action, merged) = match start_idx {
        Some(start_idx) => {
            let end_idx = lines[start_idx + 1..]
                .iter()
                .position(|l| l.trim_end() == end)
                .map(|offset| start_idx + 1 + offset)
                .ok_or_else(|| Error::MalformedDocument {
                    path: path.to_path_buf(),
                    start: start.to_string(),
                    end: end.to_string(),
                })?;

            let mut merged = String::with_capacity(existing.len() + fragment.len());
            merged.push_str(bom);
            merged.extend(lines[..start_idx].iter().copied());
            merged.push_str(&join_lines(&fragment_lines));
            merged.extend(lines[end_idx + 1..].iter().copied());
            (MergeAction::Replaced, merged)
        }
        None => {
            let mut merged = existing.to_string();
            if !body.is_empty() {
                if !merged.ends_with('\n') {
                    merged.push('\n');
                }
                if !ends_with_blank_line(&merged) {
                    merged.push('\n');
                }
            }
            merged.push_str(&join_lines(&fragment_lines));
            (MergeAction::Appended, merged)
        }
    };

    if merged == existing {
        Ok((MergeAction::Unchanged, merged))
    } else {
        Ok((action, merged))
    }
}

/// Merge `fragment` into the file at `path`
///
/// Creates the file (and missing parent directories) when absent. With
/// `dry_run` the outcome is computed but nothing is written.
pub fn update_documentation_file(
    path: &Path,
    fragment: &str,
    markers: (&str, &str),
    dry_run: bool,
) -> Result<MergeOutcome> {
    let existing = match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => return Err(Error::io_at(path, e)),
    };

    let (action, merged) = merge_content(path, existing.as_deref(), fragment, markers)?;

    if action.is_change() && !dry_run {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io_at(parent, e))?;
            }
        }
        std::fs::write(path, &merged).map_err(|e| Error::io_at(path, e))?;
    }

    tracing::debug!("{}: {}", path.display(), action.as_str());
    Ok(MergeOutcome {
        path: path.to_path_buf(),
        action,
    })
}

/// Fragment as lines, wrapped in the markers if it does not start with one
fn fragment_lines<'a>(fragment: &'a str, start: &'a str, end: &'a str) -> Vec<&'a str> {
    let mut lines: Vec<&str> = fragment.trim_end_matches(['\n', '\r']).lines().collect();
    if lines.first().map(|l| l.trim_end()) != Some(start) {
        lines.insert(0, start);
        lines.push(end);
    }
    lines
}

fn join_lines(lines: &[&str]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn ends_with_blank_line(text: &str) -> bool {
    text.ends_with("\n\n") || text.ends_with("\n\r\n")
}
