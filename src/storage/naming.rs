// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Filename sanitization and extension checks.
//!
//! Declared filenames come straight from clients and are untrusted.

use std::path::Path;

use super::FileCategory;

/// Longest sanitized filename we will produce.
pub const MAX_FILENAME_LEN: usize = 255;

/// Make an untrusted filename safe to join onto a storage directory.
///
/// Every character outside `[A-Za-z0-9.-]` becomes `_`, runs of `.` collapse
/// to a single `.`, and the result is cut to [`MAX_FILENAME_LEN`] characters.
/// The output never contains `/` or `..`.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len().min(MAX_FILENAME_LEN));
    let mut prev_dot = false;

    for c in name.chars() {
        let c = if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            c
        } else {
            '_'
        };
        if c == '.' && prev_dot {
            continue;
        }
        prev_dot = c == '.';
        out.push(c);
    }

    // Output is pure ASCII, so byte truncation is char-safe.
    out.truncate(MAX_FILENAME_LEN);
    out
}

/// Lowercase extension of `filename`, if any.
pub fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// True iff the filename's extension is allowed for `category`.
pub fn validate_file_type(filename: &str, category: FileCategory) -> bool {
    extension_of(filename)
        .map(|ext| category.allows_extension(&ext))
        .unwrap_or(false)
}

/// On-disk name: `{owner_id}_{timestamp_millis}_{sanitized}`.
pub fn compose_stored_name(owner_id: &str, timestamp_millis: i64, sanitized: &str) -> String {
    format!("{owner_id}_{timestamp_millis}_{sanitized}")
}

/// MIME type for a stored object, by extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_deref() {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",
        Some("csv") => "text/csv; charset=utf-8",
        Some("json") => "application/json",
        Some("pem") | Some("crt") => "application/x-pem-file",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_neutralized() {
        let clean = sanitize_filename("../../etc/passwd");
        assert!(!clean.contains(".."));
        assert!(!clean.contains('/'));
        assert_eq!(clean, "._._etc_passwd");
    }

    #[test]
    fn dot_runs_collapse() {
        assert_eq!(sanitize_filename("report....pdf"), "report.pdf");
        assert_eq!(sanitize_filename("...."), ".");
    }

    #[test]
    fn unsafe_chars_are_replaced() {
        assert_eq!(sanitize_filename("my report (v2).pdf"), "my_report__v2_.pdf");
        assert_eq!(sanitize_filename("a\\b:c*d"), "a_b_c_d");
        assert_eq!(sanitize_filename("résumé.pdf"), "r_sum_.pdf");
    }

    #[test]
    fn long_names_are_truncated() {
        let long = format!("{}.pdf", "a".repeat(400));
        assert_eq!(sanitize_filename(&long).len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn extension_validation() {
        assert!(validate_file_type("report.PDF", FileCategory::Document));
        assert!(validate_file_type("server.key", FileCategory::Credential));
        assert!(!validate_file_type("malware.exe", FileCategory::Document));
        assert!(!validate_file_type("no_extension", FileCategory::Document));
        assert!(!validate_file_type(".pdf", FileCategory::Document));
    }

    #[test]
    fn stored_name_layout() {
        assert_eq!(
            compose_stored_name("client-7", 1_706_400_000_000, "deal.pdf"),
            "client-7_1706400000000_deal.pdf"
        );
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for("a.PNG"), "image/png");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
