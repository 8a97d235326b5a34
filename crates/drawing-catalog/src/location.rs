//! File locations for catalog entries.
//!
//! This module only builds location strings; opening files belongs to the
//! caller.

use drawing_identifiers::{basename, leading_token, revise_suffix};

use crate::config::CatalogConfig;
use crate::domain::{CatalogRecord, Category, LocationStrategy};

/// CAD subfolder for a block. Unmapped blocks are their own folder.
pub fn cad_folder<'a>(block: &'a str, config: &'a CatalogConfig) -> &'a str {
    config
        .cad_folders
        .get(block)
        .map(String::as_str)
        .unwrap_or(block)
}

/// Resolve the local location of a record's file.
///
/// Returns `None` when the record lacks the field its category locates by:
/// an empty filename for assembly drawings, a nesting reference without a
/// leading token for fabrication drawings.
pub fn resolve_location(
    category: Category,
    record: &CatalogRecord,
    config: &CatalogConfig,
) -> Option<String> {
    let profile = category.profile();
    let base = config.paths.base(category).trim_end_matches(['/', '\\']);

    match profile.location {
        LocationStrategy::RevisedFilename { block_folders } => {
            let stem = strip_extension(record.filename.trim());
            if stem.is_empty() {
                return None;
            }
            let revised = revise_suffix(
                stem,
                &config.assembly_revision.from,
                &config.assembly_revision.to,
            );
            if block_folders {
                Some(format!(
                    "{}/{}/{}.{}",
                    base,
                    cad_folder(&record.block, config),
                    revised,
                    profile.extension
                ))
            } else {
                Some(format!("{}/{}.{}", base, revised, profile.extension))
            }
        }
        LocationStrategy::NestingToken => {
            let token = leading_token(&record.nesting_dwg)?;
            Some(format!("{}/{}.{}", base, token, profile.extension))
        }
    }
}

/// Remote mirror URL for a local path whose file is missing.
///
/// The category is inferred from the folder marker and extension in the
/// path. Returns `None` when the remote is disabled or the path matches no
/// category.
pub fn remote_url(local_path: &str, config: &CatalogConfig) -> Option<String> {
    if !config.remote.is_enabled() {
        return None;
    }

    let category = classify_path(local_path)?;
    let prefix = config.remote.prefix(category).trim_matches('/');
    if prefix.is_empty() {
        return None;
    }

    Some(format!(
        "{}/{}/{}",
        config.remote.base_url.trim_end_matches('/'),
        prefix,
        basename(local_path)
    ))
}

/// Infer a category from a local path.
pub fn classify_path(local_path: &str) -> Option<Category> {
    let lower = local_path.to_lowercase();
    let fabrication = Category::FabricationPdf.profile();
    let assembly_marker = Category::AssemblyPdf.profile().folder_marker;

    if lower.contains(fabrication.folder_marker) && lower.contains(".pdf") {
        return Some(Category::FabricationPdf);
    }
    if lower.contains(assembly_marker) {
        if lower.contains(".pdf") {
            return Some(Category::AssemblyPdf);
        }
        if lower.contains(".dwg") {
            return Some(Category::AssemblyCad);
        }
    }
    None
}

/// `file:///` URL for a local path.
pub fn to_file_url(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let encoded: Vec<String> = normalized
        .split('/')
        .map(|segment| {
            // keep drive letters like `D:` readable
            if segment.len() == 2 && segment.ends_with(':') {
                segment.to_string()
            } else {
                urlencoding::encode(segment).into_owned()
            }
        })
        .collect();
    format!("file:///{}", encoded.join("/").trim_start_matches('/'))
}

/// Local path for a `file:///` URL (or a plain path, passed through decoded).
pub fn from_file_url(url: &str) -> String {
    let without_scheme = url.strip_prefix("file:///").unwrap_or(url);
    let decoded = urlencoding::decode(without_scheme)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| without_scheme.to_string());

    // `/D:/x` -> `D:/x`
    let bytes = decoded.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[2] == b':' {
        return decoded[1..].to_string();
    }
    if url.starts_with("file:///") && !looks_like_drive(&decoded) {
        return format!("/{}", decoded);
    }
    decoded
}

fn looks_like_drive(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

fn strip_extension(filename: &str) -> &str {
    let lower = filename.to_ascii_lowercase();
    if lower.ends_with(".pdf") || lower.ends_with(".dwg") {
        &filename[..filename.len() - 4]
    } else {
        filename
    }
}
