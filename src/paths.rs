use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;

/// Extension used when the target does not name one.
pub const DEFAULT_EXTENSION: &str = "png";

/// Derives the output path from the source path and the (possibly missing,
/// possibly partial) target the caller gave.
///
/// - no target: source directory, source stem, [`DEFAULT_EXTENSION`];
/// - directory-only target (trailing separator, or an existing directory):
///   that directory, source stem, [`DEFAULT_EXTENSION`];
/// - extension-only target (a lone `.ext`): source directory, source stem,
///   the given extension;
/// - bare file name: source directory, that name;
/// - a name without an extension gets [`DEFAULT_EXTENSION`] appended.
///
/// Pure path algebra: nothing here touches the filesystem except the
/// existing-directory probe, and an unreadable source surfaces later as the
/// loader's error.
pub fn resolve_target(source: &Path, target: Option<&Path>) -> PathBuf {
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));

    let Some(target) = target else {
        return source_dir.join(derived_file_name(source, DEFAULT_EXTENSION));
    };

    if is_directory_only(target) {
        return target.join(derived_file_name(source, DEFAULT_EXTENSION));
    }

    if let Some(ext) = extension_only(target) {
        return source_dir.join(derived_file_name(source, ext));
    }

    let target = if target.extension().is_some() {
        target.to_owned()
    } else {
        target.with_extension(DEFAULT_EXTENSION)
    };

    match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => target,
        _ => source_dir.join(target),
    }
}

/// Source file stem plus the given extension, as a bare file name.
fn derived_file_name(source: &Path, ext: &str) -> OsString {
    let mut name = source.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(ext);

    name
}

fn is_directory_only(target: &Path) -> bool {
    let raw = target.as_os_str().to_string_lossy();

    raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) || target.is_dir()
}

/// A target like `.gif`: no directory, no stem, just the wanted extension.
fn extension_only(target: &Path) -> Option<&str> {
    let name = target.to_str()?;
    let ext = name.strip_prefix('.')?;

    let plain = !ext.is_empty() && !ext.contains(['.', '/', std::path::MAIN_SEPARATOR]);

    plain.then_some(ext)
}

#[cfg(test)]
mod test {
    use std::path::Path;
    use std::path::PathBuf;

    use super::resolve_target;

    fn resolve(source: &str, target: Option<&str>) -> PathBuf {
        resolve_target(Path::new(source), target.map(Path::new))
    }

    #[test]
    fn omitted_target_swaps_the_extension() {
        assert_eq!(
            resolve("pats/glider.rle", None),
            PathBuf::from("pats/glider.png")
        );
    }

    #[test]
    fn omitted_target_without_source_dir() {
        assert_eq!(resolve("glider.rle", None), PathBuf::from("glider.png"));
    }

    #[test]
    fn full_target_is_used_as_given() {
        assert_eq!(
            resolve("pats/glider.rle", Some("out/img.gif")),
            PathBuf::from("out/img.gif")
        );
    }

    #[test]
    fn bare_file_name_lands_in_the_source_dir() {
        assert_eq!(
            resolve("pats/glider.rle", Some("img.gif")),
            PathBuf::from("pats/img.gif")
        );
    }

    #[test]
    fn directory_only_target_keeps_the_source_name() {
        assert_eq!(
            resolve("pats/glider.rle", Some("out/")),
            PathBuf::from("out/glider.png")
        );
    }

    #[test]
    fn extension_only_target_keeps_dir_and_name() {
        assert_eq!(
            resolve("pats/glider.rle", Some(".gif")),
            PathBuf::from("pats/glider.gif")
        );
    }

    #[test]
    fn name_without_extension_gets_the_default() {
        assert_eq!(
            resolve("pats/glider.rle", Some("img")),
            PathBuf::from("pats/img.png")
        );
    }
}
