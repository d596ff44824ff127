//! Candidate hooks-config paths in precedence order.

use std::fs;
use std::path::{Path, PathBuf};

use super::{APP_CONFIG_STEM, Scope, ScopeRoots};

const CANONICAL_NAMES: [&str; 2] = ["hooks.yml", "hooks.yaml"];
const LEGACY_TOP_LEVEL_NAMES: [&str; 3] = ["hooks.yml", "hooks.yaml", "hooks.json"];
const LOCAL_OVERRIDE_NAME: &str = "hooks-local.yml";

/// Build the ordered list of hooks-config candidates, highest precedence first.
///
/// Project scope comes before global scope. Within a scope:
/// 1. `.claude/hooks/hooks.{yml,yaml}`
/// 2. `.claude/hooks.{yml,yaml,json}`
/// 3. `.claude/hooks/*.{yml,yaml}` sorted by file name
/// 4. `.claude/hooks-local.yml`
///
/// Paths are returned whether or not they exist; callers skip missing ones.
/// The list is deduplicated while keeping the first occurrence, which matters
/// when the project root and home directory coincide.
pub fn candidate_paths(roots: &ScopeRoots) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for scope in [Scope::Project, Scope::Global] {
        for path in scope_candidates(roots, scope) {
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths
}

fn scope_candidates(roots: &ScopeRoots, scope: Scope) -> Vec<PathBuf> {
    let claude_dir = roots.claude_dir(scope);
    let hooks_dir = roots.hooks_dir(scope);

    let mut paths: Vec<PathBuf> = CANONICAL_NAMES
        .iter()
        .map(|name| hooks_dir.join(name))
        .collect();

    paths.extend(
        LEGACY_TOP_LEVEL_NAMES
            .iter()
            .map(|name| claude_dir.join(name)),
    );

    paths.extend(group_config_files(&hooks_dir));
    paths.push(claude_dir.join(LOCAL_OVERRIDE_NAME));

    paths
}

/// List per-group YAML files directly inside `hooks_dir`, sorted by file name.
///
/// The canonical `hooks.{yml,yaml}` files and the reserved app-config stem are
/// excluded. A missing or unreadable directory yields an empty list.
pub fn group_config_files(hooks_dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(hooks_dir) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    event = "core.paths.group_dir_read_failed",
                    path = %hooks_dir.display(),
                    error = %e
                );
            }
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_group_config_file(path))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    files
}

fn is_group_config_file(path: &Path) -> bool {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));
    if !is_yaml {
        return false;
    }

    let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if CANONICAL_NAMES.contains(&file_name) {
        return false;
    }

    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_none_or(|stem| stem != APP_CONFIG_STEM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn roots_in(temp: &TempDir) -> ScopeRoots {
        ScopeRoots::new(temp.path().join("project"), temp.path().join("home"))
    }

    #[test]
    fn test_candidate_order_without_group_files() {
        let temp = TempDir::new().unwrap();
        let roots = roots_in(&temp);

        let paths = candidate_paths(&roots);
        let project = temp.path().join("project").join(".claude");
        let home = temp.path().join("home").join(".claude");

        assert_eq!(
            paths,
            vec![
                project.join("hooks").join("hooks.yml"),
                project.join("hooks").join("hooks.yaml"),
                project.join("hooks.yml"),
                project.join("hooks.yaml"),
                project.join("hooks.json"),
                project.join("hooks-local.yml"),
                home.join("hooks").join("hooks.yml"),
                home.join("hooks").join("hooks.yaml"),
                home.join("hooks.yml"),
                home.join("hooks.yaml"),
                home.join("hooks.json"),
                home.join("hooks-local.yml"),
            ]
        );
    }

    #[test]
    fn test_group_files_sorted_and_filtered() {
        let temp = TempDir::new().unwrap();
        let hooks_dir = temp.path().join("hooks");
        fs::create_dir_all(&hooks_dir).unwrap();

        for name in [
            "zeta.yml",
            "Alpha.YAML",
            "python.yaml",
            "hooks.yml",
            "blues-traveler-config.yml",
            "notes.txt",
            "data.json",
        ] {
            fs::write(hooks_dir.join(name), "").unwrap();
        }
        fs::create_dir_all(hooks_dir.join("nested.yml")).unwrap();

        let files = group_config_files(&hooks_dir);
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["Alpha.YAML", "python.yaml", "zeta.yml"]);
    }

    #[test]
    fn test_group_files_missing_directory_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(group_config_files(&temp.path().join("does-not-exist")).is_empty());
    }

    #[test]
    fn test_group_files_placed_before_local_override() {
        let temp = TempDir::new().unwrap();
        let roots = roots_in(&temp);
        let hooks_dir = roots.hooks_dir(Scope::Project);
        fs::create_dir_all(&hooks_dir).unwrap();
        fs::write(hooks_dir.join("go.yml"), "").unwrap();

        let paths = candidate_paths(&roots);
        let group_index = paths
            .iter()
            .position(|p| p == &hooks_dir.join("go.yml"))
            .unwrap();
        let local_index = paths
            .iter()
            .position(|p| p == &roots.claude_dir(Scope::Project).join("hooks-local.yml"))
            .unwrap();

        assert_eq!(group_index, 5);
        assert_eq!(local_index, 6);
    }

    #[test]
    fn test_same_root_for_both_scopes_is_deduplicated() {
        let temp = TempDir::new().unwrap();
        let roots = ScopeRoots::new(temp.path(), temp.path());

        let paths = candidate_paths(&roots);
        assert_eq!(paths.len(), 6);
    }
}
