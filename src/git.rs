//! Thin wrappers around the system `git` command for fetching hudson.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::Error;
use url::Url;

/// Strip `refs/heads/` or `refs/tags/` so the ref can be passed to
/// `git clone --branch`, which only accepts short names.
pub fn short_ref(ref_name: &str) -> &str {
    ref_name
        .strip_prefix("refs/heads/")
        .or_else(|| ref_name.strip_prefix("refs/tags/"))
        .unwrap_or(ref_name)
}

/// Clone a repository at a specific ref using shallow clone
///
/// This uses the system git command, which automatically handles:
/// - SSH keys from ~/.ssh/
/// - Git credential helpers
/// - Any authentication configured in ~/.gitconfig
pub fn clone_shallow(url: &str, ref_name: &str, target_dir: &Path) -> Result<(), Error> {
    // git won't clone into an existing non-empty dir
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)?;
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    let branch = short_ref(ref_name);
    let output = Command::new("git")
        .args(["clone", "--quiet", "--depth=1", "--branch", branch, url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: "clone".to_string(),
            url: url.to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);

        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some("Make sure the repository URL is correct and you have read access to it".to_string())
        } else if stderr.contains("Remote branch") && stderr.contains("not found") {
            Some(format!("Check that '{}' exists in the remote repository", branch))
        } else {
            None
        };

        // Don't leave a half-populated checkout behind to be mistaken for a cache hit.
        if target_dir.exists() {
            fs::remove_dir_all(target_dir)?;
        }

        return Err(Error::GitClone {
            url: url.to_string(),
            r#ref: ref_name.to_string(),
            message: stderr.trim().to_string(),
            hint,
        });
    }

    Ok(())
}

/// Resolve `ref_name` on the remote to the commit it currently points at.
///
/// Runs `git ls-remote`, so the network round trip is cheap compared to a
/// clone and works for both branches and tags.
pub fn resolve_ref(url: &str, ref_name: &str) -> Result<String, Error> {
    let output = Command::new("git")
        .args(["ls-remote", url, ref_name])
        .output()
        .map_err(|e| Error::GitCommand {
            command: "ls-remote".to_string(),
            url: url.to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::GitCommand {
            command: "ls-remote".to_string(),
            url: url.to_string(),
            stderr: stderr.trim().to_string(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_ls_remote(&stdout, ref_name).ok_or_else(|| Error::RefNotFound {
        url: url.to_string(),
        r#ref: ref_name.to_string(),
    })
}

/// Pick the commit for `ref_name` out of `git ls-remote` output.
///
/// Git ls-remote output format: `<hash>\t<ref>`. An annotated tag is listed
/// twice, and its peeled `^{}` line names the commit, so that one is
/// preferred. Branches win over tags of the same name, matching what
/// `git clone --branch` checks out.
pub fn parse_ls_remote(output: &str, ref_name: &str) -> Option<String> {
    let short = short_ref(ref_name);
    let candidates = [
        ref_name.to_string(),
        format!("refs/heads/{}", short),
        format!("refs/tags/{}^{{}}", short),
        format!("refs/tags/{}", short),
    ];

    let refs: Vec<(&str, &str)> = output
        .lines()
        .filter_map(|line| line.split_once('\t'))
        .collect();

    candidates.iter().find_map(|wanted| {
        refs.iter()
            .find(|(_, name)| name == wanted)
            .map(|(hash, _)| hash.to_string())
    })
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Convert URL and ref to cache path
///
/// `https://github.com/LineageOS/hudson` at `main` becomes
/// `<cache_root>/github-com-LineageOS-hudson-main-<hash>`. The readable part
/// is lossy, so the hash of the exact URL and ref keeps distinct
/// repositories apart. Local paths and other strings that don't parse as URLs
/// are sanitized as-is.
pub fn url_to_cache_path(cache_root: &Path, url: &str, ref_name: &str) -> PathBuf {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let (repo, canonical) = match Url::parse(url) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            let path = parsed.path().trim_end_matches(".git");
            (
                sanitize(&format!("{}{}", host, path)),
                format!("{}{}", host, path),
            )
        }
        Err(_) => (sanitize(url), url.trim_end_matches(".git").to_string()),
    };

    let short = short_ref(ref_name);

    let mut hasher = DefaultHasher::new();
    (canonical.as_str(), short).hash(&mut hasher);
    let key_hash = hasher.finish();

    cache_root.join(format!("{}-{}-{:016x}", repo, sanitize(short), key_hash))
}
