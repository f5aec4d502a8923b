/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::process::Command;

use cargo_metadata::{Error, MetadataCommand};
use git2::Repository;

const UNKNOWN: &str = "unknown";

struct GitHead {
    commit_hash: String,
    commit_short_hash: String,
    is_dirty: bool,
    head_file: Option<std::path::PathBuf>,
}

fn git_head() -> Result<GitHead, git2::Error> {
    let repo = Repository::discover(".")?;
    let head = repo.head()?;
    let commit = head.peel_to_commit()?;
    let commit_hash = commit.id().to_string();
    let commit_short_hash = commit
        .as_object()
        .short_id()?
        .as_str()
        .unwrap_or(UNKNOWN)
        .to_ascii_lowercase();

    let is_dirty = repo.statuses(None)?.iter().any(|status| {
        let s = status.status();
        !((s == git2::Status::CURRENT) | (s == git2::Status::IGNORED))
    });

    Ok(GitHead {
        commit_hash,
        commit_short_hash,
        is_dirty,
        head_file: Some(repo.path().join("HEAD")),
    })
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    // Get project name and version
    let metadata = MetadataCommand::new().no_deps().exec()?;
    let pkg_name = std::env::var("CARGO_PKG_NAME").unwrap_or_default();

    if let Some(package) = metadata.packages.iter().find(|p| p.name == pkg_name) {
        println!("cargo:rustc-env=PROJECT_NAME={}", package.name);
        println!("cargo:rustc-env=PROJECT_VERSION={}", package.version);
    } else {
        println!("cargo:rustc-env=PROJECT_NAME={}", UNKNOWN);
        println!("cargo:rustc-env=PROJECT_VERSION=?.?.?");
    }

    // no repository in source tarballs
    let head = match git_head() {
        Ok(head) => head,
        Err(e) => {
            println!("cargo:warning=No git metadata available: {}", e.message());
            GitHead {
                commit_hash: UNKNOWN.to_owned(),
                commit_short_hash: UNKNOWN.to_owned(),
                is_dirty: false,
                head_file: None,
            }
        }
    };

    if let Some(head_file) = head.head_file.as_ref() {
        println!("cargo:rerun-if-changed={}", head_file.display());
    }

    let dirty_str = if head.is_dirty { "-dirty" } else { "" };

    let commit_datetime = Command::new("git")
        .args(["log", "-1", "--format=%ai", &head.commit_hash])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_owned())
        .filter(|datetime| !datetime.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned());

    println!(
        "cargo:rustc-env=GIT_COMMIT_HASH={}{}",
        head.commit_hash, dirty_str
    );
    println!(
        "cargo:rustc-env=GIT_COMMIT_SHORT_HASH={}{}",
        head.commit_short_hash, dirty_str
    );
    println!("cargo:rustc-env=GIT_COMMIT_DATETIME={}", commit_datetime);

    Ok(())
}
