#![allow(dead_code)]

use assert_cmd::Command;
use assert_fs::TempDir;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use rstest::fixture;
use sha1::{Digest, Sha1};
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn git_dir(repository_dir: &Path) -> PathBuf {
    repository_dir.join(".git")
}

pub fn object_path(repository_dir: &Path, oid: &str) -> PathBuf {
    git_dir(repository_dir)
        .join("objects")
        .join(&oid[..2])
        .join(&oid[2..])
}

/// Store `<kind> <len>\0<body>` as a zlib loose object and return its id.
pub fn write_object(repository_dir: &Path, kind: &str, body: &[u8]) -> String {
    let mut data = format!("{kind} {}\0", body.len()).into_bytes();
    data.extend_from_slice(body);

    let oid = format!("{:x}", Sha1::digest(&data));
    write_compressed(repository_dir, &oid, &data);
    oid
}

/// Compress arbitrary bytes into the loose object slot of `oid`.
pub fn write_compressed(repository_dir: &Path, oid: &str, data: &[u8]) {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("Failed to compress object");
    write_raw(repository_dir, oid, &encoder.finish().expect("Failed to compress object"));
}

/// Write bytes as-is into the loose object slot of `oid`.
pub fn write_raw(repository_dir: &Path, oid: &str, bytes: &[u8]) {
    let path = object_path(repository_dir, oid);
    std::fs::create_dir_all(path.parent().expect("Object path has a parent"))
        .expect("Failed to create object directory");
    std::fs::write(path, bytes).expect("Failed to write object");
}

pub fn tree_body(entries: &[(&str, &str, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (mode, name, oid) in entries {
        body.extend_from_slice(format!("{mode} {name}\0").as_bytes());
        body.extend_from_slice(&hex::decode(oid).expect("Invalid hex object id"));
    }
    body
}

pub fn commit_body(tree: &str, parents: &[&str], message: &str) -> Vec<u8> {
    let mut lines = vec![format!("tree {tree}")];
    lines.extend(parents.iter().map(|parent| format!("parent {parent}")));
    lines.push("author A U Thor <author@example.com> 1700000000 +0000".to_string());
    lines.push("committer A U Thor <author@example.com> 1700000000 +0000".to_string());
    lines.push(String::new());
    lines.push(message.to_string());
    format!("{}\n", lines.join("\n")).into_bytes()
}

pub fn write_ref(repository_dir: &Path, name: &str, content: &str) {
    let path = git_dir(repository_dir).join(name);
    std::fs::create_dir_all(path.parent().expect("Ref path has a parent"))
        .expect("Failed to create ref directory");
    std::fs::write(path, content).expect("Failed to write ref");
}

#[derive(Debug)]
pub struct SampleRepository {
    pub dir: TempDir,
    pub blob: String,
    pub tree: String,
    pub commit: String,
}

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    std::fs::create_dir_all(git_dir(dir.path()).join("objects"))
        .expect("Failed to create objects dir");
    write_ref(dir.path(), "HEAD", "ref: refs/heads/master\n");
    dir
}

/// One blob, one tree naming it `file.txt`, and one root commit on `master`.
#[fixture]
pub fn sample_repository(repository_dir: TempDir) -> SampleRepository {
    let blob = write_object(repository_dir.path(), "blob", b"hello\n");
    let tree = write_object(
        repository_dir.path(),
        "tree",
        &tree_body(&[("100644", "file.txt", &blob)]),
    );
    let commit = write_object(
        repository_dir.path(),
        "commit",
        &commit_body(&tree, &[], "Initial commit"),
    );
    write_ref(repository_dir.path(), "refs/heads/master", &format!("{commit}\n"));

    SampleRepository {
        dir: repository_dir,
        blob,
        tree,
        commit,
    }
}

pub fn run_gitgraph(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitgraph").expect("Failed to find gitgraph binary");
    cmd.current_dir(dir)
        .env_remove("GIT_DIR")
        .env_remove("GITGRAPH_JOBS")
        .args(args);
    cmd
}
