use std::process::Command;

fn short_commit_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() {
    // Builds outside a checkout (e.g. docker) can pass the hash in
    let hash = std::env::var("MOOD2MUSIC_GIT_HASH")
        .ok()
        .or_else(short_commit_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", hash);
    println!("cargo:rerun-if-env-changed=MOOD2MUSIC_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
