fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Shown by `closedbugs --version`
    println!(
        "cargo:rustc-env=BUILD_TIMESTAMP={}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );

    if let Ok(output) = std::process::Command::new("git")
        .args(["describe", "--always", "--dirty"])
        .output()
    {
        if output.status.success() {
            let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
            println!("cargo:rustc-env=GIT_HASH={hash}");
        }
    }
}
