// Build script for codedeskctl - embeds version at compile time

fn main() {
    // Release builds may stamp their own version; otherwise use Cargo.toml
    let version =
        std::env::var("CODEDESK_VERSION").unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=CODEDESK_VERSION={}", version);

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-env-changed=CODEDESK_VERSION");
}
