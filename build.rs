use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());

    // The HUD looks for assets/fonts/font.ttf by default
    let fonts_dir = Path::new(&manifest_dir).join("assets").join("fonts");
    if !fonts_dir.exists() {
        if let Err(e) = fs::create_dir_all(&fonts_dir) {
            println!("cargo:warning=could not create {}: {}", fonts_dir.display(), e);
        }
    }

    println!("cargo:rerun-if-changed=build.rs");

    link_sdl2_libraries();
}

fn link_sdl2_libraries() {
    #[cfg(target_os = "macos")]
    {
        if is_homebrew_available() {
            for (package, lib) in [("sdl2", "SDL2"), ("sdl2_ttf", "SDL2_ttf")] {
                match get_homebrew_path(package) {
                    Ok(prefix) => {
                        println!("cargo:rustc-link-search={}/lib", prefix);
                        println!("cargo:rustc-link-lib={}", lib);
                    }
                    Err(e) => println!("cargo:warning={} (try 'brew install {}')", e, package),
                }
            }
        } else {
            println!("cargo:warning=Homebrew not found; install SDL2 and SDL2_ttf manually");
        }
    }

    #[cfg(target_os = "linux")]
    {
        // sudo apt-get install libsdl2-dev libsdl2-ttf-dev
    }

    #[cfg(target_os = "windows")]
    {
        // SDL2.dll and SDL2_ttf.dll must be on PATH at runtime
    }
}

#[allow(dead_code)]
fn is_homebrew_available() -> bool {
    Command::new("brew").arg("--version").output().is_ok()
}

#[allow(dead_code)]
fn get_homebrew_path(package: &str) -> Result<String, String> {
    match Command::new("brew").args(["--prefix", package]).output() {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(_) => Err(format!("Package {} not found in homebrew", package)),
        Err(e) => Err(format!("Failed to execute brew command: {}", e)),
    }
}
