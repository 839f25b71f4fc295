//! Build script for pinfft-backend-fftw.
//!
//! Locates the FFTW3 libraries and configures linking against libfftw3 and
//! libfftw3f.

fn main() {
    // Only link FFTW when the fftw feature is enabled
    #[cfg(feature = "fftw")]
    {
        link_fftw();
    }
}

#[cfg(feature = "fftw")]
fn link_fftw() {
    // Search order:
    // 1. FFTW_DIR environment variable
    // 2. FFTW_HOME environment variable
    // 3. Common install prefixes
    let prefix = std::env::var("FFTW_DIR")
        .or_else(|_| std::env::var("FFTW_HOME"))
        .ok()
        .or_else(|| {
            ["/usr/local", "/opt/homebrew", "/opt/local"]
                .into_iter()
                .find(|path| std::path::Path::new(path).join("include/fftw3.h").exists())
                .map(str::to_string)
        });

    if let Some(prefix) = prefix {
        for dir in ["lib64", "lib"] {
            let lib_path = format!("{prefix}/{dir}");
            if std::path::Path::new(&lib_path).exists() {
                println!("cargo:rustc-link-search=native={lib_path}");
            }
        }
    }

    // Otherwise the system linker paths are expected to carry libfftw3.
    println!("cargo:rustc-link-lib=fftw3");
    println!("cargo:rustc-link-lib=fftw3f");

    println!("cargo:rerun-if-env-changed=FFTW_DIR");
    println!("cargo:rerun-if-env-changed=FFTW_HOME");
}
