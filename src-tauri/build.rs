fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own, so the
    // WebP encoder needs us to tell cargo where the native library lives.
    //
    // Linux: install the system `libvips-dev` package.
    // macOS: `brew install vips`, or point VIPS_DIR at a custom prefix.
    // Windows: extract vips-dev-w64-web into <workspace-root>/vendor/libvips-native
    //          (or set VIPS_DIR) and put its bin/ directory on PATH.
    link_libvips();

    // Tauri build will embed Windows resources (icons) if RC.EXE is available.
    tauri_build::build()
}

fn link_libvips() {
    println!("cargo:rerun-if-env-changed=VIPS_DIR");

    let vips_dir = std::env::var("VIPS_DIR").ok().or_else(|| {
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .map(|workspace| {
                workspace
                    .join("vendor")
                    .join("libvips-native")
                    .to_string_lossy()
                    .to_string()
            })
    });

    let lib_dir = vips_dir
        .as_deref()
        .map(|dir| std::path::Path::new(dir).join("lib"));

    if cfg!(target_os = "windows") {
        match lib_dir.filter(|dir| dir.exists()) {
            Some(lib_dir) => {
                // rustc-link-arg reaches both the cdylib and the binary linker;
                // rustc-link-lib alone does not for the bin target on MSVC.
                for name in ["libvips.lib", "libglib-2.0.lib", "libgobject-2.0.lib"] {
                    println!("cargo:rustc-link-arg={}", lib_dir.join(name).display());
                }
            }
            None => {
                println!("cargo:warning=libvips not found, set VIPS_DIR or extract it to vendor/libvips-native");
            }
        }
    } else {
        if let Some(lib_dir) = lib_dir.filter(|dir| dir.exists()) {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        }
        println!("cargo:rustc-link-lib=dylib=vips");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
    }
}
