use std::{
  env,
  path::PathBuf,
};

fn main() {
  println!("cargo:rerun-if-changed=src/ffi.rs");
  println!("cargo:rerun-if-changed=cbindgen.toml");

  let crate_dir = match env::var("CARGO_MANIFEST_DIR") {
    Ok(dir) => PathBuf::from(dir),
    Err(_) => return,
  };

  let config = cbindgen::Config::from_file(crate_dir.join("cbindgen.toml")).unwrap_or_default();

  match cbindgen::Builder::new()
    .with_crate(&crate_dir)
    .with_config(config)
    .generate()
  {
    Ok(bindings) => {
      bindings.write_to_file(crate_dir.join("include").join("mu_core.h"));
    }
    Err(err) => {
      println!("cargo:warning=cbindgen failed, C header not regenerated: {err}");
    }
  }
}
