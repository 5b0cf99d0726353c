// Copyright 2021 bmc::labs Gmbh. All rights reserved.
//
// Authors:
//   Florian Eich <florian@bmc-labs.com>
//   Jonas Reitemeyer <alumni@bmc-labs.com>

use std::{env, fs, path::Path};


fn main() {
  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-env-changed=CARGO_FEATURE_AIM");

  // without the `aim` feature the crate only talks to injected decoders, so
  // there is nothing to copy and nothing to link against
  if env::var_os("CARGO_FEATURE_AIM").is_none() {
    return;
  }

  #[rustfmt::skip]
  let project_dir = env::var(
    "CARGO_MANIFEST_DIR"
  ).expect("unable to read CARGO_MANIFEST_DIR env variable");

  #[rustfmt::skip]
  let out_dir = env::var(
    "OUT_DIR"
  ).expect("unable to read OUT_DIR env variable");

  // cargo only lets us load shared libraries at run time from within the
  // OUT_DIR, so the .so/.dll files from `aim` get copied over there first
  let lib_src_path = format!("{}/aim", project_dir);
  let lib_dst_path = format!("{}/lib", out_dir);

  if !Path::new(&lib_dst_path).exists() {
    fs::create_dir(&lib_dst_path).expect("unable to create lib dir");
  }

  let files = fs::read_dir(&lib_src_path).expect("unable to read aim dir");
  for file in files {
    let src_path = file.expect("could not read file").path();
    let file_name = src_path.file_name()
                            .and_then(|name| name.to_str())
                            .expect("library file name is not valid unicode");
    let dst_path = format!("{}/{}", &lib_dst_path, file_name);

    fs::copy(&src_path, dst_path).expect("unable to copy libs to target dir");
  }

  println!(r"cargo:rustc-link-search=all={}/lib", out_dir);

  #[cfg(target_family = "unix")]
  {
    println!(r"cargo:rustc-link-lib=xdrk-x86_64");
    println!(r"cargo:rustc-link-lib=xml2");
  }

  #[cfg(target_family = "windows")]
  {
    println!(r"cargo:rustc-link-lib=dylib=libxdrk-x86_64");
  }
}
