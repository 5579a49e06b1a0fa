use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Escribe `contents` en un archivo temporal hermano y lo renombra sobre `path`.
///
/// Un lector nunca ve un `spinlog.toml` a medio escribir.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let tmp_path = path.with_extension("toml.tmp");
  {
    let mut tmp = fs::File::create(&tmp_path)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.sync_all()?;
  }

  fs::rename(&tmp_path, path)
}
