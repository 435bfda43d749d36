//! 辞書リソースの読み込み
//!
//! 辞書のバイナリファイルは、論理名を受け取って生のバイト列を返す
//! [`ResourceLoader`]を介して取得されます。
//! gzip圧縮されたリソースは、先頭のマジックバイトで判定して展開されます。

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use hashbrown::HashMap;

use crate::errors::{MecabError, Result};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// 論理名からリソースのバイト列を取得する機能を提供するトレイト
pub trait ResourceLoader {
    /// リソースを読み込みます。
    ///
    /// # 戻り値
    ///
    /// リソースが存在する場合はその内容、存在しない場合は`None`
    ///
    /// # エラー
    ///
    /// 存在するリソースの読み込みに失敗した場合、[`MecabError`]が返されます。
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>>;
}

/// ファイルシステム上のディレクトリからリソースを読み込むローダー
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    dir: PathBuf,
}

impl DirectoryLoader {
    /// 新しいローダーを作成します。
    pub fn new<P>(dir: P) -> Self
    where
        P: AsRef<Path>,
    {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ResourceLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.dir.join(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// メモリ上の対応表からリソースを読み込むローダー
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryLoader {
    /// 空のローダーを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// リソースを登録します。
    pub fn insert<S>(&mut self, name: S, bytes: Vec<u8>)
    where
        S: Into<String>,
    {
        self.resources.insert(name.into(), bytes);
    }
}

impl From<HashMap<String, Vec<u8>>> for MemoryLoader {
    fn from(resources: HashMap<String, Vec<u8>>) -> Self {
        Self { resources }
    }
}

impl ResourceLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.resources.get(name).cloned())
    }
}

/// バイト列がgzip形式の場合に展開します。
pub fn gunzip_if_needed(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes);
    }
    let mut decoded = vec![];
    GzDecoder::new(bytes.as_slice()).read_to_end(&mut decoded)?;
    Ok(decoded)
}

/// 辞書リソースを取得します。
///
/// `<name>.gz`を先に試し、見つからなければ`<name>`を読み込みます。
/// 内容がgzip形式であれば展開して返します。
///
/// # エラー
///
/// どちらも存在しない場合、[`MecabError::ResourceNotFound`]が返されます。
pub fn fetch<L>(loader: &L, name: &str) -> Result<Vec<u8>>
where
    L: ResourceLoader + ?Sized,
{
    let gz_name = format!("{name}.gz");
    let (fetched, bytes) = match loader.load(&gz_name)? {
        Some(bytes) => (gz_name, bytes),
        None => {
            log::trace!("{gz_name} is not found; falling back to {name}");
            let bytes = loader
                .load(name)?
                .ok_or_else(|| MecabError::ResourceNotFound(name.to_string()))?;
            (name.to_string(), bytes)
        }
    };
    let compressed = bytes.starts_with(&GZIP_MAGIC);
    let bytes = gunzip_if_needed(bytes)?;
    log::debug!(
        "Loaded {fetched} ({} bytes, gzip={compressed})",
        bytes.len()
    );
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    fn gzip(bytes: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(vec![], Compression::default());
        enc.write_all(bytes).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn test_fetch_plain() {
        let mut loader = MemoryLoader::new();
        loader.insert("cc.dat", vec![1, 2, 3]);
        assert_eq!(fetch(&loader, "cc.dat").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fetch_prefers_gz() {
        let mut loader = MemoryLoader::new();
        loader.insert("cc.dat", vec![9]);
        loader.insert("cc.dat.gz", gzip(&[1, 2, 3]));
        assert_eq!(fetch(&loader, "cc.dat").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fetch_detects_magic() {
        let mut loader = MemoryLoader::new();
        loader.insert("tid.dat", gzip(b"abc"));
        assert_eq!(fetch(&loader, "tid.dat").unwrap(), b"abc");
    }

    #[test]
    fn test_fetch_uncompressed_gz_name() {
        let mut loader = MemoryLoader::new();
        loader.insert("tid.dat.gz", b"abc".to_vec());
        assert_eq!(fetch(&loader, "tid.dat").unwrap(), b"abc");
    }

    #[test]
    fn test_fetch_missing() {
        let loader = MemoryLoader::new();
        assert!(matches!(
            fetch(&loader, "unk.dat"),
            Err(MecabError::ResourceNotFound(name)) if name == "unk.dat"
        ));
    }

    #[test]
    fn test_directory_loader() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("unk_char.dat"), [4, 5]).unwrap();
        fs::write(dir.path().join("cc.dat.gz"), gzip(&[6, 7])).unwrap();

        let loader = DirectoryLoader::new(dir.path());
        assert_eq!(loader.load("missing.dat").unwrap(), None);
        assert_eq!(fetch(&loader, "unk_char.dat").unwrap(), vec![4, 5]);
        assert_eq!(fetch(&loader, "cc.dat").unwrap(), vec![6, 7]);
    }
}
