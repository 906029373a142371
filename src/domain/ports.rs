use crate::utils::error::Result;
use std::path::Path;

/// 檔案讀寫的抽象；轉換核心本身不做任何 I/O
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    /// `None` means "next to the input file".
    fn output_dir(&self) -> Option<&Path>;
    fn overwrite(&self) -> bool;
}
