//! Free-space probe backed by `sysinfo` disk statistics.

use std::path::Path;

use anyhow::{anyhow, Context};
use sysinfo::Disks;

use super::oracle::StorageProbe;

/// Answers free-space queries from the mounted disk list
#[derive(Debug, Default, Clone, Copy)]
pub struct SysinfoStorageProbe;

impl StorageProbe for SysinfoStorageProbe {
    fn free_kb(&self, path: &Path) -> anyhow::Result<u64> {
        let path = path
            .canonicalize()
            .with_context(|| format!("cannot resolve trace folder {}", path.display()))?;

        let disks = Disks::new_with_refreshed_list();
        let available = available_bytes_for(
            &path,
            disks
                .list()
                .iter()
                .map(|disk| (disk.mount_point(), disk.available_space())),
        )
        .ok_or_else(|| anyhow!("no mounted disk contains {}", path.display()))?;

        Ok(available / 1024)
    }
}

/// Available bytes on the mount with the longest prefix of `path`
fn available_bytes_for<'a>(
    path: &Path,
    mounts: impl IntoIterator<Item = (&'a Path, u64)>,
) -> Option<u64> {
    mounts
        .into_iter()
        .filter(|(mount_point, _)| path.starts_with(mount_point))
        .max_by_key(|(mount_point, _)| mount_point.components().count())
        .map(|(_, available)| available)
}
